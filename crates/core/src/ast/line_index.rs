//! Conversion between byte offsets and line/column positions.
//!
//! Editors address text with zero-based lines and UTF-16 columns, tree-sitter
//! and Rust strings with byte offsets. Node spans use the one-based form.

use super::Span;

pub struct LineIndex<'a> {
    line_starts: Vec<usize>,
    source: &'a str,
}

impl<'a> LineIndex<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut line_starts = vec![0];
        for (i, c) in source.char_indices() {
            if c == '\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts, source }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Byte offset of a zero-based (line, UTF-16 character) position.
    ///
    /// Characters past the end of a line clamp to the line end.
    pub fn offset(&self, line: u32, character: u32) -> Option<usize> {
        let line_start = *self.line_starts.get(line as usize)?;
        let line_text = self.line_text(line)?;

        let mut utf16_offset = 0u32;
        for (byte_offset, c) in line_text.char_indices() {
            if utf16_offset >= character {
                return Some(line_start + byte_offset);
            }
            utf16_offset += c.len_utf16() as u32;
        }
        Some(line_start + line_text.len())
    }

    /// Zero-based (line, UTF-16 character) of a byte offset.
    pub fn line_col(&self, offset: usize) -> (u32, u32) {
        let mut offset = offset.min(self.source.len());
        while !self.source.is_char_boundary(offset) {
            offset -= 1;
        }
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let line_start = self.line_starts[line];
        let character: u32 = self.source[line_start..offset]
            .chars()
            .map(|c| c.len_utf16() as u32)
            .sum();
        (line as u32, character)
    }

    /// One-based node span for the byte range `start..end`.
    pub fn span(&self, start: usize, end: usize) -> Span {
        let (line, column) = self.line_col(start);
        let (last_line, last_column) = self.line_col(end);
        let length = self
            .source
            .get(start..end)
            .map(|text| text.chars().map(|c| c.len_utf16() as u32).sum())
            .unwrap_or(0);
        Span::new(line + 1, column + 1, last_line + 1, last_column + 1, length)
    }

    /// Text of a zero-based line, without its terminator.
    pub fn line_text(&self, line: u32) -> Option<&'a str> {
        let start = *self.line_starts.get(line as usize)?;
        let end = self
            .line_starts
            .get(line as usize + 1)
            .copied()
            .unwrap_or(self.source.len());
        let text = &self.source[start..end];
        Some(text.trim_end_matches('\n').trim_end_matches('\r'))
    }
}
