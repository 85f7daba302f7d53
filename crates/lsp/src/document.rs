use buildscope_api::Language;
use buildscope_core::ast::LineIndex;
use tower_lsp::lsp_types::{Position, TextDocumentContentChangeEvent};

/// In-memory text of an open document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub content: String,
    pub language: Language,
    pub version: i32,
}

impl Document {
    pub fn new(content: String, language: Language, version: i32) -> Self {
        Self {
            content,
            language,
            version,
        }
    }

    /// Apply editor changes in order. A change without a range replaces the
    /// whole text.
    pub fn apply_changes(&self, changes: &[TextDocumentContentChangeEvent], version: i32) -> Self {
        let mut content = self.content.clone();
        for change in changes {
            match change.range {
                Some(range) => {
                    let start = offset_at(&content, range.start);
                    let end = offset_at(&content, range.end).max(start);
                    content.replace_range(start..end, &change.text);
                }
                None => content = change.text.clone(),
            }
        }
        Self::new(content, self.language.clone(), version)
    }
}

/// Byte offset of an editor position; positions past the end clamp to it.
pub fn offset_at(text: &str, position: Position) -> usize {
    LineIndex::new(text)
        .offset(position.line, position.character)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tower_lsp::lsp_types::Range;

    fn edit(start: (u32, u32), end: (u32, u32), text: &str) -> TextDocumentContentChangeEvent {
        TextDocumentContentChangeEvent {
            range: Some(Range::new(Position::new(start.0, start.1), Position::new(end.0, end.1))),
            range_length: None,
            text: text.to_string(),
        }
    }

    #[test]
    fn incremental_edits_apply_in_order() {
        let doc = Document::new(
            "dependencies {\n    implementation 'a:b:1'\n}\n".to_string(),
            Language::GRADLE,
            1,
        );
        let doc = doc.apply_changes(
            &[
                edit((1, 24), (1, 25), "2"),
                edit((1, 4), (1, 18), "api"),
            ],
            2,
        );
        assert_eq!(doc.content, "dependencies {\n    api 'a:b:2'\n}\n");
        assert_eq!(doc.version, 2);
    }

    #[test]
    fn full_replacement_without_range() {
        let doc = Document::new("old".to_string(), Language::GRADLE, 1);
        let change = TextDocumentContentChangeEvent {
            range: None,
            range_length: None,
            text: "new text".to_string(),
        };
        assert_eq!(doc.apply_changes(&[change], 5).content, "new text");
    }

    #[test]
    fn utf16_columns_map_to_bytes() {
        // 'é' is one UTF-16 unit but two bytes
        let text = "name = 'é1'\r\nnext";
        assert_eq!(offset_at(text, Position::new(0, 10)), 11);
        assert_eq!(offset_at(text, Position::new(0, 99)), 12);
        assert_eq!(offset_at(text, Position::new(1, 2)), 16);
        assert_eq!(offset_at(text, Position::new(7, 0)), text.len());
    }

    #[test]
    fn insertion_at_end_of_document() {
        let doc = Document::new("a = 1\n".to_string(), Language::GRADLE, 1);
        let doc = doc.apply_changes(&[edit((1, 0), (1, 0), "b = 2\n")], 2);
        assert_eq!(doc.content, "a = 1\nb = 2\n");
    }
}
