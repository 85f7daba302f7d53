use super::keywords;
use super::walker::AstVisitor;
use crate::ast::{Ast, NodeId, NodeKind};
use buildscope_api::{TokenKind, TokenModifier};

/// A classified span. `line` and `column` are one-based, as in node spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SemanticToken {
    pub line: u32,
    pub column: u32,
    pub length: u32,
    pub kind: TokenKind,
    pub modifiers: u32,
}

/// Collects tokens for variable references, property accesses, map keys and
/// call names during a walk.
#[derive(Debug, Default)]
pub struct TokenCollector {
    tokens: Vec<SemanticToken>,
}

impl TokenCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tokens(&self) -> &[SemanticToken] {
        &self.tokens
    }

    /// Encode and reset the collector.
    pub fn finish(&mut self) -> Vec<u32> {
        let data = encode(&mut self.tokens);
        self.tokens.clear();
        data
    }

    fn add(&mut self, ast: &Ast, node: NodeId, kind: TokenKind, modifiers: u32) {
        let span = ast.span(node);
        if span.length == 0 {
            return;
        }
        self.tokens.push(SemanticToken {
            line: span.line,
            column: span.column,
            length: span.length,
            kind,
            modifiers,
        });
    }
}

impl AstVisitor for TokenCollector {
    fn enter(&mut self, ast: &Ast, node: NodeId, _parent: Option<NodeId>) {
        match ast.kind(node) {
            NodeKind::MethodCall { method, .. } => {
                let modifiers = if keywords::is_default_library(ast.text(*method)) {
                    TokenModifier::DefaultLibrary.bitmask()
                } else {
                    0
                };
                self.add(ast, *method, TokenKind::Function, modifiers);
            }
            NodeKind::MapEntry { key, .. } => self.add(ast, *key, TokenKind::Parameter, 0),
            NodeKind::Variable { .. } => self.add(ast, node, TokenKind::Variable, 0),
            NodeKind::Property { property, .. } => self.add(ast, *property, TokenKind::Property, 0),
            _ => {}
        }
    }
}

/// Delta-encode tokens into LSP's flat `[dLine, dCol, length, kind, modifiers]*`
/// stream.
///
/// Tokens are stably sorted by position. Tokens with a zero line or column
/// are skipped, and a token at the same position as the previously emitted
/// one is dropped.
pub fn encode(tokens: &mut [SemanticToken]) -> Vec<u32> {
    tokens.sort_by_key(|token| (token.line, token.column));

    let mut data = Vec::with_capacity(tokens.len() * 5);
    let mut current_line: i64 = 0;
    let mut current_column: i64 = 0;
    let mut emitted_any = false;
    for token in tokens.iter() {
        let line = i64::from(token.line) - 1;
        let column = i64::from(token.column) - 1;
        if line < 0 || column < 0 {
            continue;
        }
        let delta_line = line - current_line;
        if delta_line != 0 {
            current_line = line;
            current_column = 0;
        }
        let delta_column = column - current_column;
        current_column = column;
        if delta_line != 0 || delta_column != 0 || !emitted_any {
            data.extend_from_slice(&[
                delta_line as u32,
                delta_column as u32,
                token.length,
                token.kind.index(),
                token.modifiers,
            ]);
            emitted_any = true;
        }
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::walker::walk;
    use crate::testing::Sketch;
    use buildscope_api::decode_tokens;

    fn token(line: u32, column: u32, length: u32, kind: TokenKind) -> SemanticToken {
        SemanticToken {
            line,
            column,
            length,
            kind,
            modifiers: 0,
        }
    }

    #[test]
    fn encodes_relative_positions() {
        let mut tokens = vec![
            token(2, 5, 3, TokenKind::Variable),
            token(1, 1, 12, TokenKind::Function),
            token(2, 1, 2, TokenKind::Property),
        ];
        let data = encode(&mut tokens);
        assert_eq!(data, vec![0, 0, 12, 0, 0, 1, 0, 2, 1, 0, 0, 4, 3, 2, 0]);
    }

    #[test]
    fn drops_duplicate_positions_but_keeps_first() {
        let mut tokens = vec![
            token(1, 1, 5, TokenKind::Function),
            token(1, 1, 5, TokenKind::Variable),
            token(1, 7, 2, TokenKind::Variable),
        ];
        let data = encode(&mut tokens);
        assert_eq!(data, vec![0, 0, 5, 0, 0, 0, 6, 2, 2, 0]);
    }

    #[test]
    fn skips_tokens_without_source_position() {
        let mut tokens = vec![
            token(0, 0, 4, TokenKind::Variable),
            token(1, 1, 3, TokenKind::Function),
        ];
        let data = encode(&mut tokens);
        // the token at (0, 0) after skipping is still the first emitted one
        assert_eq!(data, vec![0, 0, 3, 0, 0]);
    }

    #[test]
    fn decoding_restores_sorted_positions() {
        let mut tokens = vec![
            token(3, 9, 1, TokenKind::Variable),
            token(1, 4, 2, TokenKind::Variable),
            token(3, 2, 1, TokenKind::Variable),
            token(3, 2, 1, TokenKind::Parameter),
            token(0, 3, 1, TokenKind::Variable),
        ];
        let data = encode(&mut tokens);
        let positions: Vec<_> = decode_tokens(&data).iter().map(|t| (t.line, t.column)).collect();
        assert_eq!(positions, vec![(0, 3), (2, 1), (2, 8)]);
    }

    #[test]
    fn collects_call_names_with_default_library_bit() {
        let source = "dependencies {\n    implementation project.name\n}";
        let mut sketch = Sketch::new(source);
        let property = sketch.property("project.name");
        let implementation = sketch.command("implementation", vec![property]);
        let deps = sketch.block_call("dependencies", vec![implementation]);
        let ast = sketch.finish(vec![deps]);

        let mut collector = TokenCollector::new();
        walk(&ast, &mut collector);
        let decoded = decode_tokens(&collector.finish());

        let summary: Vec<_> = decoded
            .iter()
            .map(|t| (t.line, t.column, t.length, t.kind, t.modifiers))
            .collect();
        assert_eq!(
            summary,
            vec![
                (0, 0, 12, TokenKind::Function.index(), TokenModifier::DefaultLibrary.bitmask()),
                (1, 4, 14, TokenKind::Function.index(), 0),
                (1, 19, 7, TokenKind::Variable.index(), 0),
                (1, 27, 4, TokenKind::Property.index(), 0),
            ]
        );
        assert!(collector.tokens().is_empty());
    }

    #[test]
    fn map_keys_are_parameters() {
        let mut sketch = Sketch::new("apply plugin: 'java'");
        let entry = sketch.entry("plugin", "'java'");
        let call = sketch.command("apply", vec![entry]);
        let ast = sketch.finish(vec![call]);

        let mut collector = TokenCollector::new();
        walk(&ast, &mut collector);
        let decoded = decode_tokens(&collector.finish());
        assert_eq!(decoded.len(), 2);
        assert_eq!((decoded[1].column, decoded[1].kind), (6, TokenKind::Parameter.index()));
    }
}
