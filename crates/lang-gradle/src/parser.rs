use crate::language::language;
use crate::lower::lower;
use buildscope_core::ast::LineIndex;
use buildscope_core::error::{BuildscopeError, Result};
use buildscope_core::parser::{ParseOutcome, ScriptParser, SyntaxError};
use tree_sitter::{Node, Parser};
use url::Url;

/// Longest excerpt of unexpected input quoted in a message.
const EXCERPT_LEN: usize = 24;

/// Parses Gradle build scripts with the tree-sitter Groovy grammar.
///
/// A script with syntax errors yields diagnostics and no tree.
#[derive(Debug, Default, Clone, Copy)]
pub struct GroovyParser;

impl GroovyParser {
    pub fn new() -> Self {
        Self
    }
}

impl ScriptParser for GroovyParser {
    fn parse(&self, source: &str, uri: &Url) -> Result<ParseOutcome> {
        let mut parser = Parser::new();
        parser
            .set_language(language())
            .map_err(|e| BuildscopeError::Parsing(e.to_string()))?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| BuildscopeError::Parsing(format!("Failed to parse {}", uri)))?;
        let root = tree.root_node();

        if root.has_error() {
            let errors = syntax_errors(root, source);
            tracing::debug!("{}: {} syntax errors", uri, errors.len());
            return Ok(ParseOutcome::failed(errors));
        }
        Ok(ParseOutcome::parsed(lower(root, source)))
    }
}

/// Error and missing nodes, outermost first, in source order.
pub fn syntax_errors(root: Node<'_>, source: &str) -> Vec<SyntaxError> {
    let lines = LineIndex::new(source);
    let mut errors = Vec::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_missing() {
            let span = lines.span(node.start_byte(), node.end_byte());
            errors.push(SyntaxError::new(span, format!("Missing {}", node.kind())));
            continue;
        }
        if node.is_error() {
            let span = lines.span(node.start_byte(), node.end_byte());
            errors.push(SyntaxError::new(span, unexpected(node, source)));
            continue;
        }
        if !node.has_error() {
            continue;
        }
        let mut cursor = node.walk();
        let children: Vec<_> = node.children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }
    errors
}

fn unexpected(node: Node<'_>, source: &str) -> String {
    let text = source.get(node.start_byte()..node.end_byte()).unwrap_or_default();
    let first_line = text.lines().next().unwrap_or_default().trim();
    if first_line.is_empty() {
        return "Unexpected input".to_string();
    }
    let excerpt: String = first_line.chars().take(EXCERPT_LEN).collect();
    if excerpt.len() < first_line.len() {
        format!("Unexpected input: '{}...'", excerpt)
    } else {
        format!("Unexpected input: '{}'", excerpt)
    }
}
