use crate::ast::{Ast, Span};
use crate::error::Result;
use url::Url;

/// A syntax error reported by a front-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// One-based source extent.
    pub span: Span,
    pub message: String,
    /// File the error originates from; `None` for the document being parsed.
    pub source: Option<Url>,
}

impl SyntaxError {
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            source: None,
        }
    }

    pub fn in_file(mut self, source: Url) -> Self {
        self.source = Some(source);
        self
    }
}

/// Result of one parse. A front-end may return a partial tree alongside
/// errors, or no tree at all.
#[derive(Debug, Default)]
pub struct ParseOutcome {
    pub ast: Option<Ast>,
    pub errors: Vec<SyntaxError>,
}

impl ParseOutcome {
    pub fn parsed(ast: Ast) -> Self {
        Self {
            ast: Some(ast),
            errors: Vec::new(),
        }
    }

    pub fn failed(errors: Vec<SyntaxError>) -> Self {
        Self { ast: None, errors }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Turns build-script text into an [`Ast`].
///
/// Malformed input is reported through [`ParseOutcome::errors`]; the `Err`
/// path is reserved for failures of the front-end itself.
pub trait ScriptParser: Send + Sync {
    fn parse(&self, source: &str, uri: &Url) -> Result<ParseOutcome>;
}
