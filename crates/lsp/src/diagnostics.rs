use crate::convert;
use buildscope_core::CompileReport;
use tower_lsp::lsp_types::{Diagnostic, Url};

/// One `textDocument/publishDiagnostics` notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Publish {
    pub uri: Url,
    pub diagnostics: Vec<Diagnostic>,
}

pub fn publishes(report: CompileReport) -> Vec<Publish> {
    report
        .diagnostics
        .into_iter()
        .map(|file| Publish {
            uri: file.uri,
            diagnostics: file.diagnostics.into_iter().map(convert::diagnostic).collect(),
        })
        .collect()
}
