use crate::convert;
use buildscope_core::AnalysisEngine;
use tower_lsp::lsp_types::{DocumentSymbolResponse, Url};

/// Outline of an analyzed document; `None` before its first clean pass.
pub fn document_symbol(engine: &AnalysisEngine, uri: &Url) -> Option<DocumentSymbolResponse> {
    engine.document(uri)?;
    let symbols = convert::document_symbols(engine.document_symbols(uri));
    Some(DocumentSymbolResponse::Nested(symbols))
}
