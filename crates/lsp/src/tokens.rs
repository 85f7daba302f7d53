use crate::convert;
use buildscope_core::AnalysisEngine;
use tower_lsp::lsp_types::{SemanticTokensResult, Url};

pub fn semantic_tokens_full(engine: &AnalysisEngine, uri: &Url) -> Option<SemanticTokensResult> {
    let data = engine.semantic_tokens(uri)?;
    Some(SemanticTokensResult::Tokens(convert::semantic_tokens(&data)))
}
