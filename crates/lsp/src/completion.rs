use crate::convert;
use buildscope_core::AnalysisEngine;
use tower_lsp::lsp_types::{CompletionResponse, Position, Url};

pub async fn completion(engine: &AnalysisEngine, uri: &Url, position: Position) -> Option<CompletionResponse> {
    let response = engine.completion(uri, convert::position(position)).await?;
    Some(convert::completion_response(response))
}
