//! Solr `select` response decoding.

use crate::error::SearchError;
use buildscope_core::completion::{ResultShape, SearchHit};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct SelectResponse {
    response: ResponseBody,
}

#[derive(Debug, Deserialize)]
struct ResponseBody {
    #[serde(default)]
    docs: Vec<Value>,
}

/// Hits in response order. `Id` documents contribute their `id`; `Version`
/// documents contribute `v` as the label and `id` as the filter text.
/// Documents lacking those fields are skipped, but keep their rank slot.
pub fn hits(body: &str, shape: ResultShape) -> Result<Vec<SearchHit>, SearchError> {
    let parsed: SelectResponse = serde_json::from_str(body)?;
    let hits = parsed
        .response
        .docs
        .iter()
        .enumerate()
        .filter_map(|(rank, doc)| {
            let doc = doc.as_object()?;
            let id = doc.get("id")?.as_str()?;
            match shape {
                ResultShape::Id => Some(SearchHit {
                    label: id.to_string(),
                    filter_text: None,
                    rank,
                }),
                ResultShape::Version => Some(SearchHit {
                    label: doc.get("v")?.as_str()?.to_string(),
                    filter_text: Some(id.to_string()),
                    rank,
                }),
            }
        })
        .collect();
    Ok(hits)
}
