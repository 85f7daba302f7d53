use buildscope_core::error::BuildscopeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Invalid search endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    #[error("Search request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed search response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<SearchError> for BuildscopeError {
    fn from(e: SearchError) -> Self {
        BuildscopeError::Search(e.to_string())
    }
}
