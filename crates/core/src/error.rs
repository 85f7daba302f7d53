use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildscopeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Parsing error: {0}")]
    Parsing(String),
    #[error("Coordinate search error: {0}")]
    Search(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<buildscope_api::ApiError> for BuildscopeError {
    fn from(err: buildscope_api::ApiError) -> Self {
        BuildscopeError::Internal(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BuildscopeError>;
