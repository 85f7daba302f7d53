use crate::error::Result;
use async_trait::async_trait;

/// What a coordinate lookup returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultShape {
    /// Group or `group:artifact` identifiers.
    Id,
    /// One hit per published version of an artifact.
    Version,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    /// Identifier for [`ResultShape::Id`], version for [`ResultShape::Version`].
    pub label: String,
    /// Full `group:artifact:version` id of a version hit.
    pub filter_text: Option<String>,
    /// Position in the collaborator's result order.
    pub rank: usize,
}

/// Remote package index used for dependency coordinate completion.
///
/// `query` uses Solr syntax (`g:"org.slf4j" AND a:"slf4j-api"`).
#[async_trait]
pub trait CoordinateSearch: Send + Sync {
    async fn search(&self, query: &str, shape: ResultShape) -> Result<Vec<SearchHit>>;
}

/// Never finds anything. Used when remote lookups are disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineSearch;

#[async_trait]
impl CoordinateSearch for OfflineSearch {
    async fn search(&self, query: &str, _shape: ResultShape) -> Result<Vec<SearchHit>> {
        tracing::debug!("Remote search disabled, skipping query {}", query);
        Ok(Vec::new())
    }
}
