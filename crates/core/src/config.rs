use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const MAVEN_CENTRAL_SEARCH: &str = "https://search.maven.org/solrsearch/select";

/// Analyzer settings. Every field has a default, so a partial
/// `initializationOptions` object is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyzerConfig {
    /// Characters a group prefix needs before it is sent to the search.
    pub min_group_query_len: usize,
    pub search_rows: u32,
    pub search_endpoint: String,
    /// When false, coordinate completion uses no remote lookup.
    pub remote_search: bool,
    pub search_timeout_ms: u64,
    /// Record the per-document node index during analysis.
    pub index_nodes: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            min_group_query_len: 3,
            search_rows: 50,
            search_endpoint: MAVEN_CENTRAL_SEARCH.to_string(),
            remote_search: true,
            search_timeout_ms: 5000,
            index_nodes: true,
        }
    }
}

impl AnalyzerConfig {
    pub fn offline() -> Self {
        Self {
            remote_search: false,
            ..Self::default()
        }
    }

    pub fn search_timeout(&self) -> Duration {
        Duration::from_millis(self.search_timeout_ms)
    }

    /// Read settings from an LSP `initializationOptions` value. Missing or
    /// malformed options fall back to the defaults.
    pub fn from_init_options(value: Option<&serde_json::Value>) -> Self {
        match value {
            Some(value) if !value.is_null() => match serde_json::from_value(value.clone()) {
                Ok(config) => config,
                Err(err) => {
                    tracing::warn!("Ignoring malformed initialization options: {}", err);
                    Self::default()
                }
            },
            _ => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn partial_options_keep_defaults() {
        let config = AnalyzerConfig::from_init_options(Some(&json!({ "minGroupQueryLen": 5, "remoteSearch": false })));
        assert_eq!(config.min_group_query_len, 5);
        assert!(!config.remote_search);
        assert_eq!(config.search_rows, 50);
        assert_eq!(config.search_endpoint, MAVEN_CENTRAL_SEARCH);
    }

    #[test]
    fn malformed_options_fall_back() {
        let config = AnalyzerConfig::from_init_options(Some(&json!({ "searchRows": "many" })));
        assert_eq!(config, AnalyzerConfig::default());
        assert_eq!(AnalyzerConfig::from_init_options(None), AnalyzerConfig::default());
    }
}
