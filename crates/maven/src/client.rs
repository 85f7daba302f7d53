use crate::error::SearchError;
use crate::solr;
use async_trait::async_trait;
use buildscope_core::AnalyzerConfig;
use buildscope_core::completion::{CoordinateSearch, ResultShape, SearchHit};
use url::Url;

/// Coordinate lookup against a Solr endpoint shaped like Maven Central's.
#[derive(Debug, Clone)]
pub struct MavenCentralSearch {
    client: reqwest::Client,
    endpoint: String,
    rows: u32,
}

impl MavenCentralSearch {
    pub fn new(config: &AnalyzerConfig) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .timeout(config.search_timeout())
            .user_agent(concat!("buildscope/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            endpoint: config.search_endpoint.clone(),
            rows: config.search_rows,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Full request URL. Version lookups go to the `gav` core.
    pub fn request_url(&self, query: &str, shape: ResultShape) -> Result<Url, SearchError> {
        let rows = self.rows.to_string();
        let mut params = vec![("q", query), ("rows", rows.as_str()), ("wt", "json")];
        if shape == ResultShape::Version {
            params.push(("core", "gav"));
        }
        Ok(Url::parse_with_params(&self.endpoint, &params)?)
    }

    pub async fn fetch(&self, query: &str, shape: ResultShape) -> Result<Vec<SearchHit>, SearchError> {
        let url = self.request_url(query, shape)?;
        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        solr::hits(&body, shape)
    }
}

#[async_trait]
impl CoordinateSearch for MavenCentralSearch {
    async fn search(&self, query: &str, shape: ResultShape) -> buildscope_core::Result<Vec<SearchHit>> {
        let hits = self.fetch(query, shape).await?;
        tracing::debug!("Search '{}' returned {} hits", query, hits.len());
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildscope_core::completion::CoordinatePrefix;

    fn search() -> MavenCentralSearch {
        MavenCentralSearch::new(&AnalyzerConfig::default()).unwrap()
    }

    fn params(url: &Url) -> Vec<(String, String)> {
        url.query_pairs().map(|(k, v)| (k.into_owned(), v.into_owned())).collect()
    }

    #[test]
    fn group_prefix_uses_plain_query() {
        let url = search().request_url("org.slf", ResultShape::Id).unwrap();
        assert_eq!(url.host_str(), Some("search.maven.org"));
        assert_eq!(url.path(), "/solrsearch/select");
        assert_eq!(
            params(&url),
            [
                ("q".to_string(), "org.slf".to_string()),
                ("rows".to_string(), "50".to_string()),
                ("wt".to_string(), "json".to_string()),
            ]
        );
    }

    #[test]
    fn version_prefix_targets_gav_core() {
        let prefix = CoordinatePrefix::parse("org.slf4j:slf4j-api:", 3).unwrap();
        let url = search().request_url(&prefix.query(), prefix.shape()).unwrap();
        let params = params(&url);
        assert_eq!(params[0].1, "g:\"org.slf4j\" AND a:\"slf4j-api\"");
        assert!(params.contains(&("core".to_string(), "gav".to_string())));
        assert!(url.as_str().contains("g%3A%22org.slf4j%22"));
    }

    #[test]
    fn rows_follow_configuration() {
        let config = AnalyzerConfig {
            search_rows: 10,
            ..AnalyzerConfig::default()
        };
        let search = MavenCentralSearch::new(&config).unwrap();
        let url = search.request_url("g:\"junit\"", ResultShape::Id).unwrap();
        assert!(params(&url).contains(&("rows".to_string(), "10".to_string())));
    }

    #[test]
    fn bad_endpoint_is_reported() {
        let config = AnalyzerConfig {
            search_endpoint: "not a url".to_string(),
            ..AnalyzerConfig::default()
        };
        let search = MavenCentralSearch::new(&config).unwrap();
        let err = search.request_url("junit", ResultShape::Id).unwrap_err();
        assert!(matches!(err, SearchError::Endpoint(_)));
    }

    #[tokio::test]
    async fn unreachable_endpoint_surfaces_as_search_error() {
        let config = AnalyzerConfig {
            search_endpoint: "http://127.0.0.1:9/solrsearch/select".to_string(),
            search_timeout_ms: 500,
            ..AnalyzerConfig::default()
        };
        let search = MavenCentralSearch::new(&config).unwrap();
        let err = search.search("junit", ResultShape::Id).await.unwrap_err();
        assert!(matches!(err, buildscope_core::BuildscopeError::Search(_)));
    }
}
