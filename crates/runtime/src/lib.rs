use buildscope_core::completion::{CoordinateSearch, OfflineSearch};
use buildscope_core::{AnalysisEngine, AnalyzerConfig};
use buildscope_gradle::GroovyParser;
use buildscope_maven::MavenCentralSearch;
use std::sync::Arc;

/// Assembles the default engine: the Groovy front-end plus Maven Central
/// coordinate search, or no search at all when remote lookups are off.
pub fn build_default_engine(config: AnalyzerConfig) -> Arc<AnalysisEngine> {
    let search = search_for(&config);
    Arc::new(AnalysisEngine::new(Arc::new(GroovyParser::new()), search, config))
}

fn search_for(config: &AnalyzerConfig) -> Arc<dyn CoordinateSearch> {
    if !config.remote_search {
        tracing::info!("Remote coordinate search disabled");
        return Arc::new(OfflineSearch);
    }
    match MavenCentralSearch::new(config) {
        Ok(search) => Arc::new(search),
        Err(e) => {
            tracing::error!("Failed to set up coordinate search, continuing offline: {}", e);
            Arc::new(OfflineSearch)
        }
    }
}

/// Initializes the logging system for a specific component.
/// This delegates to the core logging module.
pub fn init_logging(component: &str, to_stderr: bool) -> Option<impl Drop> {
    Some(buildscope_core::logging::init_logging(component, to_stderr))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offline_engine_keeps_configuration() {
        let engine = build_default_engine(AnalyzerConfig::offline());
        assert!(!engine.config().remote_search);
        assert!(engine.store().is_empty());
    }

    #[test]
    fn default_engine_analyzes_groovy() {
        let engine = build_default_engine(AnalyzerConfig::default());
        let uri = "file:///workspace/settings.gradle".parse().unwrap();
        let report = engine.compile(&uri, "rootProject.name = 'demo'\n", Some(1)).unwrap();
        assert!(!report.has_errors());
        assert!(report.analyzed);
        assert!(engine.document(&uri).is_some());
    }
}
