use buildscope_core::{AnalysisEngine, AnalyzerConfig, CompileReport};
use std::path::Path;
use std::sync::Arc;
use url::Url;

/// A build script compiled once, outside any editor session.
pub struct AnalyzedFile {
    pub engine: Arc<AnalysisEngine>,
    pub uri: Url,
    pub report: CompileReport,
}

/// Read and compile one file. Remote search is never needed here.
pub fn analyze_file(path: &Path) -> Result<AnalyzedFile, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)?;
    let absolute = std::fs::canonicalize(path)?;
    let uri = Url::from_file_path(&absolute)
        .map_err(|_| format!("Cannot address {} as a file URI", absolute.display()))?;

    let engine = buildscope_runtime::build_default_engine(AnalyzerConfig::offline());
    let report = engine.compile(&uri, &text, None)?;
    tracing::debug!(
        "Compiled {}: analyzed={}, {} errors",
        uri,
        report.analyzed,
        report.error_count()
    );
    Ok(AnalyzedFile { engine, uri, report })
}
