use buildscope_api::Diagnostic;
use url::Url;

/// Diagnostics to publish for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiagnostics {
    pub uri: Url,
    pub diagnostics: Vec<Diagnostic>,
}

/// Outcome of compiling one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileReport {
    pub uri: Url,
    /// A fresh snapshot was installed for `uri`.
    pub analyzed: bool,
    /// Grouped by originating file. A clean pass carries one empty entry for
    /// `uri` so that stale diagnostics get cleared.
    pub diagnostics: Vec<FileDiagnostics>,
}

impl CompileReport {
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().map(|file| file.diagnostics.len()).sum()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }
}
