pub mod analysis;
pub mod ast;
pub mod completion;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod parser;
pub mod store;

#[cfg(any(test, feature = "testing"))]
#[doc(hidden)]
pub mod testing;

pub use config::AnalyzerConfig;
pub use engine::{AnalysisEngine, CompileReport, FileDiagnostics};
pub use error::{BuildscopeError, Result};
