//! Analysis engine: parse, analyze and answer queries per document.

mod report;

pub use report::{CompileReport, FileDiagnostics};

use crate::analysis::{AnalysisOptions, NodeIndex, analyze};
use crate::ast::NodeId;
use crate::completion::{CompletionContext, CoordinateSearch, complete, resolve_context};
use crate::config::AnalyzerConfig;
use crate::error::Result;
use crate::parser::{ScriptParser, SyntaxError};
use crate::store::{DocumentState, DocumentStore};
use buildscope_api::{CompletionResponse, Diagnostic, DocumentSymbol, Position};
use std::collections::BTreeMap;
use std::sync::Arc;
use url::Url;

pub struct AnalysisEngine {
    parser: Arc<dyn ScriptParser>,
    search: Arc<dyn CoordinateSearch>,
    store: DocumentStore,
    config: AnalyzerConfig,
}

impl AnalysisEngine {
    pub fn new(parser: Arc<dyn ScriptParser>, search: Arc<dyn CoordinateSearch>, config: AnalyzerConfig) -> Self {
        Self {
            parser,
            search,
            store: DocumentStore::new(),
            config,
        }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    /// Parse and analyze one document, replacing its snapshot.
    ///
    /// With syntax errors the previous snapshot stays installed and only the
    /// diagnostics are reported.
    pub fn compile(&self, uri: &Url, text: &str, version: Option<i32>) -> Result<CompileReport> {
        let outcome = self.parser.parse(text, uri)?;

        if outcome.has_errors() {
            tracing::debug!("{} has {} syntax errors, keeping previous analysis", uri, outcome.errors.len());
            return Ok(CompileReport {
                uri: uri.clone(),
                analyzed: false,
                diagnostics: group_by_file(uri, outcome.errors),
            });
        }

        let clean = vec![FileDiagnostics {
            uri: uri.clone(),
            diagnostics: Vec::new(),
        }];
        let Some(ast) = outcome.ast else {
            tracing::debug!("No syntax tree for {}, skipping analysis", uri);
            return Ok(CompileReport {
                uri: uri.clone(),
                analyzed: false,
                diagnostics: clean,
            });
        };

        let options = AnalysisOptions {
            index_nodes: self.config.index_nodes,
        };
        let analysis = analyze(&ast, uri, options);
        let installed = self
            .store
            .install(uri.clone(), DocumentState::new(ast, analysis, version));

        Ok(CompileReport {
            uri: uri.clone(),
            analyzed: installed,
            diagnostics: clean,
        })
    }

    /// Compile a set of documents from scratch. Every previous snapshot is
    /// dropped first; a document whose parse fails does not stop the others.
    pub fn compile_workspace<I>(&self, documents: I) -> Vec<CompileReport>
    where
        I: IntoIterator<Item = (Url, String)>,
    {
        self.store.clear();
        documents
            .into_iter()
            .filter_map(|(uri, text)| match self.compile(&uri, &text, None) {
                Ok(report) => Some(report),
                Err(e) => {
                    tracing::warn!("Failed to compile {}: {}", uri, e);
                    None
                }
            })
            .collect()
    }

    /// Forget a closed document.
    pub fn close(&self, uri: &Url) -> bool {
        self.store.remove(uri).is_some()
    }

    pub fn document(&self, uri: &Url) -> Option<Arc<DocumentState>> {
        self.store.get(uri)
    }

    pub fn document_symbols(&self, uri: &Url) -> Vec<DocumentSymbol> {
        self.store
            .get(uri)
            .map(|state| state.symbols.symbols.clone())
            .unwrap_or_default()
    }

    pub fn dependencies(&self, uri: &Url) -> Vec<DocumentSymbol> {
        self.store
            .get(uri)
            .map(|state| state.dependencies().to_vec())
            .unwrap_or_default()
    }

    pub fn semantic_tokens(&self, uri: &Url) -> Option<Arc<[u32]>> {
        self.store.get(uri).map(|state| Arc::clone(&state.tokens))
    }

    /// Node index of the installed snapshot, when indexing is enabled.
    pub fn node_index(&self, uri: &Url) -> Option<NodeIndex> {
        self.store.get(uri)?.nodes.clone()
    }

    /// Innermost source node at a zero-based position.
    pub fn node_at(&self, uri: &Url, position: Position) -> Option<NodeId> {
        let state = self.store.get(uri)?;
        state.nodes.as_ref()?.node_at(&state.ast, position)
    }

    pub fn resolve_context(&self, uri: &Url, position: Position) -> CompletionContext {
        match self.store.get(uri) {
            Some(state) => resolve_context(&state.symbols, position),
            None => CompletionContext::Unknown,
        }
    }

    pub async fn completion(&self, uri: &Url, position: Position) -> Option<CompletionResponse> {
        let context = self.resolve_context(uri, position);
        tracing::debug!("Completion at {}:{} resolved to {:?}", uri, position, context);
        complete(&context, self.search.as_ref(), &self.config).await
    }
}

fn group_by_file(primary: &Url, errors: Vec<SyntaxError>) -> Vec<FileDiagnostics> {
    let mut grouped: BTreeMap<Url, Vec<Diagnostic>> = BTreeMap::new();
    for error in errors {
        let file = error.source.unwrap_or_else(|| primary.clone());
        grouped
            .entry(file)
            .or_default()
            .push(Diagnostic::error(error.span.to_range(), error.message));
    }
    grouped
        .into_iter()
        .map(|(uri, diagnostics)| FileDiagnostics { uri, diagnostics })
        .collect()
}
