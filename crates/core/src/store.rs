use crate::analysis::{DocumentAnalysis, NodeIndex, SymbolTable};
use crate::ast::Ast;
use buildscope_api::DocumentSymbol;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;
use url::Url;

/// Analysis snapshot of one document. Immutable once installed.
#[derive(Debug)]
pub struct DocumentState {
    pub ast: Arc<Ast>,
    pub nodes: Option<NodeIndex>,
    pub symbols: SymbolTable,
    pub tokens: Arc<[u32]>,
    /// Editor version of the text this snapshot was built from.
    pub version: Option<i32>,
}

impl DocumentState {
    pub fn new(ast: Ast, analysis: DocumentAnalysis, version: Option<i32>) -> Self {
        Self {
            ast: Arc::new(ast),
            nodes: analysis.nodes,
            symbols: analysis.symbols,
            tokens: analysis.tokens.into(),
            version,
        }
    }

    pub fn dependencies(&self) -> &[DocumentSymbol] {
        &self.symbols.dependencies
    }
}

/// Per-document analysis state keyed by URI.
///
/// Snapshots are built outside the map and swapped in with one insert, so a
/// reader sees either the previous or the new snapshot of a document.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: DashMap<Url, Arc<DocumentState>>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, uri: &Url) -> Option<Arc<DocumentState>> {
        self.documents.get(uri).map(|entry| Arc::clone(entry.value()))
    }

    /// Install a snapshot. Returns `false`, leaving the current one in place,
    /// when the installed snapshot was built from a newer document version.
    pub fn install(&self, uri: Url, state: DocumentState) -> bool {
        match self.documents.entry(uri) {
            Entry::Occupied(mut entry) => {
                if let (Some(current), Some(incoming)) = (entry.get().version, state.version)
                    && incoming < current
                {
                    tracing::debug!(
                        "Dropping stale analysis of {} (version {} < {})",
                        entry.key(),
                        incoming,
                        current
                    );
                    return false;
                }
                entry.insert(Arc::new(state));
            }
            Entry::Vacant(entry) => {
                entry.insert(Arc::new(state));
            }
        }
        true
    }

    pub fn remove(&self, uri: &Url) -> Option<Arc<DocumentState>> {
        self.documents.remove(uri).map(|(_, state)| state)
    }

    pub fn clear(&self) {
        self.documents.clear();
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn uris(&self) -> Vec<Url> {
        self.documents.iter().map(|entry| entry.key().clone()).collect()
    }
}
