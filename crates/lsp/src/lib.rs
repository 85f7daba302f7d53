pub mod capabilities;
pub mod completion;
pub mod convert;
pub mod diagnostics;
pub mod document;
pub mod symbols;
pub mod tokens;

use crate::document::Document;
use buildscope_api::Language;
use buildscope_core::{AnalysisEngine, AnalyzerConfig};
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

pub type EngineBuilder = dyn Fn(AnalyzerConfig) -> Arc<AnalysisEngine> + Send + Sync;

pub struct LspServer {
    client: Client,
    pub engine: Arc<RwLock<Option<Arc<AnalysisEngine>>>>,
    pub engine_builder: Arc<EngineBuilder>,
    pub documents: DashMap<Url, Arc<Document>>,
}

impl LspServer {
    pub fn new(client: Client, engine_builder: Arc<EngineBuilder>) -> Self {
        Self {
            client,
            engine: Arc::new(RwLock::new(None)),
            engine_builder,
            documents: DashMap::new(),
        }
    }

    async fn engine(&self) -> Option<Arc<AnalysisEngine>> {
        self.engine.read().await.clone()
    }

    /// Recompile a document and publish the diagnostics of every file the
    /// pass reported on.
    async fn compile(&self, uri: &Url, document: &Document) {
        if !document.language.is_groovy() {
            tracing::debug!("Skipping {} ({})", uri, document.language);
            return;
        }
        let Some(engine) = self.engine().await else {
            tracing::warn!("Received {} before initialize", uri);
            return;
        };
        let publishes = match engine.compile(uri, &document.content, Some(document.version)) {
            Ok(report) => diagnostics::publishes(report),
            Err(e) => {
                self.client
                    .log_message(MessageType::ERROR, format!("Failed to compile {}: {}", uri, e))
                    .await;
                return;
            }
        };
        for publish in publishes {
            let version = (&publish.uri == uri).then_some(document.version);
            self.client
                .publish_diagnostics(publish.uri, publish.diagnostics, version)
                .await;
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for LspServer {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        let config = AnalyzerConfig::from_init_options(params.initialization_options.as_ref());
        tracing::info!("Initializing with {:?}", config);
        {
            let engine = (self.engine_builder)(config);
            let mut guard = self.engine.write().await;
            *guard = Some(engine);
        }

        Ok(InitializeResult {
            server_info: Some(ServerInfo {
                name: "Buildscope".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
            capabilities: capabilities::server_capabilities(),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "Buildscope language server ready")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        self.documents.clear();
        if let Some(engine) = self.engine().await {
            engine.store().clear();
        }
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;
        self.client
            .log_message(MessageType::LOG, format!("LSP Event: did_open uri={}", uri))
            .await;
        let document = Arc::new(Document::new(
            params.text_document.text,
            Language::from_path(uri.path()),
            params.text_document.version,
        ));
        self.documents.insert(uri.clone(), document.clone());
        self.compile(&uri, &document).await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;

        let document = match self.documents.get_mut(&uri) {
            Some(mut entry) => {
                let updated = Arc::new(entry.apply_changes(&params.content_changes, version));
                *entry.value_mut() = updated.clone();
                updated
            }
            None => {
                // Without a prior open only a full-text change is usable.
                let Some(full) = params.content_changes.iter().rev().find(|c| c.range.is_none()) else {
                    tracing::warn!("Ignoring ranged change for unopened {}", uri);
                    return;
                };
                let language = Language::from_path(uri.path());
                let document = Arc::new(Document::new(full.text.clone(), language, version));
                self.documents.insert(uri.clone(), document.clone());
                document
            }
        };
        self.compile(&uri, &document).await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        self.client
            .log_message(MessageType::LOG, format!("LSP Event: did_close uri={}", uri))
            .await;
        self.documents.remove(&uri);
        if let Some(engine) = self.engine().await {
            engine.close(&uri);
        }
        self.client.publish_diagnostics(uri, Vec::new(), None).await;
    }

    async fn document_symbol(
        &self,
        params: DocumentSymbolParams,
    ) -> Result<Option<DocumentSymbolResponse>> {
        let uri = params.text_document.uri;
        self.client
            .log_message(
                MessageType::LOG,
                format!("LSP Request: textDocument/documentSymbol uri={}", uri),
            )
            .await;
        let Some(engine) = self.engine().await else {
            return Ok(None);
        };
        let result = symbols::document_symbol(&engine, &uri);
        if let Some(DocumentSymbolResponse::Nested(symbols)) = &result {
            self.client
                .log_message(
                    MessageType::LOG,
                    format!("LSP Response: found {} symbols", symbols.len()),
                )
                .await;
        }
        Ok(result)
    }

    async fn semantic_tokens_full(
        &self,
        params: SemanticTokensParams,
    ) -> Result<Option<SemanticTokensResult>> {
        let uri = params.text_document.uri;
        self.client
            .log_message(
                MessageType::LOG,
                format!("LSP Request: textDocument/semanticTokens/full uri={}", uri),
            )
            .await;
        let Some(engine) = self.engine().await else {
            return Ok(None);
        };
        let result = tokens::semantic_tokens_full(&engine, &uri);
        if let Some(SemanticTokensResult::Tokens(tokens)) = &result {
            self.client
                .log_message(
                    MessageType::LOG,
                    format!("LSP Response: {} tokens", tokens.data.len()),
                )
                .await;
        }
        Ok(result)
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        let uri = params.text_document_position.text_document.uri;
        let pos = params.text_document_position.position;
        self.client
            .log_message(
                MessageType::LOG,
                format!(
                    "LSP Request: textDocument/completion uri={} pos={}:{}",
                    uri, pos.line, pos.character
                ),
            )
            .await;
        let Some(engine) = self.engine().await else {
            return Ok(None);
        };
        let result = completion::completion(&engine, &uri, pos).await;
        match &result {
            Some(response) => {
                let count = match response {
                    CompletionResponse::Array(items) => items.len(),
                    CompletionResponse::List(list) => list.items.len(),
                };
                self.client
                    .log_message(
                        MessageType::LOG,
                        format!("LSP Response: {} completion items", count),
                    )
                    .await;
            }
            None => {
                self.client
                    .log_message(MessageType::LOG, "LSP Response: no completion context")
                    .await
            }
        }
        Ok(result)
    }
}

pub async fn run_server<F>(engine_builder: F) -> std::result::Result<(), Box<dyn std::error::Error>>
where
    F: Fn(AnalyzerConfig) -> Arc<AnalysisEngine> + Send + Sync + 'static,
{
    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let builder: Arc<EngineBuilder> = Arc::new(engine_builder);

    let (service, socket) =
        tower_lsp::LspService::new(move |client| LspServer::new(client, builder.clone()));
    tower_lsp::Server::new(stdin, stdout, socket)
        .serve(service)
        .await;

    Ok(())
}
