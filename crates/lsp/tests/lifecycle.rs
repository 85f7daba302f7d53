mod common;

use buildscope_core::ast::Span;
use buildscope_core::error::Result;
use buildscope_core::parser::{ParseOutcome, ScriptParser, SyntaxError};
use buildscope_core::{AnalysisEngine, AnalyzerConfig};
use buildscope_lsp::{EngineBuilder, LspServer};
use common::{BUILD, SketchParser, VersionSearch, uri};
use futures::StreamExt;
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tower::{Service, ServiceExt};
use tower_lsp::LspService;
use tower_lsp::jsonrpc::Request;
use tower_lsp::lsp_types::{PublishDiagnosticsParams, Url};

/// Script whose errors are reported partly against `shared.gradle`.
const INCLUDING: &str = "apply from: 'shared.gradle'\n";

fn shared() -> Url {
    Url::parse("file:///workspace/shared.gradle").unwrap()
}

struct IncludingParser;

impl ScriptParser for IncludingParser {
    fn parse(&self, source: &str, uri: &Url) -> Result<ParseOutcome> {
        if source == INCLUDING {
            let span = Span::new(1, 1, 1, 2, 1);
            return Ok(ParseOutcome::failed(vec![
                SyntaxError::new(span, "unexpected input"),
                SyntaxError::new(span, "unresolved include").in_file(shared()),
            ]));
        }
        SketchParser.parse(source, uri)
    }
}

/// A server behind the protocol layer, with published diagnostics drained
/// off the client socket in arrival order.
struct Session {
    service: LspService<LspServer>,
    published: mpsc::UnboundedReceiver<PublishDiagnosticsParams>,
}

impl Session {
    async fn start() -> Self {
        let builder: Arc<EngineBuilder> = Arc::new(|config: AnalyzerConfig| {
            Arc::new(AnalysisEngine::new(Arc::new(IncludingParser), Arc::new(VersionSearch), config))
        });
        let (mut service, mut socket) = LspService::new(move |client| LspServer::new(client, builder.clone()));

        let (tx, published) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            while let Some(request) = socket.next().await {
                if request.method() != "textDocument/publishDiagnostics" {
                    continue;
                }
                let Some(params) = request.params() else {
                    continue;
                };
                let params = serde_json::from_value(params.clone()).unwrap();
                if tx.send(params).is_err() {
                    break;
                }
            }
        });

        let initialize = Request::build("initialize")
            .params(json!({ "capabilities": {} }))
            .id(1)
            .finish();
        let response = service.ready().await.unwrap().call(initialize).await.unwrap();
        assert!(response.is_some());
        Self { service, published }
    }

    fn server(&self) -> &LspServer {
        self.service.inner()
    }

    async fn engine(&self) -> Arc<AnalysisEngine> {
        self.server().engine.read().await.clone().expect("initialize builds the engine")
    }

    async fn notify(&mut self, method: &'static str, params: Value) {
        let request = Request::build(method).params(params).finish();
        let response = self.service.ready().await.unwrap().call(request).await.unwrap();
        assert!(response.is_none());
    }

    async fn next_publish(&mut self) -> PublishDiagnosticsParams {
        tokio::time::timeout(Duration::from_secs(5), self.published.recv())
            .await
            .expect("diagnostics were published")
            .expect("client socket stays open")
    }
}

fn open(uri: &Url, version: i32, text: &str) -> Value {
    json!({
        "textDocument": {
            "uri": uri.as_str(),
            "languageId": "groovy",
            "version": version,
            "text": text,
        }
    })
}

fn full_change(uri: &Url, version: i32, text: &str) -> Value {
    json!({
        "textDocument": { "uri": uri.as_str(), "version": version },
        "contentChanges": [{ "text": text }],
    })
}

#[tokio::test]
async fn open_change_close_round_trip() {
    let mut session = Session::start().await;
    let engine = session.engine().await;

    // Not a Groovy script: tracked, never compiled.
    let notes = Url::parse("file:///workspace/notes.txt").unwrap();
    session.notify("textDocument/didOpen", open(&notes, 1, "hello")).await;
    assert!(session.server().documents.contains_key(&notes));

    session.notify("textDocument/didOpen", open(&uri(), 1, BUILD)).await;
    let publish = session.next_publish().await;
    assert_eq!(publish.uri, uri());
    assert_eq!(publish.version, Some(1));
    assert!(publish.diagnostics.is_empty());
    assert_eq!(engine.store().get(&uri()).unwrap().version, Some(1));
    assert!(engine.store().get(&notes).is_none());

    session
        .notify("textDocument/didChange", full_change(&uri(), 2, INCLUDING))
        .await;
    let mut publishes = vec![session.next_publish().await, session.next_publish().await];
    publishes.sort_by(|a, b| a.uri.as_str().cmp(b.uri.as_str()));
    assert_eq!(publishes[0].uri, uri());
    assert_eq!(publishes[0].version, Some(2));
    assert_eq!(publishes[0].diagnostics[0].message, "unexpected input");
    assert_eq!(publishes[1].uri, shared());
    assert_eq!(publishes[1].version, None);
    assert_eq!(publishes[1].diagnostics[0].message, "unresolved include");
    // A failed pass keeps the last good snapshot.
    assert_eq!(engine.store().get(&uri()).unwrap().version, Some(1));
    assert_eq!(session.server().documents.get(&uri()).unwrap().content, INCLUDING);

    session
        .notify("textDocument/didClose", json!({ "textDocument": { "uri": uri().as_str() } }))
        .await;
    let publish = session.next_publish().await;
    assert_eq!(publish.uri, uri());
    assert_eq!(publish.version, None);
    assert!(publish.diagnostics.is_empty());
    assert!(engine.store().get(&uri()).is_none());
    assert!(!session.server().documents.contains_key(&uri()));
}

#[tokio::test]
async fn change_before_open_needs_the_full_text() {
    let mut session = Session::start().await;

    let ranged = json!({
        "textDocument": { "uri": uri().as_str(), "version": 3 },
        "contentChanges": [{
            "range": {
                "start": { "line": 0, "character": 0 },
                "end": { "line": 0, "character": 0 }
            },
            "text": "x"
        }],
    });
    session.notify("textDocument/didChange", ranged).await;
    assert!(!session.server().documents.contains_key(&uri()));

    session
        .notify("textDocument/didChange", full_change(&uri(), 4, BUILD))
        .await;
    // The first publish comes from the full-text change.
    let publish = session.next_publish().await;
    assert_eq!(publish.uri, uri());
    assert_eq!(publish.version, Some(4));
    assert!(publish.diagnostics.is_empty());

    let engine = session.engine().await;
    assert_eq!(engine.store().get(&uri()).unwrap().version, Some(4));
    assert_eq!(session.server().documents.get(&uri()).unwrap().content, BUILD);
}
