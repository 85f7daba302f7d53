mod common;

use buildscope_lsp::{completion, diagnostics, symbols, tokens};
use common::{BUILD, engine, uri};
use tower_lsp::lsp_types::*;

#[test]
fn outline_is_nested_after_compile() {
    let engine = engine();
    assert!(symbols::document_symbol(&engine, &uri()).is_none());

    engine.compile(&uri(), BUILD, Some(1)).unwrap();
    let Some(DocumentSymbolResponse::Nested(symbols)) = symbols::document_symbol(&engine, &uri()) else {
        panic!("expected a nested outline");
    };
    assert_eq!(symbols.len(), 2);
    assert_eq!(symbols[1].name, "dependencies");
    let children = symbols[1].children.as_ref().unwrap();
    assert_eq!(children[0].name, "org.slf4j:slf4j-api:1.7");
    assert_eq!(children[0].kind, SymbolKind::CONSTANT);
    assert_eq!(children[0].range, Range::new(Position::new(3, 20), Position::new(3, 43)));
}

#[test]
fn semantic_tokens_mirror_the_encoded_stream() {
    let engine = engine();
    engine.compile(&uri(), BUILD, Some(1)).unwrap();

    let Some(SemanticTokensResult::Tokens(tokens)) = tokens::semantic_tokens_full(&engine, &uri()) else {
        panic!("expected tokens");
    };
    let stream = engine.semantic_tokens(&uri()).unwrap();
    assert_eq!(tokens.data.len() * 5, stream.len());
    // `apply`, `plugin`, `dependencies`, `implementation`
    let starts: Vec<_> = tokens.data.iter().map(|t| (t.delta_line, t.delta_start)).collect();
    assert_eq!(starts, [(0, 0), (0, 6), (2, 0), (1, 4)]);
}

#[test]
fn syntax_errors_become_protocol_diagnostics() {
    let engine = engine();
    let report = engine.compile(&uri(), "apply {", Some(1)).unwrap();
    let publishes = diagnostics::publishes(report);

    assert_eq!(publishes.len(), 1);
    assert_eq!(publishes[0].uri, uri());
    let diagnostic = &publishes[0].diagnostics[0];
    assert_eq!(diagnostic.severity, Some(DiagnosticSeverity::ERROR));
    assert_eq!(diagnostic.range, Range::new(Position::new(0, 0), Position::new(0, 1)));
    assert_eq!(diagnostic.message, "unexpected input");
}

#[test]
fn clean_pass_clears_diagnostics() {
    let engine = engine();
    let publishes = diagnostics::publishes(engine.compile(&uri(), BUILD, Some(1)).unwrap());
    assert_eq!(publishes.len(), 1);
    assert!(publishes[0].diagnostics.is_empty());
}

#[tokio::test]
async fn completion_shapes_follow_the_context() {
    let engine = engine();
    engine.compile(&uri(), BUILD, Some(1)).unwrap();

    let versions = completion::completion(&engine, &uri(), Position::new(3, 40)).await;
    let Some(CompletionResponse::List(list)) = versions else {
        panic!("expected a completion list");
    };
    assert!(!list.is_incomplete);
    let labels: Vec<_> = list.items.iter().map(|i| i.label.as_str()).collect();
    assert_eq!(labels, ["2.0.9", "1.7.36"]);

    let block = completion::completion(&engine, &uri(), Position::new(3, 2)).await;
    assert!(matches!(block, Some(CompletionResponse::Array(items)) if !items.is_empty()));

    assert!(completion::completion(&engine, &uri(), Position::new(0, 1)).await.is_none());
}
