//! Conversions from the analysis models to protocol types.

use buildscope_api as api;
use tower_lsp::lsp_types::*;

pub fn range(range: api::Range) -> Range {
    Range::new(
        Position::new(range.start_line, range.start_col),
        Position::new(range.end_line, range.end_col),
    )
}

pub fn position(position: Position) -> api::Position {
    api::Position::new(position.line, position.character)
}

fn symbol_kind(kind: api::SymbolKind) -> SymbolKind {
    match kind {
        api::SymbolKind::Function => SymbolKind::FUNCTION,
        api::SymbolKind::Property => SymbolKind::PROPERTY,
        api::SymbolKind::Constant => SymbolKind::CONSTANT,
    }
}

pub fn document_symbols(symbols: Vec<api::DocumentSymbol>) -> Vec<DocumentSymbol> {
    symbols.into_iter().map(document_symbol).collect()
}

fn document_symbol(symbol: api::DocumentSymbol) -> DocumentSymbol {
    #[allow(deprecated)]
    DocumentSymbol {
        name: symbol.name,
        detail: symbol.detail,
        kind: symbol_kind(symbol.kind),
        tags: None,
        deprecated: None,
        range: range(symbol.range),
        selection_range: range(symbol.selection_range),
        children: if symbol.children.is_empty() {
            None
        } else {
            Some(document_symbols(symbol.children))
        },
    }
}

pub fn diagnostic(diagnostic: api::Diagnostic) -> Diagnostic {
    let severity = match diagnostic.severity {
        api::Severity::Error => DiagnosticSeverity::ERROR,
        api::Severity::Warning => DiagnosticSeverity::WARNING,
    };
    Diagnostic {
        range: range(diagnostic.range),
        severity: Some(severity),
        source: Some("buildscope".to_string()),
        message: diagnostic.message,
        ..Default::default()
    }
}

/// Chunk a flat encoded stream into protocol tokens.
pub fn semantic_tokens(data: &[u32]) -> SemanticTokens {
    let data = data
        .chunks_exact(5)
        .map(|chunk| SemanticToken {
            delta_line: chunk[0],
            delta_start: chunk[1],
            length: chunk[2],
            token_type: chunk[3],
            token_modifiers_bitset: chunk[4],
        })
        .collect();
    SemanticTokens { result_id: None, data }
}

fn completion_kind(kind: api::CompletionKind) -> CompletionItemKind {
    match kind {
        api::CompletionKind::Method => CompletionItemKind::METHOD,
        api::CompletionKind::Property => CompletionItemKind::PROPERTY,
        api::CompletionKind::Snippet => CompletionItemKind::SNIPPET,
        api::CompletionKind::Module => CompletionItemKind::MODULE,
        api::CompletionKind::Text => CompletionItemKind::TEXT,
    }
}

fn completion_item(entry: api::CompletionEntry) -> CompletionItem {
    CompletionItem {
        label: entry.label,
        kind: Some(completion_kind(entry.kind)),
        detail: entry.detail,
        insert_text: entry.insert_text,
        insert_text_format: Some(if entry.snippet {
            InsertTextFormat::SNIPPET
        } else {
            InsertTextFormat::PLAIN_TEXT
        }),
        filter_text: entry.filter_text,
        sort_text: entry.sort_text,
        text_edit: entry.text_edit.map(|edit| {
            CompletionTextEdit::Edit(TextEdit::new(range(edit.range), edit.new_text))
        }),
        ..Default::default()
    }
}

/// Catalogs go out as a bare array; coordinate lookups as a complete list.
pub fn completion_response(response: api::CompletionResponse) -> CompletionResponse {
    match response {
        api::CompletionResponse::Array(entries) => {
            CompletionResponse::Array(entries.into_iter().map(completion_item).collect())
        }
        api::CompletionResponse::List(entries) => CompletionResponse::List(CompletionList {
            is_incomplete: false,
            items: entries.into_iter().map(completion_item).collect(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_symbols_keep_children() {
        let child = api::DocumentSymbol::new(
            "g:a:1.0",
            api::SymbolKind::Constant,
            api::Range::new(1, 20, 1, 27),
            api::Range::new(1, 20, 1, 27),
        )
        .with_detail("implementation");
        let mut parent = api::DocumentSymbol::new(
            "dependencies",
            api::SymbolKind::Function,
            api::Range::new(0, 0, 2, 1),
            api::Range::new(0, 0, 0, 12),
        );
        parent.children.push(child);

        let converted = document_symbols(vec![parent]);
        assert_eq!(converted[0].kind, SymbolKind::FUNCTION);
        assert_eq!(converted[0].selection_range.end, Position::new(0, 12));
        let children = converted[0].children.as_ref().unwrap();
        assert_eq!(children[0].kind, SymbolKind::CONSTANT);
        assert_eq!(children[0].detail.as_deref(), Some("implementation"));
        assert!(children[0].children.is_none());
    }

    #[test]
    fn token_stream_is_chunked_by_five() {
        let tokens = semantic_tokens(&[0, 0, 12, 0, 2, 1, 4, 14, 0, 0]);
        assert_eq!(tokens.data.len(), 2);
        assert_eq!(tokens.data[0].token_modifiers_bitset, 2);
        assert_eq!(tokens.data[1].delta_line, 1);
        assert_eq!(tokens.data[1].length, 14);
    }

    #[test]
    fn coordinate_results_are_a_complete_list() {
        let entry = api::CompletionEntry {
            label: "2.0.9".to_string(),
            kind: api::CompletionKind::Text,
            detail: Some("version".to_string()),
            insert_text: None,
            snippet: false,
            filter_text: Some("org.slf4j:slf4j-api:2.0.9".to_string()),
            sort_text: Some("0".to_string()),
            text_edit: Some(api::TextEdit {
                range: api::Range::new(3, 20, 3, 40),
                new_text: "org.slf4j:slf4j-api:2.0.9".to_string(),
            }),
        };
        let CompletionResponse::List(list) = completion_response(api::CompletionResponse::List(vec![entry])) else {
            panic!("expected a list");
        };
        assert!(!list.is_incomplete);
        let item = &list.items[0];
        assert_eq!(item.kind, Some(CompletionItemKind::TEXT));
        match item.text_edit.as_ref().unwrap() {
            CompletionTextEdit::Edit(edit) => {
                assert_eq!(edit.range.start, Position::new(3, 20));
                assert_eq!(edit.new_text, "org.slf4j:slf4j-api:2.0.9");
            }
            other => panic!("unexpected edit {:?}", other),
        }
    }

    #[test]
    fn snippets_are_flagged() {
        let entry = api::CompletionEntry::snippet("maven", "maven {\n\turl \"$0\"\n}", "Adds a Maven repository");
        let CompletionResponse::Array(items) = completion_response(api::CompletionResponse::Array(vec![entry])) else {
            panic!("expected an array");
        };
        assert_eq!(items[0].insert_text_format, Some(InsertTextFormat::SNIPPET));
        assert_eq!(items[0].kind, Some(CompletionItemKind::SNIPPET));
    }
}
