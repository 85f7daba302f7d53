use super::symbol::Range;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CompletionKind {
    Method,
    Property,
    Snippet,
    Module,
    Text,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub range: Range,
    pub new_text: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CompletionEntry {
    pub label: String,
    pub kind: CompletionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insert_text: Option<String>,
    /// `insert_text` uses snippet syntax (`$0` tab stops).
    #[serde(default)]
    pub snippet: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_edit: Option<TextEdit>,
}

impl CompletionEntry {
    pub fn plain(label: &str, insert_text: &str, detail: &str, kind: CompletionKind) -> Self {
        Self {
            label: label.to_string(),
            kind,
            detail: Some(detail.to_string()),
            insert_text: Some(insert_text.to_string()),
            snippet: false,
            filter_text: None,
            sort_text: None,
            text_edit: None,
        }
    }

    pub fn snippet(label: &str, insert_text: &str, detail: &str) -> Self {
        Self {
            snippet: true,
            ..Self::plain(label, insert_text, detail, CompletionKind::Snippet)
        }
    }
}

/// Completion response shape.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", content = "items", rename_all = "lowercase")]
pub enum CompletionResponse {
    /// Static catalog entries.
    Array(Vec<CompletionEntry>),
    /// Coordinate lookup results.
    List(Vec<CompletionEntry>),
}

impl CompletionResponse {
    pub fn items(&self) -> &[CompletionEntry] {
        match self {
            CompletionResponse::Array(items) | CompletionResponse::List(items) => items,
        }
    }

    pub fn into_items(self) -> Vec<CompletionEntry> {
        match self {
            CompletionResponse::Array(items) | CompletionResponse::List(items) => items,
        }
    }
}
