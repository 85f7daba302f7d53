use super::catalog::catalog;
use super::context::CompletionContext;
use super::coordinate::CoordinatePrefix;
use super::search::{CoordinateSearch, ResultShape, SearchHit};
use crate::config::AnalyzerConfig;
use buildscope_api::{CompletionEntry, CompletionKind, CompletionResponse, Position, Range, TextEdit};

/// Completion items for a resolved context. `None` when the context offers
/// nothing at all.
pub async fn complete(
    context: &CompletionContext,
    search: &dyn CoordinateSearch,
    config: &AnalyzerConfig,
) -> Option<CompletionResponse> {
    match context {
        CompletionContext::Unknown => None,
        CompletionContext::DependencyCoordinate { text, range, position } => {
            let items = complete_coordinate(text, *range, *position, search, config).await;
            Some(CompletionResponse::List(items))
        }
        other => other
            .scope()
            .map(|scope| CompletionResponse::Array(catalog(scope).to_vec())),
    }
}

async fn complete_coordinate(
    text: &str,
    range: Range,
    position: Position,
    search: &dyn CoordinateSearch,
    config: &AnalyzerConfig,
) -> Vec<CompletionEntry> {
    let Some(prefix) = CoordinatePrefix::parse(text, config.min_group_query_len) else {
        return Vec::new();
    };
    let query = prefix.query();
    let shape = prefix.shape();
    let hits = match search.search(&query, shape).await {
        Ok(hits) => hits,
        Err(e) => {
            tracing::warn!("Coordinate search for '{}' failed: {}", query, e);
            return Vec::new();
        }
    };

    let edit_range = Range::new(range.start_line, range.start_col, position.line, position.character);
    coordinate_entries(hits, shape, edit_range)
}

/// Turn hits into entries that replace the literal from its start to the
/// cursor. Sort text keeps the collaborator's order.
pub fn coordinate_entries(mut hits: Vec<SearchHit>, shape: ResultShape, edit_range: Range) -> Vec<CompletionEntry> {
    hits.sort_by_key(|hit| hit.rank);
    let width = hits.len().max(1).to_string().len();
    hits.into_iter()
        .enumerate()
        .map(|(index, hit)| {
            let (kind, detail, filter_text, new_text) = match shape {
                ResultShape::Id => (CompletionKind::Module, "mavenCentral", None, format!("{}:", hit.label)),
                ResultShape::Version => {
                    let id = hit.filter_text.clone().unwrap_or_else(|| hit.label.clone());
                    (CompletionKind::Text, "version", Some(id.clone()), id)
                }
            };
            CompletionEntry {
                label: hit.label,
                kind,
                detail: Some(detail.to_string()),
                insert_text: None,
                snippet: false,
                filter_text,
                sort_text: Some(format!("{:0width$}", index, width = width)),
                text_edit: Some(TextEdit {
                    range: edit_range,
                    new_text,
                }),
            }
        })
        .collect()
}
