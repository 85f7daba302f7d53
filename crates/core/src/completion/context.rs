use crate::analysis::{BlockScope, DslKeyword, SymbolTable};
use buildscope_api::{DocumentSymbol, Position, Range};

/// What the cursor sits in, as far as completion is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionContext {
    /// Inside a declared dependency literal.
    DependencyCoordinate {
        /// Literal text before the cursor.
        text: String,
        /// Range of the literal's content.
        range: Range,
        position: Position,
    },
    Project,
    Dependencies,
    Repositories,
    Task,
    /// Nothing to offer: unknown document or unrecognized block.
    Unknown,
}

impl From<BlockScope> for CompletionContext {
    fn from(scope: BlockScope) -> Self {
        match scope {
            BlockScope::Project => CompletionContext::Project,
            BlockScope::Dependencies => CompletionContext::Dependencies,
            BlockScope::Repositories => CompletionContext::Repositories,
            BlockScope::Task => CompletionContext::Task,
        }
    }
}

impl CompletionContext {
    pub fn scope(&self) -> Option<BlockScope> {
        match self {
            CompletionContext::Project => Some(BlockScope::Project),
            CompletionContext::Dependencies => Some(BlockScope::Dependencies),
            CompletionContext::Repositories => Some(BlockScope::Repositories),
            CompletionContext::Task => Some(BlockScope::Task),
            CompletionContext::DependencyCoordinate { .. } | CompletionContext::Unknown => None,
        }
    }
}

/// Classify `position` against a document's outline.
///
/// Dependency literals win over blocks. Otherwise the first top-level symbol
/// containing the position decides by its leading name (`task hello` counts
/// as `task`); a position outside every symbol is project scope.
pub fn resolve_context(table: &SymbolTable, position: Position) -> CompletionContext {
    if let Some(dependency) = table
        .dependencies
        .iter()
        .find(|symbol| symbol.range.contains_position(position))
    {
        return CompletionContext::DependencyCoordinate {
            text: text_before(dependency, position).to_string(),
            range: dependency.range,
            position,
        };
    }

    let Some(symbol) = table
        .symbols
        .iter()
        .find(|symbol| symbol.range.contains_position(position))
    else {
        return CompletionContext::Project;
    };
    let leading = symbol.name.split_whitespace().next().unwrap_or_default();
    DslKeyword::from_name(leading)
        .and_then(DslKeyword::scope)
        .map(CompletionContext::from)
        .unwrap_or(CompletionContext::Unknown)
}

/// Part of the symbol's name in front of the cursor. Multi-line literals
/// yield the whole name.
fn text_before(symbol: &DocumentSymbol, position: Position) -> &str {
    if symbol.range.start_line != position.line {
        return &symbol.name;
    }
    let wanted = position.character.saturating_sub(symbol.range.start_col);
    let mut units = 0u32;
    for (offset, c) in symbol.name.char_indices() {
        if units >= wanted {
            return &symbol.name[..offset];
        }
        units += c.len_utf16() as u32;
    }
    &symbol.name
}
