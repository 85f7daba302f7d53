//! Context-aware completion: where the cursor is, and what to offer there.

pub mod catalog;
pub mod context;
pub mod coordinate;
pub mod provider;
pub mod search;

pub use catalog::catalog;
pub use context::{CompletionContext, resolve_context};
pub use coordinate::CoordinatePrefix;
pub use provider::{complete, coordinate_entries};
pub use search::{CoordinateSearch, OfflineSearch, ResultShape, SearchHit};
