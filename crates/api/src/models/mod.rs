pub mod completion;
pub mod diagnostic;
pub mod language;
pub mod symbol;
pub mod token;

pub use completion::*;
pub use diagnostic::*;
pub use language::*;
pub use symbol::*;
pub use token::*;
