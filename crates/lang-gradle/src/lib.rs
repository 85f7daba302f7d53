//! Groovy front-end for Gradle build scripts, backed by tree-sitter.

mod language;
pub mod lower;
pub mod parser;

pub use language::language;
pub use parser::GroovyParser;
