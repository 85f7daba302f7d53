use once_cell::sync::Lazy;
use tree_sitter::Language;

// The grammar crate compiles and links the C parser; only its symbol is used.
use tree_sitter_groovy as _;

unsafe extern "C" {
    fn tree_sitter_groovy() -> Language;
}

static GROOVY: Lazy<Language> = Lazy::new(|| unsafe { tree_sitter_groovy() });

/// The Groovy grammar.
pub fn language() -> &'static Language {
    &GROOVY
}
