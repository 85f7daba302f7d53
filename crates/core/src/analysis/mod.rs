//! Per-document semantic analysis.
//!
//! A single walk over the tree feeds the node indexer, the token collector
//! and the symbol builder at once.

pub mod keywords;
pub mod node_index;
pub mod symbols;
pub mod tokens;
pub mod walker;

pub use keywords::{BlockScope, DslKeyword};
pub use node_index::{NodeIndex, NodeIndexer};
pub use symbols::{SymbolBuilder, SymbolTable, call_name};
pub use tokens::{SemanticToken, TokenCollector};
pub use walker::{AstVisitor, walk};

use crate::ast::Ast;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisOptions {
    pub index_nodes: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self { index_nodes: true }
    }
}

/// Everything one pass derives from a document's tree.
#[derive(Debug, Clone)]
pub struct DocumentAnalysis {
    pub nodes: Option<NodeIndex>,
    pub symbols: SymbolTable,
    pub tokens: Vec<u32>,
}

pub fn analyze(ast: &Ast, uri: &Url, options: AnalysisOptions) -> DocumentAnalysis {
    let indexer = options.index_nodes.then(|| NodeIndexer::new(uri.clone()));
    let mut visitors = (indexer, TokenCollector::new(), SymbolBuilder::new());
    walk(ast, &mut visitors);

    let (indexer, mut collector, builder) = visitors;
    let analysis = DocumentAnalysis {
        nodes: indexer.map(NodeIndexer::finish),
        tokens: collector.finish(),
        symbols: builder.finish(),
    };
    tracing::debug!(
        "Analyzed {}: {} symbols, {} dependencies, {} tokens",
        uri,
        analysis.symbols.symbols.len(),
        analysis.symbols.dependencies.len(),
        analysis.tokens.len() / 5
    );
    analysis
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Sketch;

    fn sample() -> Ast {
        let source = "apply plugin: 'java'\nversion = '1.0'\ndependencies {\n    implementation 'g:a:1.0'\n}";
        let mut sketch = Sketch::new(source);
        let entry = sketch.entry("plugin", "'java'");
        let apply = sketch.command("apply", vec![entry]);
        let version = sketch.assign("version", "'1.0'");
        let coordinate = sketch.string("'g:a:1.0'");
        let implementation = sketch.command("implementation", vec![coordinate]);
        let deps = sketch.block_call("dependencies", vec![implementation]);
        sketch.finish(vec![apply, version, deps])
    }

    #[test]
    fn one_pass_feeds_every_collector() {
        let ast = sample();
        let uri = Url::parse("file:///w/build.gradle").unwrap();
        let analysis = analyze(&ast, &uri, AnalysisOptions::default());

        let nodes = analysis.nodes.expect("indexing is on by default");
        assert_eq!(nodes.uri(), &uri);
        assert_eq!(nodes.nodes().first().copied(), ast.root());
        assert_eq!(analysis.symbols.symbols.len(), 3);
        assert_eq!(analysis.symbols.dependencies.len(), 1);
        // apply, plugin, version, dependencies, implementation
        assert_eq!(analysis.tokens.len(), 25);
    }

    #[test]
    fn indexing_can_be_switched_off() {
        let ast = sample();
        let uri = Url::parse("file:///w/build.gradle").unwrap();
        let analysis = analyze(&ast, &uri, AnalysisOptions { index_nodes: false });
        assert!(analysis.nodes.is_none());
        assert_eq!(analysis.symbols.symbols.len(), 3);
    }

    #[test]
    fn repeated_analysis_is_deterministic() {
        let ast = sample();
        let uri = Url::parse("file:///w/build.gradle").unwrap();
        let first = analyze(&ast, &uri, AnalysisOptions::default());
        let second = analyze(&ast, &uri, AnalysisOptions::default());
        assert_eq!(first.tokens, second.tokens);
        assert_eq!(first.symbols, second.symbols);
    }
}
