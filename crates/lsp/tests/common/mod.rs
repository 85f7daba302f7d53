use async_trait::async_trait;
use buildscope_core::ast::{Ast, Span};
use buildscope_core::completion::{CoordinateSearch, ResultShape, SearchHit};
use buildscope_core::error::Result;
use buildscope_core::parser::{ParseOutcome, ScriptParser, SyntaxError};
use buildscope_core::testing::Sketch;
use buildscope_core::{AnalysisEngine, AnalyzerConfig};
use std::sync::Arc;
use tower_lsp::lsp_types::Url;

pub const BUILD: &str = "apply plugin: 'java'\n\ndependencies {\n    implementation 'org.slf4j:slf4j-api:1.7'\n}\n";

/// Builds the tree of [`BUILD`]; any other text is a syntax error on line 1.
pub struct SketchParser;

impl ScriptParser for SketchParser {
    fn parse(&self, source: &str, _uri: &Url) -> Result<ParseOutcome> {
        if source != BUILD {
            let span = Span::new(1, 1, 1, 2, 1);
            return Ok(ParseOutcome::failed(vec![SyntaxError::new(span, "unexpected input")]));
        }
        Ok(ParseOutcome::parsed(build_tree(source)))
    }
}

fn build_tree(source: &str) -> Ast {
    let mut sketch = Sketch::new(source);
    let entry = sketch.entry("plugin", "'java'");
    let apply = sketch.command("apply", vec![entry]);
    let coordinate = sketch.string("'org.slf4j:slf4j-api:1.7'");
    let implementation = sketch.command("implementation", vec![coordinate]);
    let deps = sketch.block_call("dependencies", vec![implementation]);
    sketch.finish(vec![apply, deps])
}

/// Always answers with two versions of slf4j-api.
pub struct VersionSearch;

#[async_trait]
impl CoordinateSearch for VersionSearch {
    async fn search(&self, _query: &str, _shape: ResultShape) -> Result<Vec<SearchHit>> {
        Ok(["2.0.9", "1.7.36"]
            .iter()
            .enumerate()
            .map(|(rank, v)| SearchHit {
                label: v.to_string(),
                filter_text: Some(format!("org.slf4j:slf4j-api:{}", v)),
                rank,
            })
            .collect())
    }
}

pub fn uri() -> Url {
    Url::parse("file:///workspace/build.gradle").unwrap()
}

pub fn engine() -> AnalysisEngine {
    AnalysisEngine::new(Arc::new(SketchParser), Arc::new(VersionSearch), AnalyzerConfig::default())
}
