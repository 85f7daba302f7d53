use async_trait::async_trait;
use buildscope_core::AnalyzerConfig;
use buildscope_core::AnalysisEngine;
use buildscope_core::ast::Ast;
use buildscope_core::completion::{CoordinateSearch, ResultShape, SearchHit};
use buildscope_core::error::{BuildscopeError, Result};
use buildscope_core::parser::{ParseOutcome, ScriptParser};
use std::sync::{Arc, Mutex};
use url::Url;

pub type ParseFn = dyn Fn(&str, &Url) -> ParseOutcome + Send + Sync;

/// Front-end stand-in driven by a closure.
pub struct FakeParser(pub Box<ParseFn>);

impl ScriptParser for FakeParser {
    fn parse(&self, source: &str, uri: &Url) -> Result<ParseOutcome> {
        Ok((self.0)(source, uri))
    }
}

/// Records every query and answers with canned hits.
#[derive(Default)]
pub struct FakeSearch {
    pub queries: Mutex<Vec<(String, ResultShape)>>,
    pub hits: Vec<SearchHit>,
    pub fail: bool,
}

#[async_trait]
impl CoordinateSearch for FakeSearch {
    async fn search(&self, query: &str, shape: ResultShape) -> Result<Vec<SearchHit>> {
        self.queries.lock().unwrap().push((query.to_string(), shape));
        if self.fail {
            return Err(BuildscopeError::Search("503 Service Unavailable".to_string()));
        }
        Ok(self.hits.clone())
    }
}

#[allow(dead_code)]
pub fn hit(label: &str, filter_text: Option<&str>, rank: usize) -> SearchHit {
    SearchHit {
        label: label.to_string(),
        filter_text: filter_text.map(str::to_string),
        rank,
    }
}

pub fn uri(path: &str) -> Url {
    Url::parse(&format!("file:///workspace/{}", path)).unwrap()
}

/// Engine whose parser builds the tree with `build` for every source text.
#[allow(dead_code)]
pub fn engine_with<F>(build: F, search: Arc<FakeSearch>) -> AnalysisEngine
where
    F: Fn(&str) -> Ast + Send + Sync + 'static,
{
    let parser = FakeParser(Box::new(move |source, _uri| ParseOutcome::parsed(build(source))));
    AnalysisEngine::new(Arc::new(parser), search, AnalyzerConfig::default())
}
