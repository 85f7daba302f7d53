use crate::file::analyze_file;
use buildscope_api::DocumentSymbol;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

#[derive(Serialize)]
struct Outline<'a> {
    uri: &'a str,
    symbols: Vec<DocumentSymbol>,
    dependencies: Vec<DocumentSymbol>,
}

/// Write the outline and declared dependencies of `path` as JSON.
pub fn run(path: &Path, out: &mut impl Write) -> Result<(), Box<dyn std::error::Error>> {
    let file = analyze_file(path)?;
    if file.report.has_errors() {
        return Err(format!(
            "{} has {} syntax errors; run `buildscope check` for details",
            path.display(),
            file.report.error_count()
        )
        .into());
    }

    let outline = Outline {
        uri: file.uri.as_str(),
        symbols: file.engine.document_symbols(&file.uri),
        dependencies: file.engine.dependencies(&file.uri),
    };
    serde_json::to_writer_pretty(&mut *out, &outline)?;
    writeln!(out)?;
    Ok(())
}
