use crate::file::analyze_file;
use buildscope_api::Severity;
use std::io::Write;
use std::path::Path;

/// Print diagnostics as `file:line:column: severity: message` and return
/// how many errors were found.
pub fn run(path: &Path, out: &mut impl Write) -> Result<usize, Box<dyn std::error::Error>> {
    let file = analyze_file(path)?;
    for group in &file.report.diagnostics {
        let name = group
            .uri
            .to_file_path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|_| group.uri.to_string());
        for diagnostic in &group.diagnostics {
            let severity = match diagnostic.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
            };
            writeln!(
                out,
                "{}:{}:{}: {}: {}",
                name,
                diagnostic.range.start_line + 1,
                diagnostic.range.start_col + 1,
                severity,
                diagnostic.message
            )?;
        }
    }

    let errors = file.report.error_count();
    if errors == 0 {
        writeln!(out, "{}: no problems found", path.display())?;
    }
    Ok(errors)
}
