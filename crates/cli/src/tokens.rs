use crate::file::analyze_file;
use buildscope_api::{TokenKind, TokenModifier, decode_tokens};
use std::io::Write;
use std::path::Path;
use tabled::{Table, Tabled, settings::Style};

/// One decoded token, with one-based coordinates.
#[derive(Tabled)]
pub struct TokenRow {
    pub line: u32,
    pub column: u32,
    pub length: u32,
    pub kind: String,
    pub modifiers: String,
}

pub fn rows(data: &[u32]) -> Vec<TokenRow> {
    decode_tokens(data)
        .into_iter()
        .map(|token| TokenRow {
            line: token.line + 1,
            column: token.column + 1,
            length: token.length,
            kind: TokenKind::from_index(token.kind)
                .map(|kind| kind.as_str().to_string())
                .unwrap_or_else(|| token.kind.to_string()),
            modifiers: match TokenModifier::names(token.modifiers).join(",") {
                names if names.is_empty() => "-".to_string(),
                names => names,
            },
        })
        .collect()
}

pub fn run(path: &Path, out: &mut impl Write) -> Result<(), Box<dyn std::error::Error>> {
    let file = analyze_file(path)?;
    let Some(data) = file.engine.semantic_tokens(&file.uri) else {
        return Err(format!("{} was not analyzed; run `buildscope check` for details", path.display()).into());
    };
    writeln!(out, "{}", Table::new(rows(&data)).with(Style::psql()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_one_based_with_named_modifiers() {
        let rows = rows(&[0, 0, 12, 0, 2, 1, 4, 14, 0, 0]);
        assert_eq!(rows.len(), 2);
        assert_eq!((rows[0].line, rows[0].column), (1, 1));
        assert_eq!(rows[0].kind, "function");
        assert_eq!(rows[0].modifiers, "defaultLibrary");
        assert_eq!((rows[1].line, rows[1].column, rows[1].length), (2, 5, 14));
        assert_eq!(rows[1].modifiers, "-");
    }
}
