use serde::{Deserialize, Serialize};

/// Semantic token kinds, in legend order. The discriminant is the legend index.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Function = 0,
    Property = 1,
    Variable = 2,
    Parameter = 3,
    Keyword = 4,
}

impl TokenKind {
    pub const ALL: [TokenKind; 5] = [
        TokenKind::Function,
        TokenKind::Property,
        TokenKind::Variable,
        TokenKind::Parameter,
        TokenKind::Keyword,
    ];

    pub fn index(self) -> u32 {
        self as u32
    }

    pub fn from_index(index: u32) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TokenKind::Function => "function",
            TokenKind::Property => "property",
            TokenKind::Variable => "variable",
            TokenKind::Parameter => "parameter",
            TokenKind::Keyword => "keyword",
        }
    }
}

/// Token modifiers. Each one owns the bit at its ordinal.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum TokenModifier {
    Declaration = 0,
    DefaultLibrary = 1,
}

impl TokenModifier {
    pub const ALL: [TokenModifier; 2] = [TokenModifier::Declaration, TokenModifier::DefaultLibrary];

    pub fn bitmask(self) -> u32 {
        1 << (self as u32)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TokenModifier::Declaration => "declaration",
            TokenModifier::DefaultLibrary => "defaultLibrary",
        }
    }

    /// Names of the modifiers set in `bits`, in bit order.
    pub fn names(bits: u32) -> Vec<&'static str> {
        Self::ALL
            .iter()
            .filter(|m| bits & m.bitmask() != 0)
            .map(|m| m.as_str())
            .collect()
    }
}

/// Legend advertised to editors. Modifier names are registered in bit order so
/// that every emitted bit has a declared meaning.
pub struct TokenLegend;

impl TokenLegend {
    pub fn token_types() -> Vec<&'static str> {
        TokenKind::ALL.iter().map(|k| k.as_str()).collect()
    }

    pub fn token_modifiers() -> Vec<&'static str> {
        TokenModifier::ALL.iter().map(|m| m.as_str()).collect()
    }
}

/// A token with absolute zero-based coordinates, as recovered from an encoded stream.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedToken {
    pub line: u32,
    pub column: u32,
    pub length: u32,
    pub kind: u32,
    pub modifiers: u32,
}

/// Decodes a delta-encoded stream by cumulative summation.
pub fn decode_tokens(data: &[u32]) -> Vec<DecodedToken> {
    let mut line = 0;
    let mut column = 0;
    data.chunks_exact(5)
        .map(|chunk| {
            if chunk[0] != 0 {
                line += chunk[0];
                column = chunk[1];
            } else {
                column += chunk[1];
            }
            DecodedToken {
                line,
                column,
                length: chunk[2],
                kind: chunk[3],
                modifiers: chunk[4],
            }
        })
        .collect()
}
