use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Script dialect of a document, derived from its file name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Language(Cow<'static, str>);

impl Language {
    pub const GRADLE: Language = Language(Cow::Borrowed("gradle"));
    pub const GRADLE_KTS: Language = Language(Cow::Borrowed("gradle-kts"));
    pub const UNKNOWN: Language = Language(Cow::Borrowed("unknown"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// Map a path or URI to a dialect. Only the file name is inspected.
    pub fn from_path(path: &str) -> Self {
        let file_name = path.rsplit(['/', '\\']).next().unwrap_or(path);
        let lower = file_name.to_lowercase();
        if lower.ends_with(".gradle.kts") {
            Self::GRADLE_KTS
        } else if lower.ends_with(".gradle") {
            Self::GRADLE
        } else {
            Self::UNKNOWN
        }
    }

    /// Whether the Groovy front-end can analyze this dialect.
    pub fn is_groovy(&self) -> bool {
        *self == Self::GRADLE
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
