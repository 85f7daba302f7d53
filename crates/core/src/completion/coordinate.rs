/// What the text typed so far inside a dependency literal asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoordinatePrefix {
    /// Still typing the group id.
    Group(String),
    /// Group complete, typing the artifact id.
    Artifact { group: String },
    /// Group and artifact complete, typing the version.
    Version { group: String, artifact: String },
}

impl CoordinatePrefix {
    /// Classify by the number of `:`-separated segments. Four or more
    /// segments ask for nothing, and so does a group prefix shorter than
    /// `min_group_len`.
    pub fn parse(text: &str, min_group_len: usize) -> Option<Self> {
        let segments: Vec<&str> = text.split(':').collect();
        match segments.as_slice() {
            [group] if group.chars().count() >= min_group_len => Some(Self::Group(group.to_string())),
            [_] => None,
            [group, _] => Some(Self::Artifact {
                group: group.to_string(),
            }),
            [group, artifact, _] => Some(Self::Version {
                group: group.to_string(),
                artifact: artifact.to_string(),
            }),
            _ => None,
        }
    }

    /// Solr query for this prefix.
    pub fn query(&self) -> String {
        match self {
            Self::Group(prefix) => prefix.clone(),
            Self::Artifact { group } => format!("g:\"{}\"", group),
            Self::Version { group, artifact } => format!("g:\"{}\" AND a:\"{}\"", group, artifact),
        }
    }

    pub fn shape(&self) -> super::ResultShape {
        match self {
            Self::Version { .. } => super::ResultShape::Version,
            _ => super::ResultShape::Id,
        }
    }
}
