use serde::{Deserialize, Serialize};

/// A single configured asset entry.
///
/// Entries come straight from the configuration file, so the three shapes
/// accepted there are modelled as an untagged enum:
///
/// ```toml
/// assets = [
///     "dist/**",                              # Literal
///     ["src/**/*.js", "!src/**/*.test.js"],   # Group
///     { path = "CHANGELOG.md", label = "x" }, # Structured
/// ]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum AssetPattern {
    Literal(String),
    Group(Vec<String>),
    Structured(StructuredAsset),
}

/// An asset entry carrying its glob under `path`. Other keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StructuredAsset {
    pub path: AssetPath,
}

/// The `path` of a structured entry: one glob or a group of globs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum AssetPath {
    Glob(String),
    Group(Vec<String>),
}

impl AssetPattern {
    /// Shorthand for a single glob entry.
    pub fn literal(glob: impl Into<String>) -> Self {
        AssetPattern::Literal(glob.into())
    }

    /// Shorthand for a glob group entry.
    pub fn group<I, S>(globs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AssetPattern::Group(globs.into_iter().map(Into::into).collect())
    }

    /// Shorthand for a structured entry with a single glob path.
    pub fn structured(path: impl Into<String>) -> Self {
        AssetPattern::Structured(StructuredAsset {
            path: AssetPath::Glob(path.into()),
        })
    }

    /// Reduce the entry to the glob group it stands for.
    ///
    /// Structured entries are replaced by their `path`; everything else is
    /// used as-is.
    pub fn normalize(&self) -> Vec<String> {
        match self {
            AssetPattern::Literal(glob) => vec![glob.clone()],
            AssetPattern::Group(globs) => globs.clone(),
            AssetPattern::Structured(StructuredAsset { path }) => match path {
                AssetPath::Glob(glob) => vec![glob.clone()],
                AssetPath::Group(globs) => globs.clone(),
            },
        }
    }
}

impl From<&str> for AssetPattern {
    fn from(glob: &str) -> Self {
        AssetPattern::literal(glob)
    }
}
