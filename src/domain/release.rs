use serde::{Deserialize, Serialize};

/// The release that was published before this one.
///
/// Every field may be empty when the repository has never been released.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LastRelease {
    pub version: String,
    pub git_head: String,
    pub git_tag: String,
}

/// The release being published.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextRelease {
    pub version: String,
    pub git_head: String,
    pub git_tag: String,
    pub notes: String,
}

/// Everything the publish step needs to know about the release.
///
/// Serialises with the keys message templates refer to
/// (`branch`, `lastRelease.version`, `nextRelease.notes`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseContext {
    pub branch: String,
    pub repository_url: String,
    pub last_release: LastRelease,
    pub next_release: NextRelease,
}

impl NextRelease {
    /// Create a release descriptor for `version`, tagged with `v<version>`.
    pub fn new(version: impl Into<String>) -> Self {
        let version = version.into();
        NextRelease {
            git_tag: format!("v{}", version),
            version,
            ..Default::default()
        }
    }

    /// Set the release notes
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_release_default_tag() {
        let next = NextRelease::new("1.2.0");
        assert_eq!(next.git_tag, "v1.2.0");
        assert!(next.notes.is_empty());
    }

    #[test]
    fn test_context_serializes_camel_case() {
        let context = ReleaseContext {
            branch: "main".to_string(),
            repository_url: "git@example.com:org/repo.git".to_string(),
            last_release: LastRelease {
                version: "1.0.0".to_string(),
                git_head: "abc".to_string(),
                git_tag: "v1.0.0".to_string(),
            },
            next_release: NextRelease::new("1.1.0").with_notes("notes"),
        };

        let value = serde_json::to_value(&context).unwrap();
        assert_eq!(value["lastRelease"]["gitTag"], "v1.0.0");
        assert_eq!(value["nextRelease"]["notes"], "notes");
        assert_eq!(value["repositoryUrl"], "git@example.com:org/repo.git");
    }
}
