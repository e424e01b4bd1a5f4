use crate::error::{ReleaseError, Result};
use crate::git::Repository;
use std::sync::Mutex;

/// A call received by [MockRepository]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitCall {
    ListModifiedFiles,
    Stage(Vec<String>),
    SetConfig(String, String),
    Commit(String),
    CreateTag(String),
    Push { remote_url: String, branch: String },
}

/// A repository operation, used to inject failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GitStep {
    ListModifiedFiles,
    Stage,
    SetConfig,
    Commit,
    CreateTag,
    Push,
}

/// Mock repository for testing without actual git operations
///
/// Records every call in order and can be told to fail at one step.
#[derive(Debug, Default)]
pub struct MockRepository {
    modified: Vec<String>,
    fail_at: Option<GitStep>,
    calls: Mutex<Vec<GitCall>>,
}

impl MockRepository {
    /// Create a new mock with a clean working tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the files reported as modified
    pub fn with_modified_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modified = files.into_iter().map(Into::into).collect();
        self
    }

    /// Make the given step fail (after recording the call)
    pub fn failing_at(mut self, step: GitStep) -> Self {
        self.fail_at = Some(step);
        self
    }

    /// All calls received so far, oldest first
    pub fn calls(&self) -> Vec<GitCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    fn record(&self, call: GitCall, step: GitStep) -> Result<()> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }

        if self.fail_at == Some(step) {
            return Err(ReleaseError::Git(git2::Error::from_str(&format!(
                "mock failure at {:?}",
                step
            ))));
        }
        Ok(())
    }
}

impl Repository for MockRepository {
    fn list_modified_files(&self) -> Result<Vec<String>> {
        self.record(GitCall::ListModifiedFiles, GitStep::ListModifiedFiles)?;
        Ok(self.modified.clone())
    }

    fn stage(&self, paths: &[String]) -> Result<()> {
        self.record(GitCall::Stage(paths.to_vec()), GitStep::Stage)
    }

    fn set_config(&self, key: &str, value: &str) -> Result<()> {
        self.record(
            GitCall::SetConfig(key.to_string(), value.to_string()),
            GitStep::SetConfig,
        )
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.record(GitCall::Commit(message.to_string()), GitStep::Commit)
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        self.record(GitCall::CreateTag(name.to_string()), GitStep::CreateTag)
    }

    fn push(&self, remote_url: &str, branch: &str) -> Result<()> {
        self.record(
            GitCall::Push {
                remote_url: remote_url.to_string(),
                branch: branch.to_string(),
            },
            GitStep::Push,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_reports_modified_files() {
        let repo = MockRepository::new().with_modified_files(["a.txt", "b.txt"]);
        assert_eq!(repo.list_modified_files().unwrap(), vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn test_mock_records_calls_in_order() {
        let repo = MockRepository::new();
        repo.stage(&["a.txt".to_string()]).unwrap();
        repo.set_config("user.name", "bot").unwrap();
        repo.commit("msg").unwrap();
        repo.push("https://example.com/repo.git", "main").unwrap();

        assert_eq!(
            repo.calls(),
            vec![
                GitCall::Stage(vec!["a.txt".to_string()]),
                GitCall::SetConfig("user.name".to_string(), "bot".to_string()),
                GitCall::Commit("msg".to_string()),
                GitCall::Push {
                    remote_url: "https://example.com/repo.git".to_string(),
                    branch: "main".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_mock_fails_at_requested_step() {
        let repo = MockRepository::new().failing_at(GitStep::Commit);
        assert!(repo.stage(&[]).is_ok());
        let err = repo.commit("msg").unwrap_err();
        assert!(err.to_string().contains("mock failure at Commit"));
        assert_eq!(repo.calls().len(), 2);
    }

    #[test]
    fn test_mock_repository_default() {
        let repo = MockRepository::default();
        assert!(repo.list_modified_files().unwrap().is_empty());
    }
}
