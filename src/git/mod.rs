//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the Git operations the
//! publish step delegates, allowing for multiple implementations including
//! real Git repositories and mock implementations for testing.
//!
//! # Overview
//!
//! The primary abstraction is the [Repository] trait. The concrete
//! implementations include:
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A recording mock for testing
//!
//! # Usage
//!
//! Code should depend on the [Repository] trait rather than concrete
//! implementations to enable easy testing.
//!
//! ```rust
//! # use git_release::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
//! let modified = repo.list_modified_files()?;
//! repo.stage(&modified)?;
//! repo.commit("chore(release): 1.0.0 [skip ci]")?;
//! repo.push("git@github.com:org/repo.git", "main")?;
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::{GitCall, GitStep, MockRepository};
pub use repository::Git2Repository;

use crate::error::Result;

/// Common git operation trait for abstraction
///
/// ## Thread Safety
///
/// All implementors must be `Send + Sync` to allow safe sharing across threads.
///
/// ## Error Handling
///
/// All methods return [crate::error::Result<T>]. Callers propagate failures
/// as-is; nothing here is retried.
pub trait Repository: Send + Sync {
    /// List files changed in the working tree
    ///
    /// Covers modified, deleted and untracked files, relative to the
    /// repository root with `/` separators. Ignored files are excluded.
    fn list_modified_files(&self) -> Result<Vec<String>>;

    /// Stage the given paths
    ///
    /// Paths are taken literally (no pathspec globbing) and ignore rules
    /// are bypassed. Deleted paths are staged as removals.
    fn stage(&self, paths: &[String]) -> Result<()>;

    /// Set a repository-local configuration value (e.g. `user.name`)
    fn set_config(&self, key: &str, value: &str) -> Result<()>;

    /// Commit the index on top of HEAD
    ///
    /// # Returns
    /// * `Ok(())` - Commit created
    /// * `Err` - If the index matches HEAD (nothing to commit) or on Git error
    fn commit(&self, message: &str) -> Result<()>;

    /// Create a lightweight tag on HEAD
    fn create_tag(&self, name: &str) -> Result<()>;

    /// Push HEAD to `branch` and all tags to the repository at `remote_url`
    ///
    /// # Arguments
    /// * `remote_url` - URL of the remote repository
    /// * `branch` - Name of the remote branch to update (e.g., "main")
    ///
    /// # Returns
    /// * `Ok(())` - Success
    /// * `Err` - On network, authentication or rejected reference errors
    fn push(&self, remote_url: &str, branch: &str) -> Result<()>;
}
