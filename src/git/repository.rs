use crate::error::{ReleaseError, Result};
use git2::{
    Commit, Cred, CredentialType, ErrorClass, ErrorCode, IndexAddOption, PushOptions,
    RemoteCallbacks, Repository as Git2Repo, Status, StatusOptions, StatusShow,
};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Mutex<Git2Repo>,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Self::from_git2(repo))
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository {
            repo: Mutex::new(repo),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Git2Repo>> {
        self.repo
            .lock()
            .map_err(|_| ReleaseError::Git(git2::Error::from_str("repository lock poisoned")))
    }

    /// Root of the working tree
    pub fn workdir(&self) -> Result<PathBuf> {
        let repo = self.lock()?;
        let workdir = repo.workdir().map(Path::to_path_buf);
        workdir.ok_or_else(|| ReleaseError::Git(git2::Error::from_str("repository is bare")))
    }

    /// Get the current HEAD git hash (full 40-character SHA-1)
    pub fn head_sha(&self) -> Result<String> {
        let repo = self.lock()?;
        let commit = repo.head()?.peel_to_commit()?;
        Ok(commit.id().to_string())
    }

    /// Short name of the checked-out branch, or `None` on a detached or unborn HEAD
    pub fn current_branch(&self) -> Result<Option<String>> {
        let repo = self.lock()?;
        let head = match repo.head() {
            Ok(head) => head,
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
                return Ok(None)
            }
            Err(e) => return Err(e.into()),
        };

        if !head.is_branch() {
            return Ok(None);
        }
        let branch = head.shorthand().map(str::to_string);
        Ok(branch)
    }

    /// URL of a named remote, if the remote exists and has one
    pub fn remote_url(&self, name: &str) -> Result<Option<String>> {
        let repo = self.lock()?;
        let url = match repo.find_remote(name) {
            Ok(remote) => remote.url().map(str::to_string),
            Err(e) if e.code() == ErrorCode::NotFound => None,
            Err(e) => return Err(e.into()),
        };
        Ok(url)
    }
}

fn head_commit(repo: &Git2Repo) -> Result<Option<Commit<'_>>> {
    match repo.head() {
        Ok(head) => Ok(Some(head.peel_to_commit()?)),
        Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

impl super::Repository for Git2Repository {
    fn list_modified_files(&self) -> Result<Vec<String>> {
        let repo = self.lock()?;
        let mut opts = StatusOptions::new();
        opts.include_ignored(false)
            .include_untracked(true)
            .include_unmodified(false)
            .recurse_untracked_dirs(true)
            .exclude_submodules(true)
            .show(StatusShow::Workdir);

        let statuses = repo.statuses(Some(&mut opts))?;
        let changed = Status::WT_NEW
            | Status::WT_MODIFIED
            | Status::WT_DELETED
            | Status::WT_TYPECHANGE
            | Status::WT_RENAMED;

        let files = statuses
            .iter()
            .filter(|entry| entry.status().intersects(changed))
            .filter_map(|entry| entry.path().map(str::to_string))
            .collect();

        Ok(files)
    }

    fn stage(&self, paths: &[String]) -> Result<()> {
        let repo = self.lock()?;
        let mut index = repo.index()?;

        index.add_all(
            paths.iter().map(String::as_str),
            IndexAddOption::FORCE | IndexAddOption::DISABLE_PATHSPEC_MATCH,
            None,
        )?;
        // add_all only sees files present on disk; this stages the deletions
        index.update_all(paths.iter().map(String::as_str), None)?;
        index.write()?;

        Ok(())
    }

    fn set_config(&self, key: &str, value: &str) -> Result<()> {
        let repo = self.lock()?;
        let mut config = repo.config()?;
        config.set_str(key, value)?;
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        let repo = self.lock()?;
        let signature = repo.signature()?;
        let tree_id = repo.index()?.write_tree()?;
        let tree = repo.find_tree(tree_id)?;
        let parent = head_commit(&repo)?;

        if parent.as_ref().is_some_and(|p| p.tree_id() == tree_id) {
            return Err(ReleaseError::commit("nothing to commit, working tree clean"));
        }

        let parents: Vec<&Commit<'_>> = parent.iter().collect();
        repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &parents,
        )?;

        Ok(())
    }

    fn create_tag(&self, name: &str) -> Result<()> {
        let repo = self.lock()?;
        let head = repo.head()?.peel_to_commit()?;
        repo.tag_lightweight(name, head.as_object(), false)?;
        Ok(())
    }

    fn push(&self, remote_url: &str, branch: &str) -> Result<()> {
        let repo = self.lock()?;
        let git_config = repo.config()?;
        let mut remote = repo
            .remote_anonymous(remote_url)
            .map_err(|e| ReleaseError::remote(format!("Invalid remote '{}': {}", remote_url, e)))?;

        let mut refspecs = vec![format!("HEAD:refs/heads/{}", branch)];
        for tag in repo.tag_names(None)?.iter().flatten() {
            refspecs.push(format!("refs/tags/{0}:refs/tags/{0}", tag));
        }

        let mut callbacks = RemoteCallbacks::new();
        callbacks.credentials(|url, username_from_url, allowed_types| {
            let username = username_from_url.unwrap_or("git");

            if allowed_types.contains(CredentialType::SSH_KEY) {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                    let path = Path::new(&home).join(".ssh").join(key);
                    if path.exists() {
                        if let Ok(cred) = Cred::ssh_key(username, None, &path, None) {
                            return Ok(cred);
                        }
                    }
                }

                if let Ok(cred) = Cred::ssh_key_from_agent(username) {
                    return Ok(cred);
                }
            }

            if allowed_types.contains(CredentialType::USER_PASS_PLAINTEXT) {
                if let Ok(cred) = Cred::credential_helper(&git_config, url, username_from_url) {
                    return Ok(cred);
                }
            }

            Cred::default()
        });

        callbacks.push_update_reference(|refname, status| match status {
            Some(status) => {
                log::warn!("Could not update reference {}: {}", refname, status);
                Err(git2::Error::from_str(&format!(
                    "Push rejected for {}: {}",
                    refname, status
                )))
            }
            None => Ok(()),
        });

        let mut push_options = PushOptions::new();
        push_options.remote_callbacks(callbacks);

        log::debug!("pushing {:?} to {}", refspecs, remote_url);
        remote
            .push(&refspecs, Some(&mut push_options))
            .map_err(|e| match e.class() {
                ErrorClass::Net => ReleaseError::remote(format!("Network error during push: {}", e)),
                ErrorClass::Reference => {
                    ReleaseError::remote(format!("Reference error during push: {}", e))
                }
                _ => ReleaseError::remote(format!(
                    "Failed to push to '{}' ({}): {}",
                    remote_url, branch, e
                )),
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::Repository;
    use std::fs;
    use tempfile::TempDir;

    fn init_repo() -> (TempDir, Git2Repository) {
        let dir = TempDir::new().unwrap();
        let repo = Git2Repo::init(dir.path()).unwrap();
        {
            let mut config = repo.config().unwrap();
            config.set_str("user.name", "Test").unwrap();
            config.set_str("user.email", "test@example.com").unwrap();
        }
        (dir, Git2Repository::from_git2(repo))
    }

    #[test]
    fn test_lists_untracked_and_modified_files() {
        let (dir, repo) = init_repo();
        fs::write(dir.path().join("tracked.txt"), "one").unwrap();
        repo.stage(&["tracked.txt".to_string()]).unwrap();
        repo.commit("initial").unwrap();

        fs::write(dir.path().join("tracked.txt"), "two").unwrap();
        fs::create_dir(dir.path().join("dist")).unwrap();
        fs::write(dir.path().join("dist/app.js"), "app").unwrap();

        let files = repo.list_modified_files().unwrap();
        assert_eq!(files, vec!["dist/app.js", "tracked.txt"]);
    }

    #[test]
    fn test_ignored_files_are_not_listed() {
        let (dir, repo) = init_repo();
        fs::write(dir.path().join(".gitignore"), "build/\n").unwrap();
        fs::create_dir(dir.path().join("build")).unwrap();
        fs::write(dir.path().join("build/out.js"), "x").unwrap();

        let files = repo.list_modified_files().unwrap();
        assert_eq!(files, vec![".gitignore"]);
    }

    #[test]
    fn test_commit_without_changes_fails() {
        let (dir, repo) = init_repo();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        repo.stage(&["a.txt".to_string()]).unwrap();
        repo.commit("first").unwrap();

        let err = repo.commit("second").unwrap_err();
        assert!(err.to_string().contains("nothing to commit"));
    }

    #[test]
    fn test_stage_records_deletions() {
        let (dir, repo) = init_repo();
        fs::write(dir.path().join("gone.txt"), "a").unwrap();
        repo.stage(&["gone.txt".to_string()]).unwrap();
        repo.commit("add").unwrap();

        fs::remove_file(dir.path().join("gone.txt")).unwrap();
        assert_eq!(repo.list_modified_files().unwrap(), vec!["gone.txt"]);

        repo.stage(&["gone.txt".to_string()]).unwrap();
        repo.commit("remove").unwrap();
        assert!(repo.list_modified_files().unwrap().is_empty());
    }

    #[test]
    fn test_set_config_and_head_sha() {
        let (dir, repo) = init_repo();
        repo.set_config("user.name", "Release Bot").unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        repo.stage(&["a.txt".to_string()]).unwrap();
        repo.commit("first").unwrap();

        let git = Git2Repo::open(dir.path()).unwrap();
        let head = git.head().unwrap().peel_to_commit().unwrap();
        assert_eq!(head.author().name(), Some("Release Bot"));
        assert_eq!(repo.head_sha().unwrap(), head.id().to_string());
    }

    #[test]
    fn test_current_branch() {
        let (dir, repo) = init_repo();
        assert_eq!(repo.current_branch().unwrap(), None);

        fs::write(dir.path().join("a.txt"), "a").unwrap();
        repo.stage(&["a.txt".to_string()]).unwrap();
        repo.commit("first").unwrap();

        let git = Git2Repo::open(dir.path()).unwrap();
        let expected = git.head().unwrap().shorthand().map(str::to_string);
        assert_eq!(repo.current_branch().unwrap(), expected);
    }

    #[test]
    fn test_remote_url_missing_remote() {
        let (_dir, repo) = init_repo();
        assert_eq!(repo.remote_url("origin").unwrap(), None);
    }

    #[test]
    fn test_remote_url_configured_remote() {
        let (dir, repo) = init_repo();
        Git2Repo::open(dir.path())
            .unwrap()
            .remote("origin", "https://example.com/org/repo.git")
            .unwrap();

        assert_eq!(
            repo.remote_url("origin").unwrap().as_deref(),
            Some("https://example.com/org/repo.git")
        );
    }

    #[test]
    fn test_create_tag_and_push_send_branch_and_tags() {
        let (dir, repo) = init_repo();
        let remote = TempDir::new().unwrap();
        Git2Repo::init_bare(remote.path()).unwrap();

        fs::write(dir.path().join("a.txt"), "a").unwrap();
        repo.stage(&["a.txt".to_string()]).unwrap();
        repo.commit("first").unwrap();
        repo.create_tag("v1.0.0").unwrap();
        repo.push(&remote.path().to_string_lossy(), "main").unwrap();

        let bare = Git2Repo::open_bare(remote.path()).unwrap();
        let head = repo.head_sha().unwrap();
        let branch = bare.find_reference("refs/heads/main").unwrap();
        assert_eq!(branch.target().unwrap().to_string(), head);
        let tag = bare.find_reference("refs/tags/v1.0.0").unwrap();
        assert_eq!(tag.peel_to_commit().unwrap().id().to_string(), head);
    }
}
