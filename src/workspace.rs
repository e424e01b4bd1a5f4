//! Filesystem probing relative to the working directory.
//!
//! Asset resolution asks two questions of the working tree: does a path
//! exist, and is it a directory. They sit behind the [Workspace] trait so the
//! resolver can run against an in-memory tree in tests.

use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Read-only view of the working directory
pub trait Workspace: Send + Sync {
    /// Whether `path` (relative to the workspace root) exists
    fn path_exists(&self, path: &str) -> Result<bool>;

    /// Whether `path` (relative to the workspace root) is a directory
    fn is_dir(&self, path: &str) -> Result<bool>;
}

/// Workspace backed by the real filesystem
#[derive(Debug, Clone)]
pub struct FsWorkspace {
    root: PathBuf,
}

impl FsWorkspace {
    /// Create a workspace rooted at `root`
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        FsWorkspace {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn metadata(&self, path: &str) -> Result<Option<fs::Metadata>> {
        match fs::metadata(self.root.join(path)) {
            Ok(metadata) => Ok(Some(metadata)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl Workspace for FsWorkspace {
    fn path_exists(&self, path: &str) -> Result<bool> {
        Ok(self.metadata(path)?.is_some())
    }

    fn is_dir(&self, path: &str) -> Result<bool> {
        Ok(self.metadata(path)?.is_some_and(|m| m.is_dir()))
    }
}

/// In-memory workspace for testing without touching the disk
#[derive(Debug, Default)]
pub struct MemoryWorkspace {
    files: HashSet<String>,
    dirs: HashSet<String>,
}

impl MemoryWorkspace {
    /// Create a new empty workspace
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file; its parent directories are registered too
    pub fn with_file(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        let mut parent = Path::new(&path).parent();
        while let Some(dir) = parent.filter(|p| !p.as_os_str().is_empty()) {
            self.dirs.insert(dir.to_string_lossy().into_owned());
            parent = dir.parent();
        }
        self.files.insert(path);
        self
    }

    /// Add an empty directory
    pub fn with_dir(mut self, path: impl Into<String>) -> Self {
        self.dirs.insert(path.into());
        self
    }
}

impl Workspace for MemoryWorkspace {
    fn path_exists(&self, path: &str) -> Result<bool> {
        Ok(self.files.contains(path) || self.dirs.contains(path))
    }

    fn is_dir(&self, path: &str) -> Result<bool> {
        Ok(self.dirs.contains(path))
    }
}
