//! Main workflow orchestration logic
//!
//! This module holds the release workflow behind the binary: verification,
//! opening the repository, building the release context and running the
//! publish step. It keeps CLI argument parsing separate from business logic.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::config::PluginConfig;
use crate::domain::{LastRelease, NextRelease, ReleaseContext};
use crate::git::Git2Repository;
use crate::logger::ConsoleLogger;
use crate::publish::{PublishOutcome, Publisher};
use crate::verify;
use crate::workspace::FsWorkspace;

/// Arguments for the publish workflow
///
/// Mirrors the CLI Args but in a format suitable for orchestration logic.
/// This decoupling allows the workflow to be called programmatically
/// without depending on clap.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PublishWorkflowArgs {
    /// Path inside the repository to release
    pub repo_path: PathBuf,

    /// Remote branch to push to (defaults to the current branch)
    pub branch: Option<String>,

    /// Remote repository URL (defaults to the `origin` URL)
    pub repository_url: Option<String>,

    /// Version being released
    pub next_version: String,

    /// Tag of the release (defaults to `v<version>`)
    pub next_tag: Option<String>,

    /// Commit of the release (defaults to HEAD)
    pub next_head: Option<String>,

    /// Release notes
    pub notes: String,

    /// Previous release, if any
    pub last_version: Option<String>,
    pub last_tag: Option<String>,
    pub last_head: Option<String>,

    /// Stop after verification
    pub verify_only: bool,
}

/// Values read from the repository to fill in unspecified arguments
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RepoDefaults {
    pub branch: Option<String>,
    pub remote_url: Option<String>,
    pub head_sha: Option<String>,
}

/// Result of a successful publish workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// The release tag
    pub tag: String,

    /// The branch that was pushed
    pub branch: String,

    /// Whether the push ran (false for verify-only runs)
    pub pushed: bool,

    /// What the publish step did, if it ran
    pub outcome: Option<PublishOutcome>,
}

/// Builds the release context from arguments, falling back to repository defaults.
pub fn release_context(args: &PublishWorkflowArgs, defaults: RepoDefaults) -> Result<ReleaseContext> {
    let branch = args
        .branch
        .clone()
        .or(defaults.branch)
        .context("No branch given and HEAD is not on a branch; pass --branch")?;

    let repository_url = args
        .repository_url
        .clone()
        .or(defaults.remote_url)
        .context("No repository URL given and remote 'origin' has none; pass --repository-url")?;

    let next_release = NextRelease {
        version: args.next_version.clone(),
        git_head: args
            .next_head
            .clone()
            .or(defaults.head_sha)
            .unwrap_or_default(),
        git_tag: args
            .next_tag
            .clone()
            .unwrap_or_else(|| format!("v{}", args.next_version)),
        notes: args.notes.clone(),
    };

    let last_release = LastRelease {
        version: args.last_version.clone().unwrap_or_default(),
        git_head: args.last_head.clone().unwrap_or_default(),
        git_tag: args.last_tag.clone().unwrap_or_default(),
    };

    Ok(ReleaseContext {
        branch,
        repository_url,
        last_release,
        next_release,
    })
}

/// Main publish workflow
///
/// Orchestrates the release:
/// 1. Verify the configuration
/// 2. Open the git repository
/// 3. Build and verify the release context
/// 4. Commit changed assets and push (unless verify-only)
///
/// # Arguments
///
/// * `args` - Workflow arguments
/// * `config` - Loaded configuration
///
/// # Returns
///
/// Result describing the release, or the first error met
pub fn run_publish_workflow(args: PublishWorkflowArgs, config: PluginConfig) -> Result<WorkflowResult> {
    verify::verify_config(&config)?;

    let repo = Git2Repository::open(&args.repo_path).with_context(|| {
        format!(
            "Not in a git repository: {}",
            args.repo_path.display()
        )
    })?;
    let workspace = FsWorkspace::new(repo.workdir()?);

    let defaults = RepoDefaults {
        branch: repo.current_branch()?,
        remote_url: repo.remote_url("origin")?,
        head_sha: repo.head_sha().ok(),
    };
    let release = release_context(&args, defaults)?;
    verify::verify_release(&release)?;

    if args.verify_only {
        return Ok(WorkflowResult {
            tag: release.next_release.git_tag,
            branch: release.branch,
            pushed: false,
            outcome: None,
        });
    }

    let resolved = config.resolve();
    let outcome = Publisher::new(&repo, &workspace, &ConsoleLogger).publish(&resolved, &release)?;

    Ok(WorkflowResult {
        tag: release.next_release.git_tag,
        branch: release.branch,
        pushed: true,
        outcome: Some(outcome),
    })
}
