//! The publish step: commit the release assets and push.
//!
//! ```text
//! list modified files -> resolve assets
//!   files found:  stage -> user.name -> user.email -> commit
//!   none found:   (skip)
//! [create tag] -> push
//! ```
//!
//! Push always runs, even when nothing was committed: an earlier run or an
//! out-of-band commit may still be waiting to go out. Collaborator errors are
//! returned unchanged and stop the pipeline where they occur.

use crate::config::ResolvedConfig;
use crate::domain::ReleaseContext;
use crate::error::Result;
use crate::git::Repository;
use crate::logger::Logger;
use crate::resolver::resolve_files;
use crate::template;
use crate::warning::ResolveWarning;
use crate::workspace::Workspace;

/// What a publish run did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PublishOutcome {
    /// Files staged into the release commit (empty when nothing was committed)
    pub files: Vec<String>,
    /// Whether a release commit was created
    pub committed: bool,
    /// The commit message used, if a commit was made
    pub message: Option<String>,
    /// Whether the release tag was created locally by this run
    pub tag_created: bool,
    /// Non-fatal issues from asset resolution
    pub warnings: Vec<ResolveWarning>,
}

/// Runs the publish step against its collaborators.
pub struct Publisher<'a, R: ?Sized, W: ?Sized, L: ?Sized> {
    repo: &'a R,
    workspace: &'a W,
    logger: &'a L,
}

impl<'a, R, W, L> Publisher<'a, R, W, L>
where
    R: Repository + ?Sized,
    W: Workspace + ?Sized,
    L: Logger + ?Sized,
{
    pub fn new(repo: &'a R, workspace: &'a W, logger: &'a L) -> Self {
        Publisher {
            repo,
            workspace,
            logger,
        }
    }

    /// Commit the configured assets that changed, then push.
    ///
    /// # Arguments
    /// * `config` - Resolved configuration (assets, message, identity)
    /// * `release` - Branch, remote URL and release descriptors
    ///
    /// # Returns
    /// * `Ok(PublishOutcome)` - What was committed and pushed
    /// * `Err` - The first collaborator failure, unchanged
    pub fn publish(&self, config: &ResolvedConfig, release: &ReleaseContext) -> Result<PublishOutcome> {
        let modified = self.repo.list_modified_files()?;
        let resolution = resolve_files(
            config.assets.as_deref(),
            &modified,
            self.workspace,
            self.logger,
        )?;

        let mut outcome = PublishOutcome {
            warnings: resolution.warnings,
            ..Default::default()
        };

        if !resolution.files.is_empty() {
            let files = resolution.files;
            self.logger
                .log(format_args!("Found {} file(s) to commit", files.len()));

            self.repo.stage(&files)?;
            self.repo.set_config("user.name", &config.git_user_name)?;
            self.repo.set_config("user.email", &config.git_user_email)?;

            log::debug!("committed files: {:?}", files);
            let message = template::commit_message(config.message.as_deref(), release)?;
            self.repo.commit(&message)?;

            outcome.files = files;
            outcome.committed = true;
            outcome.message = Some(message);
        }

        let tag = &release.next_release.git_tag;
        if config.create_tag && !tag.is_empty() {
            self.repo.create_tag(tag)?;
            outcome.tag_created = true;
        }

        self.logger.log(format_args!("Creating tag {}", tag));
        self.repo.push(&release.repository_url, &release.branch)?;
        self.logger
            .log(format_args!("Published Git release: {}", tag));

        Ok(outcome)
    }
}
