//! Up-front checks on configuration and release data.
//!
//! Run before anything touches the repository, so a bad configuration fails
//! without leaving a half-made release behind.

use crate::config::{AssetsConfig, PluginConfig};
use crate::domain::{AssetPattern, ReleaseContext};
use crate::error::{ReleaseError, Result};
use crate::template;

/// Validates the plugin configuration.
///
/// # Returns
/// * `Ok(())` - The configuration is usable
/// * `Err(ReleaseError::Verify)` - Naming the first offending value
pub fn verify_config(config: &PluginConfig) -> Result<()> {
    match &config.assets {
        None | Some(AssetsConfig::Toggle(false)) => {}
        Some(AssetsConfig::Toggle(true)) => {
            return Err(ReleaseError::verify(
                "'assets' must be a glob, a list of globs or false, got true",
            ));
        }
        // A lone empty string selects nothing
        Some(AssetsConfig::One(AssetPattern::Literal(glob))) if glob.is_empty() => {}
        Some(AssetsConfig::One(pattern)) => verify_asset(pattern)?,
        Some(AssetsConfig::Many(patterns)) => {
            for pattern in patterns {
                verify_asset(pattern)?;
            }
        }
    }

    // An empty message counts as unset
    if let Some(message) = config.message.as_deref().filter(|m| !m.is_empty()) {
        if message.trim().is_empty() {
            return Err(ReleaseError::verify("'message' must be a non-empty string"));
        }
        template::validate(message)
            .map_err(|e| ReleaseError::verify(format!("invalid 'message': {}", e)))?;
    }

    Ok(())
}

fn verify_asset(pattern: &AssetPattern) -> Result<()> {
    let globs = pattern.normalize();

    if globs.is_empty() {
        return Err(ReleaseError::verify(format!(
            "asset {:?} must contain at least one glob",
            pattern
        )));
    }

    if let Some(blank) = globs
        .iter()
        .find(|glob| glob.trim().is_empty() || glob.as_str() == "!")
    {
        return Err(ReleaseError::verify(format!(
            "asset {:?} contains an empty glob {:?}",
            pattern, blank
        )));
    }

    Ok(())
}

/// Validates the release context before publishing.
pub fn verify_release(release: &ReleaseContext) -> Result<()> {
    if release.branch.trim().is_empty() {
        return Err(ReleaseError::verify("branch must not be empty"));
    }

    if release.repository_url.trim().is_empty() {
        return Err(ReleaseError::verify("repository URL must not be empty"));
    }

    semver::Version::parse(&release.next_release.version).map_err(|e| {
        ReleaseError::verify(format!(
            "next release version '{}' is not a semantic version: {}",
            release.next_release.version, e
        ))
    })?;

    let last = &release.last_release.version;
    if !last.is_empty() {
        semver::Version::parse(last).map_err(|e| {
            ReleaseError::verify(format!(
                "last release version '{}' is not a semantic version: {}",
                last, e
            ))
        })?;
    }

    Ok(())
}
