use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

use crate::domain::AssetPattern;
use crate::error::{ReleaseError, Result};

/// Committer name used when neither the configuration nor `GIT_USERNAME` provides one.
pub const DEFAULT_GIT_USER_NAME: &str = "git-release-bot";

/// Committer email used when neither the configuration nor `GIT_EMAIL` provides one.
pub const DEFAULT_GIT_USER_EMAIL: &str = "git-release-bot@users.noreply.github.com";

/// Represents the configuration file for git-release.
///
/// Every field is optional; unset values fall back to the defaults applied by
/// [`PluginConfig::resolve`].
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct PluginConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets: Option<AssetsConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, alias = "gitUserName", skip_serializing_if = "Option::is_none")]
    pub git_user_name: Option<String>,

    #[serde(default, alias = "gitUserEmail", skip_serializing_if = "Option::is_none")]
    pub git_user_email: Option<String>,

    #[serde(default, alias = "createTag")]
    pub create_tag: bool,
}

/// The `assets` setting as written in the configuration file.
///
/// `Many` must stay ahead of `One`: a top-level list is a list of entries,
/// never a single group.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum AssetsConfig {
    /// `assets = false` disables asset selection entirely.
    Toggle(bool),
    Many(Vec<AssetPattern>),
    One(AssetPattern),
}

/// Configuration with defaults applied, ready for the publish step.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// `None` means "probe for the default files"; `Some` (even empty) disables that.
    pub assets: Option<Vec<AssetPattern>>,
    pub message: Option<String>,
    pub git_user_name: String,
    pub git_user_email: String,
    pub create_tag: bool,
}

impl PluginConfig {
    /// Applies defaults and casts `assets` to a list.
    ///
    /// Identity values fall back to `GIT_USERNAME` / `GIT_EMAIL` and then to
    /// the built-in bot identity. An empty `assets` string selects nothing,
    /// like `false`; an empty `message` counts as unset.
    pub fn resolve(&self) -> ResolvedConfig {
        let assets = match &self.assets {
            None | Some(AssetsConfig::Toggle(true)) => None,
            Some(AssetsConfig::Toggle(false)) => Some(Vec::new()),
            Some(AssetsConfig::One(AssetPattern::Literal(glob))) if glob.is_empty() => {
                Some(Vec::new())
            }
            Some(AssetsConfig::One(pattern)) => Some(vec![pattern.clone()]),
            Some(AssetsConfig::Many(patterns)) => Some(patterns.clone()),
        };

        ResolvedConfig {
            assets,
            message: self.message.clone().filter(|m| !m.is_empty()),
            git_user_name: identity(&self.git_user_name, "GIT_USERNAME", DEFAULT_GIT_USER_NAME),
            git_user_email: identity(&self.git_user_email, "GIT_EMAIL", DEFAULT_GIT_USER_EMAIL),
            create_tag: self.create_tag,
        }
    }
}

fn identity(configured: &Option<String>, env_key: &str, default: &str) -> String {
    configured
        .clone()
        .filter(|value| !value.is_empty())
        .or_else(|| env::var(env_key).ok().filter(|value| !value.is_empty()))
        .unwrap_or_else(|| default.to_string())
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gitrelease.toml` in current directory
/// 3. `.gitrelease.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(PluginConfig)` - Loaded or default configuration
/// * `Err` - If an explicit path is missing, or a file cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<PluginConfig> {
    let config_str = if let Some(path) = config_path {
        if !Path::new(path).exists() {
            return Err(ReleaseError::config(format!(
                "Configuration file not found: {}",
                path
            )));
        }
        fs::read_to_string(path)?
    } else if Path::new("./gitrelease.toml").exists() {
        fs::read_to_string("./gitrelease.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".gitrelease.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(PluginConfig::default());
        }
    } else {
        return Ok(PluginConfig::default());
    };

    parse_config(&config_str)
}

/// Parses a TOML configuration document.
pub fn parse_config(content: &str) -> Result<PluginConfig> {
    let config: PluginConfig = toml::from_str(content)?;
    Ok(config)
}
