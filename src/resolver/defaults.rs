use crate::error::Result;
use crate::logger::Logger;
use crate::workspace::Workspace;

/// Files added to the release commit when no assets are configured,
/// in the order they are probed.
pub const DEFAULT_ASSETS: [&str; 4] = [
    "CHANGELOG.md",
    "package.json",
    "package-lock.json",
    "npm-shrinkwrap.json",
];

/// Returns the default assets that exist in the workspace, in table order.
///
/// Logs one line per file found. Finding none is not an error.
pub fn discover_default_assets<W, L>(workspace: &W, logger: &L) -> Result<Vec<String>>
where
    W: Workspace + ?Sized,
    L: Logger + ?Sized,
{
    let mut found = Vec::new();

    for file in DEFAULT_ASSETS {
        if workspace.path_exists(file)? {
            logger.log(format_args!("Add {} to the release commit", file));
            found.push(file.to_string());
        }
    }

    Ok(found)
}
