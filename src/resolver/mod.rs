//! Asset resolution - which modified files go into the release commit
//!
//! Resolution runs as a fixed pipeline:
//!
//! 1. Probe for [DEFAULT_ASSETS] when no assets are configured
//! 2. Normalize configured entries into glob groups
//! 3. Expand directory entries and match each group against the modified files
//! 4. Deduplicate, keeping first occurrences
//!
//! The result is always a subset of the modified files: patterns select
//! files, they never introduce them.

pub mod defaults;
pub mod matcher;

pub use defaults::{discover_default_assets, DEFAULT_ASSETS};
pub use matcher::{expand_braces, expand_directories, match_group};

use std::collections::HashSet;

use crate::domain::AssetPattern;
use crate::error::Result;
use crate::logger::Logger;
use crate::warning::ResolveWarning;
use crate::workspace::Workspace;

/// Outcome of resolving asset patterns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    /// Files to commit, each once, in order of first match
    pub files: Vec<String>,
    /// Non-fatal issues met along the way
    pub warnings: Vec<ResolveWarning>,
}

/// Builds the ordered list of glob groups to match.
///
/// Defaults are probed only when `assets` is `None`; a configured list, even
/// an empty one, replaces them entirely.
pub fn collect_patterns<W, L>(
    assets: Option<&[AssetPattern]>,
    workspace: &W,
    logger: &L,
) -> Result<Vec<Vec<String>>>
where
    W: Workspace + ?Sized,
    L: Logger + ?Sized,
{
    let mut patterns: Vec<Vec<String>> = Vec::new();

    match assets {
        None => {
            for file in discover_default_assets(workspace, logger)? {
                patterns.push(vec![file]);
            }
        }
        Some(assets) => patterns.extend(assets.iter().map(AssetPattern::normalize)),
    }

    Ok(patterns)
}

/// Resolves the configured assets against the modified files.
pub fn resolve_files<W, L>(
    assets: Option<&[AssetPattern]>,
    modified: &[String],
    workspace: &W,
    logger: &L,
) -> Result<Resolution>
where
    W: Workspace + ?Sized,
    L: Logger + ?Sized,
{
    let mut warnings = Vec::new();
    let mut matched = Vec::new();

    for group in collect_patterns(assets, workspace, logger)? {
        if group.is_empty() {
            continue;
        }

        // A lone negation would select every other modified file.
        if let [only] = group.as_slice() {
            if only.starts_with('!') {
                log::debug!(
                    "skipping the negated glob {:?} as it is alone in its group and would retrieve a large amount of files",
                    only
                );
                warnings.push(ResolveWarning::LoneNegatedPattern {
                    pattern: only.clone(),
                });
                continue;
            }
        }

        let expanded = expand_directories(&group, workspace)?;
        let found = match_group(modified, &expanded, &mut warnings);
        if found.is_empty() {
            warnings.push(ResolveWarning::UnmatchedPattern { patterns: group });
        }
        matched.extend(found);
    }

    Ok(Resolution {
        files: dedup_preserving_order(matched),
        warnings,
    })
}

/// Removes repeated paths, keeping the first occurrence of each.
pub fn dedup_preserving_order(paths: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    paths
        .into_iter()
        .filter(|path| seen.insert(path.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::RecordingLogger;
    use crate::workspace::MemoryWorkspace;

    fn files(paths: &[&str]) -> Vec<String> {
        paths.iter().map(|p| p.to_string()).collect()
    }

    fn resolve(
        assets: Option<Vec<AssetPattern>>,
        modified: &[&str],
        workspace: &MemoryWorkspace,
    ) -> Resolution {
        resolve_files(
            assets.as_deref(),
            &files(modified),
            workspace,
            &RecordingLogger::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_defaults_only_changelog_present() {
        let workspace = MemoryWorkspace::new().with_file("CHANGELOG.md");
        let resolution = resolve(None, &["CHANGELOG.md", "src/a.js", "dist/a.js"], &workspace);
        assert_eq!(resolution.files, vec!["CHANGELOG.md"]);
    }

    #[test]
    fn test_defaults_skipped_when_assets_configured() {
        let workspace = MemoryWorkspace::new()
            .with_file("CHANGELOG.md")
            .with_file("package.json");
        let resolution = resolve(
            Some(vec![AssetPattern::literal("dist/*.js")]),
            &["CHANGELOG.md", "package.json", "dist/a.js"],
            &workspace,
        );
        assert_eq!(resolution.files, vec!["dist/a.js"]);
    }

    #[test]
    fn test_empty_assets_select_nothing() {
        let workspace = MemoryWorkspace::new().with_file("CHANGELOG.md");
        let resolution = resolve(Some(vec![]), &["CHANGELOG.md", "a.txt"], &workspace);
        assert!(resolution.files.is_empty());
    }

    #[test]
    fn test_glob_keeps_first_occurrence_order() {
        let resolution = resolve(
            Some(vec![AssetPattern::literal("*.txt")]),
            &["a.txt", "b.txt"],
            &MemoryWorkspace::new(),
        );
        assert_eq!(resolution.files, vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn test_lone_negation_contributes_nothing() {
        let resolution = resolve(
            Some(vec![AssetPattern::group(["!**/*.js"])]),
            &["a.css", "b.md", "c.js"],
            &MemoryWorkspace::new(),
        );
        assert!(resolution.files.is_empty());
        assert_eq!(
            resolution.warnings,
            vec![ResolveWarning::LoneNegatedPattern {
                pattern: "!**/*.js".to_string()
            }]
        );
    }

    #[test]
    fn test_lone_negated_literal_contributes_nothing() {
        let resolution = resolve(
            Some(vec![AssetPattern::literal("!*.js"), AssetPattern::literal("*.css")]),
            &["a.css", "b.js"],
            &MemoryWorkspace::new(),
        );
        assert_eq!(resolution.files, vec!["a.css"]);
    }

    #[test]
    fn test_overlapping_patterns_are_deduplicated() {
        let resolution = resolve(
            Some(vec![
                AssetPattern::literal("dist/**"),
                AssetPattern::literal("**/*.js"),
                AssetPattern::structured("dist/app.js"),
            ]),
            &["dist/app.js", "dist/app.css", "src/index.js"],
            &MemoryWorkspace::new(),
        );
        assert_eq!(
            resolution.files,
            vec!["dist/app.js", "dist/app.css", "src/index.js"]
        );
    }

    #[test]
    fn test_directory_asset_expands() {
        let workspace = MemoryWorkspace::new().with_file("dist/app.js");
        let resolution = resolve(
            Some(vec![AssetPattern::literal("dist")]),
            &["dist/app.js", "dist/css/app.css", "src/a.js"],
            &workspace,
        );
        assert_eq!(resolution.files, vec!["dist/app.js", "dist/css/app.css"]);
    }

    #[test]
    fn test_untracked_directory_asset_expands() {
        let workspace = MemoryWorkspace::new().with_dir("build");
        let resolution = resolve(
            Some(vec![AssetPattern::literal("build/")]),
            &["build/out.js", "build/maps/out.js.map", "buildinfo.txt"],
            &workspace,
        );
        assert_eq!(
            resolution.files,
            vec!["build/out.js", "build/maps/out.js.map"]
        );
    }

    #[test]
    fn test_group_with_negated_directory() {
        let workspace = MemoryWorkspace::new().with_file("src/vendor/lib.js");
        let resolution = resolve(
            Some(vec![AssetPattern::group(["src/**/*.js", "!src/vendor"])]),
            &["src/a.js", "src/vendor/lib.js"],
            &workspace,
        );
        assert_eq!(resolution.files, vec!["src/a.js"]);
    }

    #[test]
    fn test_resolution_is_subset_of_modified() {
        let modified = ["a.txt", "b/c.txt", ".hidden"];
        let resolution = resolve(
            Some(vec![
                AssetPattern::literal("**"),
                AssetPattern::literal("missing.txt"),
            ]),
            &modified,
            &MemoryWorkspace::new(),
        );
        assert!(resolution
            .files
            .iter()
            .all(|file| modified.contains(&file.as_str())));
        assert!(!resolution.files.contains(&"missing.txt".to_string()));
        assert!(resolution.warnings.contains(&ResolveWarning::UnmatchedPattern {
            patterns: vec!["missing.txt".to_string()]
        }));
    }

    #[test]
    fn test_empty_group_is_ignored() {
        let resolution = resolve(
            Some(vec![AssetPattern::Group(vec![])]),
            &["a.txt"],
            &MemoryWorkspace::new(),
        );
        assert!(resolution.files.is_empty());
        assert!(resolution.warnings.is_empty());
    }

    #[test]
    fn test_dedup_preserving_order() {
        let deduped = dedup_preserving_order(files(&["b", "a", "b", "c", "a"]));
        assert_eq!(deduped, vec!["b", "a", "c"]);
    }
}
