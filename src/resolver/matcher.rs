//! Glob groups matched against the modified-file list.
//!
//! A group is an ordered list of globs where a leading `!` negates. The group
//! selects every file matching one of its positive globs and none of its
//! negated ones. Matching is case-sensitive, `*` stops at `/`, `**` crosses
//! directories, and dotfiles are matched like any other file.

use glob::{MatchOptions, Pattern};

use crate::error::Result;
use crate::warning::ResolveWarning;
use crate::workspace::Workspace;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Rewrites entries naming an existing directory to `<dir>/**`.
///
/// A leading `!` is kept on the rewritten entry. Entries that are not
/// directories, including globs, pass through untouched.
pub fn expand_directories<W>(group: &[String], workspace: &W) -> Result<Vec<String>>
where
    W: Workspace + ?Sized,
{
    let mut expanded = Vec::with_capacity(group.len());

    for entry in group {
        let (negation, body) = match entry.strip_prefix('!') {
            Some(body) => ("!", body),
            None => ("", entry.as_str()),
        };
        let dir = body.trim_end_matches('/');

        if !dir.is_empty() && workspace.is_dir(dir)? {
            expanded.push(format!("{}{}/**", negation, dir));
        } else {
            expanded.push(entry.clone());
        }
    }

    Ok(expanded)
}

/// Returns the files of `modified` selected by `group`.
///
/// Files come out grouped by positive glob, in `modified` order within each
/// glob, so the result may hold duplicates. Globs that fail to compile are
/// compared literally and reported in `warnings`.
pub fn match_group(
    modified: &[String],
    group: &[String],
    warnings: &mut Vec<ResolveWarning>,
) -> Vec<String> {
    let mut positive = Vec::new();
    let mut negative = Vec::new();

    for glob in group {
        match glob.strip_prefix('!') {
            Some(negated) => negative.push(CompiledGlob::new(negated, warnings)),
            None => positive.push(CompiledGlob::new(glob, warnings)),
        }
    }

    let mut matched: Vec<String> = positive
        .iter()
        .flat_map(|glob| modified.iter().filter(|file| glob.matches(file)))
        .cloned()
        .collect();

    matched.retain(|file| !negative.iter().any(|glob| glob.matches(file)));
    matched
}

/// Expands `{a,b}` alternatives into separate patterns.
///
/// Nested groups are supported. A brace pair without a top-level comma is
/// left as literal text.
pub fn expand_braces(pattern: &str) -> Vec<String> {
    let mut depth = 0usize;
    let mut open = None;

    for (i, c) in pattern.char_indices() {
        match c {
            '{' => {
                if depth == 0 {
                    open = Some(i);
                }
                depth += 1;
            }
            '}' if depth > 0 => {
                depth -= 1;
                if depth > 0 {
                    continue;
                }
                let Some(start) = open.take() else {
                    continue;
                };
                let alternatives = split_top_level(&pattern[start + 1..i]);
                if alternatives.len() < 2 {
                    continue;
                }

                let prefix = &pattern[..start];
                let suffix = &pattern[i + 1..];
                return alternatives
                    .iter()
                    .flat_map(|alt| expand_braces(&format!("{}{}{}", prefix, alt, suffix)))
                    .collect();
            }
            _ => {}
        }
    }

    vec![pattern.to_string()]
}

fn split_top_level(inner: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in inner.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&inner[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&inner[start..]);
    parts
}

/// One glob, possibly brace-expanded into several patterns
struct CompiledGlob {
    patterns: Vec<Pattern>,
    literals: Vec<String>,
}

impl CompiledGlob {
    fn new(source: &str, warnings: &mut Vec<ResolveWarning>) -> Self {
        let source = source.strip_prefix("./").unwrap_or(source);
        let mut patterns = Vec::new();
        let mut literals = Vec::new();

        for alternative in expand_braces(source) {
            match Pattern::new(&alternative) {
                Ok(pattern) => patterns.push(pattern),
                Err(e) => {
                    log::debug!("glob {:?} does not compile: {}", alternative, e);
                    warnings.push(ResolveWarning::InvalidGlob {
                        pattern: alternative.clone(),
                        reason: e.msg.to_string(),
                    });
                    literals.push(alternative);
                }
            }
        }

        CompiledGlob { patterns, literals }
    }

    fn matches(&self, path: &str) -> bool {
        self.patterns
            .iter()
            .any(|pattern| pattern.matches_with(path, MATCH_OPTIONS))
            || self.literals.iter().any(|literal| literal == path)
    }
}
