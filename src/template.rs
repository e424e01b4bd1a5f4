//! Commit message templates.
//!
//! A template refers to release data by dotted path, in any of three
//! placeholder styles:
//!
//! - `{{ nextRelease.version }}`
//! - `${nextRelease.version}`
//! - `<%= nextRelease.version %>`
//!
//! The variables in scope are `branch`, `lastRelease` and `nextRelease`.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::{json, Value};

use crate::domain::{NextRelease, ReleaseContext};
use crate::error::{ReleaseError, Result};

const PATH: &str = r"[A-Za-z_$][\w$]*(?:\.[A-Za-z_$][\w$]*)*";

static PLACEHOLDER: Lazy<std::result::Result<Regex, regex::Error>> = Lazy::new(|| {
    Regex::new(&format!(
        r"\{{\{{\s*({path})\s*\}}\}}|\$\{{\s*({path})\s*\}}|<%=\s*({path})\s*%>",
        path = PATH
    ))
});

// An opener directly followed by a variable path, left over once the
// complete placeholders are removed
static UNTERMINATED: Lazy<std::result::Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(&format!(r"(\{{\{{|\$\{{|<%=)\s*{path}", path = PATH)));

fn compiled(regex: &'static std::result::Result<Regex, regex::Error>) -> Result<&'static Regex> {
    match regex {
        Ok(re) => Ok(re),
        Err(e) => Err(ReleaseError::template(format!(
            "Invalid placeholder regex: {}",
            e
        ))),
    }
}

/// The default release commit message.
pub fn default_message(next: &NextRelease) -> String {
    format!(
        "chore(release): {} [skip ci]\n\n{}",
        next.version, next.notes
    )
}

/// Build the commit message: the configured template if any, else the default.
pub fn commit_message(template: Option<&str>, context: &ReleaseContext) -> Result<String> {
    match template {
        Some(template) => render(template, context),
        None => Ok(default_message(&context.next_release)),
    }
}

/// Render `template` against the release context.
///
/// An unknown top-level variable is an error; a missing nested key renders
/// as an empty string.
pub fn render(template: &str, context: &ReleaseContext) -> Result<String> {
    let re = compiled(&PLACEHOLDER)?;
    let scope = scope(context);

    let mut error = None;
    let rendered = re.replace_all(template, |caps: &Captures| {
        let path = placeholder_path(caps);
        match lookup(&scope, path) {
            Ok(text) => text,
            Err(e) => {
                error.get_or_insert(e);
                String::new()
            }
        }
    });

    match error {
        Some(e) => Err(e),
        None => Ok(rendered.into_owned()),
    }
}

/// Check that a template only uses well-formed placeholders over known variables.
///
/// Text that merely contains `{{`, `${` or `<%=` is accepted; only an opener
/// followed by a variable path and no closing delimiter is malformed.
pub fn validate(template: &str) -> Result<()> {
    let re = compiled(&PLACEHOLDER)?;

    for caps in re.captures_iter(template) {
        let path = placeholder_path(&caps);
        let root = path.split('.').next().unwrap_or(path);
        if !is_known_root(root) {
            return Err(ReleaseError::template(format!(
                "Unknown variable '{}' in message template",
                root
            )));
        }
    }

    let stripped = re.replace_all(template, "");
    if let Some(caps) = compiled(&UNTERMINATED)?.captures(&stripped) {
        return Err(ReleaseError::template(format!(
            "Malformed placeholder starting with '{}' in message template",
            &caps[1]
        )));
    }

    Ok(())
}

fn placeholder_path<'t>(caps: &Captures<'t>) -> &'t str {
    caps.get(1)
        .or_else(|| caps.get(2))
        .or_else(|| caps.get(3))
        .map(|m| m.as_str())
        .unwrap_or_default()
}

fn is_known_root(root: &str) -> bool {
    matches!(root, "branch" | "lastRelease" | "nextRelease")
}

fn scope(context: &ReleaseContext) -> Value {
    json!({
        "branch": context.branch,
        "lastRelease": context.last_release,
        "nextRelease": context.next_release,
    })
}

fn lookup(scope: &Value, path: &str) -> Result<String> {
    let mut segments = path.split('.');
    let root = segments.next().unwrap_or_default();

    let mut value = scope
        .get(root)
        .ok_or_else(|| ReleaseError::template(format!("'{}' is not defined", root)))?;

    for segment in segments {
        match value.get(segment) {
            Some(next) => value = next,
            None => return Ok(String::new()),
        }
    }

    Ok(match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    })
}
