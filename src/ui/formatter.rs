//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic. Functions here have no
//! side effects beyond printing, and the string builders are testable on
//! their own.

use console::style;

use crate::publish::PublishOutcome;
use crate::warning::ResolveWarning;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a resolution warning to the user.
pub fn display_warning(warning: &ResolveWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Build the list of files going into the release commit.
///
/// Shows at most 10 entries; longer lists end with a count of the remainder.
pub fn format_file_list(files: &[String]) -> String {
    if files.is_empty() {
        return "  (no files)".to_string();
    }

    let mut lines: Vec<String> = files
        .iter()
        .take(10)
        .map(|file| format!("  - {}", file))
        .collect();

    if files.len() > 10 {
        lines.push(format!("  ... and {} more files", files.len() - 10));
    }

    lines.join("\n")
}

/// Display the result of a publish run.
///
/// # Arguments
/// * `outcome` - What the publish step did
/// * `branch` - The branch that was pushed
pub fn display_publish_summary(outcome: &PublishOutcome, branch: &str) {
    if outcome.committed {
        println!("\n{}", style("Release commit:").bold());
        println!("{}", format_file_list(&outcome.files));
    } else {
        display_status("No release files changed, nothing was committed");
    }

    display_success(&format!("Pushed branch {} to remote", branch));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_file_list_empty() {
        assert_eq!(format_file_list(&[]), "  (no files)");
    }

    #[test]
    fn test_format_file_list_short() {
        let files = vec!["CHANGELOG.md".to_string(), "package.json".to_string()];
        assert_eq!(
            format_file_list(&files),
            "  - CHANGELOG.md\n  - package.json"
        );
    }

    #[test]
    fn test_format_file_list_truncates() {
        let files: Vec<String> = (0..13).map(|i| format!("dist/{}.js", i)).collect();
        let output = format_file_list(&files);
        assert!(output.contains("  - dist/9.js"));
        assert!(!output.contains("dist/10.js"));
        assert!(output.ends_with("... and 3 more files"));
    }

    #[test]
    fn test_display_status() {
        // Visual verification test - output is printed to stdout
        display_status("test status");
    }
}
