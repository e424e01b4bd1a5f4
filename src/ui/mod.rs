//! User interface module - terminal output for the release run.

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_error, display_publish_summary, display_status, display_success, display_warning,
    format_file_list,
};
