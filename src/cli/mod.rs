//! Command-line workflow, independent of argument parsing

pub mod orchestration;

pub use orchestration::{
    release_context, run_publish_workflow, PublishWorkflowArgs, RepoDefaults, WorkflowResult,
};
