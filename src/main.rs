use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use env_logger::{Builder, Env};

use git_release::cli::{run_publish_workflow, PublishWorkflowArgs};
use git_release::config;
use git_release::ui;

#[derive(clap::Parser)]
#[command(
    name = "git-release",
    version,
    about = "Commit changed release assets and push the release to the remote"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, default_value = ".", help = "Path inside the repository to release")]
    repo: PathBuf,

    #[arg(short, long, help = "Branch to push to (defaults to the current branch)")]
    branch: Option<String>,

    #[arg(long, help = "Remote repository URL (defaults to the 'origin' URL)")]
    repository_url: Option<String>,

    #[arg(long, help = "Version being released")]
    next_version: String,

    #[arg(long, help = "Release tag (defaults to v<version>)")]
    next_tag: Option<String>,

    #[arg(long, help = "Release commit (defaults to HEAD)")]
    next_head: Option<String>,

    #[arg(long, conflicts_with = "notes_file", help = "Release notes")]
    notes: Option<String>,

    #[arg(long, help = "Read release notes from a file")]
    notes_file: Option<PathBuf>,

    #[arg(long, help = "Version of the previous release")]
    last_version: Option<String>,

    #[arg(long, help = "Tag of the previous release")]
    last_tag: Option<String>,

    #[arg(long, help = "Commit of the previous release")]
    last_head: Option<String>,

    #[arg(long, help = "Verify configuration and release data, then exit")]
    verify_only: bool,
}

fn main() -> Result<()> {
    Builder::from_env(Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    // Load configuration
    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let notes = match (&args.notes, &args.notes_file) {
        (Some(notes), _) => notes.clone(),
        (None, Some(path)) => match fs::read_to_string(path) {
            Ok(notes) => notes,
            Err(e) => {
                ui::display_error(&format!(
                    "Cannot read notes file '{}': {}",
                    path.display(),
                    e
                ));
                std::process::exit(1);
            }
        },
        (None, None) => String::new(),
    };

    let workflow_args = PublishWorkflowArgs {
        repo_path: args.repo,
        branch: args.branch,
        repository_url: args.repository_url,
        next_version: args.next_version,
        next_tag: args.next_tag,
        next_head: args.next_head,
        notes,
        last_version: args.last_version,
        last_tag: args.last_tag,
        last_head: args.last_head,
        verify_only: args.verify_only,
    };

    let result = match run_publish_workflow(workflow_args, config) {
        Ok(result) => result,
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    match result.outcome {
        Some(outcome) => {
            for warning in &outcome.warnings {
                ui::display_warning(warning);
            }
            ui::display_publish_summary(&outcome, &result.branch);
            println!(
                "\n{} Published release {} on branch {}\n",
                console::style("✓").green(),
                result.tag,
                result.branch
            );
        }
        None => {
            ui::display_success(&format!(
                "Configuration and release {} for branch {} verified",
                result.tag, result.branch
            ));
        }
    }

    Ok(())
}
