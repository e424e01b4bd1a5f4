pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod logger;
pub mod publish;
pub mod resolver;
pub mod template;
pub mod ui;
pub mod verify;
pub mod warning;
pub mod workspace;

pub use error::{ReleaseError, Result};
