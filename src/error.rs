//! Error types for hookcheck.

use std::path::PathBuf;

use thiserror::Error;

/// Hookcheck error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings in {}: {message}", .path.display())]
    SettingsParse { path: PathBuf, message: String },

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("git {args} failed: {stderr}")]
    Git { args: String, stderr: String },

    #[error("Could not run {tool} on {}: {source}", .path.display())]
    Formatter {
        tool: String,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Not inside a git repository")]
    NotARepository,

    #[error("Interrupted")]
    Interrupted,

    #[error("{0}")]
    Other(String),
}

impl Error {
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }
}
