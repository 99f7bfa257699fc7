//! CLI commands for hookcheck.

pub mod check;
pub mod hooks;
pub mod settings;

use clap::{Parser, Subcommand};

/// hookcheck - pre-commit gate for formatting, headers and test hygiene
#[derive(Parser)]
#[command(name = "hookcheck")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check staged files (the default when no command is given)
    Check,

    /// Install the git pre-commit hook
    Install {
        /// Replace an existing pre-commit hook instead of appending to it
        #[arg(long, short)]
        force: bool,
    },

    /// Remove the git pre-commit hook
    Uninstall,

    /// Show the settings in effect
    Settings,
}
