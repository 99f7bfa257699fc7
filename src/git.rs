//! Staged file discovery via git.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::Error;

/// Source of the file paths touched by the pending commit.
pub trait DiffProvider {
    /// Staged paths, relative to the repository root, in git's order.
    fn staged_files(&self) -> Result<Vec<PathBuf>, Error>;
}

/// Reads the git index of a working tree.
#[derive(Debug, Clone)]
pub struct GitStaged {
    root: PathBuf,
}

impl GitStaged {
    /// Use `root` as the top level of the working tree.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Find the top level of the working tree containing `start`.
    pub fn discover(start: &Path) -> Result<Self, Error> {
        let toplevel = git(start, &["rev-parse", "--show-toplevel"]).map_err(|e| match e {
            Error::Git { .. } => Error::NotARepository,
            other => other,
        })?;

        let root = PathBuf::from(toplevel.trim());
        debug!(root = %root.display(), "Found repository root");
        Ok(Self::new(root))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl DiffProvider for GitStaged {
    fn staged_files(&self) -> Result<Vec<PathBuf>, Error> {
        // Added, copied, modified, renamed (listed under the new name).
        // Deleted files have nothing left to check.
        let output = git(
            &self.root,
            &[
                "-c",
                "core.quotePath=false",
                "diff",
                "--cached",
                "--name-only",
                "--diff-filter=ACMR",
            ],
        )?;
        Ok(parse_name_list(&output))
    }
}

/// Split `git diff --name-only` output into paths.
pub fn parse_name_list(output: &str) -> Vec<PathBuf> {
    output
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect()
}

/// Run git in `dir` and return its stdout.
fn git(dir: &Path, args: &[&str]) -> Result<String, Error> {
    let output = Command::new("git").args(args).current_dir(dir).output()?;

    if !output.status.success() {
        return Err(Error::Git {
            args: args.join(" "),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
