//! External source formatter, run in non-mutating diff mode.

use std::path::Path;
use std::process::Command;

use tracing::debug;

use crate::error::Error;

/// A canonical formatter for one language.
pub trait Formatter {
    /// Tool name shown in remediation text.
    fn name(&self) -> &str;

    /// Difference between `path` and its canonical form, `None` when clean.
    fn diff(&self, path: &Path) -> Result<Option<String>, Error>;

    /// Command the user should run to fix `path`.
    fn fix_command(&self, path: &Path) -> String;
}

/// `gofmt -d`.
#[derive(Debug, Clone)]
pub struct Gofmt {
    program: String,
}

impl Default for Gofmt {
    fn default() -> Self {
        Self::new("gofmt")
    }
}

impl Gofmt {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Formatter for Gofmt {
    fn name(&self) -> &str {
        &self.program
    }

    fn diff(&self, path: &Path) -> Result<Option<String>, Error> {
        let output = Command::new(&self.program)
            .arg("-d")
            .arg(path)
            .output()
            .map_err(|source| Error::Formatter {
                tool: self.program.clone(),
                path: path.to_path_buf(),
                source,
            })?;

        let mut report = String::from_utf8_lossy(&output.stdout).into_owned();
        // A file gofmt cannot parse is reported on stderr with a non-zero exit.
        if !output.status.success() {
            report.push_str(&String::from_utf8_lossy(&output.stderr));
            if report.trim().is_empty() {
                report = format!("{} exited with {}", self.program, output.status);
            }
        }

        debug!(path = %path.display(), clean = report.trim().is_empty(), "Ran formatter");

        if report.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(report))
        }
    }

    fn fix_command(&self, path: &Path) -> String {
        format!("{} -w {}", self.program, path.display())
    }
}
