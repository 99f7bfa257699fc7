//! Formatting rule. Unlike the other rules this one stops at the first hit.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Error;
use crate::formatter::Formatter;

/// A file whose contents differ from the formatter's canonical output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Misformatted {
    pub path: PathBuf,
    pub diff: String,
    pub fix: String,
}

/// First file in `paths` the formatter would change.
pub fn first_misformatted<'a>(
    root: &Path,
    paths: impl IntoIterator<Item = &'a Path>,
    formatter: &dyn Formatter,
) -> Result<Option<Misformatted>, Error> {
    for path in paths {
        let full = root.join(path);
        if !full.is_file() {
            debug!(path = %path.display(), "Skipping file missing from disk");
            continue;
        }

        if let Some(diff) = formatter.diff(&full)? {
            return Ok(Some(Misformatted {
                path: path.to_path_buf(),
                diff,
                fix: formatter.fix_command(path),
            }));
        }
    }

    Ok(None)
}
