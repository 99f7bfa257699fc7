//! Repository hygiene rules applied to staged files.
//!
//! Each rule is an independent predicate over a file's contents. The `check`
//! functions run one rule over a set of paths and return the violations as
//! [`Findings`], which the caller merges. Paths that no longer exist on disk
//! are skipped by every rule.

pub mod copyright;
pub mod format;
pub mod license;
pub mod test_hygiene;

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Error;

/// Languages with a rule set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Language {
    Go,
    Python,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Go, Language::Python];

    pub fn extension(self) -> &'static str {
        match self {
            Language::Go => "go",
            Language::Python => "py",
        }
    }

    /// Classify a path by its extension.
    pub fn of(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        Self::ALL.into_iter().find(|lang| lang.extension() == ext)
    }
}

/// Files touched by the pending commit, relative to the repository root.
#[derive(Debug, Clone, Default)]
pub struct ChangedFiles {
    paths: Vec<PathBuf>,
}

impl ChangedFiles {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Paths of one language, in staging order.
    pub fn of(&self, lang: Language) -> impl Iterator<Item = &Path> + '_ {
        self.paths
            .iter()
            .map(PathBuf::as_path)
            .filter(move |path| Language::of(path) == Some(lang))
    }

    /// Paths of any language with a rule set, in staging order.
    pub fn checked(&self) -> impl Iterator<Item = &Path> + '_ {
        self.paths
            .iter()
            .map(PathBuf::as_path)
            .filter(|path| Language::of(path).is_some())
    }
}

/// Kinds of aggregated rule violations, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Violation {
    MissingLicense,
    StaleCopyright,
    MissingSuiteHook,
    FocusedTest,
}

/// Violating files grouped by violation kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Findings {
    violations: BTreeMap<Violation, Vec<PathBuf>>,
}

impl Findings {
    pub fn record(&mut self, violation: Violation, path: impl Into<PathBuf>) {
        self.violations
            .entry(violation)
            .or_default()
            .push(path.into());
    }

    pub fn merge(&mut self, other: Findings) {
        for (violation, paths) in other.violations {
            self.violations.entry(violation).or_default().extend(paths);
        }
    }

    /// True when no rule was violated.
    pub fn is_clean(&self) -> bool {
        self.violations.values().all(Vec::is_empty)
    }

    pub fn files(&self, violation: Violation) -> &[PathBuf] {
        self.violations
            .get(&violation)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Non-empty violation groups in report order.
    pub fn iter(&self) -> impl Iterator<Item = (Violation, &[PathBuf])> {
        self.violations
            .iter()
            .filter(|(_, paths)| !paths.is_empty())
            .map(|(violation, paths)| (*violation, paths.as_slice()))
    }
}

/// Read a staged file, `None` if it is gone from disk or not a regular file.
pub fn read_source(root: &Path, path: &Path) -> Result<Option<String>, Error> {
    let full = root.join(path);
    if full.is_dir() {
        return Ok(None);
    }

    match fs::read(&full) {
        Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Run `violates` over every existing file in `paths`.
fn scan<'a, I, F>(
    root: &Path,
    paths: I,
    violation: Violation,
    violates: F,
) -> Result<Findings, Error>
where
    I: IntoIterator<Item = &'a Path>,
    F: Fn(&str) -> bool,
{
    let mut findings = Findings::default();

    for path in paths {
        let Some(contents) = read_source(root, path)? else {
            debug!(path = %path.display(), "Skipping file missing from disk");
            continue;
        };

        if violates(&contents) {
            debug!(path = %path.display(), ?violation, "Rule violated");
            findings.record(violation, path);
        }
    }

    Ok(findings)
}
