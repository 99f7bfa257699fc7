//! Copyright notice rule.

use std::path::Path;

use chrono::Datelike;
use regex::Regex;

use super::{scan, Findings, Violation};
use crate::error::Error;

/// Expected copyright notice for one run: owner plus current year.
#[derive(Debug, Clone)]
pub struct CopyrightPolicy {
    owner: String,
    year: i32,
    pattern: Regex,
}

impl CopyrightPolicy {
    pub fn new(owner: &str, year: i32) -> Result<Self, Error> {
        // Notice must sit on one line: `Copyright (c) <...year...> <owner>. All rights reserved.`
        let pattern = Regex::new(&format!(
            r"Copyright \(c\) .*{year}.* {owner}\. All rights reserved\.",
            year = year,
            owner = regex::escape(owner),
        ))?;

        Ok(Self {
            owner: owner.to_string(),
            year,
            pattern,
        })
    }

    /// Policy for the current local year.
    pub fn for_current_year(owner: &str) -> Result<Self, Error> {
        Self::new(owner, chrono::Local::now().year())
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn is_satisfied_by(&self, contents: &str) -> bool {
        self.pattern.is_match(contents)
    }

    /// Notice for a file created this year.
    pub fn new_file_example(&self) -> String {
        format!(
            "Copyright (c) {} {}. All rights reserved.",
            self.year, self.owner
        )
    }

    /// Notice for an older file touched this year.
    pub fn updated_file_example(&self) -> String {
        format!(
            "Copyright (c) {}-{} {}. All rights reserved.",
            self.year - 1,
            self.year,
            self.owner
        )
    }
}

/// Files without a current copyright notice.
pub fn check<'a>(
    root: &Path,
    paths: impl IntoIterator<Item = &'a Path>,
    policy: &CopyrightPolicy,
) -> Result<Findings, Error> {
    scan(root, paths, Violation::StaleCopyright, |contents| {
        !policy.is_satisfied_by(contents)
    })
}
