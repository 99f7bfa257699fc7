//! Ginkgo test hygiene: suite log hook and focus markers.

use std::path::Path;

use super::{scan, Findings, Violation};
use crate::error::Error;

/// Generic Go test file suffix.
pub const TEST_SUFFIX: &str = "_test.go";

/// Generated Ginkgo suite entry point suffix.
pub const SUITE_SUFFIX: &str = "_suite_test.go";

/// Call that routes logrus output into Ginkgo's reporter.
pub const SUITE_HOOK: &str = "HookLogrusForGinkgo";

/// Markers that make Ginkgo run only the marked specs.
pub const FOCUS_MARKERS: [&str; 2] = ["FDescribe(", "FIt("];

fn file_name_ends_with(path: &Path, suffix: &str) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(suffix))
}

pub fn is_test_file(path: &Path) -> bool {
    file_name_ends_with(path, TEST_SUFFIX)
}

pub fn is_suite_file(path: &Path) -> bool {
    file_name_ends_with(path, SUITE_SUFFIX)
}

pub fn has_focus_marker(contents: &str) -> bool {
    FOCUS_MARKERS.iter().any(|marker| contents.contains(marker))
}

/// Suite entry points that never install the log hook.
pub fn check_suite_hooks<'a>(
    root: &Path,
    paths: impl IntoIterator<Item = &'a Path>,
) -> Result<Findings, Error> {
    let suites = paths.into_iter().filter(|path| is_suite_file(path));
    scan(root, suites, Violation::MissingSuiteHook, |contents| {
        !contents.contains(SUITE_HOOK)
    })
}

/// Test files with a focused spec or container.
pub fn check_focus<'a>(
    root: &Path,
    paths: impl IntoIterator<Item = &'a Path>,
) -> Result<Findings, Error> {
    let tests = paths.into_iter().filter(|path| is_test_file(path));
    scan(root, tests, Violation::FocusedTest, has_focus_marker)
}
