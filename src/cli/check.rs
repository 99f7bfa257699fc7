//! Run the pre-commit gate.

use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use tokio::task::JoinError;
use tracing::{debug, info};

use crate::checks::copyright::{self, CopyrightPolicy};
use crate::checks::{format, license, test_hygiene, ChangedFiles, Findings, Language};
use crate::config::Settings;
use crate::error::Error;
use crate::formatter::{Formatter, Gofmt};
use crate::git::{DiffProvider, GitStaged};
use crate::guard::ExitGuard;
use crate::report::{self, Outcome};

/// Printed on every exit path except a clean pass.
pub const FAILURE_NOTICE: &str = "Pre-commit hook failed.";

/// Run the gate against the repository containing the working directory.
pub async fn run() -> ExitCode {
    let guard = ExitGuard::new(|| eprintln!("{}", FAILURE_NOTICE));

    let result = gate().await;
    let passed = conclude(&result, guard, &mut io::stderr().lock());

    if matches!(result, Err(Error::Interrupted)) {
        // The abandoned blocking task would otherwise hold up runtime shutdown.
        std::process::exit(1);
    }

    if passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Settle the run: report an aborting error to `out`, then disarm `guard`
/// only for a clean pass. Returns whether the commit may proceed.
fn conclude<F: FnOnce()>(
    result: &Result<bool, Error>,
    guard: ExitGuard<F>,
    out: &mut impl Write,
) -> bool {
    match result {
        Ok(true) => {
            guard.disarm();
            true
        }
        Ok(false) => false,
        Err(e) => {
            debug!(error = ?e, "Pre-commit checks aborted");
            // Nothing sensible to do if stderr itself is gone.
            let _ = writeln!(out, "hookcheck: {}", e);
            false
        }
    }
}

/// Run the checks on a blocking thread, giving up on Ctrl-C.
async fn gate() -> Result<bool, Error> {
    let cwd = std::env::current_dir()?;
    let checks = tokio::task::spawn_blocking(move || check_repository(&cwd));

    tokio::select! {
        joined = checks => settle(joined),
        _ = tokio::signal::ctrl_c() => Err(Error::Interrupted),
    }
}

/// Flatten the blocking task's result; a panicked task counts as a failed run.
fn settle(joined: Result<Result<bool, Error>, JoinError>) -> Result<bool, Error> {
    joined.map_err(|e| Error::other(format!("check run did not complete: {}", e)))?
}

/// Collect, check and report. Returns whether the commit may proceed.
fn check_repository(cwd: &Path) -> Result<bool, Error> {
    let git = GitStaged::discover(cwd)?;
    let (settings, source) = Settings::load(git.root())?;
    debug!(%source, owner = %settings.copyright_owner, "Loaded settings");

    let policy = CopyrightPolicy::for_current_year(&settings.copyright_owner)?;
    let outcome = evaluate(git.root(), &policy, &git, &Gofmt::default())?;

    let mut stderr = io::stderr().lock();
    report::render(&outcome, &policy, &source, &mut stderr)?;

    Ok(outcome.is_passed())
}

/// Apply every rule to the staged files under `root`.
///
/// Formatting runs first and ends the run on the first misformatted file.
/// Everything else is aggregated into [`Findings`].
pub fn evaluate(
    root: &Path,
    policy: &CopyrightPolicy,
    diff: &dyn DiffProvider,
    formatter: &dyn Formatter,
) -> Result<Outcome, Error> {
    let changed = ChangedFiles::new(diff.staged_files()?);
    info!(count = changed.len(), "Collected staged files");

    if let Some(bad) = format::first_misformatted(root, changed.of(Language::Go), formatter)? {
        info!(path = %bad.path.display(), tool = formatter.name(), "File is not formatted");
        return Ok(Outcome::Misformatted(bad));
    }

    let mut findings = Findings::default();
    findings.merge(license::check(root, changed.checked())?);
    findings.merge(copyright::check(root, changed.checked(), policy)?);
    findings.merge(test_hygiene::check_suite_hooks(root, changed.of(Language::Go))?);
    findings.merge(test_hygiene::check_focus(root, changed.of(Language::Go))?);

    Ok(Outcome::from_findings(findings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::license::LICENSE_HEADER;
    use crate::checks::Violation;
    use crate::config::SettingsSource;
    use std::cell::{Cell, RefCell};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const YEAR: i32 = 2026;

    /// Fixed list of staged paths.
    struct StaticDiff(Vec<PathBuf>);

    impl DiffProvider for StaticDiff {
        fn staged_files(&self) -> Result<Vec<PathBuf>, Error> {
            Ok(self.0.clone())
        }
    }

    /// Treats trailing whitespace as misformatting; records what it was asked about.
    #[derive(Default)]
    struct FakeFormatter {
        seen: RefCell<Vec<PathBuf>>,
    }

    impl Formatter for FakeFormatter {
        fn name(&self) -> &str {
            "fakefmt"
        }

        fn diff(&self, path: &Path) -> Result<Option<String>, Error> {
            self.seen.borrow_mut().push(path.to_path_buf());
            let contents = fs::read_to_string(path)?;
            Ok(contents
                .lines()
                .any(|line| line.ends_with(' ') || line.ends_with('\t'))
                .then(|| format!("diff {}\n", path.display())))
        }

        fn fix_command(&self, path: &Path) -> String {
            format!("fakefmt -w {}", path.display())
        }
    }

    fn header(prefix: &str, owner: &str) -> String {
        let mut text = format!(
            "{} Copyright (c) {} {}. All rights reserved.\n{}\n",
            prefix, YEAR, owner, prefix
        );
        for line in LICENSE_HEADER.lines() {
            if line.is_empty() {
                text.push_str(&format!("{}\n", prefix));
            } else {
                text.push_str(&format!("{} {}\n", prefix, line));
            }
        }
        text
    }

    fn go_file(body: &str) -> String {
        format!("{}\npackage sample\n\n{}", header("//", "Tigera, Inc"), body)
    }

    fn write(dir: &TempDir, name: &str, contents: &str) {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    fn staged(names: &[&str]) -> StaticDiff {
        StaticDiff(names.iter().map(PathBuf::from).collect())
    }

    fn policy() -> CopyrightPolicy {
        CopyrightPolicy::new("Tigera, Inc", YEAR).unwrap()
    }

    fn run_gate(dir: &TempDir, names: &[&str]) -> (Outcome, String) {
        let policy = policy();
        let outcome = evaluate(dir.path(), &policy, &staged(names), &FakeFormatter::default())
            .unwrap();
        let mut buf = Vec::new();
        report::render(&outcome, &policy, &SettingsSource::Defaults, &mut buf).unwrap();
        (outcome, String::from_utf8(buf).unwrap())
    }

    #[test]
    fn test_mixed_commit_scenario() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.py", &format!("{}\nprint('a')\n", header("#", "Tigera, Inc")));
        write(
            &dir,
            "b.go",
            "// Copyright (c) 2026 Tigera, Inc. All rights reserved.\n\npackage b\n",
        );
        write(
            &dir,
            "c_test.go",
            &go_file("var _ = FDescribe(\"c\", func() {})\n"),
        );

        let (outcome, text) = run_gate(&dir, &["a.py", "b.go", "c_test.go"]);

        let Outcome::Failed(findings) = &outcome else {
            panic!("expected aggregated failure, got {:?}", outcome);
        };
        assert_eq!(
            findings.files(Violation::MissingLicense),
            &[PathBuf::from("b.go")]
        );
        assert_eq!(
            findings.files(Violation::FocusedTest),
            &[PathBuf::from("c_test.go")]
        );
        assert!(findings.files(Violation::StaleCopyright).is_empty());
        assert!(!text.contains("a.py"));
        assert!(text.contains("  b.go\n"));
        assert!(text.contains("  c_test.go\n"));
    }

    #[test]
    fn test_clean_commit_passes() {
        let dir = TempDir::new().unwrap();
        write(&dir, "pkg/a.go", &go_file("func A() {}\n"));
        write(
            &dir,
            "pkg/pkg_suite_test.go",
            &go_file("func TestPkg(t *testing.T) {\n\ttestutils.HookLogrusForGinkgo()\n}\n"),
        );
        write(&dir, "README.md", "no header here\n");

        let (outcome, text) = run_gate(&dir, &["pkg/a.go", "pkg/pkg_suite_test.go", "README.md"]);

        assert!(outcome.is_passed());
        assert!(text.is_empty());
    }

    #[test]
    fn test_unchecked_extensions_never_inspected() {
        let dir = TempDir::new().unwrap();
        write(&dir, "notes.txt", "FIt( no header, trailing space \n");
        write(&dir, "x_test.rs", "FDescribe(\n");

        let formatter = FakeFormatter::default();
        let outcome = evaluate(
            dir.path(),
            &policy(),
            &staged(&["notes.txt", "x_test.rs"]),
            &formatter,
        )
        .unwrap();

        assert!(outcome.is_passed());
        assert!(formatter.seen.borrow().is_empty());
    }

    #[test]
    fn test_deleted_files_are_skipped() {
        let dir = TempDir::new().unwrap();
        write(&dir, "kept.go", &go_file("func K() {}\n"));

        let formatter = FakeFormatter::default();
        let outcome = evaluate(
            dir.path(),
            &policy(),
            &staged(&["kept.go", "gone.go", "gone_test.go", "gone_suite_test.go", "gone.py"]),
            &formatter,
        )
        .unwrap();

        assert!(outcome.is_passed());
        assert_eq!(*formatter.seen.borrow(), vec![dir.path().join("kept.go")]);
    }

    #[test]
    fn test_formatting_failure_short_circuits() {
        let dir = TempDir::new().unwrap();
        // Missing every header, but formatting is reported alone.
        write(&dir, "a.go", "package a\n\nfunc A() { \n}\n");
        write(&dir, "b.go", "package b\n");
        write(&dir, "b.py", "print('no header')\n");

        let (outcome, text) = run_gate(&dir, &["a.go", "b.go", "b.py"]);

        let Outcome::Misformatted(bad) = &outcome else {
            panic!("expected formatting failure, got {:?}", outcome);
        };
        assert_eq!(bad.path, PathBuf::from("a.go"));
        assert_eq!(bad.fix, "fakefmt -w a.go");
        assert!(text.contains("fakefmt -w a.go"));
        assert!(!text.contains("license"));
        assert!(!text.contains("b.py"));
    }

    #[test]
    fn test_suite_hook_required() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "felix_suite_test.go",
            &go_file("func TestFelix(t *testing.T) {\n\tRunSpecs(t, \"Felix\")\n}\n"),
        );

        let (outcome, text) = run_gate(&dir, &["felix_suite_test.go"]);

        let Outcome::Failed(findings) = &outcome else {
            panic!("expected aggregated failure, got {:?}", outcome);
        };
        assert_eq!(
            findings.files(Violation::MissingSuiteHook),
            &[PathBuf::from("felix_suite_test.go")]
        );
        assert!(text.contains("HookLogrusForGinkgo"));
    }

    #[test]
    fn test_stale_year_and_foreign_owner_fail() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "old.go",
            &go_file("").replace("2026", "2019"),
        );
        write(&dir, "acme.py", &header("#", "Acme Corp"));

        let (outcome, _) = run_gate(&dir, &["old.go", "acme.py"]);
        let Outcome::Failed(findings) = &outcome else {
            panic!("expected aggregated failure, got {:?}", outcome);
        };
        assert_eq!(
            findings.files(Violation::StaleCopyright),
            &[PathBuf::from("old.go"), PathBuf::from("acme.py")]
        );

        // The same file passes once the owner is configured.
        let acme = CopyrightPolicy::new("Acme Corp", YEAR).unwrap();
        let outcome =
            evaluate(dir.path(), &acme, &staged(&["acme.py"]), &FakeFormatter::default()).unwrap();
        assert!(outcome.is_passed());
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let dir = TempDir::new().unwrap();
        write(&dir, "b.go", "package b\n");
        write(&dir, "c_test.go", "FIt(\"x\", nil)\n");

        let first = run_gate(&dir, &["b.go", "c_test.go"]);
        let second = run_gate(&dir, &["b.go", "c_test.go"]);

        assert_eq!(first, second);
        assert!(!first.0.is_passed());
    }

    #[test]
    fn test_empty_commit_passes() {
        let dir = TempDir::new().unwrap();
        let (outcome, text) = run_gate(&dir, &[]);
        assert!(outcome.is_passed());
        assert!(text.is_empty());
    }

    #[test]
    fn test_clean_pass_disarms_guard() {
        let fired = Cell::new(false);
        let mut out = Vec::new();

        let passed = conclude(&Ok(true), ExitGuard::new(|| fired.set(true)), &mut out);

        assert!(passed);
        assert!(!fired.get());
        assert!(out.is_empty());
    }

    #[test]
    fn test_failed_checks_fire_guard() {
        let fired = Cell::new(false);
        let mut out = Vec::new();

        let passed = conclude(&Ok(false), ExitGuard::new(|| fired.set(true)), &mut out);

        assert!(!passed);
        assert!(fired.get());
    }

    #[test]
    fn test_aborting_error_is_reported_and_fires_guard() {
        let fired = Cell::new(false);
        let mut out = Vec::new();

        let result = Err(Error::NotARepository);
        let passed = conclude(&result, ExitGuard::new(|| fired.set(true)), &mut out);

        assert!(!passed);
        assert!(fired.get());
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "hookcheck: Not inside a git repository\n");
    }

    #[tokio::test]
    async fn test_panicked_check_task_fails_the_run() {
        let joined = tokio::task::spawn_blocking(|| -> Result<bool, Error> {
            panic!("check crashed");
        })
        .await;

        let result = settle(joined);
        assert!(matches!(result, Err(Error::Other(_))));

        let fired = Cell::new(false);
        let mut out = Vec::new();
        assert!(!conclude(&result, ExitGuard::new(|| fired.set(true)), &mut out));
        assert!(fired.get());
        assert!(String::from_utf8(out)
            .unwrap()
            .starts_with("hookcheck: check run did not complete"));
    }

    #[tokio::test]
    async fn test_settle_passes_task_result_through() {
        let joined = tokio::task::spawn_blocking(|| Ok(true)).await;
        assert!(matches!(settle(joined), Ok(true)));

        let joined = tokio::task::spawn_blocking(|| Err(Error::Interrupted)).await;
        assert!(matches!(settle(joined), Err(Error::Interrupted)));
    }
}
