//! Human-readable diagnostics and remediation text.

use std::io::{self, Write};
use std::path::PathBuf;

use crate::checks::copyright::CopyrightPolicy;
use crate::checks::format::Misformatted;
use crate::checks::license::LICENSE_HEADER;
use crate::checks::test_hygiene::{FOCUS_MARKERS, SUITE_HOOK};
use crate::checks::{Findings, Violation};
use crate::config::{Settings, SettingsSource, SETTINGS_DIR, SETTINGS_FILE};

/// Final verdict of one gate run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    /// Formatting failure; no other rule ran.
    Misformatted(Misformatted),
    Failed(Findings),
}

impl Outcome {
    pub fn from_findings(findings: Findings) -> Self {
        if findings.is_clean() {
            Outcome::Passed
        } else {
            Outcome::Failed(findings)
        }
    }

    pub fn is_passed(&self) -> bool {
        matches!(self, Outcome::Passed)
    }
}

/// Write diagnostics for `outcome`. A passing run writes nothing.
///
/// `source` names where the expected copyright owner came from.
pub fn render(
    outcome: &Outcome,
    policy: &CopyrightPolicy,
    source: &SettingsSource,
    out: &mut impl Write,
) -> io::Result<()> {
    match outcome {
        Outcome::Passed => Ok(()),
        Outcome::Misformatted(bad) => render_misformatted(bad, out),
        Outcome::Failed(findings) => {
            for (violation, files) in findings.iter() {
                render_violation(violation, files, policy, source, out)?;
                writeln!(out)?;
            }
            Ok(())
        }
    }
}

fn render_misformatted(bad: &Misformatted, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{} is not formatted correctly:", bad.path.display())?;
    writeln!(out)?;
    write!(out, "{}", bad.diff)?;
    if !bad.diff.ends_with('\n') {
        writeln!(out)?;
    }
    writeln!(out)?;
    writeln!(
        out,
        "Formatting can be fixed automatically. Run `{}`, stage the result and commit again.",
        bad.fix
    )
}

fn render_violation(
    violation: Violation,
    files: &[PathBuf],
    policy: &CopyrightPolicy,
    source: &SettingsSource,
    out: &mut impl Write,
) -> io::Result<()> {
    let heading = match violation {
        Violation::MissingLicense => {
            "The following files are missing the Apache license header:"
        }
        Violation::StaleCopyright => {
            "The following files are missing an up-to-date copyright notice:"
        }
        Violation::MissingSuiteHook => {
            "The following test suites are missing the log hook:"
        }
        Violation::FocusedTest => {
            "The following test files contain focused tests:"
        }
    };

    writeln!(out, "{}", heading)?;
    for file in files {
        writeln!(out, "  {}", file.display())?;
    }
    writeln!(out)?;

    match violation {
        Violation::MissingLicense => {
            writeln!(out, "Add this header, in the file's comment syntax:")?;
            writeln!(out)?;
            for line in LICENSE_HEADER.lines() {
                if line.is_empty() {
                    writeln!(out)?;
                } else {
                    writeln!(out, "  {}", line)?;
                }
            }
        }
        Violation::StaleCopyright => {
            writeln!(out, "A new file should carry:")?;
            writeln!(out, "  {}", policy.new_file_example())?;
            writeln!(out, "An existing file should extend its year range, e.g.:")?;
            writeln!(out, "  {}", policy.updated_file_example())?;
            writeln!(out, "The owner ({}) comes from {}.", policy.owner(), source)?;
            writeln!(
                out,
                "Override it with copyright_owner in {}/{}.",
                SETTINGS_DIR, SETTINGS_FILE
            )?;
        }
        Violation::MissingSuiteHook => {
            writeln!(
                out,
                "Call {}() before RunSpecs in each suite; \
                 without it log output from the suite is lost.",
                SUITE_HOOK
            )?;
        }
        Violation::FocusedTest => {
            writeln!(
                out,
                "Remove `{}` before committing; a focused spec makes Ginkgo skip every other spec.",
                FOCUS_MARKERS.join("` and `")
            )?;
        }
    }

    Ok(())
}

/// Summary of the settings in effect, for `hookcheck settings`.
pub fn render_settings(
    settings: &Settings,
    source: &SettingsSource,
    out: &mut impl Write,
) -> io::Result<()> {
    writeln!(out, "Using {}", source)?;
    writeln!(out)?;
    match settings.to_toml() {
        Ok(text) => write!(out, "{}", text),
        Err(e) => writeln!(out, "copyright_owner = {:?} ({})", settings.copyright_owner, e),
    }
}
