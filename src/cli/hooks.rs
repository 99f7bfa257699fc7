//! Git pre-commit hook installation and removal.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Error;
use crate::git::GitStaged;

/// The line that runs the gate; its presence means the hook is installed.
const HOOK_LINE: &str = "hookcheck check || exit 1";

/// Pre-commit hook script content.
const PRE_COMMIT_HOOK: &str = r#"#!/bin/sh
# hookcheck pre-commit gate (auto-installed)
# Blocks the commit on formatting, header or test hygiene failures

hookcheck check || exit 1
"#;

/// Result of an install request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Installed {
    Created,
    Appended,
    Replaced,
    AlreadyPresent,
}

/// Install the hook into the repository containing the working directory.
pub fn install(force: bool) -> Result<(), Error> {
    let repo = GitStaged::discover(&std::env::current_dir()?)?;
    let path = hook_path(repo.root())?;

    match install_hook(&path, force)? {
        Installed::Created => println!("Installed pre-commit hook at {}", path.display()),
        Installed::Appended => println!(
            "Added hookcheck to the existing pre-commit hook at {}",
            path.display()
        ),
        Installed::Replaced => println!("Replaced pre-commit hook at {}", path.display()),
        Installed::AlreadyPresent => println!("Pre-commit hook already runs hookcheck."),
    }

    Ok(())
}

/// Remove the hook from the repository containing the working directory.
pub fn uninstall() -> Result<(), Error> {
    let repo = GitStaged::discover(&std::env::current_dir()?)?;
    let path = hook_path(repo.root())?;

    if uninstall_hook(&path)? {
        println!("Removed hookcheck from {}", path.display());
    } else {
        println!("No hookcheck pre-commit hook installed.");
    }

    Ok(())
}

/// Location of the pre-commit hook for a working tree.
fn hook_path(root: &Path) -> Result<PathBuf, Error> {
    let git_dir = root.join(".git");
    if !git_dir.is_dir() {
        return Err(Error::other(format!(
            "{} is not a git directory (worktrees and submodules are not supported)",
            git_dir.display()
        )));
    }
    Ok(git_dir.join("hooks").join("pre-commit"))
}

/// Write the hook, preserving a foreign hook unless `force` is set.
pub fn install_hook(path: &Path, force: bool) -> Result<Installed, Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let (content, status) = if path.exists() {
        let existing = fs::read_to_string(path)?;

        if force {
            (PRE_COMMIT_HOOK.to_string(), Installed::Replaced)
        } else if has_hook_line(&existing) {
            return Ok(Installed::AlreadyPresent);
        } else {
            // Append to existing hook, dropping our shebang.
            let ours = PRE_COMMIT_HOOK.trim_start_matches("#!/bin/sh\n");
            (
                format!("{}\n\n{}", existing.trim_end(), ours),
                Installed::Appended,
            )
        }
    } else {
        (PRE_COMMIT_HOOK.to_string(), Installed::Created)
    };

    fs::write(path, &content)?;
    make_executable(path)?;
    info!(path = %path.display(), ?status, "Installed pre-commit hook");

    Ok(status)
}

/// Whether a hook script already runs the gate. Mentions in comments or
/// other commands don't count.
fn has_hook_line(script: &str) -> bool {
    script.lines().any(|line| line.trim() == HOOK_LINE)
}

/// Strip our lines from the hook. Returns whether anything was removed.
pub fn uninstall_hook(path: &Path) -> Result<bool, Error> {
    if !path.exists() {
        return Ok(false);
    }

    let content = fs::read_to_string(path)?;
    if !has_hook_line(&content) {
        return Ok(false);
    }

    let cleaned = remove_hookcheck_section(&content);
    if cleaned.trim().is_empty() || cleaned.trim() == "#!/bin/sh" {
        fs::remove_file(path)?;
    } else {
        fs::write(path, format!("{}\n", cleaned.trim_end()))?;
    }
    info!(path = %path.display(), "Removed hookcheck hook");

    Ok(true)
}

/// Remove hookcheck lines and the comment block they came with.
fn remove_hookcheck_section(content: &str) -> String {
    PRE_COMMIT_HOOK
        .lines()
        .filter(|line| !line.is_empty() && *line != "#!/bin/sh")
        .fold(content.to_string(), |acc, ours| {
            acc.lines()
                .filter(|line| *line != ours)
                .collect::<Vec<_>>()
                .join("\n")
        })
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<(), Error> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms)?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<(), Error> {
    Ok(())
}
