//! Show the settings in effect.

use crate::config::{Settings, SettingsSource};
use crate::error::Error;
use crate::git::GitStaged;
use crate::report;

/// Print the effective settings and where they came from.
pub fn show() -> Result<(), Error> {
    let cwd = std::env::current_dir()?;
    // Outside a repository only the user settings can apply.
    let root = GitStaged::discover(&cwd)
        .map(|repo| repo.root().to_path_buf())
        .unwrap_or(cwd);

    let (settings, source) = Settings::load(&root)?;
    report::render_settings(&settings, &source, &mut std::io::stdout().lock())?;

    if source == SettingsSource::Defaults {
        println!();
        println!("Override per project at:");
        println!("  {}", Settings::project_path(&root).display());
        if let Some(global) = Settings::global_path() {
            println!("or for every repository at:");
            println!("  {}", global.display());
        }
    }

    Ok(())
}
