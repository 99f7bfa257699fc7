//! Settings for hookcheck.
//!
//! Settings live in `.hookcheck/settings.toml` at the repository root, falling
//! back to `~/.hookcheck/settings.toml`, falling back to built-in defaults.
//! A missing file is never an error; a malformed one is.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Directory holding the settings file, both per project and per user.
pub const SETTINGS_DIR: &str = ".hookcheck";

/// Settings file name inside [`SETTINGS_DIR`].
pub const SETTINGS_FILE: &str = "settings.toml";

/// Overridable policy parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Legal holder expected in every copyright notice.
    #[serde(default = "default_copyright_owner")]
    pub copyright_owner: String,
}

fn default_copyright_owner() -> String {
    "Tigera, Inc".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            copyright_owner: default_copyright_owner(),
        }
    }
}

/// Where the effective settings came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsSource {
    Project(PathBuf),
    Global(PathBuf),
    Defaults,
}

impl fmt::Display for SettingsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsSource::Project(path) => write!(f, "project settings ({})", path.display()),
            SettingsSource::Global(path) => write!(f, "user settings ({})", path.display()),
            SettingsSource::Defaults => write!(f, "built-in defaults"),
        }
    }
}

impl Settings {
    /// Project settings path for a repository root.
    pub fn project_path(root: &Path) -> PathBuf {
        root.join(SETTINGS_DIR).join(SETTINGS_FILE)
    }

    /// Per-user settings path, if a home directory is known.
    pub fn global_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(SETTINGS_DIR).join(SETTINGS_FILE))
    }

    /// Load the effective settings for a repository.
    pub fn load(root: &Path) -> Result<(Self, SettingsSource), Error> {
        Self::resolve(&Self::project_path(root), Self::global_path().as_deref())
    }

    /// Pick the first settings file that exists, project before global.
    fn resolve(project: &Path, global: Option<&Path>) -> Result<(Self, SettingsSource), Error> {
        if project.is_file() {
            let settings = Self::load_from(project)?;
            return Ok((settings, SettingsSource::Project(project.to_path_buf())));
        }

        if let Some(global) = global.filter(|p| p.is_file()) {
            let settings = Self::load_from(global)?;
            return Ok((settings, SettingsSource::Global(global.to_path_buf())));
        }

        Ok((Self::default(), SettingsSource::Defaults))
    }

    /// Parse a single settings file.
    pub fn load_from(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content).map_err(|e| Error::SettingsParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        if settings.copyright_owner.trim().is_empty() {
            return Err(Error::SettingsParse {
                path: path.to_path_buf(),
                message: "copyright_owner must not be empty".to_string(),
            });
        }

        Ok(settings)
    }

    /// Render as TOML, the same shape the settings file takes.
    pub fn to_toml(&self) -> Result<String, Error> {
        toml::to_string_pretty(self).map_err(|e| Error::other(e.to_string()))
    }
}
