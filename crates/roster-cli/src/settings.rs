//! CLI settings, persisted as TOML.
//!
//! Settings live in the platform config folder unless `--config` names a file:
//! - macOS: ~/Library/Application Support/io.roster.Roster/
//! - Windows: %APPDATA%/roster/Roster/config/
//! - Linux: ~/.config/roster/

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

const APP_QUALIFIER: &str = "io";
const APP_ORG: &str = "roster";
const APP_NAME: &str = "Roster";
const CONFIG_FILENAME: &str = "settings.toml";

/// Default width for report tables.
pub const DEFAULT_TABLE_WIDTH: u16 = 120;

/// Settings read from `settings.toml`. Every field has a default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub rules: RuleSettings,
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSettings {
    /// Directory for the persisted rule store. Defaults to the platform data dir.
    pub store_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub format: OutputFormat,
    pub table_width: u16,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            table_width: DEFAULT_TABLE_WIDTH,
        }
    }
}

/// Report format for `validate`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl Settings {
    /// Rule store directory: the configured one, else the platform default.
    pub fn rules_dir(&self) -> Option<PathBuf> {
        self.rules.store_dir.clone().or_else(default_rules_dir)
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
}

/// Path of the default settings file.
///
/// Returns `None` if the platform-specific directory cannot be determined.
pub fn settings_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Platform data directory for the rule store.
pub fn default_rules_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().join("rules"))
}

/// Load settings from `path`, or from the default location when `None`.
///
/// Falls back to defaults when the file is missing, unreadable or invalid.
pub fn load_settings(path: Option<&Path>) -> Settings {
    let resolved = match path {
        Some(path) => path.to_path_buf(),
        None => match settings_path() {
            Some(path) => path,
            None => {
                tracing::warn!("Could not determine settings path, using defaults");
                return Settings::default();
            }
        },
    };
    load_settings_from(&resolved)
}

/// Load settings from a specific file.
pub fn load_settings_from(path: &Path) -> Settings {
    match fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                tracing::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                tracing::warn!("Failed to parse settings file {}: {}, using defaults", path.display(), e);
                Settings::default()
            }
        },
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No settings file at {}, using defaults", path.display());
            Settings::default()
        }
        Err(e) => {
            tracing::warn!("Failed to read settings file {}: {}, using defaults", path.display(), e);
            Settings::default()
        }
    }
}
