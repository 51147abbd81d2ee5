//! Shared application settings (database path, image directory, list view
//! defaults).
//!
//! The settings file is always `~/.config/brickshelf/settings.toml`. Missing
//! or unreadable files fall back to defaults so a broken config never stops
//! the catalog from opening.

use std::io;
use std::path::{Path, PathBuf};

use brickshelf_catalog::DEFAULT_PAGE_SIZE;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub library: LibrarySettings,
    pub view: ViewSettings,
}

/// Where the catalog lives on disk. `None` means the platform default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_dir: Option<PathBuf>,
}

/// Defaults for `brickshelf list` when no flag overrides them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSettings {
    pub page_size: usize,
    /// Sort key name, e.g. `"title"` or `"release_year"`.
    pub sort: String,
    pub descending: bool,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            sort: "title".to_string(),
            descending: false,
        }
    }
}

/// Canonical path to the settings file: `~/.config/brickshelf/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("brickshelf").join("settings.toml")
}

/// Per-user data directory holding the default database and images.
fn data_dir() -> PathBuf {
    let data = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    data.join("brickshelf")
}

/// Load settings from the canonical location.
pub fn load_settings() -> AppSettings {
    load_settings_from(&settings_path())
}

/// Load settings from `path`, falling back to defaults if the file is missing
/// or cannot be parsed.
pub fn load_settings_from(path: &Path) -> AppSettings {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return AppSettings::default(),
        Err(e) => {
            log::warn!("Could not read {}: {}", path.display(), e);
            return AppSettings::default();
        }
    };
    match toml::from_str(&contents) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("Ignoring invalid settings file {}: {}", path.display(), e);
            AppSettings::default()
        }
    }
}

/// Save settings to the canonical location.
pub fn save_settings(settings: &AppSettings) -> io::Result<()> {
    save_settings_to(&settings_path(), settings)
}

/// Write `settings` to `path` atomically, creating parent directories.
pub fn save_settings_to(path: &Path, settings: &AppSettings) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let serialized = toml::to_string_pretty(settings).map_err(io::Error::other)?;
    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, &serialized)?;
    std::fs::rename(&tmp, path)?;
    log::debug!("Saved settings to {}", path.display());
    Ok(())
}

/// Load the settings file as a pretty-printed TOML string for display.
pub fn load_settings_string() -> Option<String> {
    let contents = std::fs::read_to_string(settings_path()).ok()?;
    let doc: toml::Value = contents.parse().ok()?;
    toml::to_string_pretty(&doc).ok()
}

/// Resolve the database path using a priority chain:
///
/// 1. CLI override (if `Some`)
/// 2. Saved `library.database` in `settings.toml`
/// 3. `<data dir>/brickshelf/brickshelf.db`
pub fn resolve_database_path(cli_override: Option<PathBuf>, settings: &AppSettings) -> PathBuf {
    cli_override
        .or_else(|| settings.library.database.clone())
        .unwrap_or_else(|| data_dir().join("brickshelf.db"))
}

/// Resolve the image directory the same way as [`resolve_database_path`],
/// defaulting to `<data dir>/brickshelf/images`.
pub fn resolve_image_dir(cli_override: Option<PathBuf>, settings: &AppSettings) -> PathBuf {
    cli_override
        .or_else(|| settings.library.image_dir.clone())
        .unwrap_or_else(|| data_dir().join("images"))
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
