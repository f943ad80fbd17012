use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

use super::schema::Settings;

/// Platform config location, e.g. `~/.config/cfdns/config.toml` on Linux
pub fn default_settings_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "cfdns").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Load settings from a TOML file. A missing file yields the defaults.
pub fn load_settings(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

    let settings: Settings = toml::from_str(&content)
        .with_context(|| format!("Failed to parse settings file: {}", path.display()))?;

    if settings.default_ttl == 0 {
        anyhow::bail!(
            "Invalid settings file {}: default_ttl must be greater than zero",
            path.display()
        );
    }

    Ok(settings)
}
