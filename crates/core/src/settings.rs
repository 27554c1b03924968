//! Persisted user settings.
//!
//! Settings live in a JSON file. The location is taken from
//! `MISSILE_COMMANDER_SETTINGS` when set, otherwise
//! `$XDG_CONFIG_HOME/missile-commander/settings.json`, falling back to
//! `$HOME/.config/missile-commander/settings.json`.
//!
//! A missing file is not an error: defaults apply until the first save.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable overriding the settings file location.
pub const SETTINGS_ENV: &str = "MISSILE_COMMANDER_SETTINGS";

/// Pulse duration bounds in milliseconds.
pub const PULSE_MS_MIN: u64 = 1;
pub const PULSE_MS_MAX: u64 = 10_000;
pub const PULSE_MS_DEFAULT: u64 = 300;

/// User preferences shared by the CLI and GUI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Default pulse duration for directional moves.
    pub pulse_ms: u64,
    /// Switch the launcher light on right after connecting.
    pub light_on_connect: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pulse_ms: PULSE_MS_DEFAULT,
            light_on_connect: false,
        }
    }
}

impl Settings {
    /// Check every field against its allowed range.
    pub fn validate(&self) -> Result<()> {
        validate_pulse_ms(self.pulse_ms)?;
        Ok(())
    }
}

/// Validate a pulse duration.
pub fn validate_pulse_ms(ms: u64) -> Result<u64> {
    if !(PULSE_MS_MIN..=PULSE_MS_MAX).contains(&ms) {
        return Err(Error::OutOfRange {
            field: "pulse_ms",
            value: ms,
            min: PULSE_MS_MIN,
            max: PULSE_MS_MAX,
        });
    }
    Ok(ms)
}

/// Settings file location.
pub fn settings_path() -> Result<PathBuf> {
    if let Some(path) = std::env::var_os(SETTINGS_ENV) {
        return Ok(PathBuf::from(path));
    }

    let config_dir = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
        .ok_or_else(|| Error::Settings("neither XDG_CONFIG_HOME nor HOME is set".to_string()))?;

    Ok(config_dir.join("missile-commander").join("settings.json"))
}

/// Load settings from `path`, or defaults if it does not exist.
pub fn load_settings_from(path: &Path) -> Result<Settings> {
    if !path.exists() {
        debug!(path = %path.display(), "No settings file, using defaults");
        return Ok(Settings::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| Error::Settings(format!("read {}: {e}", path.display())))?;
    let settings: Settings = serde_json::from_str(&raw)
        .map_err(|e| Error::Settings(format!("parse {}: {e}", path.display())))?;
    settings.validate()?;

    debug!(path = %path.display(), ?settings, "Settings loaded");
    Ok(settings)
}

/// Validate and write settings to `path`, creating parent directories.
pub fn save_settings_to(path: &Path, settings: &Settings) -> Result<()> {
    settings.validate()?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| Error::Settings(format!("create {}: {e}", parent.display())))?;
    }

    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| Error::Settings(format!("serialize: {e}")))?;
    std::fs::write(path, json)
        .map_err(|e| Error::Settings(format!("write {}: {e}", path.display())))?;

    debug!(path = %path.display(), "Settings saved");
    Ok(())
}

/// Load settings from the default location.
pub fn load_settings() -> Result<Settings> {
    load_settings_from(&settings_path()?)
}

/// Save settings to the default location.
pub fn save_settings(settings: &Settings) -> Result<()> {
    save_settings_to(&settings_path()?, settings)
}
