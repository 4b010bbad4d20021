//! Settings persistence
//!
//! Saves and loads [`SessionSettings`] to/from a JSON file.
//!
//! # File Location
//!
//! `settings.json` in the user's configuration directory, or in the working
//! directory when the platform has none.
//!
//! # Error Handling
//!
//! [`load_settings_from`] and [`save_settings_to`] return errors.
//! [`load_settings`] is the startup path: any failure is logged and the
//! defaults are used, so a broken file never blocks a session.

use super::error::CoreResult;
use super::settings::SessionSettings;
use bevy::prelude::*;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Settings filename
const SETTINGS_FILENAME: &str = "settings.json";

/// Resolve the settings file path
///
/// E.g. `~/.config/memchess/settings.json` on Linux.
pub fn settings_path() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("com", "memchess", "memchess") {
        proj_dirs.config_dir().join(SETTINGS_FILENAME)
    } else {
        PathBuf::from(SETTINGS_FILENAME)
    }
}

pub fn load_settings_from(path: &Path) -> CoreResult<SessionSettings> {
    let contents = fs::read_to_string(path)?;
    let settings: SessionSettings = serde_json::from_str(&contents)?;
    settings.validate()?;
    Ok(settings)
}

pub fn save_settings_to(path: &Path, settings: &SessionSettings) -> CoreResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;
    info!("[SETTINGS] Saved settings to {:?}", path);
    Ok(())
}

/// Load settings, falling back to defaults on any failure
pub fn load_settings(path: Option<&Path>) -> SessionSettings {
    let path = path.map(Path::to_path_buf).unwrap_or_else(settings_path);

    if !path.exists() {
        info!("[SETTINGS] No settings file found at {:?}. Using defaults.", path);
        return SessionSettings::default();
    }

    match load_settings_from(&path) {
        Ok(settings) => {
            info!("[SETTINGS] Loaded settings from {:?}", path);
            settings
        }
        Err(e) => {
            warn!(
                "[SETTINGS] Failed to load settings file at {:?}: {}. Using defaults.",
                path, e
            );
            SessionSettings::default()
        }
    }
}

/// Write the defaults out if no settings file exists yet
pub fn ensure_settings_file(path: &Path) -> CoreResult<bool> {
    if path.exists() {
        return Ok(false);
    }
    if let Err(e) = save_settings_to(path, &SessionSettings::default()) {
        error!("[SETTINGS] Failed to write default settings to {:?}: {}", path, e);
        return Err(e);
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CoreError;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("memchess-settings-{}-{}", name, std::process::id()))
            .join(SETTINGS_FILENAME)
    }

    #[test]
    fn test_settings_save_and_load() {
        let path = temp_path("roundtrip");
        let settings = SessionSettings {
            match_delay_ticks: 3,
            default_promotion: 'n',
            ..Default::default()
        };

        save_settings_to(&path, &settings).expect("save settings");
        let loaded = load_settings_from(&path).expect("load settings");
        assert_eq!(loaded, settings);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: SessionSettings = serde_json::from_str(r#"{"match_delay_ticks": 2}"#).unwrap();
        assert_eq!(settings.match_delay_ticks, 2);
        assert_eq!(settings.default_promotion, 'q');
        assert_eq!(settings.server_url, SessionSettings::default().server_url);
    }

    #[test]
    fn test_invalid_promotion_is_rejected() {
        let path = temp_path("invalid");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{"default_promotion": "k"}"#).unwrap();

        assert!(matches!(
            load_settings_from(&path),
            Err(CoreError::InvalidSetting { field: "default_promotion", .. })
        ));
        assert_eq!(load_settings(Some(path.as_path())), SessionSettings::default());

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let path = temp_path("missing");
        assert_eq!(load_settings(Some(path.as_path())), SessionSettings::default());
    }
}
