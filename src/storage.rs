use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("settings i/o failed: {0}")]
    Io(#[from] io::Error),
    #[error("settings file is not valid json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Cosmetic colour scheme, the only preference that survives a restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub theme: Theme,
    // Window geometry of the GTK front end, absent on first run
    #[serde(default)]
    pub window_width: Option<i32>,
    #[serde(default)]
    pub window_height: Option<i32>,
}

fn project_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("io.github", "laserlicht", "RockPaperScissors")
        .map(|p| p.config_dir().to_path_buf())
}

/// `settings.json` in the platform config dir, or the working directory.
pub fn settings_path() -> io::Result<PathBuf> {
    let dir = match project_config_dir() {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    Ok(dir.join("settings.json"))
}

/// Read settings from `path`. Missing file means defaults.
pub fn load_settings_from(path: &Path) -> Result<Settings, StorageError> {
    if !path.is_file() {
        return Ok(Settings::default());
    }
    let data = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

pub fn save_settings_to(path: &Path, settings: &Settings) -> Result<(), StorageError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let data = serde_json::to_string_pretty(settings)?;
    fs::write(path, data)?;
    Ok(())
}

/// Read settings from `path`; a missing or unreadable file yields defaults.
pub fn load_settings_or_default(path: &Path) -> Settings {
    match load_settings_from(path) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("using default settings ({}): {e}", path.display());
            Settings::default()
        }
    }
}

/// Load the persisted settings; any problem falls back to defaults.
pub fn load_settings() -> Settings {
    match settings_path() {
        Ok(path) => load_settings_or_default(&path),
        Err(e) => {
            log::warn!("using default settings: {e}");
            Settings::default()
        }
    }
}

#[cfg(feature = "gui")]
pub fn save_settings(settings: &Settings) -> Result<(), StorageError> {
    let path = settings_path()?;
    save_settings_to(&path, settings)?;
    log::debug!("settings saved to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("rps-storage-{}-{name}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir.join("settings.json")
    }

    #[test]
    fn theme_toggles() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert!(Theme::Dark.is_dark());
    }

    #[test]
    fn settings_json_shape() {
        let s = Settings {
            theme: Theme::Dark,
            window_width: Some(640),
            window_height: None,
        };
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["theme"], "dark");
        assert_eq!(json["window_width"], 640);

        // Older files without geometry still load.
        let parsed: Settings = serde_json::from_str(r#"{"theme":"light"}"#).unwrap();
        assert_eq!(parsed, Settings::default());
    }

    #[test]
    fn save_then_load_from_disk() {
        let path = scratch_file("roundtrip");
        let s = Settings {
            theme: Theme::Dark,
            ..Settings::default()
        };
        save_settings_to(&path, &s).unwrap();
        assert_eq!(load_settings_from(&path).unwrap(), s);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let path = scratch_file("missing");
        assert_eq!(load_settings_from(&path).unwrap(), Settings::default());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let path = scratch_file("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ theme: ").unwrap();
        assert!(matches!(
            load_settings_from(&path),
            Err(StorageError::Json(_))
        ));
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn unreadable_settings_fall_back_to_defaults() {
        let missing = scratch_file("fallback-missing");
        assert_eq!(load_settings_or_default(&missing), Settings::default());

        let corrupt = scratch_file("fallback-corrupt");
        fs::create_dir_all(corrupt.parent().unwrap()).unwrap();
        fs::write(&corrupt, "{ theme: ").unwrap();
        assert_eq!(load_settings_or_default(&corrupt), Settings::default());

        fs::write(&corrupt, r#"{"theme":"dark"}"#).unwrap();
        assert_eq!(load_settings_or_default(&corrupt).theme, Theme::Dark);
        let _ = fs::remove_dir_all(corrupt.parent().unwrap());
    }
}
