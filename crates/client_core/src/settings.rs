use std::{fs, io, path::Path};

use serde::Deserialize;

use crate::error::SettingsError;

pub const SETTINGS_FILE: &str = "sticker.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_url: String,
    pub log_filter: String,
    pub request_timeout_secs: Option<u64>,
    /// Reproduces the historical reset behavior: submit is released right after the
    /// delete is sent and reset stays disabled.
    pub legacy_reset_controls: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8080".into(),
            log_filter: "info".into(),
            request_timeout_secs: None,
            legacy_reset_controls: false,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    server_url: Option<String>,
    log_filter: Option<String>,
    request_timeout_secs: Option<u64>,
    legacy_reset_controls: Option<bool>,
}

pub fn load_settings() -> Result<Settings, SettingsError> {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

/// Layers defaults, then the optional settings file, then environment overrides.
pub fn load_settings_from(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Settings, SettingsError> {
    let mut settings = Settings::default();

    let file_cfg = match fs::read_to_string(path) {
        Ok(raw) => toml::from_str::<FileSettings>(&raw).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?,
        Err(err) if err.kind() == io::ErrorKind::NotFound => FileSettings::default(),
        Err(source) => {
            return Err(SettingsError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    if let Some(v) = file_cfg.server_url {
        settings.server_url = v;
    }
    if let Some(v) = file_cfg.log_filter {
        settings.log_filter = v;
    }
    if file_cfg.request_timeout_secs.is_some() {
        settings.request_timeout_secs = file_cfg.request_timeout_secs;
    }
    if let Some(v) = file_cfg.legacy_reset_controls {
        settings.legacy_reset_controls = v;
    }

    if let Some(v) = env("STICKER_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = env("APP__SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = env("APP__LOG_FILTER") {
        settings.log_filter = v;
    }
    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.request_timeout_secs = Some(parsed);
        }
    }
    if let Some(v) = env("APP__LEGACY_RESET_CONTROLS") {
        if let Ok(parsed) = v.parse::<bool>() {
            settings.legacy_reset_controls = parsed;
        }
    }

    Ok(settings)
}
