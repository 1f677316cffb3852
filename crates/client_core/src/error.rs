use std::path::PathBuf;

pub use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid server url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server responded with {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("sticker service unavailable: {0}")]
    Unavailable(String),
}

impl ApiError {
    /// Raw text surfaced to the user for a failed create/delete.
    pub fn failure_payload(&self) -> String {
        match self {
            ApiError::Status { status, body } if body.trim().is_empty() => status.to_string(),
            ApiError::Status { body, .. } => body.clone(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse settings file '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
