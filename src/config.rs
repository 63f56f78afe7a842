//! Configuration management for plex-playlist
//!
//! Handles config file loading and credential resolution.
//! Config is stored at ~/.config/plex-playlist/config.toml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::themes::Theme;

/// Environment variable for the server URL
pub const URL_ENV: &str = "PLEX_URL";
/// Environment variable for the auth token
pub const TOKEN_ENV: &str = "PLEX_TOKEN";

/// Default rating threshold for `highly-rated`
pub const DEFAULT_MIN_RATING: f32 = 8.0;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Missing Plex URL. Use --url or set PLEX_URL")]
    MissingUrl,

    #[error("Missing Plex token. Use --token or set PLEX_TOKEN")]
    MissingToken,
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Plex server URL (e.g. http://192.168.1.10:32400)
    pub url: Option<String>,
    /// Plex auth token
    pub token: Option<String>,
    /// Default threshold for highly rated movies
    pub min_rating: Option<f32>,
    /// Custom keyword themes
    #[serde(default)]
    pub themes: Vec<Theme>,
}

impl Config {
    /// Get config file path (~/.config/plex-playlist/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("plex-playlist").join("config.toml"))
    }

    /// Load config from an explicit path, or the default location.
    ///
    /// Only the default location may be missing, which yields the default
    /// config. An explicit path must exist, and a malformed file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::read(path.to_path_buf()),
            None => match Self::path() {
                Some(path) => match Self::read(path) {
                    Err(ConfigError::Read { source, .. })
                        if source.kind() == std::io::ErrorKind::NotFound =>
                    {
                        Ok(Self::default())
                    }
                    result => result,
                },
                None => Ok(Self::default()),
            },
        }
    }

    fn read(path: PathBuf) -> Result<Self, ConfigError> {
        let contents = match std::fs::read_to_string(&path) {
            Ok(s) => s,
            Err(source) => return Err(ConfigError::Read { path, source }),
        };

        Self::parse(&contents).map_err(|source| ConfigError::Parse { path, source })
    }

    /// Parse config from TOML text
    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Rating threshold, falling back to the built-in default
    pub fn min_rating(&self) -> f32 {
        self.min_rating.unwrap_or(DEFAULT_MIN_RATING)
    }

    /// Resolve connection credentials from process environment
    pub fn credentials(
        &self,
        url: Option<&str>,
        token: Option<&str>,
    ) -> Result<Credentials, ConfigError> {
        self.credentials_with(url, token, |key| std::env::var(key).ok())
    }

    /// Resolve credentials with fallback chain:
    /// 1. Command line flag
    /// 2. Environment variable (PLEX_URL / PLEX_TOKEN)
    /// 3. Config file
    pub fn credentials_with(
        &self,
        url: Option<&str>,
        token: Option<&str>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Credentials, ConfigError> {
        let url = non_empty(url.map(str::to_string))
            .or_else(|| non_empty(env(URL_ENV)))
            .or_else(|| non_empty(self.url.clone()))
            .ok_or(ConfigError::MissingUrl)?;

        let token = non_empty(token.map(str::to_string))
            .or_else(|| non_empty(env(TOKEN_ENV)))
            .or_else(|| non_empty(self.token.clone()))
            .ok_or(ConfigError::MissingToken)?;

        Ok(Credentials { url, token })
    }
}

/// An empty value counts as unset, so the next source is tried
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Resolved server connection parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub url: String,
    pub token: String,
}
