//! Credential and client configuration.
//!
//! Settings live in the `[strava]` table of a TOML file:
//!
//! ```toml
//! [strava]
//! client_id = "12345"
//! access_token = "abc..."
//! base_url = "https://www.strava.com/api/v3"  # optional
//! log_level = "warn"                           # optional
//! ```
//!
//! The first file found in [`search_paths`] is used. `STRAVA_ACCESS_TOKEN`
//! overrides the token from the file and is enough on its own.

use crate::strava::DEFAULT_BASE_URL;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const ACCESS_TOKEN_ENV: &str = "STRAVA_ACCESS_TOKEN";
pub const CONFIG_FILE_NAME: &str = "strava-pr.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config file {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error(
        "no Strava access token: set STRAVA_ACCESS_TOKEN or `access_token` under [strava] in one of: {}",
        format_paths(searched)
    )]
    MissingAccessToken { searched: Vec<PathBuf> },
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// On-disk layout of the config file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub strava: StravaSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StravaSection {
    pub client_id: Option<String>,
    pub access_token: Option<String>,
    pub base_url: Option<String>,
    pub log_level: Option<String>,
}

impl ConfigFile {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content).map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }
}

/// Resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub access_token: String,
    pub client_id: Option<String>,
    pub base_url: String,
    pub log_level: Option<String>,
    /// File the settings came from, if any.
    pub source: Option<PathBuf>,
}

impl Config {
    /// Load from the default locations and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let token = std::env::var(ACCESS_TOKEN_ENV).ok();
        Self::load_from(&search_paths(), token)
    }

    /// Load from the first existing file in `paths`, with `token_override`
    /// taking precedence over the file's token.
    pub fn load_from(
        paths: &[PathBuf],
        token_override: Option<String>,
    ) -> Result<Self, ConfigError> {
        let found = paths.iter().find(|p| p.is_file());
        let file = match found {
            Some(path) => ConfigFile::from_file(path)?,
            None => ConfigFile::default(),
        };
        let section = file.strava;

        let access_token = token_override
            .filter(|t| !t.trim().is_empty())
            .or(section.access_token.filter(|t| !t.trim().is_empty()))
            .ok_or_else(|| ConfigError::MissingAccessToken {
                searched: paths.to_vec(),
            })?;

        Ok(Self {
            access_token,
            client_id: section.client_id,
            base_url: section
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            log_level: section.log_level,
            source: found.cloned(),
        })
    }
}

/// Config locations in lookup order: working directory, home directory,
/// then the platform config directory.
pub fn search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(CONFIG_FILE_NAME)];
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(CONFIG_FILE_NAME));
    }
    if let Some(config) = dirs::config_dir() {
        paths.push(config.join("strava-pr").join("config.toml"));
    }
    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_section() {
        let file = ConfigFile::from_toml(
            r#"
            [strava]
            client_id = "123"
            access_token = "tok"
            base_url = "http://localhost:8080"
            log_level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(file.strava.client_id.as_deref(), Some("123"));
        assert_eq!(file.strava.access_token.as_deref(), Some("tok"));
        assert_eq!(file.strava.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn empty_file_parses() {
        let file = ConfigFile::from_toml("").unwrap();
        assert!(file.strava.access_token.is_none());
    }

    #[test]
    fn invalid_toml_is_rejected() {
        assert!(ConfigFile::from_toml("[strava\naccess_token = ").is_err());
    }

    #[test]
    fn env_token_alone_is_enough() {
        let paths = [PathBuf::from("/nonexistent/strava-pr.toml")];
        let cfg = Config::load_from(&paths, Some("env".into())).unwrap();
        assert_eq!(cfg.access_token, "env");
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert!(cfg.source.is_none());
    }

    #[test]
    fn missing_token_lists_searched_paths() {
        let err = Config::load_from(&[PathBuf::from("/nonexistent/a.toml")], None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingAccessToken { .. }));
        assert!(err.to_string().contains("/nonexistent/a.toml"));
        assert!(err.to_string().contains(ACCESS_TOKEN_ENV));
    }

    #[test]
    fn blank_env_token_does_not_count() {
        let err = Config::load_from(&[], Some("  ".into())).unwrap_err();
        assert!(matches!(err, ConfigError::MissingAccessToken { .. }));
    }
}
