//! Client configuration parsed from environment variables.

use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const API_URL_ENV: &str = "API_URL";
pub const TOKEN_FILE_ENV: &str = "SMARTMARKET_TOKEN_FILE";

const DEFAULT_STORAGE_DIR: &str = ".smartmarket";
const DEFAULT_STORAGE_FILE: &str = "storage.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub token_file: PathBuf,
}

impl ClientConfig {
    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `API_URL`: backend base URL, default `http://localhost:8000`
    /// - `SMARTMARKET_TOKEN_FILE`: token store path, default
    ///   `$HOME/.smartmarket/storage.json`
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = std::env::var(API_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let token_file = std::env::var(TOKEN_FILE_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map_or_else(default_token_file, PathBuf::from);

        Self::new(base_url, token_file)
    }

    /// Build a config from explicit values. Trailing slashes on the base URL
    /// are trimmed so paths can be appended directly.
    #[must_use]
    pub fn new(base_url: impl Into<String>, token_file: impl Into<PathBuf>) -> Self {
        Self {
            base_url: normalize_base_url(&base_url.into()),
            token_file: token_file.into(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL, default_token_file())
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

fn default_token_file() -> PathBuf {
    let home = std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map_or_else(|| PathBuf::from("."), PathBuf::from);
    home.join(DEFAULT_STORAGE_DIR).join(DEFAULT_STORAGE_FILE)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
