//! Credentials artifact and process settings

use dotenv::dotenv;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Failure to load the credentials artifact. Fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read credentials file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed credentials file: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Quote provider endpoint and API key.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    pub url: String,
    pub api_key: String,
}

/// Document store endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_url")]
    pub url: String,
}

fn default_store_url() -> String {
    "http://localhost:9200".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: default_store_url(),
        }
    }
}

/// Credentials artifact, loaded once at startup and passed by reference
/// into the pipeline. Immutable thereafter; there is no reload.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub stock_data: ProviderConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

impl Config {
    /// Load the JSON credentials artifact from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// Process parameters, read from the environment with defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    pub credentials_path: String,
    pub metric: String,
    pub symbol: String,
    pub index_prefix: String,
    pub concurrency: usize,
    pub short_window: usize,
    pub long_window: usize,
}

impl Settings {
    pub fn from_env() -> Self {
        dotenv().ok();

        Settings {
            credentials_path: std::env::var("API_CREDENTIALS")
                .unwrap_or_else(|_| "api.json".to_string()),
            metric: std::env::var("METRIC").unwrap_or_else(|_| "daily".to_string()),
            symbol: std::env::var("SYMBOL").unwrap_or_else(|_| "MSFT".to_string()),
            index_prefix: std::env::var("INDEX_PREFIX").unwrap_or_else(|_| "stock-".to_string()),
            concurrency: std::env::var("UPLOAD_CONCURRENCY")
                .unwrap_or_else(|_| "4".to_string())
                .parse()
                .unwrap_or(4),
            short_window: std::env::var("SHORT_WINDOW")
                .unwrap_or_else(|_| "15".to_string())
                .parse()
                .unwrap_or(15),
            long_window: std::env::var("LONG_WINDOW")
                .unwrap_or_else(|_| "50".to_string())
                .parse()
                .unwrap_or(50),
        }
    }
}
