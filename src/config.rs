// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default backend base URL for local development.
pub const DEFAULT_API_BASE: &str = "http://localhost:3000";

/// Default per-request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 1000;

/// Default locale for human-readable dates.
pub const DEFAULT_LOCALE: &str = "es-MX";

/// Client configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend API base URL
    pub api_base: String,
    /// Request timeout applied to every HTTP call
    pub request_timeout: Duration,
    /// Where the durable session lives when running outside a browser
    pub session_file: PathBuf,
    /// Locale used by date formatting helpers
    pub locale: String,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            session_file: PathBuf::from(".qci/session.json"),
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every variable is optional; a `.env` file is read first if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let api_base = env::var("QCI_API_BASE")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|_| DEFAULT_API_BASE.to_string());

        if !(api_base.starts_with("http://") || api_base.starts_with("https://")) {
            return Err(ConfigError::Invalid("QCI_API_BASE", api_base));
        }

        let timeout_ms = match env::var("QCI_API_TIMEOUT_MS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid("QCI_API_TIMEOUT_MS", raw))?,
            Err(_) => DEFAULT_TIMEOUT_MS,
        };

        Ok(Self {
            api_base,
            request_timeout: Duration::from_millis(timeout_ms),
            session_file: env::var("QCI_SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".qci/session.json")),
            locale: env::var("QCI_LOCALE").unwrap_or_else(|_| DEFAULT_LOCALE.to_string()),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
