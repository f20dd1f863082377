// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types shared by the client layer.

/// Client-side error type.
///
/// Only the HTTP variant is ever handed back to view code in practice;
/// storage problems are logged and swallowed by the session store.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Network or HTTP status failure, passed through untouched.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl AppError {
    /// HTTP status code carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the request failed because the timeout elapsed.
    pub fn is_timeout(&self) -> bool {
        matches!(self, AppError::Http(err) if err.is_timeout())
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, AppError>;
