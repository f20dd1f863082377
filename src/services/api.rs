// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Backend API client.
//!
//! Thin wrapper over `reqwest`:
//! - Resolves paths against the configured base URL
//! - Attaches the session bearer token to creation requests on
//!   protected resources
//! - Logs every request and response
//!
//! Failures are returned exactly as `reqwest` reports them. There is no
//! retry here; callers decide what to show.

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::services::SessionStore;
use reqwest::header::HeaderMap;
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::{Duration, Instant};

/// Resources whose POST (create) endpoints require a bearer token.
pub const BEARER_PATHS: &[&str] = &["/propuestas", "/actividades", "/comunidades"];

/// Per-call tweaks layered on top of the client defaults.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    /// Overrides the configured request timeout.
    pub timeout: Option<Duration>,
}

/// Decoded response plus the transport metadata views sometimes need.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub headers: HeaderMap,
    pub data: T,
}

/// Backend API client. Cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(config: &Config, session: SessionStore) -> Result<Self> {
        let base_url = Url::parse(&config.api_base)
            .map_err(|e| AppError::InvalidUrl(format!("{}: {}", config.api_base, e)))?;

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            http,
            base_url,
            session,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        options: Option<RequestOptions>,
    ) -> Result<ApiResponse<T>> {
        self.send::<T, ()>(Method::GET, url, None, options).await
    }

    pub async fn post<T, B>(
        &self,
        url: &str,
        body: Option<&B>,
        options: Option<RequestOptions>,
    ) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(Method::POST, url, body, options).await
    }

    pub async fn put<T, B>(
        &self,
        url: &str,
        body: Option<&B>,
        options: Option<RequestOptions>,
    ) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(Method::PUT, url, body, options).await
    }

    /// Absolute URL for a path relative to the base (or an absolute URL as-is).
    pub fn resolve_url(&self, url: &str) -> Result<Url> {
        if url.starts_with("http://") || url.starts_with("https://") {
            return Url::parse(url).map_err(|e| AppError::InvalidUrl(format!("{}: {}", url, e)));
        }

        let base = self.base_url.as_str().trim_end_matches('/');
        let path = url.trim_start_matches('/');
        let joined = format!("{}/{}", base, path);
        Url::parse(&joined).map_err(|e| AppError::InvalidUrl(format!("{}: {}", joined, e)))
    }

    /// Path of `url` as seen by the API, i.e. without the base URL's own path.
    fn api_path(&self, url: &Url) -> String {
        let base_path = self.base_url.path().trim_end_matches('/');
        let path = url.path();
        match path.strip_prefix(base_path) {
            Some(rest) if rest.starts_with('/') => rest.to_string(),
            _ => path.to_string(),
        }
    }

    async fn send<T, B>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
        options: Option<RequestOptions>,
    ) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let full_url = self.resolve_url(url)?;
        let options = options.unwrap_or_default();

        let mut request = self.http.request(method.clone(), full_url.clone());

        let mut with_bearer = false;
        if needs_bearer(&method, &self.api_path(&full_url)) {
            if let Some(token) = self.session.get_token().filter(|t| !t.is_empty()) {
                request = request.bearer_auth(token);
                with_bearer = true;
            }
        }

        for (name, value) in &options.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if !options.query.is_empty() {
            request = request.query(&options.query);
        }
        if let Some(timeout) = options.timeout {
            request = request.timeout(timeout);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        tracing::debug!(
            method = %method,
            url = %full_url,
            bearer = with_bearer,
            "API request"
        );
        let started = Instant::now();

        let response = match request.send().await.and_then(|r| r.error_for_status()) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(
                    method = %method,
                    url = %full_url,
                    status = ?e.status().map(|s| s.as_u16()),
                    error = %e,
                    "API request failed"
                );
                return Err(e.into());
            }
        };

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        tracing::debug!(
            method = %method,
            url = %full_url,
            status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "API response"
        );

        // 201/204 replies often carry no body; decode those as JSON null.
        let body = response.bytes().await?;
        let data = if body.iter().all(u8::is_ascii_whitespace) {
            serde_json::from_value(Value::Null)?
        } else {
            serde_json::from_slice(&body)?
        };
        Ok(ApiResponse {
            status,
            headers,
            data,
        })
    }
}

/// Whether a request creates something on a resource that requires a session.
pub fn needs_bearer(method: &Method, path: &str) -> bool {
    if *method != Method::POST {
        return false;
    }
    BEARER_PATHS.iter().any(|prefix| {
        path.strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'))
    })
}
