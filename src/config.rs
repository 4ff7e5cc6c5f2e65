// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Console configuration loaded from environment variables.
//!
//! A `.env` file is honored for local development.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Default backend base URL (local Spring backend).
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api/v1";

/// Default login entry point used when a session must be re-established.
pub const DEFAULT_LOGIN_URL: &str = "/auth/login_register.html";

/// Console configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base URL; relative request targets are resolved against it
    pub api_base_url: String,
    /// Login entry point for forced logouts
    pub login_url: String,
    /// Upper bound for any single backend request
    pub request_timeout: Duration,
    /// Upper bound for the token refresh call
    pub refresh_timeout: Duration,
    /// Treat HTTP 500 like 401/403 and attempt a token refresh.
    ///
    /// The console backend reports expired JWTs as 500, so this defaults to
    /// on. Turning it off surfaces every 500 as a server error directly.
    pub refresh_on_server_error: bool,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            login_url: DEFAULT_LOGIN_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            refresh_timeout: Duration::from_secs(10),
            refresh_on_server_error: true,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_base_url = lookup("MSMA_API_BASE_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base_url);
        if api_base_url.is_empty() {
            return Err(ConfigError::Invalid(
                "MSMA_API_BASE_URL",
                "must not be empty".to_string(),
            ));
        }

        Ok(Self {
            api_base_url,
            login_url: lookup("MSMA_LOGIN_URL")
                .map(|v| v.trim().to_string())
                .unwrap_or(defaults.login_url),
            request_timeout: parse_var(&lookup, "MSMA_REQUEST_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            refresh_timeout: parse_var(&lookup, "MSMA_REFRESH_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.refresh_timeout),
            refresh_on_server_error: parse_var(&lookup, "MSMA_REFRESH_ON_SERVER_ERROR")?
                .unwrap_or(defaults.refresh_on_server_error),
        })
    }

    /// Default config pointing at a specific backend (tests, local mocks).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    /// Resolve a request target against the API base URL.
    ///
    /// Absolute URLs pass through unchanged.
    pub fn resolve(&self, target: &str) -> String {
        if target.starts_with("http://") || target.starts_with("https://") {
            target.to_string()
        } else if target.starts_with('/') {
            format!("{}{}", self.api_base_url, target)
        } else {
            format!("{}/{}", self.api_base_url, target)
        }
    }
}

fn parse_var<F, T>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::Invalid(key, format!("{:?}: {}", raw, e))),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
