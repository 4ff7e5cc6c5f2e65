// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client error types surfaced to console callers.

use reqwest::StatusCode;
use serde::Deserialize;

/// Error type returned by the coordinator and the typed console API.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("No active session")]
    NoSession,

    #[error("Session expired: {0}")]
    SessionExpired(String),

    #[error("Unauthorized after token refresh (HTTP {status})")]
    AuthRetryExhausted { status: u16 },

    #[error("Server error (HTTP {status}): {message}")]
    Server { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ClientError {
    /// Message used when the backend rejects a refresh without a body.
    pub const INVALID_REFRESH_TOKEN: &'static str = "Invalid refresh token";

    /// Whether the session must be re-established by signing in again.
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            ClientError::NoSession
                | ClientError::SessionExpired(_)
                | ClientError::AuthRetryExhausted { .. }
        )
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::AuthRetryExhausted { status }
            | ClientError::Server { status, .. }
            | ClientError::Api { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Build an `Api` error from a non-success response, reading the
    /// backend's `message` field when the body carries one.
    pub async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        ClientError::Api {
            status: status.as_u16(),
            message: error_message(status, &body),
        }
    }
}

/// Error payload returned by the backend (`ApiResponse` on the server side).
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Extract a human-readable message from an error body.
///
/// Prefers `message`, then `description`, then the raw body, then the
/// status line.
pub fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(msg) = parsed.message.or(parsed.description) {
            if !msg.is_empty() {
                return msg;
            }
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP error {}", status.as_u16())
    } else {
        trimmed.to_string()
    }
}

/// Result type alias for console operations
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_login_for_terminal_auth_errors() {
        assert!(ClientError::NoSession.requires_login());
        assert!(ClientError::SessionExpired("gone".to_string()).requires_login());
        assert!(ClientError::AuthRetryExhausted { status: 401 }.requires_login());
    }

    #[test]
    fn test_requires_login_false_for_recoverable_errors() {
        let err = ClientError::Server {
            status: 500,
            message: "boom".to_string(),
        };
        assert!(!err.requires_login());
        assert!(!ClientError::Validation("bad".to_string()).requires_login());
        assert!(!ClientError::Api {
            status: 404,
            message: "missing".to_string()
        }
        .requires_login());
    }

    #[test]
    fn test_error_message_prefers_message_field() {
        let body = r#"{"status":"400","message":"ENTITY_NOT_FOUND","description":"Not found"}"#;
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, body),
            "ENTITY_NOT_FOUND"
        );
    }

    #[test]
    fn test_error_message_falls_back_to_description_and_body() {
        let body = r#"{"description":"Token revoked"}"#;
        assert_eq!(error_message(StatusCode::UNAUTHORIZED, body), "Token revoked");

        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, "upstream down"),
            "upstream down"
        );
        assert_eq!(
            error_message(StatusCode::NOT_FOUND, "   "),
            "HTTP error 404"
        );
    }

    #[test]
    fn test_status_accessor() {
        assert_eq!(
            ClientError::AuthRetryExhausted { status: 403 }.status(),
            Some(403)
        );
        assert_eq!(ClientError::NoSession.status(), None);
    }
}
