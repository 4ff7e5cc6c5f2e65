// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sign-in and token refresh payloads.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::UserType;

/// Credentials submitted to the sign-in endpoint.
#[derive(Debug, Clone, Serialize, Validate)]
pub struct SignInRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(
        min = 6,
        message = "Password must be at least 6 characters long and not blank"
    ))]
    pub password: String,
}

impl SignInRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into().trim().to_string(),
            password: password.into(),
        }
    }
}

/// Successful sign-in response.
///
/// `user_type` is optional on the wire so a missing value can be reported
/// as a decode error rather than a generic JSON failure.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub user_type: Option<UserType>,
}

/// Body of the token refresh call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest<'a> {
    pub email: &'a str,
    pub refresh_token: &'a str,
}

/// Token refresh response.
///
/// The web backend answers with a bare JSON string; the mobile variant
/// wraps it in an object and may rotate the refresh token.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RefreshResponse {
    Bare(String),
    Wrapped {
        #[serde(rename = "accessToken")]
        access_token: String,
        #[serde(rename = "refreshToken", default)]
        refresh_token: Option<String>,
    },
}

impl RefreshResponse {
    pub fn access_token(&self) -> &str {
        match self {
            RefreshResponse::Bare(token) => token,
            RefreshResponse::Wrapped { access_token, .. } => access_token,
        }
    }

    pub fn rotated_refresh_token(&self) -> Option<&str> {
        match self {
            RefreshResponse::Bare(_) => None,
            RefreshResponse::Wrapped { refresh_token, .. } => refresh_token.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_validation() {
        assert!(SignInRequest::new("admin@msma.dev", "secret1").validate().is_ok());
        assert!(SignInRequest::new("not-an-email", "secret1").validate().is_err());
        assert!(SignInRequest::new("admin@msma.dev", "short").validate().is_err());
        assert!(SignInRequest::new("", "").validate().is_err());
    }

    #[test]
    fn test_sign_in_request_trims_email() {
        let req = SignInRequest::new("  artist@msma.dev ", "secret1");
        assert_eq!(req.email, "artist@msma.dev");
    }

    #[test]
    fn test_refresh_response_bare_string() {
        let parsed: RefreshResponse = serde_json::from_str("\"token-2\"").unwrap();
        assert_eq!(parsed.access_token(), "token-2");
        assert_eq!(parsed.rotated_refresh_token(), None);
    }

    #[test]
    fn test_refresh_response_wrapped() {
        let parsed: RefreshResponse =
            serde_json::from_str(r#"{"accessToken":"a2","refreshToken":"r2"}"#).unwrap();
        assert_eq!(parsed.access_token(), "a2");
        assert_eq!(parsed.rotated_refresh_token(), Some("r2"));

        let parsed: RefreshResponse = serde_json::from_str(r#"{"accessToken":"a3"}"#).unwrap();
        assert_eq!(parsed.access_token(), "a3");
        assert_eq!(parsed.rotated_refresh_token(), None);
    }

    #[test]
    fn test_refresh_request_wire_format() {
        let body = serde_json::to_value(RefreshRequest {
            email: "a@b.dev",
            refresh_token: "r1",
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"email": "a@b.dev", "refreshToken": "r1"}));
    }

    #[test]
    fn test_sign_in_response_missing_user_type() {
        let parsed: SignInResponse =
            serde_json::from_str(r#"{"accessToken":"a","refreshToken":"r"}"#).unwrap();
        assert!(parsed.user_type.is_none());
    }
}
