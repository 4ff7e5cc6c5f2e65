// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Access token refresh against the backend.

use std::time::Duration;

use crate::error::{error_message, ClientError};
use crate::models::{RefreshRequest, RefreshResponse};
use crate::session::SharedSession;

/// Why a refresh did not produce a new access token.
///
/// Cloneable so one outcome can be handed to every caller waiting on the
/// same refresh.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RefreshFailure {
    #[error("{message} (HTTP {status})")]
    Rejected { status: u16, message: String },

    #[error("Token refresh request failed: {0}")]
    Transport(String),

    #[error("Token refresh timed out after {0:?}")]
    TimedOut(Duration),

    #[error("Invalid refresh response: {0}")]
    Decode(String),

    #[error("Session ended during token refresh")]
    SessionEnded,
}

impl From<RefreshFailure> for ClientError {
    fn from(failure: RefreshFailure) -> Self {
        ClientError::SessionExpired(failure.to_string())
    }
}

/// Exchanges a refresh token for a new access token.
#[derive(Clone)]
pub struct TokenRefresher {
    http: reqwest::Client,
    refresh_url: String,
    session: SharedSession,
    timeout: Duration,
}

impl TokenRefresher {
    pub fn new(
        http: reqwest::Client,
        refresh_url: String,
        session: SharedSession,
        timeout: Duration,
    ) -> Self {
        Self {
            http,
            refresh_url,
            session,
            timeout,
        }
    }

    /// Refresh the access token of `user_id` and store it in the session.
    ///
    /// The new token is persisted before it is returned, so independent
    /// session reads after this call already see it.
    pub async fn refresh(&self, user_id: &str, refresh_token: &str) -> Result<String, RefreshFailure> {
        tracing::info!(user = %user_id, "Refreshing access token");

        let tokens = tokio::time::timeout(self.timeout, self.exchange(user_id, refresh_token))
            .await
            .map_err(|_| RefreshFailure::TimedOut(self.timeout))??;

        let access_token = tokens.access_token().to_string();
        if access_token.is_empty() {
            return Err(RefreshFailure::Decode("empty access token".to_string()));
        }

        if !self.session.set_access_token(user_id, &access_token) {
            return Err(RefreshFailure::SessionEnded);
        }
        if let Some(rotated) = tokens.rotated_refresh_token() {
            self.session.set_refresh_token(user_id, rotated);
        }

        tracing::info!(user = %user_id, "Access token refreshed");
        Ok(access_token)
    }

    async fn exchange(
        &self,
        user_id: &str,
        refresh_token: &str,
    ) -> Result<RefreshResponse, RefreshFailure> {
        let response = self
            .http
            .put(&self.refresh_url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&RefreshRequest {
                email: user_id,
                refresh_token,
            })
            .send()
            .await
            .map_err(|e| RefreshFailure::Transport(e.to_string()))?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "Refresh response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.trim().is_empty() {
                ClientError::INVALID_REFRESH_TOKEN.to_string()
            } else {
                error_message(status, &body)
            };
            tracing::warn!(status = status.as_u16(), message = %message, "Refresh rejected");
            return Err(RefreshFailure::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| RefreshFailure::Decode(e.to_string()))
    }
}
