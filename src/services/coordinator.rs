// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Authenticated requests with single-flight token refresh.
//!
//! Every request carries the session's bearer token. When the backend
//! rejects it, one refresh is performed no matter how many requests failed
//! at the same time; each of them then retries exactly once with the new
//! token. Failures that cannot be recovered end the failing user's session
//! and are returned as typed errors. Redirecting to the login page is left to
//! [`SessionGuard`](super::SessionGuard).

use futures_util::future::{BoxFuture, FutureExt, Shared};
use reqwest::{Response, StatusCode};
use std::sync::Arc;
use tokio::sync::Mutex;

use super::refresh::{RefreshFailure, TokenRefresher};
use super::request::RequestOptions;
use crate::config::Config;
use crate::error::{error_message, ClientError, Result};
use crate::session::{SessionStore, SharedSession};

type RefreshOutcome = std::result::Result<String, RefreshFailure>;
type PendingRefresh = Shared<BoxFuture<'static, RefreshOutcome>>;

/// Process-wide refresh lock.
enum RefreshState {
    Idle,
    /// A refresh is running; late arrivals await the same future.
    Refreshing(PendingRefresh),
}

/// HTTP client bound to the console session.
#[derive(Clone)]
pub struct AuthenticatedClient {
    http: reqwest::Client,
    config: Config,
    session: SharedSession,
    refresher: TokenRefresher,
    refresh_state: Arc<Mutex<RefreshState>>,
}

impl AuthenticatedClient {
    /// Path of the refresh endpoint under the API base.
    pub const REFRESH_PATH: &'static str = "/auth/refresh";

    /// Create a client with its own connection pool.
    pub fn new(config: Config, session: SharedSession) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self::with_http(http, config, session))
    }

    /// Create a client sharing an existing connection pool.
    pub fn with_http(http: reqwest::Client, config: Config, session: SharedSession) -> Self {
        let refresher = TokenRefresher::new(
            http.clone(),
            config.resolve(Self::REFRESH_PATH),
            session.clone(),
            config.refresh_timeout,
        );

        Self {
            http,
            config,
            session,
            refresher,
            refresh_state: Arc::new(Mutex::new(RefreshState::Idle)),
        }
    }

    /// Underlying HTTP client, for unauthenticated calls such as sign-in.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Configuration the client was built with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Session store shared with the other services.
    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    /// Issue `options` against `target` on behalf of the current session.
    ///
    /// `target` is an absolute URL or a path under the API base URL.
    pub async fn request(&self, target: &str, options: RequestOptions) -> Result<Response> {
        let url = self.config.resolve(target);

        let Some(snapshot) = self.session.snapshot() else {
            tracing::error!(url = %url, "No current user, request not sent");
            return Err(ClientError::NoSession);
        };
        let user_id = snapshot.user_id;

        let Some(refresh_token) = snapshot.credentials.refresh_token else {
            tracing::error!(user = %user_id, "No refresh token available");
            self.session.clear_user(&user_id);
            return Err(ClientError::SessionExpired(
                "No refresh token available".to_string(),
            ));
        };

        let access_token = match snapshot.credentials.access_token {
            Some(token) => token,
            None => {
                tracing::warn!(user = %user_id, "Access token missing, refreshing before request");
                self.refresh_or_expire(&user_id, &refresh_token, None).await?
            }
        };

        tracing::debug!(method = %options.method, url = %url, "Sending request");
        let response = self.send(&url, &options, &access_token).await?;
        let status = response.status();
        tracing::debug!(status = status.as_u16(), url = %url, "Response received");

        if !self.needs_refresh(status) {
            return finish(response).await;
        }

        tracing::info!(
            status = status.as_u16(),
            url = %url,
            "Token rejected, attempting refresh"
        );
        let new_token = self
            .refresh_or_expire(&user_id, &refresh_token, Some(&access_token))
            .await?;

        tracing::info!(url = %url, "Retrying with new token");
        let retry = self.send(&url, &options, &new_token).await?;
        let retry_status = retry.status();
        tracing::debug!(status = retry_status.as_u16(), url = %url, "Retry response received");

        if is_auth_failure(retry_status) {
            tracing::error!(
                status = retry_status.as_u16(),
                url = %url,
                "Still unauthorized after refresh, ending session"
            );
            self.session.clear_user(&user_id);
            return Err(ClientError::AuthRetryExhausted {
                status: retry_status.as_u16(),
            });
        }

        finish(retry).await
    }

    fn needs_refresh(&self, status: StatusCode) -> bool {
        is_auth_failure(status)
            || (status == StatusCode::INTERNAL_SERVER_ERROR && self.config.refresh_on_server_error)
    }

    async fn send(&self, url: &str, options: &RequestOptions, access_token: &str) -> Result<Response> {
        let builder = options.build(&self.http, url, access_token)?;
        builder.send().await.map_err(|e| {
            tracing::warn!(url = %url, error = %e, "Request did not complete");
            ClientError::Transport(e)
        })
    }

    /// Obtain a fresh access token, clearing the session if that fails.
    async fn refresh_or_expire(
        &self,
        user_id: &str,
        refresh_token: &str,
        rejected_token: Option<&str>,
    ) -> Result<String> {
        match self.refreshed_token(user_id, refresh_token, rejected_token).await {
            Ok(token) => Ok(token),
            Err(failure) => {
                tracing::error!(user = %user_id, error = %failure, "Token refresh failed, ending session");
                self.session.clear_user(user_id);
                Err(failure.into())
            }
        }
    }

    /// Join the in-flight refresh or start one.
    ///
    /// If another caller already replaced `rejected_token` in the session
    /// and no refresh is running, the stored token is used directly.
    async fn refreshed_token(
        &self,
        user_id: &str,
        refresh_token: &str,
        rejected_token: Option<&str>,
    ) -> RefreshOutcome {
        let pending = {
            let mut state = self.refresh_state.lock().await;
            let in_flight = match &*state {
                RefreshState::Refreshing(pending) => Some(pending.clone()),
                RefreshState::Idle => None,
            };

            match in_flight {
                Some(pending) => {
                    tracing::debug!(user = %user_id, "Joining in-flight token refresh");
                    pending
                }
                None => {
                    match self.session.snapshot() {
                        Some(snap) if snap.user_id == user_id => {
                            if let (Some(current), Some(rejected)) =
                                (snap.credentials.access_token, rejected_token)
                            {
                                if current != rejected {
                                    tracing::debug!(user = %user_id, "Token already refreshed");
                                    return Ok(current);
                                }
                            }
                        }
                        _ => return Err(RefreshFailure::SessionEnded),
                    }

                    let pending = self.start_refresh(user_id, refresh_token);
                    *state = RefreshState::Refreshing(pending.clone());
                    pending
                }
            }
        };

        pending.await
    }

    fn start_refresh(&self, user_id: &str, refresh_token: &str) -> PendingRefresh {
        let refresher = self.refresher.clone();
        let state = self.refresh_state.clone();
        let user_id = user_id.to_string();
        let refresh_token = refresh_token.to_string();

        async move {
            let outcome = refresher.refresh(&user_id, &refresh_token).await;
            // Settled: the next rejection starts a new refresh.
            *state.lock().await = RefreshState::Idle;
            outcome
        }
        .boxed()
        .shared()
    }
}

fn is_auth_failure(status: StatusCode) -> bool {
    status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN
}

/// Pass the response through, except for an unrecovered 500.
async fn finish(response: Response) -> Result<Response> {
    let status = response.status();
    if status != StatusCode::INTERNAL_SERVER_ERROR {
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();
    tracing::error!(url = %url, "Server error (500)");
    Err(ClientError::Server {
        status: status.as_u16(),
        message: error_message(status, &body),
    })
}
