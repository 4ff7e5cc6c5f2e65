// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Forced logout policy for unrecoverable session failures.

use reqwest::Response;
use std::sync::Arc;

use super::coordinator::AuthenticatedClient;
use super::request::RequestOptions;
use crate::error::{ClientError, Result};
use crate::session::{SessionStore, SharedSession};

/// Sends the user back to the login entry point.
///
/// Invoked as a terminal side effect after the session has been cleared;
/// the failed call still returns its error.
pub trait LoginRedirect: Send + Sync {
    fn redirect_to_login(&self, login_url: &str, cause: &ClientError);
}

impl<F> LoginRedirect for F
where
    F: Fn(&str, &ClientError) + Send + Sync,
{
    fn redirect_to_login(&self, login_url: &str, cause: &ClientError) {
        self(login_url, cause)
    }
}

/// Redirect for processes without a browsing context: log and move on.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogRedirect;

impl LoginRedirect for LogRedirect {
    fn redirect_to_login(&self, login_url: &str, cause: &ClientError) {
        tracing::warn!(
            login_url = %login_url,
            cause = %cause,
            "Session expired. Please sign in again."
        );
    }
}

/// Authenticated client that enforces the logout policy.
#[derive(Clone)]
pub struct SessionGuard {
    client: AuthenticatedClient,
    redirect: Arc<dyn LoginRedirect>,
}

impl SessionGuard {
    pub fn new(client: AuthenticatedClient, redirect: Arc<dyn LoginRedirect>) -> Self {
        Self { client, redirect }
    }

    pub fn client(&self) -> &AuthenticatedClient {
        &self.client
    }

    pub fn session(&self) -> &SharedSession {
        self.client.session()
    }

    /// Same contract as [`AuthenticatedClient::request`], plus a login
    /// redirect whenever the error requires signing in again.
    pub async fn request(&self, target: &str, options: RequestOptions) -> Result<Response> {
        self.enforce(self.client.request(target, options).await)
    }

    /// Apply the logout policy to the outcome of one logical operation.
    ///
    /// Operations that fan out over several unguarded requests call this
    /// once on their combined result so one failure redirects once. No
    /// redirect happens while another user's session is active.
    pub fn enforce<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(err) = &result {
            if err.requires_login() {
                match self.session().current_user() {
                    None => self
                        .redirect
                        .redirect_to_login(&self.client.config().login_url, err),
                    Some(user) => {
                        tracing::info!(user = %user, error = %err, "Another session is active, not redirecting")
                    }
                }
            }
        }
        result
    }
}
