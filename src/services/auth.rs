// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Console sign-in and sign-out.

use validator::Validate;

use super::guard::SessionGuard;
use super::request::{Body, RequestOptions};
use crate::error::{ClientError, Result};
use crate::models::{Credentials, SignInRequest, SignInResponse, UserType};

/// Starts and ends console sessions.
#[derive(Clone)]
pub struct AuthService {
    guard: SessionGuard,
}

impl AuthService {
    pub const SIGN_IN_PATH: &'static str = "/auth/sign-in";
    pub const SIGN_OUT_PATH: &'static str = "/auth/sign-out";

    pub fn new(guard: SessionGuard) -> Self {
        Self { guard }
    }

    /// Sign in and make the account the current session user.
    ///
    /// Only administrator and artist accounts are accepted.
    pub async fn sign_in(&self, request: &SignInRequest) -> Result<UserType> {
        request
            .validate()
            .map_err(|e| ClientError::Validation(e.to_string()))?;
        if request.password.trim().is_empty() {
            return Err(ClientError::Validation(
                "Password must be at least 6 characters long and not blank".to_string(),
            ));
        }

        let client = self.guard.client();
        let url = client.config().resolve(Self::SIGN_IN_PATH);
        tracing::info!(email = %request.email, "Signing in");

        let response = client
            .http()
            .post(&url)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let err = ClientError::from_response(response).await;
            tracing::warn!(email = %request.email, error = %err, "Sign-in rejected");
            return Err(err);
        }

        let body: SignInResponse = response
            .json()
            .await
            .map_err(|e| ClientError::Decode(format!("Sign-in response: {}", e)))?;

        let user_type = body
            .user_type
            .ok_or_else(|| ClientError::Decode("userType missing".to_string()))?;

        if !user_type.can_use_console() {
            tracing::warn!(email = %request.email, %user_type, "Account type not allowed");
            return Err(ClientError::Forbidden("Invalid user type".to_string()));
        }

        self.guard.session().begin(
            &request.email,
            Credentials {
                access_token: Some(body.access_token),
                refresh_token: Some(body.refresh_token),
                user_type: Some(user_type),
                updated_at: None,
            },
        );

        tracing::info!(email = %request.email, %user_type, "Signed in");
        Ok(user_type)
    }

    /// Sign out on the backend and drop the local session.
    ///
    /// The session is cleared even when the backend call fails.
    pub async fn sign_out(&self) -> Result<()> {
        tracing::info!("Signing out");

        let result = async {
            let response = self
                .guard
                .request(
                    Self::SIGN_OUT_PATH,
                    RequestOptions::put(Body::Empty),
                )
                .await?;
            if !response.status().is_success() {
                return Err(ClientError::from_response(response).await);
            }
            Ok(())
        }
        .await;

        self.guard.session().clear();

        if let Err(ref e) = result {
            tracing::warn!(error = %e, "Backend sign-out failed, local session cleared anyway");
        }
        result
    }
}
