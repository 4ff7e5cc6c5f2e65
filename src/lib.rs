// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! MSMA console: session-aware client for the music-streaming admin and
//! artist backend.
//!
//! Requests carry the signed-in user's bearer token; a rejected token is
//! refreshed once for all concurrent callers and the request retried.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod session;

use config::Config;
use error::Result;
use services::{AuthService, AuthenticatedClient, ConsoleApi, LoginRedirect, SessionGuard};
use session::SharedSession;
use std::sync::Arc;

/// Shared console state: one session, one refresh lock, every service.
pub struct Console {
    pub config: Config,
    pub session: SharedSession,
    pub auth: AuthService,
    pub api: ConsoleApi,
}

impl Console {
    pub fn new(
        config: Config,
        session: SharedSession,
        redirect: Arc<dyn LoginRedirect>,
    ) -> Result<Self> {
        let client = AuthenticatedClient::new(config.clone(), session.clone())?;
        let guard = SessionGuard::new(client, redirect);

        Ok(Self {
            config,
            session,
            auth: AuthService::new(guard.clone()),
            api: ConsoleApi::new(guard),
        })
    }
}
