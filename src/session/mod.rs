// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session storage for the signed-in console user.
//!
//! The store is injected into every component that touches credentials so
//! tests can run against isolated sessions.

pub mod memory;

pub use memory::MemorySessionStore;

use crate::models::Credentials;
use std::sync::Arc;

/// Consistent view of the current user and their credentials.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub user_id: String,
    pub credentials: Credentials,
}

/// Storage for the current principal and their tokens.
///
/// Credentials are namespaced by user identifier. Implementations must make
/// `clear` atomic with respect to `snapshot`: a reader sees either the full
/// session or no session.
pub trait SessionStore: Send + Sync {
    /// Identifier of the signed-in user, if any.
    fn current_user(&self) -> Option<String>;

    /// Current user plus credentials, read in one step.
    fn snapshot(&self) -> Option<SessionSnapshot>;

    /// Start a session: make `user_id` current and store its credentials.
    fn begin(&self, user_id: &str, credentials: Credentials);

    /// Replace the access token of `user_id`.
    ///
    /// Returns `false` without writing when `user_id` is no longer the
    /// current user, so a late refresh cannot resurrect a cleared session.
    fn set_access_token(&self, user_id: &str, access_token: &str) -> bool;

    /// Replace the refresh token of `user_id` (same rules as above).
    fn set_refresh_token(&self, user_id: &str, refresh_token: &str) -> bool;

    /// Drop the current user and all of their credentials.
    fn clear(&self);

    /// End the session of `user_id` only.
    ///
    /// Returns `false` and leaves the store untouched when another user (or
    /// nobody) is current.
    fn clear_user(&self, user_id: &str) -> bool;
}

/// Shared session handle passed between services.
pub type SharedSession = Arc<dyn SessionStore>;
