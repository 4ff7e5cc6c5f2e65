// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Process-local session store.

use chrono::Utc;
use dashmap::DashMap;
use std::sync::{PoisonError, RwLock};

use super::{SessionSnapshot, SessionStore};
use crate::models::Credentials;

/// In-memory session, one per console process.
///
/// The current-user slot is guarded by a `RwLock`; every credential read or
/// write happens while that lock is held, which keeps `clear` atomic.
#[derive(Default)]
pub struct MemorySessionStore {
    current_user: RwLock<Option<String>>,
    /// Credentials keyed by user identifier.
    credentials: DashMap<String, Credentials>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of users with stored credentials (used by tests).
    pub fn stored_users(&self) -> usize {
        self.credentials.len()
    }

    fn update_current<F>(&self, user_id: &str, apply: F) -> bool
    where
        F: FnOnce(&mut Credentials),
    {
        let current = self
            .current_user
            .read()
            .unwrap_or_else(PoisonError::into_inner);

        if current.as_deref() != Some(user_id) {
            tracing::debug!(user = %user_id, "Ignoring credential write for inactive user");
            return false;
        }

        let mut entry = self.credentials.entry(user_id.to_string()).or_default();
        apply(entry.value_mut());
        entry.updated_at = Some(Utc::now());
        true
    }
}

impl SessionStore for MemorySessionStore {
    fn current_user(&self) -> Option<String> {
        self.current_user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn snapshot(&self) -> Option<SessionSnapshot> {
        let current = self
            .current_user
            .read()
            .unwrap_or_else(PoisonError::into_inner);

        let user_id = current.as_ref()?.clone();
        let credentials = self
            .credentials
            .get(&user_id)
            .map(|c| c.value().clone())
            .unwrap_or_default();

        Some(SessionSnapshot {
            user_id,
            credentials,
        })
    }

    fn begin(&self, user_id: &str, mut credentials: Credentials) {
        let mut current = self
            .current_user
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        // A previous user's credentials never outlive their session.
        if let Some(previous) = current.take() {
            if previous != user_id {
                self.credentials.remove(&previous);
            }
        }

        credentials.updated_at = Some(Utc::now());
        self.credentials.insert(user_id.to_string(), credentials);
        *current = Some(user_id.to_string());

        tracing::info!(user = %user_id, "Session started");
    }

    fn set_access_token(&self, user_id: &str, access_token: &str) -> bool {
        self.update_current(user_id, |c| c.access_token = Some(access_token.to_string()))
    }

    fn set_refresh_token(&self, user_id: &str, refresh_token: &str) -> bool {
        self.update_current(user_id, |c| {
            c.refresh_token = Some(refresh_token.to_string())
        })
    }

    fn clear(&self) {
        let mut current = self
            .current_user
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(user_id) = current.take() {
            self.credentials.remove(&user_id);
            tracing::info!(user = %user_id, "Session cleared");
        }
    }

    fn clear_user(&self, user_id: &str) -> bool {
        let mut current = self
            .current_user
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        if current.as_deref() != Some(user_id) {
            tracing::debug!(user = %user_id, "Not the current user, session kept");
            return false;
        }

        *current = None;
        self.credentials.remove(user_id);
        tracing::info!(user = %user_id, "Session cleared");
        true
    }
}
