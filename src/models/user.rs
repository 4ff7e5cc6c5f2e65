// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account type and stored session credentials.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Account type as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserType {
    Admin,
    User,
    Artist,
}

impl UserType {
    /// Only administrators and artists may use the management console.
    pub fn can_use_console(self) -> bool {
        matches!(self, UserType::Admin | UserType::Artist)
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UserType::Admin => "ADMIN",
            UserType::User => "USER",
            UserType::Artist => "ARTIST",
        };
        f.write_str(name)
    }
}

/// Credentials held in the session for one user.
///
/// Either token may be absent (e.g. a store populated without an access
/// token);
/// the coordinator treats a missing token as "refresh before use".
#[derive(Clone, Default)]
pub struct Credentials {
    /// Short-lived bearer token
    pub access_token: Option<String>,
    /// Long-lived token exchanged for new access tokens
    pub refresh_token: Option<String>,
    /// Account type captured at sign-in
    pub user_type: Option<UserType>,
    /// Last time any credential was written
    pub updated_at: Option<DateTime<Utc>>,
}

// Tokens are redacted so credentials can be logged with `?`.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .field("user_type", &self.user_type)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}
