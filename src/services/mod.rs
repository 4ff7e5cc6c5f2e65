// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - session-aware backend access.

pub mod auth;
pub mod console;
pub mod coordinator;
pub mod guard;
pub mod refresh;
pub mod request;

pub use auth::AuthService;
pub use console::{ArtistResource, ConsoleApi};
pub use coordinator::AuthenticatedClient;
pub use guard::{LogRedirect, LoginRedirect, SessionGuard};
pub use refresh::{RefreshFailure, TokenRefresher};
pub use request::{Body, FormPart, RequestOptions};
