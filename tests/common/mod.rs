// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process mock of the console backend.
//!
//! Resources accept exactly one bearer token (`valid_token`); the refresh
//! endpoint issues `token2`, `token3`, ... and makes the new one valid.

#![allow(dead_code)]

use axum::{
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{post, put},
    Json, Router,
};
use msma_console::{
    config::Config,
    error::ClientError,
    models::{Credentials, UserType},
    services::{AuthenticatedClient, LoginRedirect, SessionGuard},
    session::{MemorySessionStore, SessionStore},
    Console,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const USER: &str = "admin@msma.dev";

/// A request seen by a resource endpoint.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
}

pub struct BackendState {
    pub valid_token: Mutex<String>,
    pub refresh_calls: AtomicUsize,
    pub refresh_bodies: Mutex<Vec<Value>>,
    pub refresh_delay: Mutex<Duration>,
    /// When set, the refresh endpoint answers with this status.
    pub refresh_reject: Mutex<Option<StatusCode>>,
    /// Status used to reject a bearer token.
    pub reject_status: Mutex<StatusCode>,
    /// Resources reject even the valid token.
    pub always_unauthorized: AtomicBool,
    /// Resources answer 500 even for the valid token.
    pub always_server_error: AtomicBool,
    pub resource_calls: AtomicUsize,
    pub seen: Mutex<Vec<SeenRequest>>,
    pub sign_in_calls: AtomicUsize,
    /// `userType` returned by sign-in; `None` omits the field.
    pub sign_in_user_type: Mutex<Option<&'static str>>,
    pub sign_out_status: Mutex<StatusCode>,
}

impl Default for BackendState {
    fn default() -> Self {
        Self {
            valid_token: Mutex::new("token1".to_string()),
            refresh_calls: AtomicUsize::new(0),
            refresh_bodies: Mutex::new(Vec::new()),
            refresh_delay: Mutex::new(Duration::ZERO),
            refresh_reject: Mutex::new(None),
            reject_status: Mutex::new(StatusCode::UNAUTHORIZED),
            always_unauthorized: AtomicBool::new(false),
            always_server_error: AtomicBool::new(false),
            resource_calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
            sign_in_calls: AtomicUsize::new(0),
            sign_in_user_type: Mutex::new(Some("ADMIN")),
            sign_out_status: Mutex::new(StatusCode::OK),
        }
    }
}

impl BackendState {
    pub fn refresh_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    pub fn resource_calls(&self) -> usize {
        self.resource_calls.load(Ordering::SeqCst)
    }

    /// Invalidate every token issued so far.
    pub fn expire_tokens(&self) {
        *self.valid_token.lock().unwrap() = "expired".to_string();
    }

    pub fn set_refresh_delay(&self, delay: Duration) {
        *self.refresh_delay.lock().unwrap() = delay;
    }

    pub fn reject_refresh(&self, status: StatusCode) {
        *self.refresh_reject.lock().unwrap() = Some(status);
    }

    /// Reject tokens with `status` (401 or 403) instead of 401.
    pub fn reject_tokens_with(&self, status: StatusCode) {
        *self.reject_status.lock().unwrap() = status;
    }

    pub fn seen(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }

    pub fn seen_for(&self, path: &str) -> Vec<SeenRequest> {
        self.seen()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }
}

pub struct MockBackend {
    pub base_url: String,
    pub state: Arc<BackendState>,
}

impl MockBackend {
    /// Client configuration pointing at this backend with short timeouts.
    pub fn config(&self) -> Config {
        let mut config = Config::with_base_url(&self.base_url);
        config.request_timeout = Duration::from_secs(5);
        config.refresh_timeout = Duration::from_secs(5);
        config
    }
}

/// Start a mock backend on an ephemeral port.
pub async fn spawn_backend() -> MockBackend {
    let state = Arc::new(BackendState::default());

    let app = Router::new()
        .route("/api/v1/auth/refresh", put(refresh))
        .route("/api/v1/auth/sign-in", post(sign_in))
        .fallback(resource)
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock backend");
    let addr = listener.local_addr().expect("Mock backend address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Mock backend failed");
    });

    MockBackend {
        base_url: format!("http://{}/api/v1", addr),
        state,
    }
}

/// Session with `token1` / `refresh1` for [`USER`].
pub fn signed_in_session() -> Arc<MemorySessionStore> {
    let session = Arc::new(MemorySessionStore::new());
    session.begin(
        USER,
        Credentials {
            access_token: Some("token1".to_string()),
            refresh_token: Some("refresh1".to_string()),
            user_type: Some(UserType::Admin),
            updated_at: None,
        },
    );
    session
}

/// Redirect that counts how often it fired.
pub fn counting_redirect() -> (Arc<dyn LoginRedirect>, Arc<AtomicUsize>) {
    let count = Arc::new(AtomicUsize::new(0));
    let counter = count.clone();
    let redirect: Arc<dyn LoginRedirect> = Arc::new(move |_login_url: &str, _cause: &ClientError| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    (redirect, count)
}

pub fn client(config: Config, session: Arc<MemorySessionStore>) -> AuthenticatedClient {
    AuthenticatedClient::new(config, session).expect("Failed to build client")
}

pub fn guard(
    config: Config,
    session: Arc<MemorySessionStore>,
) -> (SessionGuard, Arc<AtomicUsize>) {
    let (redirect, count) = counting_redirect();
    (SessionGuard::new(client(config, session), redirect), count)
}

pub fn console(
    config: Config,
    session: Arc<MemorySessionStore>,
) -> (Console, Arc<AtomicUsize>) {
    let (redirect, count) = counting_redirect();
    let console = Console::new(config, session, redirect).expect("Failed to build console");
    (console, count)
}

/// Assert the session holds nothing at all.
pub fn assert_session_cleared(session: &MemorySessionStore) {
    assert!(session.current_user().is_none(), "current user should be cleared");
    assert!(session.snapshot().is_none(), "snapshot should be empty");
    assert_eq!(session.stored_users(), 0, "no credentials should remain");
}

async fn refresh(State(state): State<Arc<BackendState>>, Json(body): Json<Value>) -> Response {
    let call = state.refresh_calls.fetch_add(1, Ordering::SeqCst) + 1;
    state.refresh_bodies.lock().unwrap().push(body);

    let delay = *state.refresh_delay.lock().unwrap();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let reject = *state.refresh_reject.lock().unwrap();
    if let Some(status) = reject {
        return (status, Json(json!({"message": "Refresh token expired"}))).into_response();
    }

    let token = format!("token{}", call + 1);
    *state.valid_token.lock().unwrap() = token.clone();
    Json(Value::String(token)).into_response()
}

async fn sign_in(State(state): State<Arc<BackendState>>, Json(body): Json<Value>) -> Response {
    state.sign_in_calls.fetch_add(1, Ordering::SeqCst);

    if body["password"] == "wrong-password" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"status": "400", "message": "Invalid email or password"})),
        )
            .into_response();
    }

    let mut payload = json!({"accessToken": "token1", "refreshToken": "refresh1"});
    if let Some(user_type) = *state.sign_in_user_type.lock().unwrap() {
        payload["userType"] = Value::String(user_type.to_string());
    }
    Json(payload).into_response()
}

async fn resource(
    State(state): State<Arc<BackendState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    state.resource_calls.fetch_add(1, Ordering::SeqCst);

    let header_str = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
    };
    let authorization = header_str(header::AUTHORIZATION);
    let path = uri.path().to_string();

    state.seen.lock().unwrap().push(SeenRequest {
        method: method.clone(),
        path: path.clone(),
        authorization: authorization.clone(),
        content_type: header_str(header::CONTENT_TYPE),
    });

    let expected = format!("Bearer {}", state.valid_token.lock().unwrap());
    if authorization.as_deref() != Some(expected.as_str())
        || state.always_unauthorized.load(Ordering::SeqCst)
    {
        let status = *state.reject_status.lock().unwrap();
        return (status, Json(json!({"message": "Invalid access token"}))).into_response();
    }

    if state.always_server_error.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"message": "Database unavailable"})),
        )
            .into_response();
    }

    match path.as_str() {
        "/api/v1/auth/sign-out" if method == Method::PUT => {
            let status = *state.sign_out_status.lock().unwrap();
            (status, Json(json!({"status": status.as_u16().to_string()}))).into_response()
        }
        "/api/v1/search/songs" if method == Method::POST => Json(json!({
            "songs": [
                {"id": 1, "title": "First Light", "songStatus": "ACCEPTED", "genreNameList": ["Pop"]},
                {"id": 2, "title": "Night Drive", "songStatus": "DRAFT"}
            ],
            "currentPage": 1,
            "totalPages": 1,
            "totalElements": 2
        }))
        .into_response(),
        "/api/v1/search/accounts" if method == Method::POST => Json(json!({
            "content": [{"id": 9, "email": "artist@msma.dev", "userType": "ARTIST", "status": 1}],
            "currentPage": 1,
            "totalPages": 1,
            "totalElements": 1
        }))
        .into_response(),
        "/api/v1/search/albums" if method == Method::POST => Json(json!({
            "albums": [{"id": 4, "name": "Debut", "status": "ACCEPTED"}],
            "currentPage": 1,
            "totalPages": 1,
            "totalElements": 1
        }))
        .into_response(),
        "/api/v1/search/playlists" if method == Method::POST => Json(json!({
            "playlists": [],
            "currentPage": 1,
            "totalPages": 0,
            "totalElements": 0
        }))
        .into_response(),
        "/api/v1/artist/song/createDraft" if method == Method::POST => {
            Json(json!({"id": 77, "title": "Draft", "songStatus": "DRAFT"})).into_response()
        }
        "/api/v1/artist/totalFollowers" if method == Method::GET => {
            (StatusCode::NOT_FOUND, Json(json!({"message": "ENTITY_NOT_FOUND"}))).into_response()
        }
        p if method == Method::GET && p.starts_with("/api/v1/artist/total") => {
            let value = match p.trim_start_matches("/api/v1/artist/total") {
                "Songs" => 12,
                "Playlists" => 3,
                "Albums" => 2,
                "Listeners" => 340,
                "Likes" => 78,
                "Downloads" => 9,
                _ => 0,
            };
            Json(json!(value)).into_response()
        }
        p if method == Method::DELETE && p.starts_with("/api/v1/artist/") && p.contains("/delete/") => {
            Json(json!({"status": "200", "message": "SUCCESS"})).into_response()
        }
        "/api/v1/missing" => {
            (StatusCode::NOT_FOUND, Json(json!({"message": "Not found"}))).into_response()
        }
        _ => Json(json!({"ok": true, "path": path})).into_response(),
    }
}
