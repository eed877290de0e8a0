//! End-to-end tests driving the router with form submissions.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use axum_extra::extract::cookie::Cookie;
use backend_lib::{
    auth::{parse_session_cookie, AuthError, AuthProvider, CookieContext, AUTH_TOKEN_COOKIE},
    config::Settings,
    directory::MemoryDirectory,
    router::create_router,
    signup::SIGNUP_FAILED,
    validation::{PASSWORD_TOO_SHORT, USERNAME_REQUIRED, USER_EXISTS},
    AppState,
};
use serde_json::{json, Value};
use signup_common::User;
use tower::ServiceExt;

/// Provider returning fixed results
struct StubAuth {
    signup_result: Result<(), AuthError>,
    login_result: Result<User, AuthError>,
    calls: AtomicUsize,
}

#[async_trait]
impl AuthProvider for StubAuth {
    async fn signup(
        &self,
        _username: &str,
        _password: &str,
        _password_confirm: &str,
        _cookies: &mut CookieContext,
    ) -> Result<(), AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.signup_result.clone()
    }

    async fn login(
        &self,
        _username: &str,
        _password: &str,
        _cookies: &mut CookieContext,
    ) -> Result<User, AuthError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.login_result.clone()
    }
}

fn test_settings() -> Settings {
    Settings {
        password_hash_log_n: 4,
        ..Settings::default()
    }
}

fn stub_app(auth: Arc<StubAuth>) -> Router {
    let directory = Arc::new(MemoryDirectory::new());
    let state = AppState::with_collaborators(&test_settings(), directory, auth);
    create_router(Arc::new(state))
}

fn form_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(
    app: &Router,
    request: Request<Body>,
) -> (StatusCode, Option<Cookie<'static>>, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .map(|value| Cookie::parse_encoded(value.to_str().unwrap().to_string()).unwrap());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap();
    (status, cookie, body)
}

#[tokio::test]
async fn test_empty_username_is_rejected_first() {
    let auth = Arc::new(StubAuth {
        signup_result: Ok(()),
        login_result: Ok(User::default()),
        calls: AtomicUsize::new(0),
    });
    let app = stub_app(auth.clone());

    let (status, cookie, body) =
        send(&app, form_request("/signup", "username=&password=x&password-confirm=x")).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, json!({ "error": USERNAME_REQUIRED }));
    assert!(cookie.is_none());
    assert_eq!(auth.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_missing_fields_count_as_empty() {
    let auth = Arc::new(StubAuth {
        signup_result: Ok(()),
        login_result: Ok(User::default()),
        calls: AtomicUsize::new(0),
    });
    let app = stub_app(auth);

    let (status, _, body) = send(&app, form_request("/signup", "")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], USERNAME_REQUIRED);
}

#[tokio::test]
async fn test_short_password_is_rejected() {
    let auth = Arc::new(StubAuth {
        signup_result: Ok(()),
        login_result: Ok(User::default()),
        calls: AtomicUsize::new(0),
    });
    let app = stub_app(auth);

    let (status, _, body) = send(
        &app,
        form_request("/signup", "username=newuser&password=abc&password-confirm=abc"),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, json!({ "error": PASSWORD_TOO_SHORT }));
}

#[tokio::test]
async fn test_successful_signup_response_and_cookie() {
    let auth = Arc::new(StubAuth {
        signup_result: Ok(()),
        login_result: Ok(User {
            id: "42".to_string(),
            username: None,
            token: Some("t".to_string()),
        }),
        calls: AtomicUsize::new(0),
    });
    let app = stub_app(auth.clone());

    let (status, cookie, body) = send(
        &app,
        form_request("/signup", "username=newuser&password=Password1&password-confirm=Password1"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "user": { "id": "42" } }));

    let cookie = cookie.expect("auth_token cookie");
    assert_eq!(cookie.name(), AUTH_TOKEN_COOKIE);
    assert_eq!(cookie.value(), "42:t");
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(cookie.max_age(), Some(time::Duration::seconds(604_800)));

    // signup + login
    assert_eq!(auth.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_provider_failure_without_message() {
    let auth = Arc::new(StubAuth {
        signup_result: Err(AuthError::Rejected(String::new())),
        login_result: Ok(User::default()),
        calls: AtomicUsize::new(0),
    });
    let app = stub_app(auth);

    let (status, cookie, body) = send(
        &app,
        form_request("/signup", "username=newuser&password=Password1&password-confirm=Password1"),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "username": "newuser", "error": SIGNUP_FAILED }));
    assert!(cookie.is_none());
}

#[tokio::test]
async fn test_builtin_provider_round_trip() {
    let state = Arc::new(AppState::new(test_settings()));
    let app = create_router(state.clone());

    let (status, cookie, body) = send(
        &app,
        form_request("/signup", "username=ada&password=Secret123%21&password-confirm=Secret123%21"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["username"], "ada");
    assert!(body["user"].get("token").is_none());

    let cookie = cookie.expect("auth_token cookie");
    let (id, token) = parse_session_cookie(cookie.value()).unwrap();
    assert_eq!(body["user"]["id"], id);
    let sessions = state.sessions.as_ref().unwrap();
    assert!(sessions.validate_session(token).await);

    // Same name again
    let (status, _, body) = send(
        &app,
        form_request("/signup", "username=ada&password=Secret123%21&password-confirm=Secret123%21"),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, json!({ "error": USER_EXISTS }));

    // Sign in with the new account
    let (status, cookie, body) =
        send(&app, form_request("/login", "username=ada&password=Secret123%21")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], id);
    assert!(cookie.is_some());

    let (status, cookie, body) =
        send(&app, form_request("/login", "username=ada&password=wrong")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "username": "ada", "error": "Invalid username or password." }));
    assert!(cookie.is_none());

    // Unknown account fails the same way
    let (status, cookie, body) =
        send(&app, form_request("/login", "username=ghost&password=whatever")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["username"], "ghost");
    assert!(cookie.is_none());
}

#[tokio::test]
async fn test_health() {
    let app = create_router(Arc::new(AppState::new(test_settings())));
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
