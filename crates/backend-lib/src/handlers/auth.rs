// ============================
// crates/backend-lib/src/handlers/auth.rs
// ============================
//! Signup and login form handlers.
use std::sync::Arc;

use axum::{extract::State, Form};
use axum_extra::extract::cookie::CookieJar;
use signup_common::{LoginForm, SignupForm};

use crate::auth::CookieContext;
use crate::error::AppError;
use crate::signup::AuthOutcome;
use crate::AppState;

/// `POST /signup`
///
/// Responds 200 `{ user }` with an `auth_token` cookie, 422/500
/// `{ error, username? }` on rejection.
pub async fn signup(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<SignupForm>,
) -> Result<(CookieJar, AuthOutcome), AppError> {
    let mut cookies = CookieContext::new(jar);
    let outcome = state.signup.signup(&form, &mut cookies).await?;
    Ok((cookies.into_jar(), outcome))
}

/// `POST /login`
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> (CookieJar, AuthOutcome) {
    let mut cookies = CookieContext::new(jar);
    let outcome = state.signup.login(&form, &mut cookies).await;
    (cookies.into_jar(), outcome)
}

/// `GET /health`
pub async fn health() -> &'static str {
    "ok"
}
