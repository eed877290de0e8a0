// ============================
// crates/backend-lib/src/signup.rs
// ============================
//! Signup and login flows.
//!
//! A signup submission is checked by every validator before any outcome is
//! inspected; the first failure in [`SignupService::signup`]'s precedence
//! list is reported. Only then is the account created and a session opened.
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use metrics::counter;
use signup_common::{LoginForm, SignupForm, SignupSuccess, User};
use tokio::time::timeout;
use tracing::{debug, info, instrument, warn};

use crate::auth::{write_session_cookie, AuthError, AuthProvider, CookieContext};
use crate::config::SeedUser;
use crate::directory::{user_exists, UserDirectory};
use crate::error::{AppError, SignupFailure};
use crate::metrics::{
    LOGIN_ATTEMPTED, LOGIN_SUCCEEDED, SIGNUP_ATTEMPTED, SIGNUP_CREATED, SIGNUP_REJECTED,
    SIGNUP_UPSTREAM_FAILED,
};
use crate::validation::{
    first_failure, password_complexity, password_length, password_match, password_required,
    username_required, PasswordFeatures,
};

pub const SIGNUP_FAILED: &str = "There was an issue creating your account. Please try again.";
pub const LOGIN_FAILED: &str = "Could not sign you in. Please try again.";

/// Result of a signup or login that reached a decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Success(SignupSuccess),
    Failure(SignupFailure),
}

impl IntoResponse for AuthOutcome {
    fn into_response(self) -> Response {
        match self {
            AuthOutcome::Success(body) => (StatusCode::OK, Json(body)).into_response(),
            AuthOutcome::Failure(failure) => failure.into_response(),
        }
    }
}

/// Sequences validation, account creation, sign-in and cookie issuance
pub struct SignupService {
    directory: Arc<dyn UserDirectory>,
    auth: Arc<dyn AuthProvider>,
    cookie_max_age: Duration,
    upstream_timeout: Duration,
}

impl SignupService {
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        auth: Arc<dyn AuthProvider>,
        cookie_max_age: Duration,
        upstream_timeout: Duration,
    ) -> Self {
        Self {
            directory,
            auth,
            cookie_max_age,
            upstream_timeout,
        }
    }

    /// Validate a signup form, create the account and sign the user in.
    ///
    /// `Err` is reserved for directory failures; every user-facing rejection
    /// is an [`AuthOutcome::Failure`].
    #[instrument(skip(self, form, cookies), fields(username = %form.username))]
    pub async fn signup(
        &self,
        form: &SignupForm,
        cookies: &mut CookieContext,
    ) -> Result<AuthOutcome, AppError> {
        let SignupForm {
            username,
            password,
            password_confirm,
        } = form;
        counter!(SIGNUP_ATTEMPTED).increment(1);

        let features = PasswordFeatures::classify(password);
        let exists = bounded(
            self.upstream_timeout,
            "user directory",
            user_exists(self.directory.as_ref(), username),
        )
        .await??;

        // Precedence order; all entries are already computed
        let outcomes = [
            username_required(username),
            exists,
            password_required(password),
            password_length(password),
            password_match(password, password_confirm),
            password_complexity(features.has_uppercase, features.has_digit, features.has_special),
        ];
        if let Some(failure) = first_failure(outcomes) {
            debug!(error = %failure.error, "signup rejected");
            counter!(SIGNUP_REJECTED).increment(1);
            return Ok(AuthOutcome::Failure(failure));
        }

        let created = timeout(
            self.upstream_timeout,
            self.auth.signup(username, password, password_confirm, cookies),
        )
        .await;
        if let Err(error) = upstream_result(created, SIGNUP_FAILED) {
            warn!(%error, "account creation failed");
            counter!(SIGNUP_UPSTREAM_FAILED).increment(1);
            return Ok(AuthOutcome::Failure(SignupFailure::upstream(username.as_str(), error)));
        }

        // Sign the user in immediately
        let signed_in = timeout(
            self.upstream_timeout,
            self.auth.login(username, password, cookies),
        )
        .await;
        let user = match upstream_result(signed_in, LOGIN_FAILED) {
            Ok(user) => user,
            Err(error) => {
                warn!(%error, "sign-in after signup failed");
                counter!(SIGNUP_UPSTREAM_FAILED).increment(1);
                return Ok(AuthOutcome::Failure(SignupFailure::upstream(username.as_str(), error)));
            },
        };

        info!(user_id = %user.id, "account created");
        counter!(SIGNUP_CREATED).increment(1);
        Ok(AuthOutcome::Success(self.establish_session(user, cookies)))
    }

    /// Sign an existing user in.
    ///
    /// Any provider failure, bad credentials included, is a 500 carrying the
    /// provider's message or the login fallback.
    #[instrument(skip(self, form, cookies), fields(username = %form.username))]
    pub async fn login(&self, form: &LoginForm, cookies: &mut CookieContext) -> AuthOutcome {
        let LoginForm { username, password } = form;
        counter!(LOGIN_ATTEMPTED).increment(1);

        let required = [username_required(username), password_required(password)];
        if let Some(failure) = first_failure(required) {
            debug!(error = %failure.error, "login rejected");
            return AuthOutcome::Failure(failure);
        }

        let signed_in = timeout(
            self.upstream_timeout,
            self.auth.login(username, password, cookies),
        )
        .await;
        let user = match upstream_result(signed_in, LOGIN_FAILED) {
            Ok(user) => user,
            Err(error) => {
                warn!(%error, "sign-in failed");
                return AuthOutcome::Failure(SignupFailure::upstream(username.as_str(), error));
            },
        };

        counter!(LOGIN_SUCCEEDED).increment(1);
        AuthOutcome::Success(self.establish_session(user, cookies))
    }

    /// Create `seed` through the provider unless it already exists.
    ///
    /// Returns whether an account was created.
    pub async fn ensure_user(&self, seed: &SeedUser) -> Result<bool, AppError> {
        if self.directory.lookup(&seed.username).await?.is_some() {
            debug!(username = %seed.username, "seed user already present");
            return Ok(false);
        }

        let mut cookies = CookieContext::default();
        self.auth
            .signup(&seed.username, &seed.password, &seed.password, &mut cookies)
            .await
            .map_err(|e| AppError::Internal(format!("seeding {}: {e}", seed.username)))?;
        info!(username = %seed.username, "seed user created");
        Ok(true)
    }

    fn establish_session(&self, user: User, cookies: &mut CookieContext) -> SignupSuccess {
        if write_session_cookie(cookies, &user, self.cookie_max_age) {
            debug!(user_id = %user.id, "session cookie issued");
        } else {
            warn!(user_id = %user.id, "provider returned no session token; cookie not set");
        }

        SignupSuccess {
            user: user.without_token(),
        }
    }
}

/// Provider result as user-facing text: the trimmed error, or `fallback`
/// when it is empty or the call timed out.
fn upstream_result<T, E>(
    result: Result<Result<T, AuthError>, E>,
    fallback: &str,
) -> Result<T, String> {
    match result {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => {
            let message = err.to_string();
            let message = message.trim();
            if message.is_empty() {
                Err(fallback.to_string())
            } else {
                Err(message.to_string())
            }
        },
        Err(_) => Err(fallback.to_string()),
    }
}

/// Await `fut`, failing with [`AppError::Timeout`] after `limit`
async fn bounded<T>(
    limit: Duration,
    what: &'static str,
    fut: impl Future<Output = T>,
) -> Result<T, AppError> {
    timeout(limit, fut).await.map_err(|_| AppError::Timeout(what))
}
