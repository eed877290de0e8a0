use async_trait::async_trait;
use signup_common::User;
use thiserror::Error;

use super::CookieContext;

/// Errors reported by an auth provider
///
/// The signup flow shows `to_string()` to the user, so variants carry
/// user-facing text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("{0}")]
    Rejected(String),

    #[error("Username is already taken.")]
    UsernameTaken,

    #[error("Passwords do not match.")]
    PasswordMismatch,

    #[error("Invalid username or password.")]
    InvalidCredentials,

    #[error("{0}")]
    Internal(String),
}

/// Account creation and sign-in, delegated to by the signup flow.
///
/// Both calls receive the request's cookie context; a provider may set its
/// own cookies there.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn signup(
        &self,
        username: &str,
        password: &str,
        password_confirm: &str,
        cookies: &mut CookieContext,
    ) -> Result<(), AuthError>;

    async fn login(
        &self,
        username: &str,
        password: &str,
        cookies: &mut CookieContext,
    ) -> Result<User, AuthError>;
}
