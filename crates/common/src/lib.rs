// ================
// common/src/lib.rs
// ================
//! Common types and structures
//! used for communication between signup clients and the server.
//! This module defines the form bodies and JSON responses of the auth endpoints.

use serde::{Deserialize, Serialize};

/// Signup form submitted as `application/x-www-form-urlencoded`
/// # Fields
/// * `username` - Requested account name
/// * `password` - Plaintext password
/// * `password_confirm` - Repeat of the password, sent as `password-confirm`
///
/// Absent fields deserialize to the empty string.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default, rename = "password-confirm")]
    pub password_confirm: String,
}

/// Login form
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// A user as returned by the auth provider
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct User {
    /// Stable account identifier
    pub id: String,
    /// Account name, when the provider reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Session token; only ever travels in the `auth_token` cookie
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl User {
    /// Drop the session token so the value can be echoed in a response body.
    #[must_use]
    pub fn without_token(mut self) -> Self {
        self.token = None;
        self
    }

    /// `(id, token)` when both are present and non-empty.
    pub fn session_parts(&self) -> Option<(&str, &str)> {
        match self.token.as_deref() {
            Some(token) if !self.id.is_empty() && !token.is_empty() => Some((&self.id, token)),
            _ => None,
        }
    }
}

/// Body of a successful signup or login
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SignupSuccess {
    pub user: User,
}

/// Body of a rejected signup or login (422 / 500)
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FailureBody {
    pub error: String,
    /// Echoed on provider failures so the form can be refilled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}
