// ============================
// crates/backend-lib/src/validation/mod.rs
// ============================
//! Signup form validation.
//!
//! Every validator is a pure function returning `None` on success or a 422
//! [`SignupFailure`] carrying the message shown on the form.

use crate::error::SignupFailure;
use regex::Regex;
use std::sync::LazyLock;

/// Minimum password length, counted in UTF-16 code units.
/// A character outside the Basic Multilingual Plane counts twice.
pub const MIN_PASSWORD_LENGTH: usize = 8;

pub const USERNAME_REQUIRED: &str = "A username is required.";
pub const PASSWORD_REQUIRED: &str = "A password is required.";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters long.";
pub const PASSWORD_MISMATCH: &str = "Your password must match.";
pub const PASSWORD_TOO_SIMPLE: &str = "Your password must contain at least one special \
    character, one number, and one uppercase letter.";
pub const USER_EXISTS: &str = "User already exists.";

// Character classes used by the complexity classifier
static UPPERCASE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Z]").unwrap());
static DIGIT_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]").unwrap());
static SPECIAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[!@#$%^&*()_+\-=\[\]{};':"\\|,.<>/?]"#).unwrap());

/// Outcome of a single validator
pub type ValidationOutcome = Option<SignupFailure>;

/// Character categories present in a password
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PasswordFeatures {
    pub has_uppercase: bool,
    pub has_digit: bool,
    pub has_special: bool,
}

impl PasswordFeatures {
    pub fn classify(password: &str) -> Self {
        Self {
            has_uppercase: UPPERCASE_REGEX.is_match(password),
            has_digit: DIGIT_REGEX.is_match(password),
            has_special: SPECIAL_REGEX.is_match(password),
        }
    }
}

pub fn username_required(username: &str) -> ValidationOutcome {
    username
        .is_empty()
        .then(|| SignupFailure::unprocessable(USERNAME_REQUIRED))
}

pub fn password_required(password: &str) -> ValidationOutcome {
    password
        .is_empty()
        .then(|| SignupFailure::unprocessable(PASSWORD_REQUIRED))
}

pub fn password_length(password: &str) -> ValidationOutcome {
    (password.encode_utf16().count() < MIN_PASSWORD_LENGTH)
        .then(|| SignupFailure::unprocessable(PASSWORD_TOO_SHORT))
}

/// Exact comparison, case and whitespace included.
pub fn password_match(password: &str, password_confirm: &str) -> ValidationOutcome {
    (password != password_confirm).then(|| SignupFailure::unprocessable(PASSWORD_MISMATCH))
}

/// Fails only when none of the three categories is present.
pub fn password_complexity(
    has_uppercase: bool,
    has_digit: bool,
    has_special: bool,
) -> ValidationOutcome {
    (!has_uppercase && !has_digit && !has_special)
        .then(|| SignupFailure::unprocessable(PASSWORD_TOO_SIMPLE))
}

/// Returns the first failure in declaration order.
///
/// All outcomes are computed by the caller before the scan; nothing is
/// skipped except the reporting of later failures.
pub fn first_failure<I>(outcomes: I) -> ValidationOutcome
where
    I: IntoIterator<Item = ValidationOutcome>,
{
    outcomes.into_iter().flatten().next()
}
