// ============================
// crates/backend-lib/src/auth/mod.rs
// ============================
//! Authentication module.

pub mod cookie;
pub mod password;
pub mod session;
mod token_generator;
mod service;
mod service_impl;

pub use cookie::{parse_session_cookie, write_session_cookie, CookieContext, AUTH_TOKEN_COOKIE};
pub use password::{hash_password, hash_password_secure, verify_password, DEFAULT_LOG_N};
pub use session::{Session, SessionManager, SESSION_TTL};
pub use service::{AuthError, AuthProvider};
pub use service_impl::DefaultAuth;
