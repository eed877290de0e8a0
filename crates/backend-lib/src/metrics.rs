// ==============
// crates/backend-lib/src/metrics.rs

//! Central place for metric keys
pub const SIGNUP_ATTEMPTED: &str = "signup.attempted";
pub const SIGNUP_REJECTED: &str = "signup.rejected";
pub const SIGNUP_UPSTREAM_FAILED: &str = "signup.upstream_failed";
pub const SIGNUP_CREATED: &str = "signup.created";
pub const LOGIN_ATTEMPTED: &str = "login.attempted";
pub const LOGIN_SUCCEEDED: &str = "login.succeeded";
pub const SESSION_CREATED: &str = "session.created";
pub const SESSION_EXPIRED: &str = "session.expired";
pub const SESSION_ACTIVE: &str = "session.active";
