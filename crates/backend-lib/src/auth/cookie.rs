// ============================
// crates/backend-lib/src/auth/cookie.rs
// ============================
//! Session cookie issuance.
use axum_extra::extract::cookie::{Cookie, CookieJar};
use signup_common::User;
use std::time::Duration;

/// Name of the session cookie
pub const AUTH_TOKEN_COOKIE: &str = "auth_token";

/// Per-request cookie context handed to the auth provider and the cookie writer.
#[derive(Debug, Clone)]
pub struct CookieContext {
    jar: CookieJar,
}

impl Default for CookieContext {
    fn default() -> Self {
        Self::new(CookieJar::new())
    }
}

impl CookieContext {
    pub fn new(jar: CookieJar) -> Self {
        Self { jar }
    }

    pub fn get(&self, name: &str) -> Option<Cookie<'static>> {
        self.jar.get(name).cloned()
    }

    pub fn set(&mut self, cookie: Cookie<'static>) {
        let jar = std::mem::replace(&mut self.jar, CookieJar::new());
        self.jar = jar.add(cookie);
    }

    /// Jar to attach to the response; emits one `Set-Cookie` per change
    pub fn into_jar(self) -> CookieJar {
        self.jar
    }
}

/// Write `auth_token=<id>:<token>` with path `/` and the given max-age.
///
/// Returns `false` without touching the jar when the user lacks an id or token.
pub fn write_session_cookie(cookies: &mut CookieContext, user: &User, max_age: Duration) -> bool {
    let Some((id, token)) = user.session_parts() else {
        return false;
    };

    let max_age_secs = i64::try_from(max_age.as_secs()).unwrap_or(i64::MAX);
    let cookie = Cookie::build((AUTH_TOKEN_COOKIE, format!("{id}:{token}")))
        .path("/")
        .max_age(time::Duration::seconds(max_age_secs))
        .build();
    cookies.set(cookie);
    true
}

/// Split a cookie value into `(id, token)` at the first `:`
pub fn parse_session_cookie(value: &str) -> Option<(&str, &str)> {
    value
        .split_once(':')
        .filter(|(id, token)| !id.is_empty() && !token.is_empty())
}
