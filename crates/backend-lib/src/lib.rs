// ============================
// crates/backend-lib/src/lib.rs
// ============================
//! Core backend-lib functionality for the signup server.

pub mod auth;
pub mod config;
pub mod directory;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod router;
pub mod signup;
pub mod validation;

use std::sync::Arc;

use crate::auth::{AuthProvider, DefaultAuth, SessionManager};
use crate::config::Settings;
use crate::directory::{MemoryDirectory, UserDirectory};
use crate::signup::SignupService;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Signup and login flows
    pub signup: Arc<SignupService>,
    /// Sessions of the built-in provider; `None` with external collaborators
    pub sessions: Option<SessionManager>,
}

impl AppState {
    /// Build state around the in-memory directory and the built-in provider
    pub fn new(settings: Settings) -> Self {
        let directory: Arc<dyn UserDirectory> = Arc::new(MemoryDirectory::new());
        let sessions = SessionManager::new(settings.auth_token_max_age());
        let auth = Arc::new(DefaultAuth::new(
            directory.clone(),
            sessions.clone(),
            settings.password_hash_log_n,
        ));

        let mut state = Self::with_collaborators(&settings, directory, auth);
        state.sessions = Some(sessions);
        state
    }

    /// Build state around an external directory and auth provider
    pub fn with_collaborators(
        settings: &Settings,
        directory: Arc<dyn UserDirectory>,
        auth: Arc<dyn AuthProvider>,
    ) -> Self {
        let signup = Arc::new(SignupService::new(
            directory,
            auth,
            settings.auth_token_max_age(),
            settings.upstream_timeout(),
        ));

        Self {
            signup,
            sessions: None,
        }
    }
}
