// ============================
// crates/backend-lib/src/auth/session.rs
// ============================
//! Session token handling and management.
use metrics::{counter, gauge};
use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, SystemTime},
};
use tokio::sync::RwLock;
use tracing::debug;

use super::token_generator::new_session_token;
use crate::metrics::{SESSION_ACTIVE, SESSION_CREATED, SESSION_EXPIRED};

/// Default session TTL, matching the cookie max-age (7 days)
pub const SESSION_TTL: Duration = Duration::from_secs(60 * 60 * 24 * 7);

/// Session information
#[derive(Clone, Debug)]
pub struct Session {
    pub user_id: String,
    pub username: String,
    pub created_at: SystemTime,
    pub expires_at: SystemTime,
}

/// Session manager for handling authentication tokens
#[derive(Clone)]
pub struct SessionManager {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    ttl: Duration,
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new(SESSION_TTL)
    }
}

impl SessionManager {
    /// Create a new session manager
    pub fn new(ttl: Duration) -> Self {
        SessionManager {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Create a new session and return its token
    pub async fn create_session(&self, user_id: String, username: String) -> String {
        let token = new_session_token();
        let now = SystemTime::now();
        let session = Session {
            user_id,
            username,
            created_at: now,
            expires_at: now + self.ttl,
        };

        let mut sessions = self.sessions.write().await;
        sessions.insert(token.clone(), session);

        counter!(SESSION_CREATED).increment(1);
        gauge!(SESSION_ACTIVE).set(sessions.len() as f64);

        token
    }

    /// Get a session by token
    pub async fn get(&self, token: &str) -> Option<Session> {
        let sessions = self.sessions.read().await;
        sessions.get(token).cloned()
    }

    /// Validate a session token
    pub async fn validate_session(&self, token: &str) -> bool {
        let sessions = self.sessions.read().await;
        sessions
            .get(token)
            .is_some_and(|session| SystemTime::now() < session.expires_at)
    }

    /// Drop expired sessions, returning how many were removed
    pub async fn purge_expired(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let now = SystemTime::now();
        let before_count = sessions.len();

        sessions.retain(|_, session| now < session.expires_at);

        let after_count = sessions.len();
        let removed = before_count - after_count;

        if removed > 0 {
            debug!(removed, "purged expired sessions");
            counter!(SESSION_EXPIRED).increment(removed as u64);
            gauge!(SESSION_ACTIVE).set(after_count as f64);
        }

        removed
    }

    /// Periodically purge expired sessions; runs until the task is dropped
    pub fn spawn_cleanup(&self, interval: Duration) -> tokio::task::JoinHandle<()> {
        let manager = self.clone();
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;
                manager.purge_expired().await;
            }
        })
    }
}
