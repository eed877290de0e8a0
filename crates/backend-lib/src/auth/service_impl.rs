use async_trait::async_trait;
use chrono::Utc;
use signup_common::User;
use std::sync::Arc;
use tracing::{debug, instrument};

use super::{
    hash_password_secure, verify_password, AuthError, AuthProvider, CookieContext, SessionManager,
};
use crate::directory::{UserDirectory, UserRecord};
use crate::error::AppError;

/// In-process auth provider backed by a [`UserDirectory`] and a [`SessionManager`]
pub struct DefaultAuth {
    directory: Arc<dyn UserDirectory>,
    sessions: SessionManager,
    log_n: u8,
}

impl DefaultAuth {
    pub fn new(directory: Arc<dyn UserDirectory>, sessions: SessionManager, log_n: u8) -> Self {
        Self {
            directory,
            sessions,
            log_n,
        }
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Conflict(_) => AuthError::UsernameTaken,
            other => AuthError::Internal(other.to_string()),
        }
    }
}

#[async_trait]
impl AuthProvider for DefaultAuth {
    #[instrument(skip(self, password, password_confirm, _cookies))]
    async fn signup(
        &self,
        username: &str,
        password: &str,
        password_confirm: &str,
        _cookies: &mut CookieContext,
    ) -> Result<(), AuthError> {
        if password != password_confirm {
            return Err(AuthError::PasswordMismatch);
        }

        let mut plain = password.to_string();
        let log_n = self.log_n;
        // scrypt is CPU-bound; keep it off the async workers
        let password_hash =
            tokio::task::spawn_blocking(move || hash_password_secure(&mut plain, log_n))
                .await
                .map_err(|e| AuthError::Internal(e.to_string()))?
                .map_err(|e| AuthError::Internal(e.to_string()))?;

        let record = UserRecord {
            id: uuid::Uuid::new_v4().to_string(),
            username: username.to_string(),
            password_hash,
            created_at: Utc::now(),
        };
        debug!(user_id = %record.id, "account created");
        self.directory.insert(record).await?;
        Ok(())
    }

    #[instrument(skip(self, password, _cookies))]
    async fn login(
        &self,
        username: &str,
        password: &str,
        _cookies: &mut CookieContext,
    ) -> Result<User, AuthError> {
        let record = self
            .directory
            .lookup(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let hash = record.password_hash.clone();
        let plain = password.to_string();
        let verified = tokio::task::spawn_blocking(move || verify_password(&hash, &plain))
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?;
        if !verified {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self
            .sessions
            .create_session(record.id.clone(), record.username.clone())
            .await;

        Ok(User {
            id: record.id,
            username: Some(record.username),
            token: Some(token),
        })
    }
}
