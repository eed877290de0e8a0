// ============================
// crates/backend-lib/src/directory.rs
// ============================
//! User directory abstraction with an in-memory implementation.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::{mapref::entry::Entry, DashMap};
use std::sync::Arc;
use tracing::instrument;

use crate::error::{AppError, SignupFailure};
use crate::validation::{ValidationOutcome, USER_EXISTS};

/// A stored account
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: String,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Trait for user directory backends
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Find a user by exact username
    async fn lookup(&self, username: &str) -> Result<Option<UserRecord>, AppError>;

    /// Add a user; fails with [`AppError::Conflict`] if the name is taken
    async fn insert(&self, record: UserRecord) -> Result<(), AppError>;
}

/// `DashMap`-backed directory keyed by username
#[derive(Clone, Default)]
pub struct MemoryDirectory {
    users: Arc<DashMap<String, UserRecord>>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserDirectory for MemoryDirectory {
    async fn lookup(&self, username: &str) -> Result<Option<UserRecord>, AppError> {
        Ok(self.users.get(username).map(|entry| entry.value().clone()))
    }

    async fn insert(&self, record: UserRecord) -> Result<(), AppError> {
        match self.users.entry(record.username.clone()) {
            Entry::Occupied(_) => Err(AppError::Conflict(record.username)),
            Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(())
            },
        }
    }
}

/// Existence check: 422 "User already exists." when the name is taken.
#[instrument(skip(directory))]
pub async fn user_exists(
    directory: &dyn UserDirectory,
    username: &str,
) -> Result<ValidationOutcome, AppError> {
    let found = directory.lookup(username).await?;
    Ok(found.map(|_| SignupFailure::unprocessable(USER_EXISTS)))
}
