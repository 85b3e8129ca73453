/*
[INPUT]:  Authenticated user payloads from login/refresh
[OUTPUT]: Current-user lookups and session clearing
[POS]:    Auth layer - session state port and in-memory implementation
[UPDATE]: When adding persisted stores or changing session metadata
*/

use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};

use crate::types::User;

/// Holder of the current session user.
///
/// The refresh coordinator is the only writer during the auth flow.
pub trait SessionStore: Send + Sync {
    fn get(&self) -> Option<User>;

    fn set(&self, user: User);

    fn clear(&self);
}

/// Stored session data with metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionData {
    pub user: User,
    pub established_at: DateTime<Utc>,
}

/// Thread-safe in-memory session store
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    data: Arc<RwLock<Option<SessionData>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session data including when it was established
    pub fn session(&self) -> Option<SessionData> {
        self.data
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session().is_some()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Option<User> {
        self.session().map(|data| data.user)
    }

    fn set(&self, user: User) {
        let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(SessionData {
            user,
            established_at: Utc::now(),
        });
    }

    fn clear(&self) {
        let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
    }
}
