use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::client::error::ClientError;

/// A stored bearer token and the moment it stops being sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl StoredSession {
    pub fn new(token: String, max_age_secs: i64) -> Self {
        Self {
            token,
            expires_at: Utc::now() + Duration::seconds(max_age_secs),
        }
    }

    pub fn is_live(&self) -> bool {
        !self.token.is_empty() && self.expires_at > Utc::now()
    }
}

/// Client-side holder of the session token, the counterpart of the
/// browser's `auth-token` cookie.
pub trait SessionStore: Send + Sync {
    /// The stored session, live or not.
    fn load(&self) -> Option<StoredSession>;

    fn save(&self, session: &StoredSession) -> Result<(), ClientError>;

    fn clear(&self) -> Result<(), ClientError>;

    /// Token of a live session; expired sessions read as absent.
    fn token(&self) -> Option<String> {
        self.load().filter(StoredSession::is_live).map(|s| s.token)
    }

    fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: Mutex<Option<StoredSession>>,
}

impl MemorySessionStore {
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<StoredSession>>, ClientError> {
        self.session
            .lock()
            .map_err(|_| ClientError::Session("session lock poisoned".to_string()))
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Option<StoredSession> {
        self.lock().ok().and_then(|guard| guard.clone())
    }

    fn save(&self, session: &StoredSession) -> Result<(), ClientError> {
        *self.lock()? = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), ClientError> {
        *self.lock()? = None;
        Ok(())
    }
}
