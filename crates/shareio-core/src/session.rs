//! Session persistence.
//!
//! Two durable slots are kept:
//!
//! - `"session"`: `{ "userData": <identity>, "timestamp": <epoch ms> }`,
//!   the authoritative record checked against [`SessionPolicy`] at startup
//! - `"User-data"`: `{ "state": { "user": ..., "isLoggedIn": ... }, "version": 0 }`,
//!   the persisted store state
//!
//! Whenever the session is discarded both slots go.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::backend::KeyValueStore;
use crate::error::{LoginError, SessionError, StorageError};
use crate::model::Identity;

/// Key of the timestamped session record.
pub const SESSION_KEY: &str = "session";

/// Key of the persisted store state.
pub const STATE_KEY: &str = "User-data";

/// Default expiry window in milliseconds.
pub const DEFAULT_SESSION_TTL_MS: i64 = 2 * 60 * 1000;

/// How long a persisted session stays valid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionPolicy {
    pub ttl_ms: i64,
}

impl SessionPolicy {
    pub fn from_secs(secs: u64) -> Self {
        Self {
            ttl_ms: i64::try_from(secs.saturating_mul(1000)).unwrap_or(i64::MAX),
        }
    }
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self {
            ttl_ms: DEFAULT_SESSION_TTL_MS,
        }
    }
}

/// Timestamped session record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub user_data: Identity,
    pub timestamp: i64,
}

impl SessionRecord {
    /// Return the identity if the record is still inside the window.
    ///
    /// A record exactly `ttl_ms` old is still valid.
    pub fn validate(self, now_ms: i64, policy: SessionPolicy) -> Result<Identity, SessionError> {
        let age_ms = now_ms - self.timestamp;
        if age_ms > policy.ttl_ms {
            Err(SessionError::Expired { age_ms })
        } else {
            Ok(self.user_data)
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedFields {
    user: Option<Identity>,
    is_logged_in: bool,
}

#[derive(Serialize, Deserialize)]
struct PersistedState {
    state: PersistedFields,
    version: u32,
}

/// Reads and writes the session slots.
pub struct SessionStore<K> {
    storage: K,
    policy: SessionPolicy,
}

impl<K: KeyValueStore> SessionStore<K> {
    pub fn new(storage: K, policy: SessionPolicy) -> Self {
        Self { storage, policy }
    }

    pub fn policy(&self) -> SessionPolicy {
        self.policy
    }

    /// Persist a freshly signed-in identity.
    pub fn persist(&self, identity: &Identity, now_ms: i64) -> Result<(), StorageError> {
        let record = SessionRecord {
            user_data: identity.clone(),
            timestamp: now_ms,
        };
        let state = PersistedState {
            state: PersistedFields {
                user: Some(identity.clone()),
                is_logged_in: true,
            },
            version: 0,
        };

        self.storage.set(SESSION_KEY, &to_json(&record)?)?;
        self.storage.set(STATE_KEY, &to_json(&state)?)
    }

    /// Load the stored session, discarding it when expired or unreadable.
    pub fn restore(&self, now_ms: i64) -> Result<Option<Identity>, SessionError> {
        let Some(raw) = self.storage.get(SESSION_KEY) else {
            return Ok(None);
        };

        let result = serde_json::from_str::<SessionRecord>(&raw)
            .map_err(|e| SessionError::Corrupt(e.to_string()))
            .and_then(|record| record.validate(now_ms, self.policy));

        match result {
            Ok(identity) => {
                debug!(uid = %identity.uid, "session restored");
                Ok(Some(identity))
            }
            Err(e) => {
                info!(reason = %e, "discarding stored session");
                self.clear();
                Err(e)
            }
        }
    }

    /// Remove both session slots. Removal is best-effort.
    pub fn clear(&self) {
        let _ = self.storage.remove(SESSION_KEY);
        let _ = self.storage.remove(STATE_KEY);
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, StorageError> {
    serde_json::to_string(value).map_err(|e| StorageError::Serialize(e.to_string()))
}

// =============================================================================
// Login form
// =============================================================================

/// Checked login input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Trim the email and require both fields.
    pub fn validate(email: &str, password: &str) -> Result<Self, LoginError> {
        let email = email.trim();
        let errors = LoginError {
            email: email.is_empty().then_some("Email is required."),
            password: password.is_empty().then_some("Password is required."),
        };

        if errors.is_empty() {
            Ok(Self {
                email: email.to_string(),
                password: password.to_string(),
            })
        } else {
            Err(errors)
        }
    }
}
