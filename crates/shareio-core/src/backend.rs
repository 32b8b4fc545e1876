//! Collaborator seams.
//!
//! The admin core never talks to a concrete backend. The browser binary
//! supplies REST/streaming implementations; tests use the in-memory ones in
//! [`crate::mock`]. Everything runs on one thread, so the async methods are
//! not required to be `Send`.

use std::rc::Rc;

use serde_json::{Map, Value};

use crate::error::{AuthError, StorageError, StoreError};
use crate::model::Identity;

/// Hosted authentication service.
#[allow(async_fn_in_trait)]
pub trait AuthBackend {
    /// Verify credentials and return the signed-in identity.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError>;

    /// End the backend session.
    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Re-install credentials from a restored identity.
    fn resume(&self, _identity: &Identity) {}
}

/// Snapshot callback for [`DataStore::subscribe`]. Receives the full value
/// at the subscribed path, `None` when it is empty.
pub type SnapshotListener = Rc<dyn Fn(Option<&Value>)>;

/// Hosted realtime data store addressed by slash-separated paths.
#[allow(async_fn_in_trait)]
pub trait DataStore {
    /// Live subscription handle. Dropping it stops delivery.
    type Subscription;

    async fn read(&self, path: &str) -> Result<Option<Value>, StoreError>;

    /// Replace the value at `path`.
    async fn write(&self, path: &str, value: Value) -> Result<(), StoreError>;

    /// Merge `partial` into the value at `path`.
    async fn update(&self, path: &str, partial: Map<String, Value>) -> Result<(), StoreError>;

    async fn remove(&self, path: &str) -> Result<(), StoreError>;

    /// Start delivering snapshots of `path` to `listener`.
    fn subscribe(
        &self,
        path: &str,
        listener: SnapshotListener,
    ) -> Result<Self::Subscription, StoreError>;
}

/// Durable string slots (browser localStorage).
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Wall clock in epoch milliseconds.
pub trait Clock {
    fn now_ms(&self) -> i64;
}
