//! In-memory collaborators for tests.
//!
//! All of them are cheap `Rc` clones, so a test can hand one copy to
//! [`crate::AdminSession`] and keep another to inspect or steer it.
//!
//! [`MemoryDataStore`] queues change notifications instead of delivering
//! them inline: writes become visible to subscribers only after
//! [`MemoryDataStore::deliver`], the way a real change feed arrives on a
//! later tick.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use serde_json::{Map, Value};

use crate::backend::{AuthBackend, Clock, DataStore, KeyValueStore, SnapshotListener};
use crate::error::{AuthError, StorageError, StoreError};
use crate::json_path;
use crate::model::Identity;

// =============================================================================
// Clock
// =============================================================================

/// Clock that only moves when told to.
#[derive(Clone, Default)]
pub struct ManualClock(Rc<Cell<i64>>);

impl ManualClock {
    pub fn at(now_ms: i64) -> Self {
        Self(Rc::new(Cell::new(now_ms)))
    }

    pub fn set(&self, now_ms: i64) {
        self.0.set(now_ms);
    }

    pub fn advance(&self, ms: i64) {
        self.0.set(self.0.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.0.get()
    }
}

// =============================================================================
// Key-value storage
// =============================================================================

#[derive(Clone, Default)]
pub struct MemoryStorage(Rc<RefCell<HashMap<String, String>>>);

impl MemoryStorage {
    pub fn contains(&self, key: &str) -> bool {
        self.0.borrow().contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.0.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.0
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.0.borrow_mut().remove(key);
        Ok(())
    }
}

// =============================================================================
// Auth
// =============================================================================

#[derive(Default)]
struct AuthInner {
    accounts: RefCell<HashMap<String, (String, Identity)>>,
    resumed: RefCell<Option<Identity>>,
    fail_sign_out: Cell<bool>,
}

/// Auth backend with a fixed set of accounts.
#[derive(Clone, Default)]
pub struct MemoryAuth(Rc<AuthInner>);

impl MemoryAuth {
    /// Register an account and return its identity.
    pub fn add_account(&self, email: &str, password: &str) -> Identity {
        let identity = Identity {
            uid: format!("uid-{}", email.split('@').next().unwrap_or(email)),
            email: email.to_string(),
            display_name: None,
            id_token: Some(format!("token-{}", email)),
        };
        self.0
            .accounts
            .borrow_mut()
            .insert(email.to_string(), (password.to_string(), identity.clone()));
        identity
    }

    pub fn fail_sign_out(&self, fail: bool) {
        self.0.fail_sign_out.set(fail);
    }

    /// Identity passed to the last [`AuthBackend::resume`] call.
    pub fn resumed(&self) -> Option<Identity> {
        self.0.resumed.borrow().clone()
    }
}

impl AuthBackend for MemoryAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let accounts = self.0.accounts.borrow();
        let (expected, identity) = accounts.get(email).ok_or(AuthError::UserNotFound)?;
        if expected != password {
            return Err(AuthError::WrongPassword);
        }
        Ok(identity.clone())
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        if self.0.fail_sign_out.get() {
            return Err(AuthError::Network("offline".to_string()));
        }
        Ok(())
    }

    fn resume(&self, identity: &Identity) {
        *self.0.resumed.borrow_mut() = Some(identity.clone());
    }
}

// =============================================================================
// Data store
// =============================================================================

#[derive(Default)]
struct StoreInner {
    tree: RefCell<Value>,
    listeners: RefCell<Vec<(u64, String, SnapshotListener)>>,
    next_id: Cell<u64>,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
    read_hook: RefCell<Option<Box<dyn FnOnce()>>>,
}

/// Realtime store backed by one JSON tree.
#[derive(Clone, Default)]
pub struct MemoryDataStore(Rc<StoreInner>);

/// Subscription handle; dropping it removes the listener.
pub struct MemorySubscription {
    id: u64,
    store: Weak<StoreInner>,
}

impl Drop for MemorySubscription {
    fn drop(&mut self) {
        if let Some(store) = self.store.upgrade() {
            store
                .listeners
                .borrow_mut()
                .retain(|(id, _, _)| *id != self.id);
        }
    }
}

impl MemoryDataStore {
    /// Write directly, bypassing failure flags.
    pub fn seed(&self, path: &str, value: Value) {
        json_path::set(&mut self.0.tree.borrow_mut(), path, value);
    }

    /// Remove directly, bypassing failure flags.
    pub fn purge(&self, path: &str) {
        json_path::remove(&mut self.0.tree.borrow_mut(), path);
    }

    /// Run `hook` inside the next read, after the value was captured and
    /// before it is returned.
    pub fn during_next_read(&self, hook: impl FnOnce() + 'static) {
        *self.0.read_hook.borrow_mut() = Some(Box::new(hook));
    }

    pub fn value_at(&self, path: &str) -> Option<Value> {
        json_path::get(&self.0.tree.borrow(), path).cloned()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.0.fail_reads.set(fail);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.0.fail_writes.set(fail);
    }

    pub fn listener_count(&self) -> usize {
        self.0.listeners.borrow().len()
    }

    /// Push the current snapshot to every subscriber.
    pub fn deliver(&self) {
        let listeners: Vec<(String, SnapshotListener)> = self
            .0
            .listeners
            .borrow()
            .iter()
            .map(|(_, path, listener)| (path.clone(), listener.clone()))
            .collect();

        for (path, listener) in listeners {
            let snapshot = self.value_at(&path);
            listener(snapshot.as_ref());
        }
    }

    fn check_write(&self) -> Result<(), StoreError> {
        if self.0.fail_writes.get() {
            return Err(StoreError::Write("Permission denied".to_string()));
        }
        Ok(())
    }
}

impl DataStore for MemoryDataStore {
    type Subscription = MemorySubscription;

    async fn read(&self, path: &str) -> Result<Option<Value>, StoreError> {
        if self.0.fail_reads.get() {
            return Err(StoreError::Read("Permission denied".to_string()));
        }
        let value = self.value_at(path);
        let hook = self.0.read_hook.borrow_mut().take();
        if let Some(hook) = hook {
            hook();
        }
        Ok(value)
    }

    async fn write(&self, path: &str, value: Value) -> Result<(), StoreError> {
        self.check_write()?;
        self.seed(path, value);
        Ok(())
    }

    async fn update(&self, path: &str, partial: Map<String, Value>) -> Result<(), StoreError> {
        self.check_write()?;
        json_path::merge(&mut self.0.tree.borrow_mut(), path, partial);
        Ok(())
    }

    async fn remove(&self, path: &str) -> Result<(), StoreError> {
        self.check_write()?;
        json_path::remove(&mut self.0.tree.borrow_mut(), path);
        Ok(())
    }

    fn subscribe(
        &self,
        path: &str,
        listener: SnapshotListener,
    ) -> Result<MemorySubscription, StoreError> {
        let id = self.0.next_id.get();
        self.0.next_id.set(id + 1);
        self.0
            .listeners
            .borrow_mut()
            .push((id, path.to_string(), listener));
        Ok(MemorySubscription {
            id,
            store: Rc::downgrade(&self.0),
        })
    }
}
