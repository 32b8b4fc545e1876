//! Session controller.
//!
//! [`AdminSession`] owns the login state transitions and wires the
//! collaborators together:
//!
//! - login: validate form → auth backend → persist session → store → live subscription
//! - restore: stored session inside the window → store → live subscription
//! - logout: auth backend → clear storage → release subscription → clear store

use std::rc::Rc;

use tracing::{info, warn};

use crate::backend::{AuthBackend, Clock, DataStore, KeyValueStore};
use crate::error::AdminError;
use crate::model::Identity;
use crate::repository::ShareRepository;
use crate::session::{Credentials, SessionPolicy, SessionStore};
use crate::state::AdminStore;

/// Result of restoring a persisted session at startup.
#[derive(Clone, Debug, PartialEq)]
pub enum RestoreOutcome {
    Restored(Identity),
    /// A stored session existed but was expired or unreadable; it was removed.
    Discarded,
    Absent,
}

pub struct AdminSession<A, D: DataStore, K> {
    auth: A,
    sessions: SessionStore<K>,
    repository: ShareRepository<D>,
    state: AdminStore,
    clock: Rc<dyn Clock>,
}

impl<A, D, K> AdminSession<A, D, K>
where
    A: AuthBackend,
    D: DataStore,
    K: KeyValueStore,
{
    pub fn new(auth: A, store: D, storage: K, policy: SessionPolicy, clock: Rc<dyn Clock>) -> Self {
        let state = AdminStore::new();
        Self {
            auth,
            sessions: SessionStore::new(storage, policy),
            repository: ShareRepository::new(store, state.clone(), clock.clone()),
            state,
            clock,
        }
    }

    /// Shared state handle.
    pub fn state(&self) -> &AdminStore {
        &self.state
    }

    pub fn repository(&self) -> &ShareRepository<D> {
        &self.repository
    }

    pub fn auth(&self) -> &A {
        &self.auth
    }

    /// Restore a persisted session, discarding it when expired.
    ///
    /// A restored session is written back with a fresh timestamp.
    pub fn restore(&self) -> RestoreOutcome {
        let now = self.clock.now_ms();
        match self.sessions.restore(now) {
            Ok(Some(identity)) => {
                self.auth.resume(&identity);
                self.enter(identity.clone(), now);
                RestoreOutcome::Restored(identity)
            }
            Ok(None) => RestoreOutcome::Absent,
            Err(_) => RestoreOutcome::Discarded,
        }
    }

    /// Sign in. On failure the state stays logged out.
    pub async fn login(&self, email: &str, password: &str) -> Result<Identity, AdminError> {
        let credentials = Credentials::validate(email, password)?;
        let identity = self
            .auth
            .sign_in(&credentials.email, &credentials.password)
            .await
            .inspect_err(|e| warn!(error = %e, "sign-in failed"))?;

        info!(uid = %identity.uid, "signed in");
        self.enter(identity.clone(), self.clock.now_ms());
        Ok(identity)
    }

    /// Sign out. On failure nothing local is cleared.
    pub async fn logout(&self) -> Result<(), AdminError> {
        self.auth
            .sign_out()
            .await
            .inspect_err(|e| warn!(error = %e, "sign-out failed"))?;

        self.sessions.clear();
        self.repository.unsubscribe();
        self.state.clear_user();
        info!("signed out");
        Ok(())
    }

    fn enter(&self, identity: Identity, now_ms: i64) {
        if let Err(e) = self.sessions.persist(&identity, now_ms) {
            warn!(error = %e, "could not persist session");
        }
        self.state.set_user(identity);
        if let Err(e) = self.repository.subscribe_live() {
            warn!(error = %e, "live subscription unavailable");
        }
    }
}
