//! Share repository.
//!
//! Reads and writes shares through a [`DataStore`] and mirrors the
//! flattened result into the [`AdminStore`]. The cached list changes only
//! when a snapshot arrives (fetch, refresh, or the live subscription);
//! writes never touch it directly.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::{Map, Value, json};
use tracing::{debug, info, warn};

use crate::backend::{Clock, DataStore};
use crate::error::StoreError;
use crate::json_path;
use crate::model::{FileRecord, Share, normalize_shares};
use crate::state::AdminStore;

/// Root of the share collection.
pub const SHARES_PATH: &str = "shares";

/// Path of one share.
pub fn share_path(share_id: &str) -> String {
    json_path::join(SHARES_PATH, share_id)
}

/// Path of one file entry inside a share.
pub fn file_path(share_id: &str, file_index: usize) -> String {
    format!("{}/files/{}", share_path(share_id), file_index)
}

pub struct ShareRepository<D: DataStore> {
    store: D,
    state: AdminStore,
    clock: Rc<dyn Clock>,
    subscription: RefCell<Option<D::Subscription>>,
}

impl<D: DataStore> ShareRepository<D> {
    pub fn new(store: D, state: AdminStore, clock: Rc<dyn Clock>) -> Self {
        Self {
            store,
            state,
            clock,
            subscription: RefCell::new(None),
        }
    }

    pub fn data_store(&self) -> &D {
        &self.store
    }

    /// Load shares once per login session.
    ///
    /// Skipped when logged out, when a fetch already completed, or when the
    /// subscription has already filled the cache. A live snapshot that
    /// arrives while the read is in flight wins over the read.
    pub async fn fetch_once(&self) -> Result<(), StoreError> {
        let skip = self.state.with(|s| {
            !s.is_logged_in() || s.has_fetched || !s.records.is_empty()
        });
        if skip {
            return Ok(());
        }

        let generation = self.state.live_generation();
        let records = self.read_all().await?;
        debug!(count = records.len(), "initial share fetch");
        if !self.state.apply_fetched(records, generation) {
            debug!("initial share fetch superseded by live snapshot");
        }
        Ok(())
    }

    /// Re-read every share regardless of cache state.
    ///
    /// Returns the records now cached, which are the live ones when a
    /// snapshot arrived during the read.
    pub async fn refresh(&self) -> Result<Vec<FileRecord>, StoreError> {
        if !self.state.is_logged_in() {
            return Ok(Vec::new());
        }

        let generation = self.state.live_generation();
        let records = self.read_all().await?;
        if self.state.apply_fetched(records.clone(), generation) {
            return Ok(records);
        }
        debug!("share refresh superseded by live snapshot");
        Ok(self.state.with(|s| s.records.clone()))
    }

    async fn read_all(&self) -> Result<Vec<FileRecord>, StoreError> {
        let snapshot = self.store.read(SHARES_PATH).await?;
        Ok(normalize_shares(snapshot.as_ref(), self.clock.now_ms()))
    }

    /// Start the live subscription, replacing any previous one.
    pub fn subscribe_live(&self) -> Result<(), StoreError> {
        self.unsubscribe();

        let state = self.state.clone();
        let clock = self.clock.clone();
        let subscription = self.store.subscribe(
            SHARES_PATH,
            Rc::new(move |snapshot: Option<&Value>| {
                let records = normalize_shares(snapshot, clock.now_ms());
                debug!(count = records.len(), "share snapshot received");
                state.apply_live_snapshot(records);
            }),
        )?;

        *self.subscription.borrow_mut() = Some(subscription);
        info!("live share subscription started");
        Ok(())
    }

    /// Release the live subscription, if any.
    pub fn unsubscribe(&self) {
        if self.subscription.borrow_mut().take().is_some() {
            info!("live share subscription released");
        }
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.borrow().is_some()
    }

    /// Store a new share keyed by the current timestamp.
    ///
    /// Returns the new share id, or `None` when logged out.
    pub async fn create_share(&self, share: &Share) -> Result<Option<String>, StoreError> {
        if !self.state.is_logged_in() {
            return Ok(None);
        }

        let share_id = self.clock.now_ms().to_string();
        let value = serde_json::to_value(share).map_err(|e| StoreError::Write(e.to_string()))?;
        self.store.write(&share_path(&share_id), value).await?;
        Ok(Some(share_id))
    }

    pub async fn update_share(
        &self,
        share_id: &str,
        partial: Map<String, Value>,
    ) -> Result<(), StoreError> {
        if !self.state.is_logged_in() {
            return Ok(());
        }
        self.store.update(&share_path(share_id), partial).await
    }

    /// Delete a share with all of its files.
    pub async fn delete_share(&self, share_id: &str) -> Result<(), StoreError> {
        if !self.state.is_logged_in() {
            return Ok(());
        }
        self.store.remove(&share_path(share_id)).await
    }

    /// Rename one file. A blank name is ignored.
    pub async fn rename_file(
        &self,
        share_id: &str,
        file_index: usize,
        new_name: &str,
    ) -> Result<(), StoreError> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            warn!(share_id, file_index, "ignoring blank file name");
            return Ok(());
        }
        if !self.state.is_logged_in() {
            return Ok(());
        }

        let mut partial = Map::new();
        partial.insert("name".to_string(), json!(new_name));
        self.store
            .update(&file_path(share_id, file_index), partial)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(share_path("1699999999"), "shares/1699999999");
        assert_eq!(file_path("abc", 2), "shares/abc/files/2");
    }
}
