//! Shared admin state.
//!
//! [`AdminStore`] is the one state service every collaborator receives by
//! handle. It is a cheap `Rc` clone; listeners registered with
//! [`AdminStore::subscribe`] run after each change, outside the borrow, so a
//! listener may read or update the store again.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::model::{FileRecord, Identity};

/// Login state machine: `LoggedOut -> LoggedIn -> LoggedOut`.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum SessionState {
    #[default]
    LoggedOut,
    LoggedIn(Identity),
}

impl SessionState {
    pub fn is_logged_in(&self) -> bool {
        matches!(self, Self::LoggedIn(_))
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::LoggedIn(identity) => Some(identity),
            Self::LoggedOut => None,
        }
    }
}

/// Everything the dashboard renders from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AdminState {
    pub session: SessionState,
    /// Flattened records from the latest snapshot.
    pub records: Vec<FileRecord>,
    /// Set once a one-time fetch or refresh has completed this session.
    pub has_fetched: bool,
    /// Bumped on every live snapshot; a read that started under an older
    /// generation must not overwrite the cache.
    pub live_generation: u64,
}

impl AdminState {
    pub fn is_logged_in(&self) -> bool {
        self.session.is_logged_in()
    }
}

/// Handle returned by [`AdminStore::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListenerId(u64);

type Listener = Rc<dyn Fn(&AdminState)>;

#[derive(Default)]
struct Inner {
    state: RefCell<AdminState>,
    listeners: RefCell<Vec<(ListenerId, Listener)>>,
    next_id: Cell<u64>,
}

/// Injected state service with get/update/subscribe.
#[derive(Clone, Default)]
pub struct AdminStore {
    inner: Rc<Inner>,
}

impl AdminStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clone of the current state.
    pub fn get(&self) -> AdminState {
        self.inner.state.borrow().clone()
    }

    /// Read the state without cloning.
    pub fn with<R>(&self, f: impl FnOnce(&AdminState) -> R) -> R {
        f(&self.inner.state.borrow())
    }

    pub fn is_logged_in(&self) -> bool {
        self.with(AdminState::is_logged_in)
    }

    /// Mutate the state and notify listeners.
    pub fn update(&self, f: impl FnOnce(&mut AdminState)) {
        let snapshot = {
            let mut state = self.inner.state.borrow_mut();
            f(&mut state);
            state.clone()
        };

        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(&snapshot);
        }
    }

    pub fn subscribe(&self, listener: impl Fn(&AdminState) + 'static) -> ListenerId {
        let id = ListenerId(self.inner.next_id.get());
        self.inner.next_id.set(id.0 + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: ListenerId) {
        self.inner
            .listeners
            .borrow_mut()
            .retain(|(listener_id, _)| *listener_id != id);
    }

    /// Record a signed-in identity.
    pub fn set_user(&self, identity: Identity) {
        self.update(|state| state.session = SessionState::LoggedIn(identity));
    }

    /// Back to logged out, dropping cached records.
    pub fn clear_user(&self) {
        self.update(|state| *state = AdminState::default());
    }

    /// Replace the cached records wholesale.
    pub fn replace_records(&self, records: Vec<FileRecord>, fetched: bool) {
        self.update(|state| {
            state.records = records;
            state.has_fetched |= fetched;
        });
    }

    /// Current live snapshot generation.
    pub fn live_generation(&self) -> u64 {
        self.with(|state| state.live_generation)
    }

    /// Install records delivered by the live subscription.
    pub fn apply_live_snapshot(&self, records: Vec<FileRecord>) {
        self.update(|state| {
            state.records = records;
            state.live_generation += 1;
        });
    }

    /// Install records from a read started at `generation`.
    ///
    /// Returns `false` and keeps the cached records when a live snapshot
    /// landed while the read was in flight, or the session ended.
    pub fn apply_fetched(&self, records: Vec<FileRecord>, generation: u64) -> bool {
        let current = self.with(|state| {
            state.is_logged_in() && state.live_generation == generation
        });
        if !current {
            self.update(|state| state.has_fetched |= state.is_logged_in());
            return false;
        }
        self.replace_records(records, true);
        true
    }
}
