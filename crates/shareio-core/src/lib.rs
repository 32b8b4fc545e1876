//! Core logic for the Share IO admin dashboard.
//!
//! Platform-neutral: the browser binary plugs its REST/streaming backends
//! into the traits in [`backend`], tests plug in [`mock`].
//!
//! - [`AdminSession`] - login, restore and logout transitions
//! - [`AdminStore`] - injected state service (get/update/subscribe)
//! - [`ShareRepository`] - share CRUD and the live subscription
//! - [`ListView`] - search, filter, sort and pagination
//! - [`route`] - the two-table route guard
//! - [`live`] - folding stream events into snapshots

pub mod admin;
pub mod backend;
pub mod error;
pub mod json_path;
pub mod live;
pub mod model;
pub mod notice;
pub mod repository;
pub mod route;
pub mod session;
pub mod state;
pub mod view;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use admin::{AdminSession, RestoreOutcome};
pub use backend::{AuthBackend, Clock, DataStore, KeyValueStore, SnapshotListener};
pub use error::{AdminError, AuthError, LoginError, SessionError, StorageError, StoreError};
pub use model::{FileEntry, FileRecord, FileSlots, Identity, Share, normalize_shares};
pub use notice::{Notice, NoticeKind, Notices};
pub use repository::ShareRepository;
pub use session::{Credentials, SessionPolicy, SessionStore};
pub use state::{AdminState, AdminStore, ListenerId, SessionState};
pub use view::{ListQuery, ListView, PageView, SortKey, TypeFilter};
