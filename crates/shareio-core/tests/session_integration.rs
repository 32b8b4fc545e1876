//! End-to-end flows through `AdminSession` with in-memory collaborators.

use std::rc::Rc;

use serde_json::{Map, json};
use shareio_core::mock::{ManualClock, MemoryAuth, MemoryDataStore, MemoryStorage};
use shareio_core::session::{DEFAULT_SESSION_TTL_MS, SESSION_KEY, STATE_KEY};
use shareio_core::{
    AdminError, AdminSession, AuthError, Clock, FileEntry, FileSlots, ListView, RestoreOutcome, Share,
    SessionPolicy, StoreError,
};

type Session = AdminSession<MemoryAuth, MemoryDataStore, MemoryStorage>;

const EMAIL: &str = "admin@shareio.dev";
const PASSWORD: &str = "correct horse";

struct Harness {
    auth: MemoryAuth,
    store: MemoryDataStore,
    storage: MemoryStorage,
    clock: ManualClock,
}

impl Harness {
    fn new() -> Self {
        let auth = MemoryAuth::default();
        auth.add_account(EMAIL, PASSWORD);
        Self {
            auth,
            store: MemoryDataStore::default(),
            storage: MemoryStorage::default(),
            clock: ManualClock::at(1_700_000_000_000),
        }
    }

    fn session(&self) -> Session {
        AdminSession::new(
            self.auth.clone(),
            self.store.clone(),
            self.storage.clone(),
            SessionPolicy::default(),
            Rc::new(self.clock.clone()),
        )
    }

    fn seed_shares(&self) {
        self.store.seed(
            "shares",
            json!({
                "1699999999": {
                    "createdAt": 1_699_999_999_000i64,
                    "expiresAt": 1_700_000_599_000i64,
                    "files": [
                        { "name": "invoice.pdf", "size": 2048, "type": "application/pdf", "url": "https://cdn/1" },
                        { "name": "scan.png", "size": 4096, "type": "image/png", "url": "https://cdn/2" }
                    ]
                },
                "abc": {
                    "createdAt": 1_700_000_000_000i64,
                    "files": [
                        { "name": "a.txt", "size": 1, "type": "text/plain", "url": "https://cdn/3" },
                        { "name": "b.txt", "size": 2, "type": "text/plain", "url": "https://cdn/4" },
                        { "name": "old.pdf", "size": 3, "type": "application/pdf", "url": "https://cdn/5" }
                    ]
                }
            }),
        );
    }
}

fn record_ids(session: &Session) -> Vec<String> {
    session
        .state()
        .get()
        .records
        .into_iter()
        .map(|r| r.id)
        .collect()
}

#[tokio::test]
async fn login_starts_live_subscription() {
    let h = Harness::new();
    h.seed_shares();
    let session = h.session();

    let identity = session.login(EMAIL, PASSWORD).await.unwrap();
    assert_eq!(identity.email, EMAIL);
    assert!(session.state().is_logged_in());
    assert_eq!(h.store.listener_count(), 1);
    assert!(h.storage.contains(SESSION_KEY));
    assert!(h.storage.contains(STATE_KEY));

    // Nothing arrives until the feed delivers.
    assert!(session.state().get().records.is_empty());
    h.store.deliver();
    assert_eq!(session.state().get().records.len(), 5);
}

#[tokio::test]
async fn wrong_password_stays_logged_out() {
    let h = Harness::new();
    let session = h.session();

    let err = session.login(EMAIL, "nope").await.unwrap_err();
    assert_eq!(err, AdminError::Auth(AuthError::WrongPassword));
    assert_eq!(err.to_string(), "Wrong password.");
    assert!(!session.state().is_logged_in());
    assert_eq!(h.store.listener_count(), 0);
    assert!(h.storage.is_empty());
}

#[tokio::test]
async fn unknown_account_and_blank_form() {
    let h = Harness::new();
    let session = h.session();

    let err = session.login("ghost@shareio.dev", PASSWORD).await.unwrap_err();
    assert_eq!(err, AdminError::Auth(AuthError::UserNotFound));

    let err = session.login("  ", "").await.unwrap_err();
    let AdminError::Login(fields) = &err else {
        panic!("expected validation error, got {:?}", err);
    };
    assert_eq!(fields.email, Some("Email is required."));
    assert_eq!(fields.password, Some("Password is required."));
}

#[tokio::test]
async fn email_is_trimmed_before_sign_in() {
    let h = Harness::new();
    let session = h.session();
    assert!(session.login("  admin@shareio.dev  ", PASSWORD).await.is_ok());
}

#[tokio::test]
async fn fetch_once_reads_at_most_once() {
    let h = Harness::new();
    h.seed_shares();
    let session = h.session();

    // Logged out: no-op.
    session.repository().fetch_once().await.unwrap();
    assert!(session.state().get().records.is_empty());

    session.login(EMAIL, PASSWORD).await.unwrap();
    session.repository().fetch_once().await.unwrap();
    assert_eq!(session.state().get().records.len(), 5);
    assert!(session.state().get().has_fetched);

    // Second call must not hit the store again.
    h.store.fail_reads(true);
    session.repository().fetch_once().await.unwrap();
}

#[tokio::test]
async fn live_snapshot_during_fetch_wins() {
    let h = Harness::new();
    h.seed_shares();
    let session = h.session();
    session.login(EMAIL, PASSWORD).await.unwrap();

    // The read captures both shares; the feed then reports one deleted.
    let store = h.store.clone();
    h.store.during_next_read(move || {
        store.purge("shares/1699999999");
        store.deliver();
    });
    session.repository().fetch_once().await.unwrap();

    assert_eq!(record_ids(&session), ["abc-0", "abc-1", "abc-2"]);
    assert!(session.state().get().has_fetched);
}

#[tokio::test]
async fn live_snapshot_during_refresh_wins() {
    let h = Harness::new();
    h.seed_shares();
    let session = h.session();
    session.login(EMAIL, PASSWORD).await.unwrap();
    h.store.deliver();

    let store = h.store.clone();
    h.store.during_next_read(move || {
        store.purge("shares/abc");
        store.deliver();
    });
    let records = session.repository().refresh().await.unwrap();

    let ids: Vec<_> = records.into_iter().map(|r| r.id).collect();
    assert_eq!(ids, ["1699999999-0", "1699999999-1"]);
    assert_eq!(record_ids(&session), ids);
}

#[tokio::test]
async fn empty_store_yields_empty_view() {
    let h = Harness::new();
    let session = h.session();
    session.login(EMAIL, PASSWORD).await.unwrap();

    session.repository().fetch_once().await.unwrap();
    let state = session.state().get();
    assert!(state.records.is_empty());
    assert!(state.has_fetched);

    let page = ListView::default().view(&state.records);
    assert!(page.items.is_empty());
    assert!(!page.shows_controls());
}

#[tokio::test]
async fn read_failure_propagates() {
    let h = Harness::new();
    let session = h.session();
    session.login(EMAIL, PASSWORD).await.unwrap();

    h.store.fail_reads(true);
    let err = session.repository().fetch_once().await.unwrap_err();
    assert!(matches!(err, StoreError::Read(_)));
    assert!(!session.state().get().has_fetched);
}

#[tokio::test]
async fn delete_share_applies_after_subscription_event() {
    let h = Harness::new();
    h.seed_shares();
    let session = h.session();
    session.login(EMAIL, PASSWORD).await.unwrap();
    h.store.deliver();

    session.repository().delete_share("1699999999").await.unwrap();
    assert!(h.store.value_at("shares/1699999999").is_none());

    // Subscription-driven: the cache still shows the share until the event.
    assert_eq!(session.state().get().records.len(), 5);

    h.store.deliver();
    let records = session.state().get().records;
    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|r| r.share_id != "1699999999"));
}

#[tokio::test]
async fn rename_file_reconciles_through_feed() {
    let h = Harness::new();
    h.seed_shares();
    let session = h.session();
    session.login(EMAIL, PASSWORD).await.unwrap();
    h.store.deliver();

    session
        .repository()
        .rename_file("abc", 2, "new.pdf")
        .await
        .unwrap();
    assert_eq!(
        h.store.value_at("shares/abc/files/2/name"),
        Some(json!("new.pdf"))
    );
    assert_eq!(h.store.value_at("shares/abc/files/2/size"), Some(json!(3)));

    h.store.deliver();
    let state = session.state().get();
    let renamed = state.records.iter().find(|r| r.id == "abc-2").unwrap();
    assert_eq!(renamed.name, "new.pdf");
}

#[tokio::test]
async fn update_share_reconciles_through_feed() {
    let h = Harness::new();
    h.seed_shares();
    let session = h.session();
    session.login(EMAIL, PASSWORD).await.unwrap();
    h.store.deliver();

    let mut partial = Map::new();
    partial.insert("expiresAt".into(), json!(1_700_000_900_000i64));
    session.repository().update_share("abc", partial).await.unwrap();
    assert_eq!(h.store.value_at("shares/abc/expiresAt"), Some(json!(1_700_000_900_000i64)));

    // The cached records still carry the old expiry until the event.
    let state = session.state().get();
    assert!(state.records.iter().filter(|r| r.share_id == "abc").all(|r| r.expires_at.is_none()));

    h.store.deliver();
    let state = session.state().get();
    let updated: Vec<_> = state.records.iter().filter(|r| r.share_id == "abc").collect();
    assert_eq!(updated.len(), 3);
    assert!(updated.iter().all(|r| r.expires_at == Some(1_700_000_900_000)));
    assert_eq!(updated[2].name, "old.pdf");
}

#[tokio::test]
async fn blank_rename_is_ignored() {
    let h = Harness::new();
    h.seed_shares();
    let session = h.session();
    session.login(EMAIL, PASSWORD).await.unwrap();

    session.repository().rename_file("abc", 0, "   ").await.unwrap();
    assert_eq!(
        h.store.value_at("shares/abc/files/0/name"),
        Some(json!("a.txt"))
    );
}

#[tokio::test]
async fn writes_are_noops_when_logged_out() {
    let h = Harness::new();
    h.seed_shares();
    let session = h.session();

    session.repository().delete_share("abc").await.unwrap();
    session.repository().rename_file("abc", 0, "x").await.unwrap();
    let created = session.repository().create_share(&Share::default()).await.unwrap();

    assert!(created.is_none());
    assert!(h.store.value_at("shares/abc").is_some());
    assert_eq!(
        h.store.value_at("shares/abc/files/0/name"),
        Some(json!("a.txt"))
    );
    assert!(session.repository().refresh().await.unwrap().is_empty());
}

#[tokio::test]
async fn write_failures_propagate_and_leave_cache_alone() {
    let h = Harness::new();
    h.seed_shares();
    let session = h.session();
    session.login(EMAIL, PASSWORD).await.unwrap();
    h.store.deliver();

    h.store.fail_writes(true);
    let err = session.repository().delete_share("abc").await.unwrap_err();
    assert!(matches!(err, StoreError::Write(_)));
    assert_eq!(record_ids(&session).len(), 5);
}

#[tokio::test]
async fn create_and_update_share() {
    let h = Harness::new();
    let session = h.session();
    session.login(EMAIL, PASSWORD).await.unwrap();

    let share = Share {
        created_at: Some(h.clock.now_ms()),
        expires_at: None,
        files: FileSlots::from_entries(vec![FileEntry {
            name: "hello.txt".into(),
            size: 5,
            mime_type: "text/plain".into(),
            url: "https://cdn/hello".into(),
        }]),
    };
    let id = session
        .repository()
        .create_share(&share)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(id, "1700000000000");

    let mut partial = Map::new();
    partial.insert("expiresAt".into(), json!(1_700_000_600_000i64));
    session.repository().update_share(&id, partial).await.unwrap();

    let records = session.repository().refresh().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, "1700000000000-0");
    assert_eq!(records[0].expires_at, Some(1_700_000_600_000));
}

#[tokio::test]
async fn logout_releases_subscription_and_clears_state() {
    let h = Harness::new();
    h.seed_shares();
    let session = h.session();
    session.login(EMAIL, PASSWORD).await.unwrap();
    h.store.deliver();

    session.logout().await.unwrap();
    assert!(!session.state().is_logged_in());
    assert!(session.state().get().records.is_empty());
    assert_eq!(h.store.listener_count(), 0);
    assert!(h.storage.is_empty());

    // A delivery after logout reaches nobody.
    h.store.deliver();
    assert!(session.state().get().records.is_empty());
}

#[tokio::test]
async fn failed_logout_keeps_session() {
    let h = Harness::new();
    let session = h.session();
    session.login(EMAIL, PASSWORD).await.unwrap();

    h.auth.fail_sign_out(true);
    assert!(session.logout().await.is_err());
    assert!(session.state().is_logged_in());
    assert_eq!(h.store.listener_count(), 1);
    assert!(h.storage.contains(SESSION_KEY));
}

#[tokio::test]
async fn repeated_login_cycles_keep_one_listener() {
    let h = Harness::new();
    let session = h.session();

    for _ in 0..3 {
        session.login(EMAIL, PASSWORD).await.unwrap();
        assert_eq!(h.store.listener_count(), 1);
        session.logout().await.unwrap();
        assert_eq!(h.store.listener_count(), 0);
    }

    session.login(EMAIL, PASSWORD).await.unwrap();
    session.login(EMAIL, PASSWORD).await.unwrap();
    assert_eq!(h.store.listener_count(), 1);
}

#[tokio::test]
async fn restore_within_window() {
    let h = Harness::new();
    h.seed_shares();
    h.session().login(EMAIL, PASSWORD).await.unwrap();

    h.clock.advance(DEFAULT_SESSION_TTL_MS);
    let session = h.session();
    let outcome = session.restore();

    let RestoreOutcome::Restored(identity) = &outcome else {
        panic!("expected a restored session, got {:?}", outcome);
    };
    assert_eq!(identity.email, EMAIL);
    assert_eq!(h.auth.resumed().as_ref(), Some(identity));
    assert!(session.state().is_logged_in());

    h.store.deliver();
    assert_eq!(session.state().get().records.len(), 5);
}

#[tokio::test]
async fn expired_session_is_discarded() {
    let h = Harness::new();
    h.session().login(EMAIL, PASSWORD).await.unwrap();

    h.clock.advance(DEFAULT_SESSION_TTL_MS + 1);
    let session = h.session();
    assert_eq!(session.restore(), RestoreOutcome::Discarded);
    assert!(!session.state().is_logged_in());
    assert!(!h.storage.contains(SESSION_KEY));
    assert!(!h.storage.contains(STATE_KEY));
    assert!(h.auth.resumed().is_none());
}

#[tokio::test]
async fn configurable_window() {
    let h = Harness::new();
    h.session().login(EMAIL, PASSWORD).await.unwrap();
    h.clock.advance(60 * 60 * 1000);

    let session: Session = AdminSession::new(
        h.auth.clone(),
        h.store.clone(),
        h.storage.clone(),
        SessionPolicy::from_secs(2 * 60 * 60),
        Rc::new(h.clock.clone()),
    );
    assert!(matches!(session.restore(), RestoreOutcome::Restored(_)));
}

#[test]
fn no_stored_session() {
    let h = Harness::new();
    assert_eq!(h.session().restore(), RestoreOutcome::Absent);
}

#[tokio::test]
async fn listeners_mirror_state_changes() {
    let h = Harness::new();
    h.seed_shares();
    let session = h.session();

    let seen = Rc::new(std::cell::RefCell::new(Vec::<usize>::new()));
    let seen_clone = seen.clone();
    session
        .state()
        .subscribe(move |state| seen_clone.borrow_mut().push(state.records.len()));

    session.login(EMAIL, PASSWORD).await.unwrap();
    h.store.deliver();
    session.logout().await.unwrap();

    assert_eq!(*seen.borrow(), vec![0, 5, 0]);
}
