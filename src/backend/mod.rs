//! Browser implementations of the admin core's collaborators.
//!
//! - [`FirebaseAuth`] - password sign-in over the Identity Toolkit REST API
//! - [`RestDatabase`] - Realtime Database REST calls plus its event stream
//! - [`BrowserClock`] - `Date.now()`
//!
//! Auth and database share one [`Credential`] slot: sign-in fills it, the
//! database appends it to every request.

mod auth;
mod database;

use std::cell::RefCell;
use std::rc::Rc;

use shareio_core::{AdminSession, Clock};

use crate::utils::BrowserStorage;

pub use auth::FirebaseAuth;
pub use database::{LiveSubscription, RestDatabase};

/// The session controller as wired in the browser.
pub type Admin = AdminSession<FirebaseAuth, RestDatabase, BrowserStorage>;

/// Bearer token shared between the auth and database clients.
#[derive(Clone, Default)]
pub struct Credential(Rc<RefCell<Option<String>>>);

impl Credential {
    pub fn set(&self, token: Option<String>) {
        *self.0.borrow_mut() = token;
    }

    pub fn get(&self) -> Option<String> {
        self.0.borrow().clone()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now_ms(&self) -> i64 {
        js_sys::Date::now() as i64
    }
}
