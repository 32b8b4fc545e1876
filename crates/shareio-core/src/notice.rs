//! User-facing transient notifications.
//!
//! Every collaborator failure ends up here: the UI catches the error at the
//! call site and pushes a [`Notice`]; nothing is retried.

use std::fmt::Display;

use crate::model::Identity;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub message: String,
}

/// Queue of visible notices.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Notices {
    items: Vec<Notice>,
    next_id: u64,
}

impl Notices {
    /// Append a notice and return its id.
    pub fn push(&mut self, kind: NoticeKind, message: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Notice {
            id,
            kind,
            message: message.into(),
        });
        id
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.push(NoticeKind::Success, message)
    }

    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.push(NoticeKind::Error, message)
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|notice| notice.id != id);
    }

    pub fn items(&self) -> &[Notice] {
        &self.items
    }
}

// Message texts shared by the dashboard and the login page.

pub fn welcome(identity: &Identity) -> String {
    format!("Welcome back, {}!", identity.greeting_name())
}

pub fn login_failed(err: &impl Display) -> String {
    let message = err.to_string();
    if message.is_empty() {
        "An error occurred during login.".to_string()
    } else {
        message
    }
}

pub const FILE_DELETED: &str = "File deleted";
pub const FILE_RENAMED: &str = "File renamed";
pub const SIGN_OUT_FAILED: &str = "An error occurred during sign out. Please try again.";

pub fn delete_failed(err: &impl Display) -> String {
    format!("Delete failed: {}", err)
}

pub fn update_failed(err: &impl Display) -> String {
    format!("Update failed: {}", err)
}

pub fn load_failed(err: &impl Display) -> String {
    format!("Could not load shares: {}", err)
}
