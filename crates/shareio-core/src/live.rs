//! Folding the realtime store's event stream into snapshots.
//!
//! The streaming endpoint sends named events whose payload is
//! `{"path": "/...", "data": ...}`:
//!
//! | Event          | Meaning                                        |
//! |----------------|------------------------------------------------|
//! | `put`          | replace the node at `path` with `data`         |
//! | `patch`        | write each child of `data` under `path`        |
//! | `keep-alive`   | nothing changed                                |
//! | `cancel`       | the server closed the stream (rules changed)   |
//! | `auth_revoked` | the credential expired; the stream is dead     |
//!
//! [`LiveTree`] applies them to a local copy so every change can be
//! delivered as a full snapshot.

use serde::Deserialize;
use serde_json::Value;

use crate::error::StoreError;
use crate::json_path;

/// One decoded stream event.
#[derive(Clone, Debug, PartialEq)]
pub enum StreamEvent {
    Put { path: String, data: Value },
    Patch { path: String, data: Value },
    KeepAlive,
    Cancel(String),
    AuthRevoked,
}

#[derive(Deserialize)]
struct Payload {
    path: String,
    #[serde(default)]
    data: Value,
}

impl StreamEvent {
    /// Decode an event from its name and raw `data:` payload.
    pub fn parse(event: &str, payload: &str) -> Result<Self, StoreError> {
        match event {
            "put" | "patch" => {
                let Payload { path, data } = serde_json::from_str(payload)
                    .map_err(|e| StoreError::Subscribe(format!("bad {} payload: {}", event, e)))?;
                Ok(if event == "put" {
                    Self::Put { path, data }
                } else {
                    Self::Patch { path, data }
                })
            }
            "keep-alive" => Ok(Self::KeepAlive),
            "cancel" => Ok(Self::Cancel(payload.trim_matches('"').to_string())),
            "auth_revoked" => Ok(Self::AuthRevoked),
            other => Err(StoreError::Subscribe(format!("unknown event '{}'", other))),
        }
    }

    /// Whether the stream is unusable after this event.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Cancel(_) | Self::AuthRevoked)
    }
}

/// Local mirror of the subscribed node.
#[derive(Clone, Debug, Default)]
pub struct LiveTree {
    root: Value,
}

impl LiveTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an event. Returns `true` when the tree changed.
    pub fn apply(&mut self, event: StreamEvent) -> bool {
        match event {
            StreamEvent::Put { path, data } => {
                let before = self.root.clone();
                json_path::set(&mut self.root, &path, data);
                before != self.root
            }
            StreamEvent::Patch { path, data } => {
                let Value::Object(children) = data else {
                    return false;
                };
                let before = self.root.clone();
                json_path::merge(&mut self.root, &path, children);
                before != self.root
            }
            StreamEvent::KeepAlive | StreamEvent::Cancel(_) | StreamEvent::AuthRevoked => false,
        }
    }

    /// Current snapshot, `None` when the node is empty.
    pub fn snapshot(&self) -> Option<&Value> {
        (!self.root.is_null()).then_some(&self.root)
    }
}
