//! Realtime Database over REST and Server-Sent Events.
//!
//! | Operation   | Request                                   |
//! |-------------|-------------------------------------------|
//! | `read`      | `GET {db}/{path}.json?auth={token}`       |
//! | `write`     | `PUT` with the full value                 |
//! | `update`    | `PATCH` with the partial object           |
//! | `remove`    | `DELETE`                                  |
//! | `subscribe` | `EventSource` on the same URL             |

use std::cell::RefCell;
use std::rc::Rc;

use gloo_net::http::{Request, Response};
use serde::Deserialize;
use serde_json::{Map, Value};
use shareio_core::live::{LiveTree, StreamEvent};
use shareio_core::{DataStore, SnapshotListener, StoreError};
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use web_sys::{EventSource, MessageEvent};

use super::Credential;
use crate::config::STREAM_EVENTS;

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Clone)]
pub struct RestDatabase {
    base_url: String,
    credential: Credential,
}

impl RestDatabase {
    pub fn new(base_url: impl Into<String>, credential: Credential) -> Self {
        Self {
            base_url: base_url.into(),
            credential,
        }
    }

    fn url(&self, path: &str) -> String {
        let mut url = format!(
            "{}/{}.json",
            self.base_url.trim_end_matches('/'),
            path.trim_matches('/')
        );
        if let Some(token) = self.credential.get() {
            url.push_str("?auth=");
            url.push_str(&token);
        }
        url
    }
}

/// Turn a non-2xx response into the store's error message.
async fn failure(response: &Response) -> String {
    match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => format!("HTTP {} {}", response.status(), response.status_text()),
    }
}

async fn send_write(request: Result<Request, gloo_net::Error>) -> Result<(), StoreError> {
    let response = request
        .map_err(|e| StoreError::Write(e.to_string()))?
        .send()
        .await
        .map_err(|e| StoreError::Write(e.to_string()))?;
    if !response.ok() {
        return Err(StoreError::Write(failure(&response).await));
    }
    Ok(())
}

impl DataStore for RestDatabase {
    type Subscription = LiveSubscription;

    async fn read(&self, path: &str) -> Result<Option<Value>, StoreError> {
        let response = Request::get(&self.url(path))
            .send()
            .await
            .map_err(|e| StoreError::Read(e.to_string()))?;
        if !response.ok() {
            return Err(StoreError::Read(failure(&response).await));
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| StoreError::Read(e.to_string()))?;
        Ok((!value.is_null()).then_some(value))
    }

    async fn write(&self, path: &str, value: Value) -> Result<(), StoreError> {
        send_write(Request::put(&self.url(path)).json(&value)).await
    }

    async fn update(&self, path: &str, partial: Map<String, Value>) -> Result<(), StoreError> {
        send_write(Request::patch(&self.url(path)).json(&partial)).await
    }

    async fn remove(&self, path: &str) -> Result<(), StoreError> {
        send_write(Request::delete(&self.url(path)).build()).await
    }

    fn subscribe(
        &self,
        path: &str,
        listener: SnapshotListener,
    ) -> Result<LiveSubscription, StoreError> {
        let source = EventSource::new(&self.url(path))
            .map_err(|e| StoreError::Subscribe(format!("{:?}", e)))?;
        let tree = Rc::new(RefCell::new(LiveTree::new()));

        let mut handlers = Vec::with_capacity(STREAM_EVENTS.len());
        for &name in STREAM_EVENTS {
            let handler = stream_handler(name, source.clone(), tree.clone(), listener.clone());
            source
                .add_event_listener_with_callback(name, handler.as_ref().unchecked_ref())
                .map_err(|e| StoreError::Subscribe(format!("{:?}", e)))?;
            handlers.push(handler);
        }

        debug!(path, "event stream opened");
        Ok(LiveSubscription {
            source,
            _handlers: handlers,
        })
    }
}

type StreamHandler = Closure<dyn FnMut(MessageEvent)>;

fn stream_handler(
    name: &'static str,
    source: EventSource,
    tree: Rc<RefCell<LiveTree>>,
    listener: SnapshotListener,
) -> StreamHandler {
    Closure::new(move |message: MessageEvent| {
        let payload = message.data().as_string().unwrap_or_default();
        let event = match StreamEvent::parse(name, &payload) {
            Ok(event) => event,
            Err(e) => {
                warn!(error = %e, "dropping stream event");
                return;
            }
        };

        if event.is_terminal() {
            warn!(event = name, "event stream closed by server");
            source.close();
            return;
        }

        let changed = tree.borrow_mut().apply(event);
        if changed {
            let snapshot = tree.borrow().snapshot().cloned();
            listener(snapshot.as_ref());
        }
    })
}

/// Open event stream. Dropping it closes the stream and its handlers.
pub struct LiveSubscription {
    source: EventSource,
    _handlers: Vec<StreamHandler>,
}

impl Drop for LiveSubscription {
    fn drop(&mut self) {
        self.source.close();
        debug!("event stream closed");
    }
}
