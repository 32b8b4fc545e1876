//! Application router component.
//!
//! Handles URL-based routing with hash history. Uses native hashchange
//! events instead of leptos_router.
//!
//! # Architecture
//!
//! - **URL hash is the source of truth**: the page is derived from `#/path`
//! - **Login state picks the route table**: logged in mounts the dashboard
//!   table, logged out the login table
//! - **Unknown paths redirect**: the hash is replaced, not pushed, so back
//!   does not return to the dead path

use leptos::prelude::*;
use shareio_core::route::{self, AdminRoute};
use tracing::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;

use crate::app::AppContext;
use crate::components::dashboard::Dashboard;
use crate::components::login::Login;
use crate::utils::dom;

/// Main application router.
///
/// - `#/dashboard` → Dashboard (logged in)
/// - `#/auth-login` → Login (logged out)
/// - anything else → redirect to the table's page
#[component]
pub fn AppRouter() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    // Current hash path
    let path = RwSignal::new(dom::get_hash());

    // Set up hashchange event listener (runs once on mount)
    let closure = Closure::wrap(Box::new(move || {
        path.set(dom::get_hash());
    }) as Box<dyn Fn()>);
    if let Some(window) = dom::window() {
        let _ = window.add_event_listener_with_callback("hashchange", closure.as_ref().unchecked_ref());
    }
    // Keep the closure alive for the lifetime of the app
    closure.forget();

    let logged_in = Memo::new(move |_| ctx.state.with(|s| s.is_logged_in()));
    let resolution = Memo::new(move |_| route::resolve(&path.get(), logged_in.get()));
    let current = Memo::new(move |_| resolution.get().route);

    Effect::new(move || {
        if let Some(target) = resolution.get().redirect {
            debug!(from = %path.get_untracked(), to = target, "route redirect");
            dom::replace_hash(target);
            path.set(target.to_string());
        }
    });

    move || match current.get() {
        AdminRoute::Dashboard => view! { <Dashboard /> }.into_any(),
        AdminRoute::Login => view! { <Login /> }.into_any(),
    }
}
