//! Root application module.
//!
//! Contains the App component, the AppContext definition, and the wiring of
//! the browser collaborators into the admin session.

use std::rc::Rc;

use leptos::prelude::*;
use shareio_core::notice::{self, Notices};
use shareio_core::{AdminState, ListView, RestoreOutcome};
use tracing::info;

use crate::backend::{Admin, BrowserClock, Credential, FirebaseAuth, RestDatabase};
use crate::components::{AppRouter, Footer, Header, Toasts};
use crate::config::AdminConfig;
use crate::utils::BrowserStorage;

stylance::import_crate_style!(css, "src/app.module.css");

// ============================================================================
// AppContext
// ============================================================================

/// Application-wide reactive context.
///
/// Provided at the root of the component tree and read with
/// `use_context::<AppContext>()`.
///
/// # Architecture
///
/// - **admin**: the session controller; not `Send`, so it lives in local storage
/// - **state**: mirror of the controller's [`AdminState`], kept in sync by a store listener
/// - **notices**: visible toasts
/// - **list**: dashboard search/filter/sort/page inputs
///
/// # Note
///
/// This struct is `Copy` because all fields are arena handles.
#[derive(Clone, Copy)]
pub struct AppContext {
    admin: StoredValue<Rc<Admin>, LocalStorage>,
    pub state: RwSignal<AdminState>,
    pub notices: RwSignal<Notices>,
    pub list: RwSignal<ListView>,
}

impl AppContext {
    pub fn new(admin: Admin, page_size: usize) -> Self {
        let state = RwSignal::new(admin.state().get());
        admin.state().subscribe(move |next| state.set(next.clone()));

        Self {
            admin: StoredValue::new_local(Rc::new(admin)),
            state,
            notices: RwSignal::new(Notices::default()),
            list: RwSignal::new(ListView::new(page_size)),
        }
    }

    /// Handle to the session controller for async work.
    pub fn admin(&self) -> Rc<Admin> {
        self.admin.get_value()
    }

    pub fn notify_success(&self, message: impl Into<String>) {
        self.notices.update(|n| {
            n.success(message);
        });
    }

    pub fn notify_error(&self, message: impl Into<String>) {
        self.notices.update(|n| {
            n.error(message);
        });
    }

    pub fn dismiss(&self, id: u64) {
        self.notices.update(|n| n.dismiss(id));
    }
}

fn build_admin(config: &AdminConfig) -> Admin {
    let credential = Credential::default();
    Admin::new(
        FirebaseAuth::new(config.firebase.api_key.clone(), credential.clone()),
        RestDatabase::new(config.firebase.database_url.clone(), credential),
        BrowserStorage,
        config.session.policy(),
        Rc::new(BrowserClock),
    )
}

/// Root application component with error boundary.
///
/// This component:
/// - Builds the admin session and provides the global AppContext
/// - Restores a persisted session before the first route is resolved
/// - Wraps the layout in an ErrorBoundary
#[component]
pub fn App(config: AdminConfig) -> impl IntoView {
    let ctx = AppContext::new(build_admin(&config), config.dashboard.page_size);
    provide_context(ctx);

    match ctx.admin().restore() {
        RestoreOutcome::Restored(identity) => {
            info!(uid = %identity.uid, "session restored");
            ctx.notify_success(notice::welcome(&identity));
        }
        RestoreOutcome::Discarded => info!("stored session expired"),
        RestoreOutcome::Absent => {}
    }

    view! {
        <ErrorBoundary
            fallback=|errors| view! {
                <div class=css::fallback>
                    <div class=css::fallbackCard>
                        <h1 class=css::fallbackTitle>"Something went wrong"</h1>
                        <p class=css::fallbackText>
                            "An unexpected error occurred. Please try reloading the page."
                        </p>
                        <details class=css::fallbackDetails>
                            <summary>"Error details"</summary>
                            <ul>
                                {move || errors.get()
                                    .into_iter()
                                    .map(|(_, e)| view! { <li>{e.to_string()}</li> })
                                    .collect::<Vec<_>>()
                                }
                            </ul>
                        </details>
                        <button
                            class=css::fallbackButton
                            on:click=move |_| {
                                if let Some(window) = web_sys::window() {
                                    let _ = window.location().reload();
                                }
                            }
                        >
                            "Reload Page"
                        </button>
                    </div>
                </div>
            }
        >
            <div class=css::layout>
                <Header />
                <main class=css::main>
                    <AppRouter />
                </main>
                <Footer />
            </div>
            <Toasts />
        </ErrorBoundary>
    }
}
