//! Header and footer.
//!
//! The header shows the product title and, when logged in, a greeting with
//! the email's local part and a Logout button.

use leptos::prelude::*;
use leptos_icons::Icon;
use shareio_core::notice;
use tracing::error;
use wasm_bindgen_futures::spawn_local;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::config::{APP_TITLE, FOOTER_CREDITS};

stylance::import_crate_style!(css, "src/components/shell.module.css");

/// Top bar with title and account actions.
#[component]
pub fn Header() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided at root");

    let handle = Memo::new(move |_| {
        ctx.state.with(|s| {
            s.session
                .identity()
                .map(|identity| identity.handle().to_uppercase())
        })
    });

    // Local state is only cleared after the backend confirms
    let on_logout = move |_: leptos::ev::MouseEvent| {
        let admin = ctx.admin();
        spawn_local(async move {
            if let Err(e) = admin.logout().await {
                error!(error = %e, "logout failed");
                ctx.notify_error(notice::SIGN_OUT_FAILED);
            }
        });
    };

    view! {
        <header class=css::header>
            <div class=css::brand>
                <span class=css::brandIcon><Icon icon=ic::SHARE /></span>
                <h1 class=css::title>{APP_TITLE}</h1>
            </div>

            <Show when=move || handle.with(Option::is_some)>
                <div class=css::account>
                    <span class=css::greeting>
                        <Icon icon=ic::USER />
                        {move || format!("Hi, {}", handle.get().unwrap_or_default())}
                    </span>
                    <button class=css::logoutButton on:click=on_logout title="Log out">
                        <Icon icon=ic::LOGOUT />
                        <span class=css::logoutLabel>"Logout"</span>
                    </button>
                </div>
            </Show>
        </header>
    }
}

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class=css::footer>
            <span>{FOOTER_CREDITS}</span>
            <span class=css::version>{concat!("v", env!("CARGO_PKG_VERSION"))}</span>
        </footer>
    }
}
