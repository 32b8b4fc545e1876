//! Transient notifications.
//!
//! Every notice in [`AppContext::notices`] renders as a toast that removes
//! itself after [`TOAST_DURATION_MS`] or when clicked.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos_icons::Icon;
use shareio_core::{Notice, NoticeKind};
use wasm_bindgen_futures::spawn_local;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::config::TOAST_DURATION_MS;

stylance::import_crate_style!(css, "src/components/toast.module.css");

/// Toast stack, top-right.
#[component]
pub fn Toasts() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    view! {
        <div class=css::stack aria-live="polite">
            <For
                each=move || ctx.notices.with(|n| n.items().to_vec())
                key=|notice| notice.id
                children=move |notice| view! { <Toast notice=notice /> }
            />
        </div>
    }
}

#[component]
fn Toast(notice: Notice) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let id = notice.id;

    spawn_local(async move {
        TimeoutFuture::new(TOAST_DURATION_MS).await;
        ctx.dismiss(id);
    });

    let (class, icon) = match notice.kind {
        NoticeKind::Success => (css::success, ic::SUCCESS),
        NoticeKind::Error => (css::error, ic::ALERT),
    };

    view! {
        <div class=class role="status" on:click=move |_| ctx.dismiss(id)>
            <span class=css::icon><Icon icon=icon /></span>
            <span class=css::message>{notice.message}</span>
            <span class=css::close><Icon icon=ic::CLOSE /></span>
        </div>
    }
}
