//! Dashboard page.
//!
//! Renders the current page of [`ListView::view`](shareio_core::ListView::view)
//! over the live record list. Mounting triggers the one-time fetch; after
//! that the live subscription keeps the list current.

mod file_card;
mod pagination;
mod toolbar;

use leptos::prelude::*;
use leptos_icons::Icon;
use shareio_core::notice;
use tracing::error;
use wasm_bindgen_futures::spawn_local;

use crate::app::AppContext;
use crate::components::icons as ic;

pub use file_card::FileCard;
pub use pagination::Pagination;
pub use toolbar::Toolbar;

stylance::import_crate_style!(css, "src/components/dashboard/dashboard.module.css");

#[component]
pub fn Dashboard() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let (fetching, set_fetching) = signal(true);
    let admin = ctx.admin();
    spawn_local(async move {
        if let Err(e) = admin.repository().fetch_once().await {
            error!(error = %e, "initial share fetch failed");
            ctx.notify_error(notice::load_failed(&e));
        }
        let _ = set_fetching.try_set(false);
    });

    let page = Memo::new(move |_| ctx.state.with(|s| ctx.list.with(|list| list.view(&s.records))));
    let is_empty = Memo::new(move |_| page.with(|p| p.items.is_empty()));

    view! {
        <section class=css::dashboard>
            <Show
                when=move || !(fetching.get() && is_empty.get())
                fallback=|| view! { <p class=css::status>"Loading shares..."</p> }
            >
                <Show
                    when=move || !is_empty.get()
                    fallback=|| view! {
                        <div class=css::empty>
                            <Icon icon=ic::EMPTY />
                            <p>"No shared files found."</p>
                        </div>
                    }
                >
                    <div class=css::grid>
                        <For
                            each=move || page.get().items
                            key=|record| record.id.clone()
                            children=move |record| {
                                let id = record.id.clone();
                                let current = Memo::new(move |_| {
                                    page.with(|p| p.find(&id).cloned())
                                        .unwrap_or_else(|| record.clone())
                                });
                                view! { <FileCard record=current /> }
                            }
                        />
                    </div>
                </Show>
                <Pagination page=page />
            </Show>
            <Toolbar />
        </section>
    }
}
