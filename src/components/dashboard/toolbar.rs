//! Fixed bottom toolbar: search, type filter, sort.
//!
//! Every change goes through [`ListView`](shareio_core::ListView) setters,
//! which reset the page to 1.

use leptos::prelude::*;
use leptos_icons::Icon;
use shareio_core::view::TYPE_FILTER_OPTIONS;
use shareio_core::{SortKey, TypeFilter};

use crate::app::AppContext;
use crate::components::icons as ic;

stylance::import_crate_style!(css, "src/components/dashboard/dashboard.module.css");

#[component]
pub fn Toolbar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let search = Memo::new(move |_| ctx.list.with(|l| l.query().search.clone()));
    let type_value = Memo::new(move |_| ctx.list.with(|l| l.query().type_filter.value().to_string()));
    let sort_value = Memo::new(move |_| ctx.list.with(|l| l.query().sort.as_str()));

    view! {
        <div class=css::toolbar>
            <div class=css::toolbarInner>
                <label class=css::search>
                    <span class=css::searchIcon><Icon icon=ic::SEARCH /></span>
                    <input
                        type="search"
                        class=css::searchInput
                        placeholder="Search by name or Share ID..."
                        prop:value=search
                        on:input=move |ev| {
                            let term = event_target_value(&ev);
                            ctx.list.update(|l| l.set_search(term));
                        }
                    />
                </label>

                <select
                    class=css::select
                    title="File type"
                    prop:value=type_value
                    on:change=move |ev| {
                        let filter = TypeFilter::from_value(&event_target_value(&ev));
                        ctx.list.update(|l| l.set_type_filter(filter));
                    }
                >
                    {TYPE_FILTER_OPTIONS
                        .iter()
                        .map(|&(value, label)| view! { <option value=value>{label}</option> })
                        .collect_view()}
                </select>

                <select
                    class=css::select
                    title="Sort order"
                    prop:value=sort_value
                    on:change=move |ev| {
                        if let Ok(sort) = event_target_value(&ev).parse::<SortKey>() {
                            ctx.list.update(|l| l.set_sort(sort));
                        }
                    }
                >
                    {SortKey::ALL
                        .iter()
                        .map(|key| view! { <option value=key.as_str()>{key.label()}</option> })
                        .collect_view()}
                </select>
            </div>
        </div>
    }
}
