//! Previous/next page controls, hidden when everything fits on one page.

use leptos::prelude::*;
use leptos_icons::Icon;
use shareio_core::PageView;

use crate::app::AppContext;
use crate::components::icons as ic;

stylance::import_crate_style!(css, "src/components/dashboard/dashboard.module.css");

#[component]
pub fn Pagination(#[prop(into)] page: Signal<PageView>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    // Step from the page actually shown, which may be clamped
    let step = move |delta: isize| {
        let current = page.with_untracked(|v| v.page);
        let target = current.saturating_add_signed(delta);
        ctx.list.update(|l| l.set_page(target));
    };

    view! {
        <Show when=move || page.with(PageView::shows_controls)>
            <nav class=css::pagination aria-label="Pagination">
                <button
                    class=css::pageButton
                    disabled=move || !page.with(PageView::has_prev)
                    on:click=move |_| step(-1)
                    title="Previous page"
                >
                    <Icon icon=ic::CHEVRON_LEFT />
                </button>
                <span class=css::pageLabel>
                    {move || page.with(|v| format!("Page {} of {}", v.page, v.total_pages))}
                </span>
                <button
                    class=css::pageButton
                    disabled=move || !page.with(PageView::has_next)
                    on:click=move |_| step(1)
                    title="Next page"
                >
                    <Icon icon=ic::CHEVRON_RIGHT />
                </button>
            </nav>
        </Show>
    }
}
