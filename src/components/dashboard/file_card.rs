//! One file record: details, View link, inline rename, delete.
//!
//! Neither rename nor delete touches the list directly; the card updates
//! when the live subscription delivers the changed snapshot. The card is
//! keyed by record id and reads every field from `record`, so any changed
//! field re-renders in place.

use leptos::{ev, prelude::*};
use leptos_icons::Icon;
use shareio_core::{FileRecord, notice};
use tracing::error;
use wasm_bindgen_futures::spawn_local;

use crate::app::AppContext;
use crate::components::icons as ic;
use crate::utils::format::{format_expiry, format_size_kb, format_timestamp};

stylance::import_crate_style!(css, "src/components/dashboard/dashboard.module.css");

#[component]
pub fn FileCard(#[prop(into)] record: Signal<FileRecord>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    // Stable for the card's lifetime: both are part of the record id.
    let (share_id, file_index) = record.with_untracked(|r| (r.share_id.clone(), r.file_index));
    let share_id = StoredValue::new(share_id);
    let current_name = move || record.with(|r| r.name.clone());

    let editing = RwSignal::new(false);
    let draft = RwSignal::new(record.with_untracked(|r| r.name.clone()));
    let busy = RwSignal::new(false);

    let start_edit = move |_: ev::MouseEvent| {
        draft.set(record.with_untracked(|r| r.name.clone()));
        editing.set(true);
    };

    let cancel_edit = move || {
        editing.set(false);
        draft.set(record.with_untracked(|r| r.name.clone()));
    };

    let save = move || {
        let name = draft.get_untracked().trim().to_string();
        if name.is_empty() || record.with_untracked(|r| r.name == name) {
            cancel_edit();
            return;
        }

        let admin = ctx.admin();
        let share_id = share_id.get_value();
        busy.set(true);
        spawn_local(async move {
            match admin.repository().rename_file(&share_id, file_index, &name).await {
                Ok(()) => ctx.notify_success(notice::FILE_RENAMED),
                Err(e) => {
                    error!(error = %e, share_id = %share_id, file_index, "rename failed");
                    ctx.notify_error(notice::update_failed(&e));
                }
            }
            let _ = busy.try_set(false);
            let _ = editing.try_set(false);
        });
    };

    let on_keydown = move |ev: ev::KeyboardEvent| match ev.key().as_str() {
        "Enter" => {
            ev.prevent_default();
            save();
        }
        "Escape" => cancel_edit(),
        _ => {}
    };

    let on_delete = move |_: ev::MouseEvent| {
        let admin = ctx.admin();
        let share_id = share_id.get_value();
        busy.set(true);
        spawn_local(async move {
            match admin.repository().delete_share(&share_id).await {
                Ok(()) => ctx.notify_success(notice::FILE_DELETED),
                Err(e) => {
                    error!(error = %e, share_id = %share_id, "delete failed");
                    ctx.notify_error(notice::delete_failed(&e));
                }
            }
            let _ = busy.try_set(false);
        });
    };

    view! {
        <article class=css::card>
            <div class=css::shareId>
                <Icon icon=ic::HASH />
                <span>{share_id.get_value()}</span>
            </div>

            <Show
                when=move || editing.get()
                fallback=move || view! {
                    <h3 class=css::fileName title=current_name>
                        <Icon icon=ic::FILE />
                        <span>{current_name}</span>
                    </h3>
                }
            >
                <div class=css::renameRow>
                    <input
                        class=css::renameInput
                        prop:value=draft
                        on:input=move |ev| draft.set(event_target_value(&ev))
                        on:keydown=on_keydown
                        disabled=move || busy.get()
                        autofocus=true
                    />
                    <button class=css::iconButton on:click=move |_| save() title="Save">
                        "Save"
                    </button>
                    <button class=css::iconButton on:click=move |_| cancel_edit() title="Cancel">
                        <Icon icon=ic::CLOSE />
                    </button>
                </div>
            </Show>

            <dl class=css::details>
                <dt>"Size:"</dt>
                <dd>{move || record.with(|r| format_size_kb(r.size))}</dd>
                <dt>"Type:"</dt>
                <dd>{move || record.with(|r| r.mime_type.clone())}</dd>
                <dt>"Created:"</dt>
                <dd>{move || record.with(|r| format_timestamp(r.created_at))}</dd>
                <dt>"Expires:"</dt>
                <dd>{move || record.with(|r| format_expiry(r.expires_at))}</dd>
            </dl>

            <div class=css::actions>
                <a
                    class=css::viewLink
                    href=move || record.with(|r| r.url.clone())
                    target="_blank"
                    rel="noopener noreferrer"
                >
                    <Icon icon=ic::VIEW />
                    " View"
                </a>
                <button
                    class=css::editButton
                    on:click=start_edit
                    disabled=move || busy.get() || editing.get()
                >
                    <Icon icon=ic::EDIT />
                    " Edit"
                </button>
                <button class=css::deleteButton on:click=on_delete disabled=move || busy.get()>
                    <Icon icon=ic::DELETE />
                    " Delete"
                </button>
            </div>
        </article>
    }
}
