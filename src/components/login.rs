//! Sign-in page.
//!
//! Field errors render under their input; backend failures become an error
//! toast. The submit button is disabled while a sign-in is in flight.

use leptos::{ev, prelude::*};
use leptos_icons::Icon;
use shareio_core::{AdminError, LoginError, notice};
use wasm_bindgen_futures::spawn_local;

use crate::app::AppContext;
use crate::components::icons as ic;

stylance::import_crate_style!(css, "src/components/login.module.css");

#[component]
pub fn Login() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (errors, set_errors) = signal(LoginError::default());
    let (loading, set_loading) = signal(false);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if loading.get_untracked() {
            return;
        }

        let admin = ctx.admin();
        let email = email.get_untracked();
        let password = password.get_untracked();
        set_errors.set(LoginError::default());
        set_loading.set(true);

        spawn_local(async move {
            match admin.login(&email, &password).await {
                Ok(identity) => ctx.notify_success(notice::welcome(&identity)),
                Err(AdminError::Login(fields)) => {
                    let _ = set_errors.try_set(fields);
                }
                Err(e) => ctx.notify_error(notice::login_failed(&e)),
            }
            // The page unmounts on success
            let _ = set_loading.try_set(false);
        });
    };

    let input_class = move |has_error: bool| {
        if has_error {
            format!("{} {}", css::input, css::inputInvalid)
        } else {
            css::input.to_string()
        }
    };

    view! {
        <div class=css::page>
            <div class=css::card>
                <div class=css::logo><Icon icon=ic::SHARE /></div>
                <h2 class=css::heading>"Login to Share IO Admin Panel"</h2>

                <form on:submit=on_submit novalidate=true>
                    <div class=css::field>
                        <label for="email" class=css::label>"Email"</label>
                        <div class=css::inputWrap>
                            <span class=css::inputIcon><Icon icon=ic::MAIL /></span>
                            <input
                                id="email"
                                type="email"
                                autocomplete="username"
                                placeholder="Enter your email"
                                class=move || input_class(errors.with(|e| e.email.is_some()))
                                prop:value=email
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                            />
                        </div>
                        {move || errors.get().email.map(|msg| view! {
                            <p class=css::fieldError>{msg}</p>
                        })}
                    </div>

                    <div class=css::field>
                        <label for="password" class=css::label>"Password"</label>
                        <div class=css::inputWrap>
                            <span class=css::inputIcon><Icon icon=ic::LOCK /></span>
                            <input
                                id="password"
                                type="password"
                                autocomplete="current-password"
                                placeholder="Enter your Password"
                                class=move || input_class(errors.with(|e| e.password.is_some()))
                                prop:value=password
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                            />
                        </div>
                        {move || errors.get().password.map(|msg| view! {
                            <p class=css::fieldError>{msg}</p>
                        })}
                    </div>

                    <button type="submit" class=css::submit disabled=move || loading.get()>
                        {move || if loading.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>

                <p class=css::tagline>
                    "Secure file sharing with end-to-end encryption. Files expire in 10 minutes."
                </p>
            </div>
        </div>
    }
}
