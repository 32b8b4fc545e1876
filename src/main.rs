mod app;
mod backend;
mod components;
mod config;
mod utils;

use app::App;
use config::{AdminConfig, CONFIG_TOML};
use leptos::prelude::*;
use tracing::{info, warn};
use wasm_bindgen::JsCast;

fn main() {
    console_error_panic_hook::set_once();

    let (config, config_error) = match AdminConfig::from_toml(CONFIG_TOML) {
        Ok(config) => (config, None),
        Err(e) => (AdminConfig::default(), Some(e)),
    };

    utils::log::init(&config.logging.level);
    if let Some(e) = config_error {
        warn!(error = %e, "invalid config.toml, using defaults");
    }
    info!(version = env!("CARGO_PKG_VERSION"), "starting admin console");

    let root = document()
        .get_element_by_id("app")
        .expect("Failed to find #app element")
        .unchecked_into::<web_sys::HtmlElement>();

    mount_to(root, move || view! { <App config=config /> }).forget();
}
