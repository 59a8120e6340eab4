//! Taskline Frontend Entry Point

mod app;
mod commands;
mod components;
mod config;
mod context;
mod i18n;
mod list_driver;
mod logging;
mod markdown;
mod storage;
mod store;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    let config = AppConfig::from_env();
    logging::init(config.log_level);
    mount_to_body(move || view! { <App config=config.clone() /> });
}
