//! Todo Frontend Entry Point

mod app;
mod components;
mod config;
mod context;
mod controller;
mod storage;
mod surface;

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use todo_api::{ApiClient, HttpTransport, SessionMirror, TokenStore};

use app::App;
use config::AppConfig;
use context::AppContext;
use controller::Controller;
use storage::LocalStorageTokenStore;
use surface::LeptosSurface;

fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::from_build_env();
    wasm_logger::init(wasm_logger::Config::new(
        config.log_level.to_level().unwrap_or(log::Level::Error),
    ));
    // `Off` has no `Level`; the facade filter still honours it
    log::set_max_level(config.log_level);
    for warning in AppConfig::build_warnings() {
        log::warn!("{}", warning);
    }
    log::info!("API base URL: {}", config.api_base_url);

    mount_to_body(move || {
        let surface = LeptosSurface::new(config.error_dismiss_ms);

        let tokens: Rc<dyn TokenStore> = Rc::new(SessionMirror::new(LocalStorageTokenStore::new(
            config.token_key.clone(),
        )));
        let transport = Rc::new(HttpTransport::new(config.api_base_url.clone()));
        let api = ApiClient::new(transport, tokens.clone());
        let controller = Controller::new(api, tokens, Rc::new(surface));

        provide_context(AppContext::new(controller.clone()));
        spawn_local(async move { controller.start().await });

        view! { <App surface=surface /> }
    });
}
