mod app;
mod components;
mod loader;
mod pages;
mod store;
mod transport;

use leptos::*;
use store::SessionStore;
use transport::{load_client_config, Api, FetchTransport};

fn main() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::error_1(&format!("logger init failed: {err}").into());
    }

    wasm_bindgen_futures::spawn_local(async {
        let config = load_client_config().await;
        mount_to_body(move || {
            provide_context(Api::new(FetchTransport::new(config)));
            view! { <app::App session=SessionStore::new()/> }
        });
    });
}
