use leptos::prelude::*;
use rembg::config::AppConfig;

mod fetch;
mod files;
mod logging;
mod shell;
mod state;
mod storage;
mod upload;

use shell::{AuthModals, Header};
use state::{AppState, LOCALSTORAGE_CONFIG_KEY};
use upload::{BatchUpload, SingleUpload};

pub fn start() {
    let raw = storage::local_storage_get_string(LOCALSTORAGE_CONFIG_KEY);
    let config = AppConfig::from_override(raw.as_deref());
    logging::init(&config.log_level);
    tracing::info!(
        api_base = %config.api_base,
        auth_base = %config.auth_base,
        "rembg web starting"
    );

    mount_to_body(move || view! { <App config=config.clone() /> });
}

#[component]
fn App(config: AppConfig) -> impl IntoView {
    let state = AppState::new(config);
    state.check_auth();

    view! {
        <div class="app">
            <Header state=state />
            <main class="app-main">
                <SingleUpload state=state />
                <BatchUpload state=state />
            </main>
            <AuthModals state=state />
        </div>
    }
}
