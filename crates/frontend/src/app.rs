use leptos::prelude::*;
use std::sync::Arc;
use thaw::ConfigProvider;

use crate::app_shell::AppShell;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::backend::{Backend, DemoBackend, SupabaseClient};
use crate::shared::config::{AppConfig, BackendMode};
use crate::shared::preferences::PreferenceStore;
use crate::shared::storage::{BrowserStorage, KeyValueStorage};
use crate::shared::theme::{BrowserColorScheme, ThemeSync};
use crate::system::auth::AuthStore;
use crate::system::notifications::NotificationStore;

fn build_backend(config: &AppConfig, storage: Arc<dyn KeyValueStorage>) -> Arc<dyn Backend> {
    match &config.backend {
        BackendMode::Supabase(backend) => {
            log::info!("using Supabase backend at {}", backend.url);
            Arc::new(SupabaseClient::new(backend.clone(), storage))
        }
        BackendMode::Demo => {
            log::warn!("no Supabase credentials at build time, running on demo data");
            Arc::new(DemoBackend::seeded())
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    let config = match AppConfig::from_build_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("invalid configuration: {e}");
            return view! {
                <div class="config-error">
                    <h1>"Configuration invalide"</h1>
                    <p>{e.user_message()}</p>
                </div>
            }
            .into_any();
        }
    };

    let storage: Arc<dyn KeyValueStorage> = Arc::new(BrowserStorage);
    provide_context(build_backend(&config, storage.clone()));
    provide_context(AuthStore::new(storage.clone()));
    provide_context(NotificationStore::new());
    provide_context(PreferenceStore::new(storage.clone(), Arc::new(BrowserColorScheme)));
    provide_context(storage);
    provide_context(config);
    provide_context(AppGlobalContext::new());

    view! {
        <ConfigProvider>
            <ThemeSync />
            <AppShell />
        </ConfigProvider>
    }
    .into_any()
}
