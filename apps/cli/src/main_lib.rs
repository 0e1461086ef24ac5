use std::sync::Arc;

use secondbrain_ai::{
    default_registry, ChatConfig, ChatService, ProviderRegistry, RuntimeEnvironment,
};
use secondbrain_core::Store;
use secondbrain_storage_sqlite::{db, DocumentRepository};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

pub struct App {
    pub store: Arc<Store>,
    pub documents: Arc<DocumentRepository>,
    pub chat: ChatService<RuntimeEnvironment>,
}

/// Logs go to stderr so they never interleave with the chat on stdout.
/// `log` records from the library crates are forwarded into tracing.
pub fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

pub fn build_store(db_path: &str) -> anyhow::Result<(Arc<Store>, Arc<DocumentRepository>)> {
    let pool = db::open(db_path)?;
    let documents = Arc::new(DocumentRepository::new(pool));
    let store = Arc::new(Store::new(documents.clone()));
    store.initialize();
    if !store.is_initialized() {
        tracing::warn!("Saved data could not be read; changes in this session will not be saved");
    }
    Ok((store, documents))
}

pub fn build_app(config: &Config) -> anyhow::Result<App> {
    let (store, documents) = build_store(&config.db_path)?;

    let env = Arc::new(RuntimeEnvironment::new(
        config.gemini_api_key.clone(),
        Some(config.gemini_model.clone()),
    ));
    let providers =
        ProviderRegistry::with_gemini(&config.gemini_base_url, Some(config.request_timeout));
    let chat = ChatService::new(
        store.clone(),
        providers,
        default_registry(),
        env,
        ChatConfig::default(),
    );

    Ok(App {
        store,
        documents,
        chat,
    })
}
