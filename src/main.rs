//! Registration Dialog server entry point.

use std::sync::Arc;
use std::time::Duration;

use secrecy::ExposeSecret;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use registration_dialog::adapters::ai::{
    MockTextGenerator, OpenAIConfig, OpenAITextGenerator, UnconfiguredTextGenerator,
};
use registration_dialog::adapters::http::{router, RegistrationHandlers};
use registration_dialog::adapters::storage::{
    InMemoryRecordStore, InMemorySessionStore, PostgresRecordStore,
};
use registration_dialog::application::{DialogueSettings, EchoPromptHandler, SubmitMessageHandler};
use registration_dialog::config::{
    AiConfig, AiProvider, AppConfig, RecordStoreBackend, RecordStoreConfig,
};
use registration_dialog::domain::foundation::Timestamp;
use registration_dialog::ports::{RecordStore, SessionStore, TextGenerator};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let generator = text_generator(&config.ai)?;
    let records = record_store(&config.record_store).await?;
    let sessions = Arc::new(InMemorySessionStore::new());

    info!(
        provider = %generator.provider_info().name,
        model = %generator.provider_info().model,
        record_store = ?config.record_store.backend,
        "Starting registration dialog"
    );

    if let Some(ttl) = config.dialogue.session_idle_ttl() {
        spawn_session_sweeper(sessions.clone(), ttl, config.dialogue.sweep_interval());
    }

    let submit_handler = SubmitMessageHandler::new(
        sessions,
        records,
        generator.clone(),
        DialogueSettings {
            table: config.record_store.table.clone(),
            rephrase_prompts: config.dialogue.rephrase_prompts,
            generation_timeout: config.dialogue.generation_timeout(),
        },
    );
    let echo_handler = EchoPromptHandler::new(generator);
    let handlers = RegistrationHandlers::new(Arc::new(submit_handler), Arc::new(echo_handler));

    let app = router(handlers, &config.server);
    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    let json = config.is_production().then(|| fmt::layer().json());
    let text = (!config.is_production()).then(fmt::layer);

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(text)
        .init();
}

fn text_generator(ai: &AiConfig) -> Result<Arc<dyn TextGenerator>, BoxError> {
    let generator: Arc<dyn TextGenerator> = match ai.provider {
        AiProvider::OpenAI => {
            let api_key = ai
                .api_key
                .as_ref()
                .map(|key| key.expose_secret().clone())
                .unwrap_or_default();
            let config = OpenAIConfig::new(api_key)
                .with_model(&ai.model)
                .with_base_url(&ai.base_url)
                .with_timeout(ai.timeout())
                .with_max_retries(ai.max_retries);
            Arc::new(OpenAITextGenerator::new(config)?)
        }
        AiProvider::Mock => Arc::new(MockTextGenerator::new()),
        AiProvider::Disabled => Arc::new(UnconfiguredTextGenerator),
    };
    Ok(generator)
}

async fn record_store(config: &RecordStoreConfig) -> Result<Arc<dyn RecordStore>, BoxError> {
    let store: Arc<dyn RecordStore> = match config.backend {
        RecordStoreBackend::Memory => Arc::new(InMemoryRecordStore::new()),
        RecordStoreBackend::Postgres => {
            let url = config.url.as_deref().unwrap_or_default();
            Arc::new(PostgresRecordStore::connect(url, config.max_connections).await?)
        }
    };
    Ok(store)
}

/// Evicts sessions idle longer than `ttl` every `interval`.
fn spawn_session_sweeper(sessions: Arc<InMemorySessionStore>, ttl: Duration, interval: Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            let idle_since = Timestamp::now().minus_secs(ttl.as_secs());
            match sessions.evict_idle(idle_since).await {
                Ok(0) => {}
                Ok(evicted) => info!(evicted, "Evicted idle sessions"),
                Err(e) => error!(error = %e, "Session sweep failed"),
            }
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
    }
}
