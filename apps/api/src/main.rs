mod config;
mod errors;
mod extract;
mod form;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::extract::GeminiExtractor;
use crate::form::session::Session;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{FileKvStore, KvStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting GreenValley Careers API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the draft store
    let store: Arc<dyn KvStore> = Arc::new(FileKvStore::new(&config.draft_store_path));
    info!("Draft store at {}", config.draft_store_path.display());

    // Initialize the resume extractor
    let extractor = GeminiExtractor::new(config.gemini_api_key.clone())?;
    info!("Resume extractor initialized (model: {})", extract::MODEL);

    // Start the applicant session, restoring any saved draft
    let session = Session::start(store.as_ref());
    info!("Application session ready");

    let state = AppState {
        session: Arc::new(Mutex::new(session)),
        store,
        extractor: Arc::new(extractor),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
