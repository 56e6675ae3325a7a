mod config;
mod errors;
mod interview;
mod jobs;
mod llm_client;
mod routes;
mod screening;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::interview::engine::InterviewEngine;
use crate::interview::evaluation::Evaluator;
use crate::interview::store::{InMemorySessionStore, RedisSessionStore, SessionStore};
use crate::llm_client::{LlmClient, TextGenerator};
use crate::routes::build_router;
use crate::screening::analyzer::ResumeAnalyzer;
use crate::screening::extract::DocumentExtractor;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed numeric env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Screener API v{}", env!("CARGO_PKG_VERSION"));

    let timeout = Duration::from_secs(config.llm_timeout_secs);

    // Text-generation collaborator, only when a credential is present
    let generator: Option<Arc<dyn TextGenerator>> = match &config.anthropic_api_key {
        Some(key) => {
            let client = LlmClient::new(key.clone(), timeout)?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(Arc::new(client))
        }
        None => {
            warn!("ANTHROPIC_API_KEY not set; analyses and evaluations use fallback content");
            None
        }
    };

    // Interview session store
    let store: Arc<dyn SessionStore> = match &config.redis_url {
        Some(url) => Arc::new(RedisSessionStore::connect(url).await?),
        None => {
            info!("REDIS_URL not set; interview sessions are kept in memory");
            Arc::new(InMemorySessionStore::new())
        }
    };

    let state = AppState {
        engine: InterviewEngine::new(store, Evaluator::new(generator.clone(), timeout)),
        analyzer: Arc::new(ResumeAnalyzer::new(generator, timeout, config.analysis_seed)),
        extractor: Arc::new(DocumentExtractor),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
