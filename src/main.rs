//! Sommelier HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use sommelier::cache::TextCache;
use sommelier::config::Config;
use sommelier::embedding::{EmbedderConfig, EmbeddingBackend, HttpEmbedder};
use sommelier::gateway::{HandlerState, create_router_with_state};
use sommelier::llm::{ChatBackend, GenaiModel};
use sommelier::pipeline::{Recommender, RecommenderConfig};
use sommelier::vectordb::CatalogBackend;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check().await);
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        chat_model = %config.chat_model,
        "Sommelier starting"
    );

    let catalog = CatalogBackend::connect(&config.qdrant_url, &config.collection)?;
    if let Err(e) = catalog.health_check().await {
        tracing::warn!(error = %e, "Catalog index not reachable yet; requests will fail until it is");
    } else if let Err(e) = catalog.ensure_collection(config.embedding_dim as u64).await {
        tracing::warn!(error = %e, collection = %config.collection, "Could not prepare catalog collection");
    }

    let (embedder, model) = build_services(&config)?;

    let cache = TextCache::connect(
        config.redis_url.as_deref(),
        config.memory_cache_capacity,
        config.cache_ttl,
        config.cache_timeout,
    )
    .await;

    let recommender = Recommender::new(
        embedder,
        catalog,
        model,
        cache,
        RecommenderConfig::from_config(&config),
    );
    let state = HandlerState::new(Arc::new(recommender), config.price);
    let app = create_router_with_state(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Sommelier shutdown complete");
    Ok(())
}

/// Embedding and chat clients. A `mock:` catalog URL runs fully offline when
/// built with the `mock` feature.
fn build_services(config: &Config) -> anyhow::Result<(EmbeddingBackend, ChatBackend)> {
    #[cfg(feature = "mock")]
    if config.qdrant_url.starts_with("mock:") {
        tracing::warn!("Mock catalog configured, using offline embedder and model");
        return Ok((
            EmbeddingBackend::Mock(sommelier::embedding::MockEmbedder::new(config.embedding_dim)),
            ChatBackend::Mock(sommelier::llm::MockLanguageModel::failing()),
        ));
    }

    let embedder = HttpEmbedder::new(EmbedderConfig::from_config(config))?;
    let model = GenaiModel::new(config.chat_model.clone(), config.llm_timeout);
    Ok((EmbeddingBackend::Http(embedder), ChatBackend::Genai(model)))
}

async fn run_health_check() -> i32 {
    let port = std::env::var("SOMMELIER_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);

    let url = format!("http://127.0.0.1:{}/healthz", port);

    let Ok(client) = reqwest::Client::builder()
        .timeout(Duration::from_secs(1))
        .build()
    else {
        return 1;
    };

    match client.get(&url).send().await {
        Ok(res) if res.status().is_success() => 0,
        _ => 1,
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
