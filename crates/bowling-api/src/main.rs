//! Bowling scorekeeper API server entry point.

use std::sync::Arc;

use bowling_core::clock::SystemClock;
use bowling_event_store::in_memory_event_repository::InMemoryEventRepository;
use bowling_game::application::summarizer::{ScoreSheetSummarizer, Summarizer};
use bowling_summary::ChatCompletionSummarizer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use bowling_api::config::Config;
use bowling_api::error::AppError;
use bowling_api::routes;
use bowling_api::state::AppState;
use bowling_api::telemetry;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = Config::from_env()?;
    let telemetry = telemetry::init(config.otlp_endpoint.as_deref())?;

    tracing::info!("Starting bowling scorekeeper API server");

    let summarizer: Arc<dyn Summarizer> = match config.summary.clone() {
        Some(summary_config) => {
            let summarizer = ChatCompletionSummarizer::new(summary_config)?;
            tracing::info!(model = %summarizer.model(), "using chat-completion summarizer");
            Arc::new(summarizer)
        }
        None => {
            tracing::info!("no summary API key configured, using score-sheet summarizer");
            Arc::new(ScoreSheetSummarizer)
        }
    };

    let app_state = AppState::new(
        Arc::new(SystemClock),
        Arc::new(InMemoryEventRepository::new()),
        summarizer,
    );

    // TODO: Replace CorsLayer::permissive() with restricted origins once a browser client exists.
    let app = routes::build_router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    let addr = config.socket_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    telemetry.shutdown();
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
