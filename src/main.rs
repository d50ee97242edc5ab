//! Main entry point for the image generation gateway

use sd_turbo_gateway::{
    api,
    config::Settings,
    engine::{DiffusionEngine, EngineHandle, GenerationGate, PlaceholderEngine},
    gateway::GenerationGateway,
    AppState,
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Load configuration
    let settings = Settings::load()?;
    settings.validate()?;

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.logging.level.clone()));

    if settings.logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .init();
    }

    info!("Starting image generation gateway");
    info!(
        "Loaded configuration: server={}:{}, model={}",
        settings.server.host, settings.server.port, settings.model.path
    );

    // The engine handle owns the single engine instance; construction is
    // deferred to first acquire and happens at most once.
    let model_path = settings.model.path.clone();
    let weight_type = settings.model.weight_type.clone();
    let engine = Arc::new(EngineHandle::new(move || {
        PlaceholderEngine::load(&model_path, &weight_type)
            .map(|engine| Arc::new(engine) as Arc<dyn DiffusionEngine>)
    }));

    // Warm up: load the model before accepting traffic. A failure here is
    // sticky, so the server still starts and answers 503 until restarted.
    if let Err(e) = engine.acquire().await {
        warn!(error = %e, "Engine warm-up failed; generation requests will be rejected");
    }

    let gate = Arc::new(GenerationGate::new());
    let gateway = Arc::new(GenerationGateway::new(
        engine,
        gate,
        settings.sampling.clone(),
    ));

    // Create application state
    let app_state = Arc::new(AppState {
        settings: settings.clone(),
        gateway,
    });

    // Build the router
    let app = api::routes::create_router(app_state).await;

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    info!("Server listening on {}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
