use newsroom_admin_service::infrastructure::{
    config::{AppConfig, LogFormat, LoggingConfig},
    http::start_server,
};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().inspect_err(|e| {
        eprintln!("Failed to load configuration: {e}");
    })?;

    init_tracing(&config.logging);

    info!("Starting Newsroom Admin Service in {} mode", config.mode);
    info!("Configuration loaded: server will bind to {}:{}", config.server.host, config.server.port);

    if let Err(e) = start_server(config).await {
        error!("Server error: {}", e);
        return Err(e);
    }

    Ok(())
}

/// Initialize structured logging
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.filter_directive()));
    let registry = tracing_subscriber::registry().with(filter);

    match logging.format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer().pretty()).init(),
        LogFormat::Compact => registry.with(tracing_subscriber::fmt::layer().compact()).init(),
    }
}
