//! colada: a small cola-registry web service.
//!
//! This is the application entry point. It loads configuration from a TOML
//! file with environment overrides, initializes tracing, builds the
//! lazily-connected database pool, sets up the Axum router with all routes,
//! and serves HTTP until a shutdown signal arrives.

use std::net::SocketAddr;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use colada::config::{AppConfig, LoggingConfig, DEFAULT_CONFIG_PATH, DEFAULT_LOG_FILTER};
use colada::db;
use colada::routes::create_router;
use colada::shutdown;
use colada::state::AppState;

/// colada: a cola-registry web service
#[derive(Parser, Debug)]
#[command(name = "colada", version, about)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    /// Log level filter (e.g., "colada=debug,sqlx=info")
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration (file, then environment overrides)
    let config = AppConfig::load(&args.config)?;

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
    init_tracing(&log_filter, &config.logging);

    tracing::info!(
        version = %config.version,
        git_commit = %config.git_commit,
        database_url = %config.database.url,
        "Loaded configuration"
    );

    // Build the lazily-connected pool; a down database surfaces through the
    // health endpoint, not as a startup failure.
    let pool = db::connect(&config.database)?;

    // Create application state and router
    let state = AppState::new(config.clone(), pool);
    let app = create_router(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.http.host, config.http.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Starting server at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::signal())
        .await?;

    Ok(())
}

fn init_tracing(filter: &str, logging: &LoggingConfig) {
    let registry =
        tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(filter));
    if logging.is_json() {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
