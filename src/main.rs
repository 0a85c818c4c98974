use fxboard::api::{self, AppState};
use fxboard::{Config, DealSource, Refresher, TerminalBridgeSource};
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let port = config.port;

    let source: Arc<dyn DealSource> = Arc::new(TerminalBridgeSource::new(
        config.trading_api_url.clone(),
        config.credentials.clone(),
    ));
    let refresher = Refresher::new(source, config.snapshot_path.clone(), config.from_date);

    // A failed refresh keeps the previous snapshot in service
    if config.refresh_on_start {
        match refresher.refresh().await {
            Ok(report) => tracing::info!(
                "Startup refresh wrote {} rows to {}",
                report.rows_written,
                config.snapshot_path.display()
            ),
            Err(e) => tracing::warn!("Startup refresh failed, serving existing snapshot: {}", e),
        }
    }

    // Create router
    let app = api::create_router(AppState::new(config.pip_table.clone(), refresher));

    // Bind to address
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Server listening on {}", addr);

    // Run server
    if let Err(e) = axum::serve(listener, app).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
