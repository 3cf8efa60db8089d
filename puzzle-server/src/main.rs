use std::sync::Arc;
use tokio::signal;
use tracing::info;

use puzzle_persistence::{SnapshotRepository, connection::connect_and_migrate};
use puzzle_server::{
    analytics::AnalyticsReporter, config::Config, create_routes, provider::PuzzleProvider,
    session_manager::SessionManager,
};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting daily connections server...");

    let config = Config::new();

    // The puzzle file is read lazily, per session load: a missing or
    // broken file surfaces to clients as a load failure rather than
    // preventing startup.
    info!("Serving puzzles from: {}", config.puzzles_file);
    let provider = PuzzleProvider::from_file(&config.puzzles_file);

    // Initialize database connection and run migrations
    let db = match connect_and_migrate().await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to connect to database and run migrations: {}", e);
            std::process::exit(1);
        }
    };
    let snapshots = Arc::new(SnapshotRepository::new(db));

    let analytics = AnalyticsReporter::new(config.analytics_endpoint.clone());
    if config.analytics_endpoint.is_some() {
        info!("Analytics reporting enabled");
    }

    let manager = Arc::new(SessionManager::new(provider, snapshots, analytics.clone()));
    manager.add_event_handler(Box::new(analytics)).await;

    let routes = create_routes(manager);

    info!("Server starting on {}:{}", config.host, config.port);

    let addr = (
        config
            .host
            .parse::<std::net::IpAddr>()
            .expect("Invalid HOST"),
        config.port,
    );

    let (addr, server) = warp::serve(routes).bind_with_graceful_shutdown(addr, async {
        // Wait for SIGINT (Ctrl+C) or SIGTERM
        #[cfg(unix)]
        {
            let mut sigint = signal::unix::signal(signal::unix::SignalKind::interrupt()).unwrap();
            let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate()).unwrap();

            tokio::select! {
                _ = sigint.recv() => {
                    info!("Received SIGINT, shutting down gracefully...");
                }
                _ = sigterm.recv() => {
                    info!("Received SIGTERM, shutting down gracefully...");
                }
            }
        }

        #[cfg(not(unix))]
        {
            signal::ctrl_c().await.expect("Failed to listen for ctrl+c");
            info!("Received Ctrl+C, shutting down gracefully...");
        }
    });

    info!(
        "Server started successfully on {}. Press Ctrl+C to stop.",
        addr
    );
    server.await;
    info!("Server shutdown complete.");
}
