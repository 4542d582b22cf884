use std::error::Error;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

use headline_notes::cli::Cli;
use headline_notes::routes::{self, AppState};
use headline_notes::scrapers::Scraper;
use headline_notes::store::{SqliteStore, Store};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    info!("headline_notes starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    // ---- Persistence ----
    let store: Arc<dyn Store> = Arc::new(SqliteStore::open(&args.database_url).await?);

    // ---- HTTP ----
    let scraper = Scraper::new(args.source_url.clone(), args.scrape_concurrency)?;
    let state = Arc::new(AppState::new(Arc::clone(&store), scraper));
    let app = routes::create_router_with_public_dir(state, &args.public_dir);

    let listener = TcpListener::bind((args.bind_host.as_str(), args.port)).await?;
    info!(
        addr = %listener.local_addr()?,
        source = %args.source_url,
        "App running"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped; closing document store");
    store.close().await?;
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl-C"),
        _ = terminate => info!("Received SIGTERM"),
    }
}
