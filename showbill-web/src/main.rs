//! showbill-web - venue and artist listing site
//!
//! Resolves configuration (CLI/env, then TOML, then defaults), opens the
//! SQLite database and serves the listing pages until Ctrl+C or SIGTERM.

use anyhow::{Context, Result};
use clap::Parser;
use showbill_common::config::ShowbillConfig;
use showbill_common::db::{init_database, seed::seed_demo_data};
use showbill_web::cli::Args;
use showbill_web::{build_router, AppState};
use tokio::signal;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = ShowbillConfig::resolve(args.overrides());

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .init();

    // Build identification first, before any database delay
    info!(
        "Starting Showbill (showbill-web) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    for warning in &config.warnings {
        warn!("{}", warning);
    }
    match &config.config_source {
        Some(path) => info!("Config file: {}", path.display()),
        None => info!("No config file, using CLI/env values and defaults"),
    }

    info!("Database path: {}", config.database.display());
    let pool = match init_database(&config.database).await {
        Ok(pool) => {
            info!("✓ Database ready");
            pool
        }
        Err(e) => {
            error!("Failed to open database: {}", e);
            return Err(e.into());
        }
    };

    if args.seed_demo {
        if let Some(summary) = seed_demo_data(&pool)
            .await
            .context("Failed to seed demo data")?
        {
            info!(
                "Seeded {} venues, {} artists, {} shows",
                summary.venues, summary.artists, summary.shows
            );
        }
    }

    info!("Venue listing counts: {}", config.count_policy);

    let state = AppState::new(pool, config.count_policy);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind))?;
    info!("showbill-web listening on http://{}", config.bind);
    info!("Health check: http://{}/health", config.bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
