//! appinfo-svc - application metadata service
//!
//! Serves version/build metadata together with the authenticated user's
//! identity. Authentication itself is performed by an upstream layer.

use std::path::PathBuf;

use anyhow::{Context, Result};
use appinfo_common::config::{load_toml_config, CompiledDefaults, ConfigOverrides, ServiceConfig};
use appinfo_svc::version::{BUILD_PROFILE, BUILD_TIMESTAMP, GIT_HASH, PKG_VERSION};
use appinfo_svc::{build_router, AppState, VersionInfo};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for appinfo-svc
#[derive(Parser, Debug)]
#[command(name = "appinfo-svc")]
#[command(about = "Application metadata service")]
#[command(version)]
struct Args {
    /// TOML configuration file
    #[arg(short, long, env = "APPINFO_CONFIG")]
    config: Option<PathBuf>,

    /// Address to listen on
    #[arg(short, long, env = "APPINFO_BIND")]
    bind: Option<String>,

    /// Reported application version
    #[arg(long = "app-version", env = "APPINFO_VERSION")]
    app_version: Option<String>,

    /// Reported build identifier
    #[arg(long, env = "APPINFO_BUILD")]
    build: Option<String>,

    /// HTTP status returned when a request has no principal
    #[arg(long, env = "APPINFO_MISSING_PRINCIPAL_STATUS")]
    missing_principal_status: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "appinfo_svc=info,appinfo_common=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting appinfo-svc v{} [{}] built {} ({})",
        PKG_VERSION, GIT_HASH, BUILD_TIMESTAMP, BUILD_PROFILE
    );

    let args = Args::parse();

    let file = load_toml_config(args.config.as_deref()).context("Failed to load config file")?;
    let overrides = ConfigOverrides {
        bind_addr: args.bind,
        version: args.app_version,
        build: args.build,
        missing_principal_status: args.missing_principal_status,
    };
    let compiled = VersionInfo::compiled();
    let defaults = CompiledDefaults {
        version: compiled.version().to_string(),
        build: compiled.build().to_string(),
    };
    let config =
        ServiceConfig::resolve(overrides, file, defaults).context("Invalid configuration")?;

    info!("Reporting version {}-{}", config.version, config.build);
    info!(
        "Missing principal status: {}",
        config.missing_principal_status
    );
    if let Some(claim) = &config.claim {
        info!("Enforcing claim '{}' with roles {:?}", claim.name, claim.roles);
    }
    if let Some(principal) = &config.principal {
        warn!(
            "Fixed principal '{}' configured - every request is treated as this user",
            principal.username
        );
    }

    let state = AppState::from_config(&config).context("Failed to build application state")?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .context("Failed to bind to address")?;
    info!("appinfo-svc listening on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install signal handler: {}", e);
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
