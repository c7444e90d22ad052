//! Snippetbox web server entrypoint.

use std::sync::Arc;

use snippetbox::{
    config::{env_flag_enabled, Config},
    resolve_bind_address, serve_router, AppState, Database, TeraRenderer,
};
use snippetbox_core::{DEFAULT_MAX_CONTENT_SIZE, DEFAULT_PORT, DEFAULT_STATIC_DIR};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct CliFlags {
    help: bool,
}

fn parse_cli_flags(args: &[String]) -> anyhow::Result<CliFlags> {
    let mut flags = CliFlags::default();
    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--help" | "-h" => flags.help = true,
            value if value.starts_with('-') => {
                anyhow::bail!(
                    "Unknown option: '{}'. Use --help to see supported options.",
                    value
                );
            }
            value => {
                anyhow::bail!(
                    "Unexpected positional argument: '{}'. Use --help to see supported options.",
                    value
                );
            }
        }
    }
    Ok(flags)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "snippetbox=info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().collect();
    let cli_flags = parse_cli_flags(&args)?;

    if cli_flags.help {
        print_help();
        return Ok(());
    }

    let config = Config::from_env();
    let database = Database::new(&config.db_path)?;
    tracing::info!("Database opened at {}", config.db_path);

    let renderer = Arc::new(TeraRenderer::from_config(&config)?);
    let state = AppState::new(config.clone(), &database, renderer);

    let allow_public = env_flag_enabled("ALLOW_PUBLIC_ACCESS");
    let bind = std::env::var("BIND").ok();
    let bind_addr = resolve_bind_address(&config, bind.as_deref(), allow_public);
    if !bind_addr.ip().is_loopback() {
        tracing::warn!(
            "Binding to non-localhost address: {} - ensure proper security measures are in place",
            bind_addr
        );
    }

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    let actual_addr = listener.local_addr().unwrap_or(bind_addr);
    tracing::info!("Snippetbox running at http://{}", actual_addr);

    serve_router(listener, state, shutdown_signal()).await?;
    tracing::info!("Server stopped");

    Ok(())
}

fn print_help() {
    println!("Snippetbox\n");
    println!("Usage: snippetbox [OPTIONS]\n");
    println!("Options:");
    println!("  --help            Show this help message");
    println!("\nEnvironment variables:");
    println!("  DB_PATH           Database directory (default: ~/.cache/snippetbox/db)");
    println!("  PORT              Server port (default: {})", DEFAULT_PORT);
    println!(
        "  MAX_CONTENT_SIZE  Maximum snippet content in bytes (default: {})",
        DEFAULT_MAX_CONTENT_SIZE
    );
    println!(
        "  STATIC_DIR        Static asset directory (default: {})",
        DEFAULT_STATIC_DIR
    );
    println!("  TEMPLATE_DIR      Load templates from disk instead of the built-in set");
    println!("  ALLOW_PUBLIC_ACCESS  Permit binding to non-loopback addresses");
    println!(
        "  BIND              Override bind address (e.g. 0.0.0.0:{})",
        DEFAULT_PORT
    );
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down gracefully...");
}
