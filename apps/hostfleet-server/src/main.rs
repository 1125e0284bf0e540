mod config;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use clap::{Parser, Subcommand};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use config::AppConfig;
use inventory_module::infra::HttpMetricSource;
use inventory_module::InventoryService;
use system_module::SystemCollector;

/// Hostfleet - fleet inventory server
#[derive(Parser)]
#[command(name = "hostfleet-server")]
#[command(about = "Hostfleet - polls a fleet of hosts and serves the inventory")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port override for the HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(ref path) = cli.config {
        if !Path::new(path).is_file() {
            anyhow::bail!("config file does not exist: {}", path.to_string_lossy());
        }
    }

    // Layered config: defaults -> YAML (if provided) -> env (HOSTFLEET__*)
    // -> CLI overrides
    let config = AppConfig::load(cli.config.as_deref())?;

    let mut addr: SocketAddr = config
        .server
        .bind_addr
        .parse()
        .with_context(|| format!("invalid bind address: {}", config.server.bind_addr))?;
    if let Some(port) = cli.port {
        addr.set_port(port);
    }

    init_logging(&config.logging.filter, cli.verbose);

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Check => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            tracing::info!("configuration OK");
            Ok(())
        }
        Commands::Run => serve(config, addr).await,
    }
}

fn init_logging(filter: &str, verbose: u8) {
    let directives = match verbose {
        0 => filter.to_owned(),
        1 => "debug".to_owned(),
        _ => "trace".to_owned(),
    };
    let filter = EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn serve(config: AppConfig, addr: SocketAddr) -> Result<()> {
    let mut router = Router::new();

    if config.system.enabled {
        let collector = Arc::new(SystemCollector::new());
        router = router.nest("/system/api", system_module::api::router(collector));
        tracing::info!("system endpoint enabled");
    }

    if config.inventory.enabled {
        let source = HttpMetricSource::new(&config.inventory)?;
        let service = Arc::new(InventoryService::new(Arc::new(source)));
        router = router.nest("/inventory/api", inventory_module::api::rest::router(service));
        tracing::info!(
            client_port = config.inventory.client_port,
            "inventory enabled"
        );
    }

    let router = router.layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("HTTP server bound on {addr}");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!(e))
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::warn!("failed to listen for shutdown signal");
        return;
    }
    tracing::info!("HTTP server shutting down gracefully");
}
