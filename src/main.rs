use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use netman::config::AppConfig;
use netman::discovery::{self, DiscoveryService};
use netman::inventory::Inventory;
use netman::telemetry::Poller;
use netman::transport::{NetSnmpConnector, SshConnector};
use netman::*;
use tokio::sync::{RwLock, broadcast};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[derive(Parser)]
#[command(name = "netman", version, about = "Lab network manager.")]
struct CommandLine {
    /// Config file (default: $CONFIG_FILE, then ./config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the unconfigured router, provision DHCP on it and read the leases back
    #[command(alias = "d")]
    Discover,
    /// Poll every device once, then write the report and the CPU graph
    #[command(alias = "p")]
    Poll,
    /// Poll on a schedule and serve the latest results over HTTP
    #[command(alias = "s")]
    Serve,
    /// Publish produced files
    Publish { files: Vec<PathBuf> },
}

/// Cancelled on Ctrl-C or SIGTERM.
fn shutdown_token() -> CancellationToken {
    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        #[cfg(unix)]
        {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    tokio::select! {
                        _ = tokio::signal::ctrl_c() => {}
                        _ = sigterm.recv() => {}
                    }
                }
                Err(_) => {
                    let _ = tokio::signal::ctrl_c().await;
                }
            }
        }
        #[cfg(not(unix))]
        {
            let _ = tokio::signal::ctrl_c().await;
        }
        tracing::info!("Received shutdown signal");
        trigger.cancel();
    });
    token
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let cli = CommandLine::parse();
    if let Commands::Publish { files } = &cli.command {
        let published = publish::publish(files);
        tracing::info!(published = published.len(), "Publish finished");
        return Ok(());
    }

    let app_config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    let cancel = shutdown_token();

    match cli.command {
        Commands::Discover => discover(&app_config, &cancel).await,
        Commands::Poll => poll(&app_config, &cancel).await,
        Commands::Serve => serve(app_config, cancel).await,
        Commands::Publish { .. } => Ok(()),
    }
}

async fn discover(app_config: &AppConfig, cancel: &CancellationToken) -> Result<()> {
    let inventory = Inventory::load(&app_config.inventory.path)?;
    let macs = discovery::load_mac_map(&app_config.discovery.mac_map_path)?;
    let service = DiscoveryService::new(Box::new(SshConnector::default()), &app_config.discovery);

    let outcome = service.run(&inventory, &macs, cancel).await?;
    tracing::info!(
        device = %app_config.discovery.target,
        address = %outcome.target_address,
        "Device identified and provisioned"
    );
    tracing::debug!(output = %outcome.config_output, "Applied configuration");
    for lease in &outcome.leases {
        tracing::info!(address = %lease, "DHCP lease");
    }
    Ok(())
}

fn poller(app_config: &AppConfig) -> Poller {
    let connector = NetSnmpConnector {
        timeout_secs: app_config.polling.timeout_secs,
        retries: app_config.polling.retries,
    };
    Poller::new(Arc::new(connector), &app_config.polling)
}

async fn poll(app_config: &AppConfig, cancel: &CancellationToken) -> Result<()> {
    let snapshot = poller(app_config).cycle(cancel, |_| {}).await;
    let files = report::write_artifacts(&snapshot, &app_config.output)?;
    tracing::info!(
        devices = snapshot.report.len(),
        cpu_samples = snapshot.cpu.len(),
        files = files.len(),
        "Poll finished"
    );
    Ok(())
}

async fn serve(app_config: AppConfig, cancel: CancellationToken) -> Result<()> {
    let latest: worker::SharedSnapshot = Arc::new(RwLock::new(None));
    let (cpu_tx, _) = broadcast::channel(app_config.server.broadcast_capacity);

    let worker_handle = worker::spawn(
        worker::WorkerDeps {
            poller: Arc::new(poller(&app_config)),
            latest: latest.clone(),
            cpu_tx: cpu_tx.clone(),
            cancel: cancel.clone(),
        },
        worker::WorkerConfig {
            refresh_secs: app_config.server.refresh_secs,
            output: Some(app_config.output.clone()),
        },
    );

    let app = routes::app(latest, cpu_tx);
    let addr = format!("{}:{}", app_config.server.host, app_config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);

    let shutdown = cancel.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    cancel.cancel();
    let _ = worker_handle.await;
    Ok(())
}
