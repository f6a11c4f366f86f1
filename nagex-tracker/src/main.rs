//! Nagaribashi Express order tracker
//!
//! A terminal daemon that keeps a set of food-delivery orders in sync
//! with the order service: periodic polling, operator status updates
//! and pushed notifications, rendered to the console.

mod config;
mod console;
mod display;
mod shutdown;

use std::sync::Arc;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

use config::ConfigLoader;
use display::ConsoleSurface;
use nagex_core::events::{
    Sequencer, notification_channel, status_fetched_channel, tracker_command_channel,
    update_request_channel,
};
use nagex_core::processors::{NotificationRelay, StatusPoller, SurfaceBinder, UpdateController};
use nagex_sdk::client::OrderClient;
use nagex_sdk::csrf::{CsrfTokenSource, FixedToken, NoToken, TokenFile};
use nagex_sdk::objects::OrderId;
use shutdown::shutdown_signal;

/// Nagaribashi Express - terminal order tracking daemon
#[derive(Parser, Debug)]
#[command(name = "nagex-tracker")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "./nagex-tracker.toml")]
    config: PathBuf,

    /// Override the order service base URL
    #[arg(short, long)]
    base_url: Option<Url>,

    /// Additional order ids to track (repeatable)
    #[arg(short, long = "order")]
    orders: Vec<String>,

    /// Anti-forgery token for mutating requests
    #[arg(long, env = "NAGEX_CSRF_TOKEN")]
    csrf_token: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    init_tracing();

    // Parse command line arguments
    let args = Args::parse();

    tracing::info!("Starting nagex-tracker v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let extra_orders: Vec<OrderId> = args
        .orders
        .iter()
        .map(|id| OrderId::new(id.as_str()))
        .collect();
    let config_loader = ConfigLoader::new(&args.config, args.base_url, extra_orders);
    let config = config_loader.load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        e
    })?;
    tracing::info!("Configuration loaded from {:?}", args.config);

    // Pick the CSRF token source: CLI/env token first, then the token
    // file, otherwise run read-only.
    let csrf: Arc<dyn CsrfTokenSource> = match (&args.csrf_token, &config.csrf_token_file) {
        (Some(token), _) => Arc::new(FixedToken::new(token.clone())),
        (None, Some(path)) => Arc::new(TokenFile::new(path.clone())),
        (None, None) => {
            tracing::warn!("No CSRF token configured, status updates will be rejected");
            Arc::new(NoToken)
        }
    };

    let client = OrderClient::new(config.base_url.clone(), csrf);

    // One-off delivery location report
    if let Some(location) = &config.location {
        match client.report_location(location).await {
            Ok(()) => tracing::info!(
                latitude = location.latitude,
                longitude = location.longitude,
                "Reported delivery location"
            ),
            Err(e) => tracing::warn!("Failed to report delivery location: {}", e),
        }
    }

    // Event plumbing shared by all processors
    let sequencer = Sequencer::new();
    let (fetched_tx, fetched_rx) = status_fetched_channel();
    let (notification_tx, notification_rx) = notification_channel();
    let (update_tx, update_rx) = update_request_channel();
    let (tracker_tx, tracker_rx) = tracker_command_channel();
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);

    let surface = Arc::new(ConsoleSurface);
    let binder = SurfaceBinder::new(surface.clone(), surface);
    let binder_handle = tokio::spawn(binder.run(fetched_rx, notification_rx, shutdown_rx.clone()));

    let poller = StatusPoller::new(client.clone(), sequencer.clone(), fetched_tx.clone());
    let poller_handle = tokio::spawn(poller.run(config.orders.clone(), tracker_rx, shutdown_rx.clone()));

    let controller = UpdateController::new(client.clone(), sequencer, fetched_tx, notification_tx.clone());
    let controller_handle = tokio::spawn(controller.run(update_rx, shutdown_rx.clone()));

    // Push notifications are best effort: without the stream the tracker
    // still polls.
    let relay_handle = match client.notifications().await {
        Ok(stream) => {
            let relay = NotificationRelay::new(stream, notification_tx);
            Some(tokio::spawn(relay.run(shutdown_rx)))
        }
        Err(e) => {
            tracing::warn!("Notification stream unavailable: {}", e);
            drop(notification_tx);
            drop(shutdown_rx);
            None
        }
    };

    // Operator console; closing it (quit or EOF) shuts the tracker down.
    let console_handle = tokio::spawn(console::run_console(update_tx, tracker_tx));

    tokio::select! {
        _ = shutdown_signal() => {}
        _ = console_handle => {
            tracing::info!("Console closed, initiating graceful shutdown");
        }
    }

    // Broadcast shutdown and wait for the processors to drain.
    let _ = shutdown_tx.send(true);
    let _ = binder_handle.await;
    let _ = poller_handle.await;
    let _ = controller_handle.await;
    if let Some(handle) = relay_handle {
        let _ = handle.await;
    }
    tracing::info!("Tracker shutdown complete");

    Ok(())
}

/// Initialize the tracing subscriber with environment-based filtering.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn,hyper=warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
