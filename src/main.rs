//! Route title server.
//!
//! # Architecture Overview
//!
//! ```text
//!     GET /node/42/edit
//!     ─────────────────▶ http::server ──▶ routing ──▶ (Route, raw variables)
//!                                                          │
//!                                                          ▼
//!                                              controller::TitleResolver
//!                                       ┌──────────────────┴─────────────────┐
//!                                _title_callback                          _title
//!                          registry + argument resolver        @/% substitutions + context
//!                                       └──────────────────┬─────────────────┘
//!                                                          ▼
//!     ◀───────────────── JSON { title, source } ◀── translation (render)
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use title_resolver::config::{load_config, AppConfig, ConfigWatcher};
use title_resolver::controller::{builtin, CallbackRegistry};
use title_resolver::lifecycle::{signals, Shutdown};
use title_resolver::observability::{logging, metrics};
use title_resolver::HttpServer;

#[derive(Parser)]
#[command(name = "title-server")]
#[command(about = "Serves page titles for configured routes", long_about = None)]
struct Args {
    /// TOML configuration file; built-in defaults when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Reload routes when the configuration file changes.
    #[arg(long, requires = "config")]
    watch: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };

    logging::init(&config.observability);
    tracing::info!("title-server v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        routes = config.routes.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let registry = CallbackRegistry::new();
    builtin::register_defaults(&registry);

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = HttpServer::new(config, registry)?;

    // The watcher must outlive the server for updates to keep flowing.
    let (_watcher, config_updates) = match (&args.config, args.watch) {
        (Some(path), true) => {
            let (watcher, updates) = ConfigWatcher::new(path);
            (Some(watcher.run()?), updates)
        }
        _ => {
            let (_, updates) = mpsc::unbounded_channel();
            (None, updates)
        }
    };

    let shutdown = Shutdown::new();
    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        signals::trigger_on_signal(&signal_shutdown).await;
    });

    server.run(listener, config_updates, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
