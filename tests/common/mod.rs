//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use title_resolver::config::{parse_config, AppConfig};
use title_resolver::controller::{builtin, CallbackRegistry};
use title_resolver::{HttpServer, Shutdown};

/// A server running on an ephemeral local port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub config_updates: mpsc::UnboundedSender<AppConfig>,
    pub handle: JoinHandle<Result<(), std::io::Error>>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Start a server for `config` with the built-in callbacks plus `extra`.
pub async fn start_server(config: &str, extra: impl FnOnce(&CallbackRegistry)) -> TestServer {
    let registry = CallbackRegistry::new();
    builtin::register_defaults(&registry);
    extra(&registry);

    let server = HttpServer::new(parse_config(config).unwrap(), registry).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let (config_updates, updates_rx) = mpsc::unbounded_channel();
    let listener_shutdown = shutdown.subscribe();
    let handle =
        tokio::spawn(async move { server.run(listener, updates_rx, listener_shutdown).await });

    TestServer {
        addr,
        shutdown,
        config_updates,
        handle,
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}
