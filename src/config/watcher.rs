//! Hot reload of the route configuration file.
//!
//! # Responsibilities
//! - Watch the directory holding the config file, so saves that replace the
//!   file (write to temp, rename) are seen as well as in-place writes
//! - Ignore events for any other file in that directory
//! - Collapse the burst of events one save produces into one reload
//! - Skip reloads whose file content matches what was last delivered
//! - Deliver only configurations that parse and validate

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::parse_config;
use crate::config::schema::AppConfig;

/// Quiet period after the last event before the file is read.
const DEFAULT_SETTLE: Duration = Duration::from_millis(250);

/// Watches one configuration file and publishes reloaded [`AppConfig`]s.
pub struct ConfigWatcher {
    path: PathBuf,
    settle: Duration,
    update_tx: mpsc::UnboundedSender<AppConfig>,
}

impl ConfigWatcher {
    /// Returns the watcher and the receiving end of its updates.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<AppConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        let watcher = Self {
            path: path.to_path_buf(),
            settle: DEFAULT_SETTLE,
            update_tx,
        };
        (watcher, update_rx)
    }

    pub fn with_settle_window(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    /// Start watching. Must be called inside a tokio runtime.
    ///
    /// Updates flow until the returned watcher is dropped.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let file_name = self.path.file_name().map(OsString::from).ok_or_else(|| {
            notify::Error::generic("config path has no file name").add_path(self.path.clone())
        })?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if touches(&event, &file_name) => {
                    if event_tx.send(()).is_err() {
                        tracing::debug!("Config reload task has stopped");
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "Config watch error"),
            },
            Config::default(),
        )?;
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        let last = std::fs::read_to_string(&self.path).ok();
        tracing::info!(path = %self.path.display(), "Config watcher started");
        tokio::spawn(reload_loop(self.path, self.settle, last, event_rx, self.update_tx));
        Ok(watcher)
    }
}

fn touches(event: &Event, file_name: &OsString) -> bool {
    (event.kind.is_modify() || event.kind.is_create())
        && event
            .paths
            .iter()
            .any(|p| p.file_name() == Some(file_name.as_os_str()))
}

async fn reload_loop(
    path: PathBuf,
    settle: Duration,
    mut last: Option<String>,
    mut events: mpsc::UnboundedReceiver<()>,
    updates: mpsc::UnboundedSender<AppConfig>,
) {
    while events.recv().await.is_some() {
        // Wait for the burst to go quiet.
        while let Ok(Some(())) = tokio::time::timeout(settle, events.recv()).await {}

        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Config file unreadable");
                continue;
            }
        };
        if last.as_deref() == Some(content.as_str()) {
            tracing::debug!(path = %path.display(), "Config file unchanged");
            continue;
        }

        match parse_config(&content) {
            Ok(config) => {
                tracing::info!(
                    path = %path.display(),
                    routes = config.routes.len(),
                    "Config file reloaded"
                );
                last = Some(content);
                if updates.send(config).is_err() {
                    return;
                }
            }
            Err(e) => {
                tracing::error!(
                    path = %path.display(),
                    error = %e,
                    "Config file rejected, keeping current configuration"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_ROUTE: &str = r#"
[[routes]]
name = "front"
path = "/"
"#;

    const TWO_ROUTES: &str = r#"
[[routes]]
name = "front"
path = "/"

[[routes]]
name = "node.edit"
path = "/node/{node}/edit"
title = "Edit @node"
"#;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("title_resolver_{name}_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn test_write_delivers_config_once() {
        let dir = scratch_dir("watch_write");
        let path = dir.join("routes.toml");
        std::fs::write(&path, ONE_ROUTE).unwrap();

        let (watcher, mut updates) = ConfigWatcher::new(&path);
        let _guard = watcher
            .with_settle_window(Duration::from_millis(50))
            .run()
            .unwrap();

        std::fs::write(dir.join("neighbour.toml"), "not a config").unwrap();
        std::fs::write(&path, TWO_ROUTES).unwrap();

        let config = tokio::time::timeout(Duration::from_secs(5), updates.recv())
            .await
            .expect("reload within timeout")
            .expect("channel open");
        assert_eq!(config.routes.len(), 2);
        assert_eq!(config.routes[1].name, "node.edit");

        // Rewriting identical content is not a new configuration
        std::fs::write(&path, TWO_ROUTES).unwrap();
        let quiet = tokio::time::timeout(Duration::from_millis(500), updates.recv()).await;
        assert!(quiet.is_err());

        std::fs::remove_dir_all(&dir).unwrap_or_default();
    }

    #[tokio::test]
    async fn test_invalid_config_is_skipped() {
        let dir = scratch_dir("watch_invalid");
        let path = dir.join("routes.toml");
        std::fs::write(&path, ONE_ROUTE).unwrap();

        let (watcher, mut updates) = ConfigWatcher::new(&path);
        let _guard = watcher
            .with_settle_window(Duration::from_millis(50))
            .run()
            .unwrap();

        std::fs::write(&path, "[timeouts]\nrequest_secs = 0\n").unwrap();
        let quiet = tokio::time::timeout(Duration::from_millis(500), updates.recv()).await;
        assert!(quiet.is_err());

        std::fs::write(&path, TWO_ROUTES).unwrap();
        let config = tokio::time::timeout(Duration::from_secs(5), updates.recv())
            .await
            .expect("reload within timeout")
            .expect("channel open");
        assert_eq!(config.routes.len(), 2);

        std::fs::remove_dir_all(&dir).unwrap_or_default();
    }

    #[test]
    fn test_path_without_file_name_is_rejected() {
        let (watcher, _updates) = ConfigWatcher::new(Path::new("/"));
        assert!(watcher.run().is_err());
    }
}
