//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout)
//! - Resolve the title for any requested path
//! - Apply reloaded configuration without restarting
//! - Graceful shutdown

use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwap;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::controller::{CallbackRegistry, RequestArgumentResolver, TitleError, TitleResolver};
use crate::http::request::{request_id, MakeRequestUuid, TitleRequest};
use crate::http::response::{error_response, RouteSummary, TitleResponse, TitleSource};
use crate::lifecycle::shutdown::ShutdownListener;
use crate::observability::metrics;
use crate::routing::{CompileError, Route, RouteCollection};
use crate::translation::{escape_html, PassthroughTranslator};

/// Everything a reload replaces.
#[derive(Debug)]
pub struct ServerState {
    pub routes: RouteCollection,
    pub site_name: String,
}

impl ServerState {
    fn from_config(config: &AppConfig, registry: &CallbackRegistry) -> Result<Self, CompileError> {
        Ok(Self {
            routes: RouteCollection::compile(&config.routes, registry)?,
            site_name: config.site.name.clone(),
        })
    }
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<ArcSwap<ServerState>>,
    pub resolver: TitleResolver,
    pub registry: CallbackRegistry,
}

impl AppState {
    /// Compile `config` and swap it in. On failure the current state stays.
    pub fn apply_config(&self, config: &AppConfig) -> Result<(), CompileError> {
        let next = ServerState::from_config(config, &self.registry)?;
        metrics::record_route_count(next.routes.len());
        tracing::info!(routes = next.routes.len(), site = %next.site_name, "Configuration applied");
        self.inner.store(Arc::new(next));
        Ok(())
    }
}

/// HTTP server resolving route titles.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
    state: AppState,
}

impl HttpServer {
    /// Create a server whose title callbacks come from `registry`.
    pub fn new(config: AppConfig, registry: CallbackRegistry) -> Result<Self, CompileError> {
        let resolver = TitleResolver::new(
            Arc::new(registry.clone()),
            Arc::new(PassthroughTranslator),
            Arc::new(RequestArgumentResolver),
        );
        Self::with_resolver(config, registry, resolver)
    }

    /// Create a server with a custom resolver (e.g. a real translator).
    pub fn with_resolver(
        config: AppConfig,
        registry: CallbackRegistry,
        resolver: TitleResolver,
    ) -> Result<Self, CompileError> {
        let initial = ServerState::from_config(&config, &registry)?;
        metrics::record_route_count(initial.routes.len());

        let state = AppState {
            inner: Arc::new(ArcSwap::from_pointee(initial)),
            resolver,
            registry,
        };
        let router = Self::build_router(&config, state.clone());
        Ok(Self {
            router,
            config,
            state,
        })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        Router::new()
            .route("/_routes", get(routes_handler))
            .route("/", get(title_handler))
            .route("/{*path}", get(title_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// A clone of the router, e.g. to drive it without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Serve on `listener` until `shutdown` fires.
    ///
    /// Configurations received on `config_updates` replace the routes and
    /// site settings; listener and timeout settings apply on restart only.
    pub async fn run(
        self,
        listener: TcpListener,
        mut config_updates: mpsc::UnboundedReceiver<AppConfig>,
        shutdown: ShutdownListener,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let reload_state = self.state.clone();
        let reloader = tokio::spawn(async move {
            while let Some(config) = config_updates.recv().await {
                if let Err(e) = reload_state.apply_config(&config) {
                    tracing::error!(error = %e, "Rejected reloaded configuration");
                }
            }
        });

        let result = axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown.wait())
            .await;

        reloader.abort();
        tracing::info!("HTTP server stopped");
        result
    }
}

/// Resolve and render the title for the requested path.
async fn title_handler(State(state): State<AppState>, headers: HeaderMap, uri: Uri) -> Response {
    let started = Instant::now();
    let request_id = request_id(&headers);
    let path = uri.path().to_string();
    let inner = state.inner.load();

    let Some((route, raw_variables)) = inner.routes.match_path(&path) else {
        tracing::debug!(request_id = %request_id, path = %path, "No route matched");
        return error_response(StatusCode::NOT_FOUND, request_id, "No matching route found");
    };

    let request = TitleRequest::from_match(&route, raw_variables);
    match state.resolver.get_title(&request, &route) {
        Ok(Some(title)) => {
            let source = if route.title_callback().is_some() {
                TitleSource::Callback
            } else {
                TitleSource::Static
            };
            let rendered = title.render(state.resolver.translator());
            respond(request_id, &route, path, rendered, source, started)
        }
        Ok(None) => {
            let rendered = escape_html(&inner.site_name);
            respond(request_id, &route, path, rendered, TitleSource::SiteName, started)
        }
        Err(e) => title_error(request_id, &route, e),
    }
}

fn respond(
    request_id: String,
    route: &Route,
    path: String,
    title: String,
    source: TitleSource,
    started: Instant,
) -> Response {
    metrics::record_resolution(source.as_str(), started);
    tracing::debug!(
        request_id = %request_id,
        route = %route.name(),
        source = source.as_str(),
        "Title resolved"
    );
    Json(TitleResponse {
        request_id,
        route: route.name().to_string(),
        path,
        title,
        source,
    })
    .into_response()
}

fn title_error(request_id: String, route: &Route, error: TitleError) -> Response {
    metrics::record_error(error.kind());
    tracing::error!(
        request_id = %request_id,
        route = %route.name(),
        error = %error,
        "Title resolution failed"
    );
    error_response(StatusCode::INTERNAL_SERVER_ERROR, request_id, error.to_string())
}

/// List the active routes in match order.
async fn routes_handler(State(state): State<AppState>) -> Json<Vec<RouteSummary>> {
    let inner = state.inner.load();
    let summaries = inner
        .routes
        .iter()
        .map(|route| RouteSummary {
            name: route.name().to_string(),
            path: route.path().to_string(),
            priority: route.priority(),
            title_source: if route.title_callback().is_some() {
                Some(TitleSource::Callback)
            } else if route.title().is_some() {
                Some(TitleSource::Static)
            } else {
                None
            },
        })
        .collect();
    Json(summaries)
}
