//! Route lookup.
//!
//! # Responsibilities
//! - Store compiled routes
//! - Bind `_title_callback` identifiers to handles at compile time
//! - Look up the matching route for a request path
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) ordered scan (acceptable for typical route counts)
//! - Explicit `None` for no match rather than a silent default

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::config::RouteConfig;
use crate::controller::{CallableResolver, TitleError};
use crate::http::request::ParameterBag;
use crate::routing::route::Route;

/// Failure to turn route configuration into a `RouteCollection`.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("route '{route}': {source}")]
    Callback {
        route: String,
        #[source]
        source: TitleError,
    },
}

/// Compiled, priority-ordered routes.
#[derive(Debug, Clone, Default)]
pub struct RouteCollection {
    routes: Vec<Arc<Route>>,
    by_name: HashMap<String, usize>,
}

impl RouteCollection {
    /// Order routes by priority (higher first), keeping declaration order for ties.
    pub fn new(routes: Vec<Route>) -> Self {
        let mut routes: Vec<Arc<Route>> = routes.into_iter().map(Arc::new).collect();
        routes.sort_by(|a, b| b.priority().cmp(&a.priority()));

        let by_name = routes
            .iter()
            .enumerate()
            .map(|(i, r)| (r.name().to_string(), i))
            .collect();

        Self { routes, by_name }
    }

    /// Build routes from configuration, binding every title callback.
    pub fn compile(
        configs: &[RouteConfig],
        callables: &dyn CallableResolver,
    ) -> Result<Self, CompileError> {
        let mut routes = Vec::with_capacity(configs.len());
        for config in configs {
            let mut route = Route::from_config(config);
            if let Some(identifier) = route.title_callback().map(str::to_string) {
                let callback = callables
                    .resolve(&identifier)
                    .map_err(|source| CompileError::Callback {
                        route: config.name.clone(),
                        source,
                    })?;
                route = route.with_bound_callback(callback);
            }
            routes.push(route);
        }

        let collection = Self::new(routes);
        tracing::debug!(routes = collection.len(), "Route collection compiled");
        Ok(collection)
    }

    /// First route whose pattern matches `path`, with its raw variables.
    pub fn match_path(&self, path: &str) -> Option<(Arc<Route>, ParameterBag)> {
        self.routes
            .iter()
            .find_map(|route| route.pattern().match_path(path).map(|vars| (route.clone(), vars)))
    }

    pub fn get(&self, name: &str) -> Option<Arc<Route>> {
        self.by_name.get(name).map(|&i| self.routes[i].clone())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Route>> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
