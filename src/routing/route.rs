//! Route records.
//!
//! # Responsibilities
//! - Hold the path pattern and string defaults of a route
//! - Expose the title-related defaults
//! - Carry a title callback bound at registration time
//!
//! # Design Decisions
//! - Immutable once built; builder methods consume `self`
//! - `_title_callback` takes precedence over `_title`

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::RouteConfig;
use crate::controller::TitleCallback;
use crate::routing::matcher::PathPattern;

/// Static title template, may contain `@name`/`%name` placeholders.
pub const TITLE: &str = "_title";
/// Translation context for `_title`.
pub const TITLE_CONTEXT: &str = "_title_context";
/// Identifier of a callback computing the title.
pub const TITLE_CALLBACK: &str = "_title_callback";

/// A path pattern plus the defaults describing how to handle it.
#[derive(Debug, Clone)]
pub struct Route {
    name: String,
    pattern: PathPattern,
    defaults: BTreeMap<String, String>,
    priority: u32,
    callback: Option<Arc<dyn TitleCallback>>,
}

impl Route {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            name: String::new(),
            pattern: PathPattern::parse(path),
            defaults: BTreeMap::new(),
            priority: 0,
            callback: None,
        }
    }

    /// Build an unbound route from its configuration entry.
    pub fn from_config(config: &RouteConfig) -> Self {
        let mut route = Self::new(config.path.clone())
            .named(config.name.clone())
            .with_priority(config.priority);
        if let Some(title) = &config.title {
            route = route.with_default(TITLE, title.clone());
        }
        if let Some(context) = &config.title_context {
            route = route.with_default(TITLE_CONTEXT, context.clone());
        }
        if let Some(callback) = &config.title_callback {
            route = route.with_default(TITLE_CALLBACK, callback.clone());
        }
        route
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_default(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.defaults.insert(key.into(), value.into());
        self
    }

    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    /// Attach the resolved handle for `_title_callback`.
    pub fn with_bound_callback(mut self, callback: Arc<dyn TitleCallback>) -> Self {
        self.callback = Some(callback);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    pub fn priority(&self) -> u32 {
        self.priority
    }

    pub fn default(&self, key: &str) -> Option<&str> {
        self.defaults.get(key).map(String::as_str)
    }

    pub fn defaults(&self) -> &BTreeMap<String, String> {
        &self.defaults
    }

    pub fn title(&self) -> Option<&str> {
        self.default(TITLE)
    }

    pub fn title_context(&self) -> Option<&str> {
        self.default(TITLE_CONTEXT)
    }

    pub fn title_callback(&self) -> Option<&str> {
        self.default(TITLE_CALLBACK)
    }

    pub fn bound_callback(&self) -> Option<&Arc<dyn TitleCallback>> {
        self.callback.as_ref()
    }
}
