//! Title callbacks and their lookup by identifier.
//!
//! # Responsibilities
//! - Describe a callable: identifier, declared parameters, invocation
//! - Map string identifiers to callable handles
//!
//! # Design Decisions
//! - Handles are `Arc<dyn TitleCallback>` so routes can hold them directly
//! - Registry is concurrent (DashMap): callbacks may be added after startup
//! - Lookup failure is `TitleError::CallableNotFound`, never a panic

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use serde_json::Value;

use crate::controller::error::TitleError;
use crate::controller::title::Title;

/// A parameter a callback expects, matched by name against the request.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    pub name: String,
    /// Used when the request has no value for the parameter.
    pub default: Option<Value>,
    /// Accepts `null` when nothing else is available.
    pub nullable: bool,
}

impl ParameterSpec {
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
            nullable: false,
        }
    }

    pub fn optional(name: impl Into<String>, default: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            default: Some(default.into()),
            nullable: false,
        }
    }

    pub fn nullable(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
            nullable: true,
        }
    }
}

/// A function computing a title at request time.
pub trait TitleCallback: Send + Sync + fmt::Debug {
    /// Identifier the callback is registered under.
    fn name(&self) -> &str;

    /// Parameters in invocation order.
    fn parameters(&self) -> &[ParameterSpec];

    /// Called with one argument per declared parameter.
    fn invoke(&self, arguments: Vec<Value>) -> Title;
}

type CallbackFn = dyn Fn(Vec<Value>) -> Title + Send + Sync;

/// Adapts a closure into a `TitleCallback`.
pub struct FnCallback {
    name: String,
    parameters: Vec<ParameterSpec>,
    func: Box<CallbackFn>,
}

impl FnCallback {
    pub fn new<F>(name: impl Into<String>, parameters: Vec<ParameterSpec>, func: F) -> Self
    where
        F: Fn(Vec<Value>) -> Title + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            parameters,
            func: Box::new(func),
        }
    }
}

impl fmt::Debug for FnCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCallback")
            .field("name", &self.name)
            .field("parameters", &self.parameters)
            .finish_non_exhaustive()
    }
}

impl TitleCallback for FnCallback {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameters(&self) -> &[ParameterSpec] {
        &self.parameters
    }

    fn invoke(&self, arguments: Vec<Value>) -> Title {
        (self.func)(arguments)
    }
}

/// Maps a stored callback identifier to an invocable handle.
pub trait CallableResolver: Send + Sync {
    fn resolve(&self, identifier: &str) -> Result<Arc<dyn TitleCallback>, TitleError>;
}

/// Name → callback table.
#[derive(Debug, Clone, Default)]
pub struct CallbackRegistry {
    callbacks: Arc<DashMap<String, Arc<dyn TitleCallback>>>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register under the callback's own name, replacing any previous entry.
    pub fn register(&self, callback: impl TitleCallback + 'static) {
        self.register_arc(Arc::new(callback));
    }

    pub fn register_arc(&self, callback: Arc<dyn TitleCallback>) {
        let name = callback.name().to_string();
        if self.callbacks.insert(name.clone(), callback).is_some() {
            tracing::warn!(callback = %name, "Title callback replaced");
        } else {
            tracing::debug!(callback = %name, "Title callback registered");
        }
    }

    pub fn unregister(&self, identifier: &str) -> bool {
        self.callbacks.remove(identifier).is_some()
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.callbacks.contains_key(identifier)
    }

    /// Registered identifiers, sorted.
    pub fn identifiers(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.callbacks.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl CallableResolver for CallbackRegistry {
    fn resolve(&self, identifier: &str) -> Result<Arc<dyn TitleCallback>, TitleError> {
        self.callbacks
            .get(identifier)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| TitleError::CallableNotFound {
                identifier: identifier.to_string(),
            })
    }
}
