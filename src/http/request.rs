//! Request model for title resolution.
//!
//! # Responsibilities
//! - Carry converted attributes and raw (unconverted) path variables
//! - Build the request from a matched route
//! - Generate the `x-request-id` value for every inbound HTTP request
//!
//! # Design Decisions
//! - Raw variables keep an explicit "no value" marker (`None`)
//! - Ordered maps so iteration is deterministic
//! - Request ID added as early as possible for tracing

use std::collections::BTreeMap;

use axum::http::{HeaderMap, HeaderName, HeaderValue, Request};
use serde_json::Value;
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::routing::Route;

/// Header carrying the correlation ID.
pub static X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Attribute holding the matched route's machine name.
pub const ROUTE_NAME_ATTRIBUTE: &str = "_route";

/// Raw path variables keyed by name. `None` marks a variable with no value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterBag(BTreeMap<String, Option<String>>);

impl ParameterBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Option<String>) {
        self.0.insert(name.into(), value);
    }

    /// Returns `Some(None)` for a variable that is present without a value.
    pub fn get(&self, name: &str) -> Option<Option<&str>> {
        self.0.get(name).map(Option::as_deref)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, Option<V>)> for ParameterBag
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, Option<V>)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.map(Into::into)))
                .collect(),
        )
    }
}

/// The slice of an HTTP request that title resolution consumes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TitleRequest {
    attributes: BTreeMap<String, Value>,
    raw_variables: ParameterBag,
}

impl TitleRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the request for a route matched with the given raw variables.
    ///
    /// Every variable is also exposed as an attribute; no conversion is
    /// applied, so a variable without a value becomes `null`.
    pub fn from_match(route: &Route, raw_variables: ParameterBag) -> Self {
        let mut attributes = BTreeMap::new();
        for (name, value) in raw_variables.iter() {
            let value = value.map_or(Value::Null, |v| Value::String(v.to_string()));
            attributes.insert(name.to_string(), value);
        }
        attributes.insert(
            ROUTE_NAME_ATTRIBUTE.to_string(),
            Value::String(route.name().to_string()),
        );
        Self {
            attributes,
            raw_variables,
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_raw_variables(mut self, raw_variables: ParameterBag) -> Self {
        self.raw_variables = raw_variables;
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn attributes(&self) -> &BTreeMap<String, Value> {
        &self.attributes
    }

    /// Path variables before any conversion.
    pub fn raw_variables(&self) -> &ParameterBag {
        &self.raw_variables
    }
}

/// Generates UUID v4 request IDs for `SetRequestIdLayer`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Read the request ID from headers, or `"unknown"`.
pub fn request_id(headers: &HeaderMap) -> String {
    headers
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}
