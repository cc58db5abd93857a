//! JSON response bodies.
//!
//! # Responsibilities
//! - Shape the title, route listing, and error payloads
//! - Map failures to HTTP status codes
//!
//! # Design Decisions
//! - Every payload carries the request ID for correlation
//! - Titles are rendered (HTML-safe) before they leave the server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Where a title came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleSource {
    /// `_title` template.
    Static,
    /// `_title_callback` result.
    Callback,
    /// Route has no title; site name used instead.
    SiteName,
}

impl TitleSource {
    pub fn as_str(self) -> &'static str {
        match self {
            TitleSource::Static => "static",
            TitleSource::Callback => "callback",
            TitleSource::SiteName => "site_name",
        }
    }
}

/// Resolved title for a path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleResponse {
    pub request_id: String,
    pub route: String,
    pub path: String,
    pub title: String,
    pub source: TitleSource,
}

/// One entry of the route listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub name: String,
    pub path: String,
    pub priority: u32,
    pub title_source: Option<TitleSource>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub request_id: String,
    pub error: String,
}

pub fn error_response(
    status: StatusCode,
    request_id: String,
    error: impl Into<String>,
) -> Response {
    (
        status,
        Json(ErrorResponse {
            request_id,
            error: error.into(),
        }),
    )
        .into_response()
}
