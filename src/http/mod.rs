//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware: request ID, trace, timeout)
//!     → routing (match path, extract raw variables)
//!     → request.rs (TitleRequest from the match)
//!     → controller (TitleResolver)
//!     → response.rs (JSON payload)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{request_id, MakeRequestUuid, ParameterBag, TitleRequest, X_REQUEST_ID};
pub use response::{ErrorResponse, RouteSummary, TitleResponse, TitleSource};
pub use server::{AppState, HttpServer};
