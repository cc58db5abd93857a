//! Route title resolution library and HTTP service.

pub mod config;
pub mod controller;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod translation;

pub use config::schema::AppConfig;
pub use controller::{Title, TitleError, TitleResolver};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
