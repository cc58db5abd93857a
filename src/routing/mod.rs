//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path
//!     → router.rs (ordered route scan)
//!     → matcher.rs (segment match, extract raw variables)
//!     → Return: matched Route + ParameterBag, or NoMatch
//!
//! Route Compilation (at startup and on reload):
//!     RouteConfig[]
//!     → route.rs (defaults: _title, _title_context, _title_callback)
//!     → Bind title callbacks through the callable resolver
//!     → Sort by priority
//!     → Freeze as immutable RouteCollection
//! ```
//!
//! # Design Decisions
//! - Routes compiled up front, immutable at runtime
//! - Unknown title callbacks rejected at compile time, not per request
//! - Deterministic: same input always matches same route
//! - First match wins (ordered by priority, then declaration order)

pub mod matcher;
pub mod route;
pub mod router;

pub use matcher::{PathPattern, Segment};
pub use route::Route;
pub use router::{CompileError, RouteCollection};
