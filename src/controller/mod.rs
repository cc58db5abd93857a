//! Controller-side title resolution.
//!
//! # Data Flow
//! ```text
//! (TitleRequest, Route)
//!     → title_resolver.rs
//!         _title_callback? → callable.rs (registry lookup or pre-bound handle)
//!                          → argument.rs (declared parameters ← request)
//!                          → invoke → Title (verbatim)
//!         _title?          → raw variables → @name / %name substitutions
//!                          → Translator::wrap → Title::Translatable
//!         neither          → None
//! ```
//!
//! # Design Decisions
//! - All three collaborators injected through the constructor
//! - Callback failures propagate; no fallback to the static title
//! - Static titles never fail

pub mod argument;
pub mod builtin;
pub mod callable;
pub mod error;
pub mod title;
pub mod title_resolver;

pub use argument::{ArgumentResolver, RequestArgumentResolver};
pub use callable::{CallableResolver, CallbackRegistry, FnCallback, ParameterSpec, TitleCallback};
pub use error::TitleError;
pub use title::Title;
pub use title_resolver::TitleResolver;
