//! Translatable strings subsystem.
//!
//! # Data Flow
//! ```text
//! Static route title
//!     → translator.rs (wrap template + substitutions + context)
//!     → markup.rs (TranslatableMarkup, unevaluated)
//!     → ... carried through the request ...
//!     → markup.rs render (translate, then substitute placeholders)
//!     → Final HTML-safe text
//! ```
//!
//! # Design Decisions
//! - Markup is plain data; rendering takes the translator explicitly
//! - Wrapping never fails, rendering never fails
//! - Translation storage lives outside this crate (passthrough by default)

pub mod markup;
pub mod translator;

pub use markup::{escape_html, TranslatableMarkup, TranslationOptions};
pub use translator::{PassthroughTranslator, Translator};
