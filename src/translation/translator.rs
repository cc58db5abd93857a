//! Translation collaborator.
//!
//! # Responsibilities
//! - Wrap a source string with its substitutions into `TranslatableMarkup`
//! - Look up a translated source string at render time
//!
//! # Design Decisions
//! - Injected as `Arc<dyn Translator>`, never looked up globally
//! - `wrap` is a pure constructor and has a default implementation
//! - Missing translations fall back to the source string

use std::collections::BTreeMap;

use crate::translation::markup::{TranslatableMarkup, TranslationOptions};

/// Wraps and translates user-facing strings.
pub trait Translator: Send + Sync {
    /// Build a translatable string without evaluating it.
    fn wrap(
        &self,
        source: &str,
        arguments: BTreeMap<String, String>,
        context: Option<&str>,
    ) -> TranslatableMarkup {
        let options = TranslationOptions {
            context: context.map(str::to_string),
            langcode: None,
        };
        TranslatableMarkup::new(source, arguments, options)
    }

    /// Return the translation of `source`, if one exists.
    fn translate(&self, source: &str, options: &TranslationOptions) -> Option<String>;
}

/// Translator that never has a translation; sources render as written.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughTranslator;

impl Translator for PassthroughTranslator {
    fn translate(&self, _source: &str, _options: &TranslationOptions) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_attaches_context() {
        let markup = PassthroughTranslator.wrap("static title", BTreeMap::new(), Some("context"));
        assert_eq!(markup.source(), "static title");
        assert_eq!(markup.options().context.as_deref(), Some("context"));
        assert!(markup.arguments().is_empty());
    }

    #[test]
    fn test_passthrough_has_no_translations() {
        let options = TranslationOptions::default();
        assert!(PassthroughTranslator.translate("anything", &options).is_none());
    }
}
