//! Resolved page titles.

use crate::translation::{escape_html, TranslatableMarkup, Translator};

/// What title resolution produces for a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Title {
    /// Static `_title`, translated and formatted at render time.
    Translatable(TranslatableMarkup),
    /// Plain text from a callback; escaped on render.
    Text(String),
    /// Markup a callback has already made safe; emitted as is.
    Markup(String),
}

impl Title {
    /// Render to HTML-safe text.
    pub fn render(&self, translator: &dyn Translator) -> String {
        match self {
            Title::Translatable(markup) => markup.render(translator),
            Title::Text(text) => escape_html(text),
            Title::Markup(markup) => markup.clone(),
        }
    }

    pub fn as_translatable(&self) -> Option<&TranslatableMarkup> {
        match self {
            Title::Translatable(markup) => Some(markup),
            _ => None,
        }
    }
}

impl From<TranslatableMarkup> for Title {
    fn from(markup: TranslatableMarkup) -> Self {
        Title::Translatable(markup)
    }
}

impl From<String> for Title {
    fn from(text: String) -> Self {
        Title::Text(text)
    }
}

impl From<&str> for Title {
    fn from(text: &str) -> Self {
        Title::Text(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translation::PassthroughTranslator;

    #[test]
    fn test_text_is_escaped_markup_is_not() {
        assert_eq!(Title::from("a < b").render(&PassthroughTranslator), "a &lt; b");
        assert_eq!(
            Title::Markup("<em>a</em>".into()).render(&PassthroughTranslator),
            "<em>a</em>"
        );
    }
}
