//! Deferred-rendering translatable strings.
//!
//! # Responsibilities
//! - Pair a source string with placeholder substitutions and options
//! - Render to HTML-safe text on demand
//!
//! # Placeholders
//! - `@name`: value is HTML-escaped
//! - `%name`: value is HTML-escaped and wrapped in `<em class="placeholder">`
//!
//! # Design Decisions
//! - Longest placeholder wins at each position (`@test2` before `@test`)
//! - Unknown tokens stay literal, unused arguments are ignored
//! - Single left-to-right pass: substituted values are never re-scanned

use std::collections::BTreeMap;

use crate::translation::translator::Translator;

/// Options that select which translation applies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationOptions {
    /// Disambiguation context for the source string.
    pub context: Option<String>,

    /// Target language; `None` means the current language.
    pub langcode: Option<String>,
}

/// A source string plus everything needed to translate and format it later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatableMarkup {
    string: String,
    arguments: BTreeMap<String, String>,
    options: TranslationOptions,
}

impl TranslatableMarkup {
    pub fn new(
        string: impl Into<String>,
        arguments: BTreeMap<String, String>,
        options: TranslationOptions,
    ) -> Self {
        Self {
            string: string.into(),
            arguments,
            options,
        }
    }

    /// The untranslated source string.
    pub fn source(&self) -> &str {
        &self.string
    }

    /// Placeholder token → substitution value.
    pub fn arguments(&self) -> &BTreeMap<String, String> {
        &self.arguments
    }

    pub fn options(&self) -> &TranslationOptions {
        &self.options
    }

    /// Translate the source and substitute placeholders.
    pub fn render(&self, translator: &dyn Translator) -> String {
        match translator.translate(&self.string, &self.options) {
            Some(translated) => format_placeholders(&translated, &self.arguments),
            None => format_placeholders(&self.string, &self.arguments),
        }
    }
}

/// Replace `@`/`%` placeholders in `template` with their formatted values.
fn format_placeholders(template: &str, arguments: &BTreeMap<String, String>) -> String {
    let mut keys: Vec<&str> = arguments
        .keys()
        .map(String::as_str)
        .filter(|k| k.len() > 1 && (k.starts_with('@') || k.starts_with('%')))
        .collect();
    if keys.is_empty() {
        return template.to_string();
    }
    keys.sort_by(|a, b| b.len().cmp(&a.len()));

    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(pos) = rest.find(['@', '%']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        match keys.iter().find(|k| tail.starts_with(**k)) {
            Some(key) => {
                push_argument(&mut out, key, &arguments[*key]);
                rest = &tail[key.len()..];
            }
            None => {
                // Prefix bytes are ASCII, so slicing one byte stays on a char boundary.
                out.push_str(&tail[..1]);
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn push_argument(out: &mut String, key: &str, value: &str) {
    if key.starts_with('%') {
        out.push_str("<em class=\"placeholder\">");
        out.push_str(&escape_html(value));
        out.push_str("</em>");
    } else {
        out.push_str(&escape_html(value));
    }
}

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}
