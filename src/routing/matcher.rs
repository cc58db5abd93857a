//! Path pattern matching.
//!
//! # Responsibilities
//! - Parse patterns such as `/node/{node}/revisions/{revision?}`
//! - Match a request path segment by segment
//! - Extract raw (unconverted) variables
//!
//! # Design Decisions
//! - Literal segments are case-sensitive
//! - `{name?}` may be omitted from the path and yields a variable with no value
//! - No regex
//! - Each request segment is percent-decoded before comparison; a segment that
//!   does not decode to UTF-8 never matches
//! - Variables are "raw" only in the sense of unconverted: decoded strings
//! - Malformed braces are treated as literals; validation reports them

use std::borrow::Cow;

use percent_encoding::percent_decode_str;

use crate::http::request::ParameterBag;

/// One `/`-separated piece of a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Variable { name: String, optional: bool },
}

/// A parsed route path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    source: String,
    segments: Vec<Segment>,
}

impl PathPattern {
    pub fn parse(source: impl Into<String>) -> Self {
        let source = source.into();
        let segments = split_path(&source).map(parse_segment).collect();
        Self { source, segments }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Names of all variables, in path order.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Variable { name, .. } => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Match `path`, returning the raw variables on success.
    pub fn match_path(&self, path: &str) -> Option<ParameterBag> {
        let mut parts = split_path(path);
        let mut variables = ParameterBag::new();

        for segment in &self.segments {
            let actual = match parts.next() {
                Some(raw) => Some(decode_segment(raw)?),
                None => None,
            };
            match (segment, actual) {
                (Segment::Literal(expected), Some(actual)) => {
                    if expected.as_str() != actual.as_ref() {
                        return None;
                    }
                }
                (Segment::Variable { name, .. }, Some(actual)) if !actual.is_empty() => {
                    variables.insert(name.clone(), Some(actual.into_owned()));
                }
                (Segment::Variable { name, optional: true }, Some(_) | None) => {
                    variables.insert(name.clone(), None);
                }
                _ => return None,
            }
        }

        if parts.next().is_some() {
            return None;
        }
        Some(variables)
    }
}

fn split_path(path: &str) -> impl Iterator<Item = &str> {
    let trimmed = path.trim_start_matches('/');
    // An empty remainder is the root path and has no segments.
    trimmed.split('/').filter(move |_| !trimmed.is_empty())
}

fn decode_segment(raw: &str) -> Option<Cow<'_, str>> {
    percent_decode_str(raw).decode_utf8().ok()
}

fn parse_segment(raw: &str) -> Segment {
    if let Some(inner) = raw.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
        let (name, optional) = match inner.strip_suffix('?') {
            Some(name) => (name, true),
            None => (inner, false),
        };
        if is_variable_name(name) {
            return Segment::Variable {
                name: name.to_string(),
                optional,
            };
        }
    }
    Segment::Literal(raw.to_string())
}

fn is_variable_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}
