//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Route names unique, paths well formed
//! - Validate value ranges (timeouts > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Callback identifiers are checked later, when routes are compiled
//!   against the registry

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::routing::{PathPattern, Segment};

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("routes[{index}] has an empty name")]
    EmptyRouteName { index: usize },

    #[error("route name '{name}' is declared more than once")]
    DuplicateRouteName { name: String },

    #[error("route '{name}': path '{path}' must start with '/'")]
    RelativePath { name: String, path: String },

    #[error("route '{name}': path '{path}' has a malformed variable segment")]
    MalformedVariable { name: String, path: String },

    #[error("route '{name}': optional variable '{variable}' must be the last segment")]
    OptionalNotLast { name: String, variable: String },

    #[error("route '{name}': variable '{variable}' appears more than once")]
    DuplicateVariable { name: String, variable: String },
}

/// Check the configuration, collecting every error.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    let mut names = HashSet::new();
    for (index, route) in config.routes.iter().enumerate() {
        if route.name.trim().is_empty() {
            errors.push(ValidationError::EmptyRouteName { index });
        } else if !names.insert(route.name.as_str()) {
            errors.push(ValidationError::DuplicateRouteName {
                name: route.name.clone(),
            });
        }

        if !route.path.starts_with('/') {
            errors.push(ValidationError::RelativePath {
                name: route.name.clone(),
                path: route.path.clone(),
            });
        }

        validate_pattern(&route.name, &route.path, &mut errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_pattern(name: &str, path: &str, errors: &mut Vec<ValidationError>) {
    let pattern = PathPattern::parse(path);
    let segments = pattern.segments();
    let mut seen = HashSet::new();

    for (i, segment) in segments.iter().enumerate() {
        match segment {
            Segment::Literal(literal) => {
                if literal.contains('{') || literal.contains('}') {
                    errors.push(ValidationError::MalformedVariable {
                        name: name.to_string(),
                        path: path.to_string(),
                    });
                }
            }
            Segment::Variable { name: variable, optional } => {
                if !seen.insert(variable.as_str()) {
                    errors.push(ValidationError::DuplicateVariable {
                        name: name.to_string(),
                        variable: variable.clone(),
                    });
                }
                if *optional && i + 1 != segments.len() {
                    errors.push(ValidationError::OptionalNotLast {
                        name: name.to_string(),
                        variable: variable.clone(),
                    });
                }
            }
        }
    }
}
