//! Title resolution errors.

use thiserror::Error;

/// Fatal conditions while computing a dynamic title.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TitleError {
    /// The `_title_callback` identifier maps to no known callable.
    #[error("title callback '{identifier}' not found")]
    CallableNotFound { identifier: String },

    /// A required parameter of the callback could not be satisfied from the request.
    #[error("title callback '{callable}' requires a value for '{parameter}'")]
    MissingArgument { callable: String, parameter: String },
}

impl TitleError {
    /// Stable label for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            TitleError::CallableNotFound { .. } => "callable_not_found",
            TitleError::MissingArgument { .. } => "missing_argument",
        }
    }
}
