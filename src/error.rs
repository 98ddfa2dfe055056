//! Error types for query construction and lookup

use thiserror::Error;

/// Errors raised while building a query, parsing a selector, or resolving a
/// single-result lookup
///
/// Construction errors are raised when the query is built, never while it is
/// being evaluated. A missing attribute is not an error anywhere.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Selector syntax error in `{selector}` at position {position}: unexpected `{fragment}`")]
    SelectorSyntax {
        selector: String,
        position: usize,
        fragment: String,
    },

    #[error("Selector `{selector}` matched more than one node")]
    AmbiguousMatch { selector: String },
}

impl QueryError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        QueryError::InvalidQuery(message.into())
    }
}
