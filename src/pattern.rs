//! Compiled patterns and value matchers
//!
//! A comparator in a query accepts either a literal string or a [`Pattern`].
//! Literals compare for equality; patterns must match the whole candidate.

use regex::Regex;
use std::fmt::Debug;

use crate::error::QueryError;

/// A compiled regular expression, matched against the full candidate string
#[derive(Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compile a pattern
    ///
    /// The expression is anchored at both ends, so `"de"` matches `"de"` but
    /// not `"deu"`.
    pub fn new(source: &str) -> Result<Self, QueryError> {
        let regex = Regex::new(&format!("^(?:{})$", source)).map_err(|e| {
            QueryError::InvalidPattern {
                pattern: source.to_string(),
                source: e,
            }
        })?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    /// The expression as written
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// True if the whole of `candidate` matches
    pub fn is_match(&self, candidate: &str) -> bool {
        self.regex.is_match(candidate)
    }
}

// Manual Debug implementation (show the source, not the compiled program)
impl Debug for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Pattern").field(&self.source).finish()
    }
}

// Manual PartialEq implementation (compare sources, not compiled regex)
impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

/// Compile a pattern (shorthand for [`Pattern::new`])
pub fn regex(source: &str) -> Result<Pattern, QueryError> {
    Pattern::new(source)
}

/// Right-hand side of a comparator: a literal string or a pattern
#[derive(Debug, Clone, PartialEq)]
pub enum ValueMatcher {
    Literal(String),
    Pattern(Pattern),
}

impl ValueMatcher {
    pub fn matches(&self, candidate: &str) -> bool {
        match self {
            ValueMatcher::Literal(literal) => literal == candidate,
            ValueMatcher::Pattern(pattern) => pattern.is_match(candidate),
        }
    }

    /// True for an empty literal
    pub(crate) fn is_empty_literal(&self) -> bool {
        matches!(self, ValueMatcher::Literal(literal) if literal.is_empty())
    }
}

impl From<&str> for ValueMatcher {
    fn from(value: &str) -> Self {
        ValueMatcher::Literal(value.to_string())
    }
}

impl From<String> for ValueMatcher {
    fn from(value: String) -> Self {
        ValueMatcher::Literal(value)
    }
}

impl From<&String> for ValueMatcher {
    fn from(value: &String) -> Self {
        ValueMatcher::Literal(value.clone())
    }
}

impl From<Pattern> for ValueMatcher {
    fn from(pattern: Pattern) -> Self {
        ValueMatcher::Pattern(pattern)
    }
}
