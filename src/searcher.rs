//! Query evaluation over a subtree
//!
//! The search pipeline:
//! 1. Parse a selector string into a Query (selector lookups only)
//! 2. Walk the subtree deep first, left to right
//! 3. Test the query on each visited node
//! 4. Stop at the first match, the second match, or the end of the walk,
//!    depending on the lookup

use crate::error::QueryError;
use crate::iterators::Matches;
use crate::node::Node;
use crate::query::Query;
use crate::selector::parse_selector;

/// Options for a search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Test the node the search starts from, not only its descendants
    pub include_root: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self { include_root: true }
    }
}

impl SearchOptions {
    pub fn include_root(mut self, include_root: bool) -> Self {
        self.include_root = include_root;
        self
    }
}

/// Lazily yield every match under `root`
pub fn search<'a, 'q>(root: Node<'a>, query: &'q Query, options: SearchOptions) -> Matches<'a, 'q> {
    Matches::new(root, query, options.include_root)
}

/// First match in search order; the walk stops there
pub fn first<'a>(root: Node<'a>, query: &Query, options: SearchOptions) -> Option<Node<'a>> {
    search(root, query, options).next()
}

/// Every match, in search order
pub fn all<'a>(root: Node<'a>, query: &Query, options: SearchOptions) -> Vec<Node<'a>> {
    let found: Vec<Node<'a>> = search(root, query, options).collect();
    tracing::trace!("Query matched {} node(s) under {:?}", found.len(), root.id());
    found
}

/// Result of a single-result lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unique<'a> {
    None,
    One(Node<'a>),
    /// The first two matches
    Many(Node<'a>, Node<'a>),
}

/// Scan until a second match confirms ambiguity or the walk ends
pub fn unique<'a>(root: Node<'a>, query: &Query, options: SearchOptions) -> Unique<'a> {
    let mut matches = search(root, query, options);
    match (matches.next(), matches.next()) {
        (None, _) => Unique::None,
        (Some(only), None) => Unique::One(only),
        (Some(first), Some(second)) => Unique::Many(first, second),
    }
}

/// The only node matching `selector`
pub fn find<'a>(
    root: Node<'a>,
    selector: &str,
    options: SearchOptions,
) -> Result<Option<Node<'a>>, QueryError> {
    let query = parse_selector(selector)?;
    match unique(root, &query, options) {
        Unique::None => Ok(None),
        Unique::One(node) => Ok(Some(node)),
        Unique::Many(first, second) => {
            tracing::debug!(
                "Selector {:?} matched {:?} and {:?}",
                selector,
                first.id(),
                second.id()
            );
            Err(QueryError::AmbiguousMatch {
                selector: selector.to_string(),
            })
        }
    }
}

/// Every node matching `selector`
pub fn find_all<'a>(
    root: Node<'a>,
    selector: &str,
    options: SearchOptions,
) -> Result<Vec<Node<'a>>, QueryError> {
    let query = parse_selector(selector)?;
    Ok(all(root, &query, options))
}
