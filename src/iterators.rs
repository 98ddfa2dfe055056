//! Iterators over nodes and matches
//!
//! Provides lazy interfaces for:
//! - Walking a subtree in search order (deep first, left to right)
//! - Filtering that walk down to the nodes a query accepts
//!
//! Both use an explicit stack, so tree depth never touches the call stack.

use std::iter::FusedIterator;

use crate::node::Node;
use crate::query::Query;

/// Pre-order walk of a subtree, starting with its root
///
/// The walk visits at most as many nodes as the document holds. A walk that
/// would go further (only possible if the arena were corrupted into a cycle)
/// logs a warning and ends.
#[derive(Debug, Clone)]
pub struct Descendants<'a> {
    stack: Vec<Node<'a>>,
    budget: usize,
}

impl<'a> Descendants<'a> {
    pub(crate) fn new(root: Node<'a>) -> Self {
        Self {
            stack: vec![root],
            budget: root.document().len(),
        }
    }
}

impl<'a> Iterator for Descendants<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Node<'a>> {
        let node = self.stack.pop()?;

        if self.budget == 0 {
            tracing::warn!(
                "Traversal reached node {:?} after visiting every node of the document; stopping",
                node.id()
            );
            self.stack.clear();
            return None;
        }
        self.budget -= 1;

        // Reversed so the leftmost child is popped first
        self.stack.extend(node.child_nodes().rev());
        Some(node)
    }
}

impl FusedIterator for Descendants<'_> {}

/// Nodes of a walk that satisfy a query, in search order
#[derive(Debug, Clone)]
pub struct Matches<'a, 'q> {
    nodes: Descendants<'a>,
    query: &'q Query,
}

impl<'a, 'q> Matches<'a, 'q> {
    /// Match against the subtree rooted at `root`, optionally leaving the
    /// root itself out
    pub(crate) fn new(root: Node<'a>, query: &'q Query, include_root: bool) -> Self {
        let mut nodes = Descendants::new(root);
        if !include_root {
            nodes.next();
        }
        Self { nodes, query }
    }
}

impl<'a> Iterator for Matches<'a, '_> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Node<'a>> {
        let query = self.query;
        self.nodes.find(|node| query.matches(*node))
    }
}

impl FusedIterator for Matches<'_, '_> {}
