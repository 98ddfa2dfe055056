//! Query (predicate) model
//!
//! A [`Query`] is a stateless boolean test over one [`Node`]. Queries are
//! plain values: built once, evaluated any number of times, never mutated by
//! evaluation.
//!
//! Fluent chaining lives in [`crate::builder`]; this module holds the tagged
//! union, its evaluation, and the rules for combining two queries:
//!
//! - conjunction appends to the last disjunct of a top-level `Or`, so
//!   `a.or().by(..).by(..)` reads as `a ∨ (b ∧ c)`
//! - [`Query::or`] starts a new disjunct
//! - `Not`, `Group` and anything passed to `with` are opaque units
//! - `!q`, `a & b` and `a | b` build `Not`, `And` and a grouped `Or`

use std::ops::{BitAnd, BitOr, Not};

use crate::builder::Alternative;
use crate::node::Node;
use crate::pattern::ValueMatcher;

/// Which attributes a comparator looks at
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeNames {
    /// Any of these keys (literal or special)
    Named(Vec<String>),
    /// Every attribute the node reports, special keys included
    Any,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// Matches every node
    Everything,
    Not(Box<Query>),
    /// Parenthesized sub-query; evaluates like its operand
    Group(Box<Query>),
    /// All terms hold, tested left to right
    And(Vec<Query>),
    /// At least one term holds, tested left to right
    Or(Vec<Query>),
    /// Some selected attribute has a value the matcher accepts
    Attribute {
        names: AttributeNames,
        value: ValueMatcher,
    },
    /// Some of the named attributes is present
    HasAttribute(Vec<String>),
    NodeName(ValueMatcher),
    NodeValue(ValueMatcher),
}

impl Query {
    /// Evaluate the query against one node
    pub fn matches(&self, node: Node<'_>) -> bool {
        match self {
            Query::Everything => true,
            Query::Not(inner) => !inner.matches(node),
            Query::Group(inner) => inner.matches(node),
            Query::And(terms) => terms.iter().all(|term| term.matches(node)),
            Query::Or(terms) => terms.iter().any(|term| term.matches(node)),
            Query::Attribute { names, value } => match names {
                AttributeNames::Named(names) => names.iter().any(|name| {
                    node.attribute(name)
                        .is_some_and(|candidate| value.matches(&candidate))
                }),
                AttributeNames::Any => node.attribute_names().into_iter().any(|name| {
                    node.attribute(name)
                        .is_some_and(|candidate| value.matches(&candidate))
                }),
            },
            Query::HasAttribute(names) => names.iter().any(|name| node.has_attribute(name)),
            Query::NodeName(value) => node.name().is_some_and(|name| value.matches(name)),
            Query::NodeValue(value) => node.value().is_some_and(|text| value.matches(text)),
        }
    }

    /// Start a new disjunct: terms added to the result are OR-ed with `self`
    pub fn or(self) -> Alternative {
        Alternative::new(self)
    }

    /// Conjunction under the fluent precedence rules
    pub(crate) fn conjoin(self, term: Query) -> Query {
        match self {
            Query::Everything => term.into_unit(),
            Query::Or(mut disjuncts) => {
                let last = match disjuncts.pop() {
                    Some(last) => last.conjoin(term),
                    None => term.into_unit(),
                };
                disjuncts.push(last);
                Query::Or(disjuncts)
            }
            Query::And(mut terms) => {
                terms.push(term);
                Query::And(terms)
            }
            other => Query::And(vec![other, term]),
        }
    }

    /// Add a disjunct to `self`
    pub(crate) fn disjoin(self, term: Query) -> Query {
        match self {
            Query::Or(mut disjuncts) => {
                disjuncts.push(term.into_unit());
                Query::Or(disjuncts)
            }
            other => Query::Or(vec![other, term.into_unit()]),
        }
    }

    /// Wrap a bare `Or` so later conjunctions cannot reach into it
    fn into_unit(self) -> Query {
        match self {
            Query::Or(_) => Query::Group(Box::new(self)),
            other => other,
        }
    }
}

impl Not for Query {
    type Output = Query;

    fn not(self) -> Query {
        Query::Not(Box::new(self))
    }
}

impl BitAnd for Query {
    type Output = Query;

    fn bitand(self, rhs: Query) -> Query {
        match self {
            Query::And(mut terms) => {
                terms.push(rhs);
                Query::And(terms)
            }
            other => Query::And(vec![other, rhs]),
        }
    }
}

impl BitOr for Query {
    type Output = Query;

    /// The result is grouped: `(a | b).by(..)` conjoins with the whole
    /// disjunction
    fn bitor(self, rhs: Query) -> Query {
        let mut disjuncts = match self {
            Query::Group(inner) => match *inner {
                Query::Or(disjuncts) => disjuncts,
                other => vec![Query::Group(Box::new(other))],
            },
            other => vec![other],
        };
        disjuncts.push(rhs);
        Query::Group(Box::new(Query::Or(disjuncts)))
    }
}
