//! Docquery: query and traversal engine for parsed documents
//!
//! Answers "which nodes satisfy this predicate" over a read-only document
//! tree, using either a fluent query builder or a CSS-subset selector string.
//!
//! ```
//! use docquery::{Document, QueryTerms, by_tag};
//!
//! let mut builder = Document::builder();
//! builder.start_element("input", &[("type", "text"), ("name", "q")]);
//! builder.end_element()?;
//! let doc = builder.finish()?;
//!
//! let query = by_tag("input")?.by("type", "text")?;
//! assert_eq!(doc.get(&query).unwrap().attribute("name").as_deref(), Some("q"));
//! assert_eq!(doc.find("input[type=text]")?, doc.get(&query));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Core modules
pub mod builder; // Query builder (entry points + fluent terms)
pub mod error;
pub mod forms; // Select control built on queries
mod index; // Inverted indices for document lookups
pub mod iterators; // Pre-order walk and match iterators
pub mod node; // Node handles and the node API
pub mod pattern; // Compiled patterns and value matchers
pub mod query; // Query AST and evaluation
pub mod searcher; // First/all/unique lookups
pub mod selector; // Selector string parser
mod serialize; // innerHTML/outerHTML
pub mod special; // Special (computed) attributes
pub mod tree; // Arena storage and the document builder
pub mod visit; // Visitor walk

// Re-exports for convenience
pub use builder::{
    Alternative, QueryTerms, by, by_any, by_class, by_href, by_html, by_id, by_inner_html,
    by_name, by_names, by_node_name, by_node_value, by_src, by_tag, by_text, by_title, by_type,
    by_value, everything, has, has_names, in_brackets, not,
};
pub use error::QueryError;
pub use forms::{Select, SelectOption};
pub use iterators::{Descendants, Matches};
pub use node::Node;
pub use pattern::{Pattern, ValueMatcher, regex};
pub use query::{AttributeNames, Query};
pub use searcher::SearchOptions;
pub use selector::parse_selector;
pub use tree::{BuildError, Document, DocumentBuilder, NodeId, NodeKind};
pub use visit::NodeVisitor;
