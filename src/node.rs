//! Node handles
//!
//! [`Node`] is a copyable view of one arena entry. It carries the whole
//! read-only node API: names and values, attributes (literal and special),
//! children and parent, and the query entry points that search the subtree
//! rooted at the node.

use std::borrow::Cow;

use rustc_hash::FxHashSet;

use crate::error::QueryError;
use crate::iterators::Descendants;
use crate::query::Query;
use crate::searcher::{self, SearchOptions};
use crate::serialize;
use crate::special;
use crate::tree::{Document, NodeId, NodeKind, NodeRecord};
use crate::visit::{self, NodeVisitor, TreeDumper};

/// A node in a [`Document`]
#[derive(Clone, Copy)]
pub struct Node<'a> {
    doc: &'a Document,
    id: NodeId,
}

impl<'a> Node<'a> {
    pub(crate) fn new(doc: &'a Document, id: NodeId) -> Self {
        Self { doc, id }
    }

    #[inline]
    fn record(&self) -> &'a NodeRecord {
        self.doc.record(self.id)
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.record().kind
    }

    /// The document this node belongs to
    pub fn document(&self) -> &'a Document {
        self.doc
    }

    /// Node name: the tag name for elements, `#text`, `#comment` or
    /// `#document` otherwise
    pub fn name(&self) -> Option<&'a str> {
        let record = self.record();
        match record.kind {
            NodeKind::Document => Some("#document"),
            NodeKind::Element => record.name.as_ref().map(|sym| self.doc.resolve(sym)),
            NodeKind::Text => Some("#text"),
            NodeKind::Comment => Some("#comment"),
        }
    }

    /// Character data of text and comment nodes
    pub fn value(&self) -> Option<&'a str> {
        self.record().value.as_deref()
    }

    /// Parent node, or `None` for the document node
    pub fn parent(&self) -> Option<Node<'a>> {
        self.record().parent.map(|id| Node::new(self.doc, id))
    }

    /// Children in document order
    ///
    /// The returned vector is a fresh copy; it never aliases the tree.
    pub fn children(&self) -> Vec<Node<'a>> {
        self.child_nodes().collect()
    }

    /// Children whose node name is one of `names` (ASCII case-insensitive),
    /// in document order
    ///
    /// An empty `names` applies no filter and returns every child.
    pub fn children_named(&self, names: &[&str]) -> Vec<Node<'a>> {
        if names.is_empty() {
            return self.children();
        }
        self.child_nodes()
            .filter(|child| {
                child
                    .name()
                    .is_some_and(|name| names.iter().any(|n| n.eq_ignore_ascii_case(name)))
            })
            .collect()
    }

    pub(crate) fn child_nodes(self) -> impl DoubleEndedIterator<Item = Node<'a>> {
        let doc = self.doc;
        self.record()
            .children
            .iter()
            .map(move |&id| Node::new(doc, id))
    }

    /// Literal (stored) attributes in source order
    pub fn literal_attributes(self) -> impl Iterator<Item = (&'a str, &'a str)> {
        let doc = self.doc;
        self.record()
            .attributes
            .iter()
            .map(move |(key, value)| (doc.resolve(key), value.as_str()))
    }

    /// True if the attribute is stored, or if `key` is a special attribute
    /// this kind of node supports
    pub fn has_attribute(&self, key: &str) -> bool {
        special::lookup(self.record().specials, key).is_some() || self.literal(key).is_some()
    }

    /// Value of an attribute
    ///
    /// A supported special key (`${text}`, `${html}`, ...) resolves to its
    /// computed value, even when a literal attribute of the same name exists.
    /// Other keys are looked up ASCII case-insensitively among the literal
    /// attributes.
    pub fn attribute(&self, key: &str) -> Option<Cow<'a, str>> {
        if let Some(special) = special::lookup(self.record().specials, key) {
            return Some(Cow::Owned(special.compute(*self)));
        }
        self.literal(key).map(Cow::Borrowed)
    }

    /// All attribute names: literal names in source order, then the supported
    /// special keys, without duplicates
    pub fn attribute_names(&self) -> Vec<&'a str> {
        let mut seen: FxHashSet<&'a str> = FxHashSet::default();
        let mut names = Vec::new();

        let literals = self.literal_attributes().map(|(key, _)| key);
        let specials = self.record().specials.iter().map(|special| special.key());
        for name in literals.chain(specials) {
            if seen.insert(name) {
                names.push(name);
            }
        }
        names
    }

    fn literal(&self, key: &str) -> Option<&'a str> {
        let record = self.record();
        if record.attributes.is_empty() {
            return None;
        }

        let sym = match self.doc.lookup(key) {
            Some(sym) => sym,
            None if key.bytes().any(|b| b.is_ascii_uppercase()) => {
                self.doc.lookup(&key.to_ascii_lowercase())?
            }
            None => return None,
        };

        record
            .attributes
            .iter()
            .find(|(name, _)| *name == sym)
            .map(|(_, value)| value.as_str())
    }

    /// Text content with whitespace runs collapsed
    pub fn text(&self) -> String {
        special::collect_text(*self)
    }

    /// HTML serialization of the children
    pub fn inner_html(&self) -> String {
        serialize::inner_html(*self)
    }

    /// HTML serialization of the node itself
    pub fn outer_html(&self) -> String {
        serialize::outer_html(*self)
    }

    /// Returns the first node matching the query, by a deep first left right
    /// search starting with this node
    pub fn get(&self, query: &Query) -> Option<Node<'a>> {
        searcher::first(*self, query, SearchOptions::default())
    }

    pub fn get_with(&self, query: &Query, options: SearchOptions) -> Option<Node<'a>> {
        searcher::first(*self, query, options)
    }

    /// Returns all nodes matching the query, in deep first left right order
    pub fn get_all(&self, query: &Query) -> Vec<Node<'a>> {
        searcher::all(*self, query, SearchOptions::default())
    }

    pub fn get_all_with(&self, query: &Query, options: SearchOptions) -> Vec<Node<'a>> {
        searcher::all(*self, query, options)
    }

    /// Returns the only node matching the selector
    ///
    /// `Ok(None)` if nothing matches; [`QueryError::AmbiguousMatch`] if more
    /// than one node does.
    pub fn find(&self, selector: &str) -> Result<Option<Node<'a>>, QueryError> {
        searcher::find(*self, selector, SearchOptions::default())
    }

    pub fn find_with(
        &self,
        selector: &str,
        options: SearchOptions,
    ) -> Result<Option<Node<'a>>, QueryError> {
        searcher::find(*self, selector, options)
    }

    /// Returns every node matching the selector (possibly none)
    pub fn find_all(&self, selector: &str) -> Result<Vec<Node<'a>>, QueryError> {
        searcher::find_all(*self, selector, SearchOptions::default())
    }

    pub fn find_all_with(
        &self,
        selector: &str,
        options: SearchOptions,
    ) -> Result<Vec<Node<'a>>, QueryError> {
        searcher::find_all(*self, selector, options)
    }

    /// Walk this subtree in search order, calling the visitor on each node
    pub fn visit<V>(&self, visitor: &mut V)
    where
        V: NodeVisitor<'a> + ?Sized,
    {
        visit::walk(*self, visitor);
    }

    /// This node followed by all its descendants, in search order
    pub fn descendants(self) -> Descendants<'a> {
        Descendants::new(self)
    }

    /// Indented outline of the subtree, one node per line
    pub fn dump(&self) -> String {
        let mut dumper = TreeDumper::default();
        visit::walk(*self, &mut dumper);
        dumper.finish()
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.id == other.id
    }
}

impl Eq for Node<'_> {}

impl std::fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id.index())
            .field("name", &self.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::DocumentBuilder;

    /// <div id="box" Data-Role="panel"><h1>Title</h1><p>a</p><p>b</p>tail</div>
    fn create_test_document() -> Document {
        let mut builder = DocumentBuilder::new();
        builder.start_element("div", &[("id", "box"), ("Data-Role", "panel")]);
        builder.start_element("h1", &[]);
        builder.text("Title");
        builder.end_element().unwrap();
        builder.start_element("p", &[]);
        builder.text("a");
        builder.end_element().unwrap();
        builder.start_element("p", &[]);
        builder.text("b");
        builder.end_element().unwrap();
        builder.text("tail");
        builder.end_element().unwrap();
        builder.finish().unwrap()
    }

    #[test]
    fn test_names_and_values() {
        let doc = create_test_document();
        let div = doc.root().children()[0];
        let tail = div.children()[3];

        assert_eq!(doc.root().name(), Some("#document"));
        assert_eq!(div.name(), Some("div"));
        assert_eq!(div.value(), None);
        assert_eq!(tail.name(), Some("#text"));
        assert_eq!(tail.value(), Some("tail"));
    }

    #[test]
    fn test_children_are_independent() {
        let doc = create_test_document();
        let div = doc.root().children()[0];

        let mut children = div.children();
        children.clear();
        assert_eq!(div.children().len(), 4);
    }

    #[test]
    fn test_children_named() {
        let doc = create_test_document();
        let div = doc.root().children()[0];

        let ps = div.children_named(&["p"]);
        assert_eq!(ps.len(), 2);
        assert_eq!(ps[0].text(), "a");
        assert_eq!(ps[1].text(), "b");

        let mixed = div.children_named(&["P", "h1"]);
        let names: Vec<_> = mixed.iter().map(|n| n.name().unwrap()).collect();
        assert_eq!(names, vec!["h1", "p", "p"]);

        assert!(div.children_named(&["span"]).is_empty());
        assert_eq!(div.children_named(&["#text"]).len(), 1);
    }

    #[test]
    fn test_children_named_without_names() {
        let doc = create_test_document();
        let div = doc.root().children()[0];

        assert_eq!(div.children_named(&[]), div.children());
        assert_eq!(div.children_named(&[]).len(), 4);
        assert!(div.children()[0].children()[0].children_named(&[]).is_empty());
    }

    #[test]
    fn test_attribute_lookup() {
        let doc = create_test_document();
        let div = doc.root().children()[0];

        assert_eq!(div.attribute("id").as_deref(), Some("box"));
        assert_eq!(div.attribute("data-role").as_deref(), Some("panel"));
        assert_eq!(div.attribute("DATA-ROLE").as_deref(), Some("panel"));
        assert_eq!(div.attribute("missing"), None);
        assert!(!div.has_attribute("missing"));
        assert!(!doc.root().has_attribute("id"));
    }

    #[test]
    fn test_attribute_names() {
        let doc = create_test_document();
        let div = doc.root().children()[0];

        assert_eq!(
            div.attribute_names(),
            vec![
                "id",
                "data-role",
                "${nodeName}",
                "${tagName}",
                "${text}",
                "${innerHtml}",
                "${html}",
            ]
        );

        for name in div.attribute_names() {
            assert!(div.has_attribute(name));
            assert!(div.attribute(name).is_some());
        }
    }

    #[test]
    fn test_special_takes_precedence_over_literal() {
        let mut builder = DocumentBuilder::new();
        builder.start_element("span", &[("${text}", "literal"), ("${custom}", "kept")]);
        builder.text("computed");
        builder.end_element().unwrap();
        let doc = builder.finish().unwrap();
        let span = doc.root().children()[0];

        assert_eq!(span.attribute("${text}").as_deref(), Some("computed"));
        // Not a supported special: falls through to the literal map
        assert_eq!(span.attribute("${custom}").as_deref(), Some("kept"));

        let names = span.attribute_names();
        assert_eq!(names.iter().filter(|n| **n == "${text}").count(), 1);
    }

    #[test]
    fn test_text_and_html() {
        let doc = create_test_document();
        let div = doc.root().children()[0];

        assert_eq!(div.text(), "Titleabtail");
        assert_eq!(div.children()[1].outer_html(), "<p>a</p>");
        assert_eq!(div.children()[0].inner_html(), "Title");
    }

    #[test]
    fn test_node_equality() {
        let doc = create_test_document();
        let other = create_test_document();

        assert_eq!(doc.root(), doc.root());
        assert_ne!(doc.root(), other.root());
        assert_ne!(doc.root(), doc.root().children()[0]);
    }
}
