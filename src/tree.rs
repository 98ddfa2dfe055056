//! Document tree storage
//!
//! Nodes live in a flat arena owned by [`Document`]. Children are ordered id
//! lists and the parent link is a plain index, so ownership runs strictly from
//! the root down. Documents are produced by a [`DocumentBuilder`], which is the
//! seam a markup parser drives, and are read-only once finished.

use lasso::{Rodeo, RodeoReader, Spur};
use thiserror::Error;

use crate::error::QueryError;
use crate::index::ElementIndex;
use crate::node::Node;
use crate::query::Query;
use crate::special::{self, SpecialAttribute};

/// Unique identifier for a node (index into the document arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The document node every tree starts with
    pub const ROOT: NodeId = NodeId(0);

    /// Position of the node in creation (document) order
    pub fn index(self) -> usize {
        self.0
    }
}

/// The kind of a node, fixed when the node is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Document,
    Element,
    Text,
    Comment,
}

/// Arena entry for one node
#[derive(Debug)]
pub(crate) struct NodeRecord {
    pub(crate) kind: NodeKind,
    /// Tag name (elements only)
    pub(crate) name: Option<Spur>,
    /// Character data (text and comments only)
    pub(crate) value: Option<String>,
    /// Literal attributes in source order
    pub(crate) attributes: Vec<(Spur, String)>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    /// Special attributes this node supports, chosen once by kind
    pub(crate) specials: &'static [SpecialAttribute],
}

/// A parsed document: the node arena plus its interned names
pub struct Document {
    nodes: Vec<NodeRecord>,
    names: RodeoReader,
    index: ElementIndex,
}

impl Document {
    /// Start building a new document
    pub fn builder() -> DocumentBuilder {
        DocumentBuilder::new()
    }

    /// The document node
    pub fn root(&self) -> Node<'_> {
        Node::new(self, NodeId::ROOT)
    }

    /// Get a node by ID
    pub fn node(&self, id: NodeId) -> Option<Node<'_>> {
        (id.0 < self.nodes.len()).then(|| Node::new(self, id))
    }

    /// Number of nodes, including the document node
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the document holds nothing but its document node
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// All elements with the given tag name, in document order
    pub fn elements_by_tag(&self, tag: &str) -> Vec<Node<'_>> {
        let Some(sym) = self.lookup(&tag.to_ascii_lowercase()) else {
            return Vec::new();
        };
        self.index
            .by_tag(sym)
            .iter()
            .map(|&id| Node::new(self, id))
            .collect()
    }

    /// The first element (in document order) whose `id` attribute equals `id`
    pub fn element_by_id(&self, id: &str) -> Option<Node<'_>> {
        self.index
            .by_id(id)
            .first()
            .map(|&node_id| Node::new(self, node_id))
    }

    /// First node matching `query`, searching from the document node
    pub fn get(&self, query: &Query) -> Option<Node<'_>> {
        self.root().get(query)
    }

    /// All nodes matching `query`, searching from the document node
    pub fn get_all(&self, query: &Query) -> Vec<Node<'_>> {
        self.root().get_all(query)
    }

    /// The only node matching `selector`, searching from the document node
    pub fn find(&self, selector: &str) -> Result<Option<Node<'_>>, QueryError> {
        self.root().find(selector)
    }

    /// All nodes matching `selector`, searching from the document node
    pub fn find_all(&self, selector: &str) -> Result<Vec<Node<'_>>, QueryError> {
        self.root().find_all(selector)
    }

    #[inline]
    pub(crate) fn record(&self, id: NodeId) -> &NodeRecord {
        &self.nodes[id.0]
    }

    #[inline]
    pub(crate) fn resolve(&self, sym: &Spur) -> &str {
        self.names.resolve(sym)
    }

    /// Look up an interned name without interning it
    #[inline]
    pub(crate) fn lookup(&self, name: &str) -> Option<Spur> {
        self.names.get(name)
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.nodes.len())
            .field("names", &self.names.len())
            .finish()
    }
}

/// Error during tree construction
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Tree error: no open element to close")]
    NoOpenElement,

    #[error("Tree error: {0} element(s) left open")]
    UnclosedElements(usize),
}

/// Builds a [`Document`] from a stream of start/end/character events
///
/// New nodes are always appended as the last child of the innermost open
/// element, so the finished tree is acyclic. Element and attribute names are
/// ASCII-lowercased; a repeated attribute keeps its first value.
pub struct DocumentBuilder {
    nodes: Vec<NodeRecord>,
    names: Rodeo,
    open: Vec<NodeId>,
}

impl DocumentBuilder {
    /// Create a builder holding just the document node
    pub fn new() -> Self {
        let mut builder = Self {
            nodes: Vec::new(),
            names: Rodeo::default(),
            open: Vec::new(),
        };
        let root = builder.push(NodeKind::Document, None, None, Vec::new());
        builder.open.push(root);
        builder
    }

    /// Open an element; following nodes become its children until
    /// [`end_element`](Self::end_element)
    pub fn start_element(&mut self, name: &str, attributes: &[(&str, &str)]) -> NodeId {
        let name = self.names.get_or_intern(name.to_ascii_lowercase());

        let mut attrs: Vec<(Spur, String)> = Vec::with_capacity(attributes.len());
        for (key, value) in attributes {
            let key = self.names.get_or_intern(key.to_ascii_lowercase());
            if !attrs.iter().any(|(existing, _)| *existing == key) {
                attrs.push((key, value.to_string()));
            }
        }

        let id = self.push(NodeKind::Element, Some(name), None, attrs);
        self.open.push(id);
        id
    }

    /// Add an element with no children
    pub fn empty_element(&mut self, name: &str, attributes: &[(&str, &str)]) -> NodeId {
        let id = self.start_element(name, attributes);
        self.open.pop();
        id
    }

    /// Close the innermost open element
    pub fn end_element(&mut self) -> Result<NodeId, BuildError> {
        if self.open.len() <= 1 {
            return Err(BuildError::NoOpenElement);
        }
        self.open.pop().ok_or(BuildError::NoOpenElement)
    }

    /// Add a text node
    pub fn text(&mut self, content: &str) -> NodeId {
        self.push(NodeKind::Text, None, Some(content.to_string()), Vec::new())
    }

    /// Add a comment node
    pub fn comment(&mut self, content: &str) -> NodeId {
        self.push(NodeKind::Comment, None, Some(content.to_string()), Vec::new())
    }

    /// Freeze the tree into a read-only [`Document`]
    pub fn finish(self) -> Result<Document, BuildError> {
        let unclosed = self.open.len().saturating_sub(1);
        if unclosed > 0 {
            return Err(BuildError::UnclosedElements(unclosed));
        }

        let names = self.names.into_reader();
        let index = ElementIndex::build(&self.nodes, &names);
        tracing::debug!("Finished document with {} nodes", self.nodes.len());

        Ok(Document {
            nodes: self.nodes,
            names,
            index,
        })
    }

    fn push(
        &mut self,
        kind: NodeKind,
        name: Option<Spur>,
        value: Option<String>,
        attributes: Vec<(Spur, String)>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        let parent = self.open.last().copied();

        self.nodes.push(NodeRecord {
            kind,
            name,
            value,
            attributes,
            parent,
            children: Vec::new(),
            specials: special::table_for(kind),
        });

        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(id);
        }
        id
    }
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}
