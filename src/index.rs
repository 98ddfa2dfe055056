//! Inverted indices for element lookup
//!
//! Built once when a document is finished, so tag-name and id lookups on the
//! document do not need a full traversal.

use lasso::{RodeoReader, Spur};
use rustc_hash::FxHashMap;

use crate::tree::{NodeId, NodeKind, NodeRecord};

/// Inverted index over the elements of one document
#[derive(Debug, Clone, Default)]
pub(crate) struct ElementIndex {
    /// Index by tag name
    by_tag: FxHashMap<Spur, Vec<NodeId>>,
    /// Index by `id` attribute value
    by_id: FxHashMap<String, Vec<NodeId>>,
}

impl ElementIndex {
    /// Build an index from a node arena
    ///
    /// Ids are pushed in arena order, which is document order.
    pub(crate) fn build(nodes: &[NodeRecord], names: &RodeoReader) -> Self {
        let mut index = Self::default();
        let id_sym = names.get("id");

        for (position, record) in nodes.iter().enumerate() {
            if record.kind != NodeKind::Element {
                continue;
            }
            let node_id = NodeId(position);

            if let Some(tag) = record.name {
                index.by_tag.entry(tag).or_default().push(node_id);
            }

            let id_value = id_sym.and_then(|sym| {
                record
                    .attributes
                    .iter()
                    .find(|(key, _)| *key == sym)
                    .map(|(_, value)| value)
            });
            if let Some(value) = id_value {
                index.by_id.entry(value.clone()).or_default().push(node_id);
            }
        }

        index
    }

    /// Elements with the given tag name
    pub(crate) fn by_tag(&self, tag: Spur) -> &[NodeId] {
        self.by_tag.get(&tag).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Elements with the given id
    pub(crate) fn by_id(&self, id: &str) -> &[NodeId] {
        self.by_id.get(id).map(|v| v.as_slice()).unwrap_or(&[])
    }
}
