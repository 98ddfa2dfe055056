//! Special (computed) attributes
//!
//! Keys written as `${name}` are not stored on a node. Each node kind owns a
//! table mapping the keys it supports to a function that derives the value
//! from the node. The table is picked once, when the node is created, and is
//! consulted before the literal attribute map.
//!
//! | kind     | keys |
//! |----------|------|
//! | document | `${nodeName}` `${text}` `${innerHtml}` |
//! | element  | `${nodeName}` `${tagName}` `${text}` `${innerHtml}` `${html}` |
//! | text     | `${nodeName}` `${nodeValue}` `${text}` |
//! | comment  | `${nodeName}` `${nodeValue}` |
//!
//! A supported key always has a value.

use crate::node::Node;
use crate::serialize;
use crate::tree::NodeKind;

pub const NODE_NAME: &str = "${nodeName}";
pub const NODE_VALUE: &str = "${nodeValue}";
pub const TAG_NAME: &str = "${tagName}";
pub const TEXT: &str = "${text}";
pub const INNER_HTML: &str = "${innerHtml}";
pub const HTML: &str = "${html}";

/// A reserved attribute key and the function computing its value
pub struct SpecialAttribute {
    key: &'static str,
    compute: fn(Node<'_>) -> String,
}

impl SpecialAttribute {
    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn compute(&self, node: Node<'_>) -> String {
        (self.compute)(node)
    }
}

impl std::fmt::Debug for SpecialAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SpecialAttribute").field(&self.key).finish()
    }
}

static DOCUMENT_SPECIALS: [SpecialAttribute; 3] = [
    SpecialAttribute { key: NODE_NAME, compute: node_name },
    SpecialAttribute { key: TEXT, compute: text },
    SpecialAttribute { key: INNER_HTML, compute: inner_html },
];

static ELEMENT_SPECIALS: [SpecialAttribute; 5] = [
    SpecialAttribute { key: NODE_NAME, compute: node_name },
    SpecialAttribute { key: TAG_NAME, compute: node_name },
    SpecialAttribute { key: TEXT, compute: text },
    SpecialAttribute { key: INNER_HTML, compute: inner_html },
    SpecialAttribute { key: HTML, compute: html },
];

static TEXT_SPECIALS: [SpecialAttribute; 3] = [
    SpecialAttribute { key: NODE_NAME, compute: node_name },
    SpecialAttribute { key: NODE_VALUE, compute: node_value },
    SpecialAttribute { key: TEXT, compute: text },
];

static COMMENT_SPECIALS: [SpecialAttribute; 2] = [
    SpecialAttribute { key: NODE_NAME, compute: node_name },
    SpecialAttribute { key: NODE_VALUE, compute: node_value },
];

/// The special attributes supported by a node kind
pub(crate) fn table_for(kind: NodeKind) -> &'static [SpecialAttribute] {
    match kind {
        NodeKind::Document => &DOCUMENT_SPECIALS,
        NodeKind::Element => &ELEMENT_SPECIALS,
        NodeKind::Text => &TEXT_SPECIALS,
        NodeKind::Comment => &COMMENT_SPECIALS,
    }
}

/// Find the entry for `key` in a table
#[inline]
pub(crate) fn lookup<'t>(table: &'t [SpecialAttribute], key: &str) -> Option<&'t SpecialAttribute> {
    if !is_special_key(key) {
        return None;
    }
    table.iter().find(|special| special.key == key)
}

/// True if `key` uses the reserved `${...}` notation
pub fn is_special_key(key: &str) -> bool {
    key.len() > 3 && key.starts_with("${") && key.ends_with('}')
}

/// Text content of a node with whitespace runs collapsed
pub(crate) fn collect_text(node: Node<'_>) -> String {
    let mut raw = String::new();
    for descendant in node.descendants() {
        if descendant.kind() == NodeKind::Text {
            raw.push_str(descendant.value().unwrap_or_default());
        }
    }
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn node_name(node: Node<'_>) -> String {
    node.name().unwrap_or_default().to_string()
}

fn node_value(node: Node<'_>) -> String {
    node.value().unwrap_or_default().to_string()
}

fn text(node: Node<'_>) -> String {
    collect_text(node)
}

fn inner_html(node: Node<'_>) -> String {
    serialize::inner_html(node)
}

fn html(node: Node<'_>) -> String {
    serialize::outer_html(node)
}
