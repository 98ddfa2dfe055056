//! HTML serialization (innerHTML/outerHTML)
//!
//! Backs the `${html}` and `${innerHtml}` special attributes.

use crate::node::Node;
use crate::tree::NodeKind;
use crate::visit::{self, NodeVisitor};

/// Void elements (no end tag, children are never written)
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Raw text elements (no escaping for content)
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Serialize the children of a node
pub(crate) fn inner_html(node: Node<'_>) -> String {
    let mut serializer = HtmlSerializer::default();
    for child in node.child_nodes() {
        visit::walk(child, &mut serializer);
    }
    serializer.output
}

/// Serialize a node including itself
pub(crate) fn outer_html(node: Node<'_>) -> String {
    let mut serializer = HtmlSerializer::default();
    visit::walk(node, &mut serializer);
    serializer.output
}

#[derive(Debug, Default)]
struct HtmlSerializer {
    output: String,
    /// Depth of open raw text elements
    raw_depth: usize,
}

impl<'a> NodeVisitor<'a> for HtmlSerializer {
    fn begin_node(&mut self, node: Node<'a>) -> bool {
        match node.kind() {
            NodeKind::Document => true,
            NodeKind::Element => {
                let tag = node.name().unwrap_or_default();
                self.output.push('<');
                self.output.push_str(tag);

                for (name, value) in node.literal_attributes() {
                    self.output.push(' ');
                    self.output.push_str(name);
                    if !value.is_empty() {
                        self.output.push_str("=\"");
                        escape_attribute(value, &mut self.output);
                        self.output.push('"');
                    }
                }

                if VOID_ELEMENTS.contains(&tag) {
                    self.output.push_str(" />");
                    return false;
                }

                self.output.push('>');
                if RAW_TEXT_ELEMENTS.contains(&tag) {
                    self.raw_depth += 1;
                }
                true
            }
            NodeKind::Text => {
                let text = node.value().unwrap_or_default();
                if self.raw_depth > 0 {
                    self.output.push_str(text);
                } else {
                    escape_text(text, &mut self.output);
                }
                false
            }
            NodeKind::Comment => {
                self.output.push_str("<!--");
                self.output.push_str(node.value().unwrap_or_default());
                self.output.push_str("-->");
                false
            }
        }
    }

    fn end_node(&mut self, node: Node<'a>) {
        if node.kind() != NodeKind::Element {
            return;
        }
        let tag = node.name().unwrap_or_default();
        if VOID_ELEMENTS.contains(&tag) {
            return;
        }
        if RAW_TEXT_ELEMENTS.contains(&tag) {
            self.raw_depth = self.raw_depth.saturating_sub(1);
        }
        self.output.push_str("</");
        self.output.push_str(tag);
        self.output.push('>');
    }
}

/// Escape text content
fn escape_text(text: &str, output: &mut String) {
    for c in text.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            _ => output.push(c),
        }
    }
}

/// Escape an attribute value
fn escape_attribute(value: &str, output: &mut String) {
    for c in value.chars() {
        match c {
            '&' => output.push_str("&amp;"),
            '"' => output.push_str("&quot;"),
            _ => output.push(c),
        }
    }
}
