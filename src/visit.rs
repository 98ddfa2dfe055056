//! Visitor walk over a subtree
//!
//! Visits nodes in the same deep-first, left-to-right order the searcher
//! uses, with an explicit stack so depth is bounded only by memory.

use crate::node::Node;
use crate::tree::NodeKind;

/// Callbacks for [`Node::visit`]
pub trait NodeVisitor<'a> {
    /// Called when a node is entered. Return `false` to skip its children.
    fn begin_node(&mut self, node: Node<'a>) -> bool;

    /// Called once the node's children have been visited (or skipped)
    fn end_node(&mut self, _node: Node<'a>) {}
}

/// Walk the subtree rooted at `root`, calling `visitor` on each node
pub(crate) fn walk<'a, V>(root: Node<'a>, visitor: &mut V)
where
    V: NodeVisitor<'a> + ?Sized,
{
    // (node, leaving)
    let mut stack: Vec<(Node<'a>, bool)> = vec![(root, false)];
    let mut budget = root.document().len();

    while let Some((node, leaving)) = stack.pop() {
        if leaving {
            visitor.end_node(node);
            continue;
        }

        if budget == 0 {
            tracing::warn!("Visit of node {:?} exceeded the document size; stopping", root.id());
            return;
        }
        budget -= 1;

        let descend = visitor.begin_node(node);
        stack.push((node, true));
        if descend {
            stack.extend(node.child_nodes().rev().map(|child| (child, false)));
        }
    }
}

/// Renders an indented outline of a subtree, one node per line
#[derive(Debug, Default)]
pub(crate) struct TreeDumper {
    output: String,
    depth: usize,
}

impl TreeDumper {
    pub(crate) fn finish(self) -> String {
        self.output
    }
}

impl<'a> NodeVisitor<'a> for TreeDumper {
    fn begin_node(&mut self, node: Node<'a>) -> bool {
        for _ in 0..self.depth {
            self.output.push_str("  ");
        }

        match node.kind() {
            NodeKind::Document => self.output.push_str("#document"),
            NodeKind::Element => {
                self.output.push_str(node.name().unwrap_or_default());
                for (key, value) in node.literal_attributes() {
                    self.output.push_str(&format!(" {}={:?}", key, value));
                }
            }
            NodeKind::Text => {
                self.output
                    .push_str(&format!("{:?}", node.value().unwrap_or_default()));
            }
            NodeKind::Comment => {
                self.output.push_str("<!--");
                self.output.push_str(node.value().unwrap_or_default());
                self.output.push_str("-->");
            }
        }

        self.output.push('\n');
        self.depth += 1;
        true
    }

    fn end_node(&mut self, _node: Node<'a>) {
        self.depth -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Document, DocumentBuilder};

    fn create_test_document() -> Document {
        let mut builder = DocumentBuilder::new();
        builder.start_element("div", &[("id", "main")]);
        builder.start_element("p", &[]);
        builder.text("one");
        builder.end_element().unwrap();
        builder.comment("note");
        builder.start_element("p", &[]);
        builder.text("two");
        builder.end_element().unwrap();
        builder.end_element().unwrap();
        builder.finish().unwrap()
    }

    /// Records begin/end events as strings
    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
        skip: Option<&'static str>,
    }

    impl<'a> NodeVisitor<'a> for Recorder {
        fn begin_node(&mut self, node: Node<'a>) -> bool {
            let label = node.name().unwrap_or_default().to_string();
            let descend = self.skip != Some(label.as_str());
            self.events.push(format!("+{}", label));
            descend
        }

        fn end_node(&mut self, node: Node<'a>) {
            self.events.push(format!("-{}", node.name().unwrap_or_default()));
        }
    }

    #[test]
    fn test_visit_order() {
        let doc = create_test_document();
        let mut recorder = Recorder::default();
        doc.root().visit(&mut recorder);

        assert_eq!(
            recorder.events,
            vec![
                "+#document", "+div", "+p", "+#text", "-#text", "-p", "+#comment",
                "-#comment", "+p", "+#text", "-#text", "-p", "-div", "-#document",
            ]
        );
    }

    #[test]
    fn test_visit_matches_descendants_order() {
        let doc = create_test_document();
        let mut recorder = Recorder::default();
        doc.root().visit(&mut recorder);

        let entered: Vec<String> = recorder
            .events
            .iter()
            .filter_map(|e| e.strip_prefix('+').map(str::to_string))
            .collect();
        let walked: Vec<String> = doc
            .root()
            .descendants()
            .map(|n| n.name().unwrap_or_default().to_string())
            .collect();

        assert_eq!(entered, walked);
    }

    #[test]
    fn test_visit_skip_children() {
        let doc = create_test_document();
        let mut recorder = Recorder {
            skip: Some("p"),
            ..Default::default()
        };
        doc.root().visit(&mut recorder);

        assert!(!recorder.events.contains(&"+#text".to_string()));
        assert_eq!(recorder.events.iter().filter(|e| *e == "-p").count(), 2);
    }

    #[test]
    fn test_dump() {
        let doc = create_test_document();

        assert_eq!(
            doc.root().dump(),
            "#document\n  div id=\"main\"\n    p\n      \"one\"\n    <!--note-->\n    p\n      \"two\"\n"
        );
    }
}
