//! Select form control
//!
//! A consumer of the query engine: wraps a `<select>` node, collects its
//! `<option>` descendants once, and keeps selection state on the side. The
//! document itself is never modified.

use std::borrow::Cow;

use crate::builder::{QueryTerms, by_node_name, by_value};
use crate::node::Node;
use crate::query::Query;

/// One `<option>` of a [`Select`]
#[derive(Debug, Clone)]
pub struct SelectOption<'a> {
    node: Node<'a>,
    text: String,
    value: String,
    selected: bool,
}

impl<'a> SelectOption<'a> {
    fn new(node: Node<'a>) -> Self {
        let text = node.inner_html();
        let value = match node.attribute("value") {
            Some(value) => value.into_owned(),
            None => text.clone(),
        };
        Self {
            node,
            text,
            value,
            selected: node.has_attribute("selected"),
        }
    }

    pub fn node(&self) -> Node<'a> {
        self.node
    }

    /// Inner HTML of the option
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The `value` attribute, or the text when there is none
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }
}

/// A `<select>` element and its options
#[derive(Debug, Clone)]
pub struct Select<'a> {
    node: Node<'a>,
    multiple: bool,
    options: Vec<SelectOption<'a>>,
}

impl<'a> Select<'a> {
    pub fn new(node: Node<'a>) -> Self {
        // Element names are stored lowercased, so this only hits <option> elements
        let options = node
            .get_all(&by_node_name("option"))
            .into_iter()
            .map(SelectOption::new)
            .collect();

        Self {
            node,
            multiple: node.has_attribute("multiple"),
            options,
        }
    }

    pub fn node(&self) -> Node<'a> {
        self.node
    }

    /// The `name` attribute of the control
    pub fn name(&self) -> Option<Cow<'a, str>> {
        self.node.attribute("name")
    }

    pub fn is_multiple(&self) -> bool {
        self.multiple
    }

    /// The option whose value or inner HTML equals `value_or_text`
    pub fn option(&self, value_or_text: &str) -> Option<&SelectOption<'a>> {
        self.option_matching(&option_query(value_or_text))
    }

    /// The first option matching `query`
    pub fn option_matching(&self, query: &Query) -> Option<&SelectOption<'a>> {
        self.options.iter().find(|option| query.matches(option.node))
    }

    /// All options in document order
    pub fn options(&self) -> &[SelectOption<'a>] {
        &self.options
    }

    /// All options matching `query`, in document order
    pub fn options_matching(&self, query: &Query) -> Vec<&SelectOption<'a>> {
        self.options
            .iter()
            .filter(|option| query.matches(option.node))
            .collect()
    }

    /// Select the option whose value or inner HTML equals `value_or_text`
    ///
    /// Unless the control allows multiple selection, every other option is
    /// deselected. Returns `false` if no option matches.
    pub fn select(&mut self, value_or_text: &str) -> bool {
        let query = option_query(value_or_text);
        let Some(index) = self.options.iter().position(|o| query.matches(o.node)) else {
            return false;
        };

        if !self.multiple {
            for option in &mut self.options {
                option.selected = false;
            }
        }
        self.options[index].selected = true;
        true
    }

    /// Deselect the option whose value or inner HTML equals `value_or_text`
    pub fn unselect(&mut self, value_or_text: &str) -> bool {
        let query = option_query(value_or_text);
        match self.options.iter_mut().find(|o| query.matches(o.node)) {
            Some(option) => {
                option.selected = false;
                true
            }
            None => false,
        }
    }

    /// Values of the selected options, in document order
    pub fn selected_values(&self) -> Vec<&str> {
        self.options
            .iter()
            .filter(|option| option.selected)
            .map(|option| option.value.as_str())
            .collect()
    }
}

fn option_query(value_or_text: &str) -> Query {
    by_value(value_or_text).or().by_inner_html(value_or_text)
}
