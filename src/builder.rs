//! Query builder
//!
//! Two levels: free functions start a query (`by_tag("input")`), and the
//! [`QueryTerms`] methods continue it (`.by("type", "text")`,
//! `.or().by_inner_html(x)`). Arguments are validated here, when the query is
//! built, so evaluation never fails.
//!
//! ```
//! use docquery::builder::{QueryTerms, by_tag, by_value};
//!
//! let text_inputs = by_tag("input")?.by("type", "text")?;
//! let option = by_value("de").or().by_inner_html("de");
//! # Ok::<(), docquery::QueryError>(())
//! ```

use crate::error::QueryError;
use crate::pattern::{Pattern, ValueMatcher};
use crate::query::{AttributeNames, Query};
use crate::special;

/// Fluent continuation of a query
///
/// Implementors only decide how a new term is attached (`with`); every other
/// method builds the term and hands it over.
pub trait QueryTerms: Sized {
    /// Attach a complete query as one term
    fn with(self, term: Query) -> Query;

    fn by(self, name: &str, value: impl Into<ValueMatcher>) -> Result<Query, QueryError> {
        Ok(self.with(by(name, value)?))
    }

    fn by_names(self, names: &[&str], value: impl Into<ValueMatcher>) -> Result<Query, QueryError> {
        Ok(self.with(by_names(names, value)?))
    }

    fn by_any(self, value: impl Into<ValueMatcher>) -> Query {
        self.with(by_any(value))
    }

    fn by_node_name(self, value: impl Into<ValueMatcher>) -> Query {
        self.with(by_node_name(value))
    }

    fn by_node_value(self, value: impl Into<ValueMatcher>) -> Query {
        self.with(by_node_value(value))
    }

    fn has(self, name: &str) -> Result<Query, QueryError> {
        Ok(self.with(has(name)?))
    }

    fn not(self, query: Query) -> Query {
        self.with(not(query))
    }

    fn in_brackets(self, query: Query) -> Query {
        self.with(in_brackets(query))
    }

    fn by_tag(self, tag: impl Into<ValueMatcher>) -> Result<Query, QueryError> {
        Ok(self.with(by_tag(tag)?))
    }

    fn by_id(self, id: impl Into<ValueMatcher>) -> Result<Query, QueryError> {
        Ok(self.with(by_id(id)?))
    }

    fn by_class(self, class: impl Into<ValueMatcher>) -> Result<Query, QueryError> {
        Ok(self.with(by_class(class)?))
    }

    fn by_name(self, value: impl Into<ValueMatcher>) -> Query {
        self.with(by_name(value))
    }

    fn by_value(self, value: impl Into<ValueMatcher>) -> Query {
        self.with(by_value(value))
    }

    fn by_title(self, value: impl Into<ValueMatcher>) -> Query {
        self.with(by_title(value))
    }

    fn by_type(self, value: impl Into<ValueMatcher>) -> Query {
        self.with(by_type(value))
    }

    fn by_href(self, value: impl Into<ValueMatcher>) -> Query {
        self.with(by_href(value))
    }

    fn by_src(self, value: impl Into<ValueMatcher>) -> Query {
        self.with(by_src(value))
    }

    fn by_text(self, value: impl Into<ValueMatcher>) -> Query {
        self.with(by_text(value))
    }

    fn by_inner_html(self, value: impl Into<ValueMatcher>) -> Query {
        self.with(by_inner_html(value))
    }

    fn by_html(self, value: impl Into<ValueMatcher>) -> Query {
        self.with(by_html(value))
    }
}

/// Chained terms are AND-ed (into the last disjunct of a top-level `Or`)
impl QueryTerms for Query {
    fn with(self, term: Query) -> Query {
        self.conjoin(term)
    }
}

/// Returned by [`Query::or`]; the next term becomes a new disjunct
#[derive(Debug, Clone)]
pub struct Alternative {
    base: Query,
}

impl Alternative {
    pub(crate) fn new(base: Query) -> Self {
        Self { base }
    }
}

impl QueryTerms for Alternative {
    fn with(self, term: Query) -> Query {
        self.base.disjoin(term)
    }
}

// Level 1 entry points

pub fn everything() -> Query {
    Query::Everything
}

pub fn not(query: Query) -> Query {
    Query::Not(Box::new(query))
}

/// Parenthesize a query so it is combined as one unit
pub fn in_brackets(query: Query) -> Query {
    Query::Group(Box::new(query))
}

/// Attribute `name` equals (or matches) `value`
///
/// `name` may be a special key such as `${text}`.
pub fn by(name: &str, value: impl Into<ValueMatcher>) -> Result<Query, QueryError> {
    if name.is_empty() {
        return Err(QueryError::invalid("attribute name must not be empty"));
    }
    Ok(Query::Attribute {
        names: AttributeNames::Named(vec![name.to_string()]),
        value: value.into(),
    })
}

/// Any of the attributes in `names` equals (or matches) `value`
pub fn by_names(names: &[&str], value: impl Into<ValueMatcher>) -> Result<Query, QueryError> {
    Ok(Query::Attribute {
        names: AttributeNames::Named(validate_names(names)?),
        value: value.into(),
    })
}

/// Any attribute of the node, special keys included, equals (or matches)
/// `value`
pub fn by_any(value: impl Into<ValueMatcher>) -> Query {
    Query::Attribute {
        names: AttributeNames::Any,
        value: value.into(),
    }
}

pub fn by_node_name(value: impl Into<ValueMatcher>) -> Query {
    Query::NodeName(value.into())
}

pub fn by_node_value(value: impl Into<ValueMatcher>) -> Query {
    Query::NodeValue(value.into())
}

/// Attribute `name` is present
pub fn has(name: &str) -> Result<Query, QueryError> {
    has_names(&[name])
}

/// Any attribute in `names` is present
pub fn has_names(names: &[&str]) -> Result<Query, QueryError> {
    Ok(Query::HasAttribute(validate_names(names)?))
}

fn validate_names(names: &[&str]) -> Result<Vec<String>, QueryError> {
    if names.is_empty() {
        return Err(QueryError::invalid("attribute name list must not be empty"));
    }
    if names.iter().any(|name| name.is_empty()) {
        return Err(QueryError::invalid("attribute name must not be empty"));
    }
    Ok(names.iter().map(|name| name.to_string()).collect())
}

// HTML helpers

/// Elements with the given tag name; literal names are compared lowercased
pub fn by_tag(tag: impl Into<ValueMatcher>) -> Result<Query, QueryError> {
    let tag = match non_empty(tag.into(), "tag name")? {
        ValueMatcher::Literal(name) => ValueMatcher::Literal(name.to_ascii_lowercase()),
        pattern => pattern,
    };
    by(special::TAG_NAME, tag)
}

pub fn by_id(id: impl Into<ValueMatcher>) -> Result<Query, QueryError> {
    by("id", non_empty(id.into(), "id")?)
}

/// Elements whose whitespace-separated `class` list contains `class`
pub fn by_class(class: impl Into<ValueMatcher>) -> Result<Query, QueryError> {
    let token = match non_empty(class.into(), "class name")? {
        ValueMatcher::Literal(name) => {
            if name.chars().any(char::is_whitespace) {
                return Err(QueryError::invalid(format!(
                    "class name `{}` must not contain whitespace",
                    name
                )));
            }
            regex::escape(&name)
        }
        ValueMatcher::Pattern(pattern) => pattern.as_str().to_string(),
    };
    let list = Pattern::new(&format!(r"(?s)(?:.*\s)?(?:{})(?:\s.*)?", token))?;
    by("class", list)
}

pub fn by_name(value: impl Into<ValueMatcher>) -> Query {
    attribute("name", value)
}

pub fn by_value(value: impl Into<ValueMatcher>) -> Query {
    attribute("value", value)
}

pub fn by_title(value: impl Into<ValueMatcher>) -> Query {
    attribute("title", value)
}

pub fn by_type(value: impl Into<ValueMatcher>) -> Query {
    attribute("type", value)
}

pub fn by_href(value: impl Into<ValueMatcher>) -> Query {
    attribute("href", value)
}

pub fn by_src(value: impl Into<ValueMatcher>) -> Query {
    attribute("src", value)
}

/// Text content, whitespace collapsed (`${text}`)
pub fn by_text(value: impl Into<ValueMatcher>) -> Query {
    attribute(special::TEXT, value)
}

pub fn by_inner_html(value: impl Into<ValueMatcher>) -> Query {
    attribute(special::INNER_HTML, value)
}

pub fn by_html(value: impl Into<ValueMatcher>) -> Query {
    attribute(special::HTML, value)
}

/// Comparator on a fixed, known-good attribute name
fn attribute(name: &str, value: impl Into<ValueMatcher>) -> Query {
    Query::Attribute {
        names: AttributeNames::Named(vec![name.to_string()]),
        value: value.into(),
    }
}

fn non_empty(value: ValueMatcher, what: &str) -> Result<ValueMatcher, QueryError> {
    if value.is_empty_literal() {
        return Err(QueryError::invalid(format!("{} must not be empty", what)));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::regex;
    use crate::tree::{Document, DocumentBuilder};

    /// <form class="search-form main">
    ///   <input type="text" name="q" title="Search"/>
    ///   <a href="/next" class="nav">Next <b>page</b></a>
    /// </form>
    fn create_test_document() -> Document {
        let mut builder = DocumentBuilder::new();
        builder.start_element("form", &[("class", "search-form main")]);
        builder.empty_element("input", &[("type", "text"), ("name", "q"), ("title", "Search")]);
        builder.start_element("a", &[("href", "/next"), ("class", "nav")]);
        builder.text("Next ");
        builder.start_element("b", &[]);
        builder.text("page");
        builder.end_element().unwrap();
        builder.end_element().unwrap();
        builder.end_element().unwrap();
        builder.finish().unwrap()
    }

    #[test]
    fn test_invalid_arguments() {
        assert!(matches!(by("", "x"), Err(QueryError::InvalidQuery(_))));
        assert!(matches!(by_names(&[], "x"), Err(QueryError::InvalidQuery(_))));
        assert!(matches!(by_names(&["a", ""], "x"), Err(QueryError::InvalidQuery(_))));
        assert!(matches!(has(""), Err(QueryError::InvalidQuery(_))));
        assert!(matches!(by_tag(""), Err(QueryError::InvalidQuery(_))));
        assert!(matches!(by_id(""), Err(QueryError::InvalidQuery(_))));
        assert!(matches!(by_class(""), Err(QueryError::InvalidQuery(_))));
        assert!(matches!(by_class("a b"), Err(QueryError::InvalidQuery(_))));
        assert!(matches!(
            everything().by("", "x"),
            Err(QueryError::InvalidQuery(_))
        ));
    }

    #[test]
    fn test_by_tag() {
        let doc = create_test_document();

        assert_eq!(doc.get_all(&by_tag("INPUT").unwrap()).len(), 1);
        assert_eq!(doc.get_all(&by_tag(regex("a|b").unwrap()).unwrap()).len(), 2);
        // Never matches the document or text nodes
        assert_eq!(doc.get_all(&by_tag(regex(".*").unwrap()).unwrap()).len(), 4);
    }

    #[test]
    fn test_by_class_matches_tokens() {
        let doc = create_test_document();

        let form = doc.get(&by_class("main").unwrap()).unwrap();
        assert_eq!(form.name(), Some("form"));
        assert_eq!(doc.get(&by_class("search-form").unwrap()), Some(form));
        assert!(doc.get(&by_class("search").unwrap()).is_none());
        assert_eq!(doc.get_all(&by_class(regex("na.").unwrap()).unwrap()).len(), 1);
    }

    #[test]
    fn test_conjunctive_chain() {
        let doc = create_test_document();
        let query = by_tag("input").unwrap().by("type", "text").unwrap();

        assert_eq!(doc.get(&query).unwrap().attribute("name").as_deref(), Some("q"));
        assert!(doc.get(&query.by_name("other")).is_none());
    }

    #[test]
    fn test_disjunctive_chain() {
        let doc = create_test_document();
        let query = by_title("Search").or().by_href("/next");

        let found = doc.get_all(&query);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].name(), Some("input"));
        assert_eq!(found[1].name(), Some("a"));
    }

    #[test]
    fn test_special_attribute_helpers() {
        let doc = create_test_document();

        assert_eq!(doc.get(&by_tag("a").unwrap().by_text("Next page")).unwrap().name(), Some("a"));
        assert_eq!(doc.get(&by_inner_html("page")).unwrap().name(), Some("b"));
        assert_eq!(doc.get(&by_html("<b>page</b>")).unwrap().name(), Some("b"));
        assert!(doc.get(&by_text(regex("Next.*").unwrap())).is_some());
    }

    #[test]
    fn test_by_names_and_any() {
        let doc = create_test_document();

        let query = by_names(&["title", "href"], regex("/.*|Search").unwrap()).unwrap();
        assert_eq!(doc.get_all(&query).len(), 2);

        let any = by_any("q");
        assert_eq!(doc.get(&any).unwrap().name(), Some("input"));
    }

    #[test]
    fn test_has() {
        let doc = create_test_document();

        assert_eq!(doc.get_all(&has("href").unwrap()).len(), 1);
        assert_eq!(doc.get_all(&has_names(&["href", "title"]).unwrap()).len(), 2);
        // Every element supports ${tagName}
        assert_eq!(doc.get_all(&has(special::TAG_NAME).unwrap()).len(), 4);
    }

    #[test]
    fn test_negated_term() {
        let doc = create_test_document();
        let query = by_tag(regex(".*").unwrap())
            .unwrap()
            .not(has("class").unwrap());

        let found = doc.get_all(&query);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].name(), Some("input"));
        assert_eq!(found[1].name(), Some("b"));
    }
}
