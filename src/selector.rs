//! Selector parser
//!
//! Translates a CSS-subset selector string into a [`Query`] using the pest
//! grammar in `selector.pest`:
//!
//! ```text
//! selector-list := compound ("," compound)*
//! compound      := ("*" | type) qualifier* | qualifier+
//! qualifier     := "#" name | "." ident | "[" attr (op value "i"?)? "]" | ":not(" compound ")"
//! attr          := ident | "${" ident "}"
//! op            := "=" | "~=" | "|=" | "^=" | "$=" | "*="
//! ```
//!
//! A compound is a conjunction of its parts; a list is a disjunction of its
//! compounds. Combinators between compounds are not supported. A compound
//! without a type selector (`*`, `.x`, `:not(..)`) matches elements only,
//! never the document or text and comment nodes.

use pest::Parser;
use pest::error::InputLocation;
use pest::iterators::Pair;
use pest_derive::Parser;

use crate::builder;
use crate::error::QueryError;
use crate::pattern::Pattern;
use crate::query::Query;
use crate::special;

#[derive(Parser)]
#[grammar = "selector.pest"]
struct SelectorParser;

/// Parse a selector string into a query
pub fn parse_selector(selector: &str) -> Result<Query, QueryError> {
    let mut pairs = SelectorParser::parse(Rule::selector_list, selector)
        .map_err(|e| syntax_error(selector, &e))?;
    let Some(list) = pairs.next() else {
        return Err(syntax_error_at(selector, 0));
    };

    let mut alternatives = Vec::new();
    for pair in list.into_inner() {
        if pair.as_rule() == Rule::compound {
            alternatives.push(compile_compound(pair)?);
        }
    }

    let query = if alternatives.len() > 1 {
        Query::Or(alternatives)
    } else {
        alternatives
            .pop()
            .ok_or_else(|| syntax_error_at(selector, 0))?
    };

    tracing::debug!("Compiled selector {:?}: {:?}", selector, query);
    Ok(query)
}

/// Compile a compound selector: the conjunction of its parts
fn compile_compound(pair: Pair<Rule>) -> Result<Query, QueryError> {
    let mut terms = Vec::new();
    let mut typed = false;

    for part in pair.into_inner() {
        match part.as_rule() {
            Rule::universal => {}
            Rule::type_selector => {
                typed = true;
                terms.push(builder::by_tag(unescape(part.as_str()))?);
            }
            Rule::id_selector => {
                let id = part.as_str().strip_prefix('#').unwrap_or_default();
                terms.push(builder::by_id(unescape(id))?);
            }
            Rule::class_selector => {
                let class = unescape(part.as_str().strip_prefix('.').unwrap_or_default());
                // An escaped blank can never be a single class token
                if class.chars().any(char::is_whitespace) {
                    terms.push(nothing());
                } else {
                    terms.push(builder::by_class(class)?);
                }
            }
            Rule::attribute_selector => terms.push(compile_attribute(part)?),
            Rule::negation => {
                if let Some(inner) = part.into_inner().next() {
                    terms.push(builder::not(compile_compound(inner)?));
                }
            }
            _ => {}
        }
    }

    if !typed {
        terms.insert(0, builder::has(special::TAG_NAME)?);
    }

    Ok(match terms.len() {
        0 => Query::Everything,
        1 => terms.pop().unwrap_or(Query::Everything),
        _ => Query::And(terms),
    })
}

/// Compile `[name]` or `[name op value i?]`
fn compile_attribute(pair: Pair<Rule>) -> Result<Query, QueryError> {
    let mut inner = pair.into_inner();

    let Some(name) = inner.next() else {
        return Err(QueryError::invalid("attribute selector without a name"));
    };
    let name = unescape(name.as_str());

    let Some(op) = inner.next() else {
        return builder::has(&name);
    };

    let value = match inner.next() {
        Some(value) if value.as_rule() == Rule::quoted => value
            .into_inner()
            .next()
            .map(|content| unescape(content.as_str()))
            .unwrap_or_default(),
        Some(value) => unescape(value.as_str()),
        None => String::new(),
    };
    let ignore_case = inner.next().is_some();

    attribute_query(&name, op.as_str(), &value, ignore_case)
}

fn attribute_query(
    name: &str,
    op: &str,
    value: &str,
    ignore_case: bool,
) -> Result<Query, QueryError> {
    let escaped = regex::escape(value);
    let flags = if ignore_case { "(?si)" } else { "(?s)" };

    let source = match op {
        "=" if !ignore_case => return builder::by(name, value),
        "=" => format!("{}{}", flags, escaped),
        "~=" if value.is_empty() || value.chars().any(char::is_whitespace) => {
            return Ok(nothing());
        }
        "~=" => format!(r"{}(?:.*\s)?{}(?:\s.*)?", flags, escaped),
        "|=" => format!("{}{}(?:-.*)?", flags, escaped),
        "^=" | "$=" | "*=" if value.is_empty() => return Ok(nothing()),
        "^=" => format!("{}{}.*", flags, escaped),
        "$=" => format!("{}.*{}", flags, escaped),
        "*=" => format!("{}.*{}.*", flags, escaped),
        _ => {
            return Err(QueryError::invalid(format!(
                "unsupported attribute operator `{}`",
                op
            )));
        }
    };

    builder::by(name, Pattern::new(&source)?)
}

fn nothing() -> Query {
    builder::not(builder::everything())
}

/// Drop the backslash from `\x` escapes
fn unescape(raw: &str) -> String {
    if !raw.contains('\\') {
        return raw.to_string();
    }

    let mut output = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                output.push(escaped);
            }
        } else {
            output.push(c);
        }
    }
    output
}

fn syntax_error(selector: &str, error: &pest::error::Error<Rule>) -> QueryError {
    let position = match error.location {
        InputLocation::Pos(position) => position,
        InputLocation::Span((start, _)) => start,
    };
    syntax_error_at(selector, position)
}

/// Error naming the fragment from `position` up to the next blank
fn syntax_error_at(selector: &str, position: usize) -> QueryError {
    let rest = selector.get(position..).unwrap_or_default();
    let fragment = rest.split_whitespace().next().unwrap_or("end of input");

    QueryError::SelectorSyntax {
        selector: selector.to_string(),
        position,
        fragment: fragment.to_string(),
    }
}
