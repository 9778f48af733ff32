//! Parse `validate` tag expressions using PEST.
//!
//! A tag is one or more `name:args` clauses separated by `;`. Names are lowercase ASCII
//! letters; arguments are alphanumerics, `:`, `,` and `-` (possibly empty). Whitespace is
//! not allowed anywhere.

use crate::error::ValidationError;
use crate::registry::Registry;
use pest::error::LineColLocation;
use pest::Parser;
use pest_derive::Parser as PestParser;

#[derive(PestParser)]
#[grammar = "grammar.pest"]
struct TagParser;

/// One `name:args` clause of a tag, borrowed from the tag string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clause<'a> {
    pub name: &'a str,
    pub args: &'a str,
}

/// Parse a tag into its clauses, in source order. An empty tag has no clauses.
pub fn parse_tag(tag: &str) -> Result<Vec<Clause<'_>>, String> {
    if tag.is_empty() {
        return Ok(Vec::new());
    }
    let pairs = TagParser::parse(Rule::tag, tag).map_err(|e| {
        let col = match e.line_col {
            LineColLocation::Pos((_, col)) | LineColLocation::Span((_, col), _) => col,
        };
        format!("malformed tag {:?} at column {}: {}", tag, col, e.variant.message())
    })?;
    let root = pairs.into_iter().next().ok_or("Empty parse")?;
    let mut clauses = Vec::new();
    for clause in root.into_inner() {
        if clause.as_rule() != Rule::clause {
            continue;
        }
        let mut it = clause.into_inner();
        let name = it.next().ok_or("clause: missing name")?.as_str();
        let args = it.next().map(|p| p.as_str()).unwrap_or("");
        clauses.push(Clause { name, args });
    }
    Ok(clauses)
}

/// Parse a tag and make sure every clause names a constraint known to `registry`.
///
/// This is the value-independent part of a leaf check: argument values are only
/// interpreted once a scalar is available.
pub fn check_tag<'a>(tag: &'a str, registry: &Registry) -> Result<Vec<Clause<'a>>, ValidationError> {
    let clauses = parse_tag(tag).map_err(ValidationError::InvalidSyntax)?;
    for clause in &clauses {
        if registry.get(clause.name).is_none() {
            return Err(ValidationError::unsupported_tag(clause.name));
        }
    }
    Ok(clauses)
}
