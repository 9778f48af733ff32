//! Structural traversal: walk a [`Value`] tree and check every scalar leaf against the
//! tags declared on the fields leading to it.
//!
//! ## Shapes
//!
//! - **Record:** fields are visited in declaration order. A tagged field that is not
//!   exported aborts the whole pass before its value is visited. Each field extends the
//!   path with `.<name>` and contributes its tag (empty if it has none).
//! - **Sequence:** elements are visited in index order with the path extended by `[i]`.
//!   Elements carry no tags of their own; they are checked against the sequence field's tag.
//! - **Scalar:** every non-empty applicable tag is parsed and each clause is evaluated.
//!   A clause that does not pass is collected as [`ValidationError::Failed`] and the walk
//!   goes on. Syntax errors, unknown constraints and unsupported scalar kinds abort.
//!
//! ## Tag inheritance
//!
//! By default a leaf is checked only against the tag of the field that owns it (for a
//! sequence element, the sequence field). With [`Validator::inherit_tags`] the leaf is also
//! checked against every tag on the chain of record fields above it.
//!
//! ## Example
//!
//! ```
//! use tagvalidate::{validate, Record, Value};
//!
//! let user = Record::new("User").field("Age", Some("min:18;max:65"), 70);
//! let errs = validate(&Value::Record(user)).unwrap_err();
//! assert_eq!(errs.to_string(), ".Age: validation failed for \"max\" tag");
//! ```

use crate::describe::Describe;
use crate::error::{ValidationError, ValidationErrors};
use crate::parser::parse_tag;
use crate::registry::{registry, Registry};
use crate::value::{Record, Value};
use std::fmt::Write;
use tracing::{debug, trace};

/// Validate with the built-in registry and default options.
pub fn validate<T: Describe + ?Sized>(value: &T) -> Result<(), ValidationErrors> {
    Validator::new().validate(value)
}

/// Validate an already described value with the built-in registry and default options.
pub fn validate_value(value: &Value) -> Result<(), ValidationErrors> {
    Validator::new().validate_value(value)
}

/// Reusable validator: a registry plus traversal options. Holds no per-call state.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'r> {
    registry: &'r Registry,
    inherit_tags: bool,
}

impl Default for Validator<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator<'static> {
    pub fn new() -> Self {
        Validator { registry: registry(), inherit_tags: false }
    }
}

impl<'r> Validator<'r> {
    pub fn with_registry(registry: &'r Registry) -> Self {
        Validator { registry, inherit_tags: false }
    }

    /// Apply the tags of enclosing record fields to nested leaves as well.
    pub fn inherit_tags(mut self, inherit: bool) -> Self {
        self.inherit_tags = inherit;
        self
    }

    pub fn validate<T: Describe + ?Sized>(&self, value: &T) -> Result<(), ValidationErrors> {
        self.validate_value(&value.describe())
    }

    /// `Ok(())` when every check passes; otherwise either all constraint failures in
    /// traversal order, or the single structural error that aborted the pass.
    pub fn validate_value(&self, value: &Value) -> Result<(), ValidationErrors> {
        let record = match value {
            Value::Record(r) => r,
            other => {
                debug!(kind = other.type_name(), "validation rejected: not a struct");
                return Err(ValidationError::NotStruct.into());
            }
        };
        debug!(record = %record.name, inherit_tags = self.inherit_tags, "validation started");
        let mut errors = ValidationErrors::new();
        let mut tags = Vec::new();
        let mut path = String::new();
        if let Err(e) = self.walk_record(record, &mut tags, &mut path, &mut errors) {
            debug!(record = %record.name, error = %e, "validation aborted");
            return Err(e.into());
        }
        debug!(record = %record.name, failures = errors.len(), "validation finished");
        errors.into_result()
    }

    fn walk<'v>(
        &self,
        value: &'v Value,
        tags: &mut Vec<&'v str>,
        path: &mut String,
        errors: &mut ValidationErrors,
    ) -> Result<(), ValidationError> {
        match value {
            Value::Seq(items) => {
                let mark = path.len();
                for (i, item) in items.iter().enumerate() {
                    let _ = write!(path, "[{}]", i);
                    let res = self.walk(item, tags, path, errors);
                    path.truncate(mark);
                    res?;
                }
                Ok(())
            }
            Value::Record(record) => self.walk_record(record, tags, path, errors),
            leaf => self.check_leaf(leaf, tags, path, errors),
        }
    }

    fn walk_record<'v>(
        &self,
        record: &'v Record,
        tags: &mut Vec<&'v str>,
        path: &mut String,
        errors: &mut ValidationErrors,
    ) -> Result<(), ValidationError> {
        let mark = path.len();
        for field in &record.fields {
            path.push('.');
            path.push_str(&field.name);
            if field.tag.is_some() && !field.exported {
                return Err(ValidationError::UnexportedField { path: path.clone() });
            }
            tags.push(field.tag.as_deref().unwrap_or(""));
            let res = self.walk(&field.value, tags, path, errors);
            tags.pop();
            path.truncate(mark);
            res?;
        }
        Ok(())
    }

    fn check_leaf(
        &self,
        value: &Value,
        tags: &[&str],
        path: &str,
        errors: &mut ValidationErrors,
    ) -> Result<(), ValidationError> {
        let applicable: &[&str] = if self.inherit_tags {
            tags
        } else {
            match tags.split_last() {
                Some((last, _)) => std::slice::from_ref(last),
                None => &[],
            }
        };
        for tag in applicable.iter().filter(|t| !t.is_empty()) {
            let clauses = parse_tag(tag).map_err(ValidationError::InvalidSyntax)?;
            for clause in clauses {
                let constraint = self
                    .registry
                    .get(clause.name)
                    .ok_or_else(|| ValidationError::unsupported_tag(clause.name))?;
                let passed = constraint.evaluate(clause.args, value)?;
                trace!(path, constraint = clause.name, args = clause.args, passed, "clause evaluated");
                if !passed {
                    errors.push(ValidationError::Failed {
                        path: path.to_string(),
                        constraint: clause.name.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}
