//! Validation errors and the ordered collection returned by a validation pass.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("wrong argument given, should be a struct")]
    NotStruct,
    #[error("validation for unexported field is not allowed: {path}")]
    UnexportedField { path: String },
    #[error("invalid validator syntax: {0}")]
    InvalidSyntax(String),
    #[error("unsupported type {0}")]
    UnsupportedType(&'static str),
    #[error("{path}: validation failed for {constraint:?} tag")]
    Failed { path: String, constraint: String },
}

impl ValidationError {
    pub fn unsupported_tag(name: &str) -> Self {
        ValidationError::InvalidSyntax(format!("unsupported tag {:?}", name))
    }

    pub fn bad_argument(constraint: &str, arg: &str) -> Self {
        ValidationError::InvalidSyntax(format!("argument {:?} of {:?} is not an integer", arg, constraint))
    }

    /// True for everything except an ordinary constraint failure.
    pub fn is_structural(&self) -> bool {
        !matches!(self, ValidationError::Failed { .. })
    }
}

/// Ordered failures from one pass: depth-first, field declaration order, then index order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, err: ValidationError) {
        self.0.push(err);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[ValidationError] {
        &self.0
    }

    /// A structural or syntax failure aborts the pass and is reported alone.
    pub fn is_structural(&self) -> bool {
        self.0.len() == 1 && self.0[0].is_structural()
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(err: ValidationError) -> Self {
        Self(vec![err])
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
