//! Constraint registry: constraint name to a pair of evaluators (integral, text).
//!
//! The built-in registry is built once, on first use, and never mutated. Custom
//! registries are assembled with [`Registry::new`] and [`Registry::with`] and handed to a
//! [`Validator`](crate::walk::Validator); the traversal never needs to know which
//! constraints exist.

use crate::error::ValidationError;
use crate::value::Value;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Evaluator for integral scalars: `(value, args) -> passed`.
pub type IntCheck = fn(i128, &str) -> Result<bool, ValidationError>;
/// Evaluator for text scalars: `(value, args) -> passed`.
pub type TextCheck = fn(&str, &str) -> Result<bool, ValidationError>;

#[derive(Debug, Clone, Copy)]
pub struct Constraint {
    pub name: &'static str,
    pub check_int: IntCheck,
    pub check_text: TextCheck,
}

impl Constraint {
    pub const fn new(name: &'static str, check_int: IntCheck, check_text: TextCheck) -> Self {
        Constraint { name, check_int, check_text }
    }

    /// Select the evaluator by scalar kind and run it.
    ///
    /// An empty argument never passes and is not a syntax error, for custom constraints
    /// too. Any value that is neither integral nor text is an `UnsupportedType` error.
    pub fn evaluate(&self, args: &str, value: &Value) -> Result<bool, ValidationError> {
        if args.is_empty() {
            return Ok(false);
        }
        match value {
            Value::Int(n) => (self.check_int)(*n, args),
            Value::Text(s) => (self.check_text)(s, args),
            other => Err(ValidationError::UnsupportedType(other.type_name())),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Registry {
    constraints: HashMap<&'static str, Constraint>,
}

static BUILTIN: Lazy<Registry> = Lazy::new(Registry::builtin);

/// The process-wide built-in registry (`len`, `in`, `min`, `max`).
pub fn registry() -> &'static Registry {
    &BUILTIN
}

impl Registry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        Registry::new()
            .with(Constraint::new("len", len_int, len_text))
            .with(Constraint::new("in", in_int, in_text))
            .with(Constraint::new("min", min_int, min_text))
            .with(Constraint::new("max", max_int, max_text))
    }

    /// Add (or replace) a constraint by name.
    pub fn with(mut self, constraint: Constraint) -> Self {
        self.constraints.insert(constraint.name, constraint);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Constraint> {
        self.constraints.get(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.constraints.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

/// Parse a base-10 integer argument; failure is a syntax error, not a failed check.
pub fn int_arg(constraint: &str, arg: &str) -> Result<i128, ValidationError> {
    arg.parse::<i128>()
        .map_err(|_| ValidationError::bad_argument(constraint, arg))
}

fn char_len(s: &str) -> i128 {
    s.chars().count() as i128
}

fn len_int(_: i128, args: &str) -> Result<bool, ValidationError> {
    int_arg("len", args)?;
    Ok(true)
}

fn len_text(s: &str, args: &str) -> Result<bool, ValidationError> {
    Ok(char_len(s) == int_arg("len", args)?)
}

fn in_int(n: i128, args: &str) -> Result<bool, ValidationError> {
    // The whole set is parsed before matching so a bad element fails for every value.
    let set = args
        .split(',')
        .map(|elem| int_arg("in", elem))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(set.contains(&n))
}

fn in_text(s: &str, args: &str) -> Result<bool, ValidationError> {
    Ok(args.split(',').any(|elem| elem == s))
}

fn min_int(n: i128, args: &str) -> Result<bool, ValidationError> {
    Ok(n >= int_arg("min", args)?)
}

fn min_text(s: &str, args: &str) -> Result<bool, ValidationError> {
    Ok(char_len(s) >= int_arg("min", args)?)
}

fn max_int(n: i128, args: &str) -> Result<bool, ValidationError> {
    Ok(n <= int_arg("max", args)?)
}

fn max_text(s: &str, args: &str) -> Result<bool, ValidationError> {
    Ok(char_len(s) <= int_arg("max", args)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(name: &str, args: &str, value: Value) -> Result<bool, ValidationError> {
        registry().get(name).expect("builtin").evaluate(args, &value)
    }

    #[test]
    fn builtin_names() {
        assert_eq!(registry().names(), vec!["in", "len", "max", "min"]);
        assert!(registry().get("regexp").is_none());
    }

    #[test]
    fn len_counts_characters() {
        assert_eq!(eval("len", "5", Value::Text("hello".into())), Ok(true));
        assert_eq!(eval("len", "5", Value::Text("Bob".into())), Ok(false));
        assert_eq!(eval("len", "3", Value::Text("héé".into())), Ok(true));
        assert_eq!(eval("len", "99", Value::Int(7)), Ok(true));
        assert!(eval("len", "x", Value::Int(7)).is_err());
        assert!(eval("len", "x", Value::Text("abc".into())).is_err());
    }

    #[test]
    fn in_membership() {
        assert_eq!(eval("in", "1,2,3", Value::Int(2)), Ok(true));
        assert_eq!(eval("in", "1,2,3", Value::Int(4)), Ok(false));
        assert_eq!(eval("in", "-1,0", Value::Int(-1)), Ok(true));
        assert!(eval("in", "1,a", Value::Int(4)).is_err());
        assert_eq!(
            eval("in", "1,x", Value::Int(1)),
            Err(ValidationError::bad_argument("in", "x"))
        );
        assert_eq!(eval("in", "admin,user", Value::Text("user".into())), Ok(true));
        assert_eq!(eval("in", "admin,user", Value::Text("1".into())), Ok(false));
        assert_eq!(eval("in", "1,2", Value::Text("1".into())), Ok(true));
    }

    #[test]
    fn min_max_on_ints_and_text() {
        assert_eq!(eval("min", "18", Value::Int(18)), Ok(true));
        assert_eq!(eval("min", "18", Value::Int(17)), Ok(false));
        assert_eq!(eval("max", "65", Value::Int(70)), Ok(false));
        assert_eq!(eval("min", "2", Value::Text("ab".into())), Ok(true));
        assert_eq!(eval("max", "2", Value::Text("abc".into())), Ok(false));
        assert!(eval("max", "ten", Value::Int(1)).is_err());
    }

    #[test]
    fn empty_argument_fails_without_error() {
        assert_eq!(eval("min", "", Value::Int(1)), Ok(false));
        assert_eq!(eval("in", "", Value::Text(String::new())), Ok(false));
    }

    #[test]
    fn other_scalars_are_unsupported() {
        assert_eq!(
            eval("min", "1", Value::Other("f64")),
            Err(ValidationError::UnsupportedType("f64"))
        );
    }

    #[test]
    fn custom_registry_extends_builtin() {
        fn even_int(n: i128, _: &str) -> Result<bool, ValidationError> {
            Ok(n % 2 == 0)
        }
        fn even_text(s: &str, _: &str) -> Result<bool, ValidationError> {
            Ok(s.chars().count() % 2 == 0)
        }
        let reg = Registry::builtin().with(Constraint::new("even", even_int, even_text));
        let even = reg.get("even").expect("registered");
        assert_eq!(even.evaluate("x", &Value::Int(4)), Ok(true));
        assert_eq!(even.evaluate("x", &Value::Text("abc".into())), Ok(false));
        assert_eq!(reg.names().len(), 5);
    }
}
