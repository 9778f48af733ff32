//! # tagvalidate: Declarative Record Validation
//!
//! Validates records by walking their fields and checking each scalar against the
//! constraints declared in its `validate` tag. All constraint failures are collected;
//! a malformed tag or schema aborts the pass with a single error.
//!
//! ## Tag grammar
//!
//! ```text
//! tag    := clause (';' clause)*
//! clause := name ':' args
//! name   := [a-z]+
//! args   := [A-Za-z0-9:,-]*
//! ```
//!
//! ## Constraints
//!
//! | name  | integer                  | text                          |
//! |-------|--------------------------|-------------------------------|
//! | `len` | always passes            | character count equals `N`    |
//! | `in`  | one of `a,b,c` (ints)    | one of `a,b,c` (exact match)  |
//! | `min` | value ≥ `N`              | character count ≥ `N`         |
//! | `max` | value ≤ `N`              | character count ≤ `N`         |
//!
//! More constraints can be registered in a custom [`Registry`] and used through a
//! [`Validator`].
//!
//! ## Example
//!
//! ```
//! tagvalidate::describe_struct! {
//!     pub struct User {
//!         #[validate = "len:5"]
//!         pub name: String,
//!         #[validate = "min:18;max:65"]
//!         pub age: u32,
//!     }
//! }
//!
//! let user = User { name: "Bob".into(), age: 70 };
//! let errs = tagvalidate::validate(&user).unwrap_err();
//! assert_eq!(errs.len(), 2);
//! ```
//!
//! ## Usage
//!
//! See `tests/integration.rs` for full examples and the `check_tags` binary for checking
//! tag expressions outside of Rust code.

pub mod describe;
pub mod error;
pub mod parser;
pub mod registry;
pub mod value;
pub mod walk;

pub use describe::Describe;
pub use error::{ValidationError, ValidationErrors};
pub use parser::{check_tag, parse_tag, Clause};
pub use registry::{registry, Constraint, Registry};
pub use value::{Field, Record, Value};
pub use walk::{validate, validate_value, Validator};
