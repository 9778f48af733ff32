//! Describing host types as [`Value`] trees.
//!
//! A type that can be validated implements [`Describe`]. Scalars and collections are
//! covered here; structs get their implementation from [`describe_struct!`](crate::describe_struct),
//! which reads the `#[validate = "..."]` attribute and visibility of each field at compile time.
//!
//! ```
//! use tagvalidate::{Describe, Value};
//!
//! tagvalidate::describe_struct! {
//!     pub struct User {
//!         #[validate = "len:5"]
//!         pub name: String,
//!         /// Age in years.
//!         #[validate = "min:18;max:65"]
//!         pub age: u32,
//!         note: String,
//!     }
//! }
//!
//! let user = User { name: "Alice".into(), age: 30, note: String::new() };
//! let described = user.describe();
//! let record = described.as_record().unwrap();
//! assert_eq!(record.fields[1].tag.as_deref(), Some("min:18;max:65"));
//! assert!(!record.fields[2].exported);
//! assert_eq!(record.fields[2].value, Value::Text(String::new()));
//! ```

use crate::value::{Record, Value};

pub trait Describe {
    fn describe(&self) -> Value;
}

macro_rules! describe_int {
    ($($t:ty),*) => {
        $(
            impl Describe for $t {
                fn describe(&self) -> Value {
                    Value::Int(*self as i128)
                }
            }
        )*
    };
}

describe_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize);

macro_rules! describe_other {
    ($($t:ty => $name:literal),*) => {
        $(
            impl Describe for $t {
                fn describe(&self) -> Value {
                    Value::Other($name)
                }
            }
        )*
    };
}

describe_other!(bool => "bool", char => "char", f32 => "f32", f64 => "f64", u128 => "u128");

impl Describe for str {
    fn describe(&self) -> Value {
        Value::Text(self.to_string())
    }
}

impl Describe for String {
    fn describe(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl<T: Describe + ?Sized> Describe for &T {
    fn describe(&self) -> Value {
        (**self).describe()
    }
}

impl<T: Describe> Describe for [T] {
    fn describe(&self) -> Value {
        Value::Seq(self.iter().map(Describe::describe).collect())
    }
}

impl<T: Describe, const N: usize> Describe for [T; N] {
    fn describe(&self) -> Value {
        self.as_slice().describe()
    }
}

impl<T: Describe> Describe for Vec<T> {
    fn describe(&self) -> Value {
        self.as_slice().describe()
    }
}

impl Describe for Value {
    fn describe(&self) -> Value {
        self.clone()
    }
}

impl Describe for Record {
    fn describe(&self) -> Value {
        Value::Record(self.clone())
    }
}

/// Declare a struct and implement [`Describe`] for it.
///
/// A field may carry one `#[validate = "..."]` attribute anywhere among its other
/// attributes (doc comments, `#[allow(..)]`, ...); the others are kept on the generated
/// struct. A field with any visibility qualifier is exported; a private field is not.
#[macro_export]
macro_rules! describe_struct {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident { $($body:tt)* }
    ) => {
        $crate::__describe_fields! {
            head [$(#[$meta])* $vis struct $name]
            name $name
            fields []
            descs []
            attrs []
            tag [::std::option::Option::None]
            rest [$($body)*]
        }
    };
}

/// Field muncher behind [`describe_struct!`]: one attribute or one field per step.
#[doc(hidden)]
#[macro_export]
macro_rules! __describe_fields {
    (
        head [$($head:tt)*]
        name $name:ident
        fields [$($fields:tt)*]
        descs [$( ($dfield:ident { $($dexported:tt)* } { $($dtag:tt)* }) )*]
        attrs []
        tag $tag:tt
        rest []
    ) => {
        $($head)* {
            $($fields)*
        }

        impl $crate::Describe for $name {
            fn describe(&self) -> $crate::Value {
                $crate::Value::Record($crate::Record {
                    name: ::std::string::String::from(::std::stringify!($name)),
                    fields: ::std::vec![
                        $(
                            $crate::Field {
                                name: ::std::string::String::from(::std::stringify!($dfield)),
                                exported: $($dexported)*,
                                tag: $($dtag)*,
                                value: $crate::Describe::describe(&self.$dfield),
                            }
                        ),*
                    ],
                })
            }
        }
    };
    (
        head $head:tt
        name $name:ident
        fields $fields:tt
        descs $descs:tt
        attrs $attrs:tt
        tag $old:tt
        rest [#[validate = $tag:literal] $($rest:tt)*]
    ) => {
        $crate::__describe_fields! {
            head $head
            name $name
            fields $fields
            descs $descs
            attrs $attrs
            tag [::std::option::Option::Some(::std::string::String::from($tag))]
            rest [$($rest)*]
        }
    };
    (
        head $head:tt
        name $name:ident
        fields $fields:tt
        descs $descs:tt
        attrs [$($attrs:tt)*]
        tag $tag:tt
        rest [#[$($attr:tt)*] $($rest:tt)*]
    ) => {
        $crate::__describe_fields! {
            head $head
            name $name
            fields $fields
            descs $descs
            attrs [$($attrs)* #[$($attr)*]]
            tag $tag
            rest [$($rest)*]
        }
    };
    (
        head $head:tt
        name $name:ident
        fields [$($fields:tt)*]
        descs [$($descs:tt)*]
        attrs [$($attrs:tt)*]
        tag [$($tag:tt)*]
        rest [$fvis:vis $field:ident : $fty:ty $(, $($rest:tt)*)?]
    ) => {
        $crate::__describe_fields! {
            head $head
            name $name
            fields [$($fields)* $($attrs)* $fvis $field: $fty,]
            descs [$($descs)* ($field { !::std::stringify!($fvis).is_empty() } { $($tag)* })]
            attrs []
            tag [::std::option::Option::None]
            rest [$($($rest)*)?]
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::describe_struct! {
        #[derive(Debug, Clone)]
        pub struct Sample {
            /// Three-letter code.
            #[validate = "len:3"]
            pub code: String,
            #[validate = "max:10"]
            /// Items on hand.
            #[allow(dead_code)]
            pub count: u16,
            #[validate = ""]
            hidden: bool,
        }
    }

    #[test]
    fn scalars() {
        assert_eq!(42u8.describe(), Value::Int(42));
        assert_eq!((-7i64).describe(), Value::Int(-7));
        assert_eq!(u64::MAX.describe(), Value::Int(u64::MAX as i128));
        assert_eq!("hi".describe(), Value::Text("hi".to_string()));
        assert_eq!(1.5f64.describe(), Value::Other("f64"));
    }

    #[test]
    fn sequences() {
        assert_eq!(
            vec![1i32, 2].describe(),
            Value::Seq(vec![Value::Int(1), Value::Int(2)])
        );
        assert_eq!([["a"]].describe(), Value::Seq(vec![Value::Seq(vec![Value::Text("a".into())])]));
    }

    #[test]
    fn macro_builds_record_description() {
        let s = Sample { code: "abc".to_string(), count: 2, hidden: true };
        let v = s.describe();
        let rec = v.as_record().expect("record");
        assert_eq!(rec.name, "Sample");
        let names: Vec<_> = rec.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["code", "count", "hidden"]);

        let code = rec.get("code").expect("code");
        assert!(code.exported);
        assert_eq!(code.tag.as_deref(), Some("len:3"));
        assert_eq!(code.value, Value::Text("abc".into()));

        assert_eq!(rec.get("count").expect("count").tag.as_deref(), Some("max:10"));

        let hidden = rec.get("hidden").expect("hidden");
        assert!(!hidden.exported);
        assert_eq!(hidden.tag.as_deref(), Some(""));
        assert_eq!(hidden.value, Value::Other("bool"));
        assert!(s.hidden);
    }
}
