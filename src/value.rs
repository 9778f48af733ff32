//! Runtime description of a value to validate: records, sequences and scalar leaves.

/// A value as seen by the validator.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Any integral scalar, widened.
    Int(i128),
    Text(String),
    Seq(Vec<Value>),
    Record(Record),
    /// A scalar of another kind (bool, float, ...); only its type name is kept.
    Other(&'static str),
}

/// A struct-like value with named fields in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub name: String,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    /// Visible outside its defining module (`pub`).
    pub exported: bool,
    /// The `validate` tag; `None` when the field carries none.
    pub tag: Option<String>,
    pub value: Value,
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Text(_) => "string",
            Value::Seq(_) => "sequence",
            Value::Record(_) => "struct",
            Value::Other(name) => *name,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }
}

impl Record {
    pub fn new(name: impl Into<String>) -> Self {
        Record { name: name.into(), fields: Vec::new() }
    }

    /// Append an exported field.
    pub fn field(self, name: impl Into<String>, tag: Option<&str>, value: impl Into<Value>) -> Self {
        self.push(name, true, tag, value)
    }

    /// Append a non-exported field.
    pub fn private_field(self, name: impl Into<String>, tag: Option<&str>, value: impl Into<Value>) -> Self {
        self.push(name, false, tag, value)
    }

    fn push(mut self, name: impl Into<String>, exported: bool, tag: Option<&str>, value: impl Into<Value>) -> Self {
        self.fields.push(Field {
            name: name.into(),
            exported,
            tag: tag.map(str::to_string),
            value: value.into(),
        });
        self
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

impl From<Record> for Value {
    fn from(r: Record) -> Self {
        Value::Record(r)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Seq(v)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

macro_rules! int_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::Int(n as i128)
                }
            }
        )*
    };
}

int_from!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
