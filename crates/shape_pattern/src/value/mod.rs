//! Runtime values inspected by the matcher.
//!
//! `Value` is deliberately type-erased: it models JSON-like, tree-shaped
//! data (null, booleans, one numeric kind, strings, lists and records) so a
//! single matcher can work over any input a caller can describe.
//!
//! # Heap Discipline
//!
//! Strings, lists and records live behind `Heap<T>`, whose constructor is
//! private to this module. All construction goes through factory methods:
//!
//! ```text
//! let s = Value::string("hello");
//! let list = Value::list(vec![Value::number(1.0)]);
//! let rec = Value::record([("kind", Value::string("some"))]);
//! ```
//!
//! Cloning a value is O(1) and never copies the payload. Because payloads are
//! immutable once allocated, a value can never contain itself.

mod heap;
#[cfg(feature = "serde")]
mod serde_impl;

use std::fmt;

use rustc_hash::FxHashMap;

pub use heap::Heap;

/// Field storage of a record value.
pub type Record = FxHashMap<String, Value>;

/// A type-erased runtime value.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    // Primitives (inline)
    /// The null value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Numeric value. There is a single numeric kind; NaN is representable.
    Number(f64),

    // Heap types
    /// String value.
    Str(Heap<String>),
    /// Ordered sequence of values.
    List(Heap<Vec<Value>>),
    /// Mapping from field name to value.
    Record(Heap<Record>),
}

// Factory Methods (ONLY way to construct heap values)

impl Value {
    /// Create a numeric value.
    #[inline]
    pub fn number(n: f64) -> Self {
        Value::Number(n)
    }

    /// Create a string value.
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    /// Create a list value.
    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Heap::new(items))
    }

    /// Create a record value from `(field, value)` pairs.
    ///
    /// A field named twice keeps the last value, as in an object literal.
    ///
    /// ```text
    /// let blog = Value::record([("Id", Value::number(1.0)), ("Title", Value::string("a"))]);
    /// ```
    pub fn record<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let fields = fields
            .into_iter()
            .map(|(name, value)| (name.into(), value))
            .collect();
        Value::Record(Heap::new(fields))
    }

    /// Create a record value from an already built field map.
    #[inline]
    pub fn from_record(fields: Record) -> Self {
        Value::Record(Heap::new(fields))
    }
}

// Value Methods

impl Value {
    /// Try to convert to a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to convert to a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to convert to a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Try to convert to a list.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Try to convert to a record.
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(fields) => Some(fields),
            _ => None,
        }
    }

    /// Look up a record field.
    ///
    /// Returns `None` both for a missing field and for non-record values.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.as_record().and_then(|fields| fields.get(name))
    }

    /// Whether this is a primitive (null, boolean, number or string).
    ///
    /// Primitives are compared by value; lists and records by identity.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::Str(_)
        )
    }

    /// Get the kind name for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Record(_) => "record",
        }
    }

    /// Strict equality (`===`).
    ///
    /// Primitives are equal when they have the same kind and payload, with
    /// IEEE semantics for numbers: NaN equals nothing, `0.0 === -0.0`.
    /// Lists and records are equal only when they are the same allocation.
    pub fn strict_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            #[allow(clippy::float_cmp, reason = "strict equality is exact IEEE comparison")]
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => Heap::ptr_eq(a, b),
            (Value::Record(a), Value::Record(b)) => Heap::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    #[allow(
        clippy::cast_precision_loss,
        reason = "numbers share one f64 representation; magnitudes past 2^53 round"
    )]
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::list(items)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Str(s) => write!(f, "{:?}", s.as_str()),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Record(fields) => {
                // Sorted so output does not depend on hash order.
                let mut entries: Vec<_> = fields.iter().collect();
                entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
                write!(f, "{{")?;
                for (i, (name, value)) in entries.into_iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{name}: {value}")?;
                }
                write!(f, "}}")
            }
        }
    }
}
