//! Pattern descriptors.
//!
//! A `Pattern` is a declarative description of an expected shape. It is a
//! closed sum type rather than a bag of sentinel values: kind markers,
//! literals, sequences and objects are distinct variants, so the matcher
//! dispatches on structure instead of comparing against magic constants.
//!
//! Patterns are usually written with the `pattern!` macro, which mirrors
//! object-literal syntax:
//!
//! ```text
//! pattern!({ kind: "some" })
//! pattern!([{ Id: Number, Title: String }])
//! pattern!({ errorMessage: String, retry: undefined })
//! ```

use std::fmt;

use crate::errors::PatternError;
use crate::stack::ensure_sufficient_stack;
use crate::value::Value;

/// A concrete primitive matched by strict equality.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
}

impl Literal {
    /// Strict equality between this literal and a runtime value.
    ///
    /// Follows `Value::strict_eq`: a NaN literal matches nothing, and a
    /// literal never equals a list or record.
    pub fn strict_eq(&self, value: &Value) -> bool {
        match (self, value) {
            (Literal::Null, Value::Null) => true,
            (Literal::Bool(a), Value::Bool(b)) => a == b,
            #[allow(clippy::float_cmp, reason = "strict equality is exact IEEE comparison")]
            (Literal::Number(a), Value::Number(b)) => a == b,
            (Literal::Str(a), Value::Str(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }

    /// The runtime value this literal stands for.
    pub fn to_value(&self) -> Value {
        match self {
            Literal::Null => Value::Null,
            Literal::Bool(b) => Value::Bool(*b),
            Literal::Number(n) => Value::Number(*n),
            Literal::Str(s) => Value::string(s.as_str()),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Null => write!(f, "null"),
            Literal::Bool(b) => write!(f, "{b}"),
            Literal::Number(n) => write!(f, "{n}"),
            Literal::Str(s) => write!(f, "{s:?}"),
        }
    }
}

/// A declarative shape description.
#[derive(Clone, Debug, PartialEq)]
pub enum Pattern {
    /// Any string.
    AnyString,
    /// Any number except NaN.
    AnyNumber,
    /// Any boolean.
    AnyBoolean,
    /// Exactly this primitive.
    Literal(Literal),
    /// A list whose every element matches the inner pattern.
    Sequence(Box<Pattern>),
    /// A record constraining the named fields, in declaration order.
    ///
    /// Fields the pattern does not name are not examined.
    Object(Vec<(String, Pattern)>),
    /// A declared but unsatisfiable descriptor.
    ///
    /// Matches nothing. As an object field it makes the whole object pattern
    /// fail, which differs from leaving the field out.
    Undefined,
}

impl Pattern {
    /// Marker matching any string.
    pub const STRING: Pattern = Pattern::AnyString;
    /// Marker matching any non-NaN number.
    pub const NUMBER: Pattern = Pattern::AnyNumber;
    /// Marker matching any boolean.
    pub const BOOLEAN: Pattern = Pattern::AnyBoolean;

    /// A literal pattern.
    pub fn literal(literal: impl Into<Literal>) -> Self {
        Pattern::Literal(literal.into())
    }

    /// A sequence pattern `[element]`.
    pub fn sequence(element: impl Into<Pattern>) -> Self {
        Pattern::Sequence(Box::new(element.into()))
    }

    /// An object pattern from `(field, pattern)` pairs.
    ///
    /// Naming a field twice keeps the first position and the last pattern.
    pub fn object<K, P, I>(fields: I) -> Self
    where
        K: Into<String>,
        P: Into<Pattern>,
        I: IntoIterator<Item = (K, P)>,
    {
        fields
            .into_iter()
            .fold(ObjectPattern::new(), |object, (name, pattern)| {
                object.field(name, pattern)
            })
            .into()
    }

    /// Whether this is the unsatisfiable `Undefined` descriptor.
    pub fn is_undefined(&self) -> bool {
        matches!(self, Pattern::Undefined)
    }

    /// Derive a literal-shaped pattern from a template value.
    ///
    /// Records become object patterns, single-element lists become sequence
    /// patterns, and primitives become literals. Templates cannot express the
    /// kind markers; combine the result with builder methods for those.
    ///
    /// # Errors
    ///
    /// `PatternError::SequenceArity` if any list in the template does not
    /// have exactly one element.
    pub fn from_template(template: &Value) -> Result<Self, PatternError> {
        ensure_sufficient_stack(|| match template {
            Value::Null => Ok(Pattern::Literal(Literal::Null)),
            Value::Bool(b) => Ok(Pattern::Literal(Literal::Bool(*b))),
            Value::Number(n) => Ok(Pattern::Literal(Literal::Number(*n))),
            Value::Str(s) => Ok(Pattern::Literal(Literal::Str(s.as_str().to_owned()))),
            Value::List(items) => match items.as_slice() {
                [element] => Ok(Pattern::sequence(Pattern::from_template(element)?)),
                _ => Err(PatternError::SequenceArity { len: items.len() }),
            },
            Value::Record(fields) => {
                let mut names: Vec<&String> = fields.keys().collect();
                names.sort_unstable();
                let mut object = Vec::with_capacity(names.len());
                for name in names {
                    let field = Pattern::from_template(&fields[name])?;
                    object.push((name.clone(), field));
                }
                Ok(Pattern::Object(object))
            }
        })
    }
}

/// Incremental builder for object patterns.
///
/// ```text
/// let p: Pattern = ObjectPattern::new()
///     .field("kind", "some")
///     .field("value", Pattern::STRING)
///     .into();
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjectPattern {
    fields: Vec<(String, Pattern)>,
}

impl ObjectPattern {
    /// An empty object pattern, which matches any record.
    pub fn new() -> Self {
        ObjectPattern { fields: Vec::new() }
    }

    /// Constrain `name` to match `pattern`.
    ///
    /// Re-declaring a field replaces its pattern in place.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, pattern: impl Into<Pattern>) -> Self {
        let name = name.into();
        let pattern = pattern.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = pattern,
            None => self.fields.push((name, pattern)),
        }
        self
    }

    /// Declare `name` as present but unsatisfiable.
    #[must_use]
    pub fn undefined(self, name: impl Into<String>) -> Self {
        self.field(name, Pattern::Undefined)
    }
}

impl From<ObjectPattern> for Pattern {
    fn from(object: ObjectPattern) -> Self {
        Pattern::Object(object.fields)
    }
}

impl From<Literal> for Pattern {
    fn from(literal: Literal) -> Self {
        Pattern::Literal(literal)
    }
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self {
        Literal::Bool(b)
    }
}

impl From<f64> for Literal {
    fn from(n: f64) -> Self {
        Literal::Number(n)
    }
}

impl From<i32> for Literal {
    fn from(n: i32) -> Self {
        Literal::Number(f64::from(n))
    }
}

impl From<u32> for Literal {
    fn from(n: u32) -> Self {
        Literal::Number(f64::from(n))
    }
}

impl From<i64> for Literal {
    #[allow(
        clippy::cast_precision_loss,
        reason = "numbers share one f64 representation; magnitudes past 2^53 round"
    )]
    fn from(n: i64) -> Self {
        Literal::Number(n as f64)
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Literal::Str(s.to_owned())
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Literal::Str(s)
    }
}

// Primitive shorthands: a bare primitive in pattern position is a literal.
macro_rules! literal_pattern_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Pattern {
                fn from(value: $ty) -> Self {
                    Pattern::Literal(Literal::from(value))
                }
            }
        )*
    };
}

literal_pattern_from!(bool, f64, i32, u32, i64, &str, String);

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::AnyString => write!(f, "String"),
            Pattern::AnyNumber => write!(f, "Number"),
            Pattern::AnyBoolean => write!(f, "Boolean"),
            Pattern::Literal(literal) => write!(f, "{literal}"),
            Pattern::Sequence(element) => write!(f, "[{element}]"),
            Pattern::Object(fields) => {
                write!(f, "{{")?;
                for (i, (name, pattern)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{name}: {pattern}")?;
                }
                write!(f, "}}")
            }
            Pattern::Undefined => write!(f, "undefined"),
        }
    }
}
