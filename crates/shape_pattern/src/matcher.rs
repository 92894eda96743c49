//! The structural matcher.
//!
//! `matches` decides whether a value conforms to a pattern. Cases are tried in
//! a fixed precedence:
//!
//! 1. kind markers (`String`, `Boolean`, `Number`; NaN is not a number here)
//! 2. sequences: the value is a list and every element matches
//! 3. primitives: strict equality against a literal pattern
//! 4. records and lists: every declared field is satisfiable, present and
//!    matches; a list's fields are its elements under decimal indices
//!
//! Everything else is a mismatch. The matcher is total and side-effect free;
//! a shape the pattern does not expect is `false`, never an error.
//!
//! `explain` walks the same cases but reports where and why matching failed.

use std::fmt;

use crate::pattern::{Literal, Pattern};
use crate::stack::ensure_sufficient_stack;
use crate::value::Value;

/// Whether `value` structurally conforms to `pattern`.
pub fn matches(value: &Value, pattern: &Pattern) -> bool {
    match pattern {
        Pattern::AnyString => matches!(value, Value::Str(_)),
        Pattern::AnyBoolean => matches!(value, Value::Bool(_)),
        Pattern::AnyNumber => matches!(value, Value::Number(n) if !n.is_nan()),
        Pattern::Sequence(element) => match value {
            Value::List(items) => items.iter().all(|item| matches_nested(item, element)),
            _ => false,
        },
        Pattern::Literal(literal) => literal.strict_eq(value),
        Pattern::Object(fields) => match value {
            Value::Record(_) | Value::List(_) => fields.iter().all(|(name, field)| {
                !field.is_undefined()
                    && member(value, name).is_some_and(|item| matches_nested(item, field))
            }),
            _ => false,
        },
        Pattern::Undefined => false,
    }
}

/// The child of a record or list named by an object pattern field.
///
/// Lists expose their elements under canonical decimal indices (`"0"`,
/// `"1"`, ..); any other name is absent from a list.
fn member<'v>(value: &'v Value, name: &str) -> Option<&'v Value> {
    match value {
        Value::Record(record) => record.get(name),
        Value::List(items) => items.get(list_index(name)?),
        _ => None,
    }
}

fn list_index(name: &str) -> Option<usize> {
    let index: usize = name.parse().ok()?;
    (index.to_string() == name).then_some(index)
}

#[inline]
fn matches_nested(value: &Value, pattern: &Pattern) -> bool {
    ensure_sufficient_stack(|| matches(value, pattern))
}

/// One step from a value to one of its children.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

/// Location of a sub-value, from the root.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Path(Vec<PathSegment>);

impl Path {
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$")?;
        for segment in &self.0 {
            match segment {
                PathSegment::Field(name) => write!(f, ".{name}")?,
                PathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

/// Why a value failed to match at some location.
#[derive(Clone, Debug, PartialEq)]
pub enum MismatchReason {
    /// A kind marker saw a value of another kind.
    ExpectedKind {
        expected: &'static str,
        found: &'static str,
    },
    /// The `Number` marker saw NaN.
    NaN,
    /// A literal pattern saw a different value.
    NotEqual { expected: Literal, found: Value },
    /// A sequence pattern saw a non-list.
    NotASequence { found: &'static str },
    /// An object pattern saw a value that is neither a record nor a list.
    NotARecord { found: &'static str },
    /// A field the pattern requires is absent from the record.
    MissingField { field: String },
    /// The pattern maps a field to `undefined`, which nothing satisfies.
    UndefinedField { field: String },
    /// The pattern itself is `undefined`.
    Unsatisfiable,
}

impl fmt::Display for MismatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExpectedKind { expected, found } => {
                write!(f, "expected a {expected}, found a {found}")
            }
            Self::NaN => write!(f, "expected a number, found NaN"),
            Self::NotEqual { expected, found } => write!(f, "expected {expected}, found {found}"),
            Self::NotASequence { found } => write!(f, "expected a list, found a {found}"),
            Self::NotARecord { found } => {
                write!(f, "expected a record or list, found a {found}")
            }
            Self::MissingField { field } => write!(f, "missing field `{field}`"),
            Self::UndefinedField { field } => {
                write!(f, "field `{field}` is declared undefined in the pattern")
            }
            Self::Unsatisfiable => write!(f, "pattern is undefined"),
        }
    }
}

/// The first location at which a value failed to match a pattern.
#[derive(Clone, Debug, PartialEq)]
pub struct Mismatch {
    pub path: Path,
    pub reason: MismatchReason,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "at {}: {}", self.path, self.reason)
    }
}

/// Explain why `value` does not match `pattern`.
///
/// Returns `None` exactly when [`matches`] returns `true`. Otherwise the
/// mismatch is the first failure in traversal order: list elements in index
/// order, object fields in declaration order.
pub fn explain(value: &Value, pattern: &Pattern) -> Option<Mismatch> {
    let mut path = Vec::new();
    explain_at(value, pattern, &mut path).map(|reason| Mismatch {
        path: Path(path),
        reason,
    })
}

/// On failure `path` is left pointing at the failing location; on success it
/// is restored to its state on entry.
fn explain_at(
    value: &Value,
    pattern: &Pattern,
    path: &mut Vec<PathSegment>,
) -> Option<MismatchReason> {
    match pattern {
        Pattern::AnyString => expect_kind(value, matches!(value, Value::Str(_)), "string"),
        Pattern::AnyBoolean => expect_kind(value, matches!(value, Value::Bool(_)), "boolean"),
        Pattern::AnyNumber => match value {
            Value::Number(n) if n.is_nan() => Some(MismatchReason::NaN),
            Value::Number(_) => None,
            _ => expect_kind(value, false, "number"),
        },
        Pattern::Sequence(element) => {
            let Value::List(items) = value else {
                return Some(MismatchReason::NotASequence {
                    found: value.type_name(),
                });
            };
            for (index, item) in items.iter().enumerate() {
                path.push(PathSegment::Index(index));
                if let Some(reason) = explain_nested(item, element, path) {
                    return Some(reason);
                }
                path.pop();
            }
            None
        }
        Pattern::Literal(literal) => {
            if literal.strict_eq(value) {
                None
            } else {
                Some(MismatchReason::NotEqual {
                    expected: literal.clone(),
                    found: value.clone(),
                })
            }
        }
        Pattern::Object(fields) => {
            if !matches!(value, Value::Record(_) | Value::List(_)) {
                return Some(MismatchReason::NotARecord {
                    found: value.type_name(),
                });
            }
            for (name, field) in fields {
                if field.is_undefined() {
                    return Some(MismatchReason::UndefinedField { field: name.clone() });
                }
                let Some(item) = member(value, name) else {
                    return Some(MismatchReason::MissingField { field: name.clone() });
                };
                path.push(match list_index(name) {
                    Some(index) if matches!(value, Value::List(_)) => PathSegment::Index(index),
                    _ => PathSegment::Field(name.clone()),
                });
                if let Some(reason) = explain_nested(item, field, path) {
                    return Some(reason);
                }
                path.pop();
            }
            None
        }
        Pattern::Undefined => Some(MismatchReason::Unsatisfiable),
    }
}

#[inline]
fn explain_nested(
    value: &Value,
    pattern: &Pattern,
    path: &mut Vec<PathSegment>,
) -> Option<MismatchReason> {
    ensure_sufficient_stack(|| explain_at(value, pattern, path))
}

fn expect_kind(value: &Value, ok: bool, expected: &'static str) -> Option<MismatchReason> {
    if ok {
        None
    } else {
        Some(MismatchReason::ExpectedKind {
            expected,
            found: value.type_name(),
        })
    }
}
