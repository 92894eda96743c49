//! Error types for building patterns and converting values.
//!
//! Matching itself never fails; these cover the fallible edges around it.

use thiserror::Error;

/// Failure to derive a pattern descriptor from a template value.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PatternError {
    /// A list in a template must hold exactly one element pattern.
    #[error("sequence template must contain exactly one element pattern, found {len}")]
    SequenceArity { len: usize },
}

/// Failure to move data between `Value` and serde types.
#[cfg(feature = "serde")]
#[derive(Debug, Error)]
pub enum ValueError {
    #[error("cannot convert into a value: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("cannot decode value: {0}")]
    Deserialize(#[source] serde_json::Error),
}
