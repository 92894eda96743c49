//! Error types for match evaluation.

use thiserror::Error;

/// Failure to resolve a match session.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MatchError {
    /// No clause fired and the session has no fallback.
    #[error(
        "non-exhaustive match: none of {clauses} clause(s) fired for the {value_kind} value and no fallback is set"
    )]
    NonExhaustive {
        value_kind: &'static str,
        clauses: usize,
    },
}
