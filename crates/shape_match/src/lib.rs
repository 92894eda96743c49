//! Shape Match - first-match expression builder over structural patterns.
//!
//! A [`Match`] binds one input [`Value`] and accumulates clauses, each a
//! shape [`Pattern`] paired with a transform. Evaluation picks the first
//! clause, in declaration order, whose guard passes and whose polarity-adjusted
//! structural check holds, and applies its transform to the input:
//!
//! ```
//! use shape_match::{pattern, Match, Value};
//!
//! let option = Value::record([
//!     ("kind", Value::string("some")),
//!     ("value", Value::string("hello")),
//! ]);
//!
//! let result = Match::new(&option)
//!     .with_clause(pattern!({ kind: "some" }), |o| {
//!         o.field("value").and_then(Value::as_str).map(str::to_owned)
//!     })
//!     .fallback(|| None)
//!     .evaluate();
//!
//! assert_eq!(result, Some(Some("hello".to_string())));
//! ```
//!
//! # Sessions Are Values
//!
//! Every chaining method borrows the session and returns a new one; nothing
//! is mutated. The clause list is a persistent list shared between a session
//! and the sessions built from it, so a common prefix can be extended in
//! several directions without the branches seeing each other's clauses.
//!
//! # Errors
//!
//! Not matching is not an error: [`Match::evaluate`] returns the fallback's
//! result, or `None` when no fallback was set. [`Match::try_evaluate`] turns
//! that last case into [`MatchError::NonExhaustive`]. Failures inside caller
//! closures are the caller's: return a `Result` as the clause output, and a
//! panic unwinds through `evaluate` untouched.

mod builder;
mod clause;
mod errors;
#[cfg(feature = "serde")]
mod typed;

pub use builder::{match_value, Match};
pub use clause::{Clause, Polarity};
pub use errors::MatchError;

// Re-export the pattern layer so consumers depend on one crate.
#[cfg(feature = "serde")]
pub use shape_pattern::ValueError;
pub use shape_pattern::{
    explain, matches, pattern, Heap, Literal, Mismatch, MismatchReason, ObjectPattern, Path,
    PathSegment, Pattern, PatternError, Record, Value,
};
