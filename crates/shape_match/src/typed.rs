//! Clauses whose transform takes a deserialized, typed view of the input.

use serde::de::DeserializeOwned;
use shape_pattern::{Pattern, ValueError};

use crate::builder::Match;

impl<'a, R> Match<'a, Result<R, ValueError>> {
    /// Add a clause whose transform receives the input decoded as `U`.
    ///
    /// The pattern narrows the shape and `U` names it. Decoding happens only
    /// when the clause fires; a value that matches the pattern but does not
    /// decode into `U` produces `Err(ValueError::Deserialize)` as the result.
    ///
    /// ```
    /// use serde::Deserialize;
    /// use shape_match::{pattern, Match, Value};
    ///
    /// #[derive(Deserialize)]
    /// struct Point {
    ///     x: f64,
    ///     y: f64,
    /// }
    ///
    /// let value = Value::record([("x", Value::from(3)), ("y", Value::from(4))]);
    /// let norm = Match::new(&value)
    ///     .with_clause_as(pattern!({ x: Number, y: Number }), |p: Point| p.x.hypot(p.y))
    ///     .evaluate();
    ///
    /// assert_eq!(norm.map(Result::ok), Some(Some(5.0)));
    /// ```
    #[must_use]
    pub fn with_clause_as<U, F>(&self, pattern: impl Into<Pattern>, expr: F) -> Self
    where
        U: DeserializeOwned,
        F: Fn(U) -> R + 'a,
    {
        self.with_clause(pattern, move |value| value.deserialize_into::<U>().map(&expr))
    }
}
