//! The match session builder and evaluator.

use std::rc::Rc;

use shape_pattern::{explain, matches, Pattern, Value};
use tracing::{debug, trace};

use crate::clause::{Clause, ClauseList, Polarity};
use crate::errors::MatchError;

type Fallback<'a, T> = Rc<dyn Fn() -> T + 'a>;

/// An immutable match session over one input value.
///
/// Built by chaining clause methods, then resolved with [`Match::evaluate`].
/// Every chaining method returns a new session and leaves `self` usable, so
/// a partly built session can be extended in several directions:
///
/// ```
/// use shape_match::{pattern, Match, Value};
///
/// let value = Value::record([("kind", Value::string("none"))]);
/// let base = Match::new(&value).with_clause(pattern!({ kind: "some" }), |_| "some");
///
/// let strict = base.clone();
/// let lenient = base.fallback(|| "none");
///
/// assert_eq!(strict.evaluate(), None);
/// assert_eq!(lenient.evaluate(), Some("none"));
/// ```
pub struct Match<'a, T> {
    value: &'a Value,
    clauses: ClauseList<'a, T>,
    fallback: Option<Fallback<'a, T>>,
}

/// Start a match session over `value`.
pub fn match_value<T>(value: &Value) -> Match<'_, T> {
    Match::new(value)
}

impl<'a, T> Match<'a, T> {
    /// A session with no clauses and no fallback.
    pub fn new(value: &'a Value) -> Self {
        Match {
            value,
            clauses: ClauseList::new(),
            fallback: None,
        }
    }

    /// The value this session matches against.
    pub fn value(&self) -> &'a Value {
        self.value
    }

    /// Number of clauses declared so far.
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.len() == 0
    }

    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    /// Declared clauses, in declaration order.
    pub fn clauses(&self) -> impl Iterator<Item = &Clause<'a, T>> {
        self.clauses.iter()
    }

    /// Add a clause that fires when the value matches `pattern`.
    #[must_use]
    pub fn with_clause<F>(&self, pattern: impl Into<Pattern>, expr: F) -> Self
    where
        F: Fn(&Value) -> T + 'a,
    {
        self.push(pattern.into(), None, Rc::new(expr), Polarity::Affirmative)
    }

    /// Add a clause that fires when the value matches `pattern` and `guard`
    /// holds.
    #[must_use]
    pub fn with_clause_when<G, F>(&self, pattern: impl Into<Pattern>, guard: G, expr: F) -> Self
    where
        G: Fn(&Value) -> bool + 'a,
        F: Fn(&Value) -> T + 'a,
    {
        self.push(
            pattern.into(),
            Some(Rc::new(guard)),
            Rc::new(expr),
            Polarity::Affirmative,
        )
    }

    /// Add a clause that fires when the value does *not* match `pattern`.
    ///
    /// The transform receives the original input value.
    #[must_use]
    pub fn with_not_clause<F>(&self, pattern: impl Into<Pattern>, expr: F) -> Self
    where
        F: Fn(&Value) -> T + 'a,
    {
        self.push(pattern.into(), None, Rc::new(expr), Polarity::Negated)
    }

    /// Add a clause that fires when `guard` holds and the value does *not*
    /// match `pattern`.
    #[must_use]
    pub fn with_not_clause_when<G, F>(
        &self,
        pattern: impl Into<Pattern>,
        guard: G,
        expr: F,
    ) -> Self
    where
        G: Fn(&Value) -> bool + 'a,
        F: Fn(&Value) -> T + 'a,
    {
        self.push(
            pattern.into(),
            Some(Rc::new(guard)),
            Rc::new(expr),
            Polarity::Negated,
        )
    }

    /// Set the producer used when no clause fires.
    ///
    /// There is one fallback slot: a later call replaces an earlier one.
    #[must_use]
    pub fn fallback<F>(&self, expr: F) -> Self
    where
        F: Fn() -> T + 'a,
    {
        Match {
            value: self.value,
            clauses: self.clauses.clone(),
            fallback: Some(Rc::new(expr)),
        }
    }

    fn push(
        &self,
        pattern: Pattern,
        guard: Option<crate::clause::Guard<'a>>,
        transform: crate::clause::Transform<'a, T>,
        polarity: Polarity,
    ) -> Self {
        Match {
            value: self.value,
            clauses: self
                .clauses
                .push(Clause::new(pattern, guard, transform, polarity)),
            fallback: self.fallback.clone(),
        }
    }

    /// Resolve the session.
    ///
    /// Clauses are tried in declaration order. A clause's guard runs first,
    /// for negated clauses too, and a failing guard skips the clause. An
    /// affirmative clause then fires if the value matches its pattern, a
    /// negated one if it does not. The first clause to fire has its transform
    /// applied to the value and the result returned; later clauses are not
    /// looked at.
    ///
    /// If nothing fires the fallback's result is returned, or `None` when no
    /// fallback was set. Evaluation mutates nothing and may be repeated.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(clauses = self.clauses.len(), value = self.value.type_name())
    )]
    pub fn evaluate(&self) -> Option<T> {
        if let Some((index, clause)) = self.select() {
            debug!(index, clause = %clause, "clause fired");
            return Some(clause.apply(self.value));
        }
        match &self.fallback {
            Some(fallback) => {
                debug!("no clause fired, using fallback");
                Some(fallback())
            }
            None => {
                debug!("no clause fired and no fallback is set");
                None
            }
        }
    }

    /// Resolve the session, treating "nothing fired and no fallback" as an
    /// error rather than `None`.
    pub fn try_evaluate(&self) -> Result<T, MatchError> {
        self.evaluate().ok_or(MatchError::NonExhaustive {
            value_kind: self.value.type_name(),
            clauses: self.clauses.len(),
        })
    }

    /// Resolve the session, substituting `default` for `None`.
    pub fn evaluate_or(&self, default: T) -> T {
        self.evaluate().unwrap_or(default)
    }

    /// Resolve the session, computing a substitute for `None`.
    pub fn evaluate_or_else(&self, default: impl FnOnce() -> T) -> T {
        self.evaluate().unwrap_or_else(default)
    }

    /// The first clause that fires, with its declaration index.
    fn select(&self) -> Option<(usize, &Clause<'a, T>)> {
        for (index, clause) in self.clauses.iter().enumerate() {
            if !clause.guard_passes(self.value) {
                trace!(index, "guard rejected clause");
                continue;
            }
            let matched = matches(self.value, clause.pattern());
            if clause.polarity().fires(matched) {
                return Some((index, clause));
            }
            if tracing::enabled!(tracing::Level::TRACE) {
                let polarity = clause.polarity();
                match explain(self.value, clause.pattern()) {
                    Some(mismatch) => trace!(index, %polarity, %mismatch, "clause skipped"),
                    None => trace!(index, %polarity, matched, "clause skipped"),
                }
            }
        }
        None
    }
}

impl<T> Clone for Match<'_, T> {
    fn clone(&self) -> Self {
        Match {
            value: self.value,
            clauses: self.clauses.clone(),
            fallback: self.fallback.clone(),
        }
    }
}

impl<T> std::fmt::Debug for Match<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Match")
            .field("value", self.value)
            .field("clauses", &self.clauses.iter().collect::<Vec<_>>())
            .field("has_fallback", &self.has_fallback())
            .finish()
    }
}
