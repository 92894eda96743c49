//! Clauses and the persistent clause list.

use std::fmt;
use std::rc::Rc;

use shape_pattern::{Pattern, Value};
use smallvec::SmallVec;

/// Guard predicate over the input value.
pub(crate) type Guard<'a> = Rc<dyn Fn(&Value) -> bool + 'a>;

/// Transform from the input value to the match result.
pub(crate) type Transform<'a, T> = Rc<dyn Fn(&Value) -> T + 'a>;

/// Whether a clause fires on a structural match or on a mismatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Polarity {
    /// Fires when the value matches the pattern.
    Affirmative,
    /// Fires when the value does not match the pattern.
    Negated,
}

impl Polarity {
    /// Whether a clause of this polarity fires given the matcher's verdict.
    #[inline]
    pub fn fires(self, matched: bool) -> bool {
        match self {
            Polarity::Affirmative => matched,
            Polarity::Negated => !matched,
        }
    }
}

impl fmt::Display for Polarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Polarity::Affirmative => write!(f, "with"),
            Polarity::Negated => write!(f, "with not"),
        }
    }
}

/// One `(pattern, guard, transform, polarity)` unit of a match session.
///
/// Clauses are immutable once built.
pub struct Clause<'a, T> {
    pattern: Pattern,
    /// `None` is the always-true guard.
    guard: Option<Guard<'a>>,
    transform: Transform<'a, T>,
    polarity: Polarity,
}

impl<'a, T> Clause<'a, T> {
    pub(crate) fn new(
        pattern: Pattern,
        guard: Option<Guard<'a>>,
        transform: Transform<'a, T>,
        polarity: Polarity,
    ) -> Self {
        Clause {
            pattern,
            guard,
            transform,
            polarity,
        }
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Whether the clause carries an explicit guard.
    pub fn is_guarded(&self) -> bool {
        self.guard.is_some()
    }

    pub(crate) fn guard_passes(&self, value: &Value) -> bool {
        match &self.guard {
            Some(guard) => guard(value),
            None => true,
        }
    }

    pub(crate) fn apply(&self, value: &Value) -> T {
        (self.transform)(value)
    }
}

impl<T> fmt::Debug for Clause<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Clause")
            .field("pattern", &self.pattern)
            .field("guarded", &self.is_guarded())
            .field("polarity", &self.polarity)
            .finish_non_exhaustive()
    }
}

impl<T> fmt::Display for Clause<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.polarity, self.pattern)?;
        if self.is_guarded() {
            write!(f, " when ..")?;
        }
        Ok(())
    }
}

struct ClauseNode<'a, T> {
    clause: Clause<'a, T>,
    prev: Option<Rc<ClauseNode<'a, T>>>,
}

/// Append-only clause list with structural sharing.
///
/// Stored newest-first as a singly linked list of `Rc` nodes, so appending
/// allocates one node and leaves every existing list untouched. Two lists
/// extended from the same prefix share that prefix.
pub(crate) struct ClauseList<'a, T> {
    last: Option<Rc<ClauseNode<'a, T>>>,
    len: usize,
}

impl<'a, T> ClauseList<'a, T> {
    pub(crate) fn new() -> Self {
        ClauseList { last: None, len: 0 }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// A new list with `clause` after every clause of `self`.
    #[must_use]
    pub(crate) fn push(&self, clause: Clause<'a, T>) -> Self {
        ClauseList {
            last: Some(Rc::new(ClauseNode {
                clause,
                prev: self.last.clone(),
            })),
            len: self.len + 1,
        }
    }

    /// Clauses in declaration order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &Clause<'a, T>> {
        let mut newest_first: SmallVec<[&Clause<'a, T>; 8]> = SmallVec::with_capacity(self.len);
        let mut node = self.last.as_deref();
        while let Some(current) = node {
            newest_first.push(&current.clause);
            node = current.prev.as_deref();
        }
        newest_first.into_iter().rev()
    }
}

impl<T> Clone for ClauseList<'_, T> {
    fn clone(&self) -> Self {
        ClauseList {
            last: self.last.clone(),
            len: self.len,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn clause(tag: u32) -> Clause<'static, u32> {
        Clause::new(
            Pattern::literal(tag),
            None,
            Rc::new(move |_: &Value| tag),
            Polarity::Affirmative,
        )
    }

    fn tags(list: &ClauseList<'_, u32>) -> Vec<u32> {
        list.iter().map(|c| c.apply(&Value::Null)).collect()
    }

    #[test]
    fn test_push_preserves_declaration_order() {
        let list = ClauseList::new().push(clause(1)).push(clause(2)).push(clause(3));
        assert_eq!(list.len(), 3);
        assert_eq!(tags(&list), vec![1, 2, 3]);
    }

    #[test]
    fn test_branches_do_not_see_each_other() {
        let prefix = ClauseList::new().push(clause(1));
        let left = prefix.push(clause(2));
        let right = prefix.push(clause(3));
        assert_eq!(tags(&prefix), vec![1]);
        assert_eq!(tags(&left), vec![1, 2]);
        assert_eq!(tags(&right), vec![1, 3]);
    }

    #[test]
    fn test_iter_past_inline_capacity() {
        let list = (0..20).fold(ClauseList::new(), |list, tag| list.push(clause(tag)));
        assert_eq!(tags(&list), (0..20).collect::<Vec<u32>>());
    }

    #[test]
    fn test_polarity_fires() {
        assert!(Polarity::Affirmative.fires(true));
        assert!(!Polarity::Affirmative.fires(false));
        assert!(Polarity::Negated.fires(false));
        assert!(!Polarity::Negated.fires(true));
    }

    #[test]
    fn test_clause_display() {
        let guarded: Clause<'static, u32> = Clause::new(
            Pattern::AnyString,
            Some(Rc::new(|_: &Value| true)),
            Rc::new(|_: &Value| 0),
            Polarity::Negated,
        );
        assert_eq!(guarded.to_string(), "with not String when ..");
        assert_eq!(clause(7).to_string(), "with 7");
    }
}
