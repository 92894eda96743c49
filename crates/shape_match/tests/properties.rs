//! Property-based tests for clause selection and the structural matcher.
//!
//! Values and patterns are drawn from small shared pools of keys, strings
//! and numbers so that generated patterns match generated values often
//! enough to exercise both outcomes of every check.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

mod common;

use proptest::prelude::*;
use shape_match::{explain, matches, Literal, Match, Pattern, Value};

// -- Strategies --

const KEYS: &[&str] = &["kind", "value", "id", "0", "1"];
const WORDS: &[&str] = &["", "some", "none", "err"];

fn arb_key() -> impl Strategy<Value = &'static str> {
    prop::sample::select(KEYS)
}

fn arb_number() -> impl Strategy<Value = f64> {
    prop_oneof![
        4 => (-2i32..3).prop_map(f64::from),
        1 => Just(0.5),
        1 => Just(f64::NAN),
    ]
}

fn arb_leaf_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        arb_number().prop_map(Value::number),
        prop::sample::select(WORDS).prop_map(Value::from),
    ]
}

fn arb_value() -> impl Strategy<Value = Value> {
    arb_leaf_value().prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::list),
            prop::collection::vec((arb_key(), inner), 0..4).prop_map(Value::record),
        ]
    })
}

fn arb_literal() -> impl Strategy<Value = Literal> {
    prop_oneof![
        Just(Literal::Null),
        any::<bool>().prop_map(Literal::Bool),
        arb_number().prop_map(Literal::Number),
        prop::sample::select(WORDS).prop_map(Literal::from),
    ]
}

fn arb_leaf_pattern() -> impl Strategy<Value = Pattern> {
    prop_oneof![
        3 => arb_literal().prop_map(Pattern::Literal),
        1 => Just(Pattern::AnyString),
        1 => Just(Pattern::AnyNumber),
        1 => Just(Pattern::AnyBoolean),
        1 => Just(Pattern::Undefined),
    ]
}

fn arb_pattern() -> impl Strategy<Value = Pattern> {
    arb_leaf_pattern().prop_recursive(4, 24, 3, |inner| {
        prop_oneof![
            inner.clone().prop_map(Pattern::sequence),
            prop::collection::vec((arb_key(), inner), 0..3).prop_map(Pattern::object),
        ]
    })
}

// -- Properties --

proptest! {
    #[test]
    fn negated_clause_fires_iff_pattern_misses(value in arb_value(), pattern in arb_pattern()) {
        common::init_tracing();
        let fired = Match::new(&value)
            .with_not_clause(pattern.clone(), |_| true)
            .evaluate_or(false);
        prop_assert_eq!(fired, !matches(&value, &pattern));
    }

    #[test]
    fn exactly_one_polarity_fires(value in arb_value(), pattern in arb_pattern()) {
        common::init_tracing();
        let session = Match::new(&value)
            .with_clause(pattern.clone(), |_| "affirmative")
            .with_not_clause(pattern.clone(), |_| "negated");
        let expected = if matches(&value, &pattern) { "affirmative" } else { "negated" };
        prop_assert_eq!(session.evaluate(), Some(expected));

        let reversed = Match::new(&value)
            .with_not_clause(pattern.clone(), |_| "negated")
            .with_clause(pattern, |_| "affirmative");
        prop_assert_eq!(reversed.evaluate(), Some(expected));
    }

    #[test]
    fn first_matching_clause_wins(
        value in arb_value(),
        first in arb_pattern(),
        second in arb_pattern()
    ) {
        common::init_tracing();
        let expected = if matches(&value, &first) {
            Some(1)
        } else if matches(&value, &second) {
            Some(2)
        } else {
            None
        };
        let result = Match::new(&value)
            .with_clause(first, |_| 1)
            .with_clause(second, |_| 2)
            .evaluate();
        prop_assert_eq!(result, expected);
    }

    #[test]
    fn evaluation_is_repeatable(value in arb_value(), patterns in prop::collection::vec(arb_pattern(), 0..4)) {
        common::init_tracing();
        let session = patterns
            .into_iter()
            .enumerate()
            .fold(Match::new(&value).fallback(|| usize::MAX), |session, (i, pattern)| {
                session.with_clause(pattern, move |_| i)
            });
        prop_assert_eq!(session.evaluate(), session.evaluate());
    }

    #[test]
    fn empty_sequence_matches_any_sequence_pattern(element in arb_pattern()) {
        let empty = Value::list(Vec::new());
        prop_assert!(matches(&empty, &Pattern::sequence(element)));
    }

    #[test]
    fn empty_object_pattern_matches_containers(value in arb_value()) {
        let container = matches!(value, Value::List(_) | Value::Record(_));
        prop_assert_eq!(matches(&value, &Pattern::Object(Vec::new())), container);
    }

    #[test]
    fn nan_matches_nothing(pattern in arb_pattern()) {
        prop_assert!(!matches(&Value::number(f64::NAN), &pattern));
    }

    #[test]
    fn explain_agrees_with_matches(value in arb_value(), pattern in arb_pattern()) {
        prop_assert_eq!(explain(&value, &pattern).is_none(), matches(&value, &pattern));
    }

    #[test]
    fn template_of_primitive_matches_itself(value in arb_leaf_value()) {
        let pattern = Pattern::from_template(&value).unwrap();
        let is_nan = value.as_number().is_some_and(f64::is_nan);
        prop_assert_eq!(matches(&value, &pattern), !is_nan);
    }
}
