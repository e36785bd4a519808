//! Boolean laws and rendering round trips over generated expressions.

use proptest::prelude::*;
use rstest_bdd_tags::{Expression, make_operand, parse};

const TAGS: [&str; 6] = ["a", "b", "c", "issue(7)", "two words", "ui.dark"];

fn operand() -> impl Strategy<Value = Expression> {
    prop_oneof![
        prop::sample::select(TAGS.to_vec()).prop_map(Expression::literal),
        prop::sample::select(vec!["ui.*", "?", "[ab]"]).prop_map(|pattern| {
            make_operand(pattern).unwrap_or_else(|err| panic!("compile `{pattern}`: {err}"))
        }),
    ]
}

fn expression() -> impl Strategy<Value = Expression> {
    operand().prop_recursive(5, 48, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(lhs, rhs)| Expression::and(lhs, rhs)),
            (inner.clone(), inner.clone()).prop_map(|(lhs, rhs)| Expression::or(lhs, rhs)),
            inner.prop_map(Expression::not),
        ]
    })
}

fn tag_sets() -> impl Strategy<Value = Vec<&'static str>> {
    prop::sample::subsequence(TAGS.to_vec(), 0..=TAGS.len())
}

proptest! {
    #[test]
    fn double_negation_is_identity(expr in expression(), tags in tag_sets()) {
        let doubled = Expression::not(Expression::not(expr.clone()));
        prop_assert_eq!(
            doubled.evaluate(tags.iter().copied()),
            expr.evaluate(tags.iter().copied())
        );
    }

    #[test]
    fn de_morgan_holds(lhs in expression(), rhs in expression(), tags in tag_sets()) {
        let negated_and = Expression::not(Expression::and(lhs.clone(), rhs.clone()));
        let or_of_negations = Expression::or(Expression::not(lhs), Expression::not(rhs));
        prop_assert_eq!(
            negated_and.evaluate(tags.iter().copied()),
            or_of_negations.evaluate(tags.iter().copied())
        );
    }

    #[test]
    fn empty_expression_selects_every_tag_set(tags in tag_sets()) {
        let always = parse("").unwrap_or_else(|err| panic!("parse empty: {err}"));
        prop_assert!(always.evaluate(tags.iter().copied()));
    }

    #[test]
    fn rendering_reparses_to_the_same_tree(expr in expression()) {
        let text = expr.to_string();
        let reparsed = parse(&text).unwrap_or_else(|err| panic!("reparse `{text}`: {err}"));
        prop_assert_eq!(&reparsed, &expr);
        prop_assert_eq!(reparsed.to_string(), text);
    }

    #[test]
    fn reparsed_rendering_selects_the_same_tags(expr in expression(), tags in tag_sets()) {
        let text = expr.to_string();
        let reparsed = parse(&text).unwrap_or_else(|err| panic!("reparse `{text}`: {err}"));
        prop_assert_eq!(
            reparsed.evaluate(tags.iter().copied()),
            expr.evaluate(tags.iter().copied())
        );
    }
}
