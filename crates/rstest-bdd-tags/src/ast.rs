//! Abstract syntax tree and evaluation for tag expressions.
//!
//! Tag expressions recognise tags (`@tag`), unary `not`, binary `and` and
//! `or`, and parentheses for grouping. Precedence follows Gherkin
//! conventions: `not` binds tighter than `and`, which in turn binds tighter
//! than `or`. Operators associate to the left, so `a and b and c` is stored
//! as `((a and b) and c)`.
//!
//! Trees are immutable once built. Evaluation is a pure function of the tree
//! and the candidate tag set and applies short-circuit semantics, so a single
//! tree may be shared freely between threads.

use std::sync::Arc;

use crate::operand::{GlobMatcher, TagPredicate};
use crate::sets::{TagSet, normalise_tag};

/// Parsed representation of a tag expression.
#[derive(Clone, Debug)]
pub enum Expression {
    /// True when the exact tag is present.
    Literal(String),
    /// True when any tag matches the wildcard pattern.
    Matcher(GlobMatcher),
    /// True when both operands are true.
    And(Box<Expression>, Box<Expression>),
    /// True when either operand is true.
    Or(Box<Expression>, Box<Expression>),
    /// True when the operand is false.
    Not(Box<Expression>),
    /// The empty expression; selects everything.
    Always,
    /// Selects nothing.
    Never,
    /// Operand produced by a custom [`OperandFactory`](crate::OperandFactory).
    Custom(Arc<dyn TagPredicate>),
}

impl Expression {
    /// Leaf matching one exact tag. A leading `@` is dropped.
    ///
    /// # Examples
    /// ```
    /// use rstest_bdd_tags::Expression;
    /// let expr = Expression::literal("@smoke");
    /// assert!(expr.evaluate(["smoke"]));
    /// ```
    #[must_use]
    pub fn literal(tag: &str) -> Self {
        Self::Literal(normalise_tag(tag).to_string())
    }

    /// Conjunction of `lhs` and `rhs`.
    #[must_use]
    pub fn and(lhs: Self, rhs: Self) -> Self {
        Self::And(Box::new(lhs), Box::new(rhs))
    }

    /// Disjunction of `lhs` and `rhs`.
    #[must_use]
    pub fn or(lhs: Self, rhs: Self) -> Self {
        Self::Or(Box::new(lhs), Box::new(rhs))
    }

    /// Negation of `operand`.
    #[must_use]
    pub fn not(operand: Self) -> Self {
        Self::Not(Box::new(operand))
    }

    /// Whether this is the empty, select-everything expression.
    #[must_use]
    pub fn is_always(&self) -> bool {
        matches!(self, Self::Always)
    }

    /// Evaluate the expression against the tags of one candidate.
    ///
    /// Tags may be given with or without their leading `@`.
    ///
    /// # Examples
    /// ```
    /// let expr = rstest_bdd_tags::parse("@a and not @b").unwrap();
    /// assert!(expr.evaluate(["@a"]));
    /// assert!(!expr.evaluate(["a", "b"]));
    /// ```
    #[must_use]
    pub fn evaluate<'a, I>(&self, tags: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.matches(&TagSet::new(tags))
    }

    /// Evaluate the expression against a prebuilt tag set.
    #[must_use]
    pub fn matches(&self, tags: &TagSet<'_>) -> bool {
        match self {
            Self::Literal(tag) => tags.contains(tag),
            Self::Matcher(matcher) => tags.iter().any(|tag| matcher.matches_tag(tag)),
            Self::And(lhs, rhs) => lhs.matches(tags) && rhs.matches(tags),
            Self::Or(lhs, rhs) => lhs.matches(tags) || rhs.matches(tags),
            Self::Not(inner) => !inner.matches(tags),
            Self::Always => true,
            Self::Never => false,
            Self::Custom(predicate) => predicate.matches(tags),
        }
    }
}

impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Literal(a), Self::Literal(b)) => a == b,
            (Self::Matcher(a), Self::Matcher(b)) => a == b,
            (Self::And(la, ra), Self::And(lb, rb)) | (Self::Or(la, ra), Self::Or(lb, rb)) => {
                la == lb && ra == rb
            }
            (Self::Not(a), Self::Not(b)) => a == b,
            (Self::Always, Self::Always) | (Self::Never, Self::Never) => true,
            (Self::Custom(a), Self::Custom(b)) => {
                std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
            }
            _ => false,
        }
    }
}

impl std::ops::Not for Expression {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self::Not(Box::new(self))
    }
}
