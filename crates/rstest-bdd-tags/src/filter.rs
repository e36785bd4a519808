//! Scenario selection from one or more tag expressions.
//!
//! Runners accept `--tags` several times; each value is parsed on its own
//! and a candidate is selected only when every expression holds.

use crate::ast::Expression;
use crate::errors::TagExpressionError;
use crate::parser::TagExpressionParser;
use crate::sets::TagSet;

/// Conjunction of independently parsed tag expressions.
///
/// # Examples
/// ```
/// use rstest_bdd_tags::{TagExpressionParser, TagFilter};
///
/// let filter = TagFilter::from_args(&TagExpressionParser::new(), ["@a", "not @b"])?;
/// assert!(filter.is_selected(["a"]));
/// assert!(!filter.is_selected(["a", "b"]));
/// # Ok::<(), rstest_bdd_tags::TagExpressionError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TagFilter {
    expressions: Vec<Expression>,
}

impl TagFilter {
    /// Filter that selects everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse each argument with `parser` and combine the results.
    ///
    /// # Errors
    ///
    /// Returns the first [`TagExpressionError`] encountered.
    pub fn from_args<I, S>(parser: &TagExpressionParser, args: I) -> Result<Self, TagExpressionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut filter = Self::new();
        for arg in args {
            filter.push(parser.parse(arg.as_ref())?);
        }
        Ok(filter)
    }

    /// Add another expression every candidate must satisfy.
    ///
    /// Empty expressions are dropped since they constrain nothing.
    pub fn push(&mut self, expression: Expression) {
        if !expression.is_always() {
            self.expressions.push(expression);
        }
    }

    /// Whether the filter constrains nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }

    /// Individual expressions in the order they were added.
    #[must_use]
    pub fn expressions(&self) -> &[Expression] {
        &self.expressions
    }

    /// Single expression equivalent to the filter.
    #[must_use]
    pub fn expression(&self) -> Expression {
        self.expressions
            .iter()
            .cloned()
            .reduce(Expression::and)
            .unwrap_or(Expression::Always)
    }

    /// Whether a candidate with `tags` passes every expression.
    #[must_use]
    pub fn is_selected<'a, I>(&self, tags: I) -> bool
    where
        I: IntoIterator<Item = &'a str>,
    {
        let tags = TagSet::new(tags);
        self.expressions.iter().all(|expr| expr.matches(&tags))
    }

    /// Keep the items whose tags pass the filter, preserving order.
    #[must_use]
    pub fn select<'t, T, F, I>(&self, items: &'t [T], tags_of: F) -> Vec<&'t T>
    where
        F: Fn(&'t T) -> I,
        I: IntoIterator<Item = &'t str>,
    {
        items
            .iter()
            .filter(|item| {
                let tags = TagSet::new(tags_of(*item));
                let selected = self.expressions.iter().all(|expr| expr.matches(&tags));
                if !selected {
                    log::debug!("tag filter rejected candidate with tags {tags:?}");
                }
                selected
            })
            .collect()
    }
}

impl FromIterator<Expression> for TagFilter {
    fn from_iter<I: IntoIterator<Item = Expression>>(iter: I) -> Self {
        let mut filter = Self::new();
        for expression in iter {
            filter.push(expression);
        }
        filter
    }
}
