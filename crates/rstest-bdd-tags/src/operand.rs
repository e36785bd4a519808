//! Operand construction for tag words.
//!
//! Every tag word the parser meets is handed to an [`OperandFactory`]. The
//! default factory produces an exact [`Expression::Literal`] unless the word
//! contains a glob wildcard (`*`, `?` or `[`), in which case it produces an
//! [`Expression::Matcher`]. Callers needing other operand kinds supply their
//! own factory, typically returning [`Expression::Custom`].

use std::fmt;
use std::sync::Arc;

use glob::{MatchOptions, Pattern};

use crate::ast::Expression;
use crate::errors::TagExpressionErrorKind;
use crate::sets::TagSet;

const WILDCARD_CHARS: [char; 3] = ['*', '?', '['];

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// Custom operand evaluated against a candidate's tags.
///
/// `Display` is used when the surrounding expression is rendered.
pub trait TagPredicate: fmt::Debug + fmt::Display + Send + Sync {
    /// Whether the predicate holds for `tags`.
    fn matches(&self, tags: &TagSet<'_>) -> bool;
}

/// Case-sensitive glob pattern matched against individual tags.
///
/// `*` matches any run of characters (including `/` and leading dots), `?`
/// matches exactly one character and `[...]` is a character class.
///
/// # Examples
/// ```
/// use rstest_bdd_tags::GlobMatcher;
/// let matcher = GlobMatcher::new("a.*").unwrap();
/// assert!(matcher.matches_tag("a.bar"));
/// assert!(!matcher.matches_tag("a_bar"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlobMatcher {
    source: String,
    pattern: Pattern,
}

impl GlobMatcher {
    /// Compile `source` into a matcher.
    ///
    /// Runs of `*` are equivalent to a single `*`.
    ///
    /// # Errors
    ///
    /// Returns [`TagExpressionErrorKind::InvalidPattern`] when the pattern is
    /// malformed, for example an unclosed `[`.
    pub fn new(source: &str) -> Result<Self, TagExpressionErrorKind> {
        let pattern = Pattern::new(&collapse_stars(source)).map_err(|err| {
            TagExpressionErrorKind::InvalidPattern {
                pattern: source.to_string(),
                reason: err.msg.to_string(),
            }
        })?;
        Ok(Self {
            source: source.to_string(),
            pattern,
        })
    }

    /// Pattern text as written in the expression.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether a single tag matches the pattern.
    #[must_use]
    pub fn matches_tag(&self, tag: &str) -> bool {
        self.pattern.matches_with(tag, MATCH_OPTIONS)
    }
}

// The glob compiler rejects `**` outside a whole path component, while
// tags have no path structure.
fn collapse_stars(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    for ch in source.chars() {
        if ch == '*' && out.ends_with('*') {
            continue;
        }
        out.push(ch);
    }
    out
}

/// Whether `text` contains a glob wildcard character.
#[must_use]
pub fn has_wildcard(text: &str) -> bool {
    text.contains(WILDCARD_CHARS)
}

/// Default operand construction: wildcard text becomes a
/// [`GlobMatcher`], anything else an exact literal.
///
/// # Errors
///
/// Returns [`TagExpressionErrorKind::InvalidPattern`] for malformed wildcard
/// patterns.
pub fn make_operand(text: &str) -> Result<Expression, TagExpressionErrorKind> {
    if has_wildcard(text) {
        GlobMatcher::new(text).map(Expression::Matcher)
    } else {
        Ok(Expression::Literal(text.to_string()))
    }
}

type OperandFn = dyn Fn(&str) -> Result<Expression, TagExpressionErrorKind> + Send + Sync;

/// Strategy turning tag words into operand nodes.
///
/// The text passed to the strategy has escapes resolved and its leading `@`
/// removed.
///
/// # Examples
/// ```
/// use rstest_bdd_tags::{Expression, OperandFactory, TagExpressionParser};
///
/// // Treat every tag literally, even when it contains `*`.
/// let factory = OperandFactory::new(|text| Ok(Expression::Literal(text.to_string())));
/// let parser = TagExpressionParser::new().with_operand_factory(factory);
/// let expr = parser.parse("@a*").unwrap();
/// assert!(expr.evaluate(["a*"]));
/// assert!(!expr.evaluate(["abc"]));
/// ```
#[derive(Clone)]
pub struct OperandFactory(Arc<OperandFn>);

impl OperandFactory {
    /// Wrap a closure as an operand factory.
    pub fn new<F>(make: F) -> Self
    where
        F: Fn(&str) -> Result<Expression, TagExpressionErrorKind> + Send + Sync + 'static,
    {
        Self(Arc::new(make))
    }

    pub(crate) fn make(&self, text: &str) -> Result<Expression, TagExpressionErrorKind> {
        (self.0)(text)
    }
}

impl Default for OperandFactory {
    fn default() -> Self {
        Self::new(make_operand)
    }
}

impl fmt::Debug for OperandFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OperandFactory(..)")
    }
}
