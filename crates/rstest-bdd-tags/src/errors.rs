//! Error types raised while parsing tag expressions.
//!
//! Evaluation never fails, so every error in this crate originates from
//! turning text into an [`Expression`](crate::Expression).

use std::fmt;

use thiserror::Error;

/// Binary or unary operator keyword recognised by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// The `and` keyword.
    And,
    /// The `or` keyword.
    Or,
    /// The `not` keyword.
    Not,
}

impl Operator {
    /// Keyword spelling as it appears in expression text.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
            Self::Not => "not",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Reason a tag expression was rejected.
///
/// # Examples
/// ```
/// use rstest_bdd_tags::{Operator, TagExpressionErrorKind};
/// let kind = TagExpressionErrorKind::MissingOperand { after: Operator::And };
/// assert_eq!(kind.to_string(), "expected tag or '(' after 'and'");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagExpressionErrorKind {
    /// An operator keyword was not followed by an operand.
    #[error("expected tag or '(' after '{after}'")]
    MissingOperand {
        /// Operator that required the missing operand.
        after: Operator,
    },
    /// Input ended where an operand was required.
    #[error("expected tag or '(' but reached end of input")]
    UnexpectedEnd,
    /// A token appeared where the grammar does not allow it.
    #[error("expected {expected} but found {found}")]
    UnexpectedToken {
        /// Description of what the parser was looking for.
        expected: &'static str,
        /// Description of the token actually found.
        found: String,
    },
    /// `()` with nothing inside.
    #[error("empty parentheses")]
    EmptyGroup,
    /// A `)` without a preceding `(`.
    #[error("unmatched ')'")]
    UnmatchedCloseParen,
    /// A `(` that is never closed.
    #[error("missing ')' for '(' at byte {open}")]
    MissingCloseParen {
        /// Byte offset of the unclosed `(`.
        open: usize,
    },
    /// A backslash at the very end of the input.
    #[error("unterminated escape sequence")]
    UnterminatedEscape,
    /// A backslash followed by a character that cannot be escaped.
    #[error("illegal escape before '{0}'")]
    IllegalEscape(char),
    /// A tag consisting of nothing but its `@` or negation prefix.
    #[error("expected tag name")]
    EmptyTag,
    /// A wildcard operand that is not a valid glob pattern.
    #[error("invalid wildcard pattern `{pattern}`: {reason}")]
    InvalidPattern {
        /// Pattern text as written.
        pattern: String,
        /// Explanation reported by the glob compiler.
        reason: String,
    },
    /// A legacy `tag:N` suffix whose limit is not a number.
    #[error("invalid occurrence limit `{limit}` for tag `{tag}`")]
    InvalidLimit {
        /// Tag carrying the limit.
        tag: String,
        /// The unparsable limit text.
        limit: String,
    },
    /// Parentheses or `not` chains nested beyond the supported depth.
    #[error("expression nests deeper than {limit} levels")]
    NestingTooDeep {
        /// Maximum supported nesting depth.
        limit: usize,
    },
    /// More `and`, `or` and `not` operators than one expression may hold.
    #[error("expression has more than {limit} operators")]
    TooManyOperators {
        /// Maximum number of operators.
        limit: usize,
    },
}

/// Malformed tag expression, with the offending text and byte offset.
///
/// # Examples
/// ```
/// let err = rstest_bdd_tags::parse("@a and").unwrap_err();
/// assert_eq!(err.offset(), 6);
/// assert_eq!(
///     err.to_string(),
///     "invalid tag expression `@a and` at byte 6: expected tag or '(' after 'and'"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid tag expression `{text}` at byte {offset}: {kind}")]
pub struct TagExpressionError {
    text: String,
    offset: usize,
    kind: TagExpressionErrorKind,
}

impl TagExpressionError {
    pub(crate) fn new(text: &str, offset: usize, kind: TagExpressionErrorKind) -> Self {
        Self {
            text: text.to_owned(),
            offset,
            kind,
        }
    }

    /// Full expression text that failed to parse.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Zero-based byte offset of the offending token.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Why the expression was rejected.
    #[must_use]
    pub fn kind(&self) -> &TagExpressionErrorKind {
        &self.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_text_offset_and_reason() {
        let err = TagExpressionError::new("a or", 4, TagExpressionErrorKind::MissingOperand {
            after: Operator::Or,
        });
        assert_eq!(
            err.to_string(),
            "invalid tag expression `a or` at byte 4: expected tag or '(' after 'or'"
        );
    }

    #[test]
    fn exposes_kind_for_inspection() {
        let err = TagExpressionError::new("(a", 0, TagExpressionErrorKind::MissingCloseParen {
            open: 0,
        });
        assert_eq!(err.text(), "(a");
        assert_eq!(err.offset(), 0);
        assert_eq!(
            err.kind(),
            &TagExpressionErrorKind::MissingCloseParen { open: 0 }
        );
    }

    #[test]
    fn formats_pattern_errors() {
        let kind = TagExpressionErrorKind::InvalidPattern {
            pattern: "a[".into(),
            reason: "invalid range pattern".into(),
        };
        assert_eq!(
            kind.to_string(),
            "invalid wildcard pattern `a[`: invalid range pattern"
        );
    }
}
