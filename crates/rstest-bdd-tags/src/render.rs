//! Canonical, fully parenthesised rendering of tag expressions.
//!
//! Every `and`/`or` node is wrapped in parentheses, so the rendering never
//! depends on precedence. `not` wraps leaf operands in parentheses but not
//! binary nodes, which already carry their own. Structural characters inside
//! tags are escaped again, and a tag spelled like an operator or starting
//! with `@` gains a leading `@`, so any tree produced by parsing non-empty
//! text with the default operand factory renders to text that parses back to
//! an equivalent tree.
//!
//! Hand-built trees may have no faithful textual form: a literal containing
//! `*`, `?` or `[` parses back as a wildcard matcher, [`Expression::Always`]
//! renders as `true` which parses back as a tag, and custom predicates render
//! however they choose.

use std::fmt::{self, Write};

use crate::ast::Expression;
use crate::lexer::is_escapable;

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(tag) => write_escaped(f, tag),
            Self::Matcher(matcher) => write_escaped(f, matcher.as_str()),
            Self::And(lhs, rhs) => write!(f, "({lhs} and {rhs})"),
            Self::Or(lhs, rhs) => write!(f, "({lhs} or {rhs})"),
            Self::Not(inner) => match inner.as_ref() {
                Self::And(..) | Self::Or(..) => write!(f, "not {inner}"),
                _ => write!(f, "not ({inner})"),
            },
            Self::Always => f.write_str("true"),
            Self::Never => f.write_str("false"),
            Self::Custom(predicate) => write!(f, "{predicate}"),
        }
    }
}

fn write_escaped(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    if matches!(text, "and" | "or" | "not") || text.starts_with('@') {
        f.write_char('@')?;
    }
    for ch in text.chars() {
        if is_escapable(ch) {
            f.write_char('\\')?;
        }
        f.write_char(ch)?;
    }
    Ok(())
}
