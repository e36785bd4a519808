//! Selection between the boolean tag-expression dialect and the legacy
//! comma-list dialect.
//!
//! Detection is heuristic. A lone tag with a `-` or `~` prefix reads as a
//! legacy negation even though the boolean dialect would accept it as a tag
//! named `-tag`, so detection only runs when a caller opts into
//! [`Dialect::Auto`].

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::legacy::split_limit;
use crate::operand::has_wildcard;

/// Tag-expression dialect accepted by a
/// [`TagExpressionParser`](crate::TagExpressionParser).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dialect {
    /// Boolean expressions with `and`, `or`, `not` and parentheses.
    #[default]
    Current,
    /// Comma-separated OR-terms, `-`/`~` negation, whitespace-separated
    /// AND-clauses and optional `:N` limits.
    Legacy,
    /// Decide per expression with [`detect_dialect`].
    Auto,
}

impl Dialect {
    /// Resolve [`Dialect::Auto`] against `text`; other dialects are returned
    /// unchanged.
    #[must_use]
    pub fn resolve(self, text: &str) -> Self {
        match self {
            Self::Auto => detect_dialect(text),
            other => other,
        }
    }

    /// Canonical lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Legacy => "legacy",
            Self::Auto => "auto",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown dialect name passed to [`Dialect::from_str`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown tag-expression dialect '{0}', expected one of: current, legacy, auto")]
pub struct UnknownDialect(String);

impl FromStr for Dialect {
    type Err = UnknownDialect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "current" | "v2" => Ok(Self::Current),
            "legacy" | "v1" => Ok(Self::Legacy),
            "auto" => Ok(Self::Auto),
            _ => Err(UnknownDialect(s.to_string())),
        }
    }
}

/// Guess which dialect `text` is written in. Never returns
/// [`Dialect::Auto`].
///
/// # Examples
/// ```
/// use rstest_bdd_tags::{Dialect, detect_dialect};
/// assert_eq!(detect_dialect("not @wip"), Dialect::Current);
/// assert_eq!(detect_dialect("@a,@b"), Dialect::Legacy);
/// assert_eq!(detect_dialect("@a"), Dialect::Current);
/// ```
#[must_use]
pub fn detect_dialect(text: &str) -> Dialect {
    let words: Vec<&str> = text.split_whitespace().collect();
    let boolean_markers = words
        .iter()
        .any(|word| matches!(*word, "and" | "or" | "not"))
        || text.contains(['(', ')'])
        || has_wildcard(text);
    if boolean_markers {
        return Dialect::Current;
    }

    let legacy_markers = words.len() > 1
        || words.iter().any(|word| {
            word.contains(',') || word.starts_with(['-', '~']) || has_limit_suffix(word)
        });
    if legacy_markers {
        Dialect::Legacy
    } else {
        Dialect::Current
    }
}

fn has_limit_suffix(word: &str) -> bool {
    split_limit(word).is_some()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("", Dialect::Current)]
    #[case("@a", Dialect::Current)]
    #[case("not @wip", Dialect::Current)]
    #[case("@a and @b", Dialect::Current)]
    #[case("(@a)", Dialect::Current)]
    #[case("@smoke.*", Dialect::Current)]
    #[case("-@wip", Dialect::Legacy)]
    #[case("~@wip", Dialect::Legacy)]
    #[case("@a,@b", Dialect::Legacy)]
    #[case("@a @b", Dialect::Legacy)]
    #[case("@wip:3", Dialect::Legacy)]
    #[case("@ns:name", Dialect::Current)]
    fn detects_dialect(#[case] text: &str, #[case] expected: Dialect) {
        assert_eq!(detect_dialect(text), expected);
    }

    #[test]
    fn only_auto_is_resolved() {
        assert_eq!(Dialect::Current.resolve("-@wip"), Dialect::Current);
        assert_eq!(Dialect::Legacy.resolve("not @a"), Dialect::Legacy);
        assert_eq!(Dialect::Auto.resolve("-@wip"), Dialect::Legacy);
    }

    #[rstest]
    #[case("current", Dialect::Current)]
    #[case("V2", Dialect::Current)]
    #[case("legacy", Dialect::Legacy)]
    #[case("v1", Dialect::Legacy)]
    #[case(" Auto ", Dialect::Auto)]
    fn parses_dialect_names(#[case] name: &str, #[case] expected: Dialect) {
        assert_eq!(name.parse::<Dialect>().ok(), Some(expected));
    }

    #[test]
    fn rejects_unknown_dialect_names() {
        let Err(err) = "v3".parse::<Dialect>() else {
            panic!("expected unknown dialect");
        };
        assert!(err.to_string().contains("unknown tag-expression dialect 'v3'"));
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for dialect in [Dialect::Current, Dialect::Legacy, Dialect::Auto] {
            assert_eq!(dialect.to_string().parse::<Dialect>().ok(), Some(dialect));
        }
    }
}
