//! Adapter for the legacy comma-list tag dialect.
//!
//! Each entry is an AND-clause made of comma-separated OR-terms. A term
//! prefixed with `-` or `~` is negated, and whitespace inside an entry starts
//! another AND-clause. `@smoke,~@wip @fast` therefore means
//! `(smoke or not wip) and fast`.
//!
//! A term may carry a `:N` suffix limiting how often the tag may occur in a
//! run. Only an all-digit suffix is a limit, so `@ns:name` is the tag
//! `ns:name`. Limits are recorded in [`LegacyTagExpression::limits`] and play no
//! part in evaluation.

use std::collections::BTreeMap;

use crate::ast::Expression;
use crate::errors::{TagExpressionError, TagExpressionErrorKind};
use crate::operand::OperandFactory;
use crate::parser::MAX_OPERATORS;

/// Result of translating legacy entries into a boolean expression.
#[derive(Clone, Debug, PartialEq)]
pub struct LegacyTagExpression {
    /// Equivalent boolean expression.
    pub expression: Expression,
    /// Occurrence limits keyed by tag name; the last limit for a tag wins.
    pub limits: BTreeMap<String, usize>,
}

/// Translate legacy entries with the default operand factory.
///
/// # Errors
///
/// Returns [`TagExpressionError`] when a term has no tag name, a limit does
/// not fit in `usize`, or the entries hold more than
/// [`MAX_OPERATORS`](crate::MAX_OPERATORS) operators.
///
/// # Examples
/// ```
/// let legacy = rstest_bdd_tags::parse_legacy(["@a,~@b", "@c:2"])?;
/// assert_eq!(legacy.expression.to_string(), "((a or not (b)) and c)");
/// assert_eq!(legacy.limits.get("c"), Some(&2));
/// # Ok::<(), rstest_bdd_tags::TagExpressionError>(())
/// ```
pub fn parse_legacy<I, S>(entries: I) -> Result<LegacyTagExpression, TagExpressionError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parse_entries(entries, &OperandFactory::default())
}

pub(crate) fn parse_entries<I, S>(
    entries: I,
    make_operand: &OperandFactory,
) -> Result<LegacyTagExpression, TagExpressionError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let entries: Vec<S> = entries.into_iter().collect();
    let text = entries
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join(" ");
    let mut translator = Translator {
        text: &text,
        make_operand,
        limits: BTreeMap::new(),
        terms: 0,
        operators: 0,
    };

    let mut clauses = Vec::new();
    for (offset, clause) in split_with_offsets(&text, char::is_whitespace) {
        clauses.extend(translator.clause(offset, clause)?);
    }

    let expression = clauses
        .into_iter()
        .reduce(Expression::and)
        .unwrap_or(Expression::Always);
    log::warn!("legacy tag expression `{text}` is deprecated; use `{expression}` instead");
    Ok(LegacyTagExpression {
        expression,
        limits: translator.limits,
    })
}

struct Translator<'a> {
    text: &'a str,
    make_operand: &'a OperandFactory,
    limits: BTreeMap<String, usize>,
    terms: usize,
    operators: usize,
}

impl Translator<'_> {
    fn clause(
        &mut self,
        start: usize,
        clause: &str,
    ) -> Result<Option<Expression>, TagExpressionError> {
        let mut terms = Vec::new();
        for (offset, term) in split_with_offsets(clause, |ch| ch == ',') {
            terms.push(self.term(start + offset, term)?);
        }
        Ok(terms.into_iter().reduce(Expression::or))
    }

    fn term(&mut self, offset: usize, term: &str) -> Result<Expression, TagExpressionError> {
        let unprefixed = term.strip_prefix(['-', '~']);
        let negated = unprefixed.is_some();
        let rest = unprefixed.unwrap_or(term);
        let rest = rest.strip_prefix('@').unwrap_or(rest);
        let (tag, limit) =
            split_limit(rest).map_or((rest, None), |(tag, limit)| (tag, Some(limit)));
        if tag.is_empty() {
            return Err(self.error(offset, TagExpressionErrorKind::EmptyTag));
        }
        self.count_operators(offset, negated)?;
        if let Some(limit) = limit {
            let parsed = limit.parse::<usize>().map_err(|_| {
                self.error(offset, TagExpressionErrorKind::InvalidLimit {
                    tag: tag.to_string(),
                    limit: limit.to_string(),
                })
            })?;
            self.limits.insert(tag.to_string(), parsed);
        }

        let operand = self
            .make_operand
            .make(tag)
            .map_err(|kind| self.error(offset, kind))?;
        Ok(if negated {
            Expression::not(operand)
        } else {
            operand
        })
    }

    // Every term after the first joins the tree with `and` or `or`.
    fn count_operators(&mut self, offset: usize, negated: bool) -> Result<(), TagExpressionError> {
        self.operators += usize::from(negated) + usize::from(self.terms > 0);
        self.terms += 1;
        if self.operators > MAX_OPERATORS {
            return Err(self.error(offset, TagExpressionErrorKind::TooManyOperators {
                limit: MAX_OPERATORS,
            }));
        }
        Ok(())
    }

    fn error(&self, offset: usize, kind: TagExpressionErrorKind) -> TagExpressionError {
        TagExpressionError::new(self.text, offset, kind)
    }
}

/// Split a `tag:N` term into tag and limit text. Only an all-digit suffix is
/// a limit; any other colon belongs to the tag.
pub(crate) fn split_limit(term: &str) -> Option<(&str, &str)> {
    term.rsplit_once(':')
        .filter(|(_, limit)| !limit.is_empty() && limit.bytes().all(|b| b.is_ascii_digit()))
}

fn split_with_offsets(text: &str, is_separator: impl Fn(char) -> bool) -> Vec<(usize, &str)> {
    let mut pieces = Vec::new();
    let mut start = 0;
    for (idx, ch) in text.char_indices() {
        if is_separator(ch) {
            if let Some(piece) = text.get(start..idx).filter(|piece| !piece.is_empty()) {
                pieces.push((start, piece));
            }
            start = idx + ch.len_utf8();
        }
    }
    if let Some(piece) = text.get(start..).filter(|piece| !piece.is_empty()) {
        pieces.push((start, piece));
    }
    pieces
}
