//! Recursive-descent parser for tag expressions.
//!
//! ```text
//! expression := or_expr
//! or_expr    := and_expr ( "or" and_expr )*
//! and_expr   := not_expr ( "and" not_expr )*
//! not_expr   := "not" not_expr | primary
//! primary    := TAG | "(" expression ")"
//! ```
//!
//! Empty input is valid and yields [`Expression::Always`]. Nesting of
//! parentheses and `not` is limited to [`MAX_NESTING_DEPTH`] levels, and an
//! expression holds at most [`MAX_OPERATORS`] operators. Together they bound
//! the depth of every parsed tree, and with it the recursion of evaluation,
//! rendering and drop.

use crate::ast::Expression;
use crate::dialect::Dialect;
use crate::errors::{Operator, TagExpressionError, TagExpressionErrorKind};
use crate::filter::TagFilter;
use crate::legacy::{self, LegacyTagExpression};
use crate::lexer::{Lexer, Token, TokenKind};
use crate::operand::OperandFactory;

/// Maximum nesting of parentheses and `not` accepted by the parser.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Maximum number of `and`, `or` and `not` operators in one expression.
///
/// `and`/`or` chains build left-deep trees, so a chain's length is also its
/// depth.
pub const MAX_OPERATORS: usize = 512;

/// Configurable tag-expression parser.
///
/// The parser is an explicit value owned by the caller: it carries the
/// [`Dialect`] to accept and the [`OperandFactory`] used for tag words.
///
/// # Examples
/// ```
/// use rstest_bdd_tags::{Dialect, TagExpressionParser};
///
/// let parser = TagExpressionParser::new();
/// assert!(parser.parse("@a or @b")?.evaluate(["b"]));
///
/// let legacy = TagExpressionParser::new().with_dialect(Dialect::Auto);
/// assert!(!legacy.parse("~@wip")?.evaluate(["wip"]));
/// # Ok::<(), rstest_bdd_tags::TagExpressionError>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct TagExpressionParser {
    dialect: Dialect,
    make_operand: OperandFactory,
}

impl TagExpressionParser {
    /// Parser for the boolean dialect with the default operand factory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Select which dialect [`parse`](Self::parse) accepts.
    #[must_use]
    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Replace the strategy used to build operands from tag words.
    #[must_use]
    pub fn with_operand_factory(mut self, make_operand: OperandFactory) -> Self {
        self.make_operand = make_operand;
        self
    }

    /// Configured dialect.
    #[must_use]
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Parse one expression string in the configured dialect.
    ///
    /// With [`Dialect::Auto`] the dialect is detected from the text; legacy
    /// occurrence limits are discarded, use
    /// [`parse_legacy`](Self::parse_legacy) to keep them.
    ///
    /// # Errors
    ///
    /// Returns [`TagExpressionError`] when the text is malformed.
    pub fn parse(&self, text: &str) -> Result<Expression, TagExpressionError> {
        match self.dialect.resolve(text) {
            Dialect::Legacy => self.parse_legacy([text]).map(|parsed| parsed.expression),
            Dialect::Current | Dialect::Auto => self.parse_boolean(text),
        }
    }

    /// Parse several expression strings and join them with `and`.
    ///
    /// This mirrors repeated `--tags` options; no strings yield
    /// [`Expression::Always`].
    ///
    /// # Errors
    ///
    /// Returns the first [`TagExpressionError`] encountered.
    pub fn parse_all<I, S>(&self, texts: I) -> Result<Expression, TagExpressionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        TagFilter::from_args(self, texts).map(|filter| filter.expression())
    }

    /// Parse entries written in the legacy comma-list dialect.
    ///
    /// # Errors
    ///
    /// Returns [`TagExpressionError`] for empty tags, malformed limits or
    /// operands rejected by the operand factory.
    pub fn parse_legacy<I, S>(&self, entries: I) -> Result<LegacyTagExpression, TagExpressionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        legacy::parse_entries(entries, &self.make_operand)
    }

    fn parse_boolean(&self, text: &str) -> Result<Expression, TagExpressionError> {
        let mut parser = Parser::new(text, &self.make_operand)?;
        if matches!(parser.current.kind, TokenKind::End) {
            return Ok(Expression::Always);
        }
        let expr = parser.parse_expression()?;
        parser.expect_end()?;
        log::trace!("parsed tag expression `{text}` as {expr}");
        Ok(expr)
    }
}

/// Parse a tag expression with the default parser.
///
/// # Errors
///
/// Returns [`TagExpressionError`] when the text is malformed.
///
/// # Examples
/// ```
/// let expr = rstest_bdd_tags::parse("@a and @b or @c")?;
/// assert_eq!(expr.to_string(), "((a and b) or c)");
/// assert!(expr.evaluate(["a", "c"]));
/// # Ok::<(), rstest_bdd_tags::TagExpressionError>(())
/// ```
pub fn parse(text: &str) -> Result<Expression, TagExpressionError> {
    TagExpressionParser::default().parse(text)
}

struct Parser<'a> {
    input: &'a str,
    lexer: Lexer<'a>,
    current: Token,
    make_operand: &'a OperandFactory,
    depth: usize,
    open_parens: usize,
    operators: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str, make_operand: &'a OperandFactory) -> Result<Self, TagExpressionError> {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token()?;
        Ok(Self {
            input,
            lexer,
            current,
            make_operand,
            depth: 0,
            open_parens: 0,
            operators: 0,
        })
    }

    fn parse_expression(&mut self) -> Result<Expression, TagExpressionError> {
        self.parse_or()
    }

    fn expect_end(&self) -> Result<(), TagExpressionError> {
        match self.current.kind {
            TokenKind::End => Ok(()),
            TokenKind::RParen => {
                Err(self.error(self.current.start, TagExpressionErrorKind::UnmatchedCloseParen))
            }
            _ => Err(self.error(
                self.current.start,
                TagExpressionErrorKind::UnexpectedToken {
                    expected: "'and', 'or' or end of input",
                    found: self.current.describe(),
                },
            )),
        }
    }

    fn advance(&mut self) -> Result<(), TagExpressionError> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn error(&self, offset: usize, kind: TagExpressionErrorKind) -> TagExpressionError {
        TagExpressionError::new(self.input, offset, kind)
    }

    fn parse_or(&mut self) -> Result<Expression, TagExpressionError> {
        self.parse_chain(Self::parse_and, Operator::Or, Expression::or)
    }

    fn parse_and(&mut self) -> Result<Expression, TagExpressionError> {
        self.parse_chain(Self::parse_not, Operator::And, Expression::and)
    }

    fn parse_chain<F>(
        &mut self,
        mut parse_operand: F,
        operator: Operator,
        build: fn(Expression, Expression) -> Expression,
    ) -> Result<Expression, TagExpressionError>
    where
        F: FnMut(&mut Self) -> Result<Expression, TagExpressionError>,
    {
        let mut node = parse_operand(self)?;
        while self.current_is(operator) {
            self.count_operator()?;
            self.advance()?;
            self.ensure_operand(operator)?;
            let rhs = parse_operand(self)?;
            node = build(node, rhs);
        }
        Ok(node)
    }

    fn parse_not(&mut self) -> Result<Expression, TagExpressionError> {
        if !self.current_is(Operator::Not) {
            return self.parse_primary();
        }
        self.count_operator()?;
        self.advance()?;
        self.ensure_operand(Operator::Not)?;
        let operand = self.nested(Self::parse_not)?;
        Ok(Expression::not(operand))
    }

    fn parse_primary(&mut self) -> Result<Expression, TagExpressionError> {
        let token = self.current.clone();
        match token.kind {
            TokenKind::Tag(text) => {
                let operand = self
                    .make_operand
                    .make(&text)
                    .map_err(|kind| self.error(token.start, kind))?;
                self.advance()?;
                Ok(operand)
            }
            TokenKind::LParen => self.parse_group(token.start),
            TokenKind::RParen if self.open_parens == 0 => {
                Err(self.error(token.start, TagExpressionErrorKind::UnmatchedCloseParen))
            }
            TokenKind::RParen => Err(self.error(token.start, TagExpressionErrorKind::EmptyGroup)),
            TokenKind::End => Err(self.error(token.start, TagExpressionErrorKind::UnexpectedEnd)),
            TokenKind::And | TokenKind::Or | TokenKind::Not => Err(self.error(
                token.start,
                TagExpressionErrorKind::UnexpectedToken {
                    expected: "tag or '('",
                    found: token.describe(),
                },
            )),
        }
    }

    fn parse_group(&mut self, open: usize) -> Result<Expression, TagExpressionError> {
        self.advance()?;
        self.open_parens += 1;
        let expr = self.nested(Self::parse_expression)?;
        self.open_parens -= 1;
        match self.current.kind {
            TokenKind::RParen => {
                self.advance()?;
                Ok(expr)
            }
            TokenKind::End => Err(self.error(
                open,
                TagExpressionErrorKind::MissingCloseParen { open },
            )),
            _ => Err(self.error(
                self.current.start,
                TagExpressionErrorKind::UnexpectedToken {
                    expected: "'and', 'or' or ')'",
                    found: self.current.describe(),
                },
            )),
        }
    }

    fn nested<F>(&mut self, parse: F) -> Result<Expression, TagExpressionError>
    where
        F: FnOnce(&mut Self) -> Result<Expression, TagExpressionError>,
    {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.error(
                self.current.start,
                TagExpressionErrorKind::NestingTooDeep {
                    limit: MAX_NESTING_DEPTH,
                },
            ));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn count_operator(&mut self) -> Result<(), TagExpressionError> {
        if self.operators >= MAX_OPERATORS {
            return Err(self.error(
                self.current.start,
                TagExpressionErrorKind::TooManyOperators {
                    limit: MAX_OPERATORS,
                },
            ));
        }
        self.operators += 1;
        Ok(())
    }

    fn current_is(&self, operator: Operator) -> bool {
        matches!(
            (&self.current.kind, operator),
            (TokenKind::And, Operator::And)
                | (TokenKind::Or, Operator::Or)
                | (TokenKind::Not, Operator::Not)
        )
    }

    fn ensure_operand(&self, after: Operator) -> Result<(), TagExpressionError> {
        match self.current.kind {
            TokenKind::Or | TokenKind::And | TokenKind::RParen | TokenKind::End => Err(
                self.error(self.current.start, TagExpressionErrorKind::MissingOperand { after }),
            ),
            _ => Ok(()),
        }
    }
}
