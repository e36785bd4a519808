//! Tag-expression parsing and evaluation for rstest-bdd.
//!
//! Scenarios carry tags such as `@smoke` or `@wip`. A tag expression is a
//! small boolean language over those tags that decides which scenarios run:
//!
//! ```
//! use rstest_bdd_tags::parse;
//!
//! let expr = parse("@smoke and not (@wip or @flaky.*)")?;
//! assert!(expr.evaluate(["smoke"]));
//! assert!(!expr.evaluate(["smoke", "flaky.network"]));
//! assert_eq!(expr.to_string(), "(smoke and not (wip or flaky.*))");
//! # Ok::<(), rstest_bdd_tags::TagExpressionError>(())
//! ```
//!
//! The crate is synchronous and allocation-light. Parsed [`Expression`]
//! trees are immutable and `Send + Sync`, so one tree can be evaluated from
//! many threads at once.

mod ast;
mod dialect;
mod errors;
mod filter;
mod legacy;
mod lexer;
mod operand;
mod parser;
mod render;
mod sets;

pub use ast::Expression;
pub use dialect::{Dialect, UnknownDialect, detect_dialect};
pub use errors::{Operator, TagExpressionError, TagExpressionErrorKind};
pub use filter::TagFilter;
pub use legacy::{LegacyTagExpression, parse_legacy};
pub use operand::{GlobMatcher, OperandFactory, TagPredicate, has_wildcard, make_operand};
pub use parser::{MAX_NESTING_DEPTH, MAX_OPERATORS, TagExpressionParser, parse};
pub use sets::{TagSet, extend_tag_set, merge_tag_sets, normalise_tag};
