//! Public-API behaviour of the tag-expression engine as a runner uses it.

use std::fmt;
use std::sync::Arc;
use std::thread;

use rstest::{fixture, rstest};
use rstest_bdd_tags::{
    Dialect, Expression, OperandFactory, TagExpressionErrorKind, TagExpressionParser,
    TagPredicate, TagSet, make_operand, merge_tag_sets, parse,
};

/// Operand selecting scenarios tagged with at least `min` distinct tags
/// sharing a prefix, written as `prefix#min`.
#[derive(Debug)]
struct PrefixCount {
    prefix: String,
    min: usize,
}

impl fmt::Display for PrefixCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.prefix, self.min)
    }
}

impl TagPredicate for PrefixCount {
    fn matches(&self, tags: &TagSet<'_>) -> bool {
        tags.iter().filter(|tag| tag.starts_with(&self.prefix)).count() >= self.min
    }
}

#[fixture]
fn counting_parser() -> TagExpressionParser {
    let factory = OperandFactory::new(|text| match text.split_once('#') {
        Some((prefix, min)) => {
            let min = min
                .parse::<usize>()
                .map_err(|_| TagExpressionErrorKind::InvalidLimit {
                    tag: prefix.to_string(),
                    limit: min.to_string(),
                })?;
            Ok(Expression::Custom(Arc::new(PrefixCount {
                prefix: prefix.to_string(),
                min,
            })))
        }
        None => make_operand(text),
    });
    TagExpressionParser::new().with_operand_factory(factory)
}

#[rstest]
fn custom_operands_take_part_in_evaluation(counting_parser: TagExpressionParser) {
    let expr = counting_parser
        .parse("@os.#2 and not @wip")
        .unwrap_or_else(|err| panic!("parse: {err}"));
    assert!(expr.evaluate(["os.linux", "os.macos"]));
    assert!(!expr.evaluate(["os.linux"]));
    assert!(!expr.evaluate(["os.linux", "os.macos", "wip"]));
    assert_eq!(expr.to_string(), "(os.#2 and not (wip))");
}

#[rstest]
fn custom_operand_errors_surface_from_parse(counting_parser: TagExpressionParser) {
    let Err(err) = counting_parser.parse("@os.#many") else {
        panic!("expected factory error");
    };
    assert!(
        err.to_string().contains("invalid occurrence limit `many`"),
        "unexpected error: {err}"
    );
}

#[rstest]
fn default_operands_still_apply_alongside_custom_ones(counting_parser: TagExpressionParser) {
    let expr = counting_parser
        .parse("@smoke.* or @ui#1")
        .unwrap_or_else(|err| panic!("parse: {err}"));
    assert!(expr.evaluate(["smoke.login"]));
    assert!(expr.evaluate(["ui-dark"]));
    assert!(!expr.evaluate(["api"]));
}

#[test]
fn expressions_evaluate_concurrently() {
    let expr = Arc::new(
        parse("(@fast or @unit.*) and not @wip").unwrap_or_else(|err| panic!("parse: {err}")),
    );
    let handles: Vec<_> = (0..4)
        .map(|idx| {
            let expr = Arc::clone(&expr);
            thread::spawn(move || {
                let tag = format!("unit.{idx}");
                expr.evaluate([tag.as_str()]) && !expr.evaluate([tag.as_str(), "wip"])
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap_or(false));
    }
}

#[test]
fn candidate_tags_accumulate_feature_rule_and_scenario_tags() {
    let expr = parse("@billing and @regression and not @wip")
        .unwrap_or_else(|err| panic!("parse: {err}"));
    let feature = ["@billing"];
    let rule = ["@regression"];
    let scenario = ["@regression", "@smoke"];
    let tags = merge_tag_sets(merge_tag_sets(feature, rule), scenario);
    assert_eq!(tags, ["billing", "regression", "smoke"]);
    assert!(expr.evaluate(tags.iter().map(String::as_str)));
}

#[rstest]
#[case("-@wip", &["wip"], false)]
#[case("-@wip", &["fast"], true)]
#[case("@a,@b @c", &["b", "c"], true)]
#[case("@a,@b @c", &["a"], false)]
#[case("not @wip", &["wip"], false)]
#[case("@ns:name @b", &["ns:name", "b"], true)]
#[case("@ns:name @b", &["ns", "b"], false)]
#[case("@ns:name", &["ns:name"], true)]
fn auto_dialect_accepts_both_syntaxes(
    #[case] input: &str,
    #[case] tags: &[&str],
    #[case] expected: bool,
) {
    let parser = TagExpressionParser::new().with_dialect(Dialect::Auto);
    let expr = parser
        .parse(input)
        .unwrap_or_else(|err| panic!("parse `{input}`: {err}"));
    assert_eq!(expr.evaluate(tags.iter().copied()), expected);
}

#[test]
fn legacy_dialect_keeps_limits() {
    let parser = TagExpressionParser::new().with_dialect(Dialect::Legacy);
    let legacy = parser
        .parse_legacy(["@slow:2,@fast"])
        .unwrap_or_else(|err| panic!("parse: {err}"));
    assert_eq!(legacy.limits.get("slow"), Some(&2));
    assert_eq!(legacy.expression.to_string(), "(slow or fast)");
}
