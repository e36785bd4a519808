//! Command dispatch for the `bdd-tags` entrypoint.

use std::collections::BTreeMap;
use std::io::{BufRead, Write};

use clap::{Args, Parser, Subcommand};
use eyre::{Context, Result};
use rstest_bdd_tags::{Dialect, TagExpressionParser, TagFilter, extend_tag_set};
use serde::Serialize;

use crate::config::{CliConfig, LogLevel};
use crate::error::CliError;
use crate::output::{write_json, write_line, write_names};

/// Check and apply rstest-bdd tag expressions.
#[derive(Debug, Parser)]
#[command(name = "bdd-tags", author, version, about)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,
    /// Expression dialect (current, legacy, auto).
    #[arg(long, global = true)]
    pub dialect: Option<Dialect>,
    /// Command to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Supported commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the canonical form of the combined expressions.
    Show(ShowArgs),
    /// Print whether the given tags are selected.
    Check(CheckArgs),
    /// Read `NAME<TAB>TAGS` lines from stdin and print the selected names.
    Filter(FilterArgs),
}

/// Arguments for `show`.
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Expressions to combine with `and`.
    #[arg(value_name = "EXPR", required = true, allow_hyphen_values = true)]
    pub expressions: Vec<String>,
    /// Emit JSON instead of human-readable text.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `check`.
#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Selection expression; may be repeated.
    #[arg(long = "tags", value_name = "EXPR", allow_hyphen_values = true)]
    pub expressions: Vec<String>,
    /// Tags carried by the candidate.
    #[arg(value_name = "TAG")]
    pub tags: Vec<String>,
    /// Emit JSON instead of human-readable text.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `filter`.
#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Selection expression; may be repeated.
    #[arg(long = "tags", value_name = "EXPR", allow_hyphen_values = true)]
    pub expressions: Vec<String>,
    /// Emit JSON instead of human-readable text.
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct ShowReport<'a> {
    expression: String,
    dialect: &'a str,
    limits: &'a BTreeMap<String, usize>,
}

#[derive(Serialize)]
struct CheckReport<'a> {
    selected: bool,
    tags: &'a [String],
}

struct Compiled {
    filter: TagFilter,
    limits: BTreeMap<String, usize>,
}

#[derive(Debug, PartialEq, Eq)]
struct Candidate {
    name: String,
    tags: Vec<String>,
}

/// Run the parsed command, reading candidates from `input` and writing
/// results to `output`.
///
/// # Errors
///
/// Returns an error when an expression is malformed, a candidate line is
/// invalid, or output cannot be written.
pub fn run(
    cli: &Cli,
    config: &CliConfig,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> Result<()> {
    let parser = TagExpressionParser::new().with_dialect(config.dialect);
    match &cli.command {
        Commands::Show(args) => handle_show(&parser, args, output)?,
        Commands::Check(args) => handle_check(&parser, args, output)?,
        Commands::Filter(args) => handle_filter(&parser, args, input, output)?,
    }
    output.flush().wrap_err("failed to flush command output")
}

fn handle_show(parser: &TagExpressionParser, args: &ShowArgs, output: &mut dyn Write) -> Result<()> {
    let compiled = compile(parser, &args.expressions)?;
    let expression = compiled.filter.expression();
    if args.json {
        let report = ShowReport {
            expression: expression.to_string(),
            dialect: parser.dialect().as_str(),
            limits: &compiled.limits,
        };
        return write_json(output, &report);
    }
    write_line(output, expression)
}

fn handle_check(parser: &TagExpressionParser, args: &CheckArgs, output: &mut dyn Write) -> Result<()> {
    let compiled = compile(parser, &args.expressions)?;
    let mut tags = Vec::new();
    extend_tag_set(&mut tags, &args.tags);
    let selected = compiled
        .filter
        .is_selected(tags.iter().map(String::as_str));
    if args.json {
        return write_json(output, &CheckReport {
            selected,
            tags: &tags,
        });
    }
    write_line(output, selected)
}

fn handle_filter(
    parser: &TagExpressionParser,
    args: &FilterArgs,
    input: &mut dyn BufRead,
    output: &mut dyn Write,
) -> Result<()> {
    let compiled = compile(parser, &args.expressions)?;
    let candidates = read_candidates(input)?;
    let names: Vec<&str> = compiled
        .filter
        .select(&candidates, |candidate| {
            candidate.tags.iter().map(String::as_str)
        })
        .into_iter()
        .map(|candidate| candidate.name.as_str())
        .collect();
    tracing::info!(
        total = candidates.len(),
        selected = names.len(),
        "filtered candidates"
    );
    if args.json {
        return write_json(output, &names);
    }
    write_names(output, &names)
}

fn compile(parser: &TagExpressionParser, expressions: &[String]) -> Result<Compiled, CliError> {
    let mut filter = TagFilter::new();
    let mut limits = BTreeMap::new();
    for text in expressions {
        if parser.dialect().resolve(text) == Dialect::Legacy {
            let legacy = parser.parse_legacy([text])?;
            limits.extend(legacy.limits);
            filter.push(legacy.expression);
        } else {
            filter.push(parser.parse(text)?);
        }
    }
    tracing::debug!(expression = %filter.expression(), "compiled tag filter");
    Ok(Compiled { filter, limits })
}

fn read_candidates<R: BufRead>(input: R) -> Result<Vec<Candidate>, CliError> {
    let mut candidates = Vec::new();
    for (idx, line) in input.lines().enumerate() {
        if let Some(candidate) = parse_candidate(idx + 1, &line?)? {
            candidates.push(candidate);
        }
    }
    Ok(candidates)
}

fn parse_candidate(line_no: usize, line: &str) -> Result<Option<Candidate>, CliError> {
    if line.trim().is_empty() {
        return Ok(None);
    }
    let (name, tag_text) = line.split_once('\t').unwrap_or((line, ""));
    let name = name.trim();
    if name.is_empty() {
        return Err(CliError::InvalidInput {
            line: line_no,
            reason: "missing candidate name before tab".to_string(),
        });
    }
    let mut tags = Vec::new();
    extend_tag_set(&mut tags, tag_text.split_whitespace());
    Ok(Some(Candidate {
        name: name.to_string(),
        tags,
    }))
}
