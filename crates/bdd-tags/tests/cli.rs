//! Smoke tests for the `bdd-tags` binary.

use std::str;

use assert_cmd::Command;

fn bdd_tags() -> Command {
    let mut cmd =
        Command::cargo_bin("bdd-tags").unwrap_or_else(|err| panic!("binary exists: {err}"));
    cmd.env_remove("BDD_TAGS_LOG_LEVEL")
        .env_remove("BDD_TAGS_DIALECT");
    cmd
}

#[test]
fn show_prints_canonical_expression() {
    let output = bdd_tags()
        .args(["show", "@smoke and not (@wip or @flaky.*)"])
        .output()
        .unwrap_or_else(|err| panic!("runs: {err}"));
    assert!(output.status.success());
    assert_eq!(
        str::from_utf8(&output.stdout).unwrap_or_default(),
        "(smoke and not (wip or flaky.*))\n"
    );
}

#[test]
fn filter_reads_candidates_from_stdin() {
    let output = bdd_tags()
        .args(["filter", "--tags", "@fast and not @wip"])
        .write_stdin("quick\t@fast\nunfinished\t@fast @wip\nslow\t@slow\n")
        .output()
        .unwrap_or_else(|err| panic!("runs: {err}"));
    assert!(output.status.success());
    assert_eq!(str::from_utf8(&output.stdout).unwrap_or_default(), "quick\n");
}

#[test]
fn malformed_expression_fails_with_parser_message() {
    let output = bdd_tags()
        .args(["check", "--tags", "@a or", "a"])
        .output()
        .unwrap_or_else(|err| panic!("runs: {err}"));
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("expected tag or '(' after 'or'"),
        "unexpected stderr: {stderr}"
    );
}

#[test]
fn legacy_dialect_is_read_from_the_environment() {
    let output = bdd_tags()
        .env("BDD_TAGS_DIALECT", "legacy")
        .args(["check", "--tags", "~@wip", "wip"])
        .output()
        .unwrap_or_else(|err| panic!("runs: {err}"));
    assert!(output.status.success());
    assert_eq!(str::from_utf8(&output.stdout).unwrap_or_default(), "false\n");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("deprecated"), "unexpected stderr: {stderr}");
}

#[test]
fn invalid_configuration_exits_with_status_two() {
    let output = bdd_tags()
        .env("BDD_TAGS_LOG_LEVEL", "loud")
        .args(["check", "a"])
        .output()
        .unwrap_or_else(|err| panic!("runs: {err}"));
    assert_eq!(output.status.code(), Some(2));
}
