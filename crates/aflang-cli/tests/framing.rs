//! End-to-end tests against the built `aflang` binary, exercising the
//! NUL-delimited framing protocol over stdin and over a request file.

use assert_cmd::Command;
use predicates::prelude::*;

fn frame(filter: &str, vars: &[(&str, &str)]) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(filter.as_bytes());
    buf.push(0);
    for (k, v) in vars {
        buf.extend_from_slice(k.as_bytes());
        buf.push(0);
        buf.extend_from_slice(v.as_bytes());
        buf.push(0);
    }
    buf.push(0);
    buf
}

#[test]
fn reports_match_over_stdin() {
    let input = frame("1 + 1 == 2", &[]);
    Command::cargo_bin("aflang")
        .unwrap()
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::eq("MATCH\n"));
}

#[test]
fn reports_nomatch_over_stdin() {
    let input = frame("1 == 2", &[]);
    Command::cargo_bin("aflang")
        .unwrap()
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::eq("NOMATCH\n"));
}

#[test]
fn reports_exception_on_parse_error_and_continues() {
    let mut input = frame("", &[]);
    input.extend(frame("1 == 1", &[]));
    Command::cargo_bin("aflang")
        .unwrap()
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("EXCEPTION:").and(predicate::str::ends_with("MATCH\n")));
}

#[test]
fn applies_request_variables() {
    let input = frame("age > 18", &[("age", "21")]);
    Command::cargo_bin("aflang")
        .unwrap()
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::eq("MATCH\n"));
}

#[test]
fn processes_multiple_requests_in_one_stream() {
    let mut input = frame("1 == 1", &[]);
    input.extend(frame("2 == 2", &[]));
    input.extend(frame("3 == 4", &[]));
    Command::cargo_bin("aflang")
        .unwrap()
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::eq("MATCH\nMATCH\nNOMATCH\n"));
}

#[test]
fn reads_a_single_request_from_a_file_argument() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("request.bin");
    std::fs::write(&path, frame("'ab' in 'xaby'", &[])).unwrap();

    Command::cargo_bin("aflang")
        .unwrap()
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::eq("MATCH\n"));
}

#[test]
fn honors_budget_steps_flag_by_exhausting_a_deep_expression() {
    let expr = (0..2000).map(|_| "1").collect::<Vec<_>>().join(" + ");
    let input = frame(&expr, &[]);
    Command::cargo_bin("aflang")
        .unwrap()
        .args(["--budget-steps", "5"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("EXCEPTION:"));
}

#[test]
fn rejects_nonexistent_config_path() {
    Command::cargo_bin("aflang")
        .unwrap()
        .args(["--config", "/nonexistent/aflang.toml"])
        .write_stdin(frame("1 == 1", &[]))
        .assert()
        .failure();
}
