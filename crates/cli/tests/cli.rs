//! CLI integration tests for the `minipas` binary.
//!
//! Uses `assert_cmd` to spawn the binary and verify exit codes, stdout
//! content, and stderr content. Fixtures are written to temp dirs so
//! tests stay independent of the working directory.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn minipas() -> Command {
    cargo_bin_cmd!("minipas")
}

fn write_fixture(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

// ──────────────────────────────────────────────
// 1. Help and version
// ──────────────────────────────────────────────

#[test]
fn help_exits_0_with_description() {
    minipas()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Mini-Pascal front end"));
}

#[test]
fn version_exits_0() {
    minipas()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("minipas"));
}

// ──────────────────────────────────────────────
// 2. Check subcommand
// ──────────────────────────────────────────────

#[test]
fn check_clean_program_exits_0() {
    let tmp = TempDir::new().unwrap();
    let path = write_fixture(
        &tmp,
        "clean.pas",
        "program p;\nvar a: integer;\nbegin a := 1; end.\n",
    );

    minipas()
        .args(["check", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("ok: 1 declaration(s), 1 statement(s)"));
}

#[test]
fn check_semantic_error_exits_1() {
    let tmp = TempDir::new().unwrap();
    let path = write_fixture(
        &tmp,
        "dup.pas",
        "program p;\nvar a: integer;\n    a: integer;\nbegin a := 1; end.\n",
    );

    minipas()
        .args(["check", path.to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("duplicate declaration of 'a'"));
}

#[test]
fn check_syntax_error_exits_1() {
    let tmp = TempDir::new().unwrap();
    let path = write_fixture(
        &tmp,
        "broken.pas",
        "program p;\nbegin a := ; end.\n",
    );

    minipas()
        .args(["check", path.to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("syntax error:"));
}

#[test]
fn check_json_output_is_machine_readable() {
    let tmp = TempDir::new().unwrap();
    let path = write_fixture(
        &tmp,
        "dup.pas",
        "program p;\nvar a: integer;\n    a: integer;\nbegin a := 1; end.\n",
    );

    let assert = minipas()
        .args(["check", path.to_str().unwrap(), "--output", "json"])
        .assert()
        .failure()
        .code(1);

    let value: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("stdout should be JSON");
    assert_eq!(value["ok"], serde_json::json!(false));
    assert_eq!(value["semantic_errors"][0]["kind"], "duplicate_declaration");
    assert_eq!(value["semantic_errors"][0]["name"], "a");
}

#[test]
fn check_honors_max_errors() {
    let tmp = TempDir::new().unwrap();
    let path = write_fixture(
        &tmp,
        "many.pas",
        "program p;\nbegin a := 1; b := 2; c := 3; end.\n",
    );

    let assert = minipas()
        .args([
            "check",
            path.to_str().unwrap(),
            "--max-errors",
            "1",
            "--output",
            "json",
        ])
        .assert()
        .failure()
        .code(1);

    let value: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("stdout should be JSON");
    let semantic = value["semantic_errors"].as_array().expect("array");
    assert_eq!(semantic.len(), 1);
}

#[test]
fn check_quiet_keeps_diagnostics_but_drops_summary() {
    let tmp = TempDir::new().unwrap();
    let clean = write_fixture(
        &tmp,
        "clean.pas",
        "program p;\nvar a: integer;\nbegin a := 1; end.\n",
    );
    minipas()
        .args(["check", clean.to_str().unwrap(), "--quiet"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let dirty = write_fixture(&tmp, "dirty.pas", "program p;\nbegin x := 1; end.\n");
    minipas()
        .args(["check", dirty.to_str().unwrap(), "--quiet"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("undeclared variable 'x'"))
        .stdout(predicate::str::contains("semantic error(s)").not());
}

#[test]
fn check_missing_file_exits_1() {
    minipas()
        .args(["check", "no_such_file_xyz.pas"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error reading file"));
}

#[test]
fn check_scan_error_exits_1() {
    let tmp = TempDir::new().unwrap();
    let path = write_fixture(&tmp, "bad.pas", "program p; begin @ end.\n");

    minipas()
        .args(["check", path.to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unexpected character '@'"));
}

#[test]
fn check_rejects_unreadable_code_stream() {
    let tmp = TempDir::new().unwrap();
    let path = write_fixture(&tmp, "bad.codes", "99\n");

    minipas()
        .args(["check", path.to_str().unwrap(), "--codes"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unknown token code 99"));
}

// ──────────────────────────────────────────────
// 3. Tokens subcommand
// ──────────────────────────────────────────────

#[test]
fn tokens_prints_code_stream() {
    let tmp = TempDir::new().unwrap();
    let path = write_fixture(&tmp, "prog.pas", "program p;\nbegin end.\n");

    minipas()
        .args(["tokens", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 31:p 17"))
        .stdout(predicate::str::contains("4 5 19"));
}

#[test]
fn tokens_then_check_codes_round_trip() {
    let tmp = TempDir::new().unwrap();
    let src = write_fixture(
        &tmp,
        "prog.pas",
        "program p;\nvar a: integer;\nbegin a := 42; end.\n",
    );
    let codes = tmp.path().join("prog.codes");

    minipas()
        .args([
            "tokens",
            src.to_str().unwrap(),
            "--out",
            codes.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("wrote 3 token line(s)"));

    minipas()
        .args(["check", codes.to_str().unwrap(), "--codes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ok: 1 declaration(s), 1 statement(s)"));
}

#[test]
fn tokens_missing_file_exits_1() {
    minipas()
        .args(["tokens", "no_such_file_xyz.pas"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error reading file"));
}
