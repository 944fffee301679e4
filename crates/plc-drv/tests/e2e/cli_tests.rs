use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn plc_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_plc"))
}

/// Copies a fixture into an isolated temp directory so the compiler's
/// output files never land in the checked-in fixtures tree.
fn copy_fixture(name: &str, dir: &TempDir) -> PathBuf {
    let dest = dir.path().join(name);
    fs::copy(fixtures_dir().join(name), &dest).unwrap();
    dest
}

#[test]
fn test_cli_help() {
    plc_bin()
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_cli_version() {
    plc_bin().arg("--version").assert().success();
}

#[test]
fn test_cli_compile_file() {
    let dir = TempDir::new().unwrap();
    let source = copy_fixture("hello.plc", &dir);
    plc_bin().arg(&source).assert().success();
    assert!(source.with_extension("pal").exists());
}

#[test]
fn test_cli_compile_output() {
    let dir = TempDir::new().unwrap();
    let source = copy_fixture("hello.plc", &dir);
    let out = dir.path().join("custom.pal");
    plc_bin().arg(&source).arg("-o").arg(&out).assert().success();
    assert!(out.exists());
    assert!(!source.with_extension("pal").exists());
}

#[test]
fn test_cli_verbose() {
    let dir = TempDir::new().unwrap();
    let source = copy_fixture("hello.plc", &dir);
    plc_bin().arg(&source).arg("-v").assert().success();
}

#[test]
fn test_cli_errors_skip_instruction_file() {
    let dir = TempDir::new().unwrap();
    let source = copy_fixture("duplicate.plc", &dir);
    // Exit code is always 0 for a completed compile, even with diagnostics.
    plc_bin().arg(&source).assert().success().stderr(predicate::str::contains("1 error"));
    assert!(!source.with_extension("pal").exists());
}

#[test]
fn test_cli_listing_file() {
    let dir = TempDir::new().unwrap();
    let source = copy_fixture("duplicate.plc", &dir);
    plc_bin().arg(&source).arg("-l").assert().success();
    let listing = fs::read_to_string(source.with_extension("lis")).unwrap();
    assert!(listing.contains("X : real;"));
    assert!(listing.contains("E3002"));
}

#[test]
fn test_cli_missing_source_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("does-not-exist.plc");
    plc_bin()
        .arg(&missing)
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot open source file"));
}
