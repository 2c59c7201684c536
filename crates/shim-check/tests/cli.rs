// Copyright 2025, Offchain Labs, Inc.
// For license information, see https://github.com/OffchainLabs/nitro/blob/master/LICENSE.md

use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

/// Fixtures live under cargo's per-target scratch directory, which `cargo clean` removes.
fn write_module(name: &str, wat: &str) -> PathBuf {
    let dir = Path::new(env!("CARGO_TARGET_TMPDIR")).join("shim-check");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(format!("{name}.wasm"));
    fs::write(&path, wat::parse_str(wat).unwrap()).unwrap();
    path
}

fn shim_check(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_shim-check"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .unwrap()
}

const LIBC_OBJECT: &str = r#"(module
    (import "wasi_snapshot_preview1" "environ_sizes_get" (func (param i32 i32) (result i32)))
    (import "wasi_snapshot_preview1" "environ_get" (func (param i32 i32) (result i32)))
    (import "wasi_snapshot_preview1" "fd_write" (func (param i32 i32 i32 i32) (result i32)))
    (import "wasi_snapshot_preview1" "proc_exit" (func (param i32)))
)"#;

#[test]
fn covered_imports_pass() {
    let path = write_module("libc-object", LIBC_OBJECT);
    let output = shim_check(&["imports", path.to_str().unwrap()]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 4);
    assert!(stdout.contains("covered  proc_exit (i32) -> () [no-return]"));
}

#[test]
fn uncovered_import_fails() {
    let path = write_module(
        "needs-clock",
        r#"(module (import "wasi_snapshot_preview1" "clock_time_get" (func (param i32 i64 i32) (result i32))))"#,
    );
    let output = shim_check(&["imports", path.to_str().unwrap(), "--output", "json"]);
    assert_eq!(output.status.code(), Some(1));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["issues"][0]["kind"], "uncovered");
    assert_eq!(report["issues"][0]["name"], "clock_time_get");

    let allowed = shim_check(&["imports", path.to_str().unwrap(), "--allow-issues"]);
    assert!(allowed.status.success());
}

#[test]
fn linked_artifact() {
    let clean = write_module(
        "linked-clean",
        r#"(module (memory (export "memory") 1) (func (export "parse") (param i32 i32) (result i32) i32.const 0))"#,
    );
    let output = shim_check(&["linked", clean.to_str().unwrap()]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "no WASI imports\n");

    let dirty = write_module("linked-dirty", LIBC_OBJECT);
    let output = shim_check(&["linked", dirty.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn missing_file_is_an_error() {
    let output = shim_check(&["imports", "/nonexistent/module.wasm"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("failed to read module"));
}

#[test]
fn list_stubs() {
    let output = shim_check(&["list", "--output", "json"]);
    assert!(output.status.success());
    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), wasi_shim::STUBS.len());
}

#[test]
fn fixtures_stay_in_target_dir() {
    let path = write_module("scratch", "(module)");
    assert!(path.starts_with(env!("CARGO_TARGET_TMPDIR")));
    assert!(path.is_file());
}
