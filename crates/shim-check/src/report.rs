// Copyright 2025, Offchain Labs, Inc.
// For license information, see https://github.com/OffchainLabs/nitro/blob/master/LICENSE.md

//! Compares a module's imports against the shim table.

use crate::module::{Import, ImportKind, ModuleImports, Signature};
use serde::Serialize;
use std::{fmt, io::Write};
use thiserror::Error;
use tracing::{info, warn};
use wasi_shim::{Behavior, ImportStub, MODULE, STUBS, SYMBOL_PREFIX};

/// A problem that keeps a module from linking cleanly against the shims.
#[derive(Clone, Debug, Error, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Issue {
    #[error("{module}.{name} has no shim")]
    Uncovered { module: String, name: String },
    #[error("{module}.{name} is imported as {found} but the shim is {expected}")]
    Mismatch {
        module: String,
        name: String,
        expected: String,
        found: String,
    },
    #[error("{module}.{name} is not a function import")]
    NotAFunction { module: String, name: String },
    #[error("{module}.{name} is still imported by the linked artifact")]
    Unresolved { module: String, name: String },
}

/// A WASI import the shims satisfy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Covered {
    pub name: String,
    pub symbol: &'static str,
    pub signature: String,
    pub behavior: String,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct Report {
    pub covered: Vec<Covered>,
    pub issues: Vec<Issue>,
}

/// The WASI field name an import refers to, if any.
///
/// wasi-libc declares its syscalls with an explicit import module, but a
/// reference compiled without those attributes lands in `env` under the raw
/// linker symbol.
fn wasi_name(import: &Import) -> Option<&str> {
    if import.module == MODULE {
        return Some(import.name.as_str());
    }
    if import.module == "env" {
        return import.name.strip_prefix(SYMBOL_PREFIX);
    }
    None
}

fn stub_signature(stub: &ImportStub) -> Signature {
    Signature::new(stub.params, stub.results)
}

impl Report {
    /// Classifies every WASI import of a module built against wasi-libc.
    pub fn imports(module: &ModuleImports) -> Self {
        let mut report = Self::default();
        for import in &module.imports {
            let Some(name) = wasi_name(import) else {
                continue;
            };
            let (module, name) = (import.module.clone(), name.to_owned());

            let ImportKind::Func(found) = &import.kind else {
                report.issues.push(Issue::NotAFunction { module, name });
                continue;
            };
            let Some(stub) = wasi_shim::lookup(&name) else {
                report.issues.push(Issue::Uncovered { module, name });
                continue;
            };
            let expected = stub_signature(stub);
            if *found != expected {
                report.issues.push(Issue::Mismatch {
                    module,
                    name,
                    expected: expected.to_string(),
                    found: found.to_string(),
                });
                continue;
            }
            report.covered.push(Covered {
                name,
                symbol: stub.symbol,
                signature: expected.to_string(),
                behavior: stub.behavior.to_string(),
            });
        }
        report.log();
        report
    }

    /// Flags every WASI import left in a linked artifact.
    pub fn linked(module: &ModuleImports) -> Self {
        let mut report = Self::default();
        for import in &module.imports {
            if wasi_name(import).is_some() {
                report.issues.push(Issue::Unresolved {
                    module: import.module.clone(),
                    name: import.name.clone(),
                });
            }
        }
        report.log();
        report
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    fn log(&self) {
        for issue in &self.issues {
            warn!("{issue}");
        }
        info!(
            covered = self.covered.len(),
            issues = self.issues.len(),
            "checked WASI imports"
        );
    }

    pub fn write_json(&self, out: &mut impl Write) -> eyre::Result<()> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out)?;
        Ok(())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for covered in &self.covered {
            writeln!(
                f,
                "covered  {} {} [{}]",
                covered.name, covered.signature, covered.behavior
            )?;
        }
        for issue in &self.issues {
            writeln!(f, "issue    {issue}")?;
        }
        if self.covered.is_empty() && self.issues.is_empty() {
            writeln!(f, "no WASI imports")?;
        }
        Ok(())
    }
}

/// One row of `shim-check list`.
#[derive(Serialize)]
struct StubRow {
    name: &'static str,
    symbol: &'static str,
    signature: String,
    behavior: String,
    returns: bool,
}

fn stub_rows() -> Vec<StubRow> {
    STUBS
        .iter()
        .map(|stub| StubRow {
            name: stub.name,
            symbol: stub.symbol,
            signature: stub_signature(stub).to_string(),
            behavior: stub.behavior.to_string(),
            returns: stub.behavior == Behavior::Success,
        })
        .collect()
}

pub fn write_stubs_text(out: &mut impl Write) -> eyre::Result<()> {
    for row in stub_rows() {
        writeln!(
            out,
            "{:<18} {:<24} {:<12} {}",
            row.name, row.signature, row.behavior, row.symbol
        )?;
    }
    Ok(())
}

pub fn write_stubs_json(out: &mut impl Write) -> eyre::Result<()> {
    serde_json::to_writer_pretty(&mut *out, &stub_rows())?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(wat: &str) -> ModuleImports {
        ModuleImports::parse(&wat::parse_str(wat).unwrap()).unwrap()
    }

    #[test]
    fn classifies_wasi_imports() {
        let module = parse(
            r#"(module
                (import "wasi_snapshot_preview1" "fd_write" (func (param i32 i32 i32 i32) (result i32)))
                (import "wasi_snapshot_preview1" "proc_exit" (func (param i32)))
                (import "wasi_snapshot_preview1" "fd_seek" (func (param i32 i32 i32 i32) (result i32)))
                (import "wasi_snapshot_preview1" "path_open"
                    (func (param i32 i32 i32 i32 i32 i64 i64 i32 i32) (result i32)))
                (import "env" "__imported_wasi_snapshot_preview1_sched_yield" (func (result i32)))
                (import "env" "host_log" (func (param i32 i32)))
            )"#,
        );
        let report = Report::imports(&module);

        let covered: Vec<_> = report.covered.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(covered, ["fd_write", "proc_exit", "sched_yield"]);
        assert_eq!(report.covered[1].behavior, "no-return");
        assert_eq!(report.covered[2].symbol, "__imported_wasi_snapshot_preview1_sched_yield");

        assert_eq!(
            report.issues,
            [
                Issue::Mismatch {
                    module: "wasi_snapshot_preview1".into(),
                    name: "fd_seek".into(),
                    expected: "(i32, i64, i32, i32) -> (i32)".into(),
                    found: "(i32, i32, i32, i32) -> (i32)".into(),
                },
                Issue::Uncovered {
                    module: "wasi_snapshot_preview1".into(),
                    name: "path_open".into(),
                },
            ]
        );
        assert!(!report.is_clean());
    }

    #[test]
    fn non_function_wasi_import() {
        let module = parse(r#"(module (import "wasi_snapshot_preview1" "fd_close" (global i32)))"#);
        let report = Report::imports(&module);
        assert_eq!(
            report.issues,
            [Issue::NotAFunction {
                module: "wasi_snapshot_preview1".into(),
                name: "fd_close".into(),
            }]
        );
    }

    #[test]
    fn linked_artifact() {
        let clean = parse(r#"(module (import "env" "memory" (memory 1)) (func (export "parse")))"#);
        let report = Report::linked(&clean);
        assert!(report.is_clean());
        assert_eq!(report.to_string(), "no WASI imports\n");

        let dirty = parse(
            r#"(module
                (import "wasi_snapshot_preview1" "fd_write" (func (param i32 i32 i32 i32) (result i32)))
                (import "env" "__imported_wasi_snapshot_preview1_environ_get" (func (param i32 i32) (result i32)))
            )"#,
        );
        let report = Report::linked(&dirty);
        assert_eq!(report.issues.len(), 2);
        assert_eq!(
            report.issues[1].to_string(),
            "env.__imported_wasi_snapshot_preview1_environ_get is still imported by the linked artifact"
        );
    }

    #[test]
    fn json_report() {
        let module = parse(r#"(module (import "wasi_snapshot_preview1" "random_get" (func (param i32 i32) (result i32))))"#);
        let mut out = vec![];
        Report::imports(&module).write_json(&mut out).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["issues"][0]["kind"], "uncovered");
        assert_eq!(json["issues"][0]["name"], "random_get");
        assert_eq!(json["covered"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn lists_every_stub() {
        let mut out = vec![];
        write_stubs_text(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), STUBS.len());
        assert!(text.contains("__imported_wasi_snapshot_preview1_proc_exit"));

        let mut out = vec![];
        write_stubs_json(&mut out).unwrap();
        let rows: serde_json::Value = serde_json::from_slice(&out).unwrap();
        let returning: Vec<_> = rows
            .as_array()
            .unwrap()
            .iter()
            .filter(|row| row["returns"] == true)
            .map(|row| row["name"].as_str().unwrap())
            .collect();
        assert_eq!(returning, ["sched_yield"]);
    }
}
