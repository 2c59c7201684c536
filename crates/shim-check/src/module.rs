// Copyright 2025, Offchain Labs, Inc.
// For license information, see https://github.com/OffchainLabs/nitro/blob/master/LICENSE.md

use eyre::{bail, Result, WrapErr};
use std::{fmt, fs, path::Path};
use tracing::debug;
use wasi_shim::{imports::write_types, ValueType};
use wasmparser::{FuncType, Parser, Payload, TypeRef, ValType, Validator};

/// A wasm value type as it appears in an import's signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Type {
    Shim(ValueType),
    F32,
    F64,
    V128,
    Ref,
}

impl From<ValType> for Type {
    fn from(ty: ValType) -> Self {
        match ty {
            ValType::I32 => Self::Shim(ValueType::I32),
            ValType::I64 => Self::Shim(ValueType::I64),
            ValType::F32 => Self::F32,
            ValType::F64 => Self::F64,
            ValType::V128 => Self::V128,
            ValType::Ref(_) => Self::Ref,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shim(ty) => write!(f, "{ty}"),
            Self::F32 => write!(f, "f32"),
            Self::F64 => write!(f, "f64"),
            Self::V128 => write!(f, "v128"),
            Self::Ref => write!(f, "ref"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Signature {
    pub params: Vec<Type>,
    pub results: Vec<Type>,
}

impl Signature {
    pub fn new(params: &[ValueType], results: &[ValueType]) -> Self {
        let lift = |types: &[ValueType]| -> Vec<Type> {
            types.iter().copied().map(Type::Shim).collect()
        };
        Self {
            params: lift(params),
            results: lift(results),
        }
    }
}

impl From<&FuncType> for Signature {
    fn from(ty: &FuncType) -> Self {
        Self {
            params: ty.params().iter().copied().map(Into::into).collect(),
            results: ty.results().iter().copied().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_types(f, &self.params)?;
        write!(f, " -> ")?;
        write_types(f, &self.results)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImportKind {
    Func(Signature),
    /// A memory, table, global, or tag.
    Other,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Import {
    pub module: String,
    pub name: String,
    pub kind: ImportKind,
}

/// The imports of a parsed module, in declaration order.
#[derive(Clone, Debug, Default)]
pub struct ModuleImports {
    pub imports: Vec<Import>,
}

impl ModuleImports {
    pub fn parse(wasm: &[u8]) -> Result<Self> {
        Validator::new()
            .validate_all(wasm)
            .wrap_err("failed to validate module")?;

        let mut types: Vec<FuncType> = vec![];
        let mut imports = vec![];

        for payload in Parser::new(0).parse_all(wasm) {
            match payload? {
                Payload::TypeSection(reader) => {
                    for ty in reader.into_iter_err_on_gc_types() {
                        types.push(ty?);
                    }
                }
                Payload::ImportSection(reader) => {
                    for import in reader {
                        let import = import?;
                        let kind = match import.ty {
                            TypeRef::Func(index) => {
                                let Some(ty) = types.get(index as usize) else {
                                    bail!(
                                        "import {}.{} has bad type index {index}",
                                        import.module,
                                        import.name
                                    );
                                };
                                ImportKind::Func(ty.into())
                            }
                            _ => ImportKind::Other,
                        };
                        imports.push(Import {
                            module: import.module.to_owned(),
                            name: import.name.to_owned(),
                            kind,
                        });
                    }
                }
                _ => {}
            }
        }

        debug!(types = types.len(), imports = imports.len(), "parsed module");
        Ok(Self { imports })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let error = || format!("failed to read module at {}", path.to_string_lossy());
        let wasm = fs::read(path).wrap_err_with(error)?;
        Self::parse(&wasm).wrap_err_with(error)
    }
}
