//! Value types, block types, export kinds and function signatures.

use crate::wasm::leb128;
use serde::Deserialize;
use std::fmt;
use wasm_encoder::ValType;

/// Leading byte of every function type entry
pub const FUNCTION_TYPE_TAG: u8 = 0x60;

/// Block type byte for a block, loop or if that produces no value
pub const EMPTY_BLOCK_TYPE: u8 = 0x40;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    I32 = 0x7F,
    I64 = 0x7E,
    F32 = 0x7D,
    F64 = 0x7C,
}

impl ValueType {
    pub fn byte(self) -> u8 {
        self as u8
    }
}

impl From<ValueType> for ValType {
    fn from(value_type: ValueType) -> Self {
        match value_type {
            ValueType::I32 => ValType::I32,
            ValueType::I64 => ValType::I64,
            ValueType::F32 => ValType::F32,
            ValueType::F64 => ValType::F64,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::I32 => "i32",
            ValueType::I64 => "i64",
            ValueType::F32 => "f32",
            ValueType::F64 => "f64",
        };
        write!(f, "{}", name)
    }
}

/// Result annotation of a `block`, `loop` or `if`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockType {
    Empty,
    Value(ValueType),
}

impl BlockType {
    pub fn byte(self) -> u8 {
        match self {
            BlockType::Empty => EMPTY_BLOCK_TYPE,
            BlockType::Value(value_type) => value_type.byte(),
        }
    }
}

impl From<ValueType> for BlockType {
    fn from(value_type: ValueType) -> Self {
        BlockType::Value(value_type)
    }
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Function = 0x00,
    Table = 0x01,
    Memory = 0x02,
}

impl ExportKind {
    pub fn byte(self) -> u8 {
        self as u8
    }
}

impl From<ExportKind> for wasm_encoder::ExportKind {
    fn from(kind: ExportKind) -> Self {
        match kind {
            ExportKind::Function => wasm_encoder::ExportKind::Func,
            ExportKind::Table => wasm_encoder::ExportKind::Table,
            ExportKind::Memory => wasm_encoder::ExportKind::Memory,
        }
    }
}

impl fmt::Display for ExportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportKind::Function => "function",
            ExportKind::Table => "table",
            ExportKind::Memory => "memory",
        };
        write!(f, "{}", name)
    }
}

/// A function signature.
///
/// Signatures are compared by their encoded bytes, so the encoding is the
/// deduplication key used by the symbol table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FunctionType {
    pub params: Vec<ValueType>,
    pub results: Vec<ValueType>,
}

impl FunctionType {
    pub fn new(params: Vec<ValueType>, results: Vec<ValueType>) -> Self {
        FunctionType { params, results }
    }

    /// Create a function type with no parameters or results (void -> void)
    pub fn void() -> Self {
        FunctionType::default()
    }

    /// `0x60, vec(params), vec(results)`
    pub fn encode(&self) -> Vec<u8> {
        let params: Vec<u8> = self.params.iter().map(|t| t.byte()).collect();
        let results: Vec<u8> = self.results.iter().map(|t| t.byte()).collect();

        let mut bytes = Vec::with_capacity(params.len() + results.len() + 3);
        bytes.push(FUNCTION_TYPE_TAG);
        bytes.extend(leb128::vector(&params));
        bytes.extend(leb128::vector(&results));
        bytes
    }
}

impl fmt::Display for FunctionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |types: &[ValueType]| {
            types
                .iter()
                .map(|t| t.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };
        write!(f, "({}) -> ({})", join(&self.params), join(&self.results))
    }
}

/// One `(name, version)` value of the producers section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProducerEntry {
    pub name: String,
    #[serde(default)]
    pub version: String,
}

impl ProducerEntry {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        ProducerEntry {
            name: name.into(),
            version: version.into(),
        }
    }
}

#[cfg(test)]
#[path = "tests/types_tests.rs"]
mod tests;
