//! Function Builder
//!
//! Assembles one function: its signature, local declarations and the raw
//! instruction byte stream. Each instruction method appends the opcode and
//! its operands immediately:
//! - integer constants as signed LEB128
//! - float constants as little-endian IEEE-754 bytes
//! - local indices, branch depths and call targets as unsigned LEB128
//! - block, loop and if annotations as a single block type byte
//!
//! Nothing here checks that the instruction sequence is well formed. The
//! caller is responsible for balanced blocks and a final `end`.
//!
//! ```rust
//! use wasmkit::wasm::symbol_table::SymbolTable;
//! use wasmkit::wasm::types::ValueType;
//!
//! let mut symbol_table = SymbolTable::new();
//! let add_ten = symbol_table
//!     .function()
//!     .param(ValueType::I32)
//!     .result(ValueType::I32)
//!     .local_get(0)
//!     .i32_const(10)
//!     .i32_add()
//!     .end()
//!     .build()
//!     .expect("no imports are referenced");
//!
//! assert_eq!(add_ten.index(), 0);
//! ```

use crate::codegen_log;
use crate::wasm::error::WasmEncodingError;
use crate::wasm::leb128;
use crate::wasm::opcodes::Opcode;
use crate::wasm::sections;
use crate::wasm::symbol_table::SymbolTable;
use crate::wasm::types::{BlockType, FunctionType, ValueType};

/// A finished function.
///
/// Cheap to clone; the symbol table keeps one copy and the caller keeps
/// another to call or export the function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionModule {
    signature: FunctionType,
    type_index: u32,
    index: u32,
    locals: Vec<u8>,
    instructions: Vec<u8>,
    body: Vec<u8>,
}

impl FunctionModule {
    /// Absolute function index (imports included)
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn type_index(&self) -> u32 {
        self.type_index
    }

    pub fn signature(&self) -> &FunctionType {
        &self.signature
    }

    /// Encoded `vec(locals)`
    pub fn locals(&self) -> &[u8] {
        &self.locals
    }

    pub fn instructions(&self) -> &[u8] {
        &self.instructions
    }

    /// Locals followed by instructions, as stored in the code section
    /// (without the size prefix)
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

pub struct FunctionBuilder<'table> {
    symbol_table: &'table mut SymbolTable,
    params: Vec<ValueType>,
    results: Vec<ValueType>,
    locals: Vec<Vec<u8>>,
    instructions: Vec<u8>,

    // Fixed when the builder is created so recursive calls can use it
    function_index: u32,

    // First call_import that could not be resolved, reported by build()
    unresolved_import: Option<WasmEncodingError>,
}

impl<'table> FunctionBuilder<'table> {
    pub fn new(symbol_table: &'table mut SymbolTable) -> Self {
        let function_index = symbol_table.next_function_index();
        FunctionBuilder {
            symbol_table,
            params: Vec::new(),
            results: Vec::new(),
            locals: Vec::new(),
            instructions: Vec::new(),
            function_index,
            unresolved_import: None,
        }
    }

    /// The absolute index this function will have once built
    pub fn function_index(&self) -> u32 {
        self.function_index
    }

    // =========================================================================
    // Signature and locals
    // =========================================================================

    pub fn param(mut self, value_type: ValueType) -> Self {
        self.params.push(value_type);
        self
    }

    pub fn params(mut self, value_types: &[ValueType]) -> Self {
        self.params.extend_from_slice(value_types);
        self
    }

    pub fn result(mut self, value_type: ValueType) -> Self {
        self.results.push(value_type);
        self
    }

    /// Declare `count` locals of one type. Local indices continue after the
    /// parameters, in declaration order.
    pub fn local(mut self, count: u32, value_type: ValueType) -> Self {
        self.locals
            .push(sections::locals_entry(count, value_type.byte()));
        self
    }

    // =========================================================================
    // Encoding helpers
    // =========================================================================

    fn emit(&mut self, opcode: Opcode) {
        codegen_log!("    ", opcode.mnemonic());
        self.instructions.push(opcode.byte());
    }

    fn op(mut self, opcode: Opcode) -> Self {
        self.emit(opcode);
        self
    }

    fn op_unsigned(mut self, opcode: Opcode, operand: u64) -> Self {
        self.emit(opcode);
        leb128::write_unsigned(&mut self.instructions, operand);
        self
    }

    fn op_signed(mut self, opcode: Opcode, operand: i64) -> Self {
        self.emit(opcode);
        leb128::write_signed(&mut self.instructions, operand);
        self
    }

    fn op_block(mut self, opcode: Opcode, block_type: BlockType) -> Self {
        self.emit(opcode);
        self.instructions.push(block_type.byte());
        self
    }

    // =========================================================================
    // Constants
    // =========================================================================

    pub fn i32_const(self, value: i32) -> Self {
        self.op_signed(Opcode::I32Const, value as i64)
    }

    pub fn i64_const(self, value: i64) -> Self {
        self.op_signed(Opcode::I64Const, value)
    }

    pub fn f32_const(mut self, value: f32) -> Self {
        self.emit(Opcode::F32Const);
        self.instructions.extend_from_slice(&value.to_le_bytes());
        self
    }

    pub fn f64_const(mut self, value: f64) -> Self {
        self.emit(Opcode::F64Const);
        self.instructions.extend_from_slice(&value.to_le_bytes());
        self
    }

    // =========================================================================
    // Locals
    // =========================================================================

    pub fn local_get(self, index: u32) -> Self {
        self.op_unsigned(Opcode::LocalGet, index as u64)
    }

    pub fn local_set(self, index: u32) -> Self {
        self.op_unsigned(Opcode::LocalSet, index as u64)
    }

    pub fn local_tee(self, index: u32) -> Self {
        self.op_unsigned(Opcode::LocalTee, index as u64)
    }

    // =========================================================================
    // i32 arithmetic and logic
    // =========================================================================

    pub fn i32_add(self) -> Self {
        self.op(Opcode::I32Add)
    }

    pub fn i32_sub(self) -> Self {
        self.op(Opcode::I32Sub)
    }

    pub fn i32_mul(self) -> Self {
        self.op(Opcode::I32Mul)
    }

    pub fn i32_div_s(self) -> Self {
        self.op(Opcode::I32DivS)
    }

    pub fn i32_and(self) -> Self {
        self.op(Opcode::I32And)
    }

    pub fn i32_or(self) -> Self {
        self.op(Opcode::I32Or)
    }

    // =========================================================================
    // i32 comparison
    // =========================================================================

    pub fn i32_eqz(self) -> Self {
        self.op(Opcode::I32Eqz)
    }

    pub fn i32_eq(self) -> Self {
        self.op(Opcode::I32Eq)
    }

    pub fn i32_ne(self) -> Self {
        self.op(Opcode::I32Ne)
    }

    pub fn i32_lt_s(self) -> Self {
        self.op(Opcode::I32LtS)
    }

    pub fn i32_lt_u(self) -> Self {
        self.op(Opcode::I32LtU)
    }

    pub fn i32_gt_s(self) -> Self {
        self.op(Opcode::I32GtS)
    }

    pub fn i32_gt_u(self) -> Self {
        self.op(Opcode::I32GtU)
    }

    pub fn i32_le_s(self) -> Self {
        self.op(Opcode::I32LeS)
    }

    pub fn i32_le_u(self) -> Self {
        self.op(Opcode::I32LeU)
    }

    pub fn i32_ge_s(self) -> Self {
        self.op(Opcode::I32GeS)
    }

    pub fn i32_ge_u(self) -> Self {
        self.op(Opcode::I32GeU)
    }

    // =========================================================================
    // Control flow
    // =========================================================================

    pub fn block(self, block_type: impl Into<BlockType>) -> Self {
        self.op_block(Opcode::Block, block_type.into())
    }

    pub fn loop_(self, block_type: impl Into<BlockType>) -> Self {
        self.op_block(Opcode::Loop, block_type.into())
    }

    pub fn if_(self, block_type: impl Into<BlockType>) -> Self {
        self.op_block(Opcode::If, block_type.into())
    }

    pub fn else_(self) -> Self {
        self.op(Opcode::Else)
    }

    pub fn end(self) -> Self {
        self.op(Opcode::End)
    }

    /// Branch to the enclosing label `depth` levels out.
    pub fn br(self, depth: u32) -> Self {
        self.op_unsigned(Opcode::Br, depth as u64)
    }

    pub fn br_if(self, depth: u32) -> Self {
        self.op_unsigned(Opcode::BrIf, depth as u64)
    }

    // =========================================================================
    // Calls
    // =========================================================================

    /// Call a function that has already been built.
    pub fn call(self, function: &FunctionModule) -> Self {
        let index = function.index();
        self.op_unsigned(Opcode::Call, index as u64)
    }

    /// Call the function being built.
    pub fn call_self(self) -> Self {
        let index = self.function_index;
        self.op_unsigned(Opcode::Call, index as u64)
    }

    /// Call an import declared in the symbol table.
    ///
    /// An undeclared import emits nothing and makes `build` fail.
    pub fn call_import(mut self, module: &str, field: &str) -> Self {
        match self.symbol_table.resolve_import(module, field) {
            Ok(index) => self.op_unsigned(Opcode::Call, index as u64),
            Err(error) => {
                if self.unresolved_import.is_none() {
                    self.unresolved_import = Some(error);
                }
                self
            }
        }
    }

    // =========================================================================
    // Finalization
    // =========================================================================

    /// Register the signature, assemble the body and add the function to
    /// the symbol table.
    pub fn build(self) -> Result<FunctionModule, WasmEncodingError> {
        if let Some(error) = self.unresolved_import {
            return Err(error);
        }

        let signature = FunctionType::new(self.params, self.results);
        let type_index = self.symbol_table.register_type(&signature);
        let body = sections::function_body(&self.locals, &self.instructions);

        let function = FunctionModule {
            signature,
            type_index,
            index: self.function_index,
            locals: leb128::nested_vector(&self.locals),
            instructions: self.instructions,
            body,
        };

        codegen_log!(
            "Built function ",
            function.index,
            " with type ",
            type_index,
            " (",
            function.body.len(),
            " body bytes)"
        );

        self.symbol_table.push_function(function.clone());
        Ok(function)
    }
}

#[cfg(test)]
#[path = "tests/function_builder_tests.rs"]
mod tests;
