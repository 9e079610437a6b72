//! Instruction opcodes emitted by the function builder.
//!
//! Only the subset the builder knows how to emit is listed. Values are the
//! single-byte opcodes from the WebAssembly 1.0 binary format.

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    // Control
    Block = 0x02,
    Loop = 0x03,
    If = 0x04,
    Else = 0x05,
    End = 0x0B,
    Br = 0x0C,
    BrIf = 0x0D,
    Call = 0x10,

    // Locals
    LocalGet = 0x20,
    LocalSet = 0x21,
    LocalTee = 0x22,

    // Constants
    I32Const = 0x41,
    I64Const = 0x42,
    F32Const = 0x43,
    F64Const = 0x44,

    // i32 comparison
    I32Eqz = 0x45,
    I32Eq = 0x46,
    I32Ne = 0x47,
    I32LtS = 0x48,
    I32LtU = 0x49,
    I32GtS = 0x4A,
    I32GtU = 0x4B,
    I32LeS = 0x4C,
    I32LeU = 0x4D,
    I32GeS = 0x4E,
    I32GeU = 0x4F,

    // i32 arithmetic
    I32Add = 0x6A,
    I32Sub = 0x6B,
    I32Mul = 0x6C,
    I32DivS = 0x6D,
    I32And = 0x71,
    I32Or = 0x72,
}

impl Opcode {
    pub fn byte(self) -> u8 {
        self as u8
    }

    /// Text format mnemonic, used in dev logging
    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Block => "block",
            Opcode::Loop => "loop",
            Opcode::If => "if",
            Opcode::Else => "else",
            Opcode::End => "end",
            Opcode::Br => "br",
            Opcode::BrIf => "br_if",
            Opcode::Call => "call",
            Opcode::LocalGet => "local.get",
            Opcode::LocalSet => "local.set",
            Opcode::LocalTee => "local.tee",
            Opcode::I32Const => "i32.const",
            Opcode::I64Const => "i64.const",
            Opcode::F32Const => "f32.const",
            Opcode::F64Const => "f64.const",
            Opcode::I32Eqz => "i32.eqz",
            Opcode::I32Eq => "i32.eq",
            Opcode::I32Ne => "i32.ne",
            Opcode::I32LtS => "i32.lt_s",
            Opcode::I32LtU => "i32.lt_u",
            Opcode::I32GtS => "i32.gt_s",
            Opcode::I32GtU => "i32.gt_u",
            Opcode::I32LeS => "i32.le_s",
            Opcode::I32LeU => "i32.le_u",
            Opcode::I32GeS => "i32.ge_s",
            Opcode::I32GeU => "i32.ge_u",
            Opcode::I32Add => "i32.add",
            Opcode::I32Sub => "i32.sub",
            Opcode::I32Mul => "i32.mul",
            Opcode::I32DivS => "i32.div_s",
            Opcode::I32And => "i32.and",
            Opcode::I32Or => "i32.or",
        }
    }
}
