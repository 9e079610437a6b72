use super::*;
use crate::wasm::opcodes::Opcode;

#[test]
fn value_types_map_to_encoder_types() {
    assert_eq!(ValueType::I32.byte(), 0x7F);
    assert_eq!(ValType::from(ValueType::I32), ValType::I32);
    assert_eq!(ValType::from(ValueType::I64), ValType::I64);
    assert_eq!(ValType::from(ValueType::F32), ValType::F32);
    assert_eq!(ValType::from(ValueType::F64), ValType::F64);
}

#[test]
fn block_type_bytes() {
    assert_eq!(BlockType::Empty.byte(), 0x40);
    assert_eq!(BlockType::from(ValueType::I64).byte(), 0x7E);
}

#[test]
fn export_kind_bytes() {
    assert_eq!(ExportKind::Function.byte(), 0x00);
    assert_eq!(ExportKind::Table.byte(), 0x01);
    assert_eq!(ExportKind::Memory.byte(), 0x02);
    assert_eq!(ExportKind::Memory.to_string(), "memory");
    assert_eq!(
        wasm_encoder::ExportKind::from(ExportKind::Function),
        wasm_encoder::ExportKind::Func
    );
}

#[test]
fn void_signature_encoding() {
    assert_eq!(FunctionType::void().encode(), vec![FUNCTION_TYPE_TAG, 0x00, 0x00]);
}

#[test]
fn signature_display_lists_both_sides() {
    let signature = FunctionType::new(vec![ValueType::I32, ValueType::F32], vec![ValueType::I64]);
    assert_eq!(signature.to_string(), "(i32, f32) -> (i64)");
    assert_eq!(FunctionType::void().to_string(), "() -> ()");
}

#[test]
fn opcode_mnemonics_follow_the_text_format() {
    assert_eq!(Opcode::LocalTee.mnemonic(), "local.tee");
    assert_eq!(Opcode::I32DivS.mnemonic(), "i32.div_s");
    assert_eq!(Opcode::BrIf.byte(), 0x0D);
}
