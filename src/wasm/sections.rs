//! Section Assembly
//!
//! Turns what the symbol table and module builder have collected into
//! `wasm_encoder` sections. Framing, the module header and the `producers`
//! payload are written by `wasm_encoder`; the only bytes assembled here are
//! function bodies (`vec(locals)` followed by the raw instruction stream),
//! which go into the Code section untouched through `CodeSection::raw`.
//!
//! Sections must be appended in this order, and each kind at most once:
//! Type, Import, Function, Export, Code. Custom sections may go anywhere;
//! the module builder puts the producers section last.

use crate::section_log;
use crate::wasm::leb128;
use crate::wasm::module_builder::ExportEntry;
use crate::wasm::symbol_table::{ImportDeclaration, absolute_index};
use crate::wasm::types::{ExportKind, FunctionType, ProducerEntry};
use wasm_encoder::{
    CodeSection, EntityType, ExportSection, FunctionSection, ImportSection, Module,
    ProducersField, ProducersSection, Section, TypeSection,
};

/// Append a section to the module, logging its id.
pub fn append(module: &mut Module, section: &impl Section) {
    section_log!("Section id ", section.id());
    module.section(section);
}

/// Type section from the canonical signatures, in type index order.
pub fn type_section(signatures: &[FunctionType]) -> TypeSection {
    let mut types = TypeSection::new();
    for signature in signatures {
        types.ty().function(
            signature.params.iter().map(|&t| t.into()),
            signature.results.iter().map(|&t| t.into()),
        );
    }
    types
}

/// Import section: each import paired with its registered type index.
pub fn import_section(imports: &[ImportDeclaration], type_indices: &[u32]) -> ImportSection {
    let mut section = ImportSection::new();
    for (import, &type_index) in imports.iter().zip(type_indices) {
        section.import(
            &import.module_name,
            &import.field_name,
            EntityType::Function(type_index),
        );
    }
    section
}

/// Function section: the type index of each locally defined function.
pub fn function_section(type_indices: &[u32]) -> FunctionSection {
    let mut section = FunctionSection::new();
    for &type_index in type_indices {
        section.function(type_index);
    }
    section
}

/// Export section.
///
/// Function exports are stored section-relative; the import count is added
/// back here so the wire value is the absolute function index. Table and
/// memory indices are written as given.
pub fn export_section(exports: &[ExportEntry], import_count: u32) -> ExportSection {
    let mut section = ExportSection::new();
    for export in exports {
        let wire_index = match export.kind {
            ExportKind::Function => absolute_index(export.index, import_count),
            ExportKind::Table | ExportKind::Memory => export.index,
        };
        section.export(&export.name, export.kind.into(), wire_index);
    }
    section
}

/// A local declaration entry: how many locals of one type.
pub fn locals_entry(count: u32, value_type_byte: u8) -> Vec<u8> {
    let mut bytes = leb128::unsigned(count as u64);
    bytes.push(value_type_byte);
    bytes
}

/// A function body without its size prefix: `vec(locals), instructions`.
pub fn function_body<T: AsRef<[u8]>>(locals: &[T], instructions: &[u8]) -> Vec<u8> {
    let mut body = leb128::nested_vector(locals);
    body.extend_from_slice(instructions);
    body
}

/// Code section from pre-assembled bodies. `wasm_encoder` adds the size
/// prefix of each body.
pub fn code_section<T: AsRef<[u8]>>(bodies: &[T]) -> CodeSection {
    let mut section = CodeSection::new();
    for body in bodies {
        section.raw(body.as_ref());
    }
    section
}

/// The `producers` custom section, or `None` without any metadata.
///
/// Fields are written in the fixed order language, processed-by, sdk, and
/// a field is left out entirely when it has no values.
pub fn producers_section(
    languages: &[ProducerEntry],
    tools: &[ProducerEntry],
    sdks: &[ProducerEntry],
) -> Option<ProducersSection> {
    let fields = [
        ("language", languages),
        ("processed-by", tools),
        ("sdk", sdks),
    ];

    let mut section = ProducersSection::new();
    let mut has_fields = false;
    for (field_name, values) in fields {
        if values.is_empty() {
            continue;
        }
        let mut field = ProducersField::new();
        for value in values {
            field.value(&value.name, &value.version);
        }
        section.field(field_name, &field);
        has_fields = true;
    }

    has_fields.then_some(section)
}

#[cfg(test)]
#[path = "tests/sections_tests.rs"]
mod tests;
