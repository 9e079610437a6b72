//! WASM Module Builder
//!
//! Collects built functions, exports and producers metadata, then assembles
//! a `wasm_encoder::Module` with the sections in their required order:
//! 1. Type Section - every signature registered in the symbol table
//! 2. Import Section - only when the symbol table declares imports
//! 3. Function Section - type index of each included function
//! 4. Export Section - only when something is exported
//! 5. Code Section - function bodies, in the same order as the Function Section
//! 6. Custom `producers` Section - only when metadata was added
//!
//! The builder owns the symbol table for the rest of the session, so
//! functions can still be built through `ModuleBuilder::function`.
//!
//! ## Index coordination
//!
//! Included functions are kept in a map ordered by absolute index. The
//! Function and Code sections are written in that order, and `build`
//! refuses to emit a module where a position would not match its index
//! (a function was built but never added). Function exports are stored
//! section-relative and converted back to absolute indices when encoded.

use crate::codegen_log;
use crate::file_output;
use crate::return_wasm_error;
use crate::settings::{EncoderConfig, WASM_FILE_EXTENSION};
use crate::wasm::error::WasmEncodingError;
use crate::wasm::function_builder::{FunctionBuilder, FunctionModule};
use crate::wasm::sections;
use crate::wasm::symbol_table::{SymbolTable, absolute_index, section_relative_index};
use crate::wasm::types::{ExportKind, ProducerEntry};
use rustc_hash::FxHashSet;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use wasm_encoder::Module;

/// What an export refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportTarget {
    /// Absolute function index
    Function(u32),
    Table(u32),
    Memory(u32),
}

impl ExportTarget {
    pub fn kind(&self) -> ExportKind {
        match self {
            ExportTarget::Function(_) => ExportKind::Function,
            ExportTarget::Table(_) => ExportKind::Table,
            ExportTarget::Memory(_) => ExportKind::Memory,
        }
    }
}

impl From<&FunctionModule> for ExportTarget {
    fn from(function: &FunctionModule) -> Self {
        ExportTarget::Function(function.index())
    }
}

/// A recorded export.
///
/// For functions `index` is section-relative (imports excluded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportEntry {
    pub name: String,
    pub kind: ExportKind,
    pub index: u32,
}

pub struct ModuleBuilder {
    symbol_table: SymbolTable,

    // Type index of each import, registered when the session starts
    import_types: Vec<u32>,

    // Included functions keyed by absolute index
    functions: BTreeMap<u32, FunctionModule>,

    exports: Vec<ExportEntry>,
    export_names: FxHashSet<String>,

    // Function exports that pointed at an import, reported by build()
    rejected_exports: Vec<(String, u32)>,

    languages: Vec<ProducerEntry>,
    tools: Vec<ProducerEntry>,
    sdks: Vec<ProducerEntry>,

    output_extension: String,
}

impl ModuleBuilder {
    /// Start a module session over a symbol table.
    ///
    /// Every declared import becomes an Import entry right away and its
    /// signature is registered like any other.
    pub fn new(mut symbol_table: SymbolTable) -> Self {
        let imports = symbol_table.imports().to_vec();
        let mut import_types = Vec::with_capacity(imports.len());

        for import in &imports {
            let type_index = symbol_table.register_type(&import.signature());
            codegen_log!(
                "Import ",
                import.module_name,
                ".",
                import.field_name,
                " uses type ",
                type_index
            );
            import_types.push(type_index);
        }

        ModuleBuilder {
            symbol_table,
            import_types,
            functions: BTreeMap::new(),
            exports: Vec::new(),
            export_names: FxHashSet::default(),
            rejected_exports: Vec::new(),
            languages: Vec::new(),
            tools: Vec::new(),
            sdks: Vec::new(),
            output_extension: String::from(WASM_FILE_EXTENSION),
        }
    }

    /// Start a session and seed producers metadata and the output extension
    /// from encoder settings.
    pub fn with_config(symbol_table: SymbolTable, config: &EncoderConfig) -> Self {
        let mut builder = ModuleBuilder::new(symbol_table);
        builder.languages = config.producers.language.clone();
        builder.tools = config.producers.processed_by.clone();
        builder.sdks = config.producers.sdk.clone();
        builder.output_extension = config.output_extension.clone();
        builder
    }

    /// Build another function against the owned symbol table.
    pub fn function(&mut self) -> FunctionBuilder<'_> {
        self.symbol_table.function()
    }

    // =========================================================================
    // Function Methods
    // =========================================================================

    /// Include a built function. Adding the same function again does nothing.
    pub fn add_function(&mut self, function: &FunctionModule) -> &mut Self {
        self.functions
            .entry(function.index())
            .or_insert_with(|| function.clone());
        self
    }

    // =========================================================================
    // Export Methods
    // =========================================================================

    /// Export a function, table or memory under `name`.
    ///
    /// A name that is already exported is ignored. Exporting an imported
    /// function is reported when the module is built.
    pub fn export(&mut self, name: &str, target: impl Into<ExportTarget>) -> &mut Self {
        if self.export_names.contains(name) {
            return self;
        }

        let target = target.into();
        let index = match target {
            ExportTarget::Function(absolute) => {
                match section_relative_index(absolute, self.import_count()) {
                    Some(relative) => relative,
                    None => {
                        self.rejected_exports.push((name.to_owned(), absolute));
                        return self;
                    }
                }
            }
            ExportTarget::Table(index) | ExportTarget::Memory(index) => index,
        };

        self.export_names.insert(name.to_owned());
        self.exports.push(ExportEntry {
            name: name.to_owned(),
            kind: target.kind(),
            index,
        });
        self
    }

    // =========================================================================
    // Producers Metadata
    // =========================================================================

    pub fn add_language(&mut self, name: &str, version: &str) -> &mut Self {
        self.languages.push(ProducerEntry::new(name, version));
        self
    }

    pub fn add_tool(&mut self, name: &str, version: &str) -> &mut Self {
        self.tools.push(ProducerEntry::new(name, version));
        self
    }

    pub fn add_sdk(&mut self, name: &str, version: &str) -> &mut Self {
        self.sdks.push(ProducerEntry::new(name, version));
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn import_count(&self) -> u32 {
        self.symbol_table.import_count()
    }

    /// Number of functions included in the module (imports excluded)
    pub fn function_count(&self) -> u32 {
        self.functions.len() as u32
    }

    pub fn export_count(&self) -> u32 {
        self.exports.len() as u32
    }

    pub fn exports(&self) -> &[ExportEntry] {
        &self.exports
    }

    pub fn symbol_table(&self) -> &SymbolTable {
        &self.symbol_table
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Every included function must sit at the position its index implies.
    fn validate_function_indices(&self) -> Result<(), WasmEncodingError> {
        let import_count = self.import_count();
        for (position, &index) in self.functions.keys().enumerate() {
            let expected = absolute_index(position as u32, import_count);
            if index != expected {
                return_wasm_error!(index_error: "function", index, expected);
            }
        }
        Ok(())
    }

    fn validate_exports(&self) -> Result<(), WasmEncodingError> {
        if let Some((name, absolute)) = self.rejected_exports.first() {
            return Err(WasmEncodingError::export_error(
                name,
                "function",
                format!(
                    "Function index {} belongs to an import (imports: {})",
                    absolute,
                    self.import_count()
                ),
            ));
        }

        for export in &self.exports {
            if export.kind != ExportKind::Function {
                continue;
            }

            let absolute = absolute_index(export.index, self.import_count());
            if self.functions.contains_key(&absolute) {
                continue;
            }

            let context = match self.symbol_table.function_by_index(absolute) {
                Some(_) => format!(
                    "Function {} was built but never added to the module",
                    absolute
                ),
                None => format!(
                    "Function index {} is out of bounds (max: {})",
                    absolute,
                    self.symbol_table.next_function_index().saturating_sub(1)
                ),
            };
            return_wasm_error!(export_error: &export.name, "function", context);
        }
        Ok(())
    }

    // =========================================================================
    // Finalization
    // =========================================================================

    /// Encode the module.
    ///
    /// The builder is left untouched, so this can be called again after
    /// more functions or exports are added.
    pub fn build(&self) -> Result<Vec<u8>, WasmEncodingError> {
        self.validate_function_indices()?;
        self.validate_exports()?;

        let mut module = Module::new();

        // 1. Type Section
        sections::append(
            &mut module,
            &sections::type_section(self.symbol_table.signatures()),
        );

        // 2. Import Section
        if !self.import_types.is_empty() {
            sections::append(
                &mut module,
                &sections::import_section(self.symbol_table.imports(), &self.import_types),
            );
        }

        // 3. Function Section (declarations)
        let type_indices: Vec<u32> = self.functions.values().map(|f| f.type_index()).collect();
        sections::append(&mut module, &sections::function_section(&type_indices));

        // 4. Export Section
        if !self.exports.is_empty() {
            sections::append(
                &mut module,
                &sections::export_section(&self.exports, self.import_count()),
            );
        }

        // 5. Code Section (function bodies)
        let bodies: Vec<&[u8]> = self.functions.values().map(|f| f.body()).collect();
        sections::append(&mut module, &sections::code_section(&bodies));

        // 6. Producers custom section
        if let Some(producers) =
            sections::producers_section(&self.languages, &self.tools, &self.sdks)
        {
            sections::append(&mut module, &producers);
        }

        let bytes = module.finish();
        codegen_log!("Module encoded: ", bytes.len(), " bytes");
        Ok(bytes)
    }

    /// Encode the module and write it to `name`, adding the output extension
    /// when the name does not already end with it.
    pub fn build_to_file(&self, name: impl AsRef<Path>) -> Result<PathBuf, WasmEncodingError> {
        let bytes = self.build()?;
        let path = file_output::with_wasm_extension(name.as_ref(), &self.output_extension);
        file_output::write_wasm_file(&path, &bytes)
    }
}

impl Default for ModuleBuilder {
    fn default() -> Self {
        ModuleBuilder::new(SymbolTable::new())
    }
}

#[cfg(test)]
#[path = "tests/module_builder_tests.rs"]
mod tests;
