//! Symbol Table
//!
//! The single source of truth for type deduplication and function index
//! assignment across every function destined for one module.
//!
//! ## Index spaces
//!
//! Functions share one index space. Imports come first and get
//! `0..import_count`, then locally defined functions follow in build order.
//! A function builder records its absolute index when it is created
//! (`import_count + functions built so far`) and the function is appended
//! to the table when `build` completes.
//!
//! Builders hold the table by `&mut`, so nothing else can be built while a
//! builder is alive. That is what keeps the recorded index valid for
//! recursive calls made before the function is finished.

use crate::codegen_log;
use crate::wasm::error::WasmEncodingError;
use crate::wasm::function_builder::{FunctionBuilder, FunctionModule};
use crate::wasm::types::{FunctionType, ValueType};

/// A function provided by the host, declared up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDeclaration {
    pub module_name: String,
    pub field_name: String,
    pub params: Vec<ValueType>,
    pub results: Vec<ValueType>,
}

impl ImportDeclaration {
    pub fn new(
        module_name: impl Into<String>,
        field_name: impl Into<String>,
        params: Vec<ValueType>,
        results: Vec<ValueType>,
    ) -> Self {
        ImportDeclaration {
            module_name: module_name.into(),
            field_name: field_name.into(),
            params,
            results,
        }
    }

    pub fn signature(&self) -> FunctionType {
        FunctionType::new(self.params.clone(), self.results.clone())
    }
}

#[derive(Debug, Default)]
pub struct SymbolTable {
    /// Encoded signatures, one per distinct encoding. The dedup key.
    function_types: Vec<Vec<u8>>,
    /// The same signatures in structured form, by type index
    signatures: Vec<FunctionType>,
    /// Built local functions in build order
    functions: Vec<FunctionModule>,
    imports: Vec<ImportDeclaration>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable::default()
    }

    /// Create a table whose function index space starts with these imports.
    pub fn with_imports(imports: Vec<ImportDeclaration>) -> Self {
        SymbolTable {
            function_types: Vec::new(),
            signatures: Vec::new(),
            functions: Vec::new(),
            imports,
        }
    }

    /// Start building a function bound to this table.
    pub fn function(&mut self) -> FunctionBuilder<'_> {
        FunctionBuilder::new(self)
    }

    // =========================================================================
    // Types
    // =========================================================================

    /// Return the index of an identical signature, or append this one.
    ///
    /// Signatures are matched on their encoded bytes. The first signature
    /// registered keeps the slot.
    pub fn register_type(&mut self, signature: &FunctionType) -> u32 {
        if let Some(existing) = self.find_type(signature) {
            return existing;
        }

        let type_index = self.function_types.len() as u32;
        self.function_types.push(signature.encode());
        self.signatures.push(signature.clone());
        codegen_log!("Registered type ", type_index, ": ", signature);
        type_index
    }

    pub fn find_type(&self, signature: &FunctionType) -> Option<u32> {
        let encoded = signature.encode();
        self.function_types
            .iter()
            .position(|t| *t == encoded)
            .map(|index| index as u32)
    }

    pub fn function_types(&self) -> &[Vec<u8>] {
        &self.function_types
    }

    /// Registered signatures in type index order
    pub fn signatures(&self) -> &[FunctionType] {
        &self.signatures
    }

    pub fn type_count(&self) -> u32 {
        self.function_types.len() as u32
    }

    // =========================================================================
    // Imports
    // =========================================================================

    pub fn imports(&self) -> &[ImportDeclaration] {
        &self.imports
    }

    pub fn import_count(&self) -> u32 {
        self.imports.len() as u32
    }

    /// Function index of the import `module.field`, if declared.
    pub fn import_index(&self, module: &str, field: &str) -> Option<u32> {
        self.imports
            .iter()
            .position(|import| import.module_name == module && import.field_name == field)
            .map(|index| index as u32)
    }

    pub fn resolve_import(&self, module: &str, field: &str) -> Result<u32, WasmEncodingError> {
        self.import_index(module, field)
            .ok_or_else(|| WasmEncodingError::unresolved_import(module, field))
    }

    // =========================================================================
    // Functions
    // =========================================================================

    pub fn functions(&self) -> &[FunctionModule] {
        &self.functions
    }

    /// Number of local functions built so far
    pub fn function_count(&self) -> u32 {
        self.functions.len() as u32
    }

    /// Absolute index the next built function will receive.
    pub fn next_function_index(&self) -> u32 {
        self.import_count() + self.function_count()
    }

    /// Look up a built function by its absolute index.
    pub fn function_by_index(&self, index: u32) -> Option<&FunctionModule> {
        let relative = section_relative_index(index, self.import_count())?;
        self.functions.get(relative as usize)
    }

    pub(crate) fn push_function(&mut self, function: FunctionModule) {
        self.functions.push(function);
    }
}

// =========================================================================
// Index translation
// =========================================================================

/// Convert an absolute function index to its position among local functions.
///
/// Returns `None` for indices that belong to imports.
pub fn section_relative_index(absolute: u32, import_count: u32) -> Option<u32> {
    absolute.checked_sub(import_count)
}

/// Convert a local function position back to the absolute function index.
pub fn absolute_index(relative: u32, import_count: u32) -> u32 {
    relative + import_count
}

#[cfg(test)]
#[path = "tests/symbol_table_tests.rs"]
mod tests;
