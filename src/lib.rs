//! # wasmkit
//!
//! A small encoder for WebAssembly binary modules. Functions are assembled
//! instruction by instruction with a fluent builder, then collected into a
//! module with exports and optional producers metadata.
//!
//! ```rust
//! use wasmkit::{ModuleBuilder, SymbolTable, ImportDeclaration, ValueType};
//!
//! let table = SymbolTable::with_imports(vec![ImportDeclaration::new(
//!     "env",
//!     "log",
//!     vec![ValueType::I32],
//!     vec![],
//! )]);
//! let mut module = ModuleBuilder::new(table);
//!
//! let main = module
//!     .function()
//!     .i32_const(42)
//!     .call_import("env", "log")
//!     .end()
//!     .build()?;
//!
//! module
//!     .add_function(&main)
//!     .export("main", &main)
//!     .add_tool("wasmkit", env!("CARGO_PKG_VERSION"));
//!
//! let bytes = module.build()?;
//! assert_eq!(&bytes[..4], b"\0asm");
//! # Ok::<(), wasmkit::WasmEncodingError>(())
//! ```
//!
//! Modules are not validated. Balanced blocks, stack types and local
//! indices are the caller's responsibility.

mod encoder_dev_logging;

pub mod file_output;
pub mod settings;

pub mod wasm {
    pub mod error;
    pub mod function_builder;
    pub mod leb128;
    pub mod module_builder;
    pub mod opcodes;
    pub mod sections;
    pub mod symbol_table;
    pub mod types;
}

pub use settings::EncoderConfig;
pub use wasm::error::{ErrorType, WasmEncodingError};
pub use wasm::function_builder::{FunctionBuilder, FunctionModule};
pub use wasm::module_builder::{ExportEntry, ExportTarget, ModuleBuilder};
pub use wasm::symbol_table::{ImportDeclaration, SymbolTable};
pub use wasm::types::{BlockType, ExportKind, FunctionType, ValueType};
