//! WASM Encoding Error Types
//!
//! Errors the encoder can report. The encoder trusts the caller for
//! instruction-level correctness, so these only cover what it can check
//! itself:
//!
//! ### Reference Errors
//! - A call to an import that the symbol table never declared
//! - Function or export indices that would not line up once serialized
//!
//! ### Output Errors
//! - Writing the finished module to disk failed
//! - The encoder settings file could not be read or parsed
//!
//! Duplicate export names and adding the same function twice are not
//! errors; both are silently ignored.
//!
//! ## Usage
//!
//! ```rust
//! use wasmkit::wasm::error::WasmEncodingError;
//!
//! let error = WasmEncodingError::unresolved_import("env", "print");
//! assert_eq!(error.to_string(), "Unresolved import 'env.print'");
//! ```

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Broad category of an encoding error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorType {
    /// The module being described is inconsistent
    Encoding,
    /// Reading or writing a file failed
    File,
    /// Malformed encoder settings
    Config,
}

#[derive(Debug)]
pub enum WasmEncodingError {
    /// A call names an import that is not declared in the symbol table.
    ///
    /// The call target cannot be encoded, so the function is not built.
    UnresolvedImport {
        /// Import module name (e.g. "env")
        module: String,
        /// Import field name (e.g. "print")
        field: String,
    },

    /// An index would not refer to the right item once serialized.
    IndexError {
        /// The index space the index belongs to
        section: String,
        /// The offending index
        index: u32,
        /// The index that was expected at this position
        expected: u32,
    },

    /// An export cannot be encoded.
    ExportError {
        /// Name of the export
        export_name: String,
        /// Kind of export (function, table, memory)
        export_kind: String,
        /// Description of the error
        context: String,
    },

    /// Writing the module failed. The I/O error is kept as is.
    File { path: PathBuf, source: io::Error },

    /// Encoder settings could not be loaded.
    Config { context: String },
}

impl WasmEncodingError {
    /// Create an unresolved import error.
    pub fn unresolved_import(module: impl Into<String>, field: impl Into<String>) -> Self {
        WasmEncodingError::UnresolvedImport {
            module: module.into(),
            field: field.into(),
        }
    }

    /// Create an index error.
    pub fn index_error(section: impl Into<String>, index: u32, expected: u32) -> Self {
        WasmEncodingError::IndexError {
            section: section.into(),
            index,
            expected,
        }
    }

    /// Create an export error.
    pub fn export_error(
        export_name: impl Into<String>,
        export_kind: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        WasmEncodingError::ExportError {
            export_name: export_name.into(),
            export_kind: export_kind.into(),
            context: context.into(),
        }
    }

    pub fn file_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        WasmEncodingError::File {
            path: path.into(),
            source,
        }
    }

    pub fn config_error(context: impl Into<String>) -> Self {
        WasmEncodingError::Config {
            context: context.into(),
        }
    }

    pub fn error_type(&self) -> ErrorType {
        match self {
            WasmEncodingError::UnresolvedImport { .. }
            | WasmEncodingError::IndexError { .. }
            | WasmEncodingError::ExportError { .. } => ErrorType::Encoding,
            WasmEncodingError::File { .. } => ErrorType::File,
            WasmEncodingError::Config { .. } => ErrorType::Config,
        }
    }

    /// A one-line hint for fixing the problem
    pub fn suggestion(&self) -> &'static str {
        match self {
            WasmEncodingError::UnresolvedImport { .. } => {
                "Declare the import when creating the symbol table before calling it"
            }
            WasmEncodingError::IndexError { .. } => {
                "Add every built function to the module builder so function positions match their indices"
            }
            WasmEncodingError::ExportError { .. } => {
                "Only export functions defined in this module"
            }
            WasmEncodingError::File { .. } => {
                "Check that the output directory exists and is writable"
            }
            WasmEncodingError::Config { .. } => "Check the encoder settings file for TOML errors",
        }
    }
}

impl fmt::Display for WasmEncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WasmEncodingError::UnresolvedImport { module, field } => {
                write!(f, "Unresolved import '{}.{}'", module, field)
            }
            WasmEncodingError::IndexError {
                section,
                index,
                expected,
            } => write!(
                f,
                "Invalid {} index {} (expected {})",
                section, index, expected
            ),
            WasmEncodingError::ExportError {
                export_name,
                export_kind,
                context,
            } => write!(
                f,
                "Cannot export {} '{}': {}",
                export_kind, export_name, context
            ),
            WasmEncodingError::File { path, source } => {
                write!(f, "Error writing file {}: {}", path.display(), source)
            }
            WasmEncodingError::Config { context } => {
                write!(f, "Malformed encoder settings: {}", context)
            }
        }
    }
}

impl std::error::Error for WasmEncodingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WasmEncodingError::File { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience macro for returning WASM encoding errors.
///
/// Usage:
/// ```rust,ignore
/// return_wasm_error!(unresolved_import: "env", "print");
/// return_wasm_error!(index_error: "function", index, expected);
/// ```
#[macro_export]
macro_rules! return_wasm_error {
    (unresolved_import: $module:expr, $field:expr) => {
        return Err($crate::wasm::error::WasmEncodingError::unresolved_import(
            $module, $field,
        ))
    };
    (index_error: $section:expr, $index:expr, $expected:expr) => {
        return Err($crate::wasm::error::WasmEncodingError::index_error(
            $section, $index, $expected,
        ))
    };
    (export_error: $name:expr, $kind:expr, $context:expr) => {
        return Err($crate::wasm::error::WasmEncodingError::export_error(
            $name, $kind, $context,
        ))
    };
}

#[cfg(test)]
#[path = "tests/error_tests.rs"]
mod tests;
