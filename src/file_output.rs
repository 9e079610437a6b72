use crate::codegen_log;
use crate::wasm::error::WasmEncodingError;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Append `.{extension}` unless the file name already ends with it.
///
/// Any other extension is kept, so `out.v2` becomes `out.v2.wasm`. A bare
/// `.wasm` counts as ending with it even though `Path` reads it as a stem.
pub fn with_wasm_extension(name: &Path, extension: &str) -> PathBuf {
    let suffix = format!(".{}", extension);
    if name.as_os_str().as_encoded_bytes().ends_with(suffix.as_bytes()) {
        return name.to_path_buf();
    }

    let mut file_name = OsString::from(name.as_os_str());
    file_name.push(".");
    file_name.push(extension);
    PathBuf::from(file_name)
}

/// Write an encoded module, creating the parent directory if needed.
pub fn write_wasm_file(path: &Path, bytes: &[u8]) -> Result<PathBuf, WasmEncodingError> {
    // If the output directory does not exist, create it
    if let Some(parent_dir) = path.parent() {
        if !parent_dir.as_os_str().is_empty() && fs::metadata(parent_dir).is_err() {
            fs::create_dir_all(parent_dir)
                .map_err(|e| WasmEncodingError::file_error(path, e))?;
        }
    }

    fs::write(path, bytes).map_err(|e| WasmEncodingError::file_error(path, e))?;

    codegen_log!("Wrote ", bytes.len(), " bytes to ", path.display());
    Ok(path.to_path_buf())
}

#[cfg(test)]
#[path = "tests/file_output_tests.rs"]
mod tests;
