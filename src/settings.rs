use crate::wasm::error::WasmEncodingError;
use crate::wasm::types::ProducerEntry;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const WASM_FILE_EXTENSION: &str = "wasm";

/// Encoder settings, usually read from a small TOML file:
///
/// ```toml
/// output_extension = "wasm"
///
/// [producers]
/// language = [{ name = "Shark", version = "0.0.1" }]
/// processed-by = [{ name = "wasmkit", version = "0.1.0" }]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncoderConfig {
    pub output_extension: String,
    pub producers: ProducersConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProducersConfig {
    pub language: Vec<ProducerEntry>,
    #[serde(rename = "processed-by")]
    pub processed_by: Vec<ProducerEntry>,
    pub sdk: Vec<ProducerEntry>,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        EncoderConfig {
            output_extension: String::from(WASM_FILE_EXTENSION),
            producers: ProducersConfig::default(),
        }
    }
}

impl EncoderConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, WasmEncodingError> {
        let config: EncoderConfig = toml::from_str(source)
            .map_err(|e| WasmEncodingError::config_error(e.to_string()))?;

        // A leading dot would end up doubled when the extension is appended
        if config.output_extension.is_empty() || config.output_extension.starts_with('.') {
            return Err(WasmEncodingError::config_error(format!(
                "output_extension must be a bare extension like \"{}\", got \"{}\"",
                WASM_FILE_EXTENSION, config.output_extension
            )));
        }

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, WasmEncodingError> {
        let source = fs::read_to_string(path).map_err(|e| {
            WasmEncodingError::config_error(format!(
                "Could not read {}: {}",
                path.display(),
                e
            ))
        })?;
        EncoderConfig::from_toml_str(&source)
    }
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
