use super::*;

#[test]
fn empty_settings_fall_back_to_defaults() {
    let config = EncoderConfig::from_toml_str("").unwrap();
    assert_eq!(config, EncoderConfig::default());
    assert_eq!(config.output_extension, "wasm");
    assert!(config.producers.language.is_empty());
}

#[test]
fn producers_table_is_read_in_field_order() {
    let config = EncoderConfig::from_toml_str(
        r#"
        output_extension = "bin"

        [producers]
        language = [{ name = "Shark", version = "0.0.1" }]
        processed-by = [
            { name = "wasmkit", version = "0.1.0" },
            { name = "wasm-opt" },
        ]
        sdk = [{ name = "Orp", version = "0.0.1" }]
        "#,
    )
    .unwrap();

    assert_eq!(config.output_extension, "bin");
    assert_eq!(config.producers.language, vec![ProducerEntry::new("Shark", "0.0.1")]);
    assert_eq!(
        config.producers.processed_by,
        vec![
            ProducerEntry::new("wasmkit", "0.1.0"),
            ProducerEntry::new("wasm-opt", ""),
        ]
    );
    assert_eq!(config.producers.sdk, vec![ProducerEntry::new("Orp", "0.0.1")]);
}

#[test]
fn malformed_toml_is_a_config_error() {
    let error = EncoderConfig::from_toml_str("output_extension = ").unwrap_err();
    assert!(matches!(error, WasmEncodingError::Config { .. }));
    assert_eq!(error.error_type(), crate::wasm::error::ErrorType::Config);
}

#[test]
fn unknown_keys_are_rejected() {
    let error = EncoderConfig::from_toml_str("optimize = true").unwrap_err();
    assert!(matches!(error, WasmEncodingError::Config { .. }));
}

#[test]
fn dotted_extension_is_rejected() {
    let error = EncoderConfig::from_toml_str("output_extension = \".wasm\"").unwrap_err();
    assert!(error.to_string().contains("bare extension"));
}

#[test]
fn settings_file_is_loaded_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wasmkit.toml");
    std::fs::write(&path, "[producers]\nsdk = [{ name = \"Orp\", version = \"1\" }]\n").unwrap();

    let config = EncoderConfig::from_file(&path).unwrap();
    assert_eq!(config.producers.sdk, vec![ProducerEntry::new("Orp", "1")]);

    let missing = EncoderConfig::from_file(&dir.path().join("missing.toml")).unwrap_err();
    assert!(matches!(missing, WasmEncodingError::Config { .. }));
}
