//! Codec configuration stored as TOML.

use libibus::{Config, Marshal, Text, WireError};
use std::fs;

#[test]
fn test_config_toml_file_roundtrip() {
    let path = std::env::temp_dir().join(format!(
        "libibus_config_{}.toml",
        std::process::id()
    ));
    let config = Config {
        max_nesting_depth: 16,
        max_attachment_bytes: 128,
    };
    config.save_toml(&path).expect("Failed to save TOML config");

    let loaded = Config::load_toml(&path).expect("Failed to load TOML config");
    assert_eq!(loaded, config);

    let _ = fs::remove_file(&path);
}

#[test]
fn test_loaded_limits_apply_to_decoding() {
    let config = Config::from_toml_str("max_attachment_bytes = 8").unwrap();

    let mut text = Text::new("abc");
    text.base
        .attach("note", &"a long attachment value".into())
        .unwrap();
    let arg = text.to_argument().unwrap();

    assert!(matches!(
        Text::from_argument_with(&arg, &config),
        Err(WireError::AttachmentTooLarge { .. })
    ));
    assert_eq!(Text::from_argument(&arg).unwrap(), text);
}
