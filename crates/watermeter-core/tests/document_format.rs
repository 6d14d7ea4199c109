//! Integration tests for the stored configuration document.
//!
//! These tests exercise the public API end to end: a configuration is
//! encoded to the on-flash JSON, decoded again, and applied to a fresh
//! configuration value.

use watermeter_core::{
    decode_document,
    domain::config::{PASSWORD_CAPACITY, SERVER_ADDRESS_CAPACITY, USERNAME_CAPACITY},
    encode_document, ConfigField, Configuration,
};

/// Encodes `config`, decodes the bytes and applies them to a default value.
fn reload(config: &Configuration) -> Configuration {
    let bytes = encode_document(config).expect("encode must succeed");
    let doc = decode_document(&bytes).expect("decode must succeed");
    let mut fresh = Configuration::default();
    let truncations = doc.apply_to(&mut fresh);
    assert!(truncations.is_empty(), "in-capacity values must not truncate");
    fresh
}

#[test]
fn test_reload_preserves_all_fields() {
    let mut original = Configuration::default();
    original.set(ConfigField::ServerAddress, "mqtt.home.arpa");
    original.set(ConfigField::Username, "watermeter");
    original.set(ConfigField::Password, "s3cr3t!");

    assert_eq!(reload(&original), original);
}

#[test]
fn test_reload_preserves_values_at_full_capacity() {
    let mut original = Configuration::default();
    original.set(ConfigField::ServerAddress, &"a".repeat(SERVER_ADDRESS_CAPACITY));
    original.set(ConfigField::Username, &"b".repeat(USERNAME_CAPACITY));
    original.set(ConfigField::Password, &"c".repeat(PASSWORD_CAPACITY));

    assert_eq!(reload(&original), original);
}

#[test]
fn test_reload_preserves_non_ascii_text() {
    let mut original = Configuration::default();
    original.set(ConfigField::Username, "zählerstand");

    assert_eq!(reload(&original), original);
}

#[test]
fn test_encoding_is_deterministic() {
    let mut cfg = Configuration::default();
    cfg.set(ConfigField::Username, "meter");

    let first = encode_document(&cfg).unwrap();
    let second = encode_document(&cfg).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_unknown_keys_are_dropped_on_reencode() {
    // Arrange
    let doc = decode_document(br#"{"mqtt_server":"x","extra":"y"}"#).unwrap();
    let mut cfg = Configuration::default();
    doc.apply_to(&mut cfg);

    // Act
    let bytes = encode_document(&cfg).unwrap();
    let text = String::from_utf8(bytes).unwrap();

    // Assert
    assert!(!text.contains("extra"));
    assert_eq!(
        text,
        r#"{"mqtt_server":"x","mqtt_username":"","mqtt_password":""}"#
    );
}
