//! JSON document encoder and decoder.
//!
//! Encoding always emits exactly the three known keys, in document order.
//! Decoding is lenient about which keys are present: a missing or `null`
//! key leaves the corresponding field untouched when the document is
//! applied.  A key holding anything other than a string is a decode error,
//! so a malformed document is never partially applied.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::config::{ConfigField, Configuration, Truncation};

/// Borrowed view used for encoding.  Field order fixes the key order.
#[derive(Serialize)]
struct EncodedDocument<'a> {
    mqtt_server: &'a str,
    mqtt_username: &'a str,
    mqtt_password: &'a str,
}

/// A decoded configuration document.
///
/// Values are kept at whatever length they had on flash; capacities are
/// enforced only when the document is applied to a [`Configuration`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConfigDocument {
    #[serde(rename = "mqtt_server")]
    pub server_address: Option<String>,
    #[serde(rename = "mqtt_username")]
    pub username: Option<String>,
    #[serde(rename = "mqtt_password")]
    pub password: Option<String>,
}

impl ConfigDocument {
    /// Returns the decoded value for `field`, if the document carried one.
    pub fn value(&self, field: ConfigField) -> Option<&str> {
        match field {
            ConfigField::ServerAddress => self.server_address.as_deref(),
            ConfigField::Username => self.username.as_deref(),
            ConfigField::Password => self.password.as_deref(),
        }
    }

    /// Copies every present value into `config`, truncating to capacity.
    ///
    /// Returns one [`Truncation`] per value that did not fit.
    pub fn apply_to(&self, config: &mut Configuration) -> Vec<Truncation> {
        ConfigField::ALL
            .into_iter()
            .filter_map(|field| {
                let value = self.value(field)?;
                config.set(field, value)
            })
            .collect()
    }
}

/// Serializes `config` into the compact JSON stored on flash.
///
/// # Errors
///
/// Propagates [`serde_json::Error`]; with string-only fields this does not
/// happen in practice.
pub fn encode_document(config: &Configuration) -> Result<Vec<u8>, serde_json::Error> {
    serde_json::to_vec(&EncodedDocument {
        mqtt_server: config.server_address.as_str(),
        mqtt_username: config.username.as_str(),
        mqtt_password: config.password.as_str(),
    })
}

/// Parses a stored document.
///
/// A key that appears more than once takes its last value, as the device's
/// JSON parser does.
///
/// # Errors
///
/// Returns [`serde_json::Error`] if `bytes` is not a JSON object, or if a
/// known key holds a non-string, non-null value.
pub fn decode_document(bytes: &[u8]) -> Result<ConfigDocument, serde_json::Error> {
    // Going through a map collapses duplicate keys before the struct sees them.
    let object: Map<String, Value> = serde_json::from_slice(bytes)?;
    serde_json::from_value(Value::Object(object))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
