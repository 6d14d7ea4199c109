//! The persisted device configuration.
//!
//! [`Configuration`] holds the three fields the reporting side of the
//! firmware needs to reach its MQTT broker: the server address and a
//! username/password pair.  The password is kept in clear text.
//!
//! # Ownership
//!
//! A `Configuration` is a plain value.  The application context creates one
//! at startup (with [`Configuration::default`]), hands `&mut` to the store
//! while loading, and `&` to whoever needs to read or save it.  There is no
//! global instance.
//!
//! # Capacities
//!
//! | Field            | JSON key         | Capacity (bytes) | Default         |
//! |------------------|------------------|------------------|-----------------|
//! | `server_address` | `mqtt_server`    | 79               | `"example.tld"` |
//! | `username`       | `mqtt_username`  | 23               | `""`            |
//! | `password`       | `mqtt_password`  | 23               | `""`            |

use std::fmt;

use super::bounded::BoundedText;

/// Maximum byte length of the MQTT server address.
pub const SERVER_ADDRESS_CAPACITY: usize = 79;
/// Maximum byte length of the MQTT username.
pub const USERNAME_CAPACITY: usize = 23;
/// Maximum byte length of the MQTT password.
pub const PASSWORD_CAPACITY: usize = 23;

/// Server address used until a stored configuration says otherwise.
pub const DEFAULT_SERVER_ADDRESS: &str = "example.tld";

/// Identifies one of the stored configuration fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigField {
    ServerAddress,
    Username,
    Password,
}

impl ConfigField {
    /// All fields in the order they are written to the JSON document.
    pub const ALL: [ConfigField; 3] = [
        ConfigField::ServerAddress,
        ConfigField::Username,
        ConfigField::Password,
    ];

    /// Key used for this field in the stored JSON document.
    pub const fn key(self) -> &'static str {
        match self {
            ConfigField::ServerAddress => "mqtt_server",
            ConfigField::Username => "mqtt_username",
            ConfigField::Password => "mqtt_password",
        }
    }

    /// Capacity of this field in bytes.
    pub const fn capacity(self) -> usize {
        match self {
            ConfigField::ServerAddress => SERVER_ADDRESS_CAPACITY,
            ConfigField::Username => USERNAME_CAPACITY,
            ConfigField::Password => PASSWORD_CAPACITY,
        }
    }

    /// Whether the value is a secret that must not appear in logs.
    pub const fn is_secret(self) -> bool {
        matches!(self, ConfigField::Password)
    }
}

impl fmt::Display for ConfigField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Record of a value that did not fit its field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Truncation {
    /// The field that received the shortened value.
    pub field: ConfigField,
    /// Byte length of the value that was offered.
    pub offered_len: usize,
    /// Byte length actually stored.
    pub stored_len: usize,
}

/// MQTT connection settings persisted on the device.
#[derive(Clone, PartialEq, Eq)]
pub struct Configuration {
    /// Host name or address of the MQTT broker.
    pub server_address: BoundedText<SERVER_ADDRESS_CAPACITY>,
    /// MQTT username; empty means anonymous.
    pub username: BoundedText<USERNAME_CAPACITY>,
    /// MQTT password, stored in clear text.
    pub password: BoundedText<PASSWORD_CAPACITY>,
}

impl Configuration {
    /// Returns the current value of `field`.
    pub fn get(&self, field: ConfigField) -> &str {
        match field {
            ConfigField::ServerAddress => self.server_address.as_str(),
            ConfigField::Username => self.username.as_str(),
            ConfigField::Password => self.password.as_str(),
        }
    }

    /// Overwrites `field` with `value`, truncated to the field capacity.
    ///
    /// Returns a [`Truncation`] when `value` did not fit.
    pub fn set(&mut self, field: ConfigField, value: &str) -> Option<Truncation> {
        let truncated = match field {
            ConfigField::ServerAddress => self.server_address.set(value),
            ConfigField::Username => self.username.set(value),
            ConfigField::Password => self.password.set(value),
        };
        truncated.then(|| Truncation {
            field,
            offered_len: value.len(),
            stored_len: self.get(field).len(),
        })
    }
}

impl Default for Configuration {
    /// Compiled-in defaults: `example.tld` with empty credentials.
    fn default() -> Self {
        let (server_address, _) = BoundedText::truncating(DEFAULT_SERVER_ADDRESS);
        Self {
            server_address,
            username: BoundedText::new(),
            password: BoundedText::new(),
        }
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let password = if self.password.is_empty() { "" } else { "***" };
        f.debug_struct("Configuration")
            .field("server_address", &self.server_address)
            .field("username", &self.username)
            .field("password", &password)
            .finish()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
