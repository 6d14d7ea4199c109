//! # watermeter-core
//!
//! Shared library for the watermeter firmware containing the persisted
//! configuration entity and the JSON document format it is stored in.
//!
//! This crate has zero dependencies on filesystems, OS APIs, or logging
//! back-ends.  The node crate wires it to actual storage.
//!
//! # Architecture overview
//!
//! - **`domain`** – The [`Configuration`] entity: three fixed-capacity text
//!   fields (MQTT server address, username, password) with their compiled-in
//!   defaults.  Capacities mirror the flash layout of the device, so every
//!   write into a field truncates rather than overflowing.
//!
//! - **`codec`** – The on-flash representation: a compact JSON object with
//!   the keys `mqtt_server`, `mqtt_username` and `mqtt_password`.

pub mod codec;
pub mod domain;

// Re-export the most-used types at the crate root so callers can write
// `watermeter_core::Configuration` instead of the full module path.
pub use codec::document::{decode_document, encode_document, ConfigDocument};
pub use domain::bounded::BoundedText;
pub use domain::config::{ConfigField, Configuration, Truncation};
