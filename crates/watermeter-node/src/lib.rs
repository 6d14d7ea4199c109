//! watermeter-node library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! The node keeps the MQTT broker settings of the meter in a JSON document
//! on its flash filesystem:
//!
//! 1. At boot the [`DeviceContext`](application::context::DeviceContext)
//!    mounts the filesystem and loads `/config.json`, falling back to the
//!    compiled-in defaults when the file is missing or unreadable.
//! 2. The reporting side reads the live configuration from the context.
//! 3. Provisioning changes a field and saves the whole document again.

/// Application layer: configuration store and device context.
pub mod application;

/// Infrastructure layer: flash filesystem back-ends.
pub mod infrastructure;
