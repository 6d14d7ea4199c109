//! Application layer use cases for the watermeter node.
//!
//! - **`persist_config`** – Loads the MQTT configuration from the flash
//!   filesystem and saves it back.  Storage access goes through the
//!   `Filesystem` trait, which is injected at construction time.
//!
//! - **`context`** – The application context that owns the live
//!   configuration and its store, and applies the boot-time load policy.

pub mod context;
pub mod persist_config;
