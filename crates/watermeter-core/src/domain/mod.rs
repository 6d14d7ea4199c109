//! Domain entities for the watermeter configuration.
//!
//! Pure types with no I/O: they can be constructed, mutated and inspected in
//! tests on any host without a flash filesystem.

/// Fixed-capacity text used for every stored field.
pub mod bounded;

/// The persisted configuration entity.
///
/// See [`config::Configuration`] for the main type.
pub mod config;
