//! Infrastructure layer for the watermeter node.
//!
//! Contains the storage adapters that give the application layer access to
//! the flash filesystem.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `watermeter_core`, but MUST NOT be imported by the application layer
//! outside of tests.

pub mod storage;
