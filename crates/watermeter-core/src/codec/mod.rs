//! On-flash encoding of the configuration.
//!
//! The device stores its configuration as a single compact JSON object:
//!
//! ```text
//! {"mqtt_server":"example.tld","mqtt_username":"","mqtt_password":""}
//! ```
//!
//! There is no version field and no trailing newline.  Unknown keys are
//! ignored when reading and are not written back.

pub mod document;
