//! DeviceContext: owns the live configuration and the store that persists it.
//!
//! The firmware creates exactly one context at startup.  Components that
//! need the MQTT settings borrow them from here; provisioning code changes
//! fields through [`DeviceContext::update`] and then calls
//! [`DeviceContext::persist`].

use tracing::{info, warn};
use watermeter_core::{ConfigField, Configuration, Truncation};

use super::persist_config::{ConfigError, ConfigStore, Filesystem};

/// Outcome of loading the configuration at boot.
#[derive(Debug)]
pub enum BootConfig {
    /// Values were read from flash.
    Stored,
    /// Nothing was saved yet; compiled-in defaults are in use.
    FirstBoot,
    /// Loading failed; compiled-in defaults are in use.
    Fallback(ConfigError),
}

/// Application context holding the configuration and its store.
pub struct DeviceContext<F: Filesystem> {
    config: Configuration,
    store: ConfigStore<F>,
}

impl<F: Filesystem> DeviceContext<F> {
    /// Creates a context with default values; nothing is read from flash.
    pub fn new(store: ConfigStore<F>) -> Self {
        Self {
            config: Configuration::default(),
            store,
        }
    }

    /// Creates a context and loads the stored configuration.
    ///
    /// Load failures are logged and reported in the returned [`BootConfig`];
    /// the context then runs on defaults.
    pub fn boot(store: ConfigStore<F>) -> (Self, BootConfig) {
        let mut ctx = Self::new(store);
        let outcome = match ctx.reload() {
            Ok(()) => {
                info!(server = %ctx.config.server_address, "configuration loaded from flash");
                BootConfig::Stored
            }
            Err(ConfigError::FileNotFound { path }) => {
                info!(%path, "no stored configuration; using defaults");
                BootConfig::FirstBoot
            }
            Err(e) => {
                warn!("configuration load failed, using defaults: {e}");
                BootConfig::Fallback(e)
            }
        };
        (ctx, outcome)
    }

    /// The live configuration.
    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Re-reads the stored configuration into the live one.
    ///
    /// # Errors
    ///
    /// Propagates [`ConfigError`] from [`ConfigStore::load`]; the live
    /// configuration is unchanged on error.
    pub fn reload(&mut self) -> Result<(), ConfigError> {
        self.store.load(&mut self.config)
    }

    /// Writes the live configuration to flash.
    ///
    /// # Errors
    ///
    /// Propagates [`ConfigError`] from [`ConfigStore::save`].
    pub fn persist(&mut self) -> Result<(), ConfigError> {
        self.store.save(&self.config)
    }

    /// Changes one field in memory.  Call [`persist`](Self::persist) to store it.
    pub fn update(&mut self, field: ConfigField, value: &str) -> Option<Truncation> {
        let truncation = self.config.set(field, value);
        if let Some(t) = truncation {
            warn!(
                field = %t.field,
                offered = t.offered_len,
                stored = t.stored_len,
                "value exceeds field capacity; truncated"
            );
        }
        truncation
    }

    /// Restores the compiled-in defaults in memory.
    pub fn reset(&mut self) {
        self.config = Configuration::default();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
