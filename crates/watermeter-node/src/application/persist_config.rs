//! ConfigStore: loads and saves the [`Configuration`] on the flash filesystem.
//!
//! This use case sits at the application layer and delegates all storage
//! access to a [`Filesystem`] implementation injected at construction time.
//! The flash-directory and in-memory implementations live in the
//! infrastructure layer.
//!
//! # Failure policy
//!
//! Every failure leaves the in-memory configuration exactly as it was before
//! the call.  `load` only mutates the configuration after the whole document
//! has been read and parsed; `save` encodes before it opens (and so
//! truncates) the stored file.

use std::io::{self, Read, Write};

use thiserror::Error;
use tracing::{debug, warn};
use watermeter_core::{decode_document, encode_document, Configuration};

/// Well-known location of the configuration document on the device.
pub const CONFIG_PATH: &str = "/config.json";

/// Error type for configuration persistence.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The flash filesystem could not be mounted.
    #[error("flash filesystem unavailable")]
    FilesystemUnavailable,

    /// No configuration document has been saved yet.
    #[error("configuration file {path} not found")]
    FileNotFound { path: String },

    /// The document exists but could not be opened.
    #[error("failed to open configuration file {path}: {source}")]
    FileOpenFailed {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The document is not valid configuration JSON.
    #[error("failed to parse configuration JSON: {0}")]
    ParseFailed(#[source] serde_json::Error),

    /// Reading or writing failed after the file was opened.
    #[error("I/O error on configuration file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The configuration could not be serialized.
    #[error("failed to encode configuration: {0}")]
    Encode(#[source] serde_json::Error),
}

/// How a file is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// Read from the start of an existing file.
    Read,
    /// Create the file, or truncate it if it already exists.
    Write,
}

/// An open file on the device filesystem.
///
/// The handle is closed when dropped.
pub trait StorageFile: Read + Write {
    /// Current length of the file in bytes.
    fn size(&self) -> io::Result<u64>;
}

/// Filesystem abstraction over the device's flash partition.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem {
    /// Mounts the filesystem.  Calling it again once mounted is a no-op that
    /// returns `true`.
    fn begin(&mut self) -> bool;

    /// Returns `true` if a regular file exists at `path`.
    fn exists(&self, path: &str) -> bool;

    /// Opens the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`io::Error`] if the file cannot be opened.
    fn open(&self, path: &str, mode: OpenMode) -> io::Result<Box<dyn StorageFile>>;
}

/// Persists a [`Configuration`] as JSON at a fixed path.
pub struct ConfigStore<F: Filesystem> {
    fs: F,
    path: String,
}

impl<F: Filesystem> ConfigStore<F> {
    /// Creates a store for the document at [`CONFIG_PATH`].
    pub fn new(fs: F) -> Self {
        Self::with_path(fs, CONFIG_PATH)
    }

    /// Creates a store for the document at `path`.
    pub fn with_path(fs: F, path: impl Into<String>) -> Self {
        Self {
            fs,
            path: path.into(),
        }
    }

    /// Path of the stored document.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The underlying filesystem.
    pub fn filesystem(&self) -> &F {
        &self.fs
    }

    /// Populates `config` from the stored document.
    ///
    /// Values longer than a field's capacity are truncated and logged.
    /// Keys missing from the document leave their field unchanged.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::FilesystemUnavailable`] if mounting fails.
    /// - [`ConfigError::FileNotFound`] if nothing has been saved yet.
    /// - [`ConfigError::FileOpenFailed`] / [`ConfigError::Io`] on storage errors.
    /// - [`ConfigError::ParseFailed`] if the document is malformed.
    ///
    /// On any error `config` is left untouched.
    pub fn load(&mut self, config: &mut Configuration) -> Result<(), ConfigError> {
        if !self.fs.begin() {
            return Err(ConfigError::FilesystemUnavailable);
        }
        if !self.fs.exists(&self.path) {
            return Err(ConfigError::FileNotFound {
                path: self.path.clone(),
            });
        }

        let bytes = {
            let mut file = self
                .fs
                .open(&self.path, OpenMode::Read)
                .map_err(|source| ConfigError::FileOpenFailed {
                    path: self.path.clone(),
                    source,
                })?;
            read_all(file.as_mut()).map_err(|source| ConfigError::Io {
                path: self.path.clone(),
                source,
            })?
        };

        let document = decode_document(&bytes).map_err(ConfigError::ParseFailed)?;
        for truncation in document.apply_to(config) {
            warn!(
                field = %truncation.field,
                offered = truncation.offered_len,
                stored = truncation.stored_len,
                "stored value exceeds field capacity; truncated"
            );
        }

        debug!(path = %self.path, bytes = bytes.len(), "configuration loaded");
        Ok(())
    }

    /// Writes `config` to the stored document, replacing its previous content.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::FilesystemUnavailable`] if mounting fails.
    /// - [`ConfigError::FileOpenFailed`] if the file cannot be opened for
    ///   writing; nothing is written in that case.
    /// - [`ConfigError::Io`] if writing fails part-way.
    pub fn save(&mut self, config: &Configuration) -> Result<(), ConfigError> {
        if !self.fs.begin() {
            return Err(ConfigError::FilesystemUnavailable);
        }

        let bytes = encode_document(config).map_err(ConfigError::Encode)?;

        let mut file = self
            .fs
            .open(&self.path, OpenMode::Write)
            .map_err(|source| ConfigError::FileOpenFailed {
                path: self.path.clone(),
                source,
            })?;
        file.write_all(&bytes)
            .and_then(|()| file.flush())
            .map_err(|source| ConfigError::Io {
                path: self.path.clone(),
                source,
            })?;

        debug!(path = %self.path, bytes = bytes.len(), "configuration saved");
        Ok(())
    }
}

/// Reads the whole file into a buffer sized to its length.
fn read_all(file: &mut dyn StorageFile) -> io::Result<Vec<u8>> {
    let size = usize::try_from(file.size()?)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidData, "file too large to buffer"))?;
    let mut buf = vec![0u8; size];
    file.read_exact(&mut buf)?;
    Ok(buf)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
