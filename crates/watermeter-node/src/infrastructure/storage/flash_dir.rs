//! Flash partition emulated on a host directory.
//!
//! Device paths are absolute (`/config.json`); `FlashDir` maps them onto a
//! root directory on the host, the same way the firmware's flash filesystem
//! maps them onto its partition:
//!
//! ```text
//! device path      host path
//! /config.json  -> <root>/config.json
//! ```
//!
//! Like the device partition, the volume must be mounted with `begin` before
//! files can be seen or opened.  Mounting creates the root directory if it
//! does not exist yet.

use std::fs::{self, File};
use std::io;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::application::persist_config::{Filesystem, OpenMode, StorageFile};

/// A flash volume backed by a host directory.
#[derive(Debug, Clone)]
pub struct FlashDir {
    root: PathBuf,
    mounted: bool,
}

impl FlashDir {
    /// Creates an unmounted volume rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            mounted: false,
        }
    }

    /// Resolves a device path to its host path.
    pub fn host_path(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }
}

impl Filesystem for FlashDir {
    fn begin(&mut self) -> bool {
        if self.mounted {
            return true;
        }
        match fs::create_dir_all(&self.root) {
            Ok(()) => {
                debug!(root = %self.root.display(), "flash directory mounted");
                self.mounted = true;
                true
            }
            Err(e) => {
                warn!(root = %self.root.display(), "cannot mount flash directory: {e}");
                false
            }
        }
    }

    fn exists(&self, path: &str) -> bool {
        self.mounted && self.host_path(path).is_file()
    }

    fn open(&self, path: &str, mode: OpenMode) -> io::Result<Box<dyn StorageFile>> {
        if !self.mounted {
            return Err(io::Error::new(
                io::ErrorKind::NotConnected,
                "flash directory not mounted",
            ));
        }
        let host_path = self.host_path(path);
        let file = match mode {
            OpenMode::Read => File::open(&host_path)?,
            OpenMode::Write => File::create(&host_path)?,
        };
        Ok(Box::new(file))
    }
}

impl StorageFile for File {
    fn size(&self) -> io::Result<u64> {
        Ok(self.metadata()?.len())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
