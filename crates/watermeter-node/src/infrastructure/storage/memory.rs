//! In-memory flash volume for tests and bring-up without hardware.
//!
//! The `MemoryFilesystem` keeps every file in a shared `HashMap` so that
//! tests can inspect exactly what the store wrote.  Clones share the same
//! volume, which lets a test keep a handle after moving the filesystem into
//! a [`ConfigStore`](crate::application::persist_config::ConfigStore).
//!
//! # Failure switches
//!
//! Set `fail_begin`, `fail_open` or `fail_write` to simulate an unmountable
//! partition, a file that cannot be opened, or a full partition, so error
//! paths can be tested without a broken device.

use std::collections::HashMap;
use std::io::{self, Cursor, Read, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::application::persist_config::{Filesystem, OpenMode, StorageFile};

type Volume = Arc<Mutex<HashMap<String, Vec<u8>>>>;

fn lock(volume: &Volume) -> MutexGuard<'_, HashMap<String, Vec<u8>>> {
    volume.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A flash volume held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    files: Volume,
    mounted: bool,
    begin_calls: usize,
    /// When `true`, `begin` fails and the volume stays unmounted.
    pub fail_begin: bool,
    /// When `true`, every `open` fails with `PermissionDenied`.
    pub fail_open: bool,
    /// When `true`, writes to files opened for writing fail with an `Other` I/O error.
    pub fail_write: bool,
}

impl MemoryFilesystem {
    /// Creates an empty, unmounted volume.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a volume whose `begin` always fails.
    pub fn unmountable() -> Self {
        Self {
            fail_begin: true,
            ..Self::default()
        }
    }

    /// Builder: stores `contents` at `path` before the volume is used.
    pub fn with_file(self, path: &str, contents: impl AsRef<[u8]>) -> Self {
        self.write_file(path, contents);
        self
    }

    /// Returns a copy of the file at `path`, bypassing mount state.
    pub fn read_file(&self, path: &str) -> Option<Vec<u8>> {
        lock(&self.files).get(path).cloned()
    }

    /// Replaces the file at `path`, bypassing mount state.
    pub fn write_file(&self, path: &str, contents: impl AsRef<[u8]>) {
        lock(&self.files).insert(path.to_string(), contents.as_ref().to_vec());
    }

    /// Deletes the file at `path`; returns `true` if it existed.
    pub fn remove_file(&self, path: &str) -> bool {
        lock(&self.files).remove(path).is_some()
    }

    /// Whether `begin` has succeeded on this handle.
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Number of times `begin` has been called on this handle.
    pub fn begin_calls(&self) -> usize {
        self.begin_calls
    }
}

impl Filesystem for MemoryFilesystem {
    fn begin(&mut self) -> bool {
        self.begin_calls += 1;
        if self.fail_begin {
            return false;
        }
        self.mounted = true;
        true
    }

    fn exists(&self, path: &str) -> bool {
        self.mounted && lock(&self.files).contains_key(path)
    }

    fn open(&self, path: &str, mode: OpenMode) -> io::Result<Box<dyn StorageFile>> {
        if !self.mounted {
            return Err(io::Error::new(
                io::ErrorKind::NotConnected,
                "memory volume not mounted",
            ));
        }
        if self.fail_open {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "simulated open failure",
            ));
        }

        let mut files = lock(&self.files);
        let snapshot = match mode {
            OpenMode::Read => files
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))?,
            OpenMode::Write => {
                files.insert(path.to_string(), Vec::new());
                Vec::new()
            }
        };

        Ok(Box::new(MemoryFile {
            volume: Arc::clone(&self.files),
            path: path.to_string(),
            mode,
            reader: Cursor::new(snapshot),
            fail_write: self.fail_write,
        }))
    }
}

/// Open handle on a [`MemoryFilesystem`] file.
///
/// Readers see the content as it was when the file was opened; writers
/// append directly to the shared volume.
struct MemoryFile {
    volume: Volume,
    path: String,
    mode: OpenMode,
    reader: Cursor<Vec<u8>>,
    fail_write: bool,
}

impl Read for MemoryFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.mode {
            OpenMode::Read => self.reader.read(buf),
            OpenMode::Write => Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "file opened for writing",
            )),
        }
    }
}

impl Write for MemoryFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self.mode {
            OpenMode::Write if self.fail_write => Err(io::Error::new(
                io::ErrorKind::Other,
                "simulated write failure",
            )),
            OpenMode::Write => {
                lock(&self.volume)
                    .entry(self.path.clone())
                    .or_default()
                    .extend_from_slice(buf);
                Ok(buf.len())
            }
            OpenMode::Read => Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "file opened for reading",
            )),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl StorageFile for MemoryFile {
    fn size(&self) -> io::Result<u64> {
        let len = match self.mode {
            OpenMode::Read => self.reader.get_ref().len(),
            OpenMode::Write => lock(&self.volume).get(&self.path).map_or(0, Vec::len),
        };
        Ok(len as u64)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn mounted() -> MemoryFilesystem {
        let mut fs = MemoryFilesystem::new();
        assert!(fs.begin());
        fs
    }

    #[test]
    fn test_unmounted_volume_hides_files_and_refuses_open() {
        let fs = MemoryFilesystem::new().with_file("/a", b"x");

        assert!(!fs.exists("/a"));
        let err = fs.open("/a", OpenMode::Read).err().expect("open must fail");
        assert_eq!(err.kind(), io::ErrorKind::NotConnected);
    }

    #[test]
    fn test_begin_is_idempotent_and_counted() {
        let mut fs = MemoryFilesystem::new();
        assert!(fs.begin());
        assert!(fs.begin());
        assert!(fs.is_mounted());
        assert_eq!(fs.begin_calls(), 2);
    }

    #[test]
    fn test_fail_begin_leaves_volume_unmounted() {
        let mut fs = MemoryFilesystem::unmountable();
        assert!(!fs.begin());
        assert!(!fs.is_mounted());
    }

    #[test]
    fn test_write_then_read_returns_written_bytes() {
        // Arrange
        let fs = mounted();

        // Act
        {
            let mut file = fs.open("/f", OpenMode::Write).unwrap();
            file.write_all(b"hello ").unwrap();
            file.write_all(b"world").unwrap();
        }
        let mut file = fs.open("/f", OpenMode::Read).unwrap();
        let mut text = String::new();
        file.read_to_string(&mut text).unwrap();

        // Assert
        assert_eq!(text, "hello world");
        assert_eq!(file.size().unwrap(), 11);
    }

    #[test]
    fn test_open_for_write_truncates_existing_file() {
        let fs = mounted().with_file("/f", b"old content");

        let file = fs.open("/f", OpenMode::Write).unwrap();

        assert_eq!(file.size().unwrap(), 0);
        assert_eq!(fs.read_file("/f").unwrap(), b"");
    }

    #[test]
    fn test_open_missing_file_for_read_is_not_found() {
        let fs = mounted();
        let err = fs.open("/missing", OpenMode::Read).err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_fail_open_rejects_every_open() {
        let mut fs = mounted().with_file("/f", b"x");
        fs.fail_open = true;

        assert!(fs.open("/f", OpenMode::Read).is_err());
        assert!(fs.open("/f", OpenMode::Write).is_err());
        assert_eq!(fs.read_file("/f").unwrap(), b"x", "failed open must not truncate");
    }

    #[test]
    fn test_fail_write_rejects_writes_after_open() {
        // Arrange
        let mut fs = mounted();
        fs.fail_write = true;

        // Act
        let mut file = fs.open("/f", OpenMode::Write).unwrap();
        let err = file.write_all(b"data").unwrap_err();

        // Assert
        assert_eq!(err.kind(), io::ErrorKind::Other);
        assert_eq!(fs.read_file("/f").unwrap(), b"");
    }

    #[test]
    fn test_clones_share_the_volume() {
        let fs = mounted();
        let observer = fs.clone();

        fs.write_file("/shared", b"1");

        assert_eq!(observer.read_file("/shared").unwrap(), b"1");
        assert!(observer.remove_file("/shared"));
        assert!(fs.read_file("/shared").is_none());
    }

    #[test]
    fn test_read_handle_rejects_writes() {
        let fs = mounted().with_file("/f", b"x");
        let mut file = fs.open("/f", OpenMode::Read).unwrap();
        assert!(file.write(b"y").is_err());
    }
}
