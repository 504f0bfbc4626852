//! Backup Storage Boundary
//!
//! The core never talks to a filesystem or cloud provider directly; it
//! writes bytes to a destination handle and reads them back from the same
//! handle. The destination picker lives outside the core and hands a
//! ready-to-use [`BackupDestination`] to the session.

use std::fs;
use std::io;
use std::path::PathBuf;

/// Byte sink half of a destination handle.
pub trait WriteTarget {
    /// Writes the complete artifact, replacing any previous contents.
    fn write(&mut self, data: &[u8]) -> io::Result<()>;
}

/// Byte source half of a destination handle.
pub trait ReadTarget {
    /// Reads the complete stored artifact.
    fn read_all(&mut self) -> io::Result<Vec<u8>>;
}

/// A single destination handle addressing both the write and the read-back.
///
/// Verification must re-read from the same logical destination the
/// ciphertext was written to, so both halves hang off one handle.
pub trait BackupDestination: WriteTarget + ReadTarget {
    /// Optional human-readable label ("Google Drive", "internal storage")
    /// for display purposes only. Absence is not an error.
    fn description(&self) -> Option<&str> {
        None
    }
}

/// Destination backed by a single file on the local filesystem.
pub struct FileDestination {
    path: PathBuf,
    label: Option<String>,
}

impl FileDestination {
    /// Creates a destination for the given path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileDestination {
            path: path.into(),
            label: None,
        }
    }

    /// Creates a destination with a display label.
    pub fn with_label(path: impl Into<PathBuf>, label: impl Into<String>) -> Self {
        FileDestination {
            path: path.into(),
            label: Some(label.into()),
        }
    }

    /// Returns the backing path.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl WriteTarget for FileDestination {
    fn write(&mut self, data: &[u8]) -> io::Result<()> {
        fs::write(&self.path, data)
    }
}

impl ReadTarget for FileDestination {
    fn read_all(&mut self) -> io::Result<Vec<u8>> {
        fs::read(&self.path)
    }
}

impl BackupDestination for FileDestination {
    fn description(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// In-memory destination for tests and previews.
#[derive(Default)]
pub struct MemoryDestination {
    contents: Option<Vec<u8>>,
    label: Option<String>,
}

impl MemoryDestination {
    /// Creates an empty in-memory destination.
    pub fn new() -> Self {
        MemoryDestination::default()
    }

    /// Creates an in-memory destination with a display label.
    pub fn with_label(label: impl Into<String>) -> Self {
        MemoryDestination {
            contents: None,
            label: Some(label.into()),
        }
    }

    /// Returns the stored artifact, if anything was written.
    pub fn contents(&self) -> Option<&[u8]> {
        self.contents.as_deref()
    }

    /// Returns mutable access to the stored artifact (for corruption tests).
    pub fn contents_mut(&mut self) -> Option<&mut Vec<u8>> {
        self.contents.as_mut()
    }
}

impl WriteTarget for MemoryDestination {
    fn write(&mut self, data: &[u8]) -> io::Result<()> {
        self.contents = Some(data.to_vec());
        Ok(())
    }
}

impl ReadTarget for MemoryDestination {
    fn read_all(&mut self) -> io::Result<Vec<u8>> {
        self.contents
            .clone()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "nothing written yet"))
    }
}

impl BackupDestination for MemoryDestination {
    fn description(&self) -> Option<&str> {
        self.label.as_deref()
    }
}
