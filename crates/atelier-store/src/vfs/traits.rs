//! Core storage-backend trait and types.

use async_trait::async_trait;
use std::io;

/// Kind of directory entry, as reported by [`StorageBackend::stat`].
///
/// `stat` does not follow symbolic links; a link is reported as
/// [`EntryKind::Symlink`] whatever it points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Symlink,
}

impl EntryKind {
    pub fn is_file(self) -> bool {
        self == EntryKind::File
    }

    pub fn is_dir(self) -> bool {
        self == EntryKind::Directory
    }
}

/// Content of a stored file: decoded text or an opaque byte sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    Text(String),
    Binary(Vec<u8>),
}

impl FileContent {
    /// The raw bytes of the content, whichever variant holds it.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            FileContent::Text(text) => text.as_bytes(),
            FileContent::Binary(bytes) => bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

impl From<&str> for FileContent {
    fn from(text: &str) -> Self {
        FileContent::Text(text.to_string())
    }
}

impl From<String> for FileContent {
    fn from(text: String) -> Self {
        FileContent::Text(text)
    }
}

impl From<Vec<u8>> for FileContent {
    fn from(bytes: Vec<u8>) -> Self {
        FileContent::Binary(bytes)
    }
}

impl From<&[u8]> for FileContent {
    fn from(bytes: &[u8]) -> Self {
        FileContent::Binary(bytes.to_vec())
    }
}

/// Abstract storage medium interface.
///
/// Paths use `/` as their canonical separator. These are the only
/// primitives the access layer requires of a backend; anything implementing
/// them (the real disk or the in-memory tree) can be substituted without
/// observable difference.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Check whether a file exists at the path.
    ///
    /// Never fails: backend errors read as `false`.
    async fn exists(&self, path: &str) -> bool;

    /// Read the entire file as decoded UTF-8 text.
    async fn read_text(&self, path: &str) -> io::Result<String>;

    /// Read the entire file as raw bytes.
    async fn read_bytes(&self, path: &str) -> io::Result<Vec<u8>>;

    /// Write text content, creating the file if it doesn't exist.
    ///
    /// The parent directory must already exist.
    async fn write_text(&self, path: &str, contents: &str) -> io::Result<()>;

    /// Write raw bytes, creating the file if it doesn't exist.
    ///
    /// The parent directory must already exist.
    async fn write_bytes(&self, path: &str, contents: &[u8]) -> io::Result<()>;

    /// Create a directory and any missing ancestors.
    ///
    /// Fails if an ancestor segment already exists as a file.
    async fn create_dir_all(&self, path: &str) -> io::Result<()>;

    /// List the names of the direct file children of a directory.
    ///
    /// Subdirectories are excluded from the listing.
    async fn list_files(&self, path: &str) -> io::Result<Vec<String>>;

    /// Get the kind of entry at a path without following symlinks.
    async fn stat(&self, path: &str) -> io::Result<EntryKind>;
}
