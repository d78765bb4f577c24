//! Real storage medium backend over `tokio::fs`.

use async_trait::async_trait;
use std::io;
use std::path::Path;
use tokio::fs;

use super::traits::{EntryKind, StorageBackend};

/// Storage backend for the real filesystem.
///
/// Paths are used as given (absolute, or relative to the working
/// directory); safety gating happens in the access layer above, not here.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskFs;

impl DiskFs {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl StorageBackend for DiskFs {
    async fn exists(&self, file_path: &str) -> bool {
        fs::try_exists(Path::new(file_path)).await.unwrap_or(false)
    }

    async fn read_text(&self, file_path: &str) -> io::Result<String> {
        fs::read_to_string(Path::new(file_path)).await
    }

    async fn read_bytes(&self, file_path: &str) -> io::Result<Vec<u8>> {
        fs::read(Path::new(file_path)).await
    }

    async fn write_text(&self, file_path: &str, contents: &str) -> io::Result<()> {
        fs::write(Path::new(file_path), contents.as_bytes()).await
    }

    async fn write_bytes(&self, file_path: &str, contents: &[u8]) -> io::Result<()> {
        fs::write(Path::new(file_path), contents).await
    }

    async fn create_dir_all(&self, directory_path: &str) -> io::Result<()> {
        fs::create_dir_all(Path::new(directory_path)).await
    }

    async fn list_files(&self, directory_path: &str) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        let mut entries = fs::read_dir(Path::new(directory_path)).await?;
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    async fn stat(&self, path: &str) -> io::Result<EntryKind> {
        // symlink_metadata so links report as links, whatever they target.
        let metadata = fs::symlink_metadata(Path::new(path)).await?;
        let file_type = metadata.file_type();
        if file_type.is_symlink() {
            Ok(EntryKind::Symlink)
        } else if file_type.is_dir() {
            Ok(EntryKind::Directory)
        } else {
            Ok(EntryKind::File)
        }
    }
}
