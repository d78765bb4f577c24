//! The public file access service.

use std::collections::HashMap;
use std::io;
use std::sync::Arc;

use crate::error::FileError;
use crate::path::{self, FileKind};
use crate::vfs::{EntryKind, FileContent, StorageBackend};

/// Path-validated read/write/list/exists access over a storage backend.
///
/// Stateless beyond the shared backend handle: every call is independently
/// dispatched, so one instance may be used concurrently from any number of
/// callers. Construct once at process start and hand clones of the `Arc` to
/// consumers.
pub struct FileService {
    backend: Arc<dyn StorageBackend>,
}

impl FileService {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Whether a file exists at `path`.
    ///
    /// Fails only for a syntactically invalid path; any underlying failure,
    /// including a missing file, reads as `false`.
    pub async fn exists(&self, file_path: &str) -> Result<bool, FileError> {
        if !path::is_valid_path(file_path) {
            return Err(FileError::InvalidPath(file_path.to_string()));
        }
        Ok(self.backend.exists(file_path).await)
    }

    /// Read the file at `path`.
    ///
    /// Binary-classified paths read raw bytes; everything else decodes as
    /// text. Any backend failure is reported uniformly as [`FileError::NotFound`].
    pub async fn read(&self, file_path: &str) -> Result<FileContent, FileError> {
        if !path::is_valid_path(file_path) {
            return Err(FileError::InvalidPath(file_path.to_string()));
        }
        fetch(Arc::clone(&self.backend), file_path.to_string()).await
    }

    /// Read every file directly inside a directory, keyed by full path.
    ///
    /// Reads run concurrently with no cap; completion order is irrelevant
    /// to the result. A listing failure is [`FileError::DirectoryNotFound`];
    /// a failure reading any single listed file aborts the whole call.
    pub async fn read_directory(
        &self,
        directory_path: &str,
    ) -> Result<HashMap<String, FileContent>, FileError> {
        let names = self
            .backend
            .list_files(directory_path)
            .await
            .map_err(|_| FileError::DirectoryNotFound(directory_path.to_string()))?;

        let mut handles = Vec::with_capacity(names.len());
        for name in names {
            let file_path = path::join(directory_path, &name);
            let backend = Arc::clone(&self.backend);
            handles.push((
                file_path.clone(),
                tokio::spawn(async move { fetch(backend, file_path).await }),
            ));
        }

        let mut contents_by_path = HashMap::with_capacity(handles.len());
        for (file_path, handle) in handles {
            let contents = handle
                .await
                .map_err(|_| FileError::NotFound(file_path.clone()))??;
            contents_by_path.insert(file_path, contents);
        }
        Ok(contents_by_path)
    }

    /// Write content to `path`, creating missing parent directories.
    ///
    /// Rejects a syntactically invalid path or an unrecognized extension
    /// before touching the backend. Text-classified paths go through the
    /// backend's text write, binary-classified through its byte write, so
    /// callers can discriminate failures by content type.
    pub async fn write(
        &self,
        file_path: &str,
        contents: impl Into<FileContent> + Send,
    ) -> Result<(), FileError> {
        if !path::is_valid_file_path(file_path) {
            return Err(FileError::InvalidPath(file_path.to_string()));
        }
        let contents = contents.into();
        let directory_path = path::directory_of(file_path);
        if !self.directory_exists(directory_path).await {
            self.create_directory(directory_path).await?;
        }

        match path::classify(file_path) {
            FileKind::Text => {
                let text = into_text(file_path, contents)?;
                self.backend
                    .write_text(file_path, &text)
                    .await
                    .map_err(|source| FileError::TextWrite {
                        path: file_path.to_string(),
                        source,
                    })
            }
            FileKind::Binary => self
                .backend
                .write_bytes(file_path, contents.as_bytes())
                .await
                .map_err(|source| FileError::BinaryWrite {
                    path: file_path.to_string(),
                    source,
                }),
            // Unreachable past the gate above, but keep the rejection total.
            FileKind::Unrecognized => Err(FileError::InvalidPath(file_path.to_string())),
        }
    }

    /// Whether `path` names an existing directory.
    ///
    /// A symlinked ancestor counts as a directory here: writes reachable
    /// only through such a link must still succeed.
    async fn directory_exists(&self, directory_path: &str) -> bool {
        if directory_path.is_empty() {
            return true;
        }
        matches!(
            self.backend.stat(directory_path).await,
            Ok(EntryKind::Directory | EntryKind::Symlink)
        )
    }

    async fn create_directory(&self, directory_path: &str) -> Result<(), FileError> {
        tracing::debug!(directory = %directory_path, "creating missing parent directory");
        self.backend
            .create_dir_all(directory_path)
            .await
            .map_err(|source| FileError::DirectoryCreation {
                path: directory_path.to_string(),
                source,
            })
    }
}

/// The shared read path: classification-appropriate backend read, every
/// failure folded into `NotFound` naming the path.
async fn fetch(backend: Arc<dyn StorageBackend>, file_path: String) -> Result<FileContent, FileError> {
    let result = match path::classify(&file_path) {
        FileKind::Binary => backend.read_bytes(&file_path).await.map(FileContent::Binary),
        _ => backend.read_text(&file_path).await.map(FileContent::Text),
    };
    result.map_err(|_| FileError::NotFound(file_path))
}

fn into_text(file_path: &str, contents: FileContent) -> Result<String, FileError> {
    match contents {
        FileContent::Text(text) => Ok(text),
        FileContent::Binary(bytes) => {
            String::from_utf8(bytes).map_err(|e| FileError::TextWrite {
                path: file_path.to_string(),
                source: io::Error::new(io::ErrorKind::InvalidData, e),
            })
        }
    }
}
