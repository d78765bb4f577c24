//! In-memory directory tree backend.
//!
//! A recursive namespace of directories and file leaves that reproduces the
//! disk backend's observable behavior, so tests and simulations can swap it
//! in behind [`StorageBackend`] without callers noticing. All data is lost
//! when dropped.

use async_trait::async_trait;
use std::collections::HashMap;
use std::io;
use tokio::sync::RwLock;

use super::traits::{EntryKind, FileContent, StorageBackend};
use crate::path;

/// One entry in the tree: a directory holding named children, or a file
/// leaf holding content. Names are unique within a directory; insertion
/// order carries no meaning.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Directory(HashMap<String, Node>),
    File(FileContent),
}

impl Node {
    /// Build a directory node from `(name, child)` pairs.
    pub fn dir<N, I>(entries: I) -> Node
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, Node)>,
    {
        Node::Directory(entries.into_iter().map(|(n, c)| (n.into(), c)).collect())
    }

    /// Build a text file leaf.
    pub fn text(contents: impl Into<String>) -> Node {
        Node::File(FileContent::Text(contents.into()))
    }

    /// Build a binary file leaf.
    pub fn binary(contents: impl Into<Vec<u8>>) -> Node {
        Node::File(FileContent::Binary(contents.into()))
    }

    fn is_file(&self) -> bool {
        matches!(self, Node::File(_))
    }
}

/// In-memory filesystem tree.
///
/// Thread-safe via an internal `RwLock`. The root directory always exists;
/// the only wholesale deletion mechanism is [`MemoryFs::reset`].
#[derive(Debug, Default)]
pub struct MemoryFs {
    root: RwLock<HashMap<String, Node>>,
}

impl MemoryFs {
    /// Create a new tree with an empty root directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tree pre-populated from a seed, as [`MemoryFs::reset`] would.
    pub async fn with_seed(seed: HashMap<String, Node>) -> Self {
        let fs = Self::new();
        fs.reset(seed).await;
        fs
    }

    /// Read the file at `path`.
    ///
    /// Fails with `NotFound` if any intermediate segment is absent or is
    /// itself a file, or if the final entry is a directory.
    pub async fn read(&self, file_path: &str) -> io::Result<FileContent> {
        let root = self.root.read().await;
        let directory = resolve_dir(&root, path::directory_of(file_path))
            .ok_or_else(|| not_found(file_path))?;
        match directory.get(path::file_name_of(file_path)) {
            Some(Node::File(contents)) => Ok(contents.clone()),
            _ => Err(not_found(file_path)),
        }
    }

    /// Write a file at `path`, lazily creating missing ancestor directories.
    ///
    /// Fails if an ancestor segment already exists as a file, or if the
    /// final entry is a directory. Re-writing an existing file succeeds.
    pub async fn write(&self, file_path: &str, contents: FileContent) -> io::Result<()> {
        let mut root = self.root.write().await;
        let directory = ensure_dir(&mut root, path::directory_of(file_path))?;
        let name = path::file_name_of(file_path);
        if let Some(Node::Directory(_)) = directory.get(name) {
            return Err(io::Error::new(
                io::ErrorKind::IsADirectory,
                format!("is a directory: {file_path}"),
            ));
        }
        directory.insert(name.to_string(), Node::File(contents));
        Ok(())
    }

    /// Remove the file at `path`.
    ///
    /// Fails with `NotFound` if the entry is absent or is a directory;
    /// siblings are untouched.
    pub async fn remove(&self, file_path: &str) -> io::Result<()> {
        let mut root = self.root.write().await;
        let directory = resolve_dir_mut(&mut root, path::directory_of(file_path))
            .ok_or_else(|| not_found(file_path))?;
        let name = path::file_name_of(file_path);
        match directory.get(name) {
            Some(node) if node.is_file() => {
                directory.remove(name);
                Ok(())
            }
            _ => Err(not_found(file_path)),
        }
    }

    /// List the names of the direct file children of a directory.
    ///
    /// Sibling subdirectories are excluded. Sorted for stable output.
    pub async fn list_files(&self, directory_path: &str) -> io::Result<Vec<String>> {
        let root = self.root.read().await;
        let directory =
            resolve_dir(&root, directory_path).ok_or_else(|| not_found(directory_path))?;
        let mut names: Vec<String> = directory
            .iter()
            .filter(|(_, node)| node.is_file())
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        Ok(names)
    }

    /// Whether a file exists at `path`. Failures read as `false`.
    pub async fn exists(&self, file_path: &str) -> bool {
        self.read(file_path).await.is_ok()
    }

    /// Whether a directory exists at `path`. Failures read as `false`.
    pub async fn directory_exists(&self, directory_path: &str) -> bool {
        resolve_dir(&*self.root.read().await, directory_path).is_some()
    }

    /// Create a directory and any missing ancestors.
    pub async fn create_dir(&self, directory_path: &str) -> io::Result<()> {
        let mut root = self.root.write().await;
        ensure_dir(&mut root, directory_path)?;
        Ok(())
    }

    /// Replace the entire tree with a seed.
    ///
    /// Seed keys containing `/` are flat full paths and are expanded into
    /// nested directories before installation; other keys are taken as
    /// direct children of the root (which may themselves be whole
    /// subtrees). An empty seed leaves an empty root.
    pub async fn reset(&self, seed: HashMap<String, Node>) {
        let mut expanded = HashMap::new();
        for (key, node) in seed {
            insert_nested(&mut expanded, &key, node);
        }
        *self.root.write().await = expanded;
    }

    /// Reset to an empty tree.
    pub async fn clear(&self) {
        self.reset(HashMap::new()).await;
    }
}

fn not_found(path: &str) -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, format!("not found: {path}"))
}

/// Split a directory path into segments. The empty path has zero segments
/// and denotes the root directory itself.
fn dir_segments(directory_path: &str) -> impl Iterator<Item = &str> {
    directory_path.split('/').filter(|s| !s.is_empty())
}

/// Descend from the root one segment at a time. `None` if any segment is
/// absent or is a file.
fn resolve_dir<'a>(
    root: &'a HashMap<String, Node>,
    directory_path: &str,
) -> Option<&'a HashMap<String, Node>> {
    let mut current = root;
    for segment in dir_segments(directory_path) {
        match current.get(segment) {
            Some(Node::Directory(children)) => current = children,
            _ => return None,
        }
    }
    Some(current)
}

fn resolve_dir_mut<'a>(
    root: &'a mut HashMap<String, Node>,
    directory_path: &str,
) -> Option<&'a mut HashMap<String, Node>> {
    let mut current = root;
    for segment in dir_segments(directory_path) {
        match current.get_mut(segment) {
            Some(Node::Directory(children)) => current = children,
            _ => return None,
        }
    }
    Some(current)
}

/// Descend creating missing directories, never overwriting an existing
/// file with a directory.
fn ensure_dir<'a>(
    root: &'a mut HashMap<String, Node>,
    directory_path: &str,
) -> io::Result<&'a mut HashMap<String, Node>> {
    let mut current = root;
    for segment in dir_segments(directory_path) {
        let entry = current
            .entry(segment.to_string())
            .or_insert_with(|| Node::Directory(HashMap::new()));
        match entry {
            Node::Directory(children) => current = children,
            Node::File(_) => {
                return Err(io::Error::new(
                    io::ErrorKind::NotADirectory,
                    format!("not a directory: {directory_path}"),
                ));
            }
        }
    }
    Ok(current)
}

/// Install a node under a possibly slash-delimited key, nesting as needed.
/// Seed conflicts resolve in favor of the directory structure.
fn insert_nested(tree: &mut HashMap<String, Node>, key: &str, node: Node) {
    match key.split_once('/') {
        None => {
            tree.insert(key.to_string(), node);
        }
        Some((head, rest)) => {
            let child = tree
                .entry(head.to_string())
                .or_insert_with(|| Node::Directory(HashMap::new()));
            if child.is_file() {
                *child = Node::Directory(HashMap::new());
            }
            if let Node::Directory(children) = child {
                insert_nested(children, rest, node);
            }
        }
    }
}

#[async_trait]
impl StorageBackend for MemoryFs {
    async fn exists(&self, file_path: &str) -> bool {
        MemoryFs::exists(self, file_path).await
    }

    async fn read_text(&self, file_path: &str) -> io::Result<String> {
        match self.read(file_path).await? {
            FileContent::Text(text) => Ok(text),
            FileContent::Binary(bytes) => String::from_utf8(bytes).map_err(|e| {
                io::Error::new(io::ErrorKind::InvalidData, format!("{file_path}: {e}"))
            }),
        }
    }

    async fn read_bytes(&self, file_path: &str) -> io::Result<Vec<u8>> {
        Ok(match self.read(file_path).await? {
            FileContent::Text(text) => text.into_bytes(),
            FileContent::Binary(bytes) => bytes,
        })
    }

    async fn write_text(&self, file_path: &str, contents: &str) -> io::Result<()> {
        self.write(file_path, FileContent::Text(contents.to_string()))
            .await
    }

    async fn write_bytes(&self, file_path: &str, contents: &[u8]) -> io::Result<()> {
        self.write(file_path, FileContent::Binary(contents.to_vec()))
            .await
    }

    async fn create_dir_all(&self, directory_path: &str) -> io::Result<()> {
        self.create_dir(directory_path).await
    }

    async fn list_files(&self, directory_path: &str) -> io::Result<Vec<String>> {
        MemoryFs::list_files(self, directory_path).await
    }

    async fn stat(&self, entry_path: &str) -> io::Result<EntryKind> {
        if entry_path.is_empty() {
            return Ok(EntryKind::Directory);
        }
        let root = self.root.read().await;
        let directory = resolve_dir(&root, path::directory_of(entry_path))
            .ok_or_else(|| not_found(entry_path))?;
        match directory.get(path::file_name_of(entry_path)) {
            Some(Node::Directory(_)) => Ok(EntryKind::Directory),
            Some(Node::File(_)) => Ok(EntryKind::File),
            None => Err(not_found(entry_path)),
        }
    }
}
