//! Storage backends for the file access layer.
//!
//! Two interchangeable implementations of [`StorageBackend`]:
//!
//! - **[`DiskFs`]**: the real storage medium, over `tokio::fs`
//! - **[`MemoryFs`]**: an in-memory directory tree for tests and simulation
//!
//! The in-memory tree reproduces the disk backend's externally observable
//! existence and traversal semantics, so either can sit behind
//! [`crate::FileService`] without callers telling them apart.

mod disk;
mod memory;
mod traits;

pub use disk::DiskFs;
pub use memory::{MemoryFs, Node};
pub use traits::{EntryKind, FileContent, StorageBackend};
