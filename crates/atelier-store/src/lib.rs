//! atelier-store: path-validated file access over pluggable storage backends.
//!
//! This crate provides:
//!
//! - **[`path`]**: path syntax validation, decomposition, and text/binary
//!   extension classification
//! - **[`vfs`]**: the [`StorageBackend`] contract with a real-disk
//!   implementation ([`DiskFs`]) and a substitutable in-memory directory
//!   tree ([`MemoryFs`])
//! - **[`FileService`]**: the public read/write/list/exists access layer
//!
//! Paths are `/`-separated strings, validated for length and reserved
//! characters before any backend call. Only files whose extension is in one
//! of the recognized text or binary tables are writable through the layer.

pub mod error;
pub mod path;
mod service;
pub mod vfs;

pub use error::FileError;
pub use service::FileService;
pub use vfs::{DiskFs, EntryKind, FileContent, MemoryFs, Node, StorageBackend};
