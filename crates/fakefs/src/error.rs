//! Error types for the fake filesystem crate.

use thiserror::Error;

/// Errors that can occur while building or printing a tree.
///
/// Exhaustion, clamped reads and dead links are not errors; they surface
/// as `None` or an empty buffer.
#[derive(Debug, Error)]
pub enum FsError {
    /// Node is already a child of some directory.
    #[error("Node already has a parent: '{name}'")]
    AlreadyAttached {
        /// Name of the node at the time of the rejected add.
        name: String,
    },

    /// Writing subtree output failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FsError>;
