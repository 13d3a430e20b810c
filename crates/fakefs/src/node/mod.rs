//! Node primitives for the fake filesystem.
//!
//! This module provides the data structures for representing files,
//! directories, and soft links in an in-memory tree.

mod dir;
mod file;
mod iter;
mod link;
mod types;

pub use dir::{Attachable, Directory};
pub use file::File;
pub use iter::Entries;
pub use link::Link;
pub use types::{same_node, Attachment, Node, NodeMeta, NodeRef, NodeType, WeakNodeRef};
