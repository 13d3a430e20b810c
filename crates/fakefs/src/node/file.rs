//! File node implementation.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;

use super::types::{Node, NodeMeta, NodeType};

/// File node holding an appendable byte buffer.
///
/// Content is arbitrary bytes; embedded zeros are kept as-is.
#[derive(Debug)]
pub struct File {
    /// Name and ownership state.
    meta: NodeMeta,
    /// File content.
    buffer: RefCell<Vec<u8>>,
}

impl File {
    /// Create a new empty, detached file.
    ///
    /// # Arguments
    /// * `name` - File name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            meta: NodeMeta::new(name),
            buffer: RefCell::new(Vec::new()),
        }
    }

    /// Append bytes to the end of the file.
    ///
    /// # Arguments
    /// * `data` - Bytes to append
    pub fn append(&self, data: &[u8]) {
        self.buffer.borrow_mut().extend_from_slice(data);
    }

    /// Read up to `count` bytes starting at `offset`.
    ///
    /// Out-of-range requests are clamped rather than rejected.
    ///
    /// # Arguments
    /// * `count` - Maximum number of bytes to return
    /// * `offset` - Starting byte offset
    ///
    /// # Returns
    /// `buffer[offset..min(offset + count, size)]`, or empty if `offset >= size`.
    pub fn read(&self, count: usize, offset: usize) -> Vec<u8> {
        let buffer = self.buffer.borrow();
        if offset >= buffer.len() {
            return Vec::new();
        }
        let end: usize = offset.saturating_add(count).min(buffer.len());
        buffer[offset..end].to_vec()
    }

    /// Read the whole file.
    pub fn read_all(&self) -> Vec<u8> {
        self.buffer.borrow().clone()
    }

    /// Check if the file has no content.
    pub fn is_empty(&self) -> bool {
        self.buffer.borrow().is_empty()
    }
}

impl Node for File {
    fn meta(&self) -> &NodeMeta {
        &self.meta
    }

    fn node_type(&self) -> NodeType {
        NodeType::File
    }

    fn size(&self) -> usize {
        self.buffer.borrow().len()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.meta.name())
    }
}
