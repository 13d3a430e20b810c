//! Core node types and traits.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::error::{FsError, Result};

use super::dir::Directory;

/// Shared, owning handle to any node.
pub type NodeRef = Rc<dyn Node>;

/// Non-owning handle to any node.
pub type WeakNodeRef = Weak<dyn Node>;

/// Type of node entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// Regular file with a byte buffer.
    File,
    /// Directory owning an ordered list of children.
    Directory,
    /// Soft link to another node.
    Link,
}

/// Ownership state of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Attachment {
    /// Not a child of any directory.
    #[default]
    Detached,
    /// Child of exactly one directory. Never reverts.
    Attached,
}

/// Identity header embedded in every node kind.
#[derive(Debug, Default)]
pub struct NodeMeta {
    /// Entry name, may be empty.
    name: RefCell<String>,
    /// Whether a directory has taken this node.
    attachment: Cell<Attachment>,
}

impl NodeMeta {
    /// Create a detached header.
    ///
    /// # Arguments
    /// * `name` - Entry name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: RefCell::new(name.into()),
            attachment: Cell::new(Attachment::Detached),
        }
    }

    /// Get a copy of the entry name.
    pub fn name(&self) -> String {
        self.name.borrow().clone()
    }

    /// Replace the entry name.
    pub fn set_name(&self, value: impl Into<String>) {
        *self.name.borrow_mut() = value.into();
    }

    /// Current ownership state.
    pub fn attachment(&self) -> Attachment {
        self.attachment.get()
    }

    /// Move from `Detached` to `Attached`.
    ///
    /// # Returns
    /// `FsError::AlreadyAttached` if the node already has a parent.
    pub(crate) fn attach(&self) -> Result<()> {
        match self.attachment.get() {
            Attachment::Attached => Err(FsError::AlreadyAttached { name: self.name() }),
            Attachment::Detached => {
                self.attachment.set(Attachment::Attached);
                Ok(())
            }
        }
    }
}

/// Common trait for all node kinds.
pub trait Node: fmt::Debug {
    /// Get the identity header.
    fn meta(&self) -> &NodeMeta;

    /// Get the node type.
    fn node_type(&self) -> NodeType;

    /// Get the size in bytes. Zero for directories and links.
    fn size(&self) -> usize {
        0
    }

    /// View this node as a container, if it is one.
    fn as_directory(&self) -> Option<&Directory> {
        None
    }

    /// Downcast to Any for type-safe downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Get the entry name.
    fn name(&self) -> String {
        self.meta().name()
    }

    /// Set the entry name. No validation is applied.
    fn set_name(&self, value: &str) {
        self.meta().set_name(value);
    }

    /// Whether this node is already a child of some directory.
    fn is_attached(&self) -> bool {
        self.meta().attachment() == Attachment::Attached
    }
}

impl fmt::Display for dyn Node + '_ {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.meta().name.borrow())
    }
}

/// Compare two node handles by identity.
///
/// # Arguments
/// * `a` - First node
/// * `b` - Second node
pub fn same_node(a: &NodeRef, b: &NodeRef) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}
