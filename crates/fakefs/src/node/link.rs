//! Soft link node implementation.

use std::any::Any;
use std::fmt;
use std::rc::{Rc, Weak};

use super::types::{Node, NodeMeta, NodeRef, NodeType, WeakNodeRef};

/// Link node pointing at another node without owning it.
///
/// The link's name is independent of its target's. Once every owner of the
/// target is gone the link resolves to nothing.
#[derive(Debug)]
pub struct Link {
    /// Name and ownership state.
    meta: NodeMeta,
    /// Non-owning reference to the target.
    pointer: WeakNodeRef,
}

impl Link {
    /// Create a link to a typed node.
    ///
    /// The target's attachment state is left untouched.
    ///
    /// # Arguments
    /// * `name` - Link name
    /// * `target` - Node to point at
    pub fn new<T: Node + 'static>(name: impl Into<String>, target: &Rc<T>) -> Self {
        let pointer: Weak<T> = Rc::downgrade(target);
        Self {
            meta: NodeMeta::new(name),
            pointer,
        }
    }

    /// Create a link from a type-erased node handle.
    ///
    /// # Arguments
    /// * `name` - Link name
    /// * `target` - Node to point at
    pub fn from_ref(name: impl Into<String>, target: &NodeRef) -> Self {
        Self {
            meta: NodeMeta::new(name),
            pointer: Rc::downgrade(target),
        }
    }

    /// Resolve the target.
    ///
    /// # Returns
    /// The live target, or None if it has been dropped.
    pub fn get_pointer(&self) -> Option<NodeRef> {
        self.pointer.upgrade()
    }

    /// Check if the target has been dropped.
    pub fn is_dangling(&self) -> bool {
        self.pointer.strong_count() == 0
    }
}

impl Node for Link {
    fn meta(&self) -> &NodeMeta {
        &self.meta
    }

    fn node_type(&self) -> NodeType {
        NodeType::Link
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.meta.name())
    }
}
