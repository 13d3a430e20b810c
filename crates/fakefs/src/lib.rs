//! In-memory mock filesystem for tests and simulations.
//!
//! A tree of [`Directory`], [`File`] and [`Link`] nodes. Directories own their
//! children, files hold appendable byte buffers, and links observe a target
//! without keeping it alive. Nothing is persisted and nothing is thread-safe.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use rusty_fakefs::{create_root, Directory, File};
//!
//! let root = create_root();
//! let docs = Rc::new(Directory::new("docs"));
//! docs.add(Rc::new(File::new("readme"))).unwrap();
//! root.add(docs).unwrap();
//!
//! assert_eq!(root.subtree_string(), "/\n /docs\n  /readme\n");
//! ```

pub mod error;
pub mod node;
pub mod options;

use std::rc::Rc;

pub use error::{FsError, Result};
pub use node::{
    same_node, Attachable, Attachment, Directory, Entries, File, Link, Node, NodeMeta, NodeRef,
    NodeType, WeakNodeRef,
};
pub use options::PrintOptions;

/// Create an empty root directory with an empty name.
pub fn create_root() -> Rc<Directory> {
    Rc::new(Directory::new(""))
}
