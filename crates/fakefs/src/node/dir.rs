//! Directory node implementation.

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::io::Write;
use std::rc::Rc;

use tracing::{debug, trace, warn};

use crate::error::Result;
use crate::options::PrintOptions;

use super::file::File;
use super::iter::Entries;
use super::types::{same_node, Node, NodeMeta, NodeRef, NodeType};

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::File {}
    impl Sealed for super::Directory {}
}

/// Node kinds that a directory accepts as children.
///
/// Implemented for [`File`] and [`Directory`] only. Links cannot be added.
pub trait Attachable: Node + sealed::Sealed + 'static {}

impl Attachable for File {}
impl Attachable for Directory {}

/// Directory node owning an ordered list of children.
#[derive(Debug)]
pub struct Directory {
    /// Name and ownership state.
    meta: NodeMeta,
    /// Children in insertion order.
    children: RefCell<Vec<NodeRef>>,
    /// Index of the child most recently returned by `first`/`next`.
    cursor: Cell<usize>,
}

impl Directory {
    /// Create a new empty, detached directory.
    ///
    /// # Arguments
    /// * `name` - Directory name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            meta: NodeMeta::new(name),
            children: RefCell::new(Vec::new()),
            cursor: Cell::new(0),
        }
    }

    /// Attach a file or directory as the last child.
    ///
    /// # Arguments
    /// * `item` - Node to attach
    ///
    /// # Returns
    /// `FsError::AlreadyAttached` if `item` already belongs to a directory,
    /// this one included. The tree is left unchanged in that case.
    pub fn add<T: Attachable>(&self, item: Rc<T>) -> Result<()> {
        if let Err(err) = item.meta().attach() {
            warn!(parent = %self.meta.name(), child = %item.name(), "rejected double add");
            return Err(err);
        }

        let node: NodeRef = item;
        self.cursor.set(0);
        let mut children = self.children.borrow_mut();
        children.push(node);
        debug!(
            parent = %self.meta.name(),
            count = children.len(),
            "added child"
        );
        Ok(())
    }

    /// Get the first child and move the cursor to it.
    ///
    /// # Returns
    /// The first child, or None if the directory is empty.
    pub fn first(&self) -> Option<NodeRef> {
        let children = self.children.borrow();
        let first: NodeRef = children.first()?.clone();
        self.cursor.set(0);
        Some(first)
    }

    /// Get the child following `current` in insertion order.
    ///
    /// Constant time when `current` is the child last returned by
    /// `first`/`next`; otherwise a linear scan locates it. A node that is
    /// not a child of this directory is treated like the last child.
    ///
    /// # Arguments
    /// * `current` - A child of this directory
    ///
    /// # Returns
    /// The next child, or None at the end. Reaching the end resets the cursor.
    pub fn next(&self, current: &NodeRef) -> Option<NodeRef> {
        let children = self.children.borrow();
        let cursor: usize = self.cursor.get();

        let position: Option<usize> = match children.get(cursor) {
            Some(cached) if same_node(cached, current) => {
                trace!(index = cursor, "cursor hit");
                Some(cursor)
            }
            _ => {
                trace!(index = cursor, "cursor miss, scanning");
                children.iter().position(|child| same_node(child, current))
            }
        };

        match position.map(|index| index + 1) {
            Some(index) if index < children.len() => {
                self.cursor.set(index);
                Some(children[index].clone())
            }
            _ => {
                self.cursor.set(0);
                None
            }
        }
    }

    /// Iterate the children through the `first`/`next` protocol.
    pub fn entries(&self) -> Entries<'_> {
        Entries::new(self)
    }

    /// Get a snapshot of all children in insertion order.
    pub fn children(&self) -> Vec<NodeRef> {
        self.children.borrow().clone()
    }

    /// Get the first child with the given name.
    ///
    /// # Arguments
    /// * `name` - Child entry name
    pub fn get_child(&self, name: &str) -> Option<NodeRef> {
        self.children
            .borrow()
            .iter()
            .find(|child| child.name() == name)
            .cloned()
    }

    /// Get the number of children.
    pub fn child_count(&self) -> usize {
        self.children.borrow().len()
    }

    /// Check if the directory has no children.
    pub fn is_empty(&self) -> bool {
        self.children.borrow().is_empty()
    }

    /// Visit this subtree in pre-order.
    ///
    /// `visit` is called for this directory at `level`, then for each child
    /// in insertion order at `level + 1`, descending into subdirectories
    /// before moving to the next sibling. A directory's children are
    /// snapshotted right after the directory itself is visited, so `visit`
    /// may add to or rename nodes without a borrow conflict.
    ///
    /// # Arguments
    /// * `visit` - Callback receiving each node and its depth
    /// * `level` - Depth assigned to this directory
    pub fn recurse(&self, visit: &mut dyn FnMut(&dyn Node, usize), level: usize) {
        trace!(depth = level, name = %self.meta.name(), "visit");
        visit(self, level);

        for child in self.children() {
            match child.as_directory() {
                Some(dir) => dir.recurse(visit, level + 1),
                None => {
                    trace!(depth = level + 1, name = %child, "visit");
                    visit(&*child, level + 1);
                }
            }
        }
    }

    /// Visit this subtree in pre-order starting at depth 0.
    ///
    /// # Arguments
    /// * `visit` - Callback receiving each node and its depth
    pub fn walk<F>(&self, mut visit: F)
    where
        F: FnMut(&dyn Node, usize),
    {
        self.recurse(&mut visit, 0);
    }

    /// Write the subtree, one `<level spaces>/<name>` line per node.
    ///
    /// # Arguments
    /// * `out` - Destination writer
    pub fn print_subtree<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        self.print_subtree_with(out, &PrintOptions::default())
    }

    /// Write the subtree using custom layout options.
    ///
    /// Stops writing after the first failed write and returns that error.
    ///
    /// # Arguments
    /// * `out` - Destination writer
    /// * `options` - Line layout
    pub fn print_subtree_with<W: Write + ?Sized>(
        &self,
        out: &mut W,
        options: &PrintOptions,
    ) -> Result<()> {
        let mut outcome: std::io::Result<()> = Ok(());
        self.walk(|node, level| {
            if outcome.is_ok() {
                outcome = write!(out, "{}{}{}", options.prefix(level), node, options.line_ending);
            }
        });
        outcome?;
        Ok(())
    }

    /// Render the subtree with default options.
    pub fn subtree_string(&self) -> String {
        let mut rendered: Vec<u8> = Vec::new();
        if let Err(e) = self.print_subtree(&mut rendered) {
            warn!(name = %self.meta.name(), "render failed: {}", e);
        }
        String::from_utf8_lossy(&rendered).into_owned()
    }
}

impl Node for Directory {
    fn meta(&self) -> &NodeMeta {
        &self.meta
    }

    fn node_type(&self) -> NodeType {
        NodeType::Directory
    }

    fn as_directory(&self) -> Option<&Directory> {
        Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl fmt::Display for Directory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.meta.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FsError;

    fn as_node<T: Node + 'static>(node: &Rc<T>) -> NodeRef {
        node.clone()
    }

    #[test]
    fn test_directory_basic() {
        let dir: Directory = Directory::new("dir3");

        assert_eq!(dir.name(), "dir3");
        assert_eq!(dir.node_type(), NodeType::Directory);
        assert_eq!(dir.size(), 0);
        assert!(dir.is_empty());
        assert!(dir.as_directory().is_some());
        assert!(dir.first().is_none());
    }

    #[test]
    fn test_add_marks_attached() {
        let dir: Directory = Directory::new("d");
        let file: Rc<File> = Rc::new(File::new("f"));

        assert!(!file.is_attached());
        dir.add(file.clone()).unwrap();
        assert!(file.is_attached());
        assert_eq!(dir.child_count(), 1);
        assert_eq!(dir.size(), 0);
    }

    #[test]
    fn test_double_add_rejected() {
        let d1: Rc<Directory> = Rc::new(Directory::new("d1"));
        let d2: Rc<Directory> = Rc::new(Directory::new("d2"));
        let file: Rc<File> = Rc::new(File::new("f"));

        d1.add(file.clone()).unwrap();

        let err: FsError = d2.add(file.clone()).unwrap_err();
        assert!(matches!(err, FsError::AlreadyAttached { .. }));
        let err: FsError = d1.add(file.clone()).unwrap_err();
        assert!(matches!(err, FsError::AlreadyAttached { .. }));

        assert_eq!(d1.child_count(), 1);
        assert!(d2.is_empty());
    }

    #[test]
    fn test_double_add_directory_rejected() {
        let root: Directory = Directory::new("");
        let other: Directory = Directory::new("other");
        let sub: Rc<Directory> = Rc::new(Directory::new("sub"));

        root.add(sub.clone()).unwrap();
        assert!(other.add(sub).is_err());
        assert!(other.is_empty());
    }

    #[test]
    fn test_first_next_in_order() {
        let dir: Directory = Directory::new("d");
        let a: Rc<File> = Rc::new(File::new("a"));
        let b: Rc<File> = Rc::new(File::new("b"));
        let c: Rc<Directory> = Rc::new(Directory::new("c"));
        dir.add(a.clone()).unwrap();
        dir.add(b.clone()).unwrap();
        dir.add(c.clone()).unwrap();

        let item: NodeRef = dir.first().unwrap();
        assert!(same_node(&item, &as_node(&a)));
        let item: NodeRef = dir.next(&item).unwrap();
        assert!(same_node(&item, &as_node(&b)));
        let item: NodeRef = dir.next(&item).unwrap();
        assert!(same_node(&item, &as_node(&c)));
        assert!(dir.next(&item).is_none());
        assert_eq!(dir.cursor.get(), 0);
    }

    #[test]
    fn test_next_cursor_miss_matches_hit() {
        let dir: Directory = Directory::new("d");
        let names: [&str; 4] = ["a", "b", "c", "d"];
        let files: Vec<Rc<File>> = names.iter().map(|n| Rc::new(File::new(*n))).collect();
        for file in &files {
            dir.add(file.clone()).unwrap();
        }

        // sequential walk through the cursor
        let mut sequential: Vec<String> = Vec::new();
        let mut item: Option<NodeRef> = dir.first();
        while let Some(node) = item {
            sequential.push(node.name());
            item = dir.next(&node);
        }
        assert_eq!(sequential, names);

        // out of order lookups give the same answers
        for (index, file) in files.iter().enumerate().rev() {
            let expected: Option<String> = names.get(index + 1).map(|n| n.to_string());
            assert_eq!(dir.next(&as_node(file)).map(|n| n.name()), expected);
        }
    }

    #[test]
    fn test_next_updates_cursor() {
        let dir: Directory = Directory::new("d");
        let a: Rc<File> = Rc::new(File::new("a"));
        let b: Rc<File> = Rc::new(File::new("b"));
        let c: Rc<File> = Rc::new(File::new("c"));
        dir.add(a).unwrap();
        dir.add(b.clone()).unwrap();
        dir.add(c).unwrap();

        let item: NodeRef = dir.next(&as_node(&b)).unwrap();
        assert_eq!(item.name(), "c");
        assert_eq!(dir.cursor.get(), 2);
    }

    #[test]
    fn test_next_unknown_node() {
        let dir: Directory = Directory::new("d");
        dir.add(Rc::new(File::new("a"))).unwrap();
        let stranger: NodeRef = Rc::new(File::new("a"));

        dir.first();
        assert!(dir.next(&stranger).is_none());
        assert_eq!(dir.cursor.get(), 0);
    }

    #[test]
    fn test_next_on_empty_directory() {
        let dir: Directory = Directory::new("d");
        let stranger: NodeRef = Rc::new(File::new("x"));
        assert!(dir.next(&stranger).is_none());
    }

    #[test]
    fn test_add_resets_cursor() {
        let dir: Directory = Directory::new("d");
        let a: Rc<File> = Rc::new(File::new("a"));
        let b: Rc<File> = Rc::new(File::new("b"));
        dir.add(a).unwrap();
        dir.add(b).unwrap();

        let first: NodeRef = dir.first().unwrap();
        let second: NodeRef = dir.next(&first).unwrap();
        assert_eq!(dir.cursor.get(), 1);

        dir.add(Rc::new(File::new("c"))).unwrap();
        assert_eq!(dir.cursor.get(), 0);
        assert_eq!(dir.next(&second).map(|n| n.name()), Some("c".to_string()));
    }

    #[test]
    fn test_get_child_by_name() {
        let dir: Directory = Directory::new("d");
        let first: Rc<File> = Rc::new(File::new("same"));
        dir.add(first.clone()).unwrap();
        dir.add(Rc::new(File::new("same"))).unwrap();

        let found: NodeRef = dir.get_child("same").unwrap();
        assert!(same_node(&found, &as_node(&first)));
        assert!(dir.get_child("missing").is_none());
        assert_eq!(dir.child_count(), 2);
    }

    #[test]
    fn test_recurse_levels() {
        let root: Directory = Directory::new("");
        let sub: Rc<Directory> = Rc::new(Directory::new("sub"));
        sub.add(Rc::new(File::new("inner"))).unwrap();
        root.add(sub).unwrap();
        root.add(Rc::new(File::new("outer"))).unwrap();

        let mut visited: Vec<(String, usize)> = Vec::new();
        root.recurse(&mut |node, level| visited.push((node.name(), level)), 3);

        assert_eq!(
            visited,
            vec![
                ("".to_string(), 3),
                ("sub".to_string(), 4),
                ("inner".to_string(), 5),
                ("outer".to_string(), 4),
            ]
        );
    }

    #[test]
    fn test_recurse_visitor_mutates_tree() {
        let root: Directory = Directory::new("");
        root.add(Rc::new(Directory::new("sub"))).unwrap();

        let mut added: usize = 0;
        let mut visited: Vec<String> = Vec::new();
        root.walk(|node, _level| {
            visited.push(node.name());
            if let Some(dir) = node.as_directory() {
                dir.add(Rc::new(File::new(format!("x{}", added)))).unwrap();
                added += 1;
                node.set_name(&format!("{}!", node.name()));
            }
        });

        assert_eq!(added, 2);
        assert_eq!(visited, vec!["", "sub", "x1", "x0"]);
        assert_eq!(root.subtree_string(), "/!\n /sub!\n  /x1\n /x0\n");
    }

    #[test]
    fn test_subtree_string_matches_print_subtree() {
        let root: Directory = Directory::new("r");
        let sub: Rc<Directory> = Rc::new(Directory::new("s"));
        sub.add(Rc::new(File::new("f"))).unwrap();
        root.add(sub).unwrap();
        root.add(Rc::new(File::new("g"))).unwrap();

        let mut out: Vec<u8> = Vec::new();
        root.print_subtree(&mut out).unwrap();
        assert_eq!(root.subtree_string(), String::from_utf8(out).unwrap());
        assert_eq!(root.subtree_string(), "/r\n /s\n  /f\n /g\n");
    }

    #[test]
    fn test_print_subtree_custom_options() {
        let root: Directory = Directory::new("r");
        let sub: Rc<Directory> = Rc::new(Directory::new("s"));
        sub.add(Rc::new(File::new("f"))).unwrap();
        root.add(sub).unwrap();

        let options: PrintOptions = PrintOptions::default()
            .with_indent('-')
            .with_indent_width(2)
            .with_line_ending("\r\n");
        let mut out: Vec<u8> = Vec::new();
        root.print_subtree_with(&mut out, &options).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "/r\r\n--/s\r\n----/f\r\n");
    }

    #[test]
    fn test_print_subtree_write_error() {
        struct FailingWriter;

        impl Write for FailingWriter {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let root: Directory = Directory::new("");
        root.add(Rc::new(File::new("f"))).unwrap();

        let err: FsError = root.print_subtree(&mut FailingWriter).unwrap_err();
        assert!(matches!(err, FsError::Io(_)));
    }

    #[test]
    fn test_display_is_name() {
        let dir: Directory = Directory::new("dir33");
        assert_eq!(dir.to_string(), "dir33");
        let node: NodeRef = Rc::new(Directory::new("dyn"));
        assert_eq!(node.to_string(), "dyn");
    }
}
