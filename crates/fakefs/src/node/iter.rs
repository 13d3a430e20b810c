//! Iterator adapter over a directory's `first`/`next` protocol.

use std::iter::FusedIterator;

use super::dir::Directory;
use super::types::NodeRef;

/// Iterator over the children of a [`Directory`] in insertion order.
///
/// Each step goes through [`Directory::next`], so an uninterrupted walk
/// stays on the cursor fast path.
#[derive(Debug)]
pub struct Entries<'a> {
    dir: &'a Directory,
    current: Option<NodeRef>,
    done: bool,
}

impl<'a> Entries<'a> {
    pub(crate) fn new(dir: &'a Directory) -> Self {
        Self {
            dir,
            current: None,
            done: false,
        }
    }
}

impl Iterator for Entries<'_> {
    type Item = NodeRef;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let next: Option<NodeRef> = match &self.current {
            None => self.dir.first(),
            Some(current) => self.dir.next(current),
        };

        if next.is_none() {
            self.done = true;
        }
        self.current = next.clone();
        next
    }
}

impl FusedIterator for Entries<'_> {}
