// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! An in-memory backing store.
//!
//! [`MemoryStore`] serves a tree of [`MemoryNode`]s through the
//! [`Store`] trait, so the rest of the crate can be driven without an
//! exported device tree on the host.

mod node;

use std::io;

pub use node::{MemoryNode, MemoryNodeBuilder};

use crate::store::{EntryKind, Store};

/// A [`Store`] holding a device tree in memory.
///
/// Paths are resolved from the root node, ignoring empty components, so
/// `/cpus/cpu@0` and `cpus//cpu@0/` name the same node. Listings yield
/// subnodes first, then properties, each in insertion order.
///
/// # Examples
///
/// ```
/// # use dtfs::memory::{MemoryNode, MemoryStore};
/// # use dtfs::store::{EntryKind, Store};
/// let store = MemoryStore::new(
///     MemoryNode::builder("")
///         .property("#address-cells", 2u32.to_be_bytes())
///         .child(MemoryNode::new("cpus"))
///         .build(),
/// );
/// assert_eq!(store.stat("/cpus").unwrap(), EntryKind::Container);
/// assert_eq!(store.read_all("/#address-cells").unwrap(), [0, 0, 0, 2]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    root: MemoryNode,
}

enum Entry<'a> {
    Node(&'a MemoryNode),
    Property(&'a [u8]),
}

impl MemoryStore {
    /// Creates a new `MemoryStore` serving the given root node at `/`.
    #[must_use]
    pub fn new(root: MemoryNode) -> Self {
        Self { root }
    }

    /// Returns a reference to the root node.
    #[must_use]
    pub fn root(&self) -> &MemoryNode {
        &self.root
    }

    fn lookup(&self, path: &str) -> io::Result<Entry<'_>> {
        let mut entry = Entry::Node(&self.root);
        for component in path.split('/').filter(|s| !s.is_empty()) {
            let Entry::Node(node) = entry else {
                return Err(io::Error::from(io::ErrorKind::NotADirectory));
            };
            entry = if let Some(child) = node.child(component) {
                Entry::Node(child)
            } else if let Some(value) = node.property(component) {
                Entry::Property(value)
            } else {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no entry named {component:?}"),
                ));
            };
        }
        Ok(entry)
    }
}

impl Store for MemoryStore {
    type Names<'a> = std::vec::IntoIter<io::Result<String>>;

    fn stat(&self, path: &str) -> io::Result<EntryKind> {
        Ok(match self.lookup(path)? {
            Entry::Node(_) => EntryKind::Container,
            Entry::Property(_) => EntryKind::Blob,
        })
    }

    fn list(&self, path: &str) -> io::Result<Self::Names<'_>> {
        match self.lookup(path)? {
            Entry::Node(node) => Ok(node
                .entry_names()
                .map(|name| Ok(name.to_owned()))
                .collect::<Vec<_>>()
                .into_iter()),
            Entry::Property(_) => Err(io::Error::from(io::ErrorKind::NotADirectory)),
        }
    }

    fn read_all(&self, path: &str) -> io::Result<Vec<u8>> {
        match self.lookup(path)? {
            Entry::Node(_) => Err(io::Error::from(io::ErrorKind::IsADirectory)),
            Entry::Property(value) => Ok(value.to_vec()),
        }
    }
}
