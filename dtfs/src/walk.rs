// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Listing and walking nodes.
//!
//! [`list_children`] lazily produces the entry names directly under a node.
//! [`for_each_child`] drives it with a callback, and [`walk`] performs a
//! full depth-first traversal, reporting what it finds to a [`Visitor`].

use core::fmt;

use log::{debug, warn};

use crate::error::Error;
use crate::path::{PathKind, classify, compose, read_property};
use crate::store::Store;

/// An iterator over the names of the subnodes and properties of a node.
///
/// Entries whose name starts with `.` are skipped. The order is whatever the
/// backing store yields. After the first error the iterator is exhausted.
pub struct Children<'s, S: Store + ?Sized + 's> {
    parent: String,
    names: Option<S::Names<'s>>,
}

impl<'s, S: Store + ?Sized + 's> Children<'s, S> {
    /// Returns the composed path of the node being listed.
    #[must_use]
    pub fn parent(&self) -> &str {
        &self.parent
    }
}

impl<'s, S: Store + ?Sized + 's> Iterator for Children<'s, S> {
    type Item = crate::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let names = self.names.as_mut()?;
        loop {
            match names.next() {
                Some(Ok(name)) if name.starts_with('.') => {}
                Some(Ok(name)) => return Some(Ok(name)),
                Some(Err(e)) => {
                    self.names = None;
                    return Some(Err(Error::io(self.parent.clone(), e)));
                }
                None => {
                    self.names = None;
                    return None;
                }
            }
        }
    }
}

impl<'s, S: Store + ?Sized + 's> fmt::Debug for Children<'s, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Children")
            .field("parent", &self.parent)
            .field("done", &self.names.is_none())
            .finish()
    }
}

/// Opens the node at the composed path for listing.
///
/// # Errors
///
/// Returns [`Error::NotFound`] or [`Error::Io`] if the path cannot be opened
/// as a node.
///
/// # Examples
///
/// ```
/// # use dtfs::memory::{MemoryNode, MemoryStore};
/// # use dtfs::walk::list_children;
/// let store = MemoryStore::new(
///     MemoryNode::builder("")
///         .property("model", "dummy\0")
///         .child(MemoryNode::new("cpus"))
///         .build(),
/// );
/// let names = list_children(&store, "/", None)
///     .unwrap()
///     .collect::<Result<Vec<_>, _>>()
///     .unwrap();
/// assert_eq!(names, ["cpus", "model"]);
/// ```
pub fn list_children<'s, S: Store + ?Sized>(
    store: &'s S,
    base: &str,
    node_path: Option<&str>,
) -> crate::Result<Children<'s, S>> {
    let parent = compose(base, node_path)?;
    debug!("listing {parent}");
    match store.list(&parent) {
        Ok(names) => Ok(Children {
            parent,
            names: Some(names),
        }),
        Err(e) => Err(Error::io(parent, e)),
    }
}

/// Calls `visitor` with the composed node path and the name of each entry
/// directly under it.
///
/// The callback does not recurse on its own; it may call [`classify`] and
/// `for_each_child` again to do so.
///
/// # Errors
///
/// Returns the errors of [`list_children`] without calling `visitor`, or the
/// first error raised while enumerating, after the entries listed so far
/// have been visited.
pub fn for_each_child<S, F>(
    store: &S,
    base: &str,
    node_path: Option<&str>,
    mut visitor: F,
) -> crate::Result<()>
where
    S: Store + ?Sized,
    F: FnMut(&str, &str),
{
    let mut children = list_children(store, base, node_path)?;
    while let Some(name) = children.next() {
        visitor(children.parent(), &name?);
    }
    Ok(())
}

/// Receives the nodes and properties found by [`walk`].
pub trait Visitor {
    /// Called for a node before its contents are walked. The children of the
    /// walk root are at depth 1.
    fn node(&mut self, path: &str, depth: usize);

    /// Called with the raw value of a property. `value` is only valid for the
    /// duration of the call.
    fn property(&mut self, path: &str, value: &[u8], depth: usize);

    /// Called when an entry cannot be classified, read, or listed. The walk
    /// continues with the next entry.
    fn error(&mut self, path: &str, error: &Error) {
        warn!("skipping {path}: {error}");
    }
}

/// Walks the tree under `root` depth-first.
///
/// Subnodes deeper than `max_depth` are reported but not entered; `None`
/// walks the whole tree and `Some(0)` only lists `root`.
///
/// # Errors
///
/// Returns an error only if `root` itself cannot be listed. Failures below
/// it are passed to [`Visitor::error`].
///
/// # Examples
///
/// ```
/// # use dtfs::memory::{MemoryNode, MemoryStore};
/// # use dtfs::walk::{Visitor, walk};
/// struct Paths(Vec<String>);
///
/// impl Visitor for Paths {
///     fn node(&mut self, path: &str, _depth: usize) {
///         self.0.push(path.to_owned());
///     }
///
///     fn property(&mut self, path: &str, _value: &[u8], _depth: usize) {
///         self.0.push(path.to_owned());
///     }
/// }
///
/// let store = MemoryStore::new(
///     MemoryNode::builder("")
///         .child(MemoryNode::builder("memory").property("reg", [0u8; 8]).build())
///         .build(),
/// );
/// let mut paths = Paths(Vec::new());
/// walk(&store, "/", None, &mut paths).unwrap();
/// assert_eq!(paths.0, ["/memory", "/memory/reg"]);
/// ```
pub fn walk<S, V>(
    store: &S,
    root: &str,
    max_depth: Option<usize>,
    visitor: &mut V,
) -> crate::Result<()>
where
    S: Store + ?Sized,
    V: Visitor + ?Sized,
{
    walk_node(store, root, 1, max_depth, visitor)
}

fn walk_node<S, V>(
    store: &S,
    path: &str,
    depth: usize,
    max_depth: Option<usize>,
    visitor: &mut V,
) -> crate::Result<()>
where
    S: Store + ?Sized,
    V: Visitor + ?Sized,
{
    let children = list_children(store, path, None)?;
    let parent = children.parent().to_owned();
    for name in children {
        let name = match name {
            Ok(name) => name,
            Err(e) => {
                visitor.error(&parent, &e);
                break;
            }
        };
        let child = compose(&parent, Some(name.as_str()))?;
        match classify(store, &child, None) {
            Ok(PathKind::Node) => {
                visitor.node(&child, depth);
                if max_depth.is_none_or(|max| depth <= max) {
                    if let Err(e) = walk_node(store, &child, depth + 1, max_depth, visitor) {
                        visitor.error(&child, &e);
                    }
                }
            }
            Ok(PathKind::Property) => match read_property(store, &child, None) {
                Ok(value) => visitor.property(&child, &value, depth),
                Err(e) => visitor.error(&child, &e),
            },
            Err(e) => visitor.error(&child, &e),
        }
    }
    Ok(())
}
