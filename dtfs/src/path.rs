// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Path composition and classification.
//!
//! Every operation takes a non-empty `base` and an optional relative `path`,
//! which are joined with [`compose`] before the backing store is queried.

use std::io;

use log::debug;

use crate::error::Error;
use crate::store::{EntryKind, Store};

/// Whether a path names a node or a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// A container of subnodes and properties.
    Node,
    /// A leaf holding a raw value.
    Property,
}

/// Joins `base` and `path`, inserting a `/` unless one side already
/// provides it. A missing `path` yields `base` itself.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `base` is empty.
///
/// # Examples
///
/// ```
/// # use dtfs::path::compose;
/// assert_eq!(compose("/a", Some("b")).unwrap(), "/a/b");
/// assert_eq!(compose("/a/", Some("b")).unwrap(), "/a/b");
/// assert_eq!(compose("/a", Some("/b")).unwrap(), "/a/b");
/// assert_eq!(compose("/a", None).unwrap(), "/a");
/// ```
pub fn compose(base: &str, path: Option<&str>) -> crate::Result<String> {
    if base.is_empty() {
        return Err(Error::InvalidArgument("base path must not be empty"));
    }
    let Some(path) = path else {
        return Ok(base.to_owned());
    };
    let mut composed = String::with_capacity(base.len() + path.len() + 1);
    composed.push_str(base);
    if !base.ends_with('/') && !path.starts_with('/') {
        composed.push('/');
    }
    composed.push_str(path);
    Ok(composed)
}

/// Determines whether the composed path is a node or a property.
///
/// # Errors
///
/// Returns [`Error::NotFound`] or [`Error::Io`] if the path cannot be
/// inspected, and [`Error::UnsupportedEntry`] if it is neither a container
/// nor a blob.
///
/// # Examples
///
/// ```
/// # use dtfs::memory::{MemoryNode, MemoryStore};
/// # use dtfs::path::{PathKind, classify};
/// let store = MemoryStore::new(
///     MemoryNode::builder("")
///         .child(MemoryNode::builder("chosen").property("bootargs", "quiet\0").build())
///         .build(),
/// );
/// assert_eq!(classify(&store, "/chosen", None).unwrap(), PathKind::Node);
/// assert_eq!(classify(&store, "/chosen", Some("bootargs")).unwrap(), PathKind::Property);
/// assert!(classify(&store, "/chosen", Some("missing")).unwrap_err().is_not_found());
/// ```
pub fn classify<S: Store + ?Sized>(
    store: &S,
    base: &str,
    path: Option<&str>,
) -> crate::Result<PathKind> {
    let path = compose(base, path)?;
    match store.stat(&path) {
        Ok(EntryKind::Container) => Ok(PathKind::Node),
        Ok(EntryKind::Blob) => Ok(PathKind::Property),
        Ok(EntryKind::Other) => Err(Error::UnsupportedEntry { path }),
        Err(e) => Err(Error::io(path, e)),
    }
}

/// Reads the raw value of the property at the composed path.
///
/// The returned buffer is freshly allocated and owned by the caller; an
/// empty property yields an empty buffer.
///
/// # Errors
///
/// Returns the errors of [`classify`], [`Error::Io`] with an
/// [`IsADirectory`](io::ErrorKind::IsADirectory) source if the path is a
/// node, or [`Error::Io`] if its contents cannot be read in full.
pub fn read_property<S: Store + ?Sized>(
    store: &S,
    base: &str,
    path: Option<&str>,
) -> crate::Result<Vec<u8>> {
    let full = compose(base, path)?;
    if classify(store, &full, None)? == PathKind::Node {
        return Err(Error::io(full, io::Error::from(io::ErrorKind::IsADirectory)));
    }
    debug!("reading property {full}");
    store.read_all(&full).map_err(|e| Error::io(full, e))
}
