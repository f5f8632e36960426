// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The backing store that holds the exported device tree.
//!
//! The rest of the crate only ever stats, lists and reads paths through the
//! [`Store`] trait. [`FsStore`] implements it on top of the host filesystem,
//! which is what `/proc/device-tree` needs;
//! [`MemoryStore`](crate::memory::MemoryStore) keeps a tree in memory.

use std::fs::{self, File, ReadDir};
use std::io::{self, Read};

/// The type of an entry in a [`Store`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A directory-like entry with named children.
    Container,
    /// A flat, readable blob of bytes.
    Blob,
    /// Anything else, e.g. a FIFO or a device file.
    Other,
}

/// A read-only, hierarchical source of named containers and blobs.
///
/// Paths are `/`-separated strings. Implementations must not cache: every
/// call reflects the current state of the store.
pub trait Store {
    /// The names produced by [`Store::list`].
    type Names<'a>: Iterator<Item = io::Result<String>> + 'a
    where
        Self: 'a;

    /// Returns the type of the entry at `path`, following symbolic links.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` does not exist or cannot be inspected.
    fn stat(&self, path: &str) -> io::Result<EntryKind>;

    /// Returns the names of the direct children of the container at `path`,
    /// in whatever order the store yields them.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` is not a container that can be listed.
    fn list(&self, path: &str) -> io::Result<Self::Names<'_>>;

    /// Reads the whole blob at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` is not a readable blob, or if fewer bytes
    /// than its reported size could be read.
    fn read_all(&self, path: &str) -> io::Result<Vec<u8>>;
}

/// A [`Store`] backed by the host filesystem.
///
/// # Examples
///
/// ```no_run
/// # use dtfs::store::{EntryKind, FsStore, Store};
/// let store = FsStore;
/// assert_eq!(store.stat("/proc/device-tree").unwrap(), EntryKind::Container);
/// let model = store.read_all("/proc/device-tree/model").unwrap();
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct FsStore;

impl Store for FsStore {
    type Names<'a> = FsNames;

    fn stat(&self, path: &str) -> io::Result<EntryKind> {
        let metadata = fs::metadata(path)?;
        Ok(if metadata.is_dir() {
            EntryKind::Container
        } else if metadata.is_file() {
            EntryKind::Blob
        } else {
            EntryKind::Other
        })
    }

    fn list(&self, path: &str) -> io::Result<Self::Names<'_>> {
        Ok(FsNames {
            entries: fs::read_dir(path)?,
        })
    }

    fn read_all(&self, path: &str) -> io::Result<Vec<u8>> {
        let mut file = File::open(path)?;
        let expected = file.metadata()?.len();
        let mut value = Vec::with_capacity(usize::try_from(expected).unwrap_or_default());
        file.read_to_end(&mut value)?;
        if (value.len() as u64) < expected {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("truncated read: got {} of {expected} bytes", value.len()),
            ));
        }
        Ok(value)
    }
}

/// The entry names of a directory listed by [`FsStore`].
#[derive(Debug)]
pub struct FsNames {
    entries: ReadDir,
}

impl Iterator for FsNames {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.entries.next()?;
        Some(entry.map(|entry| entry.file_name().to_string_lossy().into_owned()))
    }
}
