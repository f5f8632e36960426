// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Error types for the `dtfs` crate.

use std::io;

use thiserror::Error;

use crate::property::PropertyKind;

/// An error that can occur when inspecting a device tree filesystem or
/// decoding one of its property values.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// An argument was rejected before touching the backing store.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// The path does not exist in the backing store.
    #[error("{path}: not found")]
    NotFound {
        /// The composed path that was looked up.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The backing store failed to stat, list, or read the path.
    #[error("{path}: {source}")]
    Io {
        /// The composed path that was accessed.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The path exists but is neither a node nor a property.
    #[error("{path}: neither a node nor a property")]
    UnsupportedEntry {
        /// The composed path that was classified.
        path: String,
    },
    /// An accessor was used on a value of a different inferred type.
    #[error("expected a {expected} property, found {found}")]
    TypeMismatch {
        /// The type the accessor decodes.
        expected: PropertyKind,
        /// The type inferred from the value.
        found: PropertyKind,
    },
    /// The requested element does not exist in the value.
    #[error("index {index} out of range for {count} elements")]
    IndexOutOfRange {
        /// The requested element index.
        index: usize,
        /// The number of elements in the value.
        count: usize,
    },
}

impl Error {
    /// Wraps an I/O error raised while accessing `path`.
    pub(crate) fn io(path: impl Into<String>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            Error::NotFound { path, source }
        } else {
            Error::Io { path, source }
        }
    }

    /// Returns `true` if this error means the path does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}
