// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A library for walking a device tree exported as a filesystem, such as
//! `/proc/device-tree`, and decoding its property values.
//!
//! The kernel exports each device tree node as a directory and each
//! property as a file holding the raw property value. This library provides:
//!
//! - Path helpers to compose paths and tell nodes from properties
//!   ([`path`]).
//! - A lazy listing of the entries under a node and a depth-first walk over
//!   a whole tree ([`walk`]).
//! - Type inference for raw property values, which carry no type
//!   information of their own, and typed accessors for strings and 32-bit
//!   cells ([`property`]).
//!
//! All filesystem access goes through the [`Store`](store::Store) trait.
//! [`FsStore`](store::FsStore) reads the host filesystem and
//! [`MemoryStore`](memory::MemoryStore) serves a tree built in memory.
//!
//! # Examples
//!
//! ```
//! use dtfs::memory::{MemoryNode, MemoryStore};
//! use dtfs::path::{PathKind, classify, read_property};
//! use dtfs::property::{Property, PropertyType};
//! use dtfs::walk::list_children;
//!
//! let store = MemoryStore::new(
//!     MemoryNode::builder("")
//!         .child(
//!             MemoryNode::builder("root")
//!                 .child(MemoryNode::new("child"))
//!                 .property("prop", "hello\0")
//!                 .build(),
//!         )
//!         .build(),
//! );
//!
//! for name in list_children(&store, "/root", None).unwrap() {
//!     let name = name.unwrap();
//!     match classify(&store, "/root", Some(name.as_str())).unwrap() {
//!         PathKind::Node => assert_eq!(name, "child"),
//!         PathKind::Property => {
//!             let value = read_property(&store, "/root", Some(name.as_str())).unwrap();
//!             let prop = Property::new(&value);
//!             assert_eq!(prop.property_type(), PropertyType::Strings(1));
//!             assert_eq!(prop.string(0).unwrap(), "hello");
//!         }
//!     }
//! }
//! ```

#![warn(missing_docs, rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod memory;
pub mod path;
pub mod property;
pub mod store;
pub mod walk;

pub use error::Error;

/// Where Linux exports the live device tree.
pub const DEFAULT_ROOT: &str = "/proc/device-tree";

/// A specialized [`Result`](core::result::Result) type for this crate.
pub type Result<T> = core::result::Result<T, Error>;
