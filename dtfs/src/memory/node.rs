// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use indexmap::IndexMap;

/// An in-memory device tree node.
///
/// Children and properties are stored in [`IndexMap`]s, which provide O(1)
/// lookups by name while preserving insertion order. A name is held by at
/// most one child or property, as in a directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryNode {
    name: String,
    properties: IndexMap<String, Vec<u8>>,
    children: IndexMap<String, MemoryNode>,
}

impl MemoryNode {
    /// Creates a new [`MemoryNode`] with the given name and no contents.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dtfs::memory::MemoryNode;
    /// let node = MemoryNode::new("cpus");
    /// assert_eq!(node.name(), "cpus");
    /// ```
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Creates a new [`MemoryNodeBuilder`] with the given name.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> MemoryNodeBuilder {
        MemoryNodeBuilder {
            node: MemoryNode::new(name),
        }
    }

    /// Returns the name of this node.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the raw value of a property by its name.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dtfs::memory::MemoryNode;
    /// let mut node = MemoryNode::new("chosen");
    /// node.add_property("bootargs", "console=ttyAMA0\0");
    /// assert_eq!(node.property("bootargs"), Some(&b"console=ttyAMA0\0"[..]));
    /// ```
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&[u8]> {
        self.properties.get(name).map(Vec::as_slice)
    }

    /// Adds a property to this node, replacing any property or child with
    /// the same name.
    pub fn add_property(&mut self, name: impl Into<String>, value: impl Into<Vec<u8>>) {
        let name = name.into();
        self.children.shift_remove(&name);
        self.properties.insert(name, value.into());
    }

    /// Returns a child by its name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&MemoryNode> {
        self.children.get(name)
    }

    /// Adds a child to this node, replacing any child or property with the
    /// same name.
    pub fn add_child(&mut self, child: MemoryNode) {
        self.properties.shift_remove(&child.name);
        self.children.insert(child.name.clone(), child);
    }

    /// Returns the names of the children followed by the names of the
    /// properties, each in insertion order.
    pub(crate) fn entry_names(&self) -> impl Iterator<Item = &str> {
        self.children
            .keys()
            .chain(self.properties.keys())
            .map(String::as_str)
    }
}

/// A builder for creating [`MemoryNode`]s.
#[derive(Debug, Default)]
pub struct MemoryNodeBuilder {
    node: MemoryNode,
}

impl MemoryNodeBuilder {
    /// Adds a property to the node.
    #[must_use]
    pub fn property(mut self, name: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.node.add_property(name, value);
        self
    }

    /// Adds a child to the node.
    #[must_use]
    pub fn child(mut self, child: MemoryNode) -> Self {
        self.node.add_child(child);
        self
    }

    /// Builds the `MemoryNode`.
    #[must_use]
    pub fn build(self) -> MemoryNode {
        self.node
    }
}
