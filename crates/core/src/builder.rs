//! Convenience builder for assembling graphs.
//!
//! Embedders and tests describe graph contents entry by entry; the builder
//! collects entries keyed by start key (last write wins), then sorts and
//! validates at build time. Every node produced carries the builder's
//! clock, so a built graph is one atomic unit of knowledge at one version.

use crate::error::Result;
use crate::graph::Graph;
use crate::key::Key;
use crate::node::{Clock, Node};
use crate::value::{Path, Value};
use alloc::vec::Vec;
use hashbrown::HashMap;

/// Builds a sorted, validated graph from unordered entries.
///
/// # Example
///
/// ```
/// use mirra_core::{GraphBuilder, Key};
///
/// let graph = GraphBuilder::new(1)
///     .value("name", "Alice")
///     .empty_range("posts", "pz")
///     .branch("settings", |b| b.value("theme", "dark"))
///     .build()
///     .unwrap();
///
/// assert_eq!(graph.len(), 3);
/// assert!(graph.covers(&Key::from("name")));
/// ```
pub struct GraphBuilder {
    entries: HashMap<Key, Node>,
    clock: Clock,
}

impl GraphBuilder {
    /// Creates a builder whose entries will all carry `clock`.
    pub fn new(clock: Clock) -> Self {
        Self {
            entries: HashMap::new(),
            clock,
        }
    }

    /// Registers terminal data at `key`. A later entry for the same key
    /// replaces an earlier one.
    pub fn value(mut self, key: impl Into<Key>, value: impl Into<Value>) -> Self {
        let node = Node::value(key, self.clock, value);
        self.entries.insert(node.key().clone(), node);
        self
    }

    /// Registers a cross-reference at `key`.
    pub fn link(mut self, key: impl Into<Key>, path: Path) -> Self {
        let node = Node::link(key, self.clock, path);
        self.entries.insert(node.key().clone(), node);
        self
    }

    /// Registers a known-empty span `[key, end]`.
    pub fn empty_range(mut self, key: impl Into<Key>, end: impl Into<Key>) -> Self {
        let node = Node::range(key, end, self.clock);
        self.entries.insert(node.key().clone(), node);
        self
    }

    /// Registers a subtree at `key`, described by a nested builder.
    ///
    /// The nested builder inherits this builder's clock. Panics if the
    /// nested contents fail validation; nesting errors surface at the
    /// outer [`build`](GraphBuilder::build) otherwise.
    pub fn branch(mut self, key: impl Into<Key>, f: impl FnOnce(GraphBuilder) -> GraphBuilder) -> Self {
        let children = f(GraphBuilder::new(self.clock))
            .build()
            .expect("nested branch contents must be valid");
        let node = Node::branch(key, self.clock, children);
        self.entries.insert(node.key().clone(), node);
        self
    }

    /// Sorts the collected entries and validates the graph invariants.
    pub fn build(self) -> Result<Graph> {
        let mut nodes: Vec<Node> = self.entries.into_values().collect();
        nodes.sort_by(|a, b| a.key().cmp(b.key()));
        Graph::from_sorted(nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_builder_sorts_entries() {
        let graph = GraphBuilder::new(2)
            .value("c", 3i64)
            .value("a", 1i64)
            .value("b", 2i64)
            .build()
            .unwrap();

        let keys: Vec<&Key> = graph.iter().map(Node::key).collect();
        assert_eq!(keys, vec![&Key::from("a"), &Key::from("b"), &Key::from("c")]);
        assert!(graph.iter().all(|n| n.clock() == 2));
    }

    #[test]
    fn test_builder_last_write_wins() {
        let graph = GraphBuilder::new(0)
            .value("a", 1i64)
            .value("a", 2i64)
            .build()
            .unwrap();

        assert_eq!(graph.len(), 1);
        let Some(Node::Point(point)) = graph.get(0) else {
            panic!("expected a point");
        };
        assert_eq!(point.payload.as_value().and_then(Value::as_i64), Some(2));
    }

    #[test]
    fn test_builder_nested_branch() {
        let graph = GraphBuilder::new(1)
            .branch("foo", |b| {
                b.value("x", 1i64)
                    .link("y", vec![Key::from("bar"), Key::from("2")])
            })
            .build()
            .unwrap();

        let Some(Node::Branch(branch)) = graph.get(0) else {
            panic!("expected a branch");
        };
        assert_eq!(branch.children.len(), 2);
        assert_eq!(branch.children.get(0).unwrap().key(), &Key::from("x"));
    }

    #[test]
    fn test_builder_rejects_overlapping_ranges() {
        let result = GraphBuilder::new(0)
            .empty_range("a", "m")
            .value("d", 1i64)
            .build();
        assert!(result.is_err());
    }
}
