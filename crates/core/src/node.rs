//! Node variants making up a graph.
//!
//! Every node carries a key and a logical clock. The three variants assert
//! different granularities of knowledge:
//!
//! - `Point`: the state of exactly one key (terminal data or a link).
//! - `Range`: the complete state of every key in `[key, end]`; keys in the
//!   interval not separately listed are absent.
//! - `Branch`: the subtree rooted at `key`, with its contents as a nested
//!   graph.

use crate::graph::Graph;
use crate::key::Key;
use crate::value::{Path, Payload, Value};

/// A logical clock value. Higher is fresher; conflicts between claims about
/// the same key(s) are resolved in favor of the higher clock.
pub type Clock = u64;

/// A node addressing exactly one key.
#[derive(Clone, Debug, PartialEq)]
pub struct PointNode {
    pub key: Key,
    pub clock: Clock,
    pub payload: Payload,
}

/// A node asserting complete knowledge over the interval `[key, end]`.
#[derive(Clone, Debug, PartialEq)]
pub struct RangeNode {
    pub key: Key,
    pub end: Key,
    pub clock: Clock,
}

/// A node whose contents are themselves a nested graph.
#[derive(Clone, Debug, PartialEq)]
pub struct BranchNode {
    pub key: Key,
    pub clock: Clock,
    pub children: Graph,
}

/// A single claim of knowledge within a graph.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Point(PointNode),
    Range(RangeNode),
    Branch(BranchNode),
}

impl Node {
    /// Creates a point node holding terminal data.
    pub fn value(key: impl Into<Key>, clock: Clock, value: impl Into<Value>) -> Self {
        Node::Point(PointNode {
            key: key.into(),
            clock,
            payload: Payload::Value(value.into()),
        })
    }

    /// Creates a point node holding a cross-reference.
    pub fn link(key: impl Into<Key>, clock: Clock, path: Path) -> Self {
        Node::Point(PointNode {
            key: key.into(),
            clock,
            payload: Payload::Link(path),
        })
    }

    /// Creates a range node spanning `[key, end]`.
    pub fn range(key: impl Into<Key>, end: impl Into<Key>, clock: Clock) -> Self {
        Node::Range(RangeNode {
            key: key.into(),
            end: end.into(),
            clock,
        })
    }

    /// Creates a branch node with the given children.
    pub fn branch(key: impl Into<Key>, clock: Clock, children: Graph) -> Self {
        Node::Branch(BranchNode {
            key: key.into(),
            clock,
            children,
        })
    }

    /// The node's key (the start of its span).
    #[inline]
    pub fn key(&self) -> &Key {
        match self {
            Node::Point(n) => &n.key,
            Node::Range(n) => &n.key,
            Node::Branch(n) => &n.key,
        }
    }

    /// The inclusive end of the node's span: a range's `end`, otherwise the
    /// node's own key.
    #[inline]
    pub fn span_end(&self) -> &Key {
        match self {
            Node::Range(n) => &n.end,
            node => node.key(),
        }
    }

    /// The node's clock.
    #[inline]
    pub fn clock(&self) -> Clock {
        match self {
            Node::Point(n) => n.clock,
            Node::Range(n) => n.clock,
            Node::Branch(n) => n.clock,
        }
    }

    /// Sets the node's own clock. Children of a branch are not touched.
    #[inline]
    pub fn set_clock(&mut self, clock: Clock) {
        match self {
            Node::Point(n) => n.clock = clock,
            Node::Range(n) => n.clock = clock,
            Node::Branch(n) => n.clock = clock,
        }
    }

    /// Returns true if this node is a point.
    #[inline]
    pub fn is_point(&self) -> bool {
        matches!(self, Node::Point(_))
    }

    /// Returns true if this node is a range.
    #[inline]
    pub fn is_range(&self) -> bool {
        matches!(self, Node::Range(_))
    }

    /// Returns true if this node is a branch.
    #[inline]
    pub fn is_branch(&self) -> bool {
        matches!(self, Node::Branch(_))
    }
}
