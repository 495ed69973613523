//! Per-subscription owner of a materialized graph.
//!
//! Each live subscription owns exactly one current graph and applies one
//! update at a time; `LiveView` packages that discipline. Transport,
//! delivery, and subscriber callbacks stay outside this crate — callers
//! forward the returned diff graphs themselves.

use crate::engine::merge;
use crate::stamp::stamp_clock;
use mirra_core::{Clock, Graph, Node};

/// The locally materialized, fully reconciled view of tracked data for one
/// subscription, with the highest clock ingested so far.
#[derive(Clone, Debug, Default)]
pub struct LiveView {
    current: Graph,
    version: Clock,
}

impl LiveView {
    /// Creates a view tracking nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a view from an existing snapshot. The version starts at the
    /// highest clock present in the snapshot.
    pub fn from_snapshot(current: Graph) -> Self {
        let version = max_clock(&current);
        Self { current, version }
    }

    /// The materialized graph.
    #[inline]
    pub fn current(&self) -> &Graph {
        &self.current
    }

    /// The highest clock ingested so far.
    #[inline]
    pub fn version(&self) -> Clock {
        self.version
    }

    /// Stamps a freshly fetched subgraph uniformly at `clock`, merges it,
    /// and returns the diff to forward downstream.
    pub fn ingest(&mut self, mut subgraph: Graph, clock: Clock) -> Graph {
        stamp_clock(&mut subgraph, clock);
        self.version = self.version.max(clock);
        merge(&mut self.current, subgraph)
    }

    /// Merges an already-stamped change graph and returns the diff.
    pub fn apply(&mut self, changes: Graph) -> Graph {
        self.version = self.version.max(max_clock(&changes));
        merge(&mut self.current, changes)
    }
}

fn max_clock(graph: &Graph) -> Clock {
    let mut max = 0;
    for node in graph.iter() {
        max = max.max(node.clock());
        if let Node::Branch(branch) = node {
            max = max.max(max_clock(&branch.children));
        }
    }
    max
}
