//! Uniform clock assignment for freshly received subgraphs.
//!
//! A subgraph fetched from the authoritative source is one atomic unit of
//! knowledge at one version: every node it contains, at every depth, gets
//! the same clock before the subgraph is handed to the merge engine as a
//! change graph.

use mirra_core::{Clock, Graph, Node};

/// Recursively sets every node's clock, including nested branch children,
/// in place. Stamping twice with the same clock is a no-op beyond the
/// first application.
pub fn stamp_clock(graph: &mut Graph, clock: Clock) {
    for node in graph.iter_mut() {
        node.set_clock(clock);
        if let Node::Branch(branch) = node {
            stamp_clock(&mut branch.children, clock);
        }
    }
}
