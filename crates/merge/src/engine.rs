//! The reconciliation engine.
//!
//! `merge` folds an incoming change graph into the current graph in place
//! under last-writer-wins semantics keyed by logical clock, and returns the
//! diff graph: only the nodes representing an observable change, ready to
//! forward to downstream observers.
//!
//! Conflicts at equal clocks are resolved by one global rule: the incoming
//! change wins. The change side survives an existing clock with `>=`; an
//! existing node survives a change clock only with `>`.
//!
//! Changes landing entirely outside tracked coverage are discarded: the
//! view never expands its tracked window from a bare update alone. A range
//! change that does overlap tracked coverage is recorded in the diff
//! verbatim, even when conflict resolution leaves the net effect identical.

use alloc::vec;
use alloc::vec::Vec;
use mirra_core::search;
use mirra_core::{BranchNode, Clock, Graph, Node, RangeNode};

/// Merges `changes` into `current` in place and returns the diff graph.
///
/// Both graphs must satisfy the sortedness/non-overlap invariant; the
/// engine preserves it. Changes are processed in key order, each positioned
/// by binary search starting from where the previous change's processing
/// ended.
pub fn merge(current: &mut Graph, changes: Graph) -> Graph {
    let mut diff = Graph::new();
    let mut index = 0;
    for change in changes {
        index = match change {
            Node::Range(range) => apply_range(current.nodes_mut(), range, &mut diff, index),
            node => apply_node(current.nodes_mut(), node, &mut diff, index),
        };
    }
    diff
}

/// Applies a range change: resolves it against every overlapped node and
/// splices the result back in one operation.
fn apply_range(nodes: &mut Vec<Node>, change: RangeNode, diff: &mut Graph, start: usize) -> usize {
    debug_assert!(change.key <= change.end, "range change with end before key");
    let key_ix = search::first_overlapping(nodes, &change.key, start);
    let end_ix = search::last_overlapping(nodes, &change.end, key_ix);

    if key_ix == end_ix {
        // The range overlaps nothing the view tracks; ignore it.
        return key_ix;
    }

    diff.push(Node::Range(change.clone()));

    // Fold each overlapped node into the replacement list so anything newer
    // than the incoming range survives inside it.
    let mut insertions: Vec<Node> = vec![Node::Range(change)];
    let overlapped: Vec<Node> = nodes.drain(key_ix..end_ix).collect();
    for node in overlapped {
        match node {
            Node::Range(existing) => {
                let base = match insertions.pop() {
                    Some(Node::Range(base)) => base,
                    _ => unreachable!("trailing insertion is a range while overlapped ranges remain"),
                };
                insertions.extend(merge_ranges(base, existing));
            }
            node => fold_in_node(&mut insertions, node),
        }
    }

    let inserted = insertions.len();
    nodes.splice(key_ix..key_ix, insertions);
    key_ix + inserted
}

/// Resolves two overlapping range claims. `base` is the incoming side and
/// wins equal clocks; the loser keeps any uncontested margin on either side
/// at its own clock.
fn merge_ranges(base: RangeNode, node: RangeNode) -> Vec<Node> {
    let (winner, loser) = if node.clock > base.clock {
        (node, base)
    } else {
        (base, node)
    };

    let mut out = Vec::with_capacity(3);
    if loser.key < winner.key {
        out.push(Node::Range(RangeNode {
            key: loser.key.clone(),
            end: winner.key.predecessor(),
            clock: loser.clock,
        }));
    }
    let winner_end = winner.end.clone();
    out.push(Node::Range(winner));
    if loser.end > winner_end {
        out.push(Node::Range(RangeNode {
            key: winner_end.successor(),
            end: loser.end,
            clock: loser.clock,
        }));
    }
    out
}

/// Folds an existing point or branch back into the in-progress replacement
/// list: it survives, splitting the trailing fragment around its key, only
/// where strictly newer than the fragment's clock.
fn fold_in_node(insertions: &mut Vec<Node>, node: Node) {
    let start = insertions.len() - 1;
    let index = search::first_overlapping(insertions, node.key(), start);
    let frag = match insertions.get(index) {
        Some(Node::Range(frag)) => frag.clone(),
        _ => unreachable!("existing nodes land in the trailing fragment"),
    };

    let Some(kept) = keep_if_strictly_newer(node, frag.clock) else {
        return;
    };

    let key = kept.key().clone();
    let mut replacement = Vec::with_capacity(3);
    if frag.key < key {
        replacement.push(Node::Range(RangeNode {
            key: frag.key.clone(),
            end: key.predecessor(),
            clock: frag.clock,
        }));
    }
    replacement.push(kept);
    if frag.end > key {
        replacement.push(Node::Range(RangeNode {
            key: key.successor(),
            end: frag.end.clone(),
            clock: frag.clock,
        }));
    }
    insertions.splice(index..index + 1, replacement);
}

/// Applies a point or branch change to the node covering its key.
fn apply_node(nodes: &mut Vec<Node>, change: Node, diff: &mut Graph, start: usize) -> usize {
    let index = search::first_overlapping(nodes, change.key(), start);
    match nodes.get(index) {
        Some(node) if node.key() <= change.key() => {
            if node.is_range() {
                split_range_at(nodes, index, change, diff)
            } else {
                update_node(nodes, index, change, diff)
            }
        }
        // The change does not overlap any existing knowledge; skip it.
        _ => index,
    }
}

/// Installs a change inside a covering range, splitting the range around
/// the change's key. An older change is discarded whole.
fn split_range_at(nodes: &mut Vec<Node>, index: usize, change: Node, diff: &mut Graph) -> usize {
    let range = match &nodes[index] {
        Node::Range(range) => range.clone(),
        _ => unreachable!("split_range_at requires a range at index"),
    };

    let Some(winner) = keep_if_newer(change, range.clock) else {
        return index;
    };
    diff.push(winner.clone());

    let key = winner.key().clone();
    let mut insertions = Vec::with_capacity(3);
    if range.key < key {
        insertions.push(Node::Range(RangeNode {
            key: range.key.clone(),
            end: key.predecessor(),
            clock: range.clock,
        }));
    }
    insertions.push(winner);
    let has_tail = range.end > key;
    if has_tail {
        insertions.push(Node::Range(RangeNode {
            key: key.successor(),
            end: range.end.clone(),
            clock: range.clock,
        }));
    }

    let inserted = insertions.len();
    nodes.splice(index..index + 1, insertions);
    // A later change may still land inside the tail fragment.
    if has_tail {
        index + inserted - 1
    } else {
        index + inserted
    }
}

/// Reconciles a change with the existing node holding exactly its key.
fn update_node(nodes: &mut Vec<Node>, index: usize, change: Node, diff: &mut Graph) -> usize {
    let existing_is_branch = nodes[index].is_branch();
    match change {
        // Both are branches: merge the change's children recursively.
        Node::Branch(change) if existing_is_branch => {
            let Node::Branch(existing) = &mut nodes[index] else {
                unreachable!()
            };
            let BranchNode { key, clock, children } = change;
            let nested = merge(&mut existing.children, children);
            if !nested.is_empty() {
                diff.push(Node::Branch(BranchNode {
                    key,
                    clock,
                    children: nested,
                }));
            }
        }
        // Existing branch vs. leaf change: the branch survives where its
        // descendants are strictly newer, shadowing the change; otherwise
        // the change takes its place. Partial shadowing keeps the filtered
        // branch and emits no diff for the discarded siblings.
        change if existing_is_branch => {
            match keep_if_strictly_newer(nodes[index].clone(), change.clock()) {
                Some(filtered) => nodes[index] = filtered,
                None => {
                    diff.push(change.clone());
                    nodes[index] = change;
                }
            }
        }
        // The existing node is a leaf: replace it when the change is newer.
        change => {
            if let Some(winner) = keep_if_newer(change, nodes[index].clock()) {
                diff.push(winner.clone());
                nodes[index] = winner;
            }
        }
    }
    index + 1
}

/// Newness predicate for the incoming side: a node survives an existing
/// clock with `>=`, so changes win equal-clock conflicts. A branch keeps
/// exactly the children that survive and survives only when at least one
/// does.
fn keep_if_newer(node: Node, clock: Clock) -> Option<Node> {
    match node {
        Node::Branch(mut branch) => {
            let children = core::mem::take(branch.children.nodes_mut());
            *branch.children.nodes_mut() = children
                .into_iter()
                .filter_map(|child| keep_if_newer(child, clock))
                .collect();
            (!branch.children.is_empty()).then_some(Node::Branch(branch))
        }
        node => (node.clock() >= clock).then_some(node),
    }
}

/// Newness predicate for the existing side: a node survives a change clock
/// only with `>`, so changes win equal-clock conflicts.
fn keep_if_strictly_newer(node: Node, clock: Clock) -> Option<Node> {
    match node {
        Node::Branch(mut branch) => {
            let children = core::mem::take(branch.children.nodes_mut());
            *branch.children.nodes_mut() = children
                .into_iter()
                .filter_map(|child| keep_if_strictly_newer(child, clock))
                .collect();
            (!branch.children.is_empty()).then_some(Node::Branch(branch))
        }
        node => (node.clock() > clock).then_some(node),
    }
}
