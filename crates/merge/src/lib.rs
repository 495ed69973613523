//! Mirra Merge - Reconciliation engine for Mirra live views.
//!
//! This crate keeps a subscription's materialized graph consistent as
//! incremental, possibly out-of-order, possibly partial updates arrive:
//!
//! - `merge`: folds a change graph into the current graph in place under
//!   last-writer-wins semantics and returns the minimal diff for
//!   downstream observers
//! - `stamp_clock`: assigns one clock to every node of a freshly fetched
//!   subgraph before it is merged as a change graph
//! - `LiveView`: per-subscription owner tying the two together
//!
//! # Example
//!
//! ```rust
//! use mirra_core::{GraphBuilder, Key, Node};
//! use mirra_merge::LiveView;
//!
//! // The subscription tracks [a, z]: everything in the span is known,
//! // and known to be absent unless separately listed.
//! let snapshot = GraphBuilder::new(0).empty_range("a", "z").build().unwrap();
//! let mut view = LiveView::from_snapshot(snapshot);
//!
//! // A fresh update arrives: one value inside the tracked span.
//! let update = GraphBuilder::new(0).value("m", 7i64).build().unwrap();
//! let diff = view.ingest(update, 1);
//!
//! // The view now holds the value, the span is split around it, and the
//! // diff carries exactly the observable change.
//! assert_eq!(diff.len(), 1);
//! assert_eq!(view.current().len(), 3);
//! assert!(matches!(view.current().lookup(&Key::from("m")), Some(Node::Point(_))));
//! ```

#![no_std]

extern crate alloc;

mod engine;
mod stamp;
mod view;

pub use engine::merge;
pub use stamp::stamp_clock;
pub use view::LiveView;

// Re-export commonly used types from the core crate.
pub use mirra_core::{Clock, Graph, Key, Node};
