//! Mirra Core - Graph types and key ordering for the Mirra live view engine.
//!
//! This crate provides the data model shared by every Mirra component:
//!
//! - `Key`: opaque byte-ordered keys with exact adjacency (`successor`,
//!   `predecessor`) and an end-of-namespace sentinel
//! - `Clock`: logical version marker for last-writer-wins resolution
//! - `Node`: the three claim granularities (Point, Range, Branch)
//! - `Graph`: a sorted, non-overlapping, recursively nested node sequence
//! - `search`: binary-search positioning over node slices
//! - `GraphBuilder`: entry-by-entry graph assembly with validation
//!
//! # Example
//!
//! ```rust
//! use mirra_core::{GraphBuilder, Key, Node, Value};
//!
//! // A materialized view claiming one value and one known-empty span.
//! let graph = GraphBuilder::new(0)
//!     .value("name", "Alice")
//!     .empty_range("posts", Key::namespace_end())
//!     .build()
//!     .unwrap();
//!
//! let Some(Node::Point(point)) = graph.lookup(&Key::from("name")) else {
//!     panic!("expected a point");
//! };
//! assert_eq!(point.payload.as_value().and_then(Value::as_str), Some("Alice"));
//!
//! // Keys inside the empty span are covered (known absent), keys outside
//! // the two spans are unknown.
//! assert!(graph.covers(&Key::from("x")));
//! assert!(!graph.covers(&Key::from("a")));
//! ```

#![no_std]

extern crate alloc;

mod builder;
mod error;
mod graph;
mod key;
mod node;
pub mod search;
mod value;

pub use builder::GraphBuilder;
pub use error::{Error, Result};
pub use graph::Graph;
pub use key::Key;
pub use node::{BranchNode, Clock, Node, PointNode, RangeNode};
pub use value::{Path, Payload, Value};
