// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # event-graph
//!
//! The time-ordered event graph that the partition planner decomposes.
//!
//! - [`Event`] — one trace record: an integer second plus an opaque payload.
//! - [`EventStream`] — the complete input, with a **type-state pattern**
//!   (`Loaded` → `Validated`) guaranteeing it is non-empty and sorted.
//! - [`NodeArena`] — every event wrapped in a [`Node`], stored once and
//!   addressed by [`NodeId`]. Successor sets are index sets, never pointers.
//! - [`NodeSpan`] — a contiguous id range; partitions are described by spans.
//! - [`Graph`] — a slice of the arena with cached vertex/edge counts and its
//!   entry and exit frontiers.
//!
//! # Example
//! ```
//! use event_graph::{EventStream, Graph};
//!
//! let stream = EventStream::from_seconds("demo", &[1, 1, 2, 3]).validate().unwrap();
//! let (arena, graph) = Graph::from_stream(&stream);
//! assert_eq!(arena.len(), 4);
//! assert_eq!(graph.edge_number, 3);
//! ```

mod arena;
mod error;
mod event;
mod graph;
mod node;
pub mod stream;

pub use arena::{NodeArena, SecondBatch};
pub use error::GraphError;
pub use event::{Event, EventTrend};
pub use graph::Graph;
pub use node::{Node, NodeId, NodeSpan};
pub use stream::EventStream;
