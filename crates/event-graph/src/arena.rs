// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The node arena: every event of a run, stored once and addressed by id.
//!
//! Partitions never hold nodes directly; they hold [`NodeSpan`]s into the
//! arena. The arena is built once from a validated stream and is read-only
//! afterwards, so it can be shared behind an `Arc` by every partitioning
//! the planner explores.
//!
//! # Edges
//!
//! Every node is connected to every node of the next distinct second:
//!
//! ```text
//! second 1: n0 n1 ──┬──► second 2: n2 ──► second 3: n3
//!                   └─(n0→n2, n1→n2)
//! ```
//!
//! so the number of edges between two adjacent batches is the product of
//! their sizes.

use crate::stream::Validated;
use crate::{EventStream, EventTrend, GraphError, Node, NodeId, NodeSpan};

/// The nodes sharing one second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct SecondBatch {
    pub second: u32,
    pub nodes: NodeSpan,
}

/// Read-only store of all nodes of a run.
#[derive(Debug, Clone, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
    batches: Vec<SecondBatch>,
    edge_count: usize,
}

impl NodeArena {
    /// Builds the arena and its edges from a validated stream.
    ///
    /// Validation caps a stream at `NodeId::MAX` events, so every node id
    /// and span end fits a `NodeId`.
    pub fn build(stream: &EventStream<Validated>) -> Self {
        let mut nodes: Vec<Node> = Vec::with_capacity(stream.len());
        let mut batches = Vec::new();

        for (second, events) in stream.batches() {
            let start = id_at(nodes.len());
            nodes.extend(events.iter().cloned().map(Node::new));
            batches.push(SecondBatch {
                second,
                nodes: NodeSpan::new(start, id_at(nodes.len())),
            });
        }

        let mut edge_count = 0;
        for pair in batches.windows(2) {
            let (current, next) = (pair[0].nodes, pair[1].nodes);
            for id in current.iter() {
                for succ in next.iter() {
                    nodes[id as usize].connect(succ);
                }
            }
            edge_count += current.len() * next.len();
        }

        tracing::debug!(
            "arena built: {} nodes, {} batches, {} edges",
            nodes.len(),
            batches.len(),
            edge_count,
        );

        Self {
            nodes,
            batches,
            edge_count,
        }
    }

    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Span covering every node.
    pub fn all(&self) -> NodeSpan {
        NodeSpan::new(0, id_at(self.nodes.len()))
    }

    /// Returns the total number of edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns the per-second batches in time order.
    pub fn batches(&self) -> &[SecondBatch] {
        &self.batches
    }

    /// Returns a node by id.
    pub fn node(&self, id: NodeId) -> Result<&Node, GraphError> {
        self.nodes.get(id as usize).ok_or(GraphError::UnknownNode(id))
    }

    /// Returns the second of a node.
    pub fn second_of(&self, id: NodeId) -> Result<u32, GraphError> {
        self.node(id).map(Node::second)
    }

    /// Returns the union of the successors of every node in `span`.
    ///
    /// The result is itself a span because successors are always one
    /// whole batch.
    pub fn successors(&self, span: NodeSpan) -> Result<NodeSpan, GraphError> {
        let mut ids: Vec<NodeId> = Vec::new();
        for id in span.iter() {
            ids.extend(self.node(id)?.following().iter().copied());
        }
        ids.sort_unstable();
        ids.dedup();
        NodeSpan::from_sorted(&ids).ok_or(GraphError::ScatteredSuccessors {
            from: span.start,
            to: span.end,
        })
    }

    /// Records a trend ending at `id`.
    pub fn record_trend(&mut self, id: NodeId, trend: EventTrend) -> Result<(), GraphError> {
        let node = self
            .nodes
            .get_mut(id as usize)
            .ok_or(GraphError::UnknownNode(id))?;
        node.push_result(trend);
        Ok(())
    }

    /// Sum of trend sizes stored at the nodes of `span`.
    pub fn trend_length(&self, span: NodeSpan) -> Result<usize, GraphError> {
        let mut total = 0;
        for id in span.iter() {
            total += self.node(id)?.results().iter().map(EventTrend::count).sum::<usize>();
        }
        Ok(total)
    }

    /// Returns a summary string describing the arena.
    pub fn summary(&self) -> String {
        format!(
            "Arena: {} nodes in {} batches, {} edges",
            self.len(),
            self.batches.len(),
            self.edge_count,
        )
    }
}

/// Id of the node at `index`; saturates instead of wrapping.
fn id_at(index: usize) -> NodeId {
    NodeId::try_from(index).unwrap_or(NodeId::MAX)
}
