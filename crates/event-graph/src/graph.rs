// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! A slice of the event graph with an entry and an exit frontier.
//!
//! [`Graph`] is the shape shared by the whole event graph and by each
//! partition of it. Its counts are cached when the slice is built and are
//! never re-derived from the nodes, so cost queries stay O(1).

use crate::stream::Validated;
use crate::{EventStream, NodeArena, NodeSpan};

/// A contiguous slice of the event graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct Graph {
    /// Nodes in the slice.
    pub nodes: NodeSpan,
    /// Entry frontier: the earliest batch of the slice.
    pub first_nodes: NodeSpan,
    /// Exit frontier: the latest batch of the slice.
    pub last_nodes: NodeSpan,
    /// Edges whose both ends lie in the slice.
    pub edge_number: usize,
    /// Number of single-second batches the slice aggregates.
    pub number_of_min_partitions: usize,
}

impl Graph {
    /// The empty slice.
    pub fn empty() -> Self {
        Self {
            nodes: NodeSpan::empty(),
            first_nodes: NodeSpan::empty(),
            last_nodes: NodeSpan::empty(),
            edge_number: 0,
            number_of_min_partitions: 0,
        }
    }

    /// The whole graph held by an arena.
    pub fn whole(arena: &NodeArena) -> Self {
        let batches = arena.batches();
        match (batches.first(), batches.last()) {
            (Some(first), Some(last)) => Self {
                nodes: arena.all(),
                first_nodes: first.nodes,
                last_nodes: last.nodes,
                edge_number: arena.edge_count(),
                number_of_min_partitions: batches.len(),
            },
            _ => Self::empty(),
        }
    }

    /// Builds the arena for `stream` and returns it with its whole graph.
    pub fn from_stream(stream: &EventStream<Validated>) -> (NodeArena, Self) {
        let arena = NodeArena::build(stream);
        let graph = Self::whole(&arena);
        (arena, graph)
    }

    /// Returns the number of vertices in the slice.
    pub fn vertex_number(&self) -> usize {
        self.nodes.len()
    }
}
