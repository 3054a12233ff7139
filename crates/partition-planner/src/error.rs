// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for the partition planner.

use crate::PartitionId;

/// Errors that can occur during partition planning.
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    /// Not even one event per partition fits the memory limit.
    #[error("no feasible partitioning: {vertex_number} events cannot fit a memory limit of {limit}")]
    InfeasibleBudget { vertex_number: usize, limit: f64 },

    /// The graph to partition has no events.
    #[error("cannot partition an empty event graph")]
    EmptyGraph,

    /// Merge was called on partitions that are not adjacent in time.
    #[error("cannot merge non-adjacent partitions {left} and {right}")]
    NonAdjacentMerge { left: PartitionId, right: PartitionId },

    /// Split was called on a partition without an entry frontier.
    #[error("cannot split partition {0}: empty entry frontier")]
    EmptyFrontier(PartitionId),

    /// A partition sequence has gaps or overlaps.
    #[error("partitions are not contiguous: {0}")]
    NonContiguous(String),

    /// A memory limit string or value was rejected.
    #[error("invalid memory limit: {0}")]
    InvalidLimit(String),

    /// Window parameters were rejected.
    #[error("invalid window configuration: {0}")]
    InvalidWindow(String),

    /// The chosen strategy cannot satisfy the given constraints.
    #[error("strategy '{strategy}' failed: {detail}")]
    StrategyFailed { strategy: String, detail: String },

    /// The underlying event graph reported an error.
    #[error("event graph error: {0}")]
    Graph(#[from] event_graph::GraphError),
}
