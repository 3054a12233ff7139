// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Minimal-partitions strategy: one partition per distinct second.
//!
//! The lowest memory any partitioning can reach, paid for with the
//! largest number of cut edges. If this plan does not fit, nothing does.

use crate::cost::CostMode;
use crate::strategy::{PartitionStrategy, SearchOutcome};
use crate::{MemoryLimit, Partitioning, PlannerError, SearchStats, WindowSet};
use event_graph::NodeArena;

/// Returns the finest partitioning unconditionally.
#[derive(Debug, Clone, Default)]
pub struct MinimalPartitions;

impl MinimalPartitions {
    pub fn new() -> Self {
        Self
    }
}

impl PartitionStrategy for MinimalPartitions {
    fn name(&self) -> &str {
        "minimal"
    }

    fn plan(
        &self,
        arena: &NodeArena,
        windows: &WindowSet,
        limit: MemoryLimit,
    ) -> Result<SearchOutcome, PlannerError> {
        let finest = Partitioning::minimal(arena)?;
        let mut stats = SearchStats::default();
        stats.record_considered();

        let outcome = SearchOutcome::evaluate(finest, windows, limit, CostMode::Search, stats);
        tracing::debug!(
            "minimal partitioning: {} partitions, cpu {:.2}, mem {:.2}",
            outcome.solution.len(),
            outcome.solution_cpu,
            outcome.solution_mem,
        );
        if !outcome.is_feasible() {
            tracing::warn!("even the finest partitioning exceeds limit {limit}");
        }
        Ok(outcome)
    }
}
