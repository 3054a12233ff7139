// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Unpartitioned strategy: the whole graph as one partition.
//!
//! No edge is cut, but the CPU term grows as `3^(n/3)` with the event
//! count, and memory is the highest of any partitioning. Useful as a
//! baseline and as the search's fallback.

use crate::cost::CostMode;
use crate::strategy::{PartitionStrategy, SearchOutcome};
use crate::{MemoryLimit, Partitioning, PlannerError, SearchStats, WindowSet};
use event_graph::NodeArena;

/// Returns the single-partition root unconditionally.
#[derive(Debug, Clone, Default)]
pub struct Unpartitioned;

impl Unpartitioned {
    pub fn new() -> Self {
        Self
    }
}

impl PartitionStrategy for Unpartitioned {
    fn name(&self) -> &str {
        "unpartitioned"
    }

    fn plan(
        &self,
        arena: &NodeArena,
        windows: &WindowSet,
        limit: MemoryLimit,
    ) -> Result<SearchOutcome, PlannerError> {
        let root = Partitioning::unpartitioned(arena)?;
        let mut stats = SearchStats::default();
        stats.record_considered();

        let outcome = SearchOutcome::evaluate(root, windows, limit, CostMode::Root, stats);
        if !outcome.is_feasible() {
            tracing::warn!(
                "unpartitioned graph needs {:.2} memory, limit is {}",
                outcome.solution_mem,
                limit,
            );
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Feasibility;
    use event_graph::EventStream;

    fn arena(seconds: &[u32]) -> NodeArena {
        NodeArena::build(&EventStream::from_seconds("t", seconds).validate().unwrap())
    }

    #[test]
    fn test_single_partition() {
        let a = arena(&[1, 1, 2, 3]);
        let out = Unpartitioned::new()
            .plan(&a, &WindowSet::empty(), MemoryLimit::unbounded())
            .unwrap();
        assert_eq!(out.solution.len(), 1);
        assert_eq!(out.solution_cpu, 6.0);
        assert_eq!(out.solution_mem, 12.0);
        assert_eq!(out.feasibility, Feasibility::Feasible);
    }

    #[test]
    fn test_best_effort_when_over_limit() {
        let a = arena(&[1, 1, 2, 3]);
        let out = Unpartitioned::new()
            .plan(&a, &WindowSet::empty(), MemoryLimit::new(5.0).unwrap())
            .unwrap();
        assert_eq!(out.feasibility, Feasibility::BestEffort);
    }

    #[test]
    fn test_empty_arena() {
        let result = Unpartitioned::new().plan(
            &NodeArena::default(),
            &WindowSet::empty(),
            MemoryLimit::unbounded(),
        );
        assert!(matches!(result, Err(PlannerError::EmptyGraph)));
    }
}
