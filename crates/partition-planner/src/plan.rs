// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Partition plan: the reportable output of the planner.
//!
//! A [`SearchOutcome`] holds shared partitions and is meant for further
//! computation. A [`PartitionPlan`] flattens it into serializable rows,
//! one per partition, with the costs evaluated against the window set it
//! was planned for.

use crate::strategy::{Feasibility, SearchOutcome};
use crate::{MemoryLimit, Partition, PlannerError, SearchStats, WindowSet};

/// One partition of a plan.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PartitionRow {
    /// Position of this partition in time order.
    pub index: usize,
    /// First second covered.
    pub start: u32,
    /// Last second covered.
    pub end: u32,
    /// Events in the partition.
    pub vertices: usize,
    /// Edges internal to the partition.
    pub edges: usize,
    /// Amortized CPU cost.
    pub cpu: f64,
    /// Amortized memory cost.
    pub mem: f64,
    /// Windows sharing the partition.
    pub sharing: usize,
}

impl PartitionRow {
    /// Returns the number of seconds spanned, counting both ends.
    pub fn span_seconds(&self) -> u32 {
        self.end - self.start + 1
    }
}

/// The complete plan produced by a [`crate::PartitionStrategy`].
#[derive(Debug, Clone, serde::Serialize)]
pub struct PartitionPlan {
    /// Strategy name that produced this plan.
    pub strategy_name: String,
    /// The memory limit used for planning.
    pub limit: f64,
    /// Partitions in time order.
    pub rows: Vec<PartitionRow>,
    /// CPU cost of the whole partitioning, cut edges included.
    pub total_cpu: f64,
    /// Memory cost of the whole partitioning.
    pub total_mem: f64,
    /// Largest single-partition memory cost.
    pub peak_partition_mem: f64,
    /// Edges crossing partition boundaries.
    pub cut_edges: usize,
    pub feasibility: Feasibility,
    pub stats: SearchStats,
}

impl PartitionPlan {
    /// Flattens a strategy outcome into a plan.
    pub fn from_outcome(
        strategy_name: &str,
        outcome: &SearchOutcome,
        windows: &WindowSet,
        limit: MemoryLimit,
    ) -> Self {
        let mut builder = PlanBuilder::new(strategy_name, limit);
        for partition in outcome.solution.partitions() {
            builder.add_partition(partition, windows);
        }
        builder.build(
            outcome.solution_cpu,
            outcome.solution.peak_partition_mem(windows),
            outcome.solution.cut_edges(),
            outcome.feasibility,
            outcome.stats.clone(),
        )
    }

    /// Returns the number of partitions.
    pub fn num_partitions(&self) -> usize {
        self.rows.len()
    }

    /// Returns the total number of events across all partitions.
    pub fn total_vertices(&self) -> usize {
        self.rows.iter().map(|r| r.vertices).sum()
    }

    /// Validates the plan.
    ///
    /// Checks:
    /// - Plan is non-empty.
    /// - Row indices are consecutive starting from 0.
    /// - Every row spans `start <= end` and starts after the previous row ends.
    /// - A feasible plan's total memory fits the limit.
    pub fn validate(&self) -> Result<(), PlannerError> {
        if self.rows.is_empty() {
            return Err(PlannerError::EmptyGraph);
        }

        let mut previous_end: Option<u32> = None;
        for (expected, row) in self.rows.iter().enumerate() {
            if row.index != expected {
                return Err(self.failure(format!(
                    "expected partition index {expected}, got {}",
                    row.index
                )));
            }
            if row.start > row.end {
                return Err(self.failure(format!(
                    "partition {} starts at {} after its end {}",
                    row.index, row.start, row.end
                )));
            }
            if let Some(end) = previous_end {
                if row.start <= end {
                    return Err(PlannerError::NonContiguous(format!(
                        "partition {} starts at {} but the previous one ends at {end}",
                        row.index, row.start
                    )));
                }
            }
            previous_end = Some(row.end);
        }

        if self.feasibility == Feasibility::Feasible && self.total_mem > self.limit {
            return Err(self.failure(format!(
                "plan needs {:.2} memory but the limit is {:.2}",
                self.total_mem, self.limit
            )));
        }

        Ok(())
    }

    fn failure(&self, detail: String) -> PlannerError {
        PlannerError::StrategyFailed {
            strategy: self.strategy_name.clone(),
            detail,
        }
    }

    /// Returns a human-readable summary of the plan.
    pub fn summary(&self) -> String {
        let sizes: Vec<usize> = self.rows.iter().map(|r| r.vertices).collect();
        let limit = MemoryLimit::new(self.limit)
            .map(|l| l.to_string())
            .unwrap_or_else(|_| format!("{:.2}", self.limit));
        format!(
            "Plan '{}': {} partitions, {} events, cpu {:.2}, mem {:.2}/{} \
             (peak partition {:.2}), {} cut edges, {:?}, partition sizes: {:?}",
            self.strategy_name,
            self.num_partitions(),
            self.total_vertices(),
            self.total_cpu,
            self.total_mem,
            limit,
            self.peak_partition_mem,
            self.cut_edges,
            self.feasibility,
            sizes,
        )
    }
}

/// Builder helper for constructing a `PartitionPlan` incrementally.
pub(crate) struct PlanBuilder {
    strategy_name: String,
    limit: MemoryLimit,
    rows: Vec<PartitionRow>,
    total_mem: f64,
}

impl PlanBuilder {
    pub fn new(strategy_name: &str, limit: MemoryLimit) -> Self {
        Self {
            strategy_name: strategy_name.to_string(),
            limit,
            rows: Vec::new(),
            total_mem: 0.0,
        }
    }

    /// Adds the next partition with its costs under `windows`.
    pub fn add_partition(&mut self, partition: &Partition, windows: &WindowSet) {
        let mem = partition.mem_cost(windows);
        self.total_mem += mem;
        self.rows.push(PartitionRow {
            index: self.rows.len(),
            start: partition.start(),
            end: partition.end(),
            vertices: partition.vertex_number(),
            edges: partition.edge_number(),
            cpu: partition.cpu_cost(windows),
            mem,
            sharing: partition.sharing_window_number(windows),
        });
    }

    /// Consumes the builder and returns the finished plan.
    pub fn build(
        self,
        total_cpu: f64,
        peak_partition_mem: f64,
        cut_edges: usize,
        feasibility: Feasibility,
        stats: SearchStats,
    ) -> PartitionPlan {
        PartitionPlan {
            strategy_name: self.strategy_name,
            limit: self.limit.value(),
            rows: self.rows,
            total_cpu,
            total_mem: self.total_mem,
            peak_partition_mem,
            cut_edges,
            feasibility,
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::CostMode;
    use crate::{Partitioning, Window};
    use event_graph::{EventStream, NodeArena};

    fn arena(seconds: &[u32]) -> NodeArena {
        NodeArena::build(&EventStream::from_seconds("t", seconds).validate().unwrap())
    }

    fn minimal_plan() -> PartitionPlan {
        let a = arena(&[1, 1, 2, 3]);
        let windows = WindowSet::empty();
        let limit = MemoryLimit::new(10.0).unwrap();
        let outcome = SearchOutcome::evaluate(
            Partitioning::minimal(&a).unwrap(),
            &windows,
            limit,
            CostMode::Search,
            SearchStats::default(),
        );
        PartitionPlan::from_outcome("test", &outcome, &windows, limit)
    }

    fn row(index: usize, start: u32, end: u32) -> PartitionRow {
        PartitionRow {
            index,
            start,
            end,
            vertices: 1,
            edges: 0,
            cpu: 1.0,
            mem: 1.0,
            sharing: 0,
        }
    }

    #[test]
    fn test_from_outcome() {
        let plan = minimal_plan();
        assert_eq!(plan.num_partitions(), 3);
        assert_eq!(plan.total_vertices(), 4);
        assert_eq!(plan.total_cpu, 12.0);
        assert_eq!(plan.total_mem, 4.0);
        assert_eq!(plan.peak_partition_mem, 2.0);
        assert_eq!(plan.cut_edges, 3);
        assert_eq!(plan.rows[0].vertices, 2);
        assert_eq!(plan.rows[2].start, 3);
        plan.validate().unwrap();
    }

    #[test]
    fn test_peak_matches_largest_row() {
        let a = arena(&[1, 1, 1, 2, 3, 3]);
        let windows = WindowSet::empty();
        let limit = MemoryLimit::unbounded();
        let solution = Partitioning::minimal(&a).unwrap();
        let peak = solution.peak_partition_mem(&windows);
        let outcome = SearchOutcome::evaluate(
            solution,
            &windows,
            limit,
            CostMode::Search,
            SearchStats::default(),
        );
        let plan = PartitionPlan::from_outcome("test", &outcome, &windows, limit);
        let largest_row = plan.rows.iter().map(|r| r.mem).fold(0.0, f64::max);
        assert_eq!(plan.peak_partition_mem, peak);
        assert_eq!(plan.peak_partition_mem, largest_row);
        // 3 events in second 1: 3 * 3^1
        assert_eq!(plan.peak_partition_mem, 9.0);
    }

    #[test]
    fn test_validate_empty() {
        let mut plan = minimal_plan();
        plan.rows.clear();
        assert!(matches!(plan.validate(), Err(PlannerError::EmptyGraph)));
    }

    #[test]
    fn test_validate_bad_index() {
        let mut plan = minimal_plan();
        plan.rows = vec![row(0, 1, 1), row(5, 2, 2)];
        assert!(plan.validate().is_err());
    }

    #[test]
    fn test_validate_overlap() {
        let mut plan = minimal_plan();
        plan.rows = vec![row(0, 1, 2), row(1, 2, 3)];
        assert!(matches!(
            plan.validate(),
            Err(PlannerError::NonContiguous(_))
        ));
    }

    #[test]
    fn test_validate_over_limit() {
        let mut plan = minimal_plan();
        plan.total_mem = 50.0;
        assert!(plan.validate().is_err());
        plan.feasibility = Feasibility::BestEffort;
        plan.validate().unwrap();
    }

    #[test]
    fn test_sharing_in_rows() {
        let a = arena(&[1, 2]);
        let windows = WindowSet::new(vec![Window::interval(1, 2), Window::interval(1, 1)]);
        let limit = MemoryLimit::unbounded();
        let outcome = SearchOutcome::evaluate(
            Partitioning::minimal(&a).unwrap(),
            &windows,
            limit,
            CostMode::Search,
            SearchStats::default(),
        );
        let plan = PartitionPlan::from_outcome("shared", &outcome, &windows, limit);
        assert_eq!(plan.rows[0].sharing, 2);
        assert_eq!(plan.rows[1].sharing, 1);
        assert_eq!(plan.rows[0].mem, 0.5);
    }

    #[test]
    fn test_summary() {
        let s = minimal_plan().summary();
        assert!(s.contains("test"));
        assert!(s.contains("3 partitions"));
        assert!(s.contains("4 events"));
    }

    #[test]
    fn test_span_seconds() {
        assert_eq!(row(0, 3, 7).span_seconds(), 5);
    }
}
