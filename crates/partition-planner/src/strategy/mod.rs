// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The [`PartitionStrategy`] trait and strategy implementations.

pub mod branch_and_bound;
pub mod minimal;
pub mod unpartitioned;

use crate::cost::CostMode;
use crate::{MemoryLimit, Partitioning, PlannerError, SearchStats, WindowSet};
use event_graph::NodeArena;

/// Trait for partition strategies.
///
/// Each strategy takes the node arena of a validated stream, the window
/// set and a memory limit, and produces a [`SearchOutcome`].
///
/// Strategies are purely algorithmic: no I/O, no shared mutable state.
pub trait PartitionStrategy: Send + Sync {
    /// Human-readable name of this strategy.
    fn name(&self) -> &str;

    /// Chooses a partitioning of `arena`.
    fn plan(
        &self,
        arena: &NodeArena,
        windows: &WindowSet,
        limit: MemoryLimit,
    ) -> Result<SearchOutcome, PlannerError>;
}

/// Whether the chosen partitioning fits the memory limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Feasibility {
    /// The solution's memory cost is within the limit.
    Feasible,
    /// No partitioning fitting the limit was found; the solution is the
    /// fallback and exceeds the limit.
    BestEffort,
}

/// What a strategy returns: the partitioning, its costs and the counters
/// of the run that produced it.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub solution: Partitioning,
    pub solution_cpu: f64,
    pub solution_mem: f64,
    pub feasibility: Feasibility,
    pub stats: SearchStats,
}

impl SearchOutcome {
    /// Costs `solution` under `mode` and classifies it against `limit`.
    pub(crate) fn evaluate(
        solution: Partitioning,
        windows: &WindowSet,
        limit: MemoryLimit,
        mode: CostMode,
        stats: SearchStats,
    ) -> Self {
        let solution_cpu = solution.cpu_cost(windows, mode);
        let solution_mem = solution.mem_cost(windows);
        let feasibility = if limit.admits(solution_mem) {
            Feasibility::Feasible
        } else {
            Feasibility::BestEffort
        };
        Self {
            solution,
            solution_cpu,
            solution_mem,
            feasibility,
            stats,
        }
    }

    /// Returns `true` if the solution fits the limit.
    pub fn is_feasible(&self) -> bool {
        self.feasibility == Feasibility::Feasible
    }
}
