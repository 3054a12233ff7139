// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Branch-and-bound search for the CPU-cheapest partitioning that fits
//! the memory limit.
//!
//! # How It Works
//!
//! ```text
//! solution = unpartitioned graph, bound = its CPU cost
//! frontier = [one partition per second]
//! while frontier is not empty:
//!     state = pop
//!     if mem(state) <= limit and cpu(state) < bound: adopt state
//!     for child in state.children_by_merging():
//!         drop child if mem(child) > limit or cpu(child) > bound
//!         otherwise enqueue child unless an equal state is waiting
//! ```
//!
//! The search walks the merge lattice bottom-up: every child has exactly
//! one partition fewer than its parent, so it terminates once the
//! single-partition state is reached along every surviving path. Merging
//! never lowers memory cost, which is what makes the memory rule a safe
//! prune.
//!
//! # Options
//! - [`FrontierOrder`]: FIFO (default) or best-first by CPU cost.
//! - [`BoundSeeding`]: whether an over-limit root may seed the bound.

use crate::cost::CostMode;
use crate::strategy::{PartitionStrategy, SearchOutcome};
use crate::{MemoryLimit, PartitionId, Partitioning, PlannerError, SearchStats, WindowSet};
use event_graph::NodeArena;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet, VecDeque};

/// Order in which waiting states are explored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FrontierOrder {
    /// First in, first out.
    #[default]
    Fifo,
    /// Cheapest CPU cost first; ties in insertion order.
    LowestCpu,
}

/// How the initial CPU bound is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BoundSeeding {
    /// Always start from the root's CPU cost.
    Root,
    /// Start from the root's CPU cost only if the root fits the limit,
    /// otherwise from +∞. The root stays the fallback either way.
    #[default]
    FeasibleRoot,
}

/// The branch-and-bound optimizer.
#[derive(Debug, Clone, Default)]
pub struct BranchAndBound {
    frontier_order: FrontierOrder,
    bound_seeding: BoundSeeding,
}

impl BranchAndBound {
    pub fn new(frontier_order: FrontierOrder, bound_seeding: BoundSeeding) -> Self {
        Self {
            frontier_order,
            bound_seeding,
        }
    }

    pub fn frontier_order(&self) -> FrontierOrder {
        self.frontier_order
    }

    pub fn bound_seeding(&self) -> BoundSeeding {
        self.bound_seeding
    }
}

impl PartitionStrategy for BranchAndBound {
    fn name(&self) -> &str {
        "branch-and-bound"
    }

    fn plan(
        &self,
        arena: &NodeArena,
        windows: &WindowSet,
        limit: MemoryLimit,
    ) -> Result<SearchOutcome, PlannerError> {
        let root = Partitioning::unpartitioned(arena)?;
        let root_cpu = root.cpu_cost(windows, CostMode::Root);
        let root_mem = root.mem_cost(windows);

        let mut bound = match self.bound_seeding {
            BoundSeeding::Root => root_cpu,
            BoundSeeding::FeasibleRoot if limit.admits(root_mem) => root_cpu,
            BoundSeeding::FeasibleRoot => f64::INFINITY,
        };
        let mut solution = root;
        let mut solution_mode = CostMode::Root;
        let mut stats = SearchStats::default();

        tracing::info!(
            "branch-and-bound: {} events, limit {}, root cpu {:.2} mem {:.2}, order {:?}",
            arena.len(),
            limit,
            root_cpu,
            root_mem,
            self.frontier_order,
        );

        let mut frontier = Frontier::new(self.frontier_order);
        let finest = Partitioning::minimal(arena)?;
        let finest_cpu = finest.cpu_cost(windows, CostMode::Search);
        frontier.push(finest, finest_cpu);
        stats.record_enqueued();
        stats.update_peak_frontier(frontier.len());

        while let Some(state) = frontier.pop() {
            stats.record_considered();
            let cpu = state.cpu_cost(windows, CostMode::Search);
            let mem = state.mem_cost(windows);

            if limit.admits(mem) && cpu < bound {
                tracing::debug!("new best: cpu {cpu:.2}, mem {mem:.2}, {state}");
                bound = cpu;
                solution = state.clone();
                solution_mode = CostMode::Search;
                stats.record_improvement();
            }

            for child in state.children_by_merging()? {
                let child_cpu = child.cpu_cost(windows, CostMode::Search);
                let child_mem = child.mem_cost(windows);

                let over_memory = !limit.admits(child_mem);
                let over_cpu = child_cpu > bound;
                if over_memory {
                    stats.record_memory_prune();
                }
                if over_cpu {
                    stats.record_cpu_prune();
                }
                if over_memory || over_cpu {
                    continue;
                }

                if frontier.push(child, child_cpu) {
                    stats.record_enqueued();
                    stats.update_peak_frontier(frontier.len());
                } else {
                    stats.record_duplicate();
                }
            }
        }

        let outcome = SearchOutcome::evaluate(solution, windows, limit, solution_mode, stats);
        tracing::info!(
            "branch-and-bound done: {} partitions, cpu {:.2}, mem {:.2}; {}",
            outcome.solution.len(),
            outcome.solution_cpu,
            outcome.solution_mem,
            outcome.stats.summary(),
        );
        if !outcome.is_feasible() {
            tracing::warn!(
                "no partitioning fits limit {limit}; returning the unpartitioned graph"
            );
        }
        Ok(outcome)
    }
}

// ── Frontier ───────────────────────────────────────────────────────

/// Waiting states plus the keys of everything currently queued.
struct Frontier {
    queue: Queue,
    queued: HashSet<Vec<PartitionId>>,
    sequence: u64,
}

enum Queue {
    Fifo(VecDeque<Partitioning>),
    LowestCpu(BinaryHeap<Ranked>),
}

impl Frontier {
    fn new(order: FrontierOrder) -> Self {
        let queue = match order {
            FrontierOrder::Fifo => Queue::Fifo(VecDeque::new()),
            FrontierOrder::LowestCpu => Queue::LowestCpu(BinaryHeap::new()),
        };
        Self {
            queue,
            queued: HashSet::new(),
            sequence: 0,
        }
    }

    /// Enqueues `state` unless an equal state is already waiting.
    fn push(&mut self, state: Partitioning, cpu: f64) -> bool {
        if !self.queued.insert(state.frontier_key()) {
            return false;
        }
        match &mut self.queue {
            Queue::Fifo(queue) => queue.push_back(state),
            Queue::LowestCpu(heap) => {
                heap.push(Ranked {
                    cpu,
                    sequence: self.sequence,
                    state,
                });
            }
        }
        self.sequence += 1;
        true
    }

    fn pop(&mut self) -> Option<Partitioning> {
        let state = match &mut self.queue {
            Queue::Fifo(queue) => queue.pop_front(),
            Queue::LowestCpu(heap) => heap.pop().map(|ranked| ranked.state),
        }?;
        self.queued.remove(&state.frontier_key());
        Some(state)
    }

    fn len(&self) -> usize {
        self.queued.len()
    }
}

/// Heap entry; the max-heap pops the lowest CPU cost, then the oldest.
struct Ranked {
    cpu: f64,
    sequence: u64,
    state: Partitioning,
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cpu
            .total_cmp(&self.cpu)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked {}
