// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Partitions: contiguous time slices of the event graph.
//!
//! A [`Partition`] is a [`Graph`] slice bounded by a start and end second.
//! Its vertex and edge counts are fixed when it is built; [`Partition::merge`]
//! and [`Partition::split`] derive new partitions arithmetically from
//! their inputs instead of re-walking nodes.
//!
//! # Identity
//!
//! Two partitions over the same span are interchangeable as search states.
//! [`Partition::id`] is that key and is what windows and the search
//! frontier compare. `PartialEq` stays a full structural comparison.

use crate::cost::{self, Walk};
use crate::{MemoryLimit, Partitioning, PlannerError, Window, WindowSet};
use event_graph::{Graph, NodeArena, NodeSpan, SecondBatch};
use std::fmt;
use std::sync::Arc;

/// Identity of a partition: its closed span of seconds.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct PartitionId {
    pub start: u32,
    pub end: u32,
}

impl fmt::Display for PartitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

/// A contiguous slice of the event graph between two seconds.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Partition {
    start: u32,
    end: u32,
    vertex_number: usize,
    graph: Graph,
}

impl Partition {
    /// Internal constructor; callers guarantee `start <= end`.
    fn from_parts(start: u32, end: u32, graph: Graph) -> Self {
        debug_assert!(start <= end, "partition start {start} after end {end}");
        Self {
            start,
            end,
            vertex_number: graph.nodes.len(),
            graph,
        }
    }

    /// The partition holding every event of one second.
    pub fn minimal(batch: &SecondBatch) -> Self {
        Self::from_parts(
            batch.second,
            batch.second,
            Graph {
                nodes: batch.nodes,
                first_nodes: batch.nodes,
                last_nodes: batch.nodes,
                edge_number: 0,
                number_of_min_partitions: 1,
            },
        )
    }

    /// The partition covering the whole arena.
    pub fn whole(arena: &NodeArena) -> Result<Self, PlannerError> {
        let (first, last) = match (arena.batches().first(), arena.batches().last()) {
            (Some(f), Some(l)) => (f.second, l.second),
            _ => return Err(PlannerError::EmptyGraph),
        };
        Ok(Self::from_parts(first, last, Graph::whole(arena)))
    }

    pub fn id(&self) -> PartitionId {
        PartitionId {
            start: self.start,
            end: self.end,
        }
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    pub fn vertex_number(&self) -> usize {
        self.vertex_number
    }

    pub fn edge_number(&self) -> usize {
        self.graph.edge_number
    }

    pub fn number_of_min_partitions(&self) -> usize {
        self.graph.number_of_min_partitions
    }

    pub fn nodes(&self) -> NodeSpan {
        self.graph.nodes
    }

    pub fn first_nodes(&self) -> NodeSpan {
        self.graph.first_nodes
    }

    pub fn last_nodes(&self) -> NodeSpan {
        self.graph.last_nodes
    }

    // ── Cost model ─────────────────────────────────────────────────

    /// Ideal memory cost of carving this partition into `k` equal parts.
    pub fn ideal_mem_cost(&self, k: usize) -> f64 {
        cost::ideal_mem_cost(self.vertex_number, k)
    }

    /// Smallest (`Walk::Down`) or largest (`Walk::Up`) number of parts
    /// whose ideal memory cost fits `limit`.
    ///
    /// Falls back to one event per part when no aggregated granularity fits.
    pub fn min_required_partitions(
        &self,
        limit: MemoryLimit,
        walk: Walk,
    ) -> Result<usize, PlannerError> {
        let n = self.vertex_number;
        let candidates = self.graph.number_of_min_partitions;
        let one_per_event = limit.admits(n as f64).then_some(n);

        let found = match walk {
            Walk::Down => (0..candidates)
                .find(|&k| {
                    let ideal = self.ideal_mem_cost(k);
                    tracing::trace!("k={k} ideal mem={ideal:.2}");
                    limit.admits(ideal)
                })
                .or(one_per_event),
            Walk::Up => {
                let mut result = one_per_event;
                for k in (0..candidates).rev() {
                    let ideal = self.ideal_mem_cost(k);
                    if !limit.admits(ideal) {
                        break;
                    }
                    tracing::trace!("k={k} ideal mem={ideal:.2}");
                    result = Some(k);
                }
                result
            }
        };

        found.ok_or(PlannerError::InfeasibleBudget {
            vertex_number: n,
            limit: limit.value(),
        })
    }

    /// Number of windows sharing this partition.
    pub fn sharing_window_number(&self, windows: &WindowSet) -> usize {
        windows.sharing_count(self.id())
    }

    /// Returns `true` if more than one window shares this partition.
    pub fn is_shared(&self, windows: &WindowSet) -> bool {
        self.sharing_window_number(windows) > 1
    }

    /// Returns `true` if `window` is the one that stores this partition,
    /// i.e. the first window in `windows` containing it.
    pub fn is_written_by(&self, windows: &WindowSet, window: &Window) -> bool {
        windows
            .first_containing(self.id())
            .is_some_and(|owner| owner == window)
    }

    /// CPU cost, amortized over sharing windows.
    pub fn cpu_cost(&self, windows: &WindowSet) -> f64 {
        cost::amortize(
            cost::cpu_cost(self.vertex_number, self.graph.edge_number),
            self.sharing_window_number(windows),
        )
    }

    /// Memory cost, amortized over sharing windows.
    pub fn mem_cost(&self, windows: &WindowSet) -> f64 {
        cost::amortize(
            cost::mem_cost(self.vertex_number),
            self.sharing_window_number(windows),
        )
    }

    /// Actual memory held by trends stored at the entry frontier.
    pub fn cet_length(&self, arena: &NodeArena) -> Result<usize, PlannerError> {
        Ok(arena.trend_length(self.graph.first_nodes)?)
    }

    // ── Split / merge ──────────────────────────────────────────────

    /// Every two-way split of this partition, earliest cut first.
    ///
    /// Each step moves the leading batch of the remainder into the first
    /// part. Edges between the moved batch and the previous first part
    /// become internal to the first part; edges from the moved batch to its
    /// successors leave the remainder.
    pub fn split(&self, arena: &NodeArena) -> Result<Vec<Partitioning>, PlannerError> {
        if self.graph.first_nodes.is_empty() {
            return Err(PlannerError::EmptyFrontier(self.id()));
        }

        let mut results = Vec::new();
        let mut first = Graph::empty();
        let mut second = self.graph;

        let mut moving = second.first_nodes;
        let mut successors = arena.successors(moving)?;

        while !successors.is_empty() {
            let moving_sec = arena.second_of(moving.start)?;
            let next_sec = arena.second_of(successors.start)?;
            if next_sec > self.end {
                break;
            }

            let old_cut_edges = first.last_nodes.len() * moving.len();
            let new_cut_edges = moving.len() * successors.len();

            first = Graph {
                nodes: NodeSpan::new(self.graph.nodes.start, moving.end),
                first_nodes: self.graph.first_nodes,
                last_nodes: moving,
                edge_number: first.edge_number + old_cut_edges,
                number_of_min_partitions: first.number_of_min_partitions + 1,
            };
            second = Graph {
                nodes: NodeSpan::new(successors.start, self.graph.nodes.end),
                first_nodes: successors,
                last_nodes: self.graph.last_nodes,
                edge_number: second.edge_number.saturating_sub(new_cut_edges),
                number_of_min_partitions: second.number_of_min_partitions.saturating_sub(1),
            };

            results.push(Partitioning::assemble(vec![
                Arc::new(Self::from_parts(self.start, moving_sec, first)),
                Arc::new(Self::from_parts(next_sec, self.end, second)),
            ]));

            moving = second.first_nodes;
            successors = arena.successors(moving)?;
        }

        Ok(results)
    }

    /// Joins this partition with the one immediately after it.
    ///
    /// Every exit node of `self` gains an edge to every entry node of
    /// `other`. `self` must be the earlier partition.
    pub fn merge(&self, other: &Partition) -> Result<Partition, PlannerError> {
        if !self.precedes(other) {
            return Err(PlannerError::NonAdjacentMerge {
                left: self.id(),
                right: other.id(),
            });
        }

        let cut_edges = self.graph.last_nodes.len() * other.graph.first_nodes.len();
        Ok(Self::from_parts(
            self.start,
            other.end,
            Graph {
                nodes: NodeSpan::new(self.graph.nodes.start, other.graph.nodes.end),
                first_nodes: self.graph.first_nodes,
                last_nodes: other.graph.last_nodes,
                edge_number: self.graph.edge_number + other.graph.edge_number + cut_edges,
                number_of_min_partitions: self.graph.number_of_min_partitions
                    + other.graph.number_of_min_partitions,
            },
        ))
    }

    /// Returns `true` if `other` starts right after `self` ends: later in
    /// time, with no node in between.
    pub fn precedes(&self, other: &Partition) -> bool {
        self.end < other.start && self.graph.nodes.end == other.graph.nodes.start
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}: {}; {}",
            self.start, self.end, self.vertex_number, self.graph.edge_number
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::Walk;
    use event_graph::{EventStream, EventTrend};

    fn arena(seconds: &[u32]) -> NodeArena {
        NodeArena::build(&EventStream::from_seconds("t", seconds).validate().unwrap())
    }

    fn minimal(arena: &NodeArena) -> Vec<Partition> {
        arena.batches().iter().map(Partition::minimal).collect()
    }

    #[test]
    fn test_minimal_partition() {
        let a = arena(&[1, 1, 2, 3]);
        let parts = minimal(&a);
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0].id(), PartitionId { start: 1, end: 1 });
        assert_eq!(parts[0].vertex_number(), 2);
        assert_eq!(parts[0].edge_number(), 0);
        assert_eq!(parts[0].number_of_min_partitions(), 1);
        assert_eq!(parts[0].first_nodes(), parts[0].last_nodes());
    }

    #[test]
    fn test_merge_counts() {
        let a = arena(&[1, 1, 2, 3]);
        let parts = minimal(&a);
        let m = parts[0].merge(&parts[1]).unwrap();
        assert_eq!(m.id(), PartitionId { start: 1, end: 2 });
        assert_eq!(m.vertex_number(), 3);
        assert_eq!(m.edge_number(), 2);
        assert_eq!(m.first_nodes(), parts[0].first_nodes());
        assert_eq!(m.last_nodes(), parts[1].last_nodes());
        assert_eq!(m.number_of_min_partitions(), 2);

        let all = m.merge(&parts[2]).unwrap();
        assert_eq!(all, Partition::whole(&a).unwrap());
    }

    #[test]
    fn test_merge_rejects_wrong_order_and_gaps() {
        let a = arena(&[1, 2, 3]);
        let parts = minimal(&a);
        assert!(matches!(
            parts[1].merge(&parts[0]),
            Err(PlannerError::NonAdjacentMerge { .. })
        ));
        assert!(matches!(
            parts[0].merge(&parts[2]),
            Err(PlannerError::NonAdjacentMerge { .. })
        ));
    }

    #[test]
    fn test_split_all_cuts() {
        let a = arena(&[1, 1, 2, 3]);
        let whole = Partition::whole(&a).unwrap();
        let splits = whole.split(&a).unwrap();
        assert_eq!(splits.len(), 2);

        let first: Vec<_> = splits[0].partitions().map(|p| p.to_string()).collect();
        assert_eq!(first, vec!["1-1: 2; 0", "2-3: 2; 1"]);
        let second: Vec<_> = splits[1].partitions().map(|p| p.to_string()).collect();
        assert_eq!(second, vec!["1-2: 3; 2", "3-3: 1; 0"]);
    }

    #[test]
    fn test_split_then_merge_restores_span() {
        let a = arena(&[0, 0, 1, 4, 4, 4, 6]);
        let whole = Partition::whole(&a).unwrap();
        for split in whole.split(&a).unwrap() {
            let parts: Vec<_> = split.partitions().collect();
            assert_eq!(parts.len(), 2);
            let rejoined = parts[0].merge(parts[1]).unwrap();
            assert_eq!(rejoined.id(), whole.id());
            assert_eq!(rejoined.vertex_number(), whole.vertex_number());
            assert_eq!(rejoined.nodes(), whole.nodes());
        }
    }

    #[test]
    fn test_split_single_second() {
        let a = arena(&[5, 5]);
        let whole = Partition::whole(&a).unwrap();
        assert!(whole.split(&a).unwrap().is_empty());
    }

    #[test]
    fn test_split_stays_inside_partition() {
        // Splitting the sub-partition [1, 2] must not cut at second 3.
        let a = arena(&[1, 2, 3]);
        let parts = minimal(&a);
        let sub = parts[0].merge(&parts[1]).unwrap();
        let splits = sub.split(&a).unwrap();
        assert_eq!(splits.len(), 1);
    }

    #[test]
    fn test_split_empty_frontier() {
        let empty = Partition::from_parts(0, 0, Graph::empty());
        let a = arena(&[1]);
        assert!(matches!(empty.split(&a), Err(PlannerError::EmptyFrontier(_))));
    }

    #[test]
    fn test_costs_unshared() {
        let a = arena(&[1, 1, 2, 3]);
        let whole = Partition::whole(&a).unwrap();
        let none = WindowSet::empty();
        assert_eq!(whole.cpu_cost(&none), 6.0);
        assert_eq!(whole.mem_cost(&none), 12.0);
    }

    #[test]
    fn test_costs_amortized() {
        let a = arena(&[1, 1, 2, 3]);
        let whole = Partition::whole(&a).unwrap();
        let shared = WindowSet::new(vec![
            Window::interval(0, 10),
            Window::interval(1, 3),
            Window::interval(1, 5),
        ]);
        assert_eq!(whole.sharing_window_number(&shared), 3);
        assert!(whole.is_shared(&shared));
        assert_eq!(whole.cpu_cost(&shared), 2.0);
        assert_eq!(whole.mem_cost(&shared), 4.0);

        let single = WindowSet::new(vec![Window::interval(0, 10)]);
        assert!(!whole.is_shared(&single));
        assert_eq!(whole.cpu_cost(&single), 6.0);
    }

    #[test]
    fn test_is_written_by() {
        let a = arena(&[1, 2]);
        let p = minimal(&a).remove(0);
        let w0 = Window::interval(0, 1);
        let w1 = Window::interval(1, 4);
        let ws = WindowSet::new(vec![w0.clone(), w1.clone()]);
        assert!(p.is_written_by(&ws, &w0));
        assert!(!p.is_written_by(&ws, &w1));
        assert!(!p.is_written_by(&WindowSet::empty(), &w0));
    }

    #[test]
    fn test_min_required_partitions_walk_down() {
        // 6 events, one per second: ideal(0) = ideal(1) = 54, ideal(2) = 18.
        let a = arena(&[0, 1, 2, 3, 4, 5]);
        let whole = Partition::whole(&a).unwrap();
        let big = MemoryLimit::new(100.0).unwrap();
        assert_eq!(whole.min_required_partitions(big, Walk::Down).unwrap(), 0);
        let mid = MemoryLimit::new(20.0).unwrap();
        assert_eq!(whole.min_required_partitions(mid, Walk::Down).unwrap(), 2);
    }

    #[test]
    fn test_min_required_partitions_walk_up() {
        let a = arena(&[0, 1, 2, 3, 4, 5]);
        let whole = Partition::whole(&a).unwrap();
        // Every k fits: the walk reaches k = 0.
        let big = MemoryLimit::new(100.0).unwrap();
        assert_eq!(whole.min_required_partitions(big, Walk::Up).unwrap(), 0);
        // k = 5..2 fit, k = 1 does not: the walk stops at 2.
        let mid = MemoryLimit::new(20.0).unwrap();
        assert_eq!(whole.min_required_partitions(mid, Walk::Up).unwrap(), 2);
    }

    #[test]
    fn test_min_required_partitions_fallback_and_infeasible() {
        let a = arena(&[1, 1, 2, 3]);
        let whole = Partition::whole(&a).unwrap();
        // ideal(2) = 4 · 3^(2/3) ≈ 8.32, so 5 only admits one event per part.
        let tight = MemoryLimit::new(5.0).unwrap();
        assert_eq!(whole.min_required_partitions(tight, Walk::Down).unwrap(), 4);
        assert_eq!(whole.min_required_partitions(tight, Walk::Up).unwrap(), 4);

        let hopeless = MemoryLimit::new(3.0).unwrap();
        assert!(matches!(
            whole.min_required_partitions(hopeless, Walk::Down),
            Err(PlannerError::InfeasibleBudget { vertex_number: 4, .. })
        ));
    }

    #[test]
    fn test_cet_length() {
        let mut a = arena(&[1, 1, 2]);
        a.record_trend(0, EventTrend::new(vec![0, 2])).unwrap();
        a.record_trend(2, EventTrend::new(vec![2])).unwrap();
        let whole = Partition::whole(&a).unwrap();
        assert_eq!(whole.cet_length(&a).unwrap(), 2);
    }

    #[test]
    fn test_id_display() {
        assert_eq!(PartitionId { start: 3, end: 7 }.to_string(), "[3, 7]");
    }
}
