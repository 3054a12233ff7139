// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Partitionings: ordered, contiguous covers of the event graph.
//!
//! A [`Partitioning`] is the search state of the planner. Its parts are
//! kept behind `Arc` so that children produced by merging share every
//! untouched partition with their parent.

use crate::cost::CostMode;
use crate::{Partition, PartitionId, PlannerError, WindowSet};
use event_graph::NodeArena;
use std::fmt;
use std::sync::Arc;

/// A time-ordered sequence of adjacent partitions.
#[derive(Debug, Clone, PartialEq)]
pub struct Partitioning {
    parts: Vec<Arc<Partition>>,
}

impl Partitioning {
    /// Builds a partitioning, checking that the parts are non-empty,
    /// ordered and adjacent.
    pub fn new(parts: Vec<Partition>) -> Result<Self, PlannerError> {
        Self::from_shared(parts.into_iter().map(Arc::new).collect())
    }

    /// Like [`Partitioning::new`] for parts that are already shared.
    pub fn from_shared(parts: Vec<Arc<Partition>>) -> Result<Self, PlannerError> {
        if parts.is_empty() {
            return Err(PlannerError::EmptyGraph);
        }
        for pair in parts.windows(2) {
            if !pair[0].precedes(&pair[1]) {
                return Err(PlannerError::NonContiguous(format!(
                    "{} is not immediately followed by {}",
                    pair[0].id(),
                    pair[1].id()
                )));
            }
        }
        Ok(Self::assemble(parts))
    }

    /// Skips the contiguity check; callers construct parts that are
    /// adjacent by derivation.
    pub(crate) fn assemble(parts: Vec<Arc<Partition>>) -> Self {
        Self { parts }
    }

    /// One partition per distinct second.
    pub fn minimal(arena: &NodeArena) -> Result<Self, PlannerError> {
        if arena.is_empty() {
            return Err(PlannerError::EmptyGraph);
        }
        Ok(Self::assemble(
            arena
                .batches()
                .iter()
                .map(|batch| Arc::new(Partition::minimal(batch)))
                .collect(),
        ))
    }

    /// A single partition covering the whole arena, obtained by folding
    /// [`Partition::merge`] over the minimal partitioning.
    pub fn unpartitioned(arena: &NodeArena) -> Result<Self, PlannerError> {
        let minimal = Self::minimal(arena)?;
        let mut parts = minimal.parts.iter();
        let first = parts.next().ok_or(PlannerError::EmptyGraph)?;
        let whole = parts.try_fold(Partition::clone(first), |acc, next| acc.merge(next))?;
        Ok(Self::assemble(vec![Arc::new(whole)]))
    }

    /// Number of partitions.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Always `false`: a partitioning holds at least one partition.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Iterates over the partitions in time order.
    pub fn partitions(&self) -> impl Iterator<Item = &Partition> {
        self.parts.iter().map(Arc::as_ref)
    }

    /// Total number of events covered.
    pub fn vertex_number(&self) -> usize {
        self.partitions().map(Partition::vertex_number).sum()
    }

    /// Edges crossing a boundary between consecutive partitions.
    pub fn cut_edges(&self) -> usize {
        self.parts
            .windows(2)
            .map(|pair| pair[0].last_nodes().len() * pair[1].first_nodes().len())
            .sum()
    }

    /// Partition CPU costs plus the weighted cut-edge term.
    pub fn cpu_cost(&self, windows: &WindowSet, mode: CostMode) -> f64 {
        let internal: f64 = self.partitions().map(|p| p.cpu_cost(windows)).sum();
        internal + mode.cut_edge_weight() * self.cut_edges() as f64
    }

    /// Sum of partition memory costs.
    pub fn mem_cost(&self, windows: &WindowSet) -> f64 {
        self.partitions().map(|p| p.mem_cost(windows)).sum()
    }

    /// Every partitioning obtained by merging one pair of neighbours,
    /// leftmost pair first.
    pub fn children_by_merging(&self) -> Result<Vec<Partitioning>, PlannerError> {
        let mut children = Vec::with_capacity(self.parts.len().saturating_sub(1));
        for i in 0..self.parts.len().saturating_sub(1) {
            let merged = self.parts[i].merge(&self.parts[i + 1])?;
            let mut parts = Vec::with_capacity(self.parts.len() - 1);
            parts.extend(self.parts[..i].iter().cloned());
            parts.push(Arc::new(merged));
            parts.extend(self.parts[i + 2..].iter().cloned());
            children.push(Self::assemble(parts));
        }
        Ok(children)
    }

    /// Identity of this state: the ordered partition ids.
    pub fn frontier_key(&self) -> Vec<PartitionId> {
        self.parts.iter().map(|p| p.id()).collect()
    }

    /// Returns `true` if the parts cover every node of `arena`.
    pub fn is_complete(&self, arena: &NodeArena) -> bool {
        match (self.parts.first(), self.parts.last()) {
            (Some(first), Some(last)) => {
                first.nodes().start == 0 && last.nodes().end as usize == arena.len()
            }
            _ => false,
        }
    }

    /// Largest single-partition memory cost.
    pub fn peak_partition_mem(&self, windows: &WindowSet) -> f64 {
        self.partitions()
            .map(|p| p.mem_cost(windows))
            .fold(0.0, f64::max)
    }
}

impl fmt::Display for Partitioning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, part) in self.partitions().enumerate() {
            if i > 0 {
                write!(f, " | ")?;
            }
            write!(f, "{part}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use event_graph::EventStream;

    fn arena(seconds: &[u32]) -> NodeArena {
        NodeArena::build(&EventStream::from_seconds("t", seconds).validate().unwrap())
    }

    #[test]
    fn test_minimal_partitioning() {
        let a = arena(&[1, 1, 2, 3]);
        let p = Partitioning::minimal(&a).unwrap();
        assert_eq!(p.len(), 3);
        assert_eq!(p.vertex_number(), 4);
        assert!(p.is_complete(&a));
        assert_eq!(p.cut_edges(), 3);
        assert_eq!(p.to_string(), "[1-1: 2; 0 | 2-2: 1; 0 | 3-3: 1; 0]");
    }

    #[test]
    fn test_minimal_costs() {
        let a = arena(&[1, 1, 2, 3]);
        let p = Partitioning::minimal(&a).unwrap();
        let none = WindowSet::empty();
        assert_eq!(p.mem_cost(&none), 4.0);
        assert_eq!(p.cpu_cost(&none, CostMode::Search), 12.0);
        assert_eq!(p.cpu_cost(&none, CostMode::Root), 6.0);
    }

    #[test]
    fn test_unpartitioned() {
        let a = arena(&[1, 1, 2, 3]);
        let p = Partitioning::unpartitioned(&a).unwrap();
        assert_eq!(p.len(), 1);
        assert_eq!(p.cut_edges(), 0);
        let none = WindowSet::empty();
        assert_eq!(p.cpu_cost(&none, CostMode::Root), 6.0);
        assert_eq!(p.cpu_cost(&none, CostMode::Search), 6.0);
        assert_eq!(p.mem_cost(&none), 12.0);
        assert!(p.is_complete(&a));
    }

    #[test]
    fn test_empty_arena() {
        let a = NodeArena::default();
        assert!(matches!(
            Partitioning::minimal(&a),
            Err(PlannerError::EmptyGraph)
        ));
        assert!(matches!(
            Partitioning::unpartitioned(&a),
            Err(PlannerError::EmptyGraph)
        ));
    }

    #[test]
    fn test_children_by_merging() {
        let a = arena(&[1, 1, 2, 3]);
        let p = Partitioning::minimal(&a).unwrap();
        let children = p.children_by_merging().unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].to_string(), "[1-2: 3; 2 | 3-3: 1; 0]");
        assert_eq!(children[1].to_string(), "[1-1: 2; 0 | 2-3: 2; 1]");

        let none = WindowSet::empty();
        assert_eq!(children[0].cpu_cost(&none, CostMode::Search), 9.0);
        assert_eq!(children[0].mem_cost(&none), 10.0);
        assert_eq!(children[1].cpu_cost(&none, CostMode::Search), 9.0);
        assert_eq!(children[1].mem_cost(&none), 4.0);
    }

    #[test]
    fn test_children_share_untouched_parts() {
        let a = arena(&[1, 2, 3]);
        let p = Partitioning::minimal(&a).unwrap();
        let children = p.children_by_merging().unwrap();
        assert!(Arc::ptr_eq(&p.parts[2], &children[0].parts[1]));
        assert!(Arc::ptr_eq(&p.parts[0], &children[1].parts[0]));
    }

    #[test]
    fn test_single_partition_has_no_children() {
        let a = arena(&[1, 1, 2]);
        let p = Partitioning::unpartitioned(&a).unwrap();
        assert!(p.children_by_merging().unwrap().is_empty());
    }

    #[test]
    fn test_new_rejects_gaps_and_order() {
        let a = arena(&[1, 2, 3]);
        let parts: Vec<Partition> = a.batches().iter().map(Partition::minimal).collect();
        assert!(Partitioning::new(vec![parts[0].clone(), parts[2].clone()]).is_err());
        assert!(Partitioning::new(vec![parts[1].clone(), parts[0].clone()]).is_err());
        assert!(Partitioning::new(Vec::new()).is_err());

        let partial = Partitioning::new(vec![parts[0].clone(), parts[1].clone()]).unwrap();
        assert!(!partial.is_complete(&a));
    }

    #[test]
    fn test_frontier_key() {
        let a = arena(&[4, 9]);
        let p = Partitioning::minimal(&a).unwrap();
        assert_eq!(
            p.frontier_key(),
            vec![
                PartitionId { start: 4, end: 4 },
                PartitionId { start: 9, end: 9 }
            ]
        );
    }

    #[test]
    fn test_peak_partition_mem() {
        let a = arena(&[1, 1, 2, 3]);
        let p = Partitioning::minimal(&a).unwrap();
        assert_eq!(p.peak_partition_mem(&WindowSet::empty()), 2.0);
    }
}
