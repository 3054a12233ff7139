// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Graph nodes and contiguous node ranges.

use crate::{Event, EventTrend};
use std::collections::BTreeSet;
use std::fmt;

/// Index of a node in its [`crate::NodeArena`].
pub type NodeId = u32;

/// One event in the graph, with its successors and accumulated trends.
#[derive(Debug, Clone)]
pub struct Node {
    /// The wrapped event.
    pub event: Event,
    /// Nodes whose events may directly follow this one in a trend.
    following: BTreeSet<NodeId>,
    /// Trends ending at this node, in detection order.
    results: Vec<EventTrend>,
}

impl Node {
    pub fn new(event: Event) -> Self {
        Self {
            event,
            following: BTreeSet::new(),
            results: Vec::new(),
        }
    }

    /// Returns the node's second.
    #[inline]
    pub fn second(&self) -> u32 {
        self.event.second
    }

    /// Adds a successor edge. Returns `false` if the edge already existed.
    pub fn connect(&mut self, next: NodeId) -> bool {
        self.following.insert(next)
    }

    /// Returns the successor set.
    pub fn following(&self) -> &BTreeSet<NodeId> {
        &self.following
    }

    /// Records a trend ending at this node.
    pub fn push_result(&mut self, trend: EventTrend) {
        self.results.push(trend);
    }

    /// Returns the trends ending at this node.
    pub fn results(&self) -> &[EventTrend] {
        &self.results
    }
}

/// A half-open range `[start, end)` of consecutive node ids.
///
/// Because nodes are allocated in time order, every set of nodes a
/// partition covers, and every entry or exit frontier, is such a range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize)]
pub struct NodeSpan {
    pub start: NodeId,
    pub end: NodeId,
}

impl NodeSpan {
    /// Creates a span. `end` is clamped so the span is never negative.
    pub fn new(start: NodeId, end: NodeId) -> Self {
        Self {
            start,
            end: end.max(start),
        }
    }

    /// The empty span.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of nodes in the span.
    #[inline]
    pub fn len(&self) -> usize {
        (self.end - self.start) as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.start <= id && id < self.end
    }

    /// Iterates over the node ids in the span.
    pub fn iter(&self) -> std::ops::Range<NodeId> {
        self.start..self.end
    }

    /// Joins two spans where `next` begins exactly where `self` ends.
    pub fn join(&self, next: &NodeSpan) -> Option<NodeSpan> {
        if self.is_empty() {
            return Some(*next);
        }
        if next.is_empty() {
            return Some(*self);
        }
        (self.end == next.start).then(|| NodeSpan::new(self.start, next.end))
    }

    /// Builds a span from sorted ids, if they are consecutive.
    pub fn from_sorted(ids: &[NodeId]) -> Option<NodeSpan> {
        match (ids.first(), ids.last()) {
            (Some(&first), Some(&last)) => {
                let span = NodeSpan::new(first, last + 1);
                (span.len() == ids.len()).then_some(span)
            }
            _ => Some(NodeSpan::empty()),
        }
    }
}

impl fmt::Display for NodeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
