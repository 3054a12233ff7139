// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Windows: scopes inside which partitions are live at the same time.
//!
//! A partition that belongs to several windows is computed once and shared,
//! so its cost is amortized over them (see [`crate::cost::amortize`]).
//! Window sets are configuration: the planner reads them and never changes
//! their membership.

use crate::{PartitionId, PlannerError};
use std::collections::BTreeSet;

/// How a window decides membership.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Membership {
    /// Exactly the listed partitions.
    Explicit(BTreeSet<PartitionId>),
    /// Every partition whose span lies inside `[start, end]`.
    Interval { start: u32, end: u32 },
}

/// A set of partitions considered live simultaneously.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Window {
    membership: Membership,
}

impl Window {
    /// A window holding exactly the given partitions.
    pub fn from_partitions(ids: impl IntoIterator<Item = PartitionId>) -> Self {
        Self {
            membership: Membership::Explicit(ids.into_iter().collect()),
        }
    }

    /// A window over the closed time interval `[start, end]`.
    pub fn interval(start: u32, end: u32) -> Self {
        Self {
            membership: Membership::Interval {
                start: start.min(end),
                end: end.max(start),
            },
        }
    }

    /// Membership test, keyed by partition id only.
    pub fn contains(&self, id: PartitionId) -> bool {
        match &self.membership {
            Membership::Explicit(ids) => ids.contains(&id),
            Membership::Interval { start, end } => *start <= id.start && id.end <= *end,
        }
    }

    pub fn membership(&self) -> &Membership {
        &self.membership
    }
}

/// The ordered collection of windows passed to every cost query.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct WindowSet {
    windows: Vec<Window>,
}

impl WindowSet {
    pub fn new(windows: Vec<Window>) -> Self {
        Self { windows }
    }

    /// No windows: nothing is shared.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Sliding windows of `length` seconds every `slide` seconds, starting at
    /// `first` and covering up to `last`.
    ///
    /// ```
    /// use partition_planner::WindowSet;
    ///
    /// // [0,9] [5,14] [10,19]
    /// let ws = WindowSet::sliding(0, 12, 10, 5).unwrap();
    /// assert_eq!(ws.len(), 3);
    /// ```
    pub fn sliding(first: u32, last: u32, length: u32, slide: u32) -> Result<Self, PlannerError> {
        if length == 0 || slide == 0 {
            return Err(PlannerError::InvalidWindow(format!(
                "length ({length}) and slide ({slide}) must be positive"
            )));
        }

        let mut windows = Vec::new();
        let mut start = first;
        while start <= last {
            windows.push(Window::interval(start, start.saturating_add(length - 1)));
            match start.checked_add(slide) {
                Some(next) => start = next,
                None => break,
            }
        }
        Ok(Self { windows })
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Window> {
        self.windows.iter()
    }

    /// Number of windows containing the partition `id`.
    pub fn sharing_count(&self, id: PartitionId) -> usize {
        self.windows.iter().filter(|w| w.contains(id)).count()
    }

    /// The first window, in set order, that contains `id`.
    pub fn first_containing(&self, id: PartitionId) -> Option<&Window> {
        self.windows.iter().find(|w| w.contains(id))
    }
}

impl FromIterator<Window> for WindowSet {
    fn from_iter<I: IntoIterator<Item = Window>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
