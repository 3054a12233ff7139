// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # partition-planner
//!
//! Splits an event-trend graph into time-contiguous partitions so that the
//! total memory cost stays under a limit while the CPU cost is minimal.
//!
//! # Strategies
//!
//! | Strategy | Partitions | CPU cost | Memory cost |
//! |---|---|---|---|
//! | [`Unpartitioned`] | 1 | Exponential in the event count | Highest |
//! | [`BranchAndBound`] | Searched | Minimal within the limit | ≤ limit when feasible |
//! | [`MinimalPartitions`] | One per second | Dominated by cut edges | Lowest |
//!
//! [`Auto`] (and [`auto_plan`]) rejects infeasible limits up front and
//! otherwise runs [`BranchAndBound`].
//!
//! # Trait-Based Extensibility
//!
//! All strategies implement [`PartitionStrategy`], so new strategies can
//! be added without modifying the runtime:
//!
//! ```ignore
//! struct MyCustomStrategy;
//! impl PartitionStrategy for MyCustomStrategy {
//!     fn name(&self) -> &str { "custom" }
//!     fn plan(&self, arena: &NodeArena, windows: &WindowSet, limit: MemoryLimit)
//!         -> Result<SearchOutcome, PlannerError> { /* ... */ }
//! }
//! ```
//!
//! # Example
//! ```
//! use event_graph::{EventStream, NodeArena};
//! use partition_planner::{BranchAndBound, MemoryLimit, PartitionStrategy, WindowSet};
//!
//! let stream = EventStream::from_seconds("demo", &[1, 1, 2, 3]).validate().unwrap();
//! let arena = NodeArena::build(&stream);
//! let limit = MemoryLimit::new(11.0).unwrap();
//! let outcome = BranchAndBound::default()
//!     .plan(&arena, &WindowSet::empty(), limit)
//!     .unwrap();
//! assert_eq!(outcome.solution.len(), 2);
//! assert!(outcome.is_feasible());
//! ```

mod budget;
pub mod cost;
mod error;
mod partition;
mod partitioning;
pub(crate) mod plan;
mod stats;
pub mod strategy;
mod window;

pub use budget::MemoryLimit;
pub use cost::{CostMode, Walk};
pub use error::PlannerError;
pub use partition::{Partition, PartitionId};
pub use partitioning::Partitioning;
pub use plan::{PartitionPlan, PartitionRow};
pub use stats::SearchStats;
pub use strategy::branch_and_bound::{BoundSeeding, BranchAndBound, FrontierOrder};
pub use strategy::minimal::MinimalPartitions;
pub use strategy::unpartitioned::Unpartitioned;
pub use strategy::{Feasibility, PartitionStrategy, SearchOutcome};
pub use window::{Membership, Window, WindowSet};

use event_graph::NodeArena;

/// Checks the limit against the ideal memory cost of the whole graph, then
/// searches with [`BranchAndBound::default()`].
///
/// Fails with [`PlannerError::InfeasibleBudget`] when no granularity, not
/// even one event per partition, fits the limit. A root that fits is not
/// returned directly: its CPU term grows as `3^(n/3)`, so a split is often
/// cheaper. The search seeds its bound from a feasible root and so never
/// returns anything costlier.
pub fn auto_plan(
    arena: &NodeArena,
    windows: &WindowSet,
    limit: MemoryLimit,
) -> Result<SearchOutcome, PlannerError> {
    let whole = Partition::whole(arena)?;
    let k = whole.min_required_partitions(limit, Walk::Down)?;

    tracing::info!(
        "ideal granularity {k} partitions under limit {limit} → using branch-and-bound strategy"
    );
    BranchAndBound::default().plan(arena, windows, limit)
}

/// [`auto_plan`] behind the [`PartitionStrategy`] trait.
#[derive(Debug, Clone, Default)]
pub struct Auto;

impl PartitionStrategy for Auto {
    fn name(&self) -> &str {
        "auto"
    }

    fn plan(
        &self,
        arena: &NodeArena,
        windows: &WindowSet,
        limit: MemoryLimit,
    ) -> Result<SearchOutcome, PlannerError> {
        auto_plan(arena, windows, limit)
    }
}
