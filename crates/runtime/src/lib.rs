// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # runtime
//!
//! The session layer that turns an event trace into a partition plan.
//!
//! The runtime takes:
//! - A validated `EventStream` from `event-graph`, read from a trace file
//!   or built in memory.
//! - A `PlannerConfig` naming the memory limit, strategy and windows.
//! - A `PartitionStrategy` from `partition-planner`.
//!
//! And produces a validated `PartitionPlan` together with the search
//! counters and timing metrics of the run.
//!
//! # Type-State Pipeline
//! The runtime enforces a type-safe pipeline:
//! ```text
//! PlanningSession<Idle> → PlanningSession<Loaded> → PlanningSession<Ready>
//! ```
//! Transitions are compile-time checked.
//!
//! # Async Execution
//! Sessions run under `tokio`. The search itself is synchronous and is
//! moved to the blocking pool, so several sessions can be driven from one
//! async runtime.

mod config;
mod engine;
mod error;
mod metrics;

pub use config::{strategy_by_name, PlannerConfig, WindowConfig};
pub use engine::{Idle, Loaded, PlanningOutput, PlanningSession, Ready, SessionState};
pub use error::RuntimeError;
pub use metrics::PlanningMetrics;
