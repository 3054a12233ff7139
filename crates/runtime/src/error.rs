// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for planning sessions.

/// Errors that can occur while loading a trace or running a strategy.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// The produced plan is inconsistent.
    #[error("invalid partition plan: {0}")]
    InvalidPlan(String),

    /// Trace loading or graph construction failed.
    #[error("event graph error: {0}")]
    GraphError(#[from] event_graph::GraphError),

    /// The partition planner returned an error.
    #[error("planner error: {0}")]
    PlannerError(#[from] partition_planner::PlannerError),

    /// The blocking search task panicked or was cancelled.
    #[error("planning task failed: {0}")]
    TaskFailed(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),
}
