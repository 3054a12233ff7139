// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Planner configuration loaded from TOML files or constructed programmatically.
//!
//! # TOML Format
//! ```toml
//! trace_path = "./traces/stock.csv"
//! memory_limit = "2.5K"
//! strategy = "branch-and-bound"
//! frontier_order = "fifo"
//! bound_seeding = "feasible-root"
//!
//! [windows]
//! length = 10
//! slide = 5
//! ```

use partition_planner::{
    Auto, BoundSeeding, BranchAndBound, FrontierOrder, MemoryLimit, MinimalPartitions,
    PartitionStrategy, Unpartitioned, WindowSet,
};
use std::path::{Path, PathBuf};

/// Sliding window parameters, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WindowConfig {
    pub length: u32,
    pub slide: u32,
}

/// Configuration for a planning session.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PlannerConfig {
    /// Path to the event trace.
    pub trace_path: PathBuf,
    /// Memory limit (human-readable, e.g. `"2.5K"`).
    pub memory_limit: String,
    /// Strategy name: `"branch-and-bound"`, `"unpartitioned"`, `"minimal"` or `"auto"`.
    pub strategy: String,
    /// Frontier order for branch and bound (ignored by other strategies).
    #[serde(default)]
    pub frontier_order: FrontierOrder,
    /// Bound seeding for branch and bound (ignored by other strategies).
    #[serde(default)]
    pub bound_seeding: BoundSeeding,
    /// Sliding windows over the trace; none means nothing is shared.
    #[serde(default)]
    pub windows: Option<WindowConfig>,
}

impl PlannerConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, super::RuntimeError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            super::RuntimeError::ConfigError(format!(
                "cannot read config '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, super::RuntimeError> {
        toml::from_str(toml_str)
            .map_err(|e| super::RuntimeError::ConfigError(format!("TOML parse error: {e}")))
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, super::RuntimeError> {
        toml::to_string_pretty(self)
            .map_err(|e| super::RuntimeError::ConfigError(format!("TOML serialise error: {e}")))
    }

    /// Parses the memory limit string into a [`MemoryLimit`].
    pub fn parse_limit(&self) -> Result<MemoryLimit, super::RuntimeError> {
        MemoryLimit::parse(&self.memory_limit)
            .map_err(|e| super::RuntimeError::ConfigError(format!("invalid limit: {e}")))
    }

    /// Creates the partition strategy specified by this config.
    pub fn create_strategy(&self) -> Result<Box<dyn PartitionStrategy>, super::RuntimeError> {
        strategy_by_name(&self.strategy, self.frontier_order, self.bound_seeding)
    }

    /// Builds the window set for a trace spanning `first..=last` seconds.
    pub fn window_set(&self, first: u32, last: u32) -> Result<WindowSet, super::RuntimeError> {
        match self.windows {
            None => Ok(WindowSet::empty()),
            Some(w) => Ok(WindowSet::sliding(first, last, w.length, w.slide)?),
        }
    }
}

/// Resolves a strategy name, accepting the short aliases the CLI offers.
pub fn strategy_by_name(
    name: &str,
    frontier_order: FrontierOrder,
    bound_seeding: BoundSeeding,
) -> Result<Box<dyn PartitionStrategy>, super::RuntimeError> {
    match name.to_lowercase().as_str() {
        "branch-and-bound" | "bnb" => Ok(Box::new(BranchAndBound::new(
            frontier_order,
            bound_seeding,
        ))),
        "unpartitioned" | "root" => Ok(Box::new(Unpartitioned::new())),
        "minimal" | "finest" => Ok(Box::new(MinimalPartitions::new())),
        "auto" => Ok(Box::new(Auto)),
        other => Err(super::RuntimeError::ConfigError(format!(
            "unknown strategy '{other}'; expected 'branch-and-bound', 'unpartitioned', 'minimal', or 'auto'"
        ))),
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            trace_path: PathBuf::from("./traces/events.csv"),
            memory_limit: "1K".to_string(),
            strategy: "branch-and-bound".to_string(),
            frontier_order: FrontierOrder::default(),
            bound_seeding: BoundSeeding::default(),
            windows: None,
        }
    }
}
