// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Memory limit configuration and parsing.
//!
//! A [`MemoryLimit`] is the ceiling on the memory cost of a partitioning,
//! expressed in the same abstract units as
//! [`crate::Partition::mem_cost`]. It supports human-readable strings
//! for CLI ergonomics.

use crate::PlannerError;
use std::fmt;

/// A hard ceiling on partitioning memory cost.
///
/// # Parsing
/// Decimal suffixes, case-insensitive, fractional values allowed:
/// - `"500"` → 500
/// - `"2.5K"` → 2 500
/// - `"3M"` → 3 000 000
/// - `"1G"` → 1 000 000 000
///
/// # Examples
/// ```
/// use partition_planner::MemoryLimit;
///
/// let l = MemoryLimit::parse("2.5K").unwrap();
/// assert_eq!(l.value(), 2500.0);
/// assert!(l.admits(2500.0));
/// assert!(!l.admits(2500.5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MemoryLimit {
    value: f64,
}

impl MemoryLimit {
    /// Creates a limit from a positive, finite value.
    pub fn new(value: f64) -> Result<Self, PlannerError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(PlannerError::InvalidLimit(format!(
                "limit must be positive and finite, got {value}"
            )));
        }
        Ok(Self { value })
    }

    /// A limit no partitioning can exceed.
    pub fn unbounded() -> Self {
        Self { value: f64::MAX }
    }

    /// Returns the limit value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Returns `true` if `cost` fits within the limit.
    #[inline]
    pub fn admits(&self, cost: f64) -> bool {
        cost <= self.value
    }

    /// Parses a human-readable limit string.
    pub fn parse(s: &str) -> Result<Self, PlannerError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PlannerError::InvalidLimit("empty limit string".into()));
        }

        let (num_str, multiplier) = match s.chars().last().map(|c| c.to_ascii_uppercase()) {
            Some('K') => (&s[..s.len() - 1], 1e3),
            Some('M') => (&s[..s.len() - 1], 1e6),
            Some('G') => (&s[..s.len() - 1], 1e9),
            _ => (s, 1.0),
        };

        let value: f64 = num_str.trim().parse().map_err(|_| {
            PlannerError::InvalidLimit(format!(
                "'{s}': expected a number followed by an optional suffix (K, M, G)"
            ))
        })?;

        Self::new(value * multiplier)
    }
}

impl fmt::Display for MemoryLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value >= 1e9 && self.value < f64::MAX {
            write!(f, "{}G", self.value / 1e9)
        } else if self.value >= 1e6 && self.value < 1e9 {
            write!(f, "{}M", self.value / 1e6)
        } else if self.value >= 1e3 && self.value < 1e6 {
            write!(f, "{}K", self.value / 1e3)
        } else if self.value == f64::MAX {
            f.write_str("unbounded")
        } else {
            write!(f, "{}", self.value)
        }
    }
}
