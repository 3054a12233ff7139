// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The cost model.
//!
//! The number of trends a group of `n` events can form grows like
//! `3^(n/3)`, so both CPU and memory costs carry that factor:
//!
//! ```text
//! cpu(p)  = edges(p) + 3^⌊n/3⌋
//! mem(p)  = n · 3^⌊n/3⌋
//! ideal(n, k) = k · 3^((n/k)/3) · (n/k)        (k > 0)
//!             = 3^(n/3) · n                     (k = 0)
//! ```
//!
//! A partition contained in several windows is shared by them, and its cost
//! is divided by the number of sharers.

/// How the CPU cost of a partitioning is evaluated.
///
/// The variant decides the weight charged for each cut edge, i.e. each edge
/// whose ends fall into two different partitions and whose trends must be
/// reconciled across the boundary. A single-partition partitioning has no
/// cut edges, so both modes agree on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CostMode {
    /// Evaluation of the unpartitioned root graph (mode code 1).
    Root,
    /// Evaluation of a state inside the search (mode code 3).
    Search,
}

impl CostMode {
    /// Returns the numeric mode code.
    pub fn code(self) -> u8 {
        match self {
            Self::Root => 1,
            Self::Search => 3,
        }
    }

    /// Cost charged per cut edge.
    pub fn cut_edge_weight(self) -> f64 {
        f64::from(self.code())
    }
}

/// Scan direction for [`crate::Partition::min_required_partitions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Walk {
    /// Ascending `k`; the first fitting granularity wins.
    Down,
    /// Descending `k`; keeps the last fitting one, stops at the first miss.
    Up,
}

/// `3^⌊n/3⌋`, the trend blow-up factor of a partition with `n` vertices.
#[inline]
pub fn trend_factor(vertex_number: usize) -> f64 {
    let exp = i32::try_from(vertex_number / 3).unwrap_or(i32::MAX);
    3f64.powi(exp)
}

/// Un-shared CPU cost of a partition.
#[inline]
pub fn cpu_cost(vertex_number: usize, edge_number: usize) -> f64 {
    edge_number as f64 + trend_factor(vertex_number)
}

/// Un-shared memory cost of a partition.
#[inline]
pub fn mem_cost(vertex_number: usize) -> f64 {
    vertex_number as f64 * trend_factor(vertex_number)
}

/// Ideal memory cost of carving `vertex_number` events into `k` equal parts.
///
/// `k == 0` means no carving at all.
pub fn ideal_mem_cost(vertex_number: usize, k: usize) -> f64 {
    let n = vertex_number as f64;
    if k == 0 {
        3f64.powf(n / 3.0) * n
    } else {
        let per_part = n / k as f64;
        k as f64 * 3f64.powf(per_part / 3.0) * per_part
    }
}

/// Divides `cost` among `sharers` windows when more than one shares it.
#[inline]
pub fn amortize(cost: f64, sharers: usize) -> f64 {
    if sharers > 1 {
        cost / sharers as f64
    } else {
        cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_trend_factor() {
        assert_eq!(trend_factor(0), 1.0);
        assert_eq!(trend_factor(2), 1.0);
        assert_eq!(trend_factor(3), 3.0);
        assert_eq!(trend_factor(8), 9.0);
        assert_eq!(trend_factor(9), 27.0);
    }

    #[test]
    fn test_cpu_and_mem() {
        assert_eq!(cpu_cost(4, 3), 6.0);
        assert_eq!(mem_cost(4), 12.0);
        assert_eq!(mem_cost(1), 1.0);
        assert_eq!(mem_cost(0), 0.0);
    }

    #[test]
    fn test_ideal_mem_cost() {
        // k = 0 and k = 1 both describe a single part.
        assert!(close(ideal_mem_cost(6, 0), 9.0 * 6.0));
        assert!(close(ideal_mem_cost(6, 1), 9.0 * 6.0));
        // Two parts of three: 2 · 3 · 3.
        assert!(close(ideal_mem_cost(6, 2), 18.0));
        // Six parts of one: 6 · 3^(1/3).
        assert!(close(ideal_mem_cost(6, 6), 6.0 * 3f64.powf(1.0 / 3.0)));
    }

    #[test]
    fn test_ideal_decreases_with_k() {
        let costs: Vec<f64> = (1..=12).map(|k| ideal_mem_cost(12, k)).collect();
        for pair in costs.windows(2) {
            assert!(pair[1] <= pair[0]);
        }
    }

    #[test]
    fn test_amortize() {
        assert_eq!(amortize(12.0, 0), 12.0);
        assert_eq!(amortize(12.0, 1), 12.0);
        assert_eq!(amortize(12.0, 3), 4.0);
    }

    #[test]
    fn test_mode_codes() {
        assert_eq!(CostMode::Root.code(), 1);
        assert_eq!(CostMode::Search.code(), 3);
        assert_eq!(CostMode::Search.cut_edge_weight(), 3.0);
    }
}
