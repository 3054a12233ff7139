// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Search statistics for profiling and diagnostics.
//!
//! [`SearchStats`] counts what the branch-and-bound loop did with each
//! state: how many it considered, why it discarded the rest, and how large
//! the frontier grew. These numbers are what to look at when a search is
//! slow or a memory limit looks too tight.

/// Cumulative counters for one search run.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct SearchStats {
    /// States popped from the frontier and evaluated.
    pub considered: u64,
    /// States whose memory cost exceeded the limit.
    pub pruned_by_memory: u64,
    /// States whose CPU cost exceeded the current bound.
    pub pruned_by_cpu: u64,
    /// Children not enqueued because an equal state was already waiting.
    pub duplicates_suppressed: u64,
    /// Children pushed onto the frontier.
    pub enqueued: u64,
    /// Times the best solution was replaced.
    pub improved: u64,
    /// Largest frontier size observed.
    pub peak_frontier: usize,
}

impl SearchStats {
    /// Fraction of considered states that were pruned for any reason.
    ///
    /// A state over both limits counts once per reason, so the value can
    /// exceed `1.0` on pathological inputs. Returns `0.0` before any state
    /// is considered.
    pub fn prune_ratio(&self) -> f64 {
        if self.considered == 0 {
            return 0.0;
        }
        (self.pruned_by_memory + self.pruned_by_cpu) as f64 / self.considered as f64
    }

    pub(crate) fn record_considered(&mut self) {
        self.considered += 1;
    }

    pub(crate) fn record_memory_prune(&mut self) {
        self.pruned_by_memory += 1;
    }

    pub(crate) fn record_cpu_prune(&mut self) {
        self.pruned_by_cpu += 1;
    }

    pub(crate) fn record_duplicate(&mut self) {
        self.duplicates_suppressed += 1;
    }

    pub(crate) fn record_enqueued(&mut self) {
        self.enqueued += 1;
    }

    pub(crate) fn record_improvement(&mut self) {
        self.improved += 1;
    }

    /// Updates the frontier high-water mark if needed.
    pub(crate) fn update_peak_frontier(&mut self, size: usize) {
        if size > self.peak_frontier {
            self.peak_frontier = size;
        }
    }

    /// Returns a human-readable summary.
    pub fn summary(&self) -> String {
        format!(
            "Search: {} considered, {} pruned by memory, {} pruned by cpu \
             ({:.0}% pruned), {} duplicates, {} enqueued, {} improvements, \
             peak frontier {}",
            self.considered,
            self.pruned_by_memory,
            self.pruned_by_cpu,
            self.prune_ratio() * 100.0,
            self.duplicates_suppressed,
            self.enqueued,
            self.improved,
            self.peak_frontier,
        )
    }
}
