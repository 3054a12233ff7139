// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Planning profiling metrics.
//!
//! [`PlanningMetrics`] collects timing and throughput for one session:
//! how long the trace took to load, how long the search ran and how many
//! states it got through. These are the numbers to compare strategies on.

use std::time::Duration;

/// Aggregate metrics for a planning run.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PlanningMetrics {
    /// Strategy that ran.
    pub strategy_name: String,
    /// Time spent reading the trace and building the arena.
    pub load_duration: Duration,
    /// Time spent inside the strategy.
    pub search_duration: Duration,
    /// Wall-clock time of the run, including task hand-off and reporting.
    pub total_duration: Duration,
    /// Events in the trace.
    pub num_events: usize,
    /// Partitions in the chosen plan.
    pub num_partitions: usize,
    /// States the strategy evaluated.
    pub states_considered: u64,
}

impl PlanningMetrics {
    /// Creates an empty metrics container.
    pub fn new(strategy_name: &str, num_events: usize, load_duration: Duration) -> Self {
        Self {
            strategy_name: strategy_name.to_string(),
            load_duration,
            search_duration: Duration::ZERO,
            total_duration: Duration::ZERO,
            num_events,
            num_partitions: 0,
            states_considered: 0,
        }
    }

    /// Records the search phase.
    pub fn record_search(&mut self, duration: Duration, partitions: usize, considered: u64) {
        self.search_duration = duration;
        self.num_partitions = partitions;
        self.states_considered = considered;
    }

    /// Finalises metrics with the total wall-clock time.
    pub fn finalise(&mut self, total: Duration) {
        self.total_duration = total;
    }

    /// Returns evaluated states per second of search time.
    pub fn states_per_second(&self) -> f64 {
        let secs = self.search_duration.as_secs_f64();
        if secs <= 0.0 || self.states_considered == 0 {
            return 0.0;
        }
        self.states_considered as f64 / secs
    }

    /// Returns a human-readable summary suitable for CLI output.
    pub fn summary(&self) -> String {
        format!(
            "Planning '{}': {:.2}ms total, {:.2}ms load, {:.2}ms search, \
             {} events → {} partitions, {} states ({:.0} states/s)",
            self.strategy_name,
            self.total_duration.as_secs_f64() * 1000.0,
            self.load_duration.as_secs_f64() * 1000.0,
            self.search_duration.as_secs_f64() * 1000.0,
            self.num_events,
            self.num_partitions,
            self.states_considered,
            self.states_per_second(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_metrics() {
        let m = PlanningMetrics::new("bnb", 10, Duration::ZERO);
        assert_eq!(m.states_per_second(), 0.0);
        assert_eq!(m.num_events, 10);
        assert_eq!(m.num_partitions, 0);
    }

    #[test]
    fn test_record_and_finalise() {
        let mut m = PlanningMetrics::new("bnb", 4, Duration::from_millis(2));
        m.record_search(Duration::from_millis(500), 2, 100);
        m.finalise(Duration::from_millis(510));

        assert_eq!(m.num_partitions, 2);
        assert_eq!(m.states_considered, 100);
        assert_eq!(m.total_duration, Duration::from_millis(510));
        assert!((m.states_per_second() - 200.0).abs() < 0.01);
    }

    #[test]
    fn test_summary_format() {
        let mut m = PlanningMetrics::new("minimal", 4, Duration::from_millis(1));
        m.record_search(Duration::from_millis(3), 3, 1);
        m.finalise(Duration::from_millis(5));

        let s = m.summary();
        assert!(s.contains("Planning 'minimal'"));
        assert!(s.contains("4 events → 3 partitions"));
        assert!(s.contains("1 states"));
    }
}
