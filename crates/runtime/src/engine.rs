// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The planning session with a type-state–enforced pipeline.
//!
//! ```text
//! PlanningSession<Idle>
//!     │  .load_trace()
//!     ▼
//! PlanningSession<Loaded>
//!     │  .prepare()
//!     ▼
//! PlanningSession<Ready>
//!     │  .run()
//!     ▼
//!   PlanningOutput
//! ```
//!
//! Each state transition consumes the old value and returns a new one,
//! making invalid state sequences a compile error. The state markers carry
//! what their stage produced, so later stages never look up missing data.

use crate::{PlannerConfig, PlanningMetrics, RuntimeError};
use event_graph::{stream::Validated, EventStream, NodeArena};
use partition_planner::{MemoryLimit, PartitionPlan, PartitionStrategy, SearchOutcome, WindowSet};
use std::sync::Arc;
use std::time::{Duration, Instant};

// ── Type-state markers ─────────────────────────────────────────

/// Session is created but no trace is loaded.
#[derive(Debug)]
pub struct Idle;

/// Trace is loaded: the arena and window set exist.
#[derive(Debug, Clone)]
pub struct Loaded {
    arena: Arc<NodeArena>,
    windows: Arc<WindowSet>,
    stream_summary: String,
    load_duration: Duration,
}

/// A limit and a strategy are chosen; the session can run.
pub struct Ready {
    loaded: Loaded,
    limit: MemoryLimit,
    strategy: Arc<dyn PartitionStrategy>,
}

impl std::fmt::Debug for Ready {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ready")
            .field("limit", &self.limit)
            .field("strategy", &self.strategy.name())
            .finish()
    }
}

/// Sealed trait for session states.
pub trait SessionState: std::fmt::Debug {}
impl SessionState for Idle {}
impl SessionState for Loaded {}
impl SessionState for Ready {}

// ── Planning output ────────────────────────────────────────────

/// The result of a planning run.
#[derive(Debug)]
pub struct PlanningOutput {
    /// The strategy's partitioning with its costs and counters.
    pub outcome: SearchOutcome,
    /// The reportable form of `outcome`.
    pub plan: PartitionPlan,
    /// Timing and throughput.
    pub metrics: PlanningMetrics,
}

// ── Session ────────────────────────────────────────────────────

/// The primary planning session.
///
/// `S` is a type-state marker that enforces the pipeline ordering at
/// compile time.
///
/// # Example
/// ```no_run
/// use runtime::{PlannerConfig, PlanningSession};
///
/// # async fn example() -> Result<(), runtime::RuntimeError> {
/// let session = PlanningSession::new(PlannerConfig::default())
///     .load_trace()?
///     .prepare()?;
/// let output = session.run().await?;
/// println!("{}", output.plan.summary());
/// # Ok(())
/// # }
/// ```
pub struct PlanningSession<S: SessionState = Idle> {
    config: PlannerConfig,
    state: S,
}

// ── Idle → Loaded ──────────────────────────────────────────────

impl PlanningSession<Idle> {
    /// Creates a new session from the given configuration.
    pub fn new(config: PlannerConfig) -> Self {
        tracing::info!("session created with strategy '{}'", config.strategy);
        Self {
            config,
            state: Idle,
        }
    }

    /// Reads the configured trace and builds the arena and windows.
    /// Transitions to the `Loaded` state.
    pub fn load_trace(self) -> Result<PlanningSession<Loaded>, RuntimeError> {
        let start = Instant::now();
        let stream = EventStream::load(&self.config.trace_path)?;
        let mut session = Self::from_stream(self.config, &stream)?;
        session.state.load_duration = start.elapsed();
        Ok(session)
    }

    /// Convenience: builds a loaded session from an in-memory stream.
    pub fn from_stream(
        config: PlannerConfig,
        stream: &EventStream<Validated>,
    ) -> Result<PlanningSession<Loaded>, RuntimeError> {
        let start = Instant::now();
        tracing::info!("{}", stream.summary());

        let windows = config.window_set(stream.first_second(), stream.last_second())?;
        if !windows.is_empty() {
            tracing::info!("{} sliding windows", windows.len());
        }
        let arena = NodeArena::build(stream);
        tracing::info!("{}", arena.summary());

        Ok(PlanningSession {
            config,
            state: Loaded {
                arena: Arc::new(arena),
                windows: Arc::new(windows),
                stream_summary: stream.summary(),
                load_duration: start.elapsed(),
            },
        })
    }
}

// ── Loaded → Ready ─────────────────────────────────────────────

impl PlanningSession<Loaded> {
    /// Returns the node arena of the loaded trace.
    pub fn arena(&self) -> &NodeArena {
        &self.state.arena
    }

    /// Returns the window set costs are evaluated against.
    pub fn windows(&self) -> &WindowSet {
        &self.state.windows
    }

    /// Returns the summary line of the loaded stream.
    pub fn stream_summary(&self) -> &str {
        &self.state.stream_summary
    }

    /// Resolves the configured limit and strategy.
    /// Transitions to the `Ready` state.
    pub fn prepare(self) -> Result<PlanningSession<Ready>, RuntimeError> {
        let limit = self.config.parse_limit()?;
        let strategy = self.config.create_strategy()?;
        tracing::info!("memory limit {limit}, strategy '{}'", strategy.name());

        Ok(PlanningSession {
            config: self.config,
            state: Ready {
                loaded: self.state,
                limit,
                strategy: Arc::from(strategy),
            },
        })
    }

    /// Prepares a run with an explicit limit and strategy, keeping this
    /// session for further runs over the same trace.
    pub fn prepare_with(
        &self,
        limit: MemoryLimit,
        strategy: Box<dyn PartitionStrategy>,
    ) -> PlanningSession<Ready> {
        PlanningSession {
            config: self.config.clone(),
            state: Ready {
                loaded: self.state.clone(),
                limit,
                strategy: Arc::from(strategy),
            },
        }
    }
}

// ── Ready: run the strategy ────────────────────────────────────

impl PlanningSession<Ready> {
    pub fn limit(&self) -> MemoryLimit {
        self.state.limit
    }

    pub fn strategy_name(&self) -> &str {
        self.state.strategy.name()
    }

    pub fn arena(&self) -> &NodeArena {
        &self.state.loaded.arena
    }

    /// Runs the strategy and turns its outcome into a validated plan.
    ///
    /// The search is CPU-bound and single-threaded, so it runs on the
    /// blocking pool rather than on an async worker.
    pub async fn run(&self) -> Result<PlanningOutput, RuntimeError> {
        let run_start = Instant::now();
        let loaded = &self.state.loaded;
        let limit = self.state.limit;
        let mut metrics = PlanningMetrics::new(
            self.strategy_name(),
            loaded.arena.len(),
            loaded.load_duration,
        );

        tracing::debug!(
            "starting '{}': {} events, limit {}",
            self.strategy_name(),
            loaded.arena.len(),
            limit,
        );

        let arena = Arc::clone(&loaded.arena);
        let windows = Arc::clone(&loaded.windows);
        let strategy = Arc::clone(&self.state.strategy);
        let (outcome, search_duration) = tokio::task::spawn_blocking(move || {
            let start = Instant::now();
            let outcome = strategy.plan(&arena, &windows, limit);
            (outcome, start.elapsed())
        })
        .await
        .map_err(|e| RuntimeError::TaskFailed(e.to_string()))?;
        let outcome = outcome?;

        let plan =
            PartitionPlan::from_outcome(self.strategy_name(), &outcome, &loaded.windows, limit);
        plan.validate()
            .map_err(|e| RuntimeError::InvalidPlan(format!("plan validation failed: {e}")))?;
        tracing::info!("{}", plan.summary());
        if !outcome.is_feasible() {
            tracing::warn!(
                "best-effort plan: memory {:.2} exceeds limit {}",
                outcome.solution_mem,
                limit,
            );
        }

        metrics.record_search(
            search_duration,
            outcome.solution.len(),
            outcome.stats.considered,
        );
        metrics.finalise(run_start.elapsed());
        tracing::info!("{}", metrics.summary());

        Ok(PlanningOutput {
            outcome,
            plan,
            metrics,
        })
    }
}

impl<S: SessionState> std::fmt::Debug for PlanningSession<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlanningSession")
            .field("state", &std::any::type_name::<S>())
            .field("strategy", &self.config.strategy)
            .field("trace", &self.config.trace_path)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WindowConfig;
    use partition_planner::{Feasibility, MinimalPartitions};
    use std::io::Write;

    fn stream(seconds: &[u32]) -> EventStream<Validated> {
        EventStream::from_seconds("test", seconds).validate().unwrap()
    }

    fn config(limit: &str, strategy: &str) -> PlannerConfig {
        PlannerConfig {
            memory_limit: limit.into(),
            strategy: strategy.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_idle_to_loaded() {
        let session =
            PlanningSession::from_stream(PlannerConfig::default(), &stream(&[1, 1, 2, 3])).unwrap();
        assert_eq!(session.arena().len(), 4);
        assert!(session.windows().is_empty());
        assert!(session.stream_summary().contains("4 events"));
    }

    #[test]
    fn test_loaded_with_windows() {
        let c = PlannerConfig {
            windows: Some(WindowConfig { length: 2, slide: 1 }),
            ..Default::default()
        };
        let session = PlanningSession::from_stream(c, &stream(&[1, 2, 3])).unwrap();
        assert_eq!(session.windows().len(), 3);
    }

    #[test]
    fn test_loaded_to_ready() {
        let ready = PlanningSession::from_stream(config("11", "bnb"), &stream(&[1, 1, 2, 3]))
            .unwrap()
            .prepare()
            .unwrap();
        assert_eq!(ready.limit().value(), 11.0);
        assert_eq!(ready.strategy_name(), "branch-and-bound");
    }

    #[test]
    fn test_prepare_rejects_bad_config() {
        let loaded = PlanningSession::from_stream(config("oops", "bnb"), &stream(&[1])).unwrap();
        assert!(loaded.prepare().is_err());
        let loaded = PlanningSession::from_stream(config("10", "nope"), &stream(&[1])).unwrap();
        assert!(loaded.prepare().is_err());
    }

    #[tokio::test]
    async fn test_full_pipeline() {
        let session = PlanningSession::from_stream(config("11", "bnb"), &stream(&[1, 1, 2, 3]))
            .unwrap()
            .prepare()
            .unwrap();
        let output = session.run().await.unwrap();

        assert_eq!(output.plan.num_partitions(), 2);
        assert_eq!(output.plan.total_cpu, 9.0);
        assert_eq!(output.plan.total_mem, 10.0);
        assert_eq!(output.outcome.feasibility, Feasibility::Feasible);
        assert_eq!(output.metrics.num_events, 4);
        assert_eq!(output.metrics.num_partitions, 2);
        assert!(output.metrics.states_considered >= 3);
    }

    #[tokio::test]
    async fn test_best_effort_plan_still_valid() {
        let session = PlanningSession::from_stream(config("3", "bnb"), &stream(&[1, 1, 2, 3]))
            .unwrap()
            .prepare()
            .unwrap();
        let output = session.run().await.unwrap();
        assert_eq!(output.plan.feasibility, Feasibility::BestEffort);
        assert_eq!(output.plan.num_partitions(), 1);
    }

    #[tokio::test]
    async fn test_auto_infeasible_is_error() {
        let session = PlanningSession::from_stream(config("3", "auto"), &stream(&[1, 1, 2, 3]))
            .unwrap()
            .prepare()
            .unwrap();
        assert!(matches!(
            session.run().await,
            Err(RuntimeError::PlannerError(_))
        ));
    }

    #[tokio::test]
    async fn test_prepare_with_reuses_trace() {
        let loaded =
            PlanningSession::from_stream(PlannerConfig::default(), &stream(&[1, 1, 2, 3])).unwrap();
        for value in [5.0, 11.0, 100.0] {
            let ready = loaded.prepare_with(
                MemoryLimit::new(value).unwrap(),
                Box::new(MinimalPartitions::new()),
            );
            let output = ready.run().await.unwrap();
            assert_eq!(output.plan.num_partitions(), 3);
        }
    }

    #[tokio::test]
    async fn test_load_trace_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# second,payload").unwrap();
        writeln!(file, "1,a").unwrap();
        writeln!(file, "1,b").unwrap();
        writeln!(file, "2,c").unwrap();
        writeln!(file, "3,d").unwrap();

        let c = PlannerConfig {
            trace_path: file.path().to_path_buf(),
            memory_limit: "100".into(),
            ..Default::default()
        };
        let output = PlanningSession::new(c)
            .load_trace()
            .unwrap()
            .prepare()
            .unwrap()
            .run()
            .await
            .unwrap();
        assert_eq!(output.plan.num_partitions(), 1);
        assert_eq!(output.plan.total_cpu, 6.0);
    }

    #[test]
    fn test_load_trace_missing_file() {
        let c = PlannerConfig {
            trace_path: "/nonexistent/trace.csv".into(),
            ..Default::default()
        };
        assert!(matches!(
            PlanningSession::new(c).load_trace(),
            Err(RuntimeError::GraphError(_))
        ));
    }

    #[test]
    fn test_debug_format() {
        let session = PlanningSession::new(PlannerConfig::default());
        let debug = format!("{session:?}");
        assert!(debug.contains("PlanningSession"));
        assert!(debug.contains("branch-and-bound"));
    }
}
