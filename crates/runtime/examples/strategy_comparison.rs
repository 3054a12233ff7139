// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Example: Compare partitioning strategies on a synthetic trace.
//!
//! Different strategies land on different points of the CPU/memory
//! trade-off; branch and bound finds the CPU-cheapest one under each
//! limit.
//!
//! ```bash
//! cargo run -p runtime --example strategy_comparison
//! ```

use event_graph::{stream::Validated, EventStream, GraphError};
use partition_planner::{
    BranchAndBound, MemoryLimit, MinimalPartitions, PartitionStrategy, Unpartitioned,
};
use runtime::{PlannerConfig, PlanningSession};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialise tracing.
    tracing_subscriber::fmt().with_env_filter("warn").init();

    // Twelve seconds with one to three events each.
    let stream = build_stream("synthetic", 12)?;
    println!("Trace: {}\n", stream.summary());

    let strategies: Vec<Box<dyn PartitionStrategy>> = vec![
        Box::new(Unpartitioned::new()),
        Box::new(MinimalPartitions::new()),
        Box::new(BranchAndBound::default()),
    ];

    let limits = [
        MemoryLimit::new(200.0)?,
        MemoryLimit::new(2_000.0)?,
        MemoryLimit::new(1_000_000.0)?,
    ];

    let session = PlanningSession::from_stream(PlannerConfig::default(), &stream)?;

    println!(
        "{:<18} {:>10} {:>11} {:>12} {:>12} {:>12}",
        "Strategy", "Limit", "Partitions", "CPU", "Memory", "Feasibility",
    );
    println!("{}", "-".repeat(80));

    let rt = tokio::runtime::Runtime::new()?;
    for strategy in &strategies {
        for limit in &limits {
            let outcome = strategy.plan(session.arena(), session.windows(), *limit)?;
            println!(
                "{:<18} {:>10} {:>11} {:>12.2} {:>12.2} {:>12}",
                strategy.name(),
                limit.to_string(),
                outcome.solution.len(),
                outcome.solution_cpu,
                outcome.solution_mem,
                format!("{:?}", outcome.feasibility),
            );
        }
    }

    println!("\n--- Full session with branch-and-bound @ 2K ---\n");
    let ready = session.prepare_with(MemoryLimit::new(2_000.0)?, Box::new(BranchAndBound::default()));
    let output = rt.block_on(ready.run())?;
    println!("Plan: {}", output.plan.summary());
    println!("{}", output.outcome.stats.summary());
    println!("Metrics: {}", output.metrics.summary());

    Ok(())
}

fn build_stream(name: &str, seconds: u32) -> Result<EventStream<Validated>, GraphError> {
    let times: Vec<u32> = (0..seconds)
        .flat_map(|s| std::iter::repeat(s).take((s as usize * 7) % 3 + 1))
        .collect();
    EventStream::from_seconds(name, &times).validate()
}
