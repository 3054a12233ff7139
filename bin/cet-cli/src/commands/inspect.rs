// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `cet-plan inspect` command: display trace structure and limit guidance.
//!
//! Loads the trace and prints its batches, the size of the event graph,
//! the costs of the two extreme partitionings, and the ideal number of
//! partitions at a few limits.

use partition_planner::{CostMode, MemoryLimit, Partition, Partitioning, Walk};
use runtime::{PlannerConfig, PlanningSession};

/// Batches listed before the table is cut short.
const MAX_ROWS: usize = 20;

pub async fn execute(config: PlannerConfig) -> anyhow::Result<()> {
    super::banner("Trace Inspector");

    let loaded = PlanningSession::new(config).load_trace()?;
    let arena = loaded.arena();
    let windows = loaded.windows();

    // ── Summary ────────────────────────────────────────────────
    println!("  {}", loaded.stream_summary());
    println!("  {}", arena.summary());
    println!("  Windows: {}", windows.len());
    println!();

    // ── Per-Second Detail ──────────────────────────────────────
    println!("  {:<8} {:>8} {:>12}", "Second", "Events", "Nodes");
    println!("  {}", "-".repeat(30));
    for batch in arena.batches().iter().take(MAX_ROWS) {
        println!(
            "  {:<8} {:>8} {:>12}",
            batch.second,
            batch.nodes.len(),
            batch.nodes.to_string(),
        );
    }
    if arena.batches().len() > MAX_ROWS {
        println!("  ... {} more seconds", arena.batches().len() - MAX_ROWS);
    }
    println!();

    // ── Extremes ───────────────────────────────────────────────
    let root = Partitioning::unpartitioned(arena)?;
    let finest = Partitioning::minimal(arena)?;
    println!("  Partitioning extremes:");
    println!(
        "   Unpartitioned:  cpu {:>14.2}  mem {:>14.2}",
        root.cpu_cost(windows, CostMode::Root),
        root.mem_cost(windows),
    );
    println!(
        "   Finest ({:>3}):   cpu {:>14.2}  mem {:>14.2}",
        finest.len(),
        finest.cpu_cost(windows, CostMode::Search),
        finest.mem_cost(windows),
    );
    println!();

    // ── Limit Recommendations ──────────────────────────────────
    let whole = Partition::whole(arena)?;
    let top = root.mem_cost(windows).max(1.0);
    let candidates = [top / 100.0, top / 10.0, top / 2.0, top];

    println!("  Ideal partition count by limit:");
    println!("  {:>14} {:>12} {:>12}", "Limit", "Walk down", "Walk up");
    println!("  {}", "-".repeat(40));
    for value in candidates {
        let limit = MemoryLimit::new(value.max(f64::MIN_POSITIVE))?;
        let down = describe(whole.min_required_partitions(limit, Walk::Down));
        let up = describe(whole.min_required_partitions(limit, Walk::Up));
        println!("  {:>14} {:>12} {:>12}", limit.to_string(), down, up);
    }
    println!();

    Ok(())
}

fn describe(result: Result<usize, partition_planner::PlannerError>) -> String {
    match result {
        Ok(0) => "whole".to_string(),
        Ok(k) => k.to_string(),
        Err(_) => "infeasible".to_string(),
    }
}
