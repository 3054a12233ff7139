// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `cet-plan sweep` command: sweep across memory limits and strategies.
//!
//! Loads the trace once and prints a comparison table showing partitions,
//! costs, feasibility and search time for each combination.

use partition_planner::{Feasibility, MemoryLimit};
use runtime::{strategy_by_name, PlannerConfig, PlanningSession};

pub async fn execute(
    config: PlannerConfig,
    limits_str: String,
    strategies_str: String,
) -> anyhow::Result<()> {
    super::banner("Limit Sweep");

    // Parse comma-separated memory limits.
    let limits: Vec<MemoryLimit> = limits_str
        .split(',')
        .map(|s| {
            MemoryLimit::parse(s.trim())
                .map_err(|e| anyhow::anyhow!("invalid limit '{}': {e}", s.trim()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    // Parse comma-separated strategy names.
    let strategy_names: Vec<&str> = strategies_str.split(',').map(|s| s.trim()).collect();

    println!(
        "  Limits:     {:?}",
        limits.iter().map(|l| l.to_string()).collect::<Vec<_>>(),
    );
    println!("  Strategies: {strategy_names:?}");
    println!();

    let frontier_order = config.frontier_order;
    let bound_seeding = config.bound_seeding;
    let loaded = PlanningSession::new(config).load_trace()?;
    println!("  {}", loaded.stream_summary());
    println!();

    // ── Results Table ──────────────────────────────────────────
    println!(
        "  {:<18} {:>10} {:>11} {:>12} {:>12} {:>11} {:>10}",
        "Strategy", "Limit", "Partitions", "CPU", "Memory", "Feasible", "Search",
    );
    println!("  {}", "-".repeat(90));

    let mut results: Vec<SweepResult> = Vec::new();

    for &limit in &limits {
        for &name in &strategy_names {
            let strategy = match strategy_by_name(name, frontier_order, bound_seeding) {
                Ok(s) => s,
                Err(e) => {
                    println!("  {name:<18} {:>10}     FAILED: {e}", limit.to_string());
                    continue;
                }
            };

            match loaded.prepare_with(limit, strategy).run().await {
                Ok(output) => {
                    let r = SweepResult {
                        strategy: output.plan.strategy_name.clone(),
                        limit,
                        partitions: output.plan.num_partitions(),
                        cpu: output.plan.total_cpu,
                        mem: output.plan.total_mem,
                        feasible: output.plan.feasibility == Feasibility::Feasible,
                        search_ms: output.metrics.search_duration.as_secs_f64() * 1000.0,
                    };
                    println!(
                        "  {:<18} {:>10} {:>11} {:>12.2} {:>12.2} {:>11} {:>8.2}ms",
                        r.strategy,
                        r.limit.to_string(),
                        r.partitions,
                        r.cpu,
                        r.mem,
                        if r.feasible { "yes" } else { "no" },
                        r.search_ms,
                    );
                    results.push(r);
                }
                Err(e) => {
                    println!("  {name:<18} {:>10}     FAILED: {e}", limit.to_string());
                }
            }
        }
    }

    println!();

    // ── Summary ────────────────────────────────────────────────
    if results.is_empty() {
        println!("  No successful runs.");
        return Ok(());
    }

    println!("  Cheapest feasible plan per limit:");
    for &limit in &limits {
        let best = results
            .iter()
            .filter(|r| r.limit == limit && r.feasible)
            .min_by(|a, b| a.cpu.total_cmp(&b.cpu));
        match best {
            Some(r) => println!(
                "   {:>10}: {} ({} partitions, cpu {:.2})",
                limit.to_string(),
                r.strategy,
                r.partitions,
                r.cpu,
            ),
            None => println!("   {:>10}: none", limit.to_string()),
        }
    }
    println!();

    Ok(())
}

#[derive(Debug)]
struct SweepResult {
    strategy: String,
    limit: MemoryLimit,
    partitions: usize,
    cpu: f64,
    mem: f64,
    feasible: bool,
    search_ms: f64,
}
