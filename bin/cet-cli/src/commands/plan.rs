// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `cet-plan plan` command: choose a partitioning for one trace.
//!
//! Demonstrates the full type-state pipeline:
//! ```text
//! PlanningSession<Idle> → load_trace → <Loaded> → prepare → <Ready> → run
//! ```

use runtime::{PlannerConfig, PlanningOutput, PlanningSession};

pub async fn execute(config: PlannerConfig, json: bool) -> anyhow::Result<()> {
    if !json {
        super::banner("Partition Planner");
        println!("  Config:");
        println!("   Trace:    {}", config.trace_path.display());
        println!("   Limit:    {}", config.memory_limit);
        println!("   Strategy: {}", config.strategy);
        if let Some(w) = config.windows {
            println!("   Windows:  length {} slide {}", w.length, w.slide);
        }
        println!();
    }

    // Step 1: Idle → Loaded (read trace, build arena and windows).
    let loaded = PlanningSession::new(config).load_trace()?;
    if !json {
        println!("  [1/3] {}", loaded.stream_summary());
        println!("        {}", loaded.arena().summary());
        println!();
    }

    // Step 2: Loaded → Ready (resolve limit and strategy).
    let ready = loaded.prepare()?;
    if !json {
        println!(
            "  [2/3] Strategy '{}' under limit {}",
            ready.strategy_name(),
            ready.limit()
        );
        println!();
        println!("  [3/3] Searching...");
        println!();
    }

    // Step 3: Ready → run.
    let output = ready.run().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&output.plan)?);
    } else {
        print_results(&output);
    }
    Ok(())
}

fn print_results(output: &PlanningOutput) {
    let plan = &output.plan;
    println!(
        "  {:<4} {:>8} {:>8} {:>8} {:>8} {:>12} {:>12} {:>8}",
        "Idx", "Start", "End", "Events", "Edges", "CPU", "Memory", "Shared",
    );
    println!("  {}", "-".repeat(78));
    for row in &plan.rows {
        println!(
            "  {:<4} {:>8} {:>8} {:>8} {:>8} {:>12.2} {:>12.2} {:>8}",
            row.index, row.start, row.end, row.vertices, row.edges, row.cpu, row.mem, row.sharing,
        );
    }
    println!();
    println!("  Plan:");
    println!("   {}", plan.summary());
    println!();
    println!("  Search:");
    println!("   {}", plan.stats.summary());
    println!();
    println!("  Metrics:");
    println!("   {}", output.metrics.summary());
    println!();
    if !output.outcome.is_feasible() {
        println!("  Note: no partitioning fits the limit; showing the unpartitioned graph.");
        println!();
    }
}
