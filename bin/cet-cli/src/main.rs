// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # cet-plan
//!
//! Command-line interface for the event-trend graph partitioner.
//!
//! ## Usage
//! ```bash
//! # Plan one trace under one limit
//! cet-plan plan --trace ./traces/stock.csv --memory-limit 2.5K --strategy branch-and-bound
//!
//! # Sweep limits and strategies
//! cet-plan sweep --trace ./traces/stock.csv --limits 100,1K,10K --strategies bnb,minimal
//!
//! # Inspect a trace
//! cet-plan inspect --trace ./traces/stock.csv
//! ```

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "cet-plan",
    about = "Memory-bounded, CPU-minimal partitioning of event-trend graphs",
    version,
    author
)]
struct Cli {
    /// Path to a TOML configuration file; explicit flags take precedence.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Choose a partitioning for a trace under a memory limit.
    Plan {
        /// Path to the event trace (`second[,payload]` per line).
        #[arg(short, long)]
        trace: Option<PathBuf>,

        /// Memory limit (e.g., "500", "2.5K", "1M").
        #[arg(short = 'l', long)]
        memory_limit: Option<String>,

        /// Strategy: branch-and-bound, unpartitioned, minimal, auto.
        #[arg(short, long)]
        strategy: Option<String>,

        /// Explore the cheapest waiting state first instead of FIFO.
        #[arg(long)]
        best_first: bool,

        /// Print the plan as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Run several strategies across several memory limits.
    Sweep {
        /// Path to the event trace.
        #[arg(short, long)]
        trace: Option<PathBuf>,

        /// Comma-separated memory limits to sweep (e.g., "100,1K,10K").
        #[arg(long)]
        limits: String,

        /// Strategies to compare (comma-separated).
        #[arg(long, default_value = "unpartitioned,minimal,branch-and-bound")]
        strategies: String,
    },

    /// Inspect a trace: batches, graph size and limit recommendations.
    Inspect {
        /// Path to the event trace.
        #[arg(short, long)]
        trace: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging based on verbosity.
    commands::init_tracing(cli.verbose);

    match cli.command {
        Commands::Plan {
            trace,
            memory_limit,
            strategy,
            best_first,
            json,
        } => {
            let mut config = commands::load_config(cli.config.as_deref(), trace)?;
            if let Some(limit) = memory_limit {
                config.memory_limit = limit;
            }
            if let Some(strategy) = strategy {
                config.strategy = strategy;
            }
            if best_first {
                config.frontier_order = partition_planner::FrontierOrder::LowestCpu;
            }
            commands::plan::execute(config, json).await
        }
        Commands::Sweep {
            trace,
            limits,
            strategies,
        } => {
            let config = commands::load_config(cli.config.as_deref(), trace)?;
            commands::sweep::execute(config, limits, strategies).await
        }
        Commands::Inspect { trace } => {
            let config = commands::load_config(cli.config.as_deref(), trace)?;
            commands::inspect::execute(config).await
        }
    }
}
