// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Subcommand implementations and the helpers they share.

pub mod inspect;
pub mod plan;
pub mod sweep;

use runtime::PlannerConfig;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. `RUST_LOG` wins over `-v` when set.
///
/// Logs go to stderr so that `--json` output on stdout stays parseable.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Reads the config file if one was given, then applies `--trace`.
pub fn load_config(path: Option<&Path>, trace: Option<PathBuf>) -> anyhow::Result<PlannerConfig> {
    let mut config = match path {
        Some(p) => PlannerConfig::from_file(p)?,
        None => PlannerConfig::default(),
    };
    match trace {
        Some(t) => config.trace_path = t,
        None if path.is_none() => {
            anyhow::bail!("no trace given: pass --trace or a --config file with trace_path")
        }
        None => {}
    }
    tracing::debug!("configuration: {config:?}");
    Ok(config)
}

/// Prints the boxed banner every subcommand starts with.
pub(crate) fn banner(title: &str) {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║ {:^52} ║", format!("cet-plan · {title}"));
    println!("╚══════════════════════════════════════════════════════╝");
    println!();
}
