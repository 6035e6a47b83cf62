/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Command-line entry point.
//!
//! `tickmill <policy> <quantum>` runs the workload in `processes.txt`
//! (override with `--workload`) and writes `scheduler.log` and
//! `scheduler.perf` to the working directory.  The metrics file is written
//! even when the run fails, so a partial log always comes with whatever
//! aggregates were collected.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tickmill::config::SimConfig;
use tickmill::memory::BuddyArena;
use tickmill::report::EventLog;
use tickmill::scheduler::{Policy, Scheduler};
use tickmill::workload::load_workload;

#[derive(Debug, Parser)]
#[command(name = "tickmill", version, about = "OS-style process scheduler simulator")]
struct Cli {
    /// Scheduling policy: 1 = HPF, 2 = SRTN, 3 = RR
    policy: u32,

    /// Time quantum in ticks (used by RR, ignored by HPF and SRTN)
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    quantum: u64,

    /// Workload file, one `<id> <arrival> <runtime> <priority> [<memsize>]`
    /// record per line
    #[arg(long, default_value = "processes.txt")]
    workload: PathBuf,

    /// Optional YAML configuration file (arena size, output paths)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let policy = Policy::from_cli_int(cli.policy).with_context(|| {
        format!(
            "unknown policy code {} (valid: 1 = HPF, 2 = SRTN, 3 = RR)",
            cli.policy
        )
    })?;

    let config = SimConfig::load(cli.config.as_deref())?;
    let arena = BuddyArena::new(config.arena_bytes)
        .with_context(|| format!("invalid arena size {}", config.arena_bytes))?;
    let records = load_workload(&cli.workload)?;

    let log_file = File::create(&config.log_path)
        .with_context(|| format!("cannot create event log {}", config.log_path.display()))?;
    let events = EventLog::new(BufWriter::new(log_file));

    let mut scheduler = Scheduler::new(policy, cli.quantum, arena, records, events);
    let outcome = scheduler.run();

    // Metrics go out even on a failed run, then the failure propagates.
    let summary = scheduler.summary();
    let perf_file = File::create(&config.perf_path)
        .with_context(|| format!("cannot create perf file {}", config.perf_path.display()))?;
    summary
        .write_to(BufWriter::new(perf_file))
        .context("cannot write perf file")?;

    outcome.context("scheduler run failed")?;
    info!(
        log = %config.log_path.display(),
        perf = %config.perf_path.display(),
        "run complete"
    );
    Ok(())
}
