/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Event logging and end-of-run metrics.
//!
//! Two artefacts leave the simulator:
//!
//! * `scheduler.log` — one line per job transition, append-only within a run:
//!   ```text
//!   At time 5 process 2 started arr 1 total 3 remain 3 wait 4
//!   At time 8 process 2 finished arr 1 total 3 remain 0 wait 4 TA 7 WTA 2.33
//!   ```
//! * `scheduler.perf` — four aggregate lines written once at end of run.
//!
//! Both writers are generic over `io::Write`, so the binary hands them files
//! and the tests hand them byte buffers.  The WTA standard deviation uses the
//! population formula (divide by N, not N − 1).

use std::io::{self, Write};

use crate::clock::Tick;
use crate::job::Job;

// ── Events ────────────────────────────────────────────────────────────────────

/// Job transition recorded in the event log.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// First dispatch of the job.
    Started,
    /// Re-dispatch after having been stopped.
    Resumed,
    /// Lost the CPU (preemption or quantum rotation).
    Stopped,
    /// Completed; carries turnaround and weighted turnaround.
    Finished { ta: u64, wta: f64 },
}

impl Event {
    fn name(&self) -> &'static str {
        match self {
            Event::Started => "started",
            Event::Resumed => "resumed",
            Event::Stopped => "stopped",
            Event::Finished { .. } => "finished",
        }
    }
}

// ── Event log ─────────────────────────────────────────────────────────────────

/// Append-only transition log.
#[derive(Debug)]
pub struct EventLog<W: Write> {
    out: W,
}

impl<W: Write> EventLog<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Write one transition line.
    ///
    /// `remaining` is passed in rather than derived because the meaningful
    /// bound differs per transition (current tick for a stop, zero for a
    /// finish).
    pub fn record(
        &mut self,
        now: Tick,
        job: &Job,
        event: Event,
        remaining: u64,
    ) -> io::Result<()> {
        write!(
            self.out,
            "At time {} process {} {} arr {} total {} remain {} wait {}",
            now,
            job.file_id,
            event.name(),
            job.arrival,
            job.burst,
            remaining,
            job.waited,
        )?;
        if let Event::Finished { ta, wta } = event {
            write!(self.out, " TA {ta} WTA {wta:.2}")?;
        }
        writeln!(self.out)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    /// Consume the log and hand back the writer (tests read the buffer).
    pub fn into_inner(self) -> W {
        self.out
    }
}

// ── Metrics ───────────────────────────────────────────────────────────────────

/// Accumulates per-completion figures for the end-of-run summary.
#[derive(Debug, Default)]
pub struct Metrics {
    total_running: u64,
    total_waited: u64,
    wta_samples: Vec<f64>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one finished job into the totals.
    pub fn on_finish(&mut self, burst: u64, waited: u64, wta: f64) {
        self.total_running += burst;
        self.total_waited += waited;
        self.wta_samples.push(wta);
    }

    pub fn finished_count(&self) -> usize {
        self.wta_samples.len()
    }

    /// Aggregate the run into a [`PerfSummary`].
    ///
    /// `final_tick` is the clock value at termination; a zero-length run
    /// reports zero utilisation instead of dividing by zero.
    pub fn summary(&self, final_tick: Tick) -> PerfSummary {
        let n = self.wta_samples.len();
        let cpu_utilization = if final_tick == 0 {
            0.0
        } else {
            self.total_running as f64 / final_tick as f64 * 100.0
        };
        let (avg_wta, std_wta) = if n == 0 {
            (0.0, 0.0)
        } else {
            let mean = self.wta_samples.iter().sum::<f64>() / n as f64;
            let variance = self
                .wta_samples
                .iter()
                .map(|w| (w - mean) * (w - mean))
                .sum::<f64>()
                / n as f64;
            (mean, variance.sqrt())
        };
        let avg_waiting = if n == 0 {
            0.0
        } else {
            self.total_waited as f64 / n as f64
        };
        PerfSummary {
            cpu_utilization,
            avg_wta,
            avg_waiting,
            std_wta,
        }
    }
}

/// End-of-run aggregate figures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerfSummary {
    /// Σ running ticks / final tick, as a percentage.
    pub cpu_utilization: f64,
    pub avg_wta: f64,
    pub avg_waiting: f64,
    /// Population standard deviation of the WTA samples.
    pub std_wta: f64,
}

impl PerfSummary {
    /// Write the four `scheduler.perf` lines, two decimal places each.
    pub fn write_to(&self, mut out: impl Write) -> io::Result<()> {
        writeln!(out, "CPU utilization = {:.2}%", self.cpu_utilization)?;
        writeln!(out, "Avg WTA = {:.2}", self.avg_wta)?;
        writeln!(out, "Avg Waiting = {:.2}", self.avg_waiting)?;
        writeln!(out, "STD WTA = {:.2}", self.std_wta)?;
        out.flush()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
