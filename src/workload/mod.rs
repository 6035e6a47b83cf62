/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Workload file parsing and the producer side of the intake channel.
//!
//! The workload file is ASCII, one record per line:
//!
//! ```text
//! # id  arrival  runtime  priority  [memsize]
//! 1     0        5        3         64
//! 2     1        3        1         64
//! ```
//!
//! Lines starting with `#` and blank lines are skipped.  The optional fifth
//! field is the memory footprint in bytes; a missing value means the job
//! needs no memory and bypasses admission.  Records need not be sorted by
//! arrival.
//!
//! The [`Producer`] owns the parsed records, stably ordered by arrival, and
//! feeds them to the scheduler over a crossbeam channel: one
//! [`IntakeMsg::Arrival`] per job at the logical tick of its arrival,
//! followed by a single [`IntakeMsg::Exhausted`] once the workload is empty.
//! The scheduler drains the channel non-blockingly at the top of each loop
//! iteration, so delivery order is the only contract the producer has to
//! keep.

use std::collections::VecDeque;
use std::io::BufRead;
use std::path::Path;

use crossbeam_channel::Sender;
use thiserror::Error;
use tracing::debug;

use crate::clock::Tick;

// ── Records and messages ──────────────────────────────────────────────────────

/// One parsed workload record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRecord {
    pub id: i64,
    pub arrival: Tick,
    pub runtime: u64,
    pub priority: i64,
    /// Memory footprint in bytes; `0` when the optional field is absent.
    pub memsize: u64,
}

/// Message sent from the producer to the scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntakeMsg {
    /// A job has arrived at its logical tick.
    Arrival(JobRecord),
    /// The workload is exhausted; no further arrivals will be sent.
    Exhausted,
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum WorkloadError {
    #[error("cannot open workload file '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("workload line {line_no}: malformed record '{line}'")]
    MalformedRecord { line_no: usize, line: String },
}

// ── Parsing ───────────────────────────────────────────────────────────────────

/// Parse workload records from a reader, in file order.
pub fn parse_workload(reader: impl BufRead) -> Result<Vec<JobRecord>, WorkloadError> {
    let mut records = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|source| WorkloadError::Io {
            path: String::from("<reader>"),
            source,
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        records.push(parse_record(trimmed).ok_or_else(|| WorkloadError::MalformedRecord {
            line_no,
            line: trimmed.to_string(),
        })?);
    }
    Ok(records)
}

/// Read and parse a workload file.
pub fn load_workload(path: &Path) -> Result<Vec<JobRecord>, WorkloadError> {
    let file = std::fs::File::open(path).map_err(|source| WorkloadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_workload(std::io::BufReader::new(file))
}

fn parse_record(line: &str) -> Option<JobRecord> {
    let mut fields = line.split_whitespace();
    let id = fields.next()?.parse().ok()?;
    let arrival = fields.next()?.parse().ok()?;
    let runtime = fields.next()?.parse().ok()?;
    let priority = fields.next()?.parse().ok()?;
    let memsize = match fields.next() {
        Some(f) => f.parse().ok()?,
        None => 0,
    };
    if fields.next().is_some() {
        return None;
    }
    Some(JobRecord {
        id,
        arrival,
        runtime,
        priority,
        memsize,
    })
}

// ── Producer ──────────────────────────────────────────────────────────────────

/// Delivers workload records to the scheduler at their arrival ticks.
#[derive(Debug)]
pub struct Producer {
    /// Pending records, stably sorted by arrival (file order within a tick).
    pending: VecDeque<JobRecord>,
    exhausted_sent: bool,
}

impl Producer {
    pub fn new(mut records: Vec<JobRecord>) -> Self {
        records.sort_by_key(|r| r.arrival);
        Self {
            pending: records.into(),
            exhausted_sent: false,
        }
    }

    /// Send every record whose arrival tick is ≤ `now`, then `Exhausted`
    /// once nothing is left.
    ///
    /// Sending on a disconnected channel is ignored — the scheduler has shut
    /// down and nobody is listening.
    pub fn deliver_due(&mut self, now: Tick, tx: &Sender<IntakeMsg>) {
        while self.pending.front().is_some_and(|r| r.arrival <= now) {
            let Some(record) = self.pending.pop_front() else {
                break;
            };
            debug!(
                id = record.id,
                arrival = record.arrival,
                runtime = record.runtime,
                priority = record.priority,
                memsize = record.memsize,
                "delivering arrival"
            );
            let _ = tx.send(IntakeMsg::Arrival(record));
        }
        if self.pending.is_empty() && !self.exhausted_sent {
            self.exhausted_sent = true;
            let _ = tx.send(IntakeMsg::Exhausted);
        }
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
