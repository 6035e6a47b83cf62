/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Core job (PCB) data structures for the tickmill scheduler.
//!
//! A job flows through the system like this:
//!
//! ```text
//! workload file ──(JobRecord)──► Job ──(scheduler)──► Finished + metrics
//!                                 ↑
//!                                 owned by the JobTable for the whole run
//! ```
//!
//! # Ownership model
//! Every [`Job`] lives in the [`JobTable`] for the duration of the run and is
//! addressed by its [`JobId`] (a stable slab index).  The staging queue, block
//! queue and ready structure store `JobId`s only — the table is the single
//! owner, so a job can never be aliased by two containers and the conservation
//! invariant (each job in exactly one place) is checkable by scanning states.

use crate::clock::Tick;
use crate::memory::RegionId;

/// Stable handle of a job inside the [`JobTable`].
pub type JobId = usize;

// ── Lifecycle state ───────────────────────────────────────────────────────────

/// Scheduling state of a job.
///
/// Exactly one state holds at any time, and the transitions are:
///
/// ```text
/// Staged ──► Ready ⇄ Running ──► Finished
///    │         ▲
///    └► Blocked┘   (memory admitted on a later sweep)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    /// Arrived from the producer, not yet offered to the memory allocator.
    Staged,
    /// Arrived but could not obtain memory; waiting in the block queue.
    Blocked,
    /// Holds memory and sits in the ready structure.
    Ready,
    /// Currently owns the CPU.  A running job is also the head of the ready
    /// structure under the active policy.
    Running,
    /// Completed.  The job record is immutable from here on and its memory
    /// region has been released.
    Finished,
}

// ── Job (PCB) ─────────────────────────────────────────────────────────────────

/// Process control block: the one entity that carries state through the
/// simulator.
///
/// * `file_id` is the identifier from the workload file and is stable across
///   the run; `spawn_id` is handed out by the job driver at first dispatch.
/// * `first_start` is `None` until the job is dispatched for the first time
///   (replacing the `-1` sentinel convention).
/// * `last_stop` is initialised to the arrival tick so that the wait added at
///   first dispatch is simply `now − last_stop`.
/// * `region` is `Some` exactly while the job is `Ready` or `Running`.
#[derive(Debug, Clone)]
pub struct Job {
    // ── Identity ──────────────────────────────────────────────────────────────
    /// Identifier from the workload file.
    pub file_id: i64,

    /// Identifier assigned by the job driver at first dispatch.
    pub spawn_id: Option<u32>,

    // ── Parameters ────────────────────────────────────────────────────────────
    /// Arrival tick.
    pub arrival: Tick,

    /// Total CPU burst in ticks.
    pub burst: u64,

    /// Priority (lower value = higher priority under HPF).
    pub priority: i64,

    /// Memory footprint in bytes.  Treated as a power-of-two ceiling by the
    /// allocator; `0` means the job needs no memory and bypasses admission.
    pub memsize: u64,

    // ── Lifecycle counters ────────────────────────────────────────────────────
    /// Tick of first dispatch, `None` until then.
    pub first_start: Option<Tick>,

    /// Tick the job last lost the CPU (arrival tick until first dispatch).
    pub last_stop: Tick,

    /// Accumulated ticks spent waiting off the CPU.
    pub waited: u64,

    // ── Linkage ───────────────────────────────────────────────────────────────
    /// Current scheduling state.
    pub state: JobState,

    /// Buddy region owned by the job while admitted.
    pub region: Option<RegionId>,
}

impl Job {
    /// Ticks the job has actually run up to `upto`.
    ///
    /// While running, callers pass the current tick; for a stopped job the
    /// meaningful bound is its `last_stop`.
    pub fn ticks_run(&self, upto: Tick) -> u64 {
        (upto - self.arrival).saturating_sub(self.waited)
    }

    /// Remaining burst at `upto`.
    pub fn remaining(&self, upto: Tick) -> u64 {
        self.burst.saturating_sub(self.ticks_run(upto))
    }

    /// Turnaround time for a job finishing at `finish`.
    pub fn turnaround(&self, finish: Tick) -> u64 {
        finish - self.arrival
    }

    /// Weighted turnaround: `TA / burst`, `0.0` for a zero-length burst.
    pub fn weighted_turnaround(&self, finish: Tick) -> f64 {
        if self.burst == 0 {
            0.0
        } else {
            self.turnaround(finish) as f64 / self.burst as f64
        }
    }
}

// ── JobTable ──────────────────────────────────────────────────────────────────

/// Owner of every job admitted during a run.
///
/// Jobs are appended and never removed — finished jobs stay in the table so
/// end-of-run metrics and conservation checks can scan the full population.
#[derive(Debug, Default)]
pub struct JobTable {
    jobs: Vec<Job>,
}

impl JobTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a freshly staged job and return its stable id.
    pub fn admit(&mut self, job: Job) -> JobId {
        self.jobs.push(job);
        self.jobs.len() - 1
    }

    pub fn get(&self, id: JobId) -> &Job {
        &self.jobs[id]
    }

    pub fn get_mut(&mut self, id: JobId) -> &mut Job {
        &mut self.jobs[id]
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Iterate `(id, job)` over the whole population.
    pub fn iter(&self) -> impl Iterator<Item = (JobId, &Job)> {
        self.jobs.iter().enumerate()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
