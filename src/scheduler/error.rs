/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Structured error types for the scheduler core.
//!
//! Only two failure layers exist at run time:
//!
//! * I/O — the event log cannot be written.  Propagates to `main`, which
//!   still flushes whatever was buffered before exiting non-zero.
//! * Structural invariant violations — a completion for a job that is not
//!   running, or a finished job that is not at the head of the ready
//!   structure.  These indicate a corrupted scheduler state and have no
//!   recovery path; the variants carry the workload-file id so the single
//!   stderr line names the offending job.
//!
//! Memory-admission failure is deliberately **not** here: an allocator
//! refusal is the normal BLOCKED signal, absorbed by the block queue.

use thiserror::Error;

/// Top-level error type returned by
/// [`Scheduler::run()`](super::Scheduler::run).
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// The event log writer failed.
    #[error("event log I/O failure: {0}")]
    Io(#[from] std::io::Error),

    /// The driver reported a completion while no job was running.
    #[error("completion reported for job {job} but nothing is running")]
    CompletionWithoutRunning { job: i64 },

    /// The driver reported a completion for a job other than the running one.
    #[error("completion reported for job {job} but job {running} is running")]
    CompletionMismatch { job: i64, running: i64 },

    /// The finished job was not at the head of the ready structure.
    #[error("finished job {job} is not the head of the ready structure")]
    FinishedNotHead { job: i64 },
}
