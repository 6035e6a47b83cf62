/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Observability adapter: re-keyed snapshots of the ready structure.
//!
//! A display layer wants the ready jobs sorted by whatever column the user
//! clicked — id, arrival, remaining burst, priority — while the scheduler
//! keeps them ordered by the policy key.  The adapter builds a fresh heap
//! keyed by the requested function without disturbing the source: a heap
//! source is walked via [`FibHeap::copy_into`], a queue source is iterated
//! and inserted.
//!
//! Snapshots hold [`JobId`]s only; they own no jobs and may be dropped
//! freely.  They must be taken between ticks — mid-tick the heap may carry a
//! transient pinned key and is considered unobservable.

use crate::clock::Tick;
use crate::ds::FibHeap;
use crate::job::{Job, JobId, JobState, JobTable};
use crate::scheduler::ReadyStructure;

/// Sort column offered by the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotKey {
    Id,
    Arrival,
    Remaining,
    Priority,
}

impl SnapshotKey {
    /// Key value of `job` under this column.
    ///
    /// Remaining burst is bounded by the current tick for the running job
    /// and by the last stop for everything else.
    pub fn key_of(&self, job: &Job, now: Tick) -> i64 {
        match self {
            SnapshotKey::Id => job.file_id,
            SnapshotKey::Arrival => job.arrival as i64,
            SnapshotKey::Remaining => {
                let upto = if job.state == JobState::Running {
                    now
                } else {
                    job.last_stop
                };
                job.remaining(upto) as i64
            }
            SnapshotKey::Priority => job.priority,
        }
    }
}

/// Heap-ordered snapshot of `ready` under an arbitrary key function.
pub fn snapshot_by(
    ready: &ReadyStructure,
    jobs: &JobTable,
    key_fn: impl Fn(&Job) -> i64,
) -> FibHeap<JobId> {
    let mut snap = FibHeap::new();
    match ready {
        ReadyStructure::Heap(heap) => {
            heap.copy_into(&mut snap, |id| key_fn(jobs.get(*id)));
        }
        ReadyStructure::Queue(queue) => {
            for &id in queue.iter() {
                snap.insert(id, key_fn(jobs.get(id)));
            }
        }
    }
    snap
}

/// Heap-ordered snapshot of `ready` under a display column.
pub fn snapshot(
    ready: &ReadyStructure,
    jobs: &JobTable,
    now: Tick,
    key: SnapshotKey,
) -> FibHeap<JobId> {
    snapshot_by(ready, jobs, |job| key.key_of(job, now))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
