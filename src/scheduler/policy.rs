/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Scheduling policy plug-ins and the ready structure they operate on.
//!
//! The scheduler core is policy-agnostic: it inserts admitted jobs with the
//! policy's key, compares the ready head against the running job, and calls
//! [`Policy::tick`] once per consumed tick.  Everything policy-specific —
//! which concrete structure backs the ready set, what the key means, what a
//! tick does — lives here.
//!
//! | Policy | Ready structure | Admission key | Per-tick action |
//! |---|---|---|---|
//! | HPF (non-preemptive) | Fibonacci heap | priority | pin running job to key 0 |
//! | SRTN (preemptive) | Fibonacci heap | total burst | decrement the min key |
//! | RR | FIFO queue | arrival order | count down the quantum; rotate at 0 |

use crate::ds::{FibHeap, Fifo};
use crate::job::{Job, JobId};

// ── Policy ────────────────────────────────────────────────────────────────────

/// Scheduling policy selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Non-preemptive Highest Priority First.
    Hpf,
    /// Shortest Remaining Time Next.
    Srtn,
    /// Round Robin.
    Rr,
}

impl Policy {
    /// Parse the CLI integer (`1` = HPF, `2` = SRTN, `3` = RR).
    pub fn from_cli_int(v: u32) -> Option<Self> {
        match v {
            1 => Some(Policy::Hpf),
            2 => Some(Policy::Srtn),
            3 => Some(Policy::Rr),
            _ => None,
        }
    }

    /// Key a freshly admitted job is inserted under.
    ///
    /// RR ignores the key — its queue orders by arrival alone — so any value
    /// would do; zero keeps logs unsurprising.
    pub fn admission_key(&self, job: &Job) -> i64 {
        match self {
            Policy::Hpf => job.priority,
            Policy::Srtn => job.burst as i64,
            Policy::Rr => 0,
        }
    }

    /// Advance the policy by one consumed tick.
    ///
    /// Callers invoke this only while a job is running, so for the heap
    /// policies the running job is the heap minimum:
    ///
    /// * HPF pins it to key 0 so no later arrival of equal priority can
    ///   displace it (non-preemption).  Negative keys are left alone.
    /// * SRTN decrements the min key, which therefore tracks the remaining
    ///   burst; a shorter arrival re-heads the heap and preempts at the next
    ///   dispatch.
    /// * RR counts the quantum down and rotates the queue head to the tail
    ///   when it expires.  The rotated job keeps its memory and state; the
    ///   head change triggers a context switch on the next loop iteration.
    pub fn tick(&self, ready: &mut ReadyStructure, quantum: &mut QuantumState) {
        match self {
            Policy::Hpf => {
                if let ReadyStructure::Heap(heap) = ready {
                    if heap.min_key().is_some_and(|k| k > 0) {
                        heap.decrease_min_key(0);
                    }
                }
            }
            Policy::Srtn => {
                if let ReadyStructure::Heap(heap) = ready {
                    if let Some(key) = heap.min_key() {
                        heap.decrease_min_key(key - 1);
                    }
                }
            }
            Policy::Rr => {
                quantum.remaining = quantum.remaining.saturating_sub(1);
                if quantum.remaining == 0 {
                    if let ReadyStructure::Queue(queue) = ready {
                        if let Some(head) = queue.pop_head() {
                            queue.push_tail(head);
                        }
                    }
                    quantum.reset();
                }
            }
        }
    }
}

// ── Quantum ───────────────────────────────────────────────────────────────────

/// Configured quantum length and the ticks left in the current slice.
#[derive(Debug, Clone, Copy)]
pub struct QuantumState {
    pub length: u64,
    pub remaining: u64,
}

impl QuantumState {
    pub fn new(length: u64) -> Self {
        Self {
            length,
            remaining: length,
        }
    }

    /// Begin a fresh slice.
    pub fn reset(&mut self) {
        self.remaining = self.length;
    }
}

// ── Ready structure ───────────────────────────────────────────────────────────

/// The policy's ready set.  The scheduler holds this opaquely; only the
/// policy knows which arm it is.
#[derive(Debug)]
pub enum ReadyStructure {
    Heap(FibHeap<JobId>),
    Queue(Fifo<JobId>),
}

impl ReadyStructure {
    pub fn for_policy(policy: Policy) -> Self {
        match policy {
            Policy::Rr => ReadyStructure::Queue(Fifo::new()),
            Policy::Hpf | Policy::Srtn => ReadyStructure::Heap(FibHeap::new()),
        }
    }

    /// Insert an admitted job under the policy key.
    pub fn insert(&mut self, id: JobId, key: i64) {
        match self {
            ReadyStructure::Heap(heap) => heap.insert(id, key),
            ReadyStructure::Queue(queue) => queue.push_tail(id),
        }
    }

    /// Job the policy would dispatch next.
    pub fn head(&self) -> Option<JobId> {
        match self {
            ReadyStructure::Heap(heap) => heap.min().copied(),
            ReadyStructure::Queue(queue) => queue.peek_head().copied(),
        }
    }

    /// Remove a finished job.
    ///
    /// For a heap the job must be the minimum (the running job is pinned
    /// there); for a queue it may sit anywhere — a quantum rotation can have
    /// moved it to the tail in the same tick it completed.  Returns `false`
    /// when the job was not where it had to be.
    pub fn remove_finished(&mut self, id: JobId) -> bool {
        match self {
            ReadyStructure::Heap(heap) => heap.extract_min() == Some(id),
            ReadyStructure::Queue(queue) => !queue.drain_matching(|j| *j == id).is_empty(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ReadyStructure::Heap(heap) => heap.len(),
            ReadyStructure::Queue(queue) => queue.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All ready job ids, in structure-internal order.
    pub fn ids(&self) -> Vec<JobId> {
        match self {
            ReadyStructure::Heap(heap) => heap.iter().copied().collect(),
            ReadyStructure::Queue(queue) => queue.iter().copied().collect(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
