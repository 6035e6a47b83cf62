/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Queue and heap substrate used by the scheduler core.

pub mod fib_heap;
pub mod fifo;

pub use fib_heap::FibHeap;
pub use fifo::Fifo;
