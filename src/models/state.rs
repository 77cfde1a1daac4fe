//! Per-process runtime state.
//!
//! Mutable simulation bookkeeping, one entry per [`Process`]. Times that
//! are not yet known are `None` rather than a sentinel value.

use serde::{Deserialize, Serialize};

use super::Process;

/// Runtime state of a single process during and after simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessState {
    /// CPU time still owed (ticks). Starts at `burst`, ends at 0.
    pub remaining: u64,
    /// Tick of first CPU allocation.
    pub start_time: Option<u64>,
    /// Tick immediately after the last unit of burst was consumed.
    pub finish_time: Option<u64>,
    /// `start_time - arrival`, set together with `start_time`.
    pub response_time: Option<u64>,
}

impl ProcessState {
    /// Fresh state for a process that has not yet run.
    pub fn new(process: &Process) -> Self {
        Self {
            remaining: process.burst,
            start_time: None,
            finish_time: None,
            response_time: None,
        }
    }

    /// Whether the process has been allocated the CPU at least once.
    #[inline]
    pub fn has_started(&self) -> bool {
        self.start_time.is_some()
    }

    /// Whether all burst has been consumed.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.remaining == 0
    }

    /// Records the first dispatch at `time`. Later calls are no-ops.
    pub fn mark_started(&mut self, process: &Process, time: u64) {
        if self.response_time.is_none() {
            self.response_time = Some(time - process.arrival);
        }
        if self.start_time.is_none() {
            self.start_time = Some(time);
        }
    }

    /// Consumes `ticks` of CPU ending at `end`. Records the finish time
    /// when the process completes. Returns `true` on completion.
    pub fn run(&mut self, ticks: u64, end: u64) -> bool {
        debug_assert!(ticks <= self.remaining, "ran past remaining burst");
        self.remaining -= ticks;
        if self.remaining == 0 {
            self.finish_time = Some(end);
            true
        } else {
            false
        }
    }

    /// Turnaround time (`finish - arrival`), once complete.
    pub fn turnaround(&self, process: &Process) -> Option<u64> {
        self.finish_time.map(|f| f - process.arrival)
    }

    /// Waiting time (`turnaround - burst`), once complete.
    pub fn waiting(&self, process: &Process) -> Option<u64> {
        self.turnaround(process).map(|t| t - process.burst)
    }
}
