//! Process model.
//!
//! A process is a unit of CPU-bound work with a fixed arrival time and a
//! fixed burst (total CPU demand). Both are immutable once a simulation
//! starts; all mutable bookkeeping lives in [`ProcessState`](super::ProcessState).
//!
//! # Time Representation
//! All times are integer ticks relative to the simulation epoch (t=0).

use serde::{Deserialize, Serialize};

/// Process identifier. Assigned 1, 2, 3, ... in input order.
pub type ProcessId = u32;

/// A process to be scheduled on the CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Process {
    /// Unique process identifier.
    pub id: ProcessId,
    /// Tick at which the process becomes eligible for execution.
    pub arrival: u64,
    /// Total CPU time required (ticks, > 0).
    pub burst: u64,
}

impl Process {
    /// Creates a new process.
    pub fn new(id: ProcessId, arrival: u64, burst: u64) -> Self {
        Self { id, arrival, burst }
    }

    /// Builds a batch from `(arrival, burst)` pairs, numbering ids from 1
    /// in input order.
    ///
    /// # Example
    ///
    /// ```
    /// use srtf_sim::models::Process;
    ///
    /// let batch = Process::batch(&[(0, 8), (1, 4)]);
    /// assert_eq!(batch[1], Process::new(2, 1, 4));
    /// ```
    pub fn batch(pairs: &[(u64, u64)]) -> Vec<Process> {
        pairs
            .iter()
            .zip(1..)
            .map(|(&(arrival, burst), id)| Process::new(id, arrival, burst))
            .collect()
    }

    /// Whether the process has arrived by tick `time`.
    #[inline]
    pub fn has_arrived(&self, time: u64) -> bool {
        self.arrival <= time
    }
}
