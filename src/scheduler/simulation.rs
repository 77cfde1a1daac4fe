//! Result of a scheduling run.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{Process, ProcessId, ProcessState, Timeline};

/// A completed simulation: the input batch, final per-process state and
/// the execution timeline.
///
/// `processes` and `states` are parallel, in input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Simulation {
    processes: Vec<Process>,
    states: Vec<ProcessState>,
    timeline: Timeline,
}

impl Simulation {
    pub(crate) fn new(
        processes: Vec<Process>,
        states: Vec<ProcessState>,
        timeline: Timeline,
    ) -> Self {
        debug_assert_eq!(processes.len(), states.len());
        Self {
            processes,
            states,
            timeline,
        }
    }

    /// The input batch in input order.
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    /// Final runtime states, parallel to [`processes`](Self::processes).
    pub fn states(&self) -> &[ProcessState] {
        &self.states
    }

    /// The execution timeline.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Runtime state of a process by id.
    pub fn state(&self, id: ProcessId) -> Option<&ProcessState> {
        self.processes
            .iter()
            .position(|p| p.id == id)
            .map(|idx| &self.states[idx])
    }

    /// `(process, state)` pairs in input order.
    pub fn records(&self) -> impl Iterator<Item = (&Process, &ProcessState)> {
        self.processes.iter().zip(&self.states)
    }

    /// Runtime states keyed by process id.
    pub fn state_map(&self) -> HashMap<ProcessId, &ProcessState> {
        self.records().map(|(p, s)| (p.id, s)).collect()
    }

    /// Whether every process has finished.
    pub fn is_complete(&self) -> bool {
        self.states
            .iter()
            .all(|s| s.is_complete() && s.finish_time.is_some())
    }

    /// Latest finish time across all processes.
    pub fn makespan(&self) -> u64 {
        self.states
            .iter()
            .filter_map(|s| s.finish_time)
            .max()
            .unwrap_or(0)
    }

    /// Number of processes.
    pub fn process_count(&self) -> usize {
        self.processes.len()
    }
}
