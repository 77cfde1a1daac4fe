//! Schedule performance metrics.
//!
//! Derives per-process and batch-level timing statistics from a
//! completed [`Simulation`].
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Turnaround | finish - arrival |
//! | Waiting | turnaround - burst |
//! | Response | first start - arrival |
//! | Makespan | Latest finish time |
//! | CPU Utilization | busy ticks / makespan |
//! | Throughput | processes / makespan |
//! | Context Switches | CPU hand-offs between different processes |
//!
//! # Reference
//! Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5.2: Scheduling Criteria

use serde::{Deserialize, Serialize};

use super::Simulation;
use crate::models::{Process, ProcessId, ProcessState};

/// Timing figures for one process (one row of the results table).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessMetrics {
    pub id: ProcessId,
    pub arrival: u64,
    pub burst: u64,
    /// Tick after the last unit of burst.
    pub finish_time: u64,
    /// Ticks spent ready but not running.
    pub waiting: u64,
    /// Ticks from arrival to finish.
    pub turnaround: u64,
    /// Ticks from arrival to first dispatch.
    pub response_time: u64,
}

impl ProcessMetrics {
    fn from_record(process: &Process, state: &ProcessState) -> Self {
        let (Some(finish_time), Some(response_time)) = (state.finish_time, state.response_time)
        else {
            panic!(
                "metrics requested for unfinished P{} (remaining {}, finish {:?}, response {:?})",
                process.id, state.remaining, state.finish_time, state.response_time
            );
        };
        let turnaround = finish_time - process.arrival;
        Self {
            id: process.id,
            arrival: process.arrival,
            burst: process.burst,
            finish_time,
            waiting: turnaround - process.burst,
            turnaround,
            response_time,
        }
    }
}

/// Batch-level scheduling metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleMetrics {
    /// Per-process rows in input order.
    pub per_process: Vec<ProcessMetrics>,
    /// Mean waiting time.
    pub avg_waiting: f64,
    /// Mean turnaround time.
    pub avg_turnaround: f64,
    /// Mean response time.
    pub avg_response: f64,
    /// Latest finish time.
    pub makespan: u64,
    /// Fraction of `[0, makespan)` the CPU was busy (0.0..1.0).
    pub cpu_utilization: f64,
    /// Completed processes per tick.
    pub throughput: f64,
    /// CPU hand-offs between different processes.
    pub context_switches: usize,
}

impl ScheduleMetrics {
    /// Computes metrics from a completed simulation.
    ///
    /// # Panics
    /// If any process lacks a finish or response time, which can only
    /// happen for a `Simulation` deserialized from an unfinished run.
    ///
    /// # Example
    ///
    /// ```
    /// use srtf_sim::models::Process;
    /// use srtf_sim::scheduler::{ScheduleMetrics, SrtfScheduler};
    ///
    /// let sim = SrtfScheduler::new().schedule(&Process::batch(&[(0, 8), (1, 4)]));
    /// let metrics = ScheduleMetrics::calculate(&sim);
    /// assert_eq!(metrics.per_process[0].waiting, 4);
    /// assert!((metrics.avg_waiting - 2.0).abs() < 1e-10);
    /// ```
    pub fn calculate(simulation: &Simulation) -> Self {
        let per_process: Vec<ProcessMetrics> = simulation
            .records()
            .map(|(p, s)| ProcessMetrics::from_record(p, s))
            .collect();

        let count = per_process.len();
        let mean = |f: fn(&ProcessMetrics) -> u64| -> f64 {
            if count == 0 {
                0.0
            } else {
                per_process.iter().map(f).sum::<u64>() as f64 / count as f64
            }
        };
        let avg_waiting = mean(|m| m.waiting);
        let avg_turnaround = mean(|m| m.turnaround);
        let avg_response = mean(|m| m.response_time);

        let timeline = simulation.timeline();
        let makespan = simulation.makespan();
        let (cpu_utilization, throughput) = if makespan == 0 {
            (0.0, 0.0)
        } else {
            (
                timeline.total_busy_time() as f64 / makespan as f64,
                count as f64 / makespan as f64,
            )
        };

        Self {
            per_process,
            avg_waiting,
            avg_turnaround,
            avg_response,
            makespan,
            cpu_utilization,
            throughput,
            context_switches: timeline.context_switches(),
        }
    }

    /// Metrics row for a process.
    pub fn for_process(&self, id: ProcessId) -> Option<&ProcessMetrics> {
        self.per_process.iter().find(|m| m.id == id)
    }

    /// Largest waiting time of any single process.
    pub fn max_waiting(&self) -> u64 {
        self.per_process.iter().map(|m| m.waiting).max().unwrap_or(0)
    }
}
