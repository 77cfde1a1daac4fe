//! Preemptive SJF scheduling and metrics evaluation.
//!
//! # Algorithm
//!
//! `SrtfScheduler` simulates a single CPU under shortest-remaining-time-first
//! dispatching. Ties between equally short ready processes go to the one
//! earliest in input order, which makes the output deterministic.
//!
//! # Metrics
//!
//! `ScheduleMetrics` computes per-process waiting, turnaround and
//! response times, their batch averages, and utilization figures.
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

mod metrics;
mod simulation;
mod srtf;

pub use metrics::{ProcessMetrics, ScheduleMetrics};
pub use simulation::Simulation;
pub use srtf::{SrtfScheduler, StepMode};
