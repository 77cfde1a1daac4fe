//! Preemptive shortest-job-first CPU scheduling simulator.
//!
//! Simulates a single CPU running a fully-known batch of processes under
//! shortest-remaining-time-first dispatching, producing an execution
//! timeline and per-process timing metrics.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Process`, `ProcessState`, `Timeline`, `TimelineSegment`
//! - **`scheduler`**: `SrtfScheduler`, `Simulation`, `ScheduleMetrics`
//! - **`validation`**: Boundary checks turning raw input rows into a batch
//! - **`config`**: Simulator settings (TOML)
//! - **`workload`**: Seeded random batches
//!
//! # Usage
//!
//! ```
//! use srtf_sim::models::Process;
//! use srtf_sim::scheduler::{ScheduleMetrics, SrtfScheduler};
//!
//! let processes = Process::batch(&[(0, 3), (0, 3), (0, 3)]);
//! let sim = SrtfScheduler::new().schedule(&processes);
//! let metrics = ScheduleMetrics::calculate(&sim);
//!
//! assert_eq!(sim.timeline().len(), 3);
//! assert!((metrics.avg_waiting - 3.0).abs() < 1e-10);
//! ```
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

pub mod config;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod validation;
pub mod workload;

pub use error::{Error, Result};
