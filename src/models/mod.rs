//! Scheduling domain models.
//!
//! Provides the data types for a single-CPU batch workload and the
//! result of simulating it.
//!
//! # Roles
//!
//! | Type | Role | Mutability |
//! |------|------|------------|
//! | Process | Static description (arrival, burst) | Immutable during a run |
//! | ProcessState | Remaining work, start/finish/response times | Owned by the scheduler |
//! | TimelineSegment | One contiguous CPU-ownership interval | Built by the scheduler |
//! | Timeline | Ordered segments (Gantt chart) | Read-only after a run |

mod process;
mod state;
mod timeline;

pub use process::{Process, ProcessId};
pub use state::ProcessState;
pub use timeline::{Timeline, TimelineSegment};
