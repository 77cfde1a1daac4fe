//! Preemptive shortest-job-first (shortest-remaining-time-first) scheduler.
//!
//! # Algorithm
//!
//! Discrete-time, single-CPU simulation:
//!
//! 1. At clock `t`, the ready set is every process with `arrival <= t`
//!    and `remaining > 0`.
//! 2. If the ready set is empty the CPU idles until the next arrival.
//! 3. Otherwise the process with minimum `remaining` is dispatched. Ties
//!    go to the process earliest in input order.
//! 4. A dispatch of a process other than the one that ran on the previous
//!    tick opens a new timeline segment (recording first start/response
//!    on first dispatch); the same process continuing extends the last
//!    segment.
//! 5. A completing process releases the CPU, forcing re-selection.
//!
//! [`StepMode::Tick`] executes this literally, one tick per iteration
//! while the CPU is busy; idle stretches skip to the next arrival.
//! Its cost grows with total burst, so it suits small inputs only.
//! [`StepMode::EventDriven`] jumps over idle gaps and over runs that
//! cannot be preempted (nothing arrives before the running process would
//! finish). The running process only gets shorter, so its selection can
//! only change when a new process arrives; both modes therefore produce
//! identical output.
//!
//! # Complexity
//! Tick: O(B * n) with B = total burst. Event-driven: O(n^2).
//!
//! # Reference
//! Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5.3

use std::fmt;
use std::str::FromStr;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use super::Simulation;
use crate::models::{Process, ProcessState, Timeline};
use crate::validation::validate_processes;

/// How the simulated clock advances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepMode {
    /// One tick per iteration while busy. Cost grows with total burst.
    Tick,
    /// Advance straight to the next arrival or completion.
    #[default]
    EventDriven,
}

impl StepMode {
    /// Name used in configuration files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            StepMode::Tick => "tick",
            StepMode::EventDriven => "event-driven",
        }
    }
}

impl fmt::Display for StepMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StepMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tick" => Ok(StepMode::Tick),
            "event-driven" => Ok(StepMode::EventDriven),
            other => Err(format!(
                "unknown step mode '{other}' (expected 'tick' or 'event-driven')"
            )),
        }
    }
}

/// Preemptive SJF (SRTF) scheduler.
///
/// # Example
///
/// ```
/// use srtf_sim::models::Process;
/// use srtf_sim::scheduler::SrtfScheduler;
///
/// let processes = Process::batch(&[(0, 8), (1, 4)]);
/// let sim = SrtfScheduler::new().schedule(&processes);
///
/// let spans: Vec<_> = sim.timeline().iter().map(|s| (s.process_id, s.start, s.end)).collect();
/// assert_eq!(spans, vec![(1, 0, 1), (2, 1, 5), (1, 5, 12)]);
/// assert_eq!(sim.state(1).unwrap().finish_time, Some(12));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SrtfScheduler {
    mode: StepMode,
}

impl SrtfScheduler {
    /// Creates an event-driven scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the step mode.
    pub fn with_mode(mut self, mode: StepMode) -> Self {
        self.mode = mode;
        self
    }

    /// The configured step mode.
    pub fn mode(&self) -> StepMode {
        self.mode
    }

    /// Runs the batch to completion.
    ///
    /// # Panics
    /// If the batch is empty, contains a zero burst, or repeats an id.
    /// Input is expected to have passed [`crate::validation`] first.
    pub fn schedule(&self, processes: &[Process]) -> Simulation {
        if let Err(errors) = validate_processes(processes) {
            let messages: Vec<String> = errors.iter().map(|e| e.message.clone()).collect();
            panic!("scheduler precondition violated: {}", messages.join("; "));
        }

        debug!(
            "simulating {} processes ({:?} mode)",
            processes.len(),
            self.mode
        );

        let mut run = Run::new(processes);
        match self.mode {
            StepMode::Tick => run.tick_to_completion(),
            StepMode::EventDriven => run.events_to_completion(),
        }

        debug!(
            "simulation complete at t={} with {} segments",
            run.clock,
            run.timeline.len()
        );

        Simulation::new(processes.to_vec(), run.states, run.timeline)
    }
}

/// Mutable state of one simulation run.
///
/// Static descriptors and runtime states are parallel arrays addressed by
/// input index.
struct Run<'a> {
    processes: &'a [Process],
    states: Vec<ProcessState>,
    timeline: Timeline,
    clock: u64,
    completed: usize,
    /// Index of the process that held the CPU on the previous step.
    current: Option<usize>,
}

impl<'a> Run<'a> {
    fn new(processes: &'a [Process]) -> Self {
        Self {
            processes,
            states: processes.iter().map(ProcessState::new).collect(),
            timeline: Timeline::new(),
            clock: 0,
            completed: 0,
            current: None,
        }
    }

    fn is_done(&self) -> bool {
        self.completed == self.processes.len()
    }

    /// Ready process with minimum remaining time; first in input order on ties.
    fn select_shortest(&self) -> Option<usize> {
        self.processes
            .iter()
            .zip(&self.states)
            .enumerate()
            .filter(|(_, (p, s))| p.has_arrived(self.clock) && !s.is_complete())
            .min_by_key(|(_, (_, s))| s.remaining)
            .map(|(idx, _)| idx)
    }

    /// Earliest arrival strictly after the current clock.
    fn next_arrival(&self) -> Option<u64> {
        self.processes
            .iter()
            .map(|p| p.arrival)
            .filter(|&a| a > self.clock)
            .min()
    }

    /// Gives the CPU to `idx` for `ticks` ticks starting at the clock.
    fn dispatch(&mut self, idx: usize, ticks: u64) {
        let processes = self.processes;
        let process = &processes[idx];
        let end = self.clock + ticks;

        if self.current != Some(idx) {
            if let Some(prev) = self.current {
                if !self.states[prev].is_complete() {
                    self.timeline.extend_last(self.clock);
                    debug!(
                        "t={}: P{} preempted by P{} (remaining {} vs {})",
                        self.clock,
                        processes[prev].id,
                        process.id,
                        self.states[prev].remaining,
                        self.states[idx].remaining
                    );
                }
            }
            self.states[idx].mark_started(process, self.clock);
            self.timeline.open(process.id, self.clock, end);
            self.current = Some(idx);
        } else {
            self.timeline.extend_last(end);
        }

        trace!("t={}..{}: P{} runs", self.clock, end, process.id);
        self.clock = end;

        if self.states[idx].run(ticks, end) {
            self.completed += 1;
            self.current = None;
            trace!("t={}: P{} finished", end, process.id);
        }
    }

    fn tick_to_completion(&mut self) {
        while !self.is_done() {
            match self.select_shortest() {
                Some(idx) => self.dispatch(idx, 1),
                None => self.skip_idle(),
            }
        }
    }

    /// Moves an idle clock to the next arrival.
    fn skip_idle(&mut self) {
        let resume = self.next_arrival().unwrap_or(self.clock + 1);
        trace!("t={}..{}: idle", self.clock, resume);
        self.clock = resume;
    }

    fn events_to_completion(&mut self) {
        while !self.is_done() {
            let next_arrival = self.next_arrival();
            match self.select_shortest() {
                Some(idx) => {
                    let remaining = self.states[idx].remaining;
                    let ticks = match next_arrival {
                        Some(at) => remaining.min(at - self.clock),
                        None => remaining,
                    };
                    self.dispatch(idx, ticks);
                }
                None => self.skip_idle(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProcessId, TimelineSegment};
    use crate::workload::WorkloadGenerator;

    const MODES: [StepMode; 2] = [StepMode::Tick, StepMode::EventDriven];

    fn spans(sim: &Simulation) -> Vec<(ProcessId, u64, u64)> {
        sim.timeline()
            .iter()
            .map(|s| (s.process_id, s.start, s.end))
            .collect()
    }

    #[test]
    fn test_single_process() {
        for mode in MODES {
            let sim = SrtfScheduler::new()
                .with_mode(mode)
                .schedule(&Process::batch(&[(0, 5)]));
            assert_eq!(spans(&sim), vec![(1, 0, 5)]);
            let s = sim.state(1).unwrap();
            assert_eq!(s.finish_time, Some(5));
            assert_eq!(s.start_time, Some(0));
            assert_eq!(s.response_time, Some(0));
            assert_eq!(s.remaining, 0);
        }
    }

    #[test]
    fn test_preemption_by_shorter_arrival() {
        for mode in MODES {
            let sim = SrtfScheduler::new()
                .with_mode(mode)
                .schedule(&Process::batch(&[(0, 8), (1, 4)]));
            assert_eq!(spans(&sim), vec![(1, 0, 1), (2, 1, 5), (1, 5, 12)]);

            let p1 = sim.state(1).unwrap();
            assert_eq!(p1.finish_time, Some(12));
            assert_eq!(p1.response_time, Some(0));
            let p2 = sim.state(2).unwrap();
            assert_eq!(p2.finish_time, Some(5));
            assert_eq!(p2.response_time, Some(0));
        }
    }

    #[test]
    fn test_idle_gap_before_first_arrival() {
        for mode in MODES {
            let sim = SrtfScheduler::new()
                .with_mode(mode)
                .schedule(&Process::batch(&[(3, 2)]));
            assert_eq!(spans(&sim), vec![(1, 3, 5)]);
            assert_eq!(sim.state(1).unwrap().finish_time, Some(5));
            assert_eq!(sim.state(1).unwrap().response_time, Some(0));
        }
    }

    #[test]
    fn test_three_way_tie_uses_input_order() {
        for mode in MODES {
            let sim = SrtfScheduler::new()
                .with_mode(mode)
                .schedule(&Process::batch(&[(0, 3), (0, 3), (0, 3)]));
            assert_eq!(spans(&sim), vec![(1, 0, 3), (2, 3, 6), (3, 6, 9)]);
        }
    }

    #[test]
    fn test_tie_with_running_process_does_not_preempt() {
        // P2 arrives with remaining equal to P1's; P1 is earlier in input order.
        for mode in MODES {
            let sim = SrtfScheduler::new()
                .with_mode(mode)
                .schedule(&Process::batch(&[(0, 4), (1, 3)]));
            assert_eq!(spans(&sim), vec![(1, 0, 4), (2, 4, 7)]);
        }
    }

    #[test]
    fn test_tie_prefers_earlier_input_over_earlier_arrival() {
        // At t=2, P1 (arrived at 2, burst 2) ties P2's remaining 2; P1 wins.
        for mode in MODES {
            let sim = SrtfScheduler::new()
                .with_mode(mode)
                .schedule(&Process::batch(&[(2, 2), (0, 4)]));
            assert_eq!(spans(&sim), vec![(2, 0, 2), (1, 2, 4), (2, 4, 6)]);
            assert_eq!(sim.state(2).unwrap().start_time, Some(0));
            assert_eq!(sim.state(1).unwrap().response_time, Some(0));
        }
    }

    #[test]
    fn test_idle_gap_between_processes() {
        for mode in MODES {
            let sim = SrtfScheduler::new()
                .with_mode(mode)
                .schedule(&Process::batch(&[(0, 2), (5, 1)]));
            assert_eq!(spans(&sim), vec![(1, 0, 2), (2, 5, 6)]);
            assert_eq!(sim.timeline().idle_gaps(), vec![(2, 5)]);
        }
    }

    #[test]
    fn test_same_process_resumes_after_completion_of_other() {
        // P1 is preempted, P2 completes, P1 gets a fresh segment.
        for mode in MODES {
            let sim = SrtfScheduler::new()
                .with_mode(mode)
                .schedule(&Process::batch(&[(0, 5), (2, 1)]));
            assert_eq!(spans(&sim), vec![(1, 0, 2), (2, 2, 3), (1, 3, 6)]);
            assert_eq!(sim.state(1).unwrap().start_time, Some(0));
        }
    }

    #[test]
    fn test_far_arrival_skips_idle_stretch() {
        let far = 1_000_000_000_000_000;
        for mode in MODES {
            let sim = SrtfScheduler::new()
                .with_mode(mode)
                .schedule(&Process::batch(&[(0, 2), (far, 3)]));
            assert_eq!(spans(&sim), vec![(1, 0, 2), (2, far, far + 3)]);
            assert_eq!(sim.state(2).unwrap().finish_time, Some(far + 3));
        }
    }

    #[test]
    fn test_response_time_for_late_start() {
        for mode in MODES {
            let sim = SrtfScheduler::new()
                .with_mode(mode)
                .schedule(&Process::batch(&[(0, 3), (1, 6)]));
            let p2 = sim.state(2).unwrap();
            assert_eq!(p2.start_time, Some(3));
            assert_eq!(p2.response_time, Some(2));
            assert_eq!(p2.finish_time, Some(9));
        }
    }

    #[test]
    fn test_segment_durations_sum_to_burst() {
        let processes = Process::batch(&[(0, 7), (2, 4), (4, 1), (5, 4), (20, 3)]);
        let sim = SrtfScheduler::new().schedule(&processes);
        for p in &processes {
            assert_eq!(sim.timeline().busy_time(p.id), p.burst);
        }
    }

    #[test]
    fn test_timeline_is_ordered_and_disjoint() {
        let processes = Process::batch(&[(0, 7), (2, 4), (4, 1), (5, 4), (20, 3)]);
        let sim = SrtfScheduler::new().schedule(&processes);
        let segs: &[TimelineSegment] = sim.timeline().segments();
        assert!(segs.iter().all(|s| s.end > s.start));
        assert!(segs.windows(2).all(|w| w[0].end <= w[1].start));
    }

    #[test]
    fn test_deterministic() {
        let processes = Process::batch(&[(0, 6), (1, 2), (1, 2), (3, 5), (4, 1)]);
        let scheduler = SrtfScheduler::new();
        let a = scheduler.schedule(&processes);
        let b = scheduler.schedule(&processes);
        assert_eq!(a.timeline(), b.timeline());
        assert_eq!(a.states(), b.states());
    }

    #[test]
    fn test_modes_agree_on_random_workloads() {
        for seed in 0..200 {
            let processes = WorkloadGenerator::new(seed)
                .with_count(1, 10)
                .with_max_arrival(15)
                .with_burst_range(1, 8)
                .generate();
            let tick = SrtfScheduler::new()
                .with_mode(StepMode::Tick)
                .schedule(&processes);
            let event = SrtfScheduler::new()
                .with_mode(StepMode::EventDriven)
                .schedule(&processes);
            assert_eq!(tick.timeline(), event.timeline(), "seed {seed}");
            assert_eq!(tick.states(), event.states(), "seed {seed}");
        }
    }

    #[test]
    fn test_random_workloads_satisfy_invariants() {
        for seed in 0..100 {
            let processes = WorkloadGenerator::new(seed).generate();
            let sim = SrtfScheduler::new().schedule(&processes);
            assert!(sim.is_complete());
            for (p, s) in sim.records() {
                let finish = s.finish_time.unwrap();
                assert!(finish > p.arrival);
                assert!(s.start_time.unwrap() >= p.arrival);
                assert!(s.turnaround(p).unwrap() >= p.burst);
                assert_eq!(sim.timeline().busy_time(p.id), p.burst);
            }
        }
    }

    #[test]
    #[should_panic(expected = "precondition violated")]
    fn test_empty_batch_panics() {
        SrtfScheduler::new().schedule(&[]);
    }

    #[test]
    #[should_panic(expected = "precondition violated")]
    fn test_zero_burst_panics() {
        SrtfScheduler::new().schedule(&[Process::new(1, 0, 0)]);
    }

    #[test]
    #[should_panic(expected = "maximum simulated time")]
    fn test_clock_overflow_panics() {
        let max = i64::MAX as u64;
        SrtfScheduler::new().schedule(&[
            Process::new(1, 0, max),
            Process::new(2, 0, max),
            Process::new(3, 0, max),
        ]);
    }

    #[test]
    fn test_step_mode_from_str() {
        assert_eq!("tick".parse::<StepMode>(), Ok(StepMode::Tick));
        assert_eq!("event-driven".parse::<StepMode>(), Ok(StepMode::EventDriven));
        assert!("fast".parse::<StepMode>().unwrap_err().contains("unknown step mode"));
        for mode in [StepMode::Tick, StepMode::EventDriven] {
            assert_eq!(mode.to_string().parse::<StepMode>(), Ok(mode));
            assert_eq!(
                serde_json::to_string(&mode).unwrap(),
                format!("\"{mode}\"")
            );
        }
    }

    #[test]
    fn test_step_mode_serde() {
        assert_eq!(
            serde_json::to_string(&StepMode::EventDriven).unwrap(),
            "\"event-driven\""
        );
        let m: StepMode = serde_json::from_str("\"tick\"").unwrap();
        assert_eq!(m, StepMode::Tick);
        assert_eq!(StepMode::default(), StepMode::EventDriven);
    }
}
