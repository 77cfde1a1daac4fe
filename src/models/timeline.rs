//! Execution timeline (Gantt) model.
//!
//! A timeline is the chronological list of contiguous CPU-ownership
//! intervals produced by a simulation. Ticks not covered by any segment
//! are idle.

use serde::{Deserialize, Serialize};

use super::ProcessId;

/// One contiguous stretch during which a single process holds the CPU.
///
/// Covers `[start, end)` with `end > start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineSegment {
    /// Process holding the CPU.
    pub process_id: ProcessId,
    /// First tick (inclusive).
    pub start: u64,
    /// Last tick (exclusive).
    pub end: u64,
}

impl TimelineSegment {
    /// Creates a new segment.
    pub fn new(process_id: ProcessId, start: u64, end: u64) -> Self {
        Self {
            process_id,
            start,
            end,
        }
    }

    /// Segment length in ticks.
    #[inline]
    pub fn duration(&self) -> u64 {
        self.end - self.start
    }
}

/// Chronologically ordered sequence of [`TimelineSegment`]s.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timeline {
    segments: Vec<TimelineSegment>,
}

impl Timeline {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a new segment `[start, end)` for `process_id`.
    pub(crate) fn open(&mut self, process_id: ProcessId, start: u64, end: u64) {
        debug_assert!(end > start, "empty segment");
        debug_assert!(
            self.segments.last().map_or(true, |s| s.end <= start),
            "overlapping segment"
        );
        self.segments
            .push(TimelineSegment::new(process_id, start, end));
    }

    /// Moves the end of the last segment to `end`.
    pub(crate) fn extend_last(&mut self, end: u64) {
        if let Some(last) = self.segments.last_mut() {
            debug_assert!(end >= last.end);
            last.end = end;
        }
    }

    /// All segments in order.
    pub fn segments(&self) -> &[TimelineSegment] {
        &self.segments
    }

    /// Iterates segments in order.
    pub fn iter(&self) -> std::slice::Iter<'_, TimelineSegment> {
        self.segments.iter()
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the timeline has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segments belonging to a process.
    pub fn segments_for(&self, process_id: ProcessId) -> Vec<&TimelineSegment> {
        self.segments
            .iter()
            .filter(|s| s.process_id == process_id)
            .collect()
    }

    /// Total CPU time granted to a process.
    pub fn busy_time(&self, process_id: ProcessId) -> u64 {
        self.segments_for(process_id)
            .iter()
            .map(|s| s.duration())
            .sum()
    }

    /// Total CPU time granted to all processes.
    pub fn total_busy_time(&self) -> u64 {
        self.segments.iter().map(|s| s.duration()).sum()
    }

    /// End of the last segment (0 if empty).
    pub fn makespan(&self) -> u64 {
        self.segments.last().map_or(0, |s| s.end)
    }

    /// Idle intervals `(start, end)` within `[0, makespan)`.
    pub fn idle_gaps(&self) -> Vec<(u64, u64)> {
        let mut gaps = Vec::new();
        let mut cursor = 0;
        for s in &self.segments {
            if s.start > cursor {
                gaps.push((cursor, s.start));
            }
            cursor = s.end;
        }
        gaps
    }

    /// Total idle ticks within `[0, makespan)`.
    pub fn idle_time(&self) -> u64 {
        self.makespan() - self.total_busy_time()
    }

    /// Number of times the CPU passes from one process to a different one.
    ///
    /// An idle gap between two segments of the same process does not count.
    pub fn context_switches(&self) -> usize {
        self.segments
            .windows(2)
            .filter(|w| w[0].process_id != w[1].process_id)
            .count()
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a TimelineSegment;
    type IntoIter = std::slice::Iter<'a, TimelineSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
