//! Random workload generation.
//!
//! Produces reproducible process batches from a seed, for demos and
//! randomized testing.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::Process;

/// Seeded generator of random process batches.
///
/// # Example
///
/// ```
/// use srtf_sim::workload::WorkloadGenerator;
///
/// let a = WorkloadGenerator::new(7).with_count(5, 5).generate();
/// let b = WorkloadGenerator::new(7).with_count(5, 5).generate();
/// assert_eq!(a, b);
/// assert_eq!(a.len(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct WorkloadGenerator {
    seed: u64,
    min_count: usize,
    max_count: usize,
    max_arrival: u64,
    min_burst: u64,
    max_burst: u64,
}

impl WorkloadGenerator {
    /// Creates a generator with defaults: 1-10 processes, arrivals in
    /// `0..=20`, bursts in `1..=10`.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            min_count: 1,
            max_count: 10,
            max_arrival: 20,
            min_burst: 1,
            max_burst: 10,
        }
    }

    /// Sets the batch size range (inclusive). `min` is raised to at least 1.
    pub fn with_count(mut self, min: usize, max: usize) -> Self {
        self.min_count = min.max(1);
        self.max_count = max.max(self.min_count);
        self
    }

    /// Sets the latest possible arrival time.
    pub fn with_max_arrival(mut self, max_arrival: u64) -> Self {
        self.max_arrival = max_arrival;
        self
    }

    /// Sets the burst range (inclusive). `min` is raised to at least 1.
    pub fn with_burst_range(mut self, min: u64, max: u64) -> Self {
        self.min_burst = min.max(1);
        self.max_burst = max.max(self.min_burst);
        self
    }

    /// Generates a batch with ids 1.. in generation order.
    pub fn generate(&self) -> Vec<Process> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let count = rng.random_range(self.min_count..=self.max_count);
        let pairs: Vec<(u64, u64)> = (0..count)
            .map(|_| {
                (
                    rng.random_range(0..=self.max_arrival),
                    rng.random_range(self.min_burst..=self.max_burst),
                )
            })
            .collect();
        Process::batch(&pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reproducible() {
        let g = WorkloadGenerator::new(42);
        assert_eq!(g.generate(), g.generate());
    }

    #[test]
    fn test_respects_ranges() {
        for seed in 0..50 {
            let batch = WorkloadGenerator::new(seed)
                .with_count(3, 6)
                .with_max_arrival(4)
                .with_burst_range(2, 5)
                .generate();
            assert!((3..=6).contains(&batch.len()));
            for p in &batch {
                assert!(p.arrival <= 4);
                assert!((2..=5).contains(&p.burst));
            }
        }
    }

    #[test]
    fn test_degenerate_ranges_are_clamped() {
        let batch = WorkloadGenerator::new(1)
            .with_count(0, 0)
            .with_burst_range(0, 0)
            .generate();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].burst, 1);
    }

    #[test]
    fn test_ids_sequential() {
        let batch = WorkloadGenerator::new(9).with_count(4, 4).generate();
        let ids: Vec<u32> = batch.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }
}
