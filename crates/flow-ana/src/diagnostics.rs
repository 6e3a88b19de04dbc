//! Counters for correlators skipped on individual events.

use serde::{Deserialize, Serialize};

/// Why a correlator was not filled for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipReason {
    /// Fewer particles than the correlator order.
    TooFewParticles,
    /// Combinatorial weight zero, negative or not finite.
    DegenerateWeight,
}

/// Per-correlator skip counts plus event totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipDiagnostics {
    events: u64,
    empty_events: u64,
    too_few_particles: Vec<u64>,
    degenerate_weight: Vec<u64>,
}

impl SkipDiagnostics {
    /// Zeroed counters for `correlators` bins.
    pub fn new(correlators: usize) -> Self {
        Self {
            events: 0,
            empty_events: 0,
            too_few_particles: vec![0; correlators],
            degenerate_weight: vec![0; correlators],
        }
    }

    /// Counts one processed event of the given multiplicity.
    pub fn record_event(&mut self, multiplicity: usize) {
        self.events += 1;
        if multiplicity == 0 {
            self.empty_events += 1;
        }
    }

    /// Counts one skip of correlator `index`.
    pub fn record_skip(&mut self, index: usize, reason: SkipReason) {
        let counters = match reason {
            SkipReason::TooFewParticles => &mut self.too_few_particles,
            SkipReason::DegenerateWeight => &mut self.degenerate_weight,
        };
        if let Some(count) = counters.get_mut(index) {
            *count += 1;
        }
    }

    /// Events seen so far.
    pub fn events(&self) -> u64 {
        self.events
    }

    /// Events without a single particle.
    pub fn empty_events(&self) -> u64 {
        self.empty_events
    }

    /// Skips of correlator `index` for `reason`.
    pub fn skipped(&self, index: usize, reason: SkipReason) -> u64 {
        let counters = match reason {
            SkipReason::TooFewParticles => &self.too_few_particles,
            SkipReason::DegenerateWeight => &self.degenerate_weight,
        };
        counters.get(index).copied().unwrap_or(0)
    }

    /// Skips summed over correlators and reasons.
    pub fn total_skipped(&self) -> u64 {
        self.too_few_particles.iter().sum::<u64>() + self.degenerate_weight.iter().sum::<u64>()
    }

    /// Adds the counters of `other`.
    pub fn merge(&mut self, other: &SkipDiagnostics) {
        self.events += other.events;
        self.empty_events += other.empty_events;
        add_counts(&mut self.too_few_particles, &other.too_few_particles);
        add_counts(&mut self.degenerate_weight, &other.degenerate_weight);
    }
}

fn add_counts(into: &mut Vec<u64>, from: &[u64]) {
    if into.len() < from.len() {
        into.resize(from.len(), 0);
    }
    for (count, extra) in into.iter_mut().zip(from) {
        *count += extra;
    }
}
