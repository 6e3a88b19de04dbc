//! Per-event particle sample supplied by the event producer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::KinematicChannel;

/// Azimuthal angles of one event plus optional per-channel weights.
///
/// Weight channels are parallel to `angles`; a channel that was never filled
/// is absent and treated as unit weight downstream.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParticleSample {
    angles: Vec<f64>,
    #[serde(default)]
    channels: BTreeMap<KinematicChannel, Vec<f64>>,
}

impl ParticleSample {
    /// Creates an empty sample.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an unweighted sample from a list of angles.
    pub fn from_angles(angles: Vec<f64>) -> Self {
        Self {
            angles,
            channels: BTreeMap::new(),
        }
    }

    /// Attaches a full weight channel, replacing any previous one.
    pub fn with_channel(mut self, channel: KinematicChannel, weights: Vec<f64>) -> Self {
        self.channels.insert(channel, weights);
        self
    }

    /// Appends one particle angle.
    pub fn push(&mut self, angle: f64) {
        self.angles.push(angle);
    }

    /// Appends one weight to `channel`.
    pub fn push_weight(&mut self, channel: KinematicChannel, weight: f64) {
        self.channels.entry(channel).or_default().push(weight);
    }

    /// Drops all particles and weights while keeping allocations.
    pub fn clear(&mut self) {
        self.angles.clear();
        for weights in self.channels.values_mut() {
            weights.clear();
        }
    }

    /// Particle angles in insertion order.
    pub fn angles(&self) -> &[f64] {
        &self.angles
    }

    /// Weights recorded for `channel`, empty when the channel is unused.
    pub fn channel(&self, channel: KinematicChannel) -> &[f64] {
        self.channels
            .get(&channel)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Mutable access to the weights of `channel`, if it was ever filled.
    pub fn channel_mut(&mut self, channel: KinematicChannel) -> Option<&mut [f64]> {
        self.channels.get_mut(&channel).map(Vec::as_mut_slice)
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.angles.len()
    }

    /// True when the event holds no particles.
    pub fn is_empty(&self) -> bool {
        self.angles.is_empty()
    }
}
