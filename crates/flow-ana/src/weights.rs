//! Combination of per-channel particle weights into one weight per particle.

use std::collections::BTreeMap;

use flow_core::errors::{ErrorInfo, FlowError};
use flow_core::{KinematicChannel, ParticleSample};
use serde::{Deserialize, Serialize};

/// Use/reset switches for one kinematic weight channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelFlags {
    /// Multiply this channel into the aggregated weight.
    #[serde(rename = "use", default)]
    pub enabled: bool,
    /// Overwrite this channel with unit weights in the secondary pass.
    #[serde(default)]
    pub reset: bool,
}

impl ChannelFlags {
    /// Flags for an enabled channel, optionally reset in the secondary pass.
    pub const fn enabled(reset: bool) -> Self {
        Self {
            enabled: true,
            reset,
        }
    }
}

/// Builds aggregated particle weights from the channels of a [`ParticleSample`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightAggregator {
    flags: BTreeMap<KinematicChannel, ChannelFlags>,
}

impl WeightAggregator {
    /// Aggregator with the given per-channel flags. Missing channels are off.
    pub fn new(flags: BTreeMap<KinematicChannel, ChannelFlags>) -> Self {
        Self { flags }
    }

    /// Aggregator that ignores every weight channel.
    pub fn unweighted() -> Self {
        Self::default()
    }

    /// Flags configured for `channel`.
    pub fn flags(&self, channel: KinematicChannel) -> ChannelFlags {
        self.flags.get(&channel).copied().unwrap_or_default()
    }

    /// True when at least one channel is enabled.
    pub fn uses_weights(&self) -> bool {
        self.flags.values().any(|flags| flags.enabled)
    }

    /// True when at least one enabled channel is flagged for reset.
    pub fn resets_weights(&self) -> bool {
        self.flags.values().any(|flags| flags.enabled && flags.reset)
    }

    fn enabled_channels(&self) -> impl Iterator<Item = KinematicChannel> + '_ {
        self.flags
            .iter()
            .filter(|(_, flags)| flags.enabled)
            .map(|(channel, _)| *channel)
    }

    /// Per-particle product of every enabled, non-empty channel.
    pub fn aggregate(&self, sample: &ParticleSample) -> Result<Vec<f64>, FlowError> {
        let mut weights = Vec::with_capacity(sample.len());
        self.aggregate_into(sample, &mut weights)?;
        Ok(weights)
    }

    /// Buffer-reusing variant of [`WeightAggregator::aggregate`].
    ///
    /// Enabled channels must hold finite, strictly positive weights.
    pub fn aggregate_into(
        &self,
        sample: &ParticleSample,
        out: &mut Vec<f64>,
    ) -> Result<(), FlowError> {
        out.clear();
        out.resize(sample.len(), 1.0);
        for channel in self.enabled_channels() {
            let weights = sample.channel(channel);
            if weights.is_empty() {
                continue;
            }
            if weights.len() != sample.len() {
                return Err(FlowError::Weights(
                    ErrorInfo::new("channel-length", "weight channel does not match particle count")
                        .with_context("channel", channel.name())
                        .with_context("particles", sample.len())
                        .with_context("weights", weights.len()),
                ));
            }
            if let Some(particle) = weights.iter().position(|w| !w.is_finite() || *w <= 0.0) {
                return Err(FlowError::Weights(
                    ErrorInfo::new("invalid-weight", "particle weights must be finite and positive")
                        .with_context("channel", channel.name())
                        .with_context("particle", particle)
                        .with_context("weight", weights[particle]),
                ));
            }
            for (total, weight) in out.iter_mut().zip(weights) {
                *total *= weight;
            }
        }
        Ok(())
    }

    /// Sets every weight of each reset-flagged channel in `sample` to 1.0.
    pub fn reset_weights(&self, sample: &mut ParticleSample) {
        for (channel, flags) in &self.flags {
            if !flags.reset {
                continue;
            }
            if let Some(weights) = sample.channel_mut(*channel) {
                weights.fill(1.0);
            }
        }
    }
}
