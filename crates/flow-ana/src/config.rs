use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use flow_core::errors::{ErrorInfo, FlowError};
use flow_core::{CorrelatorSpec, KinematicChannel, MAX_CORRELATOR_ORDER, MAX_HARMONIC};
use flow_qvec::required_bounds;
use serde::{Deserialize, Serialize};

use crate::serde::{from_yaml_slice, to_yaml_string};
use crate::weights::{ChannelFlags, WeightAggregator};

fn config_error(code: &str, message: impl Into<String>) -> FlowError {
    FlowError::Config(ErrorInfo::new(code, message))
}

/// YAML-configurable parameters of one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Correlators in bin order.
    pub correlators: Vec<CorrelatorSpec>,
    /// Q-vector bounds; derived from the correlators when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<QVectorBounds>,
    /// Use/reset flags per weight channel.
    #[serde(default)]
    pub weights: BTreeMap<KinematicChannel, ChannelFlags>,
    /// Toy event generation. Absent for externally supplied events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monte_carlo: Option<MonteCarloConfig>,
    /// Master seed.
    #[serde(default)]
    pub seed_policy: SeedPolicy,
    /// Worker threads used for sharded processing.
    #[serde(default = "default_threads")]
    pub threads: usize,
}

fn default_threads() -> usize {
    1
}

/// Inclusive Q-vector table bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QVectorBounds {
    /// Largest harmonic stored.
    pub max_harmonic: usize,
    /// Largest weight power stored.
    pub max_power: usize,
}

/// Deterministic seeding configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedPolicy {
    /// Master seed from which every event substream is derived.
    #[serde(default = "default_master_seed")]
    pub master_seed: u64,
}

fn default_master_seed() -> u64 {
    0x05EE_D5EE_DF10_5EED_u64
}

impl Default for SeedPolicy {
    fn default() -> Self {
        Self {
            master_seed: default_master_seed(),
        }
    }
}

/// Settings of the on-the-fly toy event generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloConfig {
    /// Number of events to generate.
    pub events: u64,
    /// Candidate particles per event.
    pub multiplicity: Multiplicity,
    /// Input flow amplitudes `v1, v2, ...`.
    pub flow_harmonics: Vec<f64>,
    /// Optional detector acceptance per channel. Only `phi` is simulated.
    #[serde(default)]
    pub acceptance: BTreeMap<KinematicChannel, AcceptanceMap>,
}

/// Fixed multiplicity or a uniform range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Multiplicity {
    /// Every event has exactly this many candidates.
    Fixed {
        /// Candidate count.
        fixed: usize,
    },
    /// Candidate count drawn uniformly from `min..=max`.
    Range {
        /// Smallest count.
        min: usize,
        /// Largest count.
        max: usize,
    },
}

/// Binned acceptance over `[0, 2π)` with the weight assigned to accepted
/// particles in each bin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcceptanceMap {
    /// Acceptance probability per equal-width bin.
    pub bins: Vec<f64>,
    /// Weight attached to accepted particles, one per bin. Unit when empty.
    #[serde(default)]
    pub weights: Vec<f64>,
}

impl AnalysisConfig {
    /// Configuration for externally supplied events with derived bounds.
    pub fn new(correlators: Vec<CorrelatorSpec>) -> Self {
        Self {
            correlators,
            bounds: None,
            weights: BTreeMap::new(),
            monte_carlo: None,
            seed_policy: SeedPolicy::default(),
            threads: default_threads(),
        }
    }

    /// Parses and validates a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, FlowError> {
        let config: AnalysisConfig = from_yaml_slice(yaml.as_bytes())?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration back to YAML.
    pub fn to_yaml_string(&self) -> Result<String, FlowError> {
        to_yaml_string(self)
    }

    /// Bounds actually used for the Q-vector table.
    pub fn resolved_bounds(&self) -> QVectorBounds {
        self.bounds.unwrap_or_else(|| {
            let (max_harmonic, max_power) = required_bounds(&self.correlators);
            QVectorBounds {
                max_harmonic,
                max_power,
            }
        })
    }

    /// Aggregator for the configured weight channels.
    pub fn weight_aggregator(&self) -> WeightAggregator {
        WeightAggregator::new(self.weights.clone())
    }

    /// Checks every correlator, bound and generator setting.
    pub fn validate(&self) -> Result<(), FlowError> {
        if self.correlators.is_empty() {
            return Err(FlowError::Config(
                ErrorInfo::new("no-correlators", "at least one correlator must be configured")
                    .with_hint("add e.g. `correlators: [[2, -2]]`"),
            ));
        }
        for (index, spec) in self.correlators.iter().enumerate() {
            if spec.order() > MAX_CORRELATOR_ORDER {
                return Err(FlowError::Config(
                    ErrorInfo::new("order-unsupported", "correlator order exceeds supported maximum")
                        .with_context("correlator", spec.label())
                        .with_context("index", index)
                        .with_context("order", spec.order())
                        .with_context("max_order", MAX_CORRELATOR_ORDER),
                ));
            }
        }
        if let Some(bounds) = self.bounds {
            let harmonic_limit = MAX_HARMONIC as usize * MAX_CORRELATOR_ORDER;
            if bounds.max_harmonic > harmonic_limit || bounds.max_power > MAX_CORRELATOR_ORDER {
                return Err(FlowError::Bounds(
                    ErrorInfo::new("bounds-too-large", "Q-vector bounds exceed supported maximum")
                        .with_context("max_harmonic", bounds.max_harmonic)
                        .with_context("harmonic_limit", harmonic_limit)
                        .with_context("max_power", bounds.max_power)
                        .with_context("power_limit", MAX_CORRELATOR_ORDER),
                ));
            }
            let (max_harmonic, max_power) = required_bounds(&self.correlators);
            if bounds.max_harmonic < max_harmonic || bounds.max_power < max_power {
                let offending = self
                    .correlators
                    .iter()
                    .find(|spec| {
                        spec.max_partial_sum() > bounds.max_harmonic
                            || spec.order() > bounds.max_power
                    })
                    .map(CorrelatorSpec::label)
                    .unwrap_or_default();
                return Err(FlowError::Bounds(
                    ErrorInfo::new("bounds-too-small", "Q-vector bounds do not cover all correlators")
                        .with_context("correlator", offending)
                        .with_context("max_harmonic", bounds.max_harmonic)
                        .with_context("required_harmonic", max_harmonic)
                        .with_context("max_power", bounds.max_power)
                        .with_context("required_power", max_power)
                        .with_hint("omit `bounds` to derive them automatically"),
                ));
            }
        }
        if self.threads == 0 {
            return Err(config_error("threads", "thread count must be positive"));
        }
        if let Some(mc) = &self.monte_carlo {
            mc.validate()?;
        }
        Ok(())
    }
}

impl MonteCarloConfig {
    /// Checks flow amplitudes, multiplicity and acceptance maps.
    pub fn validate(&self) -> Result<(), FlowError> {
        if self.flow_harmonics.is_empty() {
            return Err(FlowError::Config(
                ErrorInfo::new("flow-harmonics", "Monte Carlo needs at least one flow amplitude")
                    .with_hint("list v1, v2, ... under `flow_harmonics`"),
            ));
        }
        if let Some(bad) = self.flow_harmonics.iter().find(|v| !v.is_finite()) {
            return Err(FlowError::Config(
                ErrorInfo::new("flow-harmonics", "flow amplitudes must be finite")
                    .with_context("value", bad),
            ));
        }
        if let Multiplicity::Range { min, max } = self.multiplicity {
            if min > max {
                return Err(FlowError::Config(
                    ErrorInfo::new("multiplicity-range", "multiplicity range is inverted")
                        .with_context("min", min)
                        .with_context("max", max),
                ));
            }
        }
        for (channel, map) in &self.acceptance {
            map.validate(*channel)?;
        }
        Ok(())
    }
}

impl AcceptanceMap {
    /// Bin holding `phi`, which must lie in `[0, 2π)`.
    pub fn bin_of(&self, phi: f64) -> usize {
        let bins = self.bins.len();
        let index = (phi / std::f64::consts::TAU * bins as f64).floor() as usize;
        index.min(bins.saturating_sub(1))
    }

    /// Acceptance probability at `phi`.
    pub fn acceptance(&self, phi: f64) -> f64 {
        self.bins.get(self.bin_of(phi)).copied().unwrap_or(1.0)
    }

    /// Weight attached to a particle accepted at `phi`.
    pub fn weight(&self, phi: f64) -> f64 {
        self.weights.get(self.bin_of(phi)).copied().unwrap_or(1.0)
    }

    fn validate(&self, channel: KinematicChannel) -> Result<(), FlowError> {
        let malformed = |message: &str| {
            FlowError::Config(
                ErrorInfo::new("acceptance-map", message.to_string())
                    .with_context("channel", channel.name())
                    .with_context("bins", self.bins.len())
                    .with_context("weights", self.weights.len()),
            )
        };
        if channel != KinematicChannel::Phi {
            return Err(malformed("acceptance is only simulated in phi"));
        }
        if self.bins.is_empty() {
            return Err(malformed("acceptance map has no bins"));
        }
        if !self.weights.is_empty() && self.weights.len() != self.bins.len() {
            return Err(malformed("acceptance weights must match bins"));
        }
        if self.bins.iter().any(|p| !(0.0..=1.0).contains(p)) {
            return Err(malformed("acceptance probabilities must lie in [0, 1]"));
        }
        if self.weights.iter().any(|w| !w.is_finite() || *w <= 0.0) {
            return Err(malformed("acceptance weights must be positive"));
        }
        Ok(())
    }
}

/// Loads and validates a configuration file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AnalysisConfig, FlowError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|err| {
        FlowError::Serde(
            ErrorInfo::new("config-read", err.to_string())
                .with_context("path", path.display()),
        )
    })?;
    let config: AnalysisConfig = from_yaml_slice(&bytes)?;
    config.validate()?;
    Ok(config)
}
