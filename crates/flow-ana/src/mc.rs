//! On-the-fly toy events drawn from a Fourier azimuthal density.
//!
//! Each event picks a symmetry plane `Ψ` uniformly in `[0, 2π)` and samples
//! angles from `f(φ) ∝ 1 + 2 Σ_n v_n cos(n(φ − Ψ))` by accept/reject against
//! the envelope `1 + 2 Σ_n |v_n|`. Every event owns an RNG substream derived
//! from `(master_seed, event_index)`, so the result does not depend on how
//! events are distributed over workers.

use std::f64::consts::TAU;

use flow_core::errors::{ErrorInfo, FlowError};
use flow_core::{KinematicChannel, ParticleSample, RngHandle};
use rand::Rng;

use crate::config::{AcceptanceMap, MonteCarloConfig, Multiplicity};

/// Rejection attempts allowed per particle before giving up.
const MAX_REJECTIONS: usize = 100_000;

/// Deterministic toy event generator.
#[derive(Debug, Clone)]
pub struct McEventGenerator {
    config: MonteCarloConfig,
    master_seed: u64,
    envelope: f64,
}

impl McEventGenerator {
    /// Validates `config` and prepares the sampling envelope.
    pub fn new(config: MonteCarloConfig, master_seed: u64) -> Result<Self, FlowError> {
        config.validate()?;
        let envelope = 1.0 + 2.0 * config.flow_harmonics.iter().map(|v| v.abs()).sum::<f64>();
        Ok(Self {
            config,
            master_seed,
            envelope,
        })
    }

    /// Number of events configured.
    pub fn events(&self) -> u64 {
        self.config.events
    }

    /// Input flow amplitudes.
    pub fn flow_harmonics(&self) -> &[f64] {
        &self.config.flow_harmonics
    }

    fn phi_acceptance(&self) -> Option<&AcceptanceMap> {
        self.config.acceptance.get(&KinematicChannel::Phi)
    }

    /// Unnormalised density at `phi` for symmetry plane `psi`.
    pub fn density(&self, phi: f64, psi: f64) -> f64 {
        1.0 + 2.0
            * self
                .config
                .flow_harmonics
                .iter()
                .enumerate()
                .map(|(k, v)| v * ((k + 1) as f64 * (phi - psi)).cos())
                .sum::<f64>()
    }

    /// Clears `sample` and fills it with event `event_index`.
    ///
    /// With a phi acceptance map, rejected candidates are dropped and
    /// accepted ones carry the map's weight in the `phi` channel.
    pub fn generate(&self, event_index: u64, sample: &mut ParticleSample) -> Result<(), FlowError> {
        sample.clear();
        let mut rng = RngHandle::for_event(self.master_seed, event_index);
        let candidates = match self.config.multiplicity {
            Multiplicity::Fixed { fixed } => fixed,
            Multiplicity::Range { min, max } => rng.gen_range(min..=max),
        };
        let psi = rng.gen_range(0.0..TAU);
        let acceptance = self.phi_acceptance();

        for _ in 0..candidates {
            let phi = self.sample_angle(&mut rng, psi, event_index)?;
            if let Some(map) = acceptance {
                if rng.gen::<f64>() >= map.acceptance(phi) {
                    continue;
                }
                sample.push(phi);
                sample.push_weight(KinematicChannel::Phi, map.weight(phi));
            } else {
                sample.push(phi);
            }
        }
        Ok(())
    }

    fn sample_angle(&self, rng: &mut RngHandle, psi: f64, event_index: u64) -> Result<f64, FlowError> {
        for _ in 0..MAX_REJECTIONS {
            let phi = rng.gen_range(0.0..TAU);
            let y = rng.gen_range(0.0..self.envelope);
            if y <= self.density(phi, psi) {
                return Ok(phi);
            }
        }
        Err(FlowError::Rng(
            ErrorInfo::new("rejection-exhausted", "no angle accepted by the flow density")
                .with_context("event", event_index)
                .with_context("attempts", MAX_REJECTIONS)
                .with_hint("check that the flow amplitudes describe a positive density"),
        ))
    }
}
