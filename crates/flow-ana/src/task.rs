//! Per-event pipeline: weights, Q-vectors, correlators, profiles.

use flow_core::errors::FlowError;
use flow_core::{CorrelatorSpec, ParticleSample};
use flow_qvec::{evaluate, QVectorTable};
use log::trace;
use serde::{Deserialize, Serialize};

use crate::config::{AnalysisConfig, QVectorBounds};
use crate::diagnostics::{SkipDiagnostics, SkipReason};
use crate::profile::{ProfileSet, ResultSet};
use crate::theory::fill_theory;
use crate::weights::WeightAggregator;

/// Accumulated state of a processing run, detached from its scratch buffers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskOutput {
    /// Profiles per result set.
    pub profiles: ProfileSet,
    /// Skip counters.
    pub diagnostics: SkipDiagnostics,
}

impl TaskOutput {
    /// Adds the partial sums and counters of `other`.
    pub fn merge(&mut self, other: &TaskOutput) -> Result<(), FlowError> {
        self.profiles.merge(&other.profiles)?;
        self.diagnostics.merge(&other.diagnostics);
        Ok(())
    }
}

/// Owns one Q-vector table and evaluates every configured correlator on each
/// event handed to [`FlowTask::process_event`].
#[derive(Debug, Clone)]
pub struct FlowTask {
    correlators: Vec<CorrelatorSpec>,
    aggregator: WeightAggregator,
    table: QVectorTable,
    weights: Vec<f64>,
    reset_sample: ParticleSample,
    output: TaskOutput,
}

impl FlowTask {
    /// Creates a task after checking that `bounds` cover every correlator.
    pub fn new(
        correlators: Vec<CorrelatorSpec>,
        bounds: QVectorBounds,
        aggregator: WeightAggregator,
    ) -> Result<Self, FlowError> {
        let table = QVectorTable::new(bounds.max_harmonic, bounds.max_power)?;
        for spec in &correlators {
            table.ensure_covers(spec.harmonics())?;
        }
        Ok(Self {
            output: TaskOutput {
                profiles: ProfileSet::for_correlators(&correlators),
                diagnostics: SkipDiagnostics::new(correlators.len()),
            },
            correlators,
            aggregator,
            table,
            weights: Vec::new(),
            reset_sample: ParticleSample::new(),
        })
    }

    /// Creates a task from a validated configuration.
    pub fn from_config(config: &AnalysisConfig) -> Result<Self, FlowError> {
        config.validate()?;
        Self::new(
            config.correlators.clone(),
            config.resolved_bounds(),
            config.weight_aggregator(),
        )
    }

    /// Runs the data pass on `sample` and, when weights are used and some
    /// channel is flagged for reset, a second pass with those channels reset.
    pub fn process_event(&mut self, sample: &ParticleSample) -> Result<(), FlowError> {
        self.output.diagnostics.record_event(sample.len());
        let use_weights = self.aggregator.uses_weights();
        self.run_pass(ResultSet::Data, sample, use_weights)?;

        if use_weights && self.aggregator.resets_weights() {
            let mut reset = std::mem::take(&mut self.reset_sample);
            reset.clone_from(sample);
            self.aggregator.reset_weights(&mut reset);
            let result = self.run_pass(ResultSet::DataWeightsReset, &reset, true);
            self.reset_sample = reset;
            result?;
        }
        Ok(())
    }

    fn run_pass(
        &mut self,
        set: ResultSet,
        sample: &ParticleSample,
        use_weights: bool,
    ) -> Result<(), FlowError> {
        let weights = if use_weights {
            self.aggregator.aggregate_into(sample, &mut self.weights)?;
            Some(self.weights.as_slice())
        } else {
            None
        };
        self.table.fill(sample.angles(), weights)?;

        for (index, spec) in self.correlators.iter().enumerate() {
            if sample.len() < spec.order() {
                trace!(
                    "skip {} in {}: {} particles",
                    spec,
                    set.name(),
                    sample.len()
                );
                if set == ResultSet::Data {
                    self.output
                        .diagnostics
                        .record_skip(index, SkipReason::TooFewParticles);
                }
                continue;
            }
            let correlation = evaluate(&self.table, spec)?;
            match correlation.mean() {
                Some(value) => {
                    self.output
                        .profiles
                        .fill(set, index, value, correlation.weight)?;
                }
                None => {
                    trace!(
                        "skip {} in {}: combinatorial weight {}",
                        spec,
                        set.name(),
                        correlation.weight
                    );
                    if set == ResultSet::Data {
                        self.output
                            .diagnostics
                            .record_skip(index, SkipReason::DegenerateWeight);
                    }
                }
            }
        }
        Ok(())
    }

    /// Fills the theory result set from input flow amplitudes.
    pub fn fill_theory(&mut self, flow_harmonics: &[f64]) -> Result<(), FlowError> {
        fill_theory(&mut self.output.profiles, &self.correlators, flow_harmonics)
    }

    /// Configured correlators in bin order.
    pub fn correlators(&self) -> &[CorrelatorSpec] {
        &self.correlators
    }

    /// Q-vector table of the most recent pass.
    pub fn table(&self) -> &QVectorTable {
        &self.table
    }

    /// Profiles accumulated so far.
    pub fn profiles(&self) -> &ProfileSet {
        &self.output.profiles
    }

    /// Skip counters accumulated so far.
    pub fn diagnostics(&self) -> &SkipDiagnostics {
        &self.output.diagnostics
    }

    /// Consumes the task, returning its accumulated output.
    pub fn into_output(self) -> TaskOutput {
        self.output
    }
}
