use std::collections::BTreeMap;

use flow_core::errors::FlowError;
use flow_core::{RunProvenance, SchemaVersion};
use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::diagnostics::SkipDiagnostics;
use crate::profile::{ResultSet, WeightedProfile};
use crate::serde::stable_hash_string;
use crate::task::TaskOutput;

/// Final numbers for one correlator in one result set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelatorSummary {
    /// Bin label `<<n>>_{h1,...,hn}`.
    pub label: String,
    /// Weighted mean, absent when nothing was filled.
    pub mean: Option<f64>,
    /// Total weight.
    pub sum_weights: f64,
    /// Weighted spread of the per-event values.
    pub spread: Option<f64>,
    /// Spread over the square root of the effective entries.
    pub error: Option<f64>,
    /// Number of fills.
    pub entries: u64,
}

fn summarise(profile: &WeightedProfile) -> Vec<CorrelatorSummary> {
    profile
        .labels()
        .iter()
        .zip(profile.bins())
        .map(|(label, bin)| CorrelatorSummary {
            label: label.clone(),
            mean: bin.mean(),
            sum_weights: bin.sum_weights(),
            spread: bin.spread(),
            error: bin.error_of_mean(),
            entries: bin.entries(),
        })
        .collect()
}

/// Serialized outcome of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Report schema.
    pub schema_version: SchemaVersion,
    /// Seed, config hash and tool versions.
    pub provenance: RunProvenance,
    /// Summaries per result set, in correlator order.
    pub results: BTreeMap<ResultSet, Vec<CorrelatorSummary>>,
    /// Skip counters of the data pass.
    pub diagnostics: SkipDiagnostics,
}

impl RunReport {
    /// Builds the report for `output` produced under `config`.
    pub fn new(config: &AnalysisConfig, output: &TaskOutput) -> Result<Self, FlowError> {
        let provenance = RunProvenance::new(
            stable_hash_string(config)?,
            config.seed_policy.master_seed,
            output.diagnostics.events(),
        )
        .with_tool(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        let results = output
            .profiles
            .iter()
            .map(|(set, profile)| (set, summarise(profile)))
            .collect();
        Ok(Self {
            schema_version: SchemaVersion::CURRENT,
            provenance,
            results,
            diagnostics: output.diagnostics.clone(),
        })
    }

    /// Summaries of `set`, empty when the set was not booked.
    pub fn result_set(&self, set: ResultSet) -> &[CorrelatorSummary] {
        self.results.get(&set).map(Vec::as_slice).unwrap_or(&[])
    }
}
