#![deny(missing_docs)]
#![doc = "Event pipeline, weighted profiles, Monte Carlo generation and reporting for flow correlators."]

/// YAML analysis configuration and validation.
pub mod config;
pub mod diagnostics;
pub mod mc;
/// Sharded event processing on a rayon pool.
pub mod parallel;
pub mod profile;
/// Run reports with provenance.
pub mod report;
/// Canonical JSON and YAML helpers.
pub mod serde;
pub mod task;
/// Expected correlators for generated flow.
pub mod theory;
pub mod weights;

pub use config::{
    load_config, AcceptanceMap, AnalysisConfig, MonteCarloConfig, Multiplicity, QVectorBounds,
    SeedPolicy,
};
pub use diagnostics::{SkipDiagnostics, SkipReason};
pub use mc::McEventGenerator;
pub use parallel::{process_sharded, run_monte_carlo, shard_ranges};
pub use profile::{ProfileBin, ProfileSet, ResultSet, WeightedProfile};
pub use report::{CorrelatorSummary, RunReport};
pub use task::{FlowTask, TaskOutput};
pub use theory::{expected_value, fill_theory};
pub use weights::{ChannelFlags, WeightAggregator};
