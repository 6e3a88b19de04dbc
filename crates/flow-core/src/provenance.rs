//! What produced a run report: configuration hash, seed and crate versions.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Layout version of the JSON run report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SchemaVersion {
    /// Bumped when fields are renamed or removed.
    pub major: u32,
    /// Bumped when fields are added.
    pub minor: u32,
}

impl SchemaVersion {
    /// Layout written by this build.
    pub const CURRENT: SchemaVersion = SchemaVersion { major: 1, minor: 0 };
}

impl Default for SchemaVersion {
    fn default() -> Self {
        Self::CURRENT
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// Inputs needed to reproduce a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RunProvenance {
    /// SHA-256 of the canonical JSON form of the analysis configuration.
    pub config_hash: String,
    /// Master seed from which every generated event stream derives.
    pub seed: u64,
    /// Events handed to the pipeline, including ones that filled nothing.
    pub events: u64,
    /// Crate name to version for every flow crate involved.
    pub tool_versions: BTreeMap<String, String>,
}

impl RunProvenance {
    /// Provenance carrying the `flow-core` version.
    pub fn new(config_hash: String, seed: u64, events: u64) -> Self {
        Self {
            config_hash,
            seed,
            events,
            tool_versions: BTreeMap::new(),
        }
        .with_tool(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }

    /// Records `version` of crate `name`.
    pub fn with_tool(mut self, name: &str, version: &str) -> Self {
        self.tool_versions.insert(name.to_string(), version.to_string());
        self
    }
}
