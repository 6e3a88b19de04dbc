use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, FlowError};

/// Largest correlator order accepted by the configuration layer.
///
/// The recursive evaluator has no intrinsic limit, but its cost grows with
/// the number of set partitions of the harmonic list.
pub const MAX_CORRELATOR_ORDER: usize = 12;

/// Largest absolute harmonic accepted in a correlator.
///
/// Together with [`MAX_CORRELATOR_ORDER`] this caps the Q-vector table at
/// `MAX_HARMONIC * MAX_CORRELATOR_ORDER` harmonics.
pub const MAX_HARMONIC: u32 = 64;

/// Largest absolute value of any sub-sum of `harmonics`.
///
/// Merging harmonics during correlator evaluation sums subsets, so the
/// extremes are the sum of all positive and the sum of all negative entries.
pub fn max_partial_sum(harmonics: &[i32]) -> usize {
    let positive: i64 = harmonics.iter().filter(|h| **h > 0).map(|h| *h as i64).sum();
    let negative: i64 = harmonics.iter().filter(|h| **h < 0).map(|h| *h as i64).sum();
    positive.max(-negative) as usize
}

/// Kinematic variable that may carry a per-particle weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KinematicChannel {
    /// Transverse momentum.
    Pt,
    /// Azimuthal angle.
    Phi,
    /// Pseudorapidity.
    Eta,
}

impl KinematicChannel {
    /// Short lowercase name used in configuration files and reports.
    pub fn name(&self) -> &'static str {
        match self {
            KinematicChannel::Pt => "pt",
            KinematicChannel::Phi => "phi",
            KinematicChannel::Eta => "eta",
        }
    }
}

/// Ordered list of signed harmonics describing one n-particle correlator.
///
/// The order of the list does not change the correlator value, only its
/// label. The list is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<i32>", into = "Vec<i32>")]
pub struct CorrelatorSpec {
    harmonics: Vec<i32>,
}

impl CorrelatorSpec {
    /// Creates a correlator from its harmonics.
    pub fn new(harmonics: Vec<i32>) -> Result<Self, FlowError> {
        if harmonics.is_empty() {
            return Err(FlowError::Config(
                ErrorInfo::new("empty-correlator", "correlator needs at least one harmonic")
                    .with_hint("use e.g. [2, -2] for the two-particle correlator"),
            ));
        }
        if let Some(harmonic) = harmonics.iter().find(|h| h.unsigned_abs() > MAX_HARMONIC) {
            return Err(FlowError::Config(
                ErrorInfo::new("harmonic-unsupported", "harmonic exceeds supported maximum")
                    .with_context("harmonic", harmonic)
                    .with_context("max_harmonic", MAX_HARMONIC),
            ));
        }
        Ok(Self { harmonics })
    }

    /// Harmonics in configured order.
    pub fn harmonics(&self) -> &[i32] {
        &self.harmonics
    }

    /// Number of particles correlated.
    pub fn order(&self) -> usize {
        self.harmonics.len()
    }

    /// Correlator of the same order with every harmonic set to zero.
    ///
    /// Its value is the combinatorial weight of this correlator.
    pub fn zeros(&self) -> Self {
        Self {
            harmonics: vec![0; self.harmonics.len()],
        }
    }

    /// Largest absolute harmonic any merge of the list can produce.
    pub fn max_partial_sum(&self) -> usize {
        max_partial_sum(&self.harmonics)
    }

    /// Report label of the form `<<n>>_{h1,h2,...,hn}`.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CorrelatorSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<<{}>>_{{", self.harmonics.len())?;
        for (idx, harmonic) in self.harmonics.iter().enumerate() {
            if idx > 0 {
                write!(f, ",")?;
            }
            write!(f, "{harmonic}")?;
        }
        write!(f, "}}")
    }
}

impl TryFrom<Vec<i32>> for CorrelatorSpec {
    type Error = FlowError;

    fn try_from(harmonics: Vec<i32>) -> Result<Self, Self::Error> {
        Self::new(harmonics)
    }
}

impl From<CorrelatorSpec> for Vec<i32> {
    fn from(spec: CorrelatorSpec) -> Self {
        spec.harmonics
    }
}
