//! Weighted running means, one bin per configured correlator.

use std::collections::BTreeMap;

use flow_core::errors::{ErrorInfo, FlowError};
use flow_core::CorrelatorSpec;
use serde::{Deserialize, Serialize};

/// Partial sums of one weighted running mean.
///
/// All fields add under merge, so bins filled on different shards combine
/// into the same result as a single serial pass (up to rounding).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileBin {
    sum_value_weight: f64,
    sum_weight: f64,
    sum_value2_weight: f64,
    sum_weight2: f64,
    entries: u64,
}

impl ProfileBin {
    /// Adds one `(value, weight)` pair.
    pub fn fill(&mut self, value: f64, weight: f64) {
        self.sum_value_weight += value * weight;
        self.sum_weight += weight;
        self.sum_value2_weight += value * value * weight;
        self.sum_weight2 += weight * weight;
        self.entries += 1;
    }

    /// Weighted mean, `None` while the bin holds no weight.
    pub fn mean(&self) -> Option<f64> {
        (self.sum_weight > 0.0).then(|| self.sum_value_weight / self.sum_weight)
    }

    /// Total accumulated weight.
    pub fn sum_weights(&self) -> f64 {
        self.sum_weight
    }

    /// Number of fills.
    pub fn entries(&self) -> u64 {
        self.entries
    }

    /// Weighted standard deviation of the filled values.
    pub fn spread(&self) -> Option<f64> {
        let mean = self.mean()?;
        let second = self.sum_value2_weight / self.sum_weight;
        Some((second - mean * mean).max(0.0).sqrt())
    }

    /// Kish effective number of entries, `(Σw)² / Σw²`.
    pub fn effective_entries(&self) -> Option<f64> {
        (self.sum_weight2 > 0.0).then(|| self.sum_weight * self.sum_weight / self.sum_weight2)
    }

    /// Spread divided by the square root of the effective entries.
    pub fn error_of_mean(&self) -> Option<f64> {
        Some(self.spread()? / self.effective_entries()?.sqrt())
    }

    /// Adds the partial sums of `other`.
    pub fn merge(&mut self, other: &ProfileBin) {
        self.sum_value_weight += other.sum_value_weight;
        self.sum_weight += other.sum_weight;
        self.sum_value2_weight += other.sum_value2_weight;
        self.sum_weight2 += other.sum_weight2;
        self.entries += other.entries;
    }
}

/// Labelled list of [`ProfileBin`]s indexed by correlator position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedProfile {
    labels: Vec<String>,
    bins: Vec<ProfileBin>,
}

impl WeightedProfile {
    /// Empty profile with one bin per label.
    pub fn new(labels: Vec<String>) -> Self {
        let bins = vec![ProfileBin::default(); labels.len()];
        Self { labels, bins }
    }

    /// Empty profile labelled `<<n>>_{h1,...,hn}` for each correlator.
    pub fn for_correlators(correlators: &[CorrelatorSpec]) -> Self {
        Self::new(correlators.iter().map(CorrelatorSpec::label).collect())
    }

    /// Accumulates `value` with `weight` into bin `index`.
    ///
    /// Non-finite values and non-positive weights are rejected.
    pub fn fill(&mut self, index: usize, value: f64, weight: f64) -> Result<(), FlowError> {
        let bins = self.bins.len();
        let bin = self.bins.get_mut(index).ok_or_else(|| {
            FlowError::Bounds(
                ErrorInfo::new("bin-out-of-range", "profile has no such bin")
                    .with_context("index", index)
                    .with_context("bins", bins),
            )
        })?;
        if !value.is_finite() || !weight.is_finite() || weight <= 0.0 {
            return Err(FlowError::Insufficient(
                ErrorInfo::new("invalid-entry", "profile entries need a finite value and positive weight")
                    .with_context("index", index)
                    .with_context("value", value)
                    .with_context("weight", weight),
            ));
        }
        bin.fill(value, weight);
        Ok(())
    }

    /// Bin at `index`.
    pub fn bin(&self, index: usize) -> Option<&ProfileBin> {
        self.bins.get(index)
    }

    /// All bins in correlator order.
    pub fn bins(&self) -> &[ProfileBin] {
        &self.bins
    }

    /// Bin labels in correlator order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of bins.
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// True when the profile has no bins.
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Adds the bins of `other`, which must carry identical labels.
    pub fn merge(&mut self, other: &WeightedProfile) -> Result<(), FlowError> {
        if self.labels != other.labels {
            return Err(FlowError::Config(
                ErrorInfo::new("profile-mismatch", "cannot merge profiles with different bins")
                    .with_context("left", self.labels.join(" "))
                    .with_context("right", other.labels.join(" ")),
            ));
        }
        for (bin, other) in self.bins.iter_mut().zip(&other.bins) {
            bin.merge(other);
        }
        Ok(())
    }
}

/// Named families of results sharing one correlator configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResultSet {
    /// Correlators of the data with all enabled weights applied.
    Data,
    /// Same data re-evaluated after resetting the flagged weight channels.
    DataWeightsReset,
    /// Expected values from the generator's input flow harmonics.
    Theory,
}

impl ResultSet {
    /// All result sets in canonical order.
    pub const ALL: [ResultSet; 3] = [
        ResultSet::Data,
        ResultSet::DataWeightsReset,
        ResultSet::Theory,
    ];

    /// Name used in reports.
    pub fn name(&self) -> &'static str {
        match self {
            ResultSet::Data => "data",
            ResultSet::DataWeightsReset => "data-weights-reset",
            ResultSet::Theory => "theory",
        }
    }
}

/// One [`WeightedProfile`] per [`ResultSet`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSet {
    profiles: BTreeMap<ResultSet, WeightedProfile>,
}

impl ProfileSet {
    /// Empty profiles for every result set.
    pub fn for_correlators(correlators: &[CorrelatorSpec]) -> Self {
        let template = WeightedProfile::for_correlators(correlators);
        Self {
            profiles: ResultSet::ALL
                .iter()
                .map(|set| (*set, template.clone()))
                .collect(),
        }
    }

    /// Profile of `set`.
    pub fn profile(&self, set: ResultSet) -> Option<&WeightedProfile> {
        self.profiles.get(&set)
    }

    /// Fills bin `index` of the profile for `set`.
    pub fn fill(
        &mut self,
        set: ResultSet,
        index: usize,
        value: f64,
        weight: f64,
    ) -> Result<(), FlowError> {
        match self.profiles.get_mut(&set) {
            Some(profile) => profile.fill(index, value, weight),
            None => Err(FlowError::Config(
                ErrorInfo::new("unknown-result-set", "result set not booked")
                    .with_context("set", set.name()),
            )),
        }
    }

    /// Iterates over `(set, profile)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (ResultSet, &WeightedProfile)> {
        self.profiles.iter().map(|(set, profile)| (*set, profile))
    }

    /// Merges every profile of `other` into the matching profile here.
    pub fn merge(&mut self, other: &ProfileSet) -> Result<(), FlowError> {
        for (set, profile) in &other.profiles {
            match self.profiles.get_mut(set) {
                Some(mine) => mine.merge(profile)?,
                None => {
                    self.profiles.insert(*set, profile.clone());
                }
            }
        }
        Ok(())
    }
}
