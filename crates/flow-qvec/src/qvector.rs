//! Q-vector table: weighted directional sums indexed by harmonic and power.

use flow_core::errors::{ErrorInfo, FlowError};
use flow_core::{max_partial_sum, CorrelatorSpec};
use num_complex::Complex64;

/// Largest number of complex entries a table may hold.
pub const MAX_TABLE_ENTRIES: usize = 1 << 20;

/// Dense table of `Q(h, p) = Σ_i w_i^p · exp(i·h·φ_i)`.
///
/// Harmonics `0..=max_harmonic` and powers `0..=max_power` are stored.
/// Negative harmonics are derived on lookup as complex conjugates.
#[derive(Debug, Clone, PartialEq)]
pub struct QVectorTable {
    max_harmonic: usize,
    max_power: usize,
    values: Vec<Complex64>,
    multiplicity: usize,
}

impl QVectorTable {
    /// Creates a zeroed table with inclusive bounds.
    ///
    /// Fails when the table would exceed [`MAX_TABLE_ENTRIES`].
    pub fn new(max_harmonic: usize, max_power: usize) -> Result<Self, FlowError> {
        let entries = max_harmonic
            .checked_add(1)
            .zip(max_power.checked_add(1))
            .and_then(|(rows, stride)| rows.checked_mul(stride))
            .filter(|entries| *entries <= MAX_TABLE_ENTRIES)
            .ok_or_else(|| {
                FlowError::Bounds(
                    ErrorInfo::new("table-too-large", "Q-vector table bounds are too large")
                        .with_context("max_harmonic", max_harmonic)
                        .with_context("max_power", max_power)
                        .with_context("max_entries", MAX_TABLE_ENTRIES),
                )
            })?;
        Ok(Self {
            max_harmonic,
            max_power,
            values: vec![Complex64::new(0.0, 0.0); entries],
            multiplicity: 0,
        })
    }

    /// Creates a table and fills it from one event.
    pub fn build(
        max_harmonic: usize,
        max_power: usize,
        angles: &[f64],
        weights: Option<&[f64]>,
    ) -> Result<Self, FlowError> {
        let mut table = Self::new(max_harmonic, max_power)?;
        table.fill(angles, weights)?;
        Ok(table)
    }

    /// Recomputes every entry from `angles` and optional parallel `weights`.
    ///
    /// The table is zeroed first, so repeated calls never accumulate across
    /// events. Without weights every particle has unit weight.
    pub fn fill(&mut self, angles: &[f64], weights: Option<&[f64]>) -> Result<(), FlowError> {
        if let Some(weights) = weights {
            if weights.len() != angles.len() {
                return Err(FlowError::Weights(
                    ErrorInfo::new("weight-length", "weights do not match particle count")
                        .with_context("particles", angles.len())
                        .with_context("weights", weights.len()),
                ));
            }
        }

        self.values.fill(Complex64::new(0.0, 0.0));
        self.multiplicity = angles.len();

        let stride = self.max_power + 1;
        for (index, &phi) in angles.iter().enumerate() {
            let weight = weights.map_or(1.0, |w| w[index]);
            for h in 0..=self.max_harmonic {
                let phase = Complex64::from_polar(1.0, h as f64 * phi);
                let row = &mut self.values[h * stride..(h + 1) * stride];
                for (p, entry) in row.iter_mut().enumerate() {
                    *entry += weight.powi(p as i32) * phase;
                }
            }
        }
        Ok(())
    }

    /// Looks up `Q(n, p)`, reflecting negative harmonics by conjugation.
    pub fn q(&self, n: i32, p: usize) -> Result<Complex64, FlowError> {
        if n.unsigned_abs() as usize > self.max_harmonic {
            return Err(FlowError::Bounds(
                ErrorInfo::new("harmonic-out-of-bounds", "harmonic exceeds Q-vector table")
                    .with_context("harmonic", n)
                    .with_context("max_harmonic", self.max_harmonic),
            ));
        }
        if p > self.max_power {
            return Err(FlowError::Bounds(
                ErrorInfo::new("power-out-of-bounds", "power exceeds Q-vector table")
                    .with_context("power", p)
                    .with_context("max_power", self.max_power),
            ));
        }
        Ok(self.lookup(n, p))
    }

    /// Unchecked variant of [`QVectorTable::q`] for validated harmonic sets.
    pub(crate) fn lookup(&self, n: i32, p: usize) -> Complex64 {
        let value = self.values[n.unsigned_abs() as usize * (self.max_power + 1) + p];
        if n >= 0 {
            value
        } else {
            value.conj()
        }
    }

    /// Fails unless every merge of `harmonics` stays within the table.
    ///
    /// The recursion only queries partial sums of the harmonics and powers up
    /// to the correlator order, so this single check covers every lookup made
    /// while evaluating the correlator and its combinatorial weight.
    pub fn ensure_covers(&self, harmonics: &[i32]) -> Result<(), FlowError> {
        let reach = max_partial_sum(harmonics);
        if reach > self.max_harmonic {
            return Err(FlowError::Bounds(
                ErrorInfo::new("harmonic-out-of-bounds", "correlator reaches beyond max harmonic")
                    .with_context("harmonics", format!("{harmonics:?}"))
                    .with_context("required", reach)
                    .with_context("max_harmonic", self.max_harmonic)
                    .with_hint("raise bounds.max_harmonic or drop the correlator"),
            ));
        }
        if harmonics.len() > self.max_power {
            return Err(FlowError::Bounds(
                ErrorInfo::new("power-out-of-bounds", "correlator order exceeds max power")
                    .with_context("harmonics", format!("{harmonics:?}"))
                    .with_context("order", harmonics.len())
                    .with_context("max_power", self.max_power)
                    .with_hint("raise bounds.max_power to at least the correlator order"),
            ));
        }
        Ok(())
    }

    /// Largest stored harmonic.
    pub fn max_harmonic(&self) -> usize {
        self.max_harmonic
    }

    /// Largest stored power.
    pub fn max_power(&self) -> usize {
        self.max_power
    }

    /// Number of particles used in the last fill.
    pub fn multiplicity(&self) -> usize {
        self.multiplicity
    }
}

/// Smallest `(max_harmonic, max_power)` covering every correlator in `specs`.
pub fn required_bounds(specs: &[CorrelatorSpec]) -> (usize, usize) {
    specs.iter().fold((0, 0), |(h, p), spec| {
        (h.max(spec.max_partial_sum()), p.max(spec.order()))
    })
}
