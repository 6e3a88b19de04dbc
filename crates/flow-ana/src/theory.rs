use flow_core::errors::FlowError;
use flow_core::CorrelatorSpec;

use crate::profile::{ProfileSet, ResultSet};

/// Expected correlator `Π_k v_{|h_k|}` for input amplitudes `v1, v2, ...`.
///
/// Harmonic zero contributes one; harmonics beyond the list contribute zero.
pub fn expected_value(spec: &CorrelatorSpec, flow_harmonics: &[f64]) -> f64 {
    spec.harmonics()
        .iter()
        .map(|h| match h.unsigned_abs() as usize {
            0 => 1.0,
            n => flow_harmonics.get(n - 1).copied().unwrap_or(0.0),
        })
        .product()
}

/// Fills the theory profile once per correlator at unit weight.
pub fn fill_theory(
    profiles: &mut ProfileSet,
    correlators: &[CorrelatorSpec],
    flow_harmonics: &[f64],
) -> Result<(), FlowError> {
    for (index, spec) in correlators.iter().enumerate() {
        let value = expected_value(spec, flow_harmonics);
        profiles.fill(ResultSet::Theory, index, value, 1.0)?;
    }
    Ok(())
}
