use flow_core::errors::{ErrorInfo, FlowError};
use flow_core::CorrelatorSpec;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::closed_form::{
    five_unchecked, four_unchecked, six_unchecked, three_unchecked, two_unchecked,
};
use crate::qvector::QVectorTable;
use crate::recursion::recurse;

/// Correlator sum of one event together with its combinatorial weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Correlation {
    /// Un-normalised correlator sum over distinct tuples.
    pub sum: Complex64,
    /// Real part of the same formula with all harmonics set to zero.
    pub weight: f64,
}

impl Correlation {
    /// Event-averaged correlator `Re(sum) / weight`.
    ///
    /// Returns `None` when the weight is zero, negative or not finite, which
    /// happens for events with fewer particles than the correlator order.
    pub fn mean(&self) -> Option<f64> {
        if self.weight > 0.0 && self.weight.is_finite() {
            Some(self.sum.re / self.weight)
        } else {
            None
        }
    }
}

/// Evaluation strategy chosen for a correlator order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EvaluationPath {
    /// Single Q-vector lookup.
    Single,
    /// Hand-expanded formula for orders two to six.
    ClosedForm,
    /// Generic recursion.
    Recursion,
}

impl EvaluationPath {
    /// Strategy used by [`evaluate`] for correlators of `order` particles.
    pub fn for_order(order: usize) -> Self {
        match order {
            1 => EvaluationPath::Single,
            2..=6 => EvaluationPath::ClosedForm,
            _ => EvaluationPath::Recursion,
        }
    }
}

/// Evaluates `spec` and its combinatorial weight on a filled table.
pub fn evaluate(table: &QVectorTable, spec: &CorrelatorSpec) -> Result<Correlation, FlowError> {
    evaluate_harmonics(table, spec.harmonics())
}

/// Slice variant of [`evaluate`].
pub fn evaluate_harmonics(
    table: &QVectorTable,
    harmonics: &[i32],
) -> Result<Correlation, FlowError> {
    if harmonics.is_empty() {
        return Err(FlowError::Config(ErrorInfo::new(
            "empty-correlator",
            "correlator needs at least one harmonic",
        )));
    }
    table.ensure_covers(harmonics)?;
    let zeros = vec![0; harmonics.len()];
    Ok(Correlation {
        sum: dispatch(table, harmonics),
        weight: dispatch(table, &zeros).re,
    })
}

fn dispatch(table: &QVectorTable, h: &[i32]) -> Complex64 {
    match *h {
        [n1] => table.lookup(n1, 1),
        [n1, n2] => two_unchecked(table, n1, n2),
        [n1, n2, n3] => three_unchecked(table, n1, n2, n3),
        [n1, n2, n3, n4] => four_unchecked(table, n1, n2, n3, n4),
        [n1, n2, n3, n4, n5] => five_unchecked(table, [n1, n2, n3, n4, n5]),
        [n1, n2, n3, n4, n5, n6] => six_unchecked(table, [n1, n2, n3, n4, n5, n6]),
        _ => recurse(table, h, 1, 0),
    }
}
