//! Brute-force correlators summing explicitly over distinct particle tuples.
//!
//! Cost is `O(N^n)`, so only orders two to four are provided. These exist to
//! validate the Q-vector evaluators on small events.

use flow_core::errors::{ErrorInfo, FlowError};
use num_complex::Complex64;

/// Orders supported by [`nested_loops`].
pub const NESTED_ORDERS: std::ops::RangeInclusive<usize> = 2..=4;

/// Weighted average of `exp(i Σ h_k φ_{i_k})` over ordered tuples of distinct
/// particles.
///
/// Each tuple enters with the product of its particle weights; the result is
/// normalised by the sum of those products, which is the falling factorial
/// `N(N-1)…(N-n+1)` for unit weights.
pub fn nested_loops(
    angles: &[f64],
    weights: Option<&[f64]>,
    harmonics: &[i32],
) -> Result<Complex64, FlowError> {
    if !NESTED_ORDERS.contains(&harmonics.len()) {
        return Err(unsupported_order(harmonics.len()));
    }
    if let Some(weights) = weights {
        if weights.len() != angles.len() {
            return Err(FlowError::Weights(
                ErrorInfo::new("weight-length", "weights do not match particle count")
                    .with_context("particles", angles.len())
                    .with_context("weights", weights.len()),
            ));
        }
    }
    if angles.len() < harmonics.len() {
        return Err(FlowError::Insufficient(
            ErrorInfo::new("too-few-particles", "fewer particles than correlator order")
                .with_context("particles", angles.len())
                .with_context("order", harmonics.len()),
        ));
    }

    let sample = Sample { angles, weights };
    let (sum, norm) = match *harmonics {
        [n1, n2] => two_nested(&sample, n1, n2),
        [n1, n2, n3] => three_nested(&sample, n1, n2, n3),
        [n1, n2, n3, n4] => four_nested(&sample, n1, n2, n3, n4),
        _ => return Err(unsupported_order(harmonics.len())),
    };
    Ok(sum / norm)
}

fn unsupported_order(order: usize) -> FlowError {
    FlowError::Config(
        ErrorInfo::new("nested-order", "nested loops support orders 2 to 4 only")
            .with_context("order", order),
    )
}

struct Sample<'a> {
    angles: &'a [f64],
    weights: Option<&'a [f64]>,
}

impl Sample<'_> {
    fn len(&self) -> usize {
        self.angles.len()
    }

    fn weight(&self, index: usize) -> f64 {
        self.weights.map_or(1.0, |w| w[index])
    }
}

fn two_nested(sample: &Sample<'_>, n1: i32, n2: i32) -> (Complex64, f64) {
    let mut sum = Complex64::new(0.0, 0.0);
    let mut norm = 0.0;
    for i1 in 0..sample.len() {
        let phi1 = sample.angles[i1];
        let w1 = sample.weight(i1);
        for i2 in 0..sample.len() {
            if i2 == i1 {
                continue;
            }
            let w = w1 * sample.weight(i2);
            let phase = n1 as f64 * phi1 + n2 as f64 * sample.angles[i2];
            sum += w * Complex64::from_polar(1.0, phase);
            norm += w;
        }
    }
    (sum, norm)
}

fn three_nested(sample: &Sample<'_>, n1: i32, n2: i32, n3: i32) -> (Complex64, f64) {
    let mut sum = Complex64::new(0.0, 0.0);
    let mut norm = 0.0;
    for i1 in 0..sample.len() {
        let phi1 = sample.angles[i1];
        let w1 = sample.weight(i1);
        for i2 in 0..sample.len() {
            if i2 == i1 {
                continue;
            }
            let phi2 = sample.angles[i2];
            let w2 = sample.weight(i2);
            for i3 in 0..sample.len() {
                if i3 == i1 || i3 == i2 {
                    continue;
                }
                let w = w1 * w2 * sample.weight(i3);
                let phase = n1 as f64 * phi1 + n2 as f64 * phi2 + n3 as f64 * sample.angles[i3];
                sum += w * Complex64::from_polar(1.0, phase);
                norm += w;
            }
        }
    }
    (sum, norm)
}

fn four_nested(sample: &Sample<'_>, n1: i32, n2: i32, n3: i32, n4: i32) -> (Complex64, f64) {
    let mut sum = Complex64::new(0.0, 0.0);
    let mut norm = 0.0;
    for i1 in 0..sample.len() {
        let phi1 = sample.angles[i1];
        let w1 = sample.weight(i1);
        for i2 in 0..sample.len() {
            if i2 == i1 {
                continue;
            }
            let phi2 = sample.angles[i2];
            let w2 = sample.weight(i2);
            for i3 in 0..sample.len() {
                if i3 == i1 || i3 == i2 {
                    continue;
                }
                let phi3 = sample.angles[i3];
                let w3 = sample.weight(i3);
                for i4 in 0..sample.len() {
                    if i4 == i1 || i4 == i2 || i4 == i3 {
                        continue;
                    }
                    let w = w1 * w2 * w3 * sample.weight(i4);
                    let phase = n1 as f64 * phi1
                        + n2 as f64 * phi2
                        + n3 as f64 * phi3
                        + n4 as f64 * sample.angles[i4];
                    sum += w * Complex64::from_polar(1.0, phase);
                    norm += w;
                }
            }
        }
    }
    (sum, norm)
}

/// Falling factorial `N(N-1)…(N-order+1)`, the number of ordered tuples of
/// `order` distinct particles out of `multiplicity`.
pub fn falling_factorial(multiplicity: usize, order: usize) -> f64 {
    (0..order).fold(1.0, |acc, k| {
        acc * multiplicity.saturating_sub(k) as f64
    })
}
