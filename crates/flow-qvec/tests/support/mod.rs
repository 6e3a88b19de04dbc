#![allow(dead_code)]

use std::f64::consts::TAU;

use flow_core::RngHandle;
use num_complex::Complex64;
use rand::Rng;

/// Random angles in `[0, 2π)` and weights in `[0.5, 1.5)`.
pub fn random_event(seed: u64, particles: usize) -> (Vec<f64>, Vec<f64>) {
    let mut rng = RngHandle::from_seed(seed);
    let angles = (0..particles).map(|_| rng.gen_range(0.0..TAU)).collect();
    let weights = (0..particles).map(|_| rng.gen_range(0.5..1.5)).collect();
    (angles, weights)
}

/// Direct weighted sum over every ordered tuple of distinct particles, for
/// any order. Only usable on tiny events.
pub fn brute_force(angles: &[f64], weights: Option<&[f64]>, harmonics: &[i32]) -> Complex64 {
    let mut used = vec![false; angles.len()];
    descend(angles, weights, harmonics, &mut used, 1.0, 0.0)
}

fn descend(
    angles: &[f64],
    weights: Option<&[f64]>,
    harmonics: &[i32],
    used: &mut [bool],
    weight: f64,
    phase: f64,
) -> Complex64 {
    let Some((&harmonic, rest)) = harmonics.split_first() else {
        return weight * Complex64::from_polar(1.0, phase);
    };
    let mut sum = Complex64::new(0.0, 0.0);
    for index in 0..angles.len() {
        if used[index] {
            continue;
        }
        used[index] = true;
        let w = weights.map_or(1.0, |w| w[index]);
        sum += descend(
            angles,
            weights,
            rest,
            used,
            weight * w,
            phase + harmonic as f64 * angles[index],
        );
        used[index] = false;
    }
    sum
}
