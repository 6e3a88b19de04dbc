//! Closed-form correlators for two to six particles.
//!
//! Each function expands the recursion for a fixed order into an explicit sum
//! over set partitions of the particle indices. A block of `k` merged
//! particles contributes `Q(Σh, k)` and a coefficient `(-1)^(k-1) (k-1)!`.
//! The results are identical to [`crate::recursion::recursion`] for the same
//! harmonics, only cheaper to evaluate.

use flow_core::errors::FlowError;
use num_complex::Complex64;

use crate::qvector::QVectorTable;

/// Generic two-particle correlation sum `Σ_{i≠j} w_i w_j e^{i(n1 φ_i + n2 φ_j)}`.
pub fn two(table: &QVectorTable, n1: i32, n2: i32) -> Result<Complex64, FlowError> {
    table.ensure_covers(&[n1, n2])?;
    Ok(two_unchecked(table, n1, n2))
}

pub(crate) fn two_unchecked(table: &QVectorTable, n1: i32, n2: i32) -> Complex64 {
    let q = |n: i32, p: usize| table.lookup(n, p);
    q(n1, 1) * q(n2, 1) - q(n1 + n2, 2)
}

/// Generic three-particle correlation sum.
pub fn three(table: &QVectorTable, n1: i32, n2: i32, n3: i32) -> Result<Complex64, FlowError> {
    table.ensure_covers(&[n1, n2, n3])?;
    Ok(three_unchecked(table, n1, n2, n3))
}

pub(crate) fn three_unchecked(table: &QVectorTable, n1: i32, n2: i32, n3: i32) -> Complex64 {
    let q = |n: i32, p: usize| table.lookup(n, p);
    q(n1, 1) * q(n2, 1) * q(n3, 1)
        - q(n1 + n2, 2) * q(n3, 1)
        - q(n2, 1) * q(n1 + n3, 2)
        - q(n1, 1) * q(n2 + n3, 2)
        + 2.0 * q(n1 + n2 + n3, 3)
}

/// Generic four-particle correlation sum.
pub fn four(
    table: &QVectorTable,
    n1: i32,
    n2: i32,
    n3: i32,
    n4: i32,
) -> Result<Complex64, FlowError> {
    table.ensure_covers(&[n1, n2, n3, n4])?;
    Ok(four_unchecked(table, n1, n2, n3, n4))
}

pub(crate) fn four_unchecked(
    table: &QVectorTable,
    n1: i32,
    n2: i32,
    n3: i32,
    n4: i32,
) -> Complex64 {
    let q = |n: i32, p: usize| table.lookup(n, p);
    q(n1, 1) * q(n2, 1) * q(n3, 1) * q(n4, 1)
        - q(n1 + n2, 2) * q(n3, 1) * q(n4, 1)
        - q(n2, 1) * q(n1 + n3, 2) * q(n4, 1)
        - q(n1, 1) * q(n2 + n3, 2) * q(n4, 1)
        + 2.0 * q(n1 + n2 + n3, 3) * q(n4, 1)
        - q(n2, 1) * q(n3, 1) * q(n1 + n4, 2)
        + q(n2 + n3, 2) * q(n1 + n4, 2)
        - q(n1, 1) * q(n3, 1) * q(n2 + n4, 2)
        + q(n1 + n3, 2) * q(n2 + n4, 2)
        + 2.0 * q(n3, 1) * q(n1 + n2 + n4, 3)
        - q(n1, 1) * q(n2, 1) * q(n3 + n4, 2)
        + q(n1 + n2, 2) * q(n3 + n4, 2)
        + 2.0 * q(n2, 1) * q(n1 + n3 + n4, 3)
        + 2.0 * q(n1, 1) * q(n2 + n3 + n4, 3)
        - 6.0 * q(n1 + n2 + n3 + n4, 4)
}

/// Generic five-particle correlation sum.
pub fn five(
    table: &QVectorTable,
    n1: i32,
    n2: i32,
    n3: i32,
    n4: i32,
    n5: i32,
) -> Result<Complex64, FlowError> {
    table.ensure_covers(&[n1, n2, n3, n4, n5])?;
    Ok(five_unchecked(table, [n1, n2, n3, n4, n5]))
}

pub(crate) fn five_unchecked(table: &QVectorTable, harmonics: [i32; 5]) -> Complex64 {
    let q = |n: i32, p: usize| table.lookup(n, p);
    let [n1, n2, n3, n4, n5] = harmonics;
    q(n1, 1) * q(n2, 1) * q(n3, 1) * q(n4, 1) * q(n5, 1)
        - q(n1 + n2, 2) * q(n3, 1) * q(n4, 1) * q(n5, 1)
        - q(n2, 1) * q(n1 + n3, 2) * q(n4, 1) * q(n5, 1)
        - q(n1, 1) * q(n2 + n3, 2) * q(n4, 1) * q(n5, 1)
        + 2.0 * q(n1 + n2 + n3, 3) * q(n4, 1) * q(n5, 1)
        - q(n2, 1) * q(n3, 1) * q(n1 + n4, 2) * q(n5, 1)
        + q(n2 + n3, 2) * q(n1 + n4, 2) * q(n5, 1)
        - q(n1, 1) * q(n3, 1) * q(n2 + n4, 2) * q(n5, 1)
        + q(n1 + n3, 2) * q(n2 + n4, 2) * q(n5, 1)
        + 2.0 * q(n3, 1) * q(n1 + n2 + n4, 3) * q(n5, 1)
        - q(n1, 1) * q(n2, 1) * q(n3 + n4, 2) * q(n5, 1)
        + q(n1 + n2, 2) * q(n3 + n4, 2) * q(n5, 1)
        + 2.0 * q(n2, 1) * q(n1 + n3 + n4, 3) * q(n5, 1)
        + 2.0 * q(n1, 1) * q(n2 + n3 + n4, 3) * q(n5, 1)
        - 6.0 * q(n1 + n2 + n3 + n4, 4) * q(n5, 1)
        - q(n2, 1) * q(n3, 1) * q(n4, 1) * q(n1 + n5, 2)
        + q(n2 + n3, 2) * q(n4, 1) * q(n1 + n5, 2)
        + q(n3, 1) * q(n2 + n4, 2) * q(n1 + n5, 2)
        + q(n2, 1) * q(n3 + n4, 2) * q(n1 + n5, 2)
        - 2.0 * q(n2 + n3 + n4, 3) * q(n1 + n5, 2)
        - q(n1, 1) * q(n3, 1) * q(n4, 1) * q(n2 + n5, 2)
        + q(n1 + n3, 2) * q(n4, 1) * q(n2 + n5, 2)
        + q(n3, 1) * q(n1 + n4, 2) * q(n2 + n5, 2)
        + q(n1, 1) * q(n3 + n4, 2) * q(n2 + n5, 2)
        - 2.0 * q(n1 + n3 + n4, 3) * q(n2 + n5, 2)
        + 2.0 * q(n3, 1) * q(n4, 1) * q(n1 + n2 + n5, 3)
        - 2.0 * q(n3 + n4, 2) * q(n1 + n2 + n5, 3)
        - q(n1, 1) * q(n2, 1) * q(n4, 1) * q(n3 + n5, 2)
        + q(n1 + n2, 2) * q(n4, 1) * q(n3 + n5, 2)
        + q(n2, 1) * q(n1 + n4, 2) * q(n3 + n5, 2)
        + q(n1, 1) * q(n2 + n4, 2) * q(n3 + n5, 2)
        - 2.0 * q(n1 + n2 + n4, 3) * q(n3 + n5, 2)
        + 2.0 * q(n2, 1) * q(n4, 1) * q(n1 + n3 + n5, 3)
        - 2.0 * q(n2 + n4, 2) * q(n1 + n3 + n5, 3)
        + 2.0 * q(n1, 1) * q(n4, 1) * q(n2 + n3 + n5, 3)
        - 2.0 * q(n1 + n4, 2) * q(n2 + n3 + n5, 3)
        - 6.0 * q(n4, 1) * q(n1 + n2 + n3 + n5, 4)
        - q(n1, 1) * q(n2, 1) * q(n3, 1) * q(n4 + n5, 2)
        + q(n1 + n2, 2) * q(n3, 1) * q(n4 + n5, 2)
        + q(n2, 1) * q(n1 + n3, 2) * q(n4 + n5, 2)
        + q(n1, 1) * q(n2 + n3, 2) * q(n4 + n5, 2)
        - 2.0 * q(n1 + n2 + n3, 3) * q(n4 + n5, 2)
        + 2.0 * q(n2, 1) * q(n3, 1) * q(n1 + n4 + n5, 3)
        - 2.0 * q(n2 + n3, 2) * q(n1 + n4 + n5, 3)
        + 2.0 * q(n1, 1) * q(n3, 1) * q(n2 + n4 + n5, 3)
        - 2.0 * q(n1 + n3, 2) * q(n2 + n4 + n5, 3)
        - 6.0 * q(n3, 1) * q(n1 + n2 + n4 + n5, 4)
        + 2.0 * q(n1, 1) * q(n2, 1) * q(n3 + n4 + n5, 3)
        - 2.0 * q(n1 + n2, 2) * q(n3 + n4 + n5, 3)
        - 6.0 * q(n2, 1) * q(n1 + n3 + n4 + n5, 4)
        - 6.0 * q(n1, 1) * q(n2 + n3 + n4 + n5, 4)
        + 24.0 * q(n1 + n2 + n3 + n4 + n5, 5)
}

/// Generic six-particle correlation sum.
pub fn six(
    table: &QVectorTable,
    n1: i32,
    n2: i32,
    n3: i32,
    n4: i32,
    n5: i32,
    n6: i32,
) -> Result<Complex64, FlowError> {
    table.ensure_covers(&[n1, n2, n3, n4, n5, n6])?;
    Ok(six_unchecked(table, [n1, n2, n3, n4, n5, n6]))
}

pub(crate) fn six_unchecked(table: &QVectorTable, harmonics: [i32; 6]) -> Complex64 {
    let q = |n: i32, p: usize| table.lookup(n, p);
    let [n1, n2, n3, n4, n5, n6] = harmonics;
    q(n1, 1) * q(n2, 1) * q(n3, 1) * q(n4, 1) * q(n5, 1) * q(n6, 1)
        - q(n1 + n2, 2) * q(n3, 1) * q(n4, 1) * q(n5, 1) * q(n6, 1)
        - q(n2, 1) * q(n1 + n3, 2) * q(n4, 1) * q(n5, 1) * q(n6, 1)
        - q(n1, 1) * q(n2 + n3, 2) * q(n4, 1) * q(n5, 1) * q(n6, 1)
        + 2.0 * q(n1 + n2 + n3, 3) * q(n4, 1) * q(n5, 1) * q(n6, 1)
        - q(n2, 1) * q(n3, 1) * q(n1 + n4, 2) * q(n5, 1) * q(n6, 1)
        + q(n2 + n3, 2) * q(n1 + n4, 2) * q(n5, 1) * q(n6, 1)
        - q(n1, 1) * q(n3, 1) * q(n2 + n4, 2) * q(n5, 1) * q(n6, 1)
        + q(n1 + n3, 2) * q(n2 + n4, 2) * q(n5, 1) * q(n6, 1)
        + 2.0 * q(n3, 1) * q(n1 + n2 + n4, 3) * q(n5, 1) * q(n6, 1)
        - q(n1, 1) * q(n2, 1) * q(n3 + n4, 2) * q(n5, 1) * q(n6, 1)
        + q(n1 + n2, 2) * q(n3 + n4, 2) * q(n5, 1) * q(n6, 1)
        + 2.0 * q(n2, 1) * q(n1 + n3 + n4, 3) * q(n5, 1) * q(n6, 1)
        + 2.0 * q(n1, 1) * q(n2 + n3 + n4, 3) * q(n5, 1) * q(n6, 1)
        - 6.0 * q(n1 + n2 + n3 + n4, 4) * q(n5, 1) * q(n6, 1)
        - q(n2, 1) * q(n3, 1) * q(n4, 1) * q(n1 + n5, 2) * q(n6, 1)
        + q(n2 + n3, 2) * q(n4, 1) * q(n1 + n5, 2) * q(n6, 1)
        + q(n3, 1) * q(n2 + n4, 2) * q(n1 + n5, 2) * q(n6, 1)
        + q(n2, 1) * q(n3 + n4, 2) * q(n1 + n5, 2) * q(n6, 1)
        - 2.0 * q(n2 + n3 + n4, 3) * q(n1 + n5, 2) * q(n6, 1)
        - q(n1, 1) * q(n3, 1) * q(n4, 1) * q(n2 + n5, 2) * q(n6, 1)
        + q(n1 + n3, 2) * q(n4, 1) * q(n2 + n5, 2) * q(n6, 1)
        + q(n3, 1) * q(n1 + n4, 2) * q(n2 + n5, 2) * q(n6, 1)
        + q(n1, 1) * q(n3 + n4, 2) * q(n2 + n5, 2) * q(n6, 1)
        - 2.0 * q(n1 + n3 + n4, 3) * q(n2 + n5, 2) * q(n6, 1)
        + 2.0 * q(n3, 1) * q(n4, 1) * q(n1 + n2 + n5, 3) * q(n6, 1)
        - 2.0 * q(n3 + n4, 2) * q(n1 + n2 + n5, 3) * q(n6, 1)
        - q(n1, 1) * q(n2, 1) * q(n4, 1) * q(n3 + n5, 2) * q(n6, 1)
        + q(n1 + n2, 2) * q(n4, 1) * q(n3 + n5, 2) * q(n6, 1)
        + q(n2, 1) * q(n1 + n4, 2) * q(n3 + n5, 2) * q(n6, 1)
        + q(n1, 1) * q(n2 + n4, 2) * q(n3 + n5, 2) * q(n6, 1)
        - 2.0 * q(n1 + n2 + n4, 3) * q(n3 + n5, 2) * q(n6, 1)
        + 2.0 * q(n2, 1) * q(n4, 1) * q(n1 + n3 + n5, 3) * q(n6, 1)
        - 2.0 * q(n2 + n4, 2) * q(n1 + n3 + n5, 3) * q(n6, 1)
        + 2.0 * q(n1, 1) * q(n4, 1) * q(n2 + n3 + n5, 3) * q(n6, 1)
        - 2.0 * q(n1 + n4, 2) * q(n2 + n3 + n5, 3) * q(n6, 1)
        - 6.0 * q(n4, 1) * q(n1 + n2 + n3 + n5, 4) * q(n6, 1)
        - q(n1, 1) * q(n2, 1) * q(n3, 1) * q(n4 + n5, 2) * q(n6, 1)
        + q(n1 + n2, 2) * q(n3, 1) * q(n4 + n5, 2) * q(n6, 1)
        + q(n2, 1) * q(n1 + n3, 2) * q(n4 + n5, 2) * q(n6, 1)
        + q(n1, 1) * q(n2 + n3, 2) * q(n4 + n5, 2) * q(n6, 1)
        - 2.0 * q(n1 + n2 + n3, 3) * q(n4 + n5, 2) * q(n6, 1)
        + 2.0 * q(n2, 1) * q(n3, 1) * q(n1 + n4 + n5, 3) * q(n6, 1)
        - 2.0 * q(n2 + n3, 2) * q(n1 + n4 + n5, 3) * q(n6, 1)
        + 2.0 * q(n1, 1) * q(n3, 1) * q(n2 + n4 + n5, 3) * q(n6, 1)
        - 2.0 * q(n1 + n3, 2) * q(n2 + n4 + n5, 3) * q(n6, 1)
        - 6.0 * q(n3, 1) * q(n1 + n2 + n4 + n5, 4) * q(n6, 1)
        + 2.0 * q(n1, 1) * q(n2, 1) * q(n3 + n4 + n5, 3) * q(n6, 1)
        - 2.0 * q(n1 + n2, 2) * q(n3 + n4 + n5, 3) * q(n6, 1)
        - 6.0 * q(n2, 1) * q(n1 + n3 + n4 + n5, 4) * q(n6, 1)
        - 6.0 * q(n1, 1) * q(n2 + n3 + n4 + n5, 4) * q(n6, 1)
        + 24.0 * q(n1 + n2 + n3 + n4 + n5, 5) * q(n6, 1)
        - q(n2, 1) * q(n3, 1) * q(n4, 1) * q(n5, 1) * q(n1 + n6, 2)
        + q(n2 + n3, 2) * q(n4, 1) * q(n5, 1) * q(n1 + n6, 2)
        + q(n3, 1) * q(n2 + n4, 2) * q(n5, 1) * q(n1 + n6, 2)
        + q(n2, 1) * q(n3 + n4, 2) * q(n5, 1) * q(n1 + n6, 2)
        - 2.0 * q(n2 + n3 + n4, 3) * q(n5, 1) * q(n1 + n6, 2)
        + q(n3, 1) * q(n4, 1) * q(n2 + n5, 2) * q(n1 + n6, 2)
        - q(n3 + n4, 2) * q(n2 + n5, 2) * q(n1 + n6, 2)
        + q(n2, 1) * q(n4, 1) * q(n3 + n5, 2) * q(n1 + n6, 2)
        - q(n2 + n4, 2) * q(n3 + n5, 2) * q(n1 + n6, 2)
        - 2.0 * q(n4, 1) * q(n2 + n3 + n5, 3) * q(n1 + n6, 2)
        + q(n2, 1) * q(n3, 1) * q(n4 + n5, 2) * q(n1 + n6, 2)
        - q(n2 + n3, 2) * q(n4 + n5, 2) * q(n1 + n6, 2)
        - 2.0 * q(n3, 1) * q(n2 + n4 + n5, 3) * q(n1 + n6, 2)
        - 2.0 * q(n2, 1) * q(n3 + n4 + n5, 3) * q(n1 + n6, 2)
        + 6.0 * q(n2 + n3 + n4 + n5, 4) * q(n1 + n6, 2)
        - q(n1, 1) * q(n3, 1) * q(n4, 1) * q(n5, 1) * q(n2 + n6, 2)
        + q(n1 + n3, 2) * q(n4, 1) * q(n5, 1) * q(n2 + n6, 2)
        + q(n3, 1) * q(n1 + n4, 2) * q(n5, 1) * q(n2 + n6, 2)
        + q(n1, 1) * q(n3 + n4, 2) * q(n5, 1) * q(n2 + n6, 2)
        - 2.0 * q(n1 + n3 + n4, 3) * q(n5, 1) * q(n2 + n6, 2)
        + q(n3, 1) * q(n4, 1) * q(n1 + n5, 2) * q(n2 + n6, 2)
        - q(n3 + n4, 2) * q(n1 + n5, 2) * q(n2 + n6, 2)
        + q(n1, 1) * q(n4, 1) * q(n3 + n5, 2) * q(n2 + n6, 2)
        - q(n1 + n4, 2) * q(n3 + n5, 2) * q(n2 + n6, 2)
        - 2.0 * q(n4, 1) * q(n1 + n3 + n5, 3) * q(n2 + n6, 2)
        + q(n1, 1) * q(n3, 1) * q(n4 + n5, 2) * q(n2 + n6, 2)
        - q(n1 + n3, 2) * q(n4 + n5, 2) * q(n2 + n6, 2)
        - 2.0 * q(n3, 1) * q(n1 + n4 + n5, 3) * q(n2 + n6, 2)
        - 2.0 * q(n1, 1) * q(n3 + n4 + n5, 3) * q(n2 + n6, 2)
        + 6.0 * q(n1 + n3 + n4 + n5, 4) * q(n2 + n6, 2)
        + 2.0 * q(n3, 1) * q(n4, 1) * q(n5, 1) * q(n1 + n2 + n6, 3)
        - 2.0 * q(n3 + n4, 2) * q(n5, 1) * q(n1 + n2 + n6, 3)
        - 2.0 * q(n4, 1) * q(n3 + n5, 2) * q(n1 + n2 + n6, 3)
        - 2.0 * q(n3, 1) * q(n4 + n5, 2) * q(n1 + n2 + n6, 3)
        + 4.0 * q(n3 + n4 + n5, 3) * q(n1 + n2 + n6, 3)
        - q(n1, 1) * q(n2, 1) * q(n4, 1) * q(n5, 1) * q(n3 + n6, 2)
        + q(n1 + n2, 2) * q(n4, 1) * q(n5, 1) * q(n3 + n6, 2)
        + q(n2, 1) * q(n1 + n4, 2) * q(n5, 1) * q(n3 + n6, 2)
        + q(n1, 1) * q(n2 + n4, 2) * q(n5, 1) * q(n3 + n6, 2)
        - 2.0 * q(n1 + n2 + n4, 3) * q(n5, 1) * q(n3 + n6, 2)
        + q(n2, 1) * q(n4, 1) * q(n1 + n5, 2) * q(n3 + n6, 2)
        - q(n2 + n4, 2) * q(n1 + n5, 2) * q(n3 + n6, 2)
        + q(n1, 1) * q(n4, 1) * q(n2 + n5, 2) * q(n3 + n6, 2)
        - q(n1 + n4, 2) * q(n2 + n5, 2) * q(n3 + n6, 2)
        - 2.0 * q(n4, 1) * q(n1 + n2 + n5, 3) * q(n3 + n6, 2)
        + q(n1, 1) * q(n2, 1) * q(n4 + n5, 2) * q(n3 + n6, 2)
        - q(n1 + n2, 2) * q(n4 + n5, 2) * q(n3 + n6, 2)
        - 2.0 * q(n2, 1) * q(n1 + n4 + n5, 3) * q(n3 + n6, 2)
        - 2.0 * q(n1, 1) * q(n2 + n4 + n5, 3) * q(n3 + n6, 2)
        + 6.0 * q(n1 + n2 + n4 + n5, 4) * q(n3 + n6, 2)
        + 2.0 * q(n2, 1) * q(n4, 1) * q(n5, 1) * q(n1 + n3 + n6, 3)
        - 2.0 * q(n2 + n4, 2) * q(n5, 1) * q(n1 + n3 + n6, 3)
        - 2.0 * q(n4, 1) * q(n2 + n5, 2) * q(n1 + n3 + n6, 3)
        - 2.0 * q(n2, 1) * q(n4 + n5, 2) * q(n1 + n3 + n6, 3)
        + 4.0 * q(n2 + n4 + n5, 3) * q(n1 + n3 + n6, 3)
        + 2.0 * q(n1, 1) * q(n4, 1) * q(n5, 1) * q(n2 + n3 + n6, 3)
        - 2.0 * q(n1 + n4, 2) * q(n5, 1) * q(n2 + n3 + n6, 3)
        - 2.0 * q(n4, 1) * q(n1 + n5, 2) * q(n2 + n3 + n6, 3)
        - 2.0 * q(n1, 1) * q(n4 + n5, 2) * q(n2 + n3 + n6, 3)
        + 4.0 * q(n1 + n4 + n5, 3) * q(n2 + n3 + n6, 3)
        - 6.0 * q(n4, 1) * q(n5, 1) * q(n1 + n2 + n3 + n6, 4)
        + 6.0 * q(n4 + n5, 2) * q(n1 + n2 + n3 + n6, 4)
        - q(n1, 1) * q(n2, 1) * q(n3, 1) * q(n5, 1) * q(n4 + n6, 2)
        + q(n1 + n2, 2) * q(n3, 1) * q(n5, 1) * q(n4 + n6, 2)
        + q(n2, 1) * q(n1 + n3, 2) * q(n5, 1) * q(n4 + n6, 2)
        + q(n1, 1) * q(n2 + n3, 2) * q(n5, 1) * q(n4 + n6, 2)
        - 2.0 * q(n1 + n2 + n3, 3) * q(n5, 1) * q(n4 + n6, 2)
        + q(n2, 1) * q(n3, 1) * q(n1 + n5, 2) * q(n4 + n6, 2)
        - q(n2 + n3, 2) * q(n1 + n5, 2) * q(n4 + n6, 2)
        + q(n1, 1) * q(n3, 1) * q(n2 + n5, 2) * q(n4 + n6, 2)
        - q(n1 + n3, 2) * q(n2 + n5, 2) * q(n4 + n6, 2)
        - 2.0 * q(n3, 1) * q(n1 + n2 + n5, 3) * q(n4 + n6, 2)
        + q(n1, 1) * q(n2, 1) * q(n3 + n5, 2) * q(n4 + n6, 2)
        - q(n1 + n2, 2) * q(n3 + n5, 2) * q(n4 + n6, 2)
        - 2.0 * q(n2, 1) * q(n1 + n3 + n5, 3) * q(n4 + n6, 2)
        - 2.0 * q(n1, 1) * q(n2 + n3 + n5, 3) * q(n4 + n6, 2)
        + 6.0 * q(n1 + n2 + n3 + n5, 4) * q(n4 + n6, 2)
        + 2.0 * q(n2, 1) * q(n3, 1) * q(n5, 1) * q(n1 + n4 + n6, 3)
        - 2.0 * q(n2 + n3, 2) * q(n5, 1) * q(n1 + n4 + n6, 3)
        - 2.0 * q(n3, 1) * q(n2 + n5, 2) * q(n1 + n4 + n6, 3)
        - 2.0 * q(n2, 1) * q(n3 + n5, 2) * q(n1 + n4 + n6, 3)
        + 4.0 * q(n2 + n3 + n5, 3) * q(n1 + n4 + n6, 3)
        + 2.0 * q(n1, 1) * q(n3, 1) * q(n5, 1) * q(n2 + n4 + n6, 3)
        - 2.0 * q(n1 + n3, 2) * q(n5, 1) * q(n2 + n4 + n6, 3)
        - 2.0 * q(n3, 1) * q(n1 + n5, 2) * q(n2 + n4 + n6, 3)
        - 2.0 * q(n1, 1) * q(n3 + n5, 2) * q(n2 + n4 + n6, 3)
        + 4.0 * q(n1 + n3 + n5, 3) * q(n2 + n4 + n6, 3)
        - 6.0 * q(n3, 1) * q(n5, 1) * q(n1 + n2 + n4 + n6, 4)
        + 6.0 * q(n3 + n5, 2) * q(n1 + n2 + n4 + n6, 4)
        + 2.0 * q(n1, 1) * q(n2, 1) * q(n5, 1) * q(n3 + n4 + n6, 3)
        - 2.0 * q(n1 + n2, 2) * q(n5, 1) * q(n3 + n4 + n6, 3)
        - 2.0 * q(n2, 1) * q(n1 + n5, 2) * q(n3 + n4 + n6, 3)
        - 2.0 * q(n1, 1) * q(n2 + n5, 2) * q(n3 + n4 + n6, 3)
        + 4.0 * q(n1 + n2 + n5, 3) * q(n3 + n4 + n6, 3)
        - 6.0 * q(n2, 1) * q(n5, 1) * q(n1 + n3 + n4 + n6, 4)
        + 6.0 * q(n2 + n5, 2) * q(n1 + n3 + n4 + n6, 4)
        - 6.0 * q(n1, 1) * q(n5, 1) * q(n2 + n3 + n4 + n6, 4)
        + 6.0 * q(n1 + n5, 2) * q(n2 + n3 + n4 + n6, 4)
        + 24.0 * q(n5, 1) * q(n1 + n2 + n3 + n4 + n6, 5)
        - q(n1, 1) * q(n2, 1) * q(n3, 1) * q(n4, 1) * q(n5 + n6, 2)
        + q(n1 + n2, 2) * q(n3, 1) * q(n4, 1) * q(n5 + n6, 2)
        + q(n2, 1) * q(n1 + n3, 2) * q(n4, 1) * q(n5 + n6, 2)
        + q(n1, 1) * q(n2 + n3, 2) * q(n4, 1) * q(n5 + n6, 2)
        - 2.0 * q(n1 + n2 + n3, 3) * q(n4, 1) * q(n5 + n6, 2)
        + q(n2, 1) * q(n3, 1) * q(n1 + n4, 2) * q(n5 + n6, 2)
        - q(n2 + n3, 2) * q(n1 + n4, 2) * q(n5 + n6, 2)
        + q(n1, 1) * q(n3, 1) * q(n2 + n4, 2) * q(n5 + n6, 2)
        - q(n1 + n3, 2) * q(n2 + n4, 2) * q(n5 + n6, 2)
        - 2.0 * q(n3, 1) * q(n1 + n2 + n4, 3) * q(n5 + n6, 2)
        + q(n1, 1) * q(n2, 1) * q(n3 + n4, 2) * q(n5 + n6, 2)
        - q(n1 + n2, 2) * q(n3 + n4, 2) * q(n5 + n6, 2)
        - 2.0 * q(n2, 1) * q(n1 + n3 + n4, 3) * q(n5 + n6, 2)
        - 2.0 * q(n1, 1) * q(n2 + n3 + n4, 3) * q(n5 + n6, 2)
        + 6.0 * q(n1 + n2 + n3 + n4, 4) * q(n5 + n6, 2)
        + 2.0 * q(n2, 1) * q(n3, 1) * q(n4, 1) * q(n1 + n5 + n6, 3)
        - 2.0 * q(n2 + n3, 2) * q(n4, 1) * q(n1 + n5 + n6, 3)
        - 2.0 * q(n3, 1) * q(n2 + n4, 2) * q(n1 + n5 + n6, 3)
        - 2.0 * q(n2, 1) * q(n3 + n4, 2) * q(n1 + n5 + n6, 3)
        + 4.0 * q(n2 + n3 + n4, 3) * q(n1 + n5 + n6, 3)
        + 2.0 * q(n1, 1) * q(n3, 1) * q(n4, 1) * q(n2 + n5 + n6, 3)
        - 2.0 * q(n1 + n3, 2) * q(n4, 1) * q(n2 + n5 + n6, 3)
        - 2.0 * q(n3, 1) * q(n1 + n4, 2) * q(n2 + n5 + n6, 3)
        - 2.0 * q(n1, 1) * q(n3 + n4, 2) * q(n2 + n5 + n6, 3)
        + 4.0 * q(n1 + n3 + n4, 3) * q(n2 + n5 + n6, 3)
        - 6.0 * q(n3, 1) * q(n4, 1) * q(n1 + n2 + n5 + n6, 4)
        + 6.0 * q(n3 + n4, 2) * q(n1 + n2 + n5 + n6, 4)
        + 2.0 * q(n1, 1) * q(n2, 1) * q(n4, 1) * q(n3 + n5 + n6, 3)
        - 2.0 * q(n1 + n2, 2) * q(n4, 1) * q(n3 + n5 + n6, 3)
        - 2.0 * q(n2, 1) * q(n1 + n4, 2) * q(n3 + n5 + n6, 3)
        - 2.0 * q(n1, 1) * q(n2 + n4, 2) * q(n3 + n5 + n6, 3)
        + 4.0 * q(n1 + n2 + n4, 3) * q(n3 + n5 + n6, 3)
        - 6.0 * q(n2, 1) * q(n4, 1) * q(n1 + n3 + n5 + n6, 4)
        + 6.0 * q(n2 + n4, 2) * q(n1 + n3 + n5 + n6, 4)
        - 6.0 * q(n1, 1) * q(n4, 1) * q(n2 + n3 + n5 + n6, 4)
        + 6.0 * q(n1 + n4, 2) * q(n2 + n3 + n5 + n6, 4)
        + 24.0 * q(n4, 1) * q(n1 + n2 + n3 + n5 + n6, 5)
        + 2.0 * q(n1, 1) * q(n2, 1) * q(n3, 1) * q(n4 + n5 + n6, 3)
        - 2.0 * q(n1 + n2, 2) * q(n3, 1) * q(n4 + n5 + n6, 3)
        - 2.0 * q(n2, 1) * q(n1 + n3, 2) * q(n4 + n5 + n6, 3)
        - 2.0 * q(n1, 1) * q(n2 + n3, 2) * q(n4 + n5 + n6, 3)
        + 4.0 * q(n1 + n2 + n3, 3) * q(n4 + n5 + n6, 3)
        - 6.0 * q(n2, 1) * q(n3, 1) * q(n1 + n4 + n5 + n6, 4)
        + 6.0 * q(n2 + n3, 2) * q(n1 + n4 + n5 + n6, 4)
        - 6.0 * q(n1, 1) * q(n3, 1) * q(n2 + n4 + n5 + n6, 4)
        + 6.0 * q(n1 + n3, 2) * q(n2 + n4 + n5 + n6, 4)
        + 24.0 * q(n3, 1) * q(n1 + n2 + n4 + n5 + n6, 5)
        - 6.0 * q(n1, 1) * q(n2, 1) * q(n3 + n4 + n5 + n6, 4)
        + 6.0 * q(n1 + n2, 2) * q(n3 + n4 + n5 + n6, 4)
        + 24.0 * q(n2, 1) * q(n1 + n3 + n4 + n5 + n6, 5)
        + 24.0 * q(n1, 1) * q(n2 + n3 + n4 + n5 + n6, 5)
        - 120.0 * q(n1 + n2 + n3 + n4 + n5 + n6, 6)
}
