//! Generic n-particle correlators via the merge/skip recursion.
//!
//! For harmonics `h[0..n]` the recursion multiplies the single-particle sum of
//! the last harmonic with the `(n-1)`-particle result and then removes every
//! term in which the last particle coincides with one of the earlier ones.
//! Each coincidence is expressed by merging `h[n-1]` into one earlier slot,
//! which raises the weight power of that slot by one. The `skip` index makes
//! sure a given set partition is generated only once.

use flow_core::errors::{ErrorInfo, FlowError};
use num_complex::Complex64;

use crate::qvector::QVectorTable;

/// Evaluates the un-normalised correlator sum for `harmonics`.
///
/// The caller's slice is never modified; every merge works on a fresh list.
pub fn recursion(table: &QVectorTable, harmonics: &[i32]) -> Result<Complex64, FlowError> {
    if harmonics.is_empty() {
        return Err(FlowError::Config(ErrorInfo::new(
            "empty-correlator",
            "recursion needs at least one harmonic",
        )));
    }
    table.ensure_covers(harmonics)?;
    Ok(recurse(table, harmonics, 1, 0))
}

/// Recursion body. `harmonics` is non-empty and covered by `table`.
pub(crate) fn recurse(
    table: &QVectorTable,
    harmonics: &[i32],
    mult: usize,
    skip: usize,
) -> Complex64 {
    let last = harmonics.len() - 1;
    let mut product = table.lookup(harmonics[last], mult);
    if last == 0 {
        return product;
    }
    product *= recurse(table, &harmonics[..last], 1, 0);
    if last == skip {
        return product;
    }

    // Merge the last harmonic into slot `j` after swapping slot `j` with the
    // slot just before the last one. Slots below `skip` were merged by an
    // outer call already.
    let pivot = last - 1;
    let mut coincident = Complex64::new(0.0, 0.0);
    for j in 0..=(pivot - skip) {
        let mut merged = harmonics[..last].to_vec();
        merged[j] = harmonics[pivot];
        merged[pivot] = harmonics[j] + harmonics[last];
        coincident += recurse(table, &merged, mult + 1, pivot - j);
    }

    product - mult as f64 * coincident
}
