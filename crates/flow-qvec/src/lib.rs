#![deny(missing_docs)]
#![doc = "Q-vector tables and multi-particle azimuthal correlators."]

//! Everything in this crate works on one event at a time. Fill a
//! [`QVectorTable`] from the event's angles and weights, then evaluate any
//! number of correlators against it; the table must be refilled (which
//! zeroes it) before the next event.

/// Hand-expanded correlators for two to six particles.
pub mod closed_form;
/// Correlator dispatch and combinatorial weights.
pub mod correlator;
/// Brute-force nested-loop reference correlators.
pub mod nested;
/// Q-vector table construction and lookup.
pub mod qvector;
/// Generic recursive correlators.
pub mod recursion;

pub use closed_form::{five, four, six, three, two};
pub use correlator::{evaluate, evaluate_harmonics, Correlation, EvaluationPath};
pub use nested::{falling_factorial, nested_loops, NESTED_ORDERS};
pub use qvector::{required_bounds, QVectorTable, MAX_TABLE_ENTRIES};
pub use recursion::recursion;
