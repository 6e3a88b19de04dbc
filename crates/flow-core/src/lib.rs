#![deny(missing_docs)]
#![doc = "Core types, error taxonomy and seeding policy shared by the flow harmonics crates."]

pub mod errors;
pub mod provenance;
pub mod rng;
pub mod sample;
mod types;

pub use errors::{ErrorInfo, FlowError};
pub use provenance::{RunProvenance, SchemaVersion};
pub use rng::{event_seed, RngHandle};
pub use sample::ParticleSample;
pub use types::{
    max_partial_sum, CorrelatorSpec, KinematicChannel, MAX_CORRELATOR_ORDER, MAX_HARMONIC,
};
