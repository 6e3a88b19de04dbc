//! Seeded random streams for event generation.

use std::hash::Hasher;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use siphasher::sip::SipHasher13;

/// Random stream handed explicitly to whatever needs randomness.
///
/// Generated events never share a stream: event `i` of a run draws from
/// [`RngHandle::for_event`]`(master_seed, i)`, so its particles do not depend
/// on which worker produced it or on how many events came before.
#[derive(Debug, Clone)]
pub struct RngHandle {
    rng: StdRng,
}

impl RngHandle {
    /// Stream seeded directly with `seed`.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Stream of event `event_index` under `master_seed`.
    pub fn for_event(master_seed: u64, event_index: u64) -> Self {
        Self::from_seed(event_seed(master_seed, event_index))
    }
}

impl RngCore for RngHandle {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.rng.try_fill_bytes(dest)
    }
}

/// Seed of event `event_index`: SipHash-1-3 of both values under zero keys.
pub fn event_seed(master_seed: u64, event_index: u64) -> u64 {
    let mut hasher = SipHasher13::new_with_keys(0, 0);
    hasher.write_u64(master_seed);
    hasher.write_u64(event_index);
    hasher.finish()
}
