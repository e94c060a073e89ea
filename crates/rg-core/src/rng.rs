//! Deterministic RNG streams.
//!
//! A race seed fans out into one stream per boat plus one for the weather:
//!
//!   boat seed = race_seed XOR ((boat_id + 1) * MIXING_CONSTANT)
//!
//! Skippers draw only from their own boat's stream, so decisions replay
//! bit-for-bit whatever order (or thread) the boats are visited in.  Gusts
//! draw from a [`SimRng`] child stream, so changing the fleet size does not
//! change the weather.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::BoatId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

fn coin(rng: &mut SmallRng) -> f64 {
    if rng.r#gen::<bool>() { 1.0 } else { -1.0 }
}

// ── BoatRng ───────────────────────────────────────────────────────────────────

/// One boat's stream: start-line spot, decision stagger, replan jitter and
/// unstick side.
#[derive(Debug)]
pub struct BoatRng(SmallRng);

impl BoatRng {
    pub fn new(race_seed: u64, boat: BoatId) -> Self {
        let seed = race_seed ^ (u64::from(boat.0) + 1).wrapping_mul(MIXING_CONSTANT);
        BoatRng(SmallRng::seed_from_u64(seed))
    }

    /// Uniform in `[0, 1)`.
    #[inline]
    pub fn unit(&mut self) -> f64 {
        self.0.r#gen()
    }

    #[inline]
    pub fn gen_range(&mut self, range: std::ops::Range<f64>) -> f64 {
        self.0.gen_range(range)
    }

    /// `±1.0`, even odds.
    #[inline]
    pub fn sign(&mut self) -> f64 {
        coin(&mut self.0)
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Race-level stream for the weather.  Single writer: only the wind field
/// draws from it, between ticks.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Independent stream keyed by `offset`.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let seed = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn unit(&mut self) -> f64 {
        self.0.r#gen()
    }

    /// `true` with probability `p`, clamped to `[0, 1]`.
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    #[inline]
    pub fn sign(&mut self) -> f64 {
        coin(&mut self.0)
    }
}
