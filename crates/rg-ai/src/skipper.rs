//! The `Skipper` trait — who decides what the helm does.

use rg_core::{BoatId, BoatRng};
use rg_physics::HelmCommand;

use crate::{AiMemory, HelmContext};

/// Pluggable helm logic for autonomous boats.
///
/// The sim calls [`decide`][Self::decide] for every autonomous boat every
/// tick.  `None` keeps the previous command in force, which is how
/// implementations throttle themselves.
///
/// # Thread safety
///
/// With the `parallel` feature the sim calls `decide` for many boats at once
/// through Rayon, so implementations must be `Send + Sync`.  Per-boat state
/// belongs in the [`AiMemory`] passed in, not in the skipper.
pub trait Skipper: Send + Sync + 'static {
    /// `dt` is the tick length in seconds.
    fn decide(
        &self,
        boat:   BoatId,
        ctx:    &HelmContext<'_>,
        memory: &mut AiMemory,
        rng:    &mut BoatRng,
        dt:     f64,
    ) -> Option<HelmCommand>;
}

/// A [`Skipper`] that never touches the helm: each boat keeps whatever
/// command it started with.
///
/// Useful in tests and for races where every boat is steered from outside.
pub struct HoldCourse;

impl Skipper for HoldCourse {
    fn decide(
        &self,
        _boat:   BoatId,
        _ctx:    &HelmContext<'_>,
        _memory: &mut AiMemory,
        _rng:    &mut BoatRng,
        _dt:     f64,
    ) -> Option<HelmCommand> {
        None
    }
}
