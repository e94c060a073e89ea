//! Per-boat physics state that is not part of the fleet's kinematics.

use rg_core::BoatId;

use crate::PlaningState;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Dynamics {
    pub planing: PlaningState,
    /// Wind shadow from boats upwind, `[0, 0.95]`; refreshed every tick.
    pub bad_air: f64,
    /// Trim efficiency from the last step, `[0, 1]`.
    pub efficiency: f64,
    /// Target speed from the last step, knots.
    pub target_speed: f64,
}

/// `Vec<Dynamics>` indexed by `BoatId`.
pub struct PhysicsStore {
    pub dynamics: Vec<Dynamics>,
}

impl PhysicsStore {
    pub fn new(count: usize) -> Self {
        Self { dynamics: vec![Dynamics::default(); count] }
    }

    #[inline]
    pub fn get(&self, boat: BoatId) -> &Dynamics {
        &self.dynamics[boat.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, boat: BoatId) -> &mut Dynamics {
        &mut self.dynamics[boat.index()]
    }

    #[inline]
    pub fn is_planing(&self, boat: BoatId) -> bool {
        self.dynamics[boat.index()].planing.active
    }
}
