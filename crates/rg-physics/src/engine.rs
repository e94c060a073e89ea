//! Fleet-wide physics pass.

use rg_core::BoatId;
use rg_course::Boundary;
use rg_fleet::Fleet;
use rg_wind::WindField;

use crate::air::disturbed_air;
use crate::{HelmCommand, PhysicsIntegrator, PhysicsStore, StepReport};

/// Wraps a [`PhysicsIntegrator`] and [`PhysicsStore`] for the sim's physics
/// phase.
pub struct PhysicsEngine {
    pub integrator: PhysicsIntegrator,
    pub store: PhysicsStore,
}

impl PhysicsEngine {
    pub fn new(integrator: PhysicsIntegrator, boat_count: usize) -> Self {
        Self { integrator, store: PhysicsStore::new(boat_count) }
    }

    /// Recompute every boat's wind shadow from the current positions.
    ///
    /// Runs before any boat moves so the result does not depend on the
    /// stepping order.
    pub fn refresh_disturbed_air(&mut self, fleet: &Fleet, wind: &WindField) {
        let positions = fleet.positions();
        for boat in fleet.ids() {
            let p = positions[boat.index()];
            let direction = wind.sample_at(p).direction;
            self.store.get_mut(boat).bad_air = disturbed_air(p, direction, positions.iter().copied());
        }
    }

    /// Step one boat.
    #[allow(clippy::too_many_arguments)]
    pub fn step(
        &mut self,
        boat:      BoatId,
        fleet:     &mut Fleet,
        command:   &HelmCommand,
        penalized: bool,
        wind:      &WindField,
        boundary:  &Boundary,
        dt:        f64,
    ) -> StepReport {
        let i = boat.index();
        // Split borrow: kinematics, rig and stats are separate fields.
        let kin = &mut fleet.kinematics[i];
        let rig = &mut fleet.rig[i];
        let stats = &fleet.stats[i];
        self.integrator.step(
            kin,
            rig,
            &mut self.store.dynamics[i],
            stats,
            command,
            penalized,
            wind,
            boundary,
            dt,
        )
    }
}
