//! Read-only per-tick snapshot of what the rules need to know about each
//! boat.

use rg_core::units::knots_to_units_per_sec;
use rg_core::{BoatId, Vec2};
use rg_core::geom::forward;
use rg_course::{Course, Gate};
use rg_fleet::{Fleet, Tack};
use rg_race::RaceStateMachine;

/// One boat as the rules see it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoatView {
    pub id: BoatId,
    pub position: Vec2,
    pub heading: f64,
    /// World units per second.
    pub velocity: Vec2,
    pub tack: Tack,
    pub tacking: bool,
    pub ocs: bool,
    pub penalized: bool,
    /// `None` once finished.
    pub leg: Option<u32>,
    /// Marks whose zone matters for this boat's current leg.
    pub zone_gate: Option<Gate>,
}

impl BoatView {
    /// A boat on leg 1 with no flags set and no way on.
    pub fn new(id: BoatId, position: Vec2, heading: f64, tack: Tack) -> Self {
        Self {
            id,
            position,
            heading,
            velocity: Vec2::ZERO,
            tack,
            tacking: false,
            ocs: false,
            penalized: false,
            leg: Some(1),
            zone_gate: None,
        }
    }

    /// Same boat sailing at `knots` along its heading.
    pub fn moving(mut self, knots: f64) -> Self {
        self.velocity = forward(self.heading) * knots_to_units_per_sec(knots);
        self
    }

    pub fn capture(boat: BoatId, fleet: &Fleet, race: &RaceStateMachine, course: &Course) -> Self {
        let kin = fleet.kinematics(boat);
        let st = race.state(boat);
        Self {
            id: boat,
            position: kin.position,
            heading: kin.heading,
            velocity: kin.velocity,
            tack: fleet.rig(boat).tack(),
            tacking: st.tacking,
            ocs: st.ocs,
            penalized: st.penalty.active,
            leg: st.progress.leg(),
            zone_gate: race.zone_gate(course, boat),
        }
    }

    /// Over early or serving a penalty.
    #[inline]
    pub fn is_returning(&self) -> bool {
        self.ocs || self.penalized
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.leg.is_none()
    }
}

/// Every boat plus the shared context, captured once per tick.
#[derive(Clone, Debug)]
pub struct RaceView<'a> {
    pub course: &'a Course,
    pub wind_direction: f64,
    /// Race time in seconds.
    pub time: f64,
    /// Indexed by `BoatId`.
    pub boats: Vec<BoatView>,
}

impl<'a> RaceView<'a> {
    pub fn capture(
        fleet:          &Fleet,
        race:           &RaceStateMachine,
        course:         &'a Course,
        wind_direction: f64,
    ) -> Self {
        Self {
            course,
            wind_direction,
            time: race.now(),
            boats: fleet.ids().map(|b| BoatView::capture(b, fleet, race, course)).collect(),
        }
    }

    #[inline]
    pub fn boat(&self, id: BoatId) -> &BoatView {
        &self.boats[id.index()]
    }

    /// Number of boats.
    #[inline]
    pub fn len(&self) -> usize {
        self.boats.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.boats.is_empty()
    }
}
