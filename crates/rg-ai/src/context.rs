//! Read-only simulation state handed to every skipper.

use rg_collision::CollisionSystem;
use rg_course::Course;
use rg_fleet::Fleet;
use rg_physics::{Current, PolarModel};
use rg_race::RaceStateMachine;
use rg_rules::{InteractionTable, RaceView, RightOfWayEngine};
use rg_wind::WindField;

use crate::RoutePlanner;

/// A read-only snapshot of the race passed to every
/// [`Skipper`][crate::Skipper] call.
///
/// Built once per tick by the sim, after the race clock and wind have
/// advanced and before any boat moves.  Every autonomous boat decides
/// against the same snapshot, so the outcome does not depend on the order
/// the boats are visited in.
pub struct HelmContext<'a> {
    pub fleet:      &'a Fleet,
    pub course:     &'a Course,
    pub wind:       &'a WindField,
    pub current:    Current,
    pub polar:      &'a PolarModel,
    pub race:       &'a RaceStateMachine,
    /// Every boat as it stands before anyone moves this tick.
    pub view:       &'a RaceView<'a>,
    pub table:      &'a InteractionTable,
    pub rules:      &'a RightOfWayEngine,
    /// Last mark contact per boat.
    pub collisions: &'a CollisionSystem,
    pub planner:    &'a RoutePlanner,
}

impl<'a> HelmContext<'a> {
    #[allow(clippy::too_many_arguments)]
    #[inline]
    pub fn new(
        fleet:      &'a Fleet,
        course:     &'a Course,
        wind:       &'a WindField,
        current:    Current,
        polar:      &'a PolarModel,
        race:       &'a RaceStateMachine,
        view:       &'a RaceView<'a>,
        table:      &'a InteractionTable,
        rules:      &'a RightOfWayEngine,
        collisions: &'a CollisionSystem,
        planner:    &'a RoutePlanner,
    ) -> Self {
        Self { fleet, course, wind, current, polar, race, view, table, rules, collisions, planner }
    }

    /// Race time in seconds, negative before the gun.
    #[inline]
    pub fn now(&self) -> f64 {
        self.race.now()
    }
}
