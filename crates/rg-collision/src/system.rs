//! Per-tick contact resolution.

use tracing::debug;

use rg_core::hull::hull_polygon;
use rg_core::{BoatId, EventSink, MarkId, RaceEvent, Vec2};
use rg_course::Course;
use rg_fleet::{Fleet, Kinematics};
use rg_race::{RacePhase, RaceStateMachine};
use rg_rules::{InteractionTable, RaceView, RightOfWayEngine};

use crate::{Contact, polygon_circle, polygon_polygon};

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CollisionConfig {
    /// Boat pairs further apart than this are skipped.
    pub boat_broad_phase: f64,
    /// Boats further than this from a mark are skipped.
    pub mark_broad_phase: f64,
    /// Added to an obstacle's radius for its broad phase.
    pub obstacle_margin: f64,
    /// Speed kept after a glancing contact.
    pub friction: f64,
    /// Speed kept after a head-on contact.
    pub impact_factor: f64,
    /// Speed kept after a head-on mark contact by a boat forcing its way
    /// clear.
    pub forced_impact_factor: f64,
    /// Extra separation so resolved shapes end strictly apart.
    pub slop: f64,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            boat_broad_phase: 80.0,
            mark_broad_phase: 50.0,
            obstacle_margin: 40.0,
            friction: 0.99,
            impact_factor: 0.5,
            forced_impact_factor: 0.9,
            slop: 1e-3,
        }
    }
}

impl CollisionConfig {
    /// Speed multiplier for a boat facing `heading_fwd` struck along `toward`.
    #[inline]
    fn speed_factor(&self, heading_fwd: Vec2, toward: Vec2) -> f64 {
        self.slowdown(heading_fwd, toward, self.impact_factor)
    }

    #[inline]
    fn slowdown(&self, heading_fwd: Vec2, toward: Vec2, impact_factor: f64) -> f64 {
        let impact = heading_fwd.dot(toward).max(0.0);
        self.friction - (self.friction - impact_factor) * impact
    }
}

/// The most recent mark a boat touched.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarkContact {
    pub mark: MarkId,
    /// Unit vector from the boat toward the mark.
    pub normal: Vec2,
    /// Race time of the contact.
    pub time: f64,
}

pub struct CollisionSystem {
    pub config: CollisionConfig,
    mark_contacts: Vec<Option<MarkContact>>,
    /// Boats that glance off marks with `forced_impact_factor`.
    forcing: Vec<bool>,
}

impl CollisionSystem {
    pub fn new(config: CollisionConfig, boat_count: usize) -> Self {
        Self { config, mark_contacts: vec![None; boat_count], forcing: vec![false; boat_count] }
    }

    /// Mark whether `boat` is forcing its way clear of a mark.
    pub fn set_forcing(&mut self, boat: BoatId, forcing: bool) {
        if let Some(slot) = self.forcing.get_mut(boat.index()) {
            *slot = forcing;
        }
    }

    /// Last mark `boat` touched, if any.
    #[inline]
    pub fn mark_contact(&self, boat: BoatId) -> Option<&MarkContact> {
        self.mark_contacts.get(boat.index()).and_then(Option::as_ref)
    }

    /// Find and resolve every contact.  `view` is the snapshot the rules
    /// judge boat-boat contacts on.  Contacts are always resolved; events
    /// and penalties only come from boats racing after the gun.  Returns the
    /// number of contacts.
    #[allow(clippy::too_many_arguments)]
    pub fn resolve(
        &mut self,
        fleet:  &mut Fleet,
        course: &Course,
        race:   &mut RaceStateMachine,
        rules:  &RightOfWayEngine,
        table:  &InteractionTable,
        view:   &RaceView<'_>,
        sink:   &mut impl EventSink,
    ) -> usize {
        self.resolve_boats(fleet, race, rules, table, view, sink)
            + self.resolve_marks(fleet, course, race, sink)
            + self.resolve_obstacles(fleet, course, race, sink)
    }

    // ── Boat ↔ boat ───────────────────────────────────────────────────────

    fn resolve_boats(
        &self,
        fleet: &mut Fleet,
        race:  &mut RaceStateMachine,
        rules: &RightOfWayEngine,
        table: &InteractionTable,
        view:  &RaceView<'_>,
        sink:  &mut impl EventSink,
    ) -> usize {
        let racing = race.phase() == RacePhase::Racing;
        let time = race.now();
        let mut contacts = 0;

        for i in 0..fleet.count {
            let a = BoatId(i as u16);
            if race.state(a).is_finished() {
                continue;
            }
            for j in i + 1..fleet.count {
                let b = BoatId(j as u16);
                if race.state(b).is_finished() {
                    continue;
                }
                let (ka, kb) = pair_mut(&mut fleet.kinematics, i, j);
                if ka.position.distance(kb.position) > self.config.boat_broad_phase {
                    continue;
                }
                let Some(contact) = polygon_polygon(
                    &hull_polygon(ka.position, ka.heading),
                    &hull_polygon(kb.position, kb.heading),
                ) else {
                    continue;
                };

                let push = contact.normal * ((contact.depth + self.config.slop) * 0.5);
                ka.position -= push;
                kb.position += push;
                ka.speed *= self.config.speed_factor(ka.forward(), contact.normal);
                kb.speed *= self.config.speed_factor(kb.forward(), -contact.normal);
                contacts += 1;

                if !racing {
                    continue;
                }
                debug!(%a, %b, depth = contact.depth, "boat collision");
                sink.emit(RaceEvent::BoatCollision { boat: a, other: b, time });
                match rules.evaluate(a, b, table, view).row_boat {
                    Some(winner) => {
                        let loser = if winner == a { b } else { a };
                        race.trigger_penalty(loser, sink);
                    }
                    None => {
                        race.trigger_penalty(a, sink);
                        race.trigger_penalty(b, sink);
                    }
                }
            }
        }
        contacts
    }

    // ── Boat ↔ mark ───────────────────────────────────────────────────────

    fn resolve_marks(
        &mut self,
        fleet:  &mut Fleet,
        course: &Course,
        race:   &mut RaceStateMachine,
        sink:   &mut impl EventSink,
    ) -> usize {
        let racing = race.phase() == RacePhase::Racing;
        let time = race.now();
        let mut contacts = 0;

        for boat in fleet.ids() {
            for (m, mark) in course.marks.iter().enumerate() {
                let kin = &mut fleet.kinematics[boat.index()];
                if kin.position.distance(mark.position) > self.config.mark_broad_phase {
                    continue;
                }
                let hull = hull_polygon(kin.position, kin.heading);
                let Some(contact) = polygon_circle(&hull, mark.position, mark.radius) else {
                    continue;
                };
                let mark_id = MarkId(m as u16);
                let impact_factor = if self.forcing.get(boat.index()).copied().unwrap_or(false) {
                    self.config.forced_impact_factor
                } else {
                    self.config.impact_factor
                };
                self.push_off(kin, contact, impact_factor);
                contacts += 1;

                if let Some(slot) = self.mark_contacts.get_mut(boat.index()) {
                    *slot = Some(MarkContact { mark: mark_id, normal: contact.normal, time });
                }
                if racing && !race.state(boat).is_finished() {
                    debug!(%boat, mark = %mark_id, "mark collision");
                    sink.emit(RaceEvent::MarkCollision { boat, mark: mark_id, time });
                    race.trigger_penalty(boat, sink);
                }
            }
        }
        contacts
    }

    // ── Boat ↔ obstacle ───────────────────────────────────────────────────

    fn resolve_obstacles(
        &self,
        fleet:  &mut Fleet,
        course: &Course,
        race:   &mut RaceStateMachine,
        sink:   &mut impl EventSink,
    ) -> usize {
        let racing = race.phase() == RacePhase::Racing;
        let time = race.now();
        let mut contacts = 0;

        for boat in fleet.ids() {
            for obstacle in course.obstacle_ids() {
                let shape = course.obstacle(obstacle);
                let kin = &mut fleet.kinematics[boat.index()];
                if kin.position.distance(shape.center) > shape.radius + self.config.obstacle_margin {
                    continue;
                }
                let hull = hull_polygon(kin.position, kin.heading);
                let Some(contact) = polygon_polygon(&hull, &shape.hull) else { continue };
                self.push_off(kin, contact, self.config.impact_factor);
                contacts += 1;

                if racing && !race.state(boat).is_finished() {
                    debug!(%boat, %obstacle, "obstacle collision");
                    sink.emit(RaceEvent::ObstacleCollision { boat, obstacle, time });
                    race.trigger_penalty(boat, sink);
                }
            }
        }
        contacts
    }

    /// Move a boat fully off a fixed shape and slow it.
    fn push_off(&self, kin: &mut Kinematics, contact: Contact, impact_factor: f64) {
        kin.position -= contact.normal * (contact.depth + self.config.slop);
        kin.speed *= self.config.slowdown(kin.forward(), contact.normal, impact_factor);
    }
}

/// Two distinct elements of a slice, mutably.
fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    debug_assert!(i < j);
    let (head, tail) = items.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}
