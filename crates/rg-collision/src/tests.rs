//! Unit tests for rg-collision.

use rg_core::hull::hull_polygon;
use rg_core::{BoatId, MarkId, ObstacleId, RaceEvent, RaceEventKind, Vec2};
use rg_course::{Course, Obstacle};
use rg_fleet::{BoatSpec, Fleet, FleetBuilder};
use rg_race::{FinishStatus, RaceConfig, RaceProgress, RaceStateMachine};
use rg_rules::{InteractionTable, RaceView, RightOfWayEngine};

use crate::{CollisionConfig, CollisionSystem, polygon_circle, polygon_polygon};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn square(x: f64, y: f64, size: f64) -> Vec<Vec2> {
    vec![
        Vec2::new(x, y),
        Vec2::new(x + size, y),
        Vec2::new(x + size, y + size),
        Vec2::new(x, y + size),
    ]
}

struct World {
    course: Course,
    fleet: Fleet,
    race: RaceStateMachine,
    rules: RightOfWayEngine,
    table: InteractionTable,
    collisions: CollisionSystem,
    events: Vec<RaceEvent>,
}

impl World {
    fn new(course: Course, boats: &[(f64, f64, f64)]) -> Self {
        let specs = boats
            .iter()
            .enumerate()
            .map(|(i, &(x, y, h))| BoatSpec::new(format!("boat {i}"), Vec2::new(x, y), h));
        let (fleet, _rngs) = FleetBuilder::new(7).boats(specs).build().unwrap();
        let race = RaceStateMachine::new(RaceConfig::default(), &course, fleet.count).unwrap();
        Self {
            rules: RightOfWayEngine::default(),
            table: InteractionTable::new(fleet.count),
            collisions: CollisionSystem::new(CollisionConfig::default(), fleet.count),
            events: Vec::new(),
            course,
            fleet,
            race,
        }
    }

    fn start(&mut self) {
        let prestart = self.race.config.prestart_secs;
        self.race.advance_clock(prestart, &mut self.events);
        self.events.clear();
    }

    fn resolve(&mut self) -> usize {
        let view = RaceView::capture(&self.fleet, &self.race, &self.course, 0.0);
        self.collisions.resolve(
            &mut self.fleet,
            &self.course,
            &mut self.race,
            &self.rules,
            &self.table,
            &view,
            &mut self.events,
        )
    }

    fn hull(&self, boat: u16) -> [Vec2; 7] {
        let k = self.fleet.kinematics(BoatId(boat));
        hull_polygon(k.position, k.heading)
    }

    fn count(&self, kind: RaceEventKind) -> usize {
        self.events.iter().filter(|e| e.kind() == kind).count()
    }

    fn penalized(&self, boat: u16) -> bool {
        self.race.state(BoatId(boat)).penalty.active
    }

    fn finish(&mut self, boat: u16) {
        self.race.states[usize::from(boat)].progress =
            RaceProgress::Finished { time: 300.0, status: FinishStatus::Finished };
    }
}

// ── Separating axis ───────────────────────────────────────────────────────────

#[cfg(test)]
mod sat_tests {
    use super::*;

    #[test]
    fn overlapping_squares_push_along_shallowest_axis() {
        let c = polygon_polygon(&square(0.0, 0.0, 10.0), &square(8.0, 1.0, 10.0)).unwrap();
        assert!((c.depth - 2.0).abs() < 1e-9);
        assert!((c.normal.x - 1.0).abs() < 1e-9 && c.normal.y.abs() < 1e-9);
    }

    #[test]
    fn normal_points_from_first_to_second() {
        let c = polygon_polygon(&square(8.0, 1.0, 10.0), &square(0.0, 0.0, 10.0)).unwrap();
        assert!((c.normal.x + 1.0).abs() < 1e-9);
    }

    #[test]
    fn apart_squares_do_not_touch() {
        assert!(polygon_polygon(&square(0.0, 0.0, 10.0), &square(10.5, 0.0, 10.0)).is_none());
    }

    #[test]
    fn contained_square_is_pushed_all_the_way_out() {
        let c = polygon_polygon(&square(0.0, 0.0, 10.0), &square(6.0, 4.0, 2.0)).unwrap();
        assert!((c.depth - 4.0).abs() < 1e-9);
        assert!((c.normal.x - 1.0).abs() < 1e-9);
    }

    #[test]
    fn circle_against_square_edge() {
        let c = polygon_circle(&square(0.0, 0.0, 10.0), Vec2::new(12.0, 5.0), 3.0).unwrap();
        assert!((c.depth - 1.0).abs() < 1e-9);
        assert!((c.normal.x - 1.0).abs() < 1e-9);
        assert!(polygon_circle(&square(0.0, 0.0, 10.0), Vec2::new(14.0, 5.0), 3.0).is_none());
    }

    #[test]
    fn circle_off_a_corner_is_judged_on_the_vertex_axis() {
        // Inside both edge slabs' reach but outside the corner's radius.
        let center = Vec2::new(12.0, 12.0);
        assert!(polygon_circle(&square(0.0, 0.0, 10.0), center, 2.5).is_none());
        assert!(polygon_circle(&square(0.0, 0.0, 10.0), center, 3.0).is_some());
    }

    #[test]
    fn degenerate_shapes_never_touch() {
        let line = [Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0)];
        assert!(polygon_polygon(&line, &square(0.0, 0.0, 10.0)).is_none());
        assert!(polygon_circle(&line, Vec2::ZERO, 5.0).is_none());
    }
}

// ── Boat ↔ boat ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod boat_tests {
    use super::*;

    #[test]
    fn overlapping_hulls_are_separated_and_reported() {
        let mut w = World::new(
            Course::standard(0.0, 4_000.0),
            &[(0.0, -1_000.0, 0.0), (20.0, -1_000.0, 0.0)],
        );
        w.fleet.kinematics[0].speed = 6.0;
        w.fleet.kinematics[1].speed = 6.0;
        assert_eq!(w.resolve(), 1);
        assert!(polygon_polygon(&w.hull(0), &w.hull(1)).is_none());
        // Side by side: the glancing blow costs only the friction term.
        assert!((w.fleet.kinematics[0].speed - 6.0 * 0.99).abs() < 1e-9);
        // Prestart: resolved silently.
        assert!(w.events.is_empty());
        assert!(!w.penalized(0) && !w.penalized(1));
    }

    #[test]
    fn contact_after_the_gun_is_reported() {
        let mut w = World::new(Course::standard(0.0, 4_000.0), &[(0.0, -1_000.0, 0.0), (20.0, -1_000.0, 0.0)]);
        w.start();
        assert_eq!(w.resolve(), 1);
        assert_eq!(w.count(RaceEventKind::BoatCollision), 1);
    }

    #[test]
    fn bow_into_topsides_costs_half_the_speed() {
        let mut w = World::new(
            Course::standard(0.0, 4_000.0),
            &[(0.0, -1_000.0, 0.0), (0.0, -1_035.0, std::f64::consts::FRAC_PI_2)],
        );
        w.fleet.kinematics[0].speed = 6.0;
        w.resolve();
        assert!((w.fleet.kinematics[0].speed - 3.0).abs() < 1e-6);
    }

    #[test]
    fn windward_boat_is_penalized_while_racing() {
        // Same tack (boom to starboard by default), B to the east: windward.
        let mut w = World::new(Course::standard(0.0, 4_000.0), &[(0.0, -1_000.0, 0.0), (20.0, -1_000.0, 0.0)]);
        w.start();
        w.resolve();
        assert!(!w.penalized(0));
        assert!(w.penalized(1));
        assert_eq!(w.count(RaceEventKind::Penalty), 1);
    }

    #[test]
    fn port_boat_is_penalized() {
        let mut w = World::new(Course::standard(0.0, 4_000.0), &[(0.0, -1_000.0, 0.0), (20.0, -1_000.0, 0.0)]);
        w.fleet.rig[0].boom_side = -1.0;
        w.start();
        w.resolve();
        assert!(w.penalized(0));
        assert!(!w.penalized(1));
    }

    #[test]
    fn distant_boats_are_skipped() {
        let mut w = World::new(Course::standard(0.0, 4_000.0), &[(0.0, -1_000.0, 0.0), (200.0, -1_000.0, 0.0)]);
        assert_eq!(w.resolve(), 0);
        assert!(w.events.is_empty());
    }
}

// ── Fixed shapes ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod fixed_tests {
    use super::*;

    #[test]
    fn mark_contact_pushes_boat_off_and_is_remembered() {
        let mut w = World::new(Course::standard(0.0, 4_000.0), &[(-275.0, 20.0, 0.0)]);
        let mark = *w.course.mark(MarkId(0));
        assert_eq!(w.resolve(), 1);
        assert!(polygon_circle(&w.hull(0), mark.position, mark.radius).is_none());
        let contact = w.collisions.mark_contact(BoatId(0)).unwrap();
        assert_eq!(contact.mark, MarkId(0));
        // The mark is ahead of the boat (toward −y).
        assert!(contact.normal.y < 0.0);
        assert!(w.events.is_empty());
        assert!(!w.penalized(0));
    }

    #[test]
    fn mark_contact_while_racing_is_penalized() {
        let mut w = World::new(Course::standard(0.0, 4_000.0), &[(-275.0, 20.0, 0.0)]);
        w.start();
        w.resolve();
        assert!(w.penalized(0));
        assert_eq!(w.count(RaceEventKind::MarkCollision), 1);
    }

    #[test]
    fn finished_boat_touches_marks_silently() {
        let mut w = World::new(Course::standard(0.0, 4_000.0), &[(-275.0, 20.0, 0.0)]);
        w.start();
        w.finish(0);
        assert_eq!(w.resolve(), 1);
        assert!(w.events.is_empty());
        assert!(!w.penalized(0));
        // Still pushed clear and remembered.
        assert!(w.collisions.mark_contact(BoatId(0)).is_some());
    }

    #[test]
    fn forcing_boat_glances_off_marks() {
        let bow_on = |forcing: bool| {
            let mut w = World::new(Course::standard(0.0, 4_000.0), &[(-275.0, 20.0, 0.0)]);
            w.collisions.set_forcing(BoatId(0), forcing);
            w.fleet.kinematics[0].speed = 6.0;
            w.resolve();
            w.fleet.kinematics[0].speed
        };
        let normal = bow_on(false);
        let forced = bow_on(true);
        assert!(forced > normal);
        assert!(forced >= 6.0 * 0.9 - 1e-9 && forced <= 6.0 * 0.99 + 1e-9);
        assert!(normal >= 6.0 * 0.5 - 1e-9);
    }

    #[test]
    fn obstacle_contact_pushes_boat_clear() {
        let island = Obstacle::regular(Vec2::new(0.0, -2_000.0), 100.0, 8);
        let course = Course::standard(0.0, 4_000.0).with_obstacles(vec![island]);
        let mut w = World::new(course, &[(0.0, -1_890.0, 0.0)]);
        w.start();
        assert_eq!(w.resolve(), 1);
        let hull = w.course.obstacle(ObstacleId(0)).hull.clone();
        assert!(polygon_polygon(&w.hull(0), &hull).is_none());
        assert_eq!(w.count(RaceEventKind::ObstacleCollision), 1);
        assert!(w.penalized(0));
    }

    #[test]
    fn prestart_obstacle_contact_is_silent() {
        let island = Obstacle::regular(Vec2::new(0.0, -2_000.0), 100.0, 8);
        let course = Course::standard(0.0, 4_000.0).with_obstacles(vec![island]);
        let mut w = World::new(course, &[(0.0, -1_890.0, 0.0)]);
        assert_eq!(w.resolve(), 1);
        assert!(w.events.is_empty());
        assert!(!w.penalized(0));
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;
    use std::f64::consts::PI;

    proptest! {
        /// Splitting the minimum translation between two hulls always
        /// leaves them apart.
        #[test]
        fn prop_split_resolution_separates(
            dx in -60.0f64..60.0,
            dy in -60.0f64..60.0,
            ha in -PI..PI,
            hb in -PI..PI,
        ) {
            let a = hull_polygon(Vec2::ZERO, ha);
            let b = hull_polygon(Vec2::new(dx, dy), hb);
            if let Some(c) = polygon_polygon(&a, &b) {
                prop_assert!(c.depth >= 0.0);
                let push = c.normal * ((c.depth + 1e-3) * 0.5);
                let a2: Vec<Vec2> = a.iter().map(|&p| p - push).collect();
                let b2: Vec<Vec2> = b.iter().map(|&p| p + push).collect();
                prop_assert!(polygon_polygon(&a2, &b2).is_none());
            }
        }

        /// The system leaves every pair it touched strictly apart.
        #[test]
        fn prop_system_separates_boats(
            dx in -50.0f64..50.0,
            dy in -50.0f64..50.0,
            hb in -PI..PI,
        ) {
            let mut w = World::new(
                Course::standard(0.0, 4_000.0),
                &[(0.0, -1_000.0, 0.0), (dx, -1_000.0 + dy, hb)],
            );
            w.resolve();
            prop_assert!(polygon_polygon(&w.hull(0), &w.hull(1)).is_none());
        }
    }
}
