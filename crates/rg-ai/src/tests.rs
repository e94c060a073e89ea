//! Unit tests for rg-ai.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use rg_collision::{CollisionConfig, CollisionSystem};
use rg_core::geom::{forward, normalize_angle};
use rg_core::{BoatId, BoatRng, RaceEvent, SimRng, Vec2};
use rg_course::{Course, Obstacle};
use rg_fleet::{BoatSpec, Fleet, FleetBuilder};
use rg_physics::{Current, PolarModel};
use rg_race::{RaceConfig, RacePhase, RaceStateMachine};
use rg_rules::{InteractionTable, RaceView, RightOfWayEngine};
use rg_wind::{WindConfig, WindField};

use crate::navigation::navigation_target;
use crate::start::start_command;
use crate::strategy::{CLOSE_HAULED, strategic_heading};
use crate::{
    AiLiveness, AiMemory, AvoidanceWeights, BotSkipper, CANDIDATE_OFFSETS, HelmContext, HoldCourse,
    RiskLatch, RiskLevel, RiskRole, RoutePlanner, Skipper, StartCommand, StartPlan, Threat, assess,
    choose_offset,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Wind from north at 12 kn over the standard course: start line on y = 0
/// between x = ±275, windward gate on y = −4000.
struct World {
    course: Course,
    fleet: Fleet,
    wind: WindField,
    current: Current,
    polar: PolarModel,
    race: RaceStateMachine,
    table: InteractionTable,
    rules: RightOfWayEngine,
    collisions: CollisionSystem,
    planner: RoutePlanner,
}

impl World {
    /// Boats as `(x, y, heading)`, all at rest.
    fn new(course: Course, boats: &[(f64, f64, f64)]) -> Self {
        let specs = boats
            .iter()
            .enumerate()
            .map(|(i, &(x, y, h))| BoatSpec::new(format!("boat {i}"), Vec2::new(x, y), h));
        let (fleet, _rngs) = FleetBuilder::new(7).boats(specs).build().unwrap();
        let wind = WindField::new(WindConfig::steady(0.0, 12.0), &course, &mut SimRng::new(7)).unwrap();
        let race = RaceStateMachine::new(RaceConfig::default(), &course, fleet.count).unwrap();
        Self {
            table: InteractionTable::new(fleet.count),
            collisions: CollisionSystem::new(CollisionConfig::default(), fleet.count),
            planner: RoutePlanner::new(&course.obstacles),
            rules: RightOfWayEngine::default(),
            current: Current::default(),
            polar: PolarModel::j111(),
            course,
            fleet,
            wind,
            race,
        }
    }

    fn open_water(boats: &[(f64, f64, f64)]) -> Self {
        Self::new(Course::standard(0.0, 4_000.0), boats)
    }

    /// Advance the race clock by `secs`.
    fn run_clock(&mut self, secs: f64) {
        let mut events: Vec<RaceEvent> = Vec::new();
        self.race.advance_clock(secs, &mut events);
    }

    fn start(&mut self) {
        let prestart = self.race.config.prestart_secs;
        self.run_clock(prestart);
        assert_eq!(self.race.phase(), RacePhase::Racing);
    }

    /// Sail `boat` at `knots` on its current heading.
    fn sail(&mut self, boat: u16, knots: f64) {
        let kin = &mut self.fleet.kinematics[usize::from(boat)];
        kin.speed = knots;
        kin.velocity = forward(kin.heading) * (knots * 15.0);
    }

    fn port_tack(&mut self, boat: u16) {
        self.fleet.rig[usize::from(boat)].boom_side = -1.0;
    }

    /// Capture the view, refresh the rules and hand `f` a context.
    fn with_ctx<R>(&mut self, f: impl FnOnce(&HelmContext<'_>) -> R) -> R {
        let view = RaceView::capture(&self.fleet, &self.race, &self.course, self.wind.direction());
        self.rules.update(&mut self.table, &view);
        let ctx = HelmContext::new(
            &self.fleet,
            &self.course,
            &self.wind,
            self.current,
            &self.polar,
            &self.race,
            &view,
            &self.table,
            &self.rules,
            &self.collisions,
            &self.planner,
        );
        f(&ctx)
    }
}

fn memory() -> AiMemory {
    AiMemory::new(&mut BoatRng::new(7, BoatId(0)))
}

fn rng() -> BoatRng {
    BoatRng::new(7, BoatId(0))
}

const A: BoatId = BoatId(0);
const B: BoatId = BoatId(1);

/// A on starboard and B on port, converging on (0, −2100) at 6 kn.
fn crossing() -> World {
    let mut w = World::open_water(&[(100.0, -2_000.0, -FRAC_PI_4), (-100.0, -2_000.0, FRAC_PI_4)]);
    w.start();
    w.port_tack(1);
    w.sail(0, 6.0);
    w.sail(1, 6.0);
    w
}

fn close(a: f64, b: f64) -> bool {
    normalize_angle(a - b).abs() < 1e-9
}

// ── Risk ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod risk_tests {
    use super::*;

    #[test]
    fn classification_thresholds() {
        assert_eq!(RiskLevel::classify(700.0, 0.0, 1.0), RiskLevel::Low);
        assert_eq!(RiskLevel::classify(50.0, 200.0, -1.0), RiskLevel::Imminent);
        assert_eq!(RiskLevel::classify(300.0, 30.0, 1.5), RiskLevel::Imminent);
        assert_eq!(RiskLevel::classify(300.0, 30.0, 3.0), RiskLevel::High);
        assert_eq!(RiskLevel::classify(300.0, 60.0, 6.0), RiskLevel::Medium);
        assert_eq!(RiskLevel::classify(300.0, 60.0, 9.0), RiskLevel::Low);
        // Already past the closest approach.
        assert_eq!(RiskLevel::classify(300.0, 10.0, -2.0), RiskLevel::Low);
    }

    #[test]
    fn latch_holds_a_committed_level() {
        let mut latch = RiskLatch::default();
        let threat = Threat { other: B, level: RiskLevel::High, role: RiskRole::GiveWay };
        latch.update(Some(threat), 0.1);
        assert!(latch.giving_way());

        latch.update(None, 1.0);
        assert_eq!(latch.level, RiskLevel::High);

        latch.update(None, 1.5);
        assert_eq!(latch.level, RiskLevel::Low);
        assert_eq!(latch.role, RiskRole::None);
    }

    #[test]
    fn stand_on_medium_does_not_commit() {
        let mut latch = RiskLatch::default();
        let threat = Threat { other: B, level: RiskLevel::Medium, role: RiskRole::StandOn };
        latch.update(Some(threat), 0.1);
        assert!(latch.standing_on());
        latch.update(None, 0.1);
        assert_eq!(latch.level, RiskLevel::Low);
    }

    #[test]
    fn port_starboard_crossing_is_imminent() {
        let mut w = crossing();
        let (a, b) = w.with_ctx(|ctx| {
            (assess(A, ctx.view, ctx.table, ctx.rules), assess(B, ctx.view, ctx.table, ctx.rules))
        });
        let a = a.unwrap();
        let b = b.unwrap();
        assert_eq!(a.other, B);
        assert_eq!(a.level, RiskLevel::Imminent);
        assert_eq!(a.role, RiskRole::StandOn);
        assert_eq!(b.level, RiskLevel::Imminent);
        assert_eq!(b.role, RiskRole::GiveWay);
    }

    #[test]
    fn distant_boats_are_no_threat() {
        let mut w = World::open_water(&[(0.0, -1_000.0, 0.0), (0.0, -3_000.0, 0.0)]);
        w.start();
        assert_eq!(w.with_ctx(|ctx| assess(A, ctx.view, ctx.table, ctx.rules)), None);
    }
}

// ── Avoidance ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod avoidance_tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn lone_boat_holds_its_heading() {
        let mut w = World::open_water(&[(0.0, -2_000.0, 0.0)]);
        w.start();
        w.sail(0, 6.0);
        let m = memory();
        let offset = w.with_ctx(|ctx| choose_offset(A, 0.0, ctx, &m, &AvoidanceWeights::default()));
        assert_eq!(offset, 0.0);
    }

    #[test]
    fn give_way_boat_alters_course() {
        let mut w = crossing();
        let mut m = memory();
        let offset = w.with_ctx(|ctx| {
            m.risk.update(assess(B, ctx.view, ctx.table, ctx.rules), 0.1);
            choose_offset(B, FRAC_PI_4, ctx, &m, &AvoidanceWeights::default())
        });
        assert_ne!(offset, 0.0);
    }

    #[test]
    fn obstacle_cost_fades_with_clearance() {
        use crate::cost::{OBSTACLE_PROXIMITY_MARGIN, obstacle_cost};

        let island = Obstacle::regular(Vec2::ZERO, 100.0, 8);
        let w = AvoidanceWeights::default();
        let pass = |x: f64| obstacle_cost(&island, Vec2::new(x, 300.0), Vec2::new(x, -300.0), &w);

        assert_eq!(pass(0.0), (w.obstacle_contact, true));
        let (near, near_hit) = pass(140.0);
        let (far, far_hit) = pass(170.0);
        assert!(!near_hit && !far_hit);
        assert!(near > far && far > 0.0);
        assert!((near - w.obstacle_proximity * 0.5).abs() < 1e-6);
        assert_eq!(pass(100.0 + OBSTACLE_PROXIMITY_MARGIN + 1.0), (0.0, false));
    }

    proptest! {
        #[test]
        fn prop_offset_is_a_candidate(
            x in -400.0f64..400.0,
            y in -400.0f64..400.0,
            heading in -3.1f64..3.1,
            desired in -3.1f64..3.1,
        ) {
            let mut w = World::open_water(&[(0.0, -2_000.0, 0.0), (x, y - 2_000.0, heading)]);
            w.start();
            w.sail(0, 6.0);
            w.sail(1, 6.0);
            let mut m = memory();
            let offset = w.with_ctx(|ctx| {
                m.risk.update(assess(A, ctx.view, ctx.table, ctx.rules), 0.1);
                choose_offset(A, desired, ctx, &m, &AvoidanceWeights::default())
            });
            prop_assert!(CANDIDATE_OFFSETS.contains(&offset));
        }
    }
}

// ── Planner ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod planner_tests {
    use super::*;

    fn island() -> RoutePlanner {
        RoutePlanner::new(&[Obstacle::regular(Vec2::new(0.0, -2_000.0), 200.0, 8)])
    }

    #[test]
    fn routes_around_an_island() {
        let planner = island();
        let start = Vec2::new(0.0, -1_500.0);
        let target = Vec2::new(0.0, -2_500.0);
        assert!(!planner.line_is_clear(start, target));

        let path = planner.find_path(start, target);
        assert!(path.len() >= 2, "{path:?}");
        assert_eq!(path.last(), Some(&target));

        let mut from = start;
        for &to in &path {
            assert!(planner.line_is_clear(from, to), "{from:?} -> {to:?}");
            from = to;
        }
    }

    #[test]
    fn clear_water_is_a_straight_line() {
        let planner = island();
        let target = Vec2::new(1_000.0, -1_000.0);
        assert_eq!(planner.find_path(Vec2::new(1_000.0, 0.0), target), vec![target]);
    }

    #[test]
    fn empty_planner_steers_straight() {
        let planner = RoutePlanner::new(&[]);
        assert!(planner.is_empty());
        let mut route = Default::default();
        let target = Vec2::new(0.0, -100.0);
        assert_eq!(planner.steer(&mut route, Vec2::ZERO, target, 0.1, &mut rng()), target);
    }

    #[test]
    fn steering_drops_reached_waypoints() {
        let planner = island();
        let mut route = Default::default();
        let start = Vec2::new(0.0, -1_500.0);
        let target = Vec2::new(0.0, -2_500.0);
        let first = planner.steer(&mut route, start, target, 0.1, &mut rng());
        assert_ne!(first, target);
        assert!(route.goal == Some(target));

        let remaining = route.waypoints.len();
        let next = planner.steer(&mut route, first, target, 0.1, &mut rng());
        assert_eq!(route.waypoints.len(), remaining - 1);
        assert_ne!(next, first);
    }
}

// ── Navigation ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod navigation_tests {
    use super::*;

    #[test]
    fn start_leg_aims_through_the_planned_spot() {
        let mut w = World::open_water(&[(0.0, 200.0, 0.0)]);
        let mut m = memory();
        m.start = StartPlan { line_fraction: 0.5, setup_distance: 150.0 };
        let target = w.with_ctx(|ctx| navigation_target(A, ctx, &m));
        assert!((target.x).abs() < 1e-9);
        assert!((target.y + 150.0).abs() < 1e-9);
    }

    #[test]
    fn boat_above_the_line_goes_back_below() {
        let mut w = World::open_water(&[(0.0, -100.0, 0.0)]);
        let m = memory();
        let target = w.with_ctx(|ctx| navigation_target(A, ctx, &m));
        assert!((target.y - 150.0).abs() < 1e-9, "{target:?}");
    }

    #[test]
    fn forced_boats_aim_further_through_the_middle() {
        let mut w = World::open_water(&[(0.0, 200.0, 0.0)]);
        let mut m = memory();
        m.liveness = AiLiveness::Force;
        let target = w.with_ctx(|ctx| navigation_target(A, ctx, &m));
        assert!(target.x.abs() < 1e-9);
        assert!((target.y + 300.0).abs() < 1e-9);
    }
}

// ── Strategy ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod strategy_tests {
    use super::*;

    #[test]
    fn beats_close_hauled_to_an_upwind_target() {
        let mut w = World::open_water(&[(0.0, -1_000.0, 0.0)]);
        w.start();
        w.sail(0, 6.0);
        let mut m = memory();
        let heading = w.with_ctx(|ctx| strategic_heading(A, Vec2::new(0.0, -3_000.0), ctx, &mut m));
        assert!((heading.abs() - CLOSE_HAULED).abs() < 1e-9, "{heading}");
    }

    #[test]
    fn reaches_straight_at_the_target() {
        let mut w = World::open_water(&[(0.0, -1_000.0, FRAC_PI_2)]);
        w.start();
        w.sail(0, 6.0);
        let mut m = memory();
        let heading = w.with_ctx(|ctx| strategic_heading(A, Vec2::new(1_000.0, -1_000.0), ctx, &mut m));
        assert!(close(heading, FRAC_PI_2), "{heading}");
    }

    #[test]
    fn forced_boats_pinch_toward_the_target() {
        let mut w = World::open_water(&[(0.0, -1_000.0, 0.0)]);
        w.start();
        let mut m = memory();
        m.liveness = AiLiveness::Force;
        let heading = w.with_ctx(|ctx| strategic_heading(A, Vec2::new(0.0, -3_000.0), ctx, &mut m));
        assert!(close(heading, -0.75), "{heading}");
    }

    #[test]
    fn tack_cooldown_holds_the_current_tack() {
        // On port, with the target well to the left: starboard scores better.
        let mut w = World::open_water(&[(500.0, -1_000.0, FRAC_PI_4)]);
        w.start();
        w.port_tack(0);
        w.sail(0, 6.0);
        let target = Vec2::new(-500.0, -3_000.0);

        let mut m = memory();
        m.tack_cooldown = 3.0;
        let held = w.with_ctx(|ctx| strategic_heading(A, target, ctx, &mut m));
        assert!(close(held, FRAC_PI_4), "{held}");

        m.tack_cooldown = 0.0;
        let switched = w.with_ctx(|ctx| strategic_heading(A, target, ctx, &mut m));
        assert!(close(switched, -FRAC_PI_4), "{switched}");
        assert!(m.tack_cooldown > 0.0);
    }
}

// ── Start ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod start_tests {
    use super::*;

    const PLAN: StartPlan = StartPlan { line_fraction: 0.5, setup_distance: 200.0 };

    #[test]
    fn heads_for_the_setup_point_early() {
        let mut w = World::open_water(&[(0.0, 300.0, 0.0)]);
        let command = w.with_ctx(|ctx| start_command(A, ctx, &PLAN));
        let StartCommand::Steer { heading, speed_limit } = command else {
            panic!("{command:?}");
        };
        assert!(close(heading, 0.0));
        assert_eq!(speed_limit, 1.0);
    }

    #[test]
    fn parks_close_hauled_near_the_line() {
        let mut w = World::open_water(&[(0.0, 150.0, 0.0)]);
        let command = w.with_ctx(|ctx| start_command(A, ctx, &PLAN));
        let StartCommand::Steer { heading, speed_limit } = command else {
            panic!("{command:?}");
        };
        assert!(close(heading, -CLOSE_HAULED));
        assert_eq!(speed_limit, 0.2);
    }

    #[test]
    fn times_the_run_in() {
        let mut w = World::open_water(&[(0.0, 300.0, 0.0), (0.0, 100.0, 0.0)]);
        w.run_clock(25.0);
        let (far, near) = w.with_ctx(|ctx| (start_command(A, ctx, &PLAN), start_command(B, ctx, &PLAN)));
        assert_eq!(far, StartCommand::SailTo { target: Vec2::ZERO, speed_limit: 1.0 });
        assert_eq!(near, StartCommand::SailTo { target: Vec2::ZERO, speed_limit: 0.1 });
    }
}

// ── Memory ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod memory_tests {
    use super::*;

    #[test]
    fn decisions_are_staggered_then_periodic() {
        let mut m = memory();
        assert!((0.0..0.2).contains(&m.decision_in));
        assert_eq!(m.tick(0.25), Some(0.25));
        assert_eq!(m.tick(0.05), None);
        let elapsed = m.tick(0.05).unwrap();
        assert!((elapsed - 0.1).abs() < 1e-9);
    }

    #[test]
    fn liveness_escalates_on_the_start_leg() {
        let mut m = memory();
        assert_eq!(m.watch_liveness(5.0, true, Some(10.0), 0.1), None);
        assert_eq!(m.watch_liveness(5.0, true, Some(20.0), 0.1), Some(AiLiveness::Normal));
        assert_eq!(m.liveness, AiLiveness::Recovery);
        assert_eq!(m.watch_liveness(5.0, true, Some(50.0), 0.1), Some(AiLiveness::Recovery));
        assert_eq!(m.liveness, AiLiveness::Force);
        assert_eq!(m.watch_liveness(5.0, true, None, 0.1), Some(AiLiveness::Force));
        assert_eq!(m.liveness, AiLiveness::Normal);
    }

    #[test]
    fn slow_boats_escalate_and_recover() {
        let mut m = memory();
        for _ in 0..6 {
            m.watch_liveness(0.5, true, Some(1.0), 1.0);
        }
        assert_eq!(m.liveness, AiLiveness::Recovery);
        // Between the thresholds the timer holds.
        m.watch_liveness(1.5, true, Some(2.0), 1.0);
        assert_eq!(m.slow_for, 6.0);
        m.watch_liveness(3.0, true, Some(3.0), 1.0);
        assert_eq!(m.slow_for, 0.0);
        assert_eq!(m.liveness, AiLiveness::Normal);
    }

    #[test]
    fn prestart_resets_the_watchdog() {
        let mut m = memory();
        m.slow_for = 20.0;
        m.liveness = AiLiveness::Force;
        m.watch_liveness(0.0, false, None, 0.1);
        assert_eq!(m.slow_for, 0.0);
        assert_eq!(m.liveness, AiLiveness::Normal);
    }
}

// ── Bot ───────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod bot_tests {
    use super::*;

    #[test]
    fn hold_course_never_commands() {
        let mut w = World::open_water(&[(0.0, 200.0, 0.0)]);
        let mut m = memory();
        let mut r = rng();
        assert_eq!(w.with_ctx(|ctx| HoldCourse.decide(A, ctx, &mut m, &mut r, 0.1)), None);
    }

    #[test]
    fn decides_only_when_due() {
        let mut w = World::open_water(&[(0.0, 200.0, 0.0)]);
        let bot = BotSkipper::default();
        let mut m = memory();
        m.decision_in = 0.05;
        let mut r = rng();
        let (first, second) = w.with_ctx(|ctx| {
            (bot.decide(A, ctx, &mut m, &mut r, 0.1), bot.decide(A, ctx, &mut m, &mut r, 0.05))
        });
        assert!(first.is_some());
        assert!(second.is_none());
    }

    #[test]
    fn racing_boat_gets_a_sane_command() {
        let mut w = World::open_water(&[(0.0, -1_000.0, -FRAC_PI_4)]);
        w.start();
        w.sail(0, 6.0);
        let bot = BotSkipper::default();
        let mut m = memory();
        let mut r = rng();
        let command = w.with_ctx(|ctx| bot.plan(A, ctx, &mut m, &mut r, 0.1));
        assert!(command.heading.is_finite());
        assert_eq!(command.speed_limit, 1.0);
        assert_eq!(command.min_speed, None);
    }

    #[test]
    fn stuck_boat_wiggles_with_a_speed_floor() {
        let mut w = World::open_water(&[(0.0, -1_000.0, 0.0)]);
        w.start();
        let bot = BotSkipper::default();
        let mut m = memory();
        m.slow_for = 4.0;
        let mut r = rng();
        let command = w.with_ctx(|ctx| bot.plan(A, ctx, &mut m, &mut r, 0.1));
        assert!(m.unstick.is_wiggling());
        assert_eq!(command.min_speed, Some(0.6));
        assert_eq!(command.turn_boost, 5.0);
        assert!((normalize_angle(command.heading).abs() - 1.75).abs() < 1e-9);
    }
}
