//! Integration tests for rg-sim.

use std::f64::consts::{FRAC_PI_2, PI};

use rg_ai::{BotSkipper, HoldCourse};
use rg_core::{BoatId, RaceEvent, RaceEventKind, Tick, Vec2};
use rg_course::Course;
use rg_fleet::{BoatSpec, FleetError, Helm};
use rg_physics::HelmCommand;
use rg_race::{FinishStatus, RaceConfig, RacePhase, RaceProgress, Standing};
use rg_wind::{WindConfig, WindError};

use crate::{RaceObserver, SimBuilder, SimConfig, SimError};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config() -> SimConfig {
    SimConfig { wind: WindConfig::steady(0.0, 12.0), ..SimConfig::default() }
}

/// `n` boats in a row 200 units below the start line, pointing at the wind.
fn line_up(n: usize) -> Vec<BoatSpec> {
    (0..n)
        .map(|i| BoatSpec::new(format!("boat {i}"), Vec2::new(-200.0 + 80.0 * i as f64, 200.0), 0.0))
        .collect()
}

fn standard() -> Course {
    Course::standard(0.0, 4_000.0)
}

#[derive(Default)]
struct Recorder {
    events: Vec<RaceEvent>,
    ticks_started: usize,
    ticks_ended: usize,
    last_time: f64,
    ended: usize,
    standings: Vec<Standing>,
}

impl RaceObserver for Recorder {
    fn on_tick_start(&mut self, _tick: Tick) {
        self.ticks_started += 1;
    }

    fn on_event(&mut self, event: &RaceEvent) {
        self.events.push(event.clone());
    }

    fn on_tick_end(&mut self, _tick: Tick, race_time: f64) {
        self.ticks_ended += 1;
        self.last_time = race_time;
    }

    fn on_race_end(&mut self, standings: &[Standing]) {
        self.ended += 1;
        self.standings = standings.to_vec();
    }
}

impl Recorder {
    fn count(&self, kind: RaceEventKind) -> usize {
        self.events.iter().filter(|e| e.kind() == kind).count()
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_successfully_with_defaults() {
        let sim = SimBuilder::new(test_config(), standard(), line_up(3), HoldCourse).build().unwrap();
        assert_eq!(sim.fleet.count, 3);
        assert_eq!(sim.memory.len(), 3);
        assert_eq!(sim.commands.len(), 3);
        assert_eq!(sim.race().phase(), RacePhase::Prestart);
        assert_eq!(sim.race().now(), -30.0);
    }

    #[test]
    fn initial_commands_hold_the_starting_heading() {
        let boats = vec![BoatSpec::new("east", Vec2::new(0.0, 200.0), FRAC_PI_2)];
        let sim = SimBuilder::new(test_config(), standard(), boats, HoldCourse).build().unwrap();
        assert_eq!(sim.commands[0], HelmCommand::hold(FRAC_PI_2));
    }

    #[test]
    fn empty_fleet_errors() {
        let result = SimBuilder::new(test_config(), standard(), Vec::new(), HoldCourse).build();
        assert!(matches!(result, Err(SimError::Fleet(FleetError::Empty))));
    }

    #[test]
    fn invalid_max_dt_errors() {
        let config = SimConfig { max_dt: 0.0, ..test_config() };
        let result = SimBuilder::new(config, standard(), line_up(1), HoldCourse).build();
        assert!(matches!(result, Err(SimError::InvalidParameter { name: "max_dt", .. })));
    }

    #[test]
    fn invalid_wind_errors() {
        let config = SimConfig { wind: WindConfig::steady(0.0, 0.0), ..test_config() };
        let result = SimBuilder::new(config, standard(), line_up(1), HoldCourse).build();
        assert!(matches!(result, Err(SimError::Wind(WindError::InvalidSpeed(_)))));
    }

    #[test]
    fn invalid_race_config_errors() {
        let config = SimConfig { race: RaceConfig { total_legs: 0, ..RaceConfig::default() }, ..test_config() };
        let result = SimBuilder::new(config, standard(), line_up(1), HoldCourse).build();
        assert!(matches!(result, Err(SimError::Race(_))));
    }
}

// ── Tick ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tick_tests {
    use super::*;

    #[test]
    fn long_frames_are_clamped() {
        let mut sim = SimBuilder::new(test_config(), standard(), line_up(1), HoldCourse).build().unwrap();
        sim.tick(1.0);
        assert_eq!(sim.clock.current_tick, Tick(1));
        assert!((sim.clock.elapsed_secs - 0.1).abs() < 1e-12);
        assert!((sim.race().now() + 29.9).abs() < 1e-9);
    }

    #[test]
    fn degenerate_steps_are_ignored() {
        let mut sim = SimBuilder::new(test_config(), standard(), line_up(1), HoldCourse).build().unwrap();
        sim.tick(0.0);
        sim.tick(-0.1);
        sim.tick(f64::NAN);
        assert_eq!(sim.clock.current_tick, Tick(0));
        assert_eq!(sim.race().now(), -30.0);
    }

    #[test]
    fn observer_sees_every_tick_and_the_gun() {
        let mut sim = SimBuilder::new(test_config(), standard(), line_up(2), HoldCourse)
            .observer(Recorder::default())
            .build()
            .unwrap();
        for _ in 0..310 {
            sim.tick(0.1);
        }
        assert_eq!(sim.observer.ticks_started, 310);
        assert_eq!(sim.observer.ticks_ended, 310);
        assert_eq!(sim.race().phase(), RacePhase::Racing);
        assert_eq!(sim.observer.count(RaceEventKind::RaceStarted), 1);
        assert!(sim.observer.last_time > 0.0);
    }

    #[test]
    fn boats_sail_under_their_standing_command() {
        let mut sim = SimBuilder::new(test_config(), standard(), line_up(1), HoldCourse).build().unwrap();
        sim.set_command(BoatId(0), HelmCommand::hold(-FRAC_PI_2 / 2.0)).unwrap();
        for _ in 0..100 {
            sim.tick(0.1);
        }
        let kin = sim.fleet.kinematics(BoatId(0));
        assert!((kin.heading + FRAC_PI_2 / 2.0).abs() < 1e-6, "{}", kin.heading);
        assert!(kin.speed > 1.0);
        assert!(kin.position.y < 200.0);
    }

    fn quick_gun() -> SimConfig {
        SimConfig { race: RaceConfig { prestart_secs: 1.0, ..RaceConfig::default() }, ..test_config() }
    }

    #[test]
    fn boundary_contact_is_reported_once_per_contact() {
        // 500 units inside the boundary, running straight at it.
        let boats = vec![BoatSpec::new("runner", Vec2::new(0.0, 2_000.0), PI).speed(6.0)];
        let mut sim = SimBuilder::new(quick_gun(), standard(), boats, HoldCourse)
            .observer(Recorder::default())
            .build()
            .unwrap();
        for _ in 0..150 {
            sim.tick(0.1);
        }
        assert!(sim.on_boundary[0]);
        let boundary = sim.observer.count(RaceEventKind::BoundaryCollision);
        assert!(boundary >= 1);
        assert!(boundary < 150);
    }

    #[test]
    fn boundary_contact_before_the_gun_is_silent() {
        // 100 units inside the boundary with the default 30 s countdown.
        let boats = vec![BoatSpec::new("runner", Vec2::new(0.0, 2_400.0), PI).speed(6.0)];
        let mut sim = SimBuilder::new(test_config(), standard(), boats, HoldCourse)
            .observer(Recorder::default())
            .build()
            .unwrap();
        for _ in 0..50 {
            sim.tick(0.1);
        }
        assert_eq!(sim.race().phase(), RacePhase::Prestart);
        assert!(sim.on_boundary[0]);
        assert_eq!(sim.observer.count(RaceEventKind::BoundaryCollision), 0);
    }

    #[test]
    fn finished_boats_meet_the_boundary_silently() {
        let boats = vec![
            BoatSpec::new("runner", Vec2::new(0.0, 2_000.0), PI).speed(6.0),
            BoatSpec::new("reacher", Vec2::new(0.0, 200.0), FRAC_PI_2),
        ];
        let mut sim = SimBuilder::new(quick_gun(), standard(), boats, HoldCourse)
            .observer(Recorder::default())
            .build()
            .unwrap();
        sim.race.states[0].progress = RaceProgress::Finished { time: 0.0, status: FinishStatus::Finished };
        for _ in 0..150 {
            sim.tick(0.1);
        }
        assert_eq!(sim.race().phase(), RacePhase::Racing);
        assert!(sim.on_boundary[0]);
        assert_eq!(sim.observer.count(RaceEventKind::BoundaryCollision), 0);
    }
}

// ── External helm ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod command_tests {
    use super::*;

    #[test]
    fn unknown_boat_is_rejected() {
        let mut sim = SimBuilder::new(test_config(), standard(), line_up(2), HoldCourse).build().unwrap();
        let result = sim.set_command(BoatId(5), HelmCommand::hold(0.0));
        assert!(matches!(result, Err(SimError::UnknownBoat(BoatId(5)))));
    }

    #[test]
    fn skipper_leaves_external_boats_alone() {
        let mut boats = line_up(2);
        boats[0].helm = Helm::External;
        let mut sim = SimBuilder::new(test_config(), standard(), boats, BotSkipper::default()).build().unwrap();
        let command = HelmCommand::hold(1.0).with_speed_limit(0.5);
        sim.set_command(BoatId(0), command).unwrap();
        for _ in 0..50 {
            sim.tick(0.1);
        }
        assert_eq!(sim.commands[0], command);
        assert_ne!(sim.commands[1], HelmCommand::hold(0.0));
    }
}

// ── Full runs ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn cutoff_ends_the_race_with_dns() {
        // Cutoff after 60 s on a 400-unit course; the boats reach along
        // below the line and never start.
        let config = SimConfig { race: RaceConfig { prestart_secs: 5.0, ..RaceConfig::default() }, ..test_config() };
        let boats = vec![
            BoatSpec::new("a", Vec2::new(0.0, 200.0), FRAC_PI_2),
            BoatSpec::new("b", Vec2::new(0.0, 300.0), FRAC_PI_2),
        ];
        let mut sim = SimBuilder::new(config, Course::standard(0.0, 400.0), boats, HoldCourse)
            .observer(Recorder::default())
            .build()
            .unwrap();

        let ticks = sim.run_until_over(0.1, 10_000);
        assert!(sim.is_over());
        assert!(ticks < 10_000);
        assert_eq!(sim.observer.ended, 1);
        assert_eq!(sim.observer.count(RaceEventKind::Cutoff), 1);

        let results = sim.results();
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|s| s.status == Some(FinishStatus::Dns)));
        assert_eq!(sim.observer.standings, results);

        // Further ticks keep the boats moving but never end the race twice.
        sim.tick(0.1);
        assert_eq!(sim.observer.ended, 1);
    }

    #[test]
    fn bots_sail_the_whole_course() {
        let mut sim = SimBuilder::new(test_config(), standard(), line_up(4), BotSkipper::default())
            .observer(Recorder::default())
            .build()
            .unwrap();
        sim.run_until_over(0.1, 12_000);
        assert!(sim.is_over());
        assert_eq!(sim.observer.ended, 1);
        assert_eq!(sim.observer.count(RaceEventKind::Finish), 4);

        let total_legs = sim.race().config.total_legs;
        let results = sim.results();
        for s in &results {
            assert_eq!(s.status, Some(FinishStatus::Finished), "{:?}", s.boat);
            // The start counts as a leg.
            assert_eq!(s.legs_completed, total_legs + 1, "{:?}", s.boat);
            assert!(s.time.is_some());
        }
        for pair in results.windows(2) {
            assert!(pair[0].time <= pair[1].time);
            assert_eq!(pair[0].position + 1, pair[1].position);
        }
    }

    #[test]
    fn same_seed_same_race() {
        let run = || {
            let mut sim =
                SimBuilder::new(test_config(), standard(), line_up(4), BotSkipper::default()).build().unwrap();
            for _ in 0..400 {
                sim.tick(0.1);
            }
            sim.fleet.positions()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn bots_stay_finite_through_the_start() {
        let config = SimConfig { wind: WindConfig::default(), ..test_config() };
        let mut sim = SimBuilder::new(config, standard(), line_up(6), BotSkipper::default()).build().unwrap();
        for _ in 0..900 {
            sim.tick(0.1);
        }
        for boat in sim.fleet.ids() {
            let kin = sim.fleet.kinematics(boat);
            assert!(kin.position.x.is_finite() && kin.position.y.is_finite(), "{boat}");
            assert!(kin.heading.is_finite() && kin.speed.is_finite(), "{boat}");
        }
        assert_eq!(sim.race().phase(), RacePhase::Racing);
    }
}
