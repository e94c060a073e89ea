//! Fluent builder for constructing a [`Sim`].

use rg_ai::{AiMemory, RoutePlanner, Skipper};
use rg_collision::{CollisionConfig, CollisionSystem};
use rg_core::{SimClock, SimRng};
use rg_course::Course;
use rg_fleet::{BoatSpec, FleetBuilder};
use rg_physics::{HelmCommand, PhysicsEngine, PhysicsIntegrator, PolarModel};
use rg_race::RaceStateMachine;
use rg_rules::{InteractionTable, RightOfWayEngine, RulesConfig};
use rg_wind::WindField;
use tracing::info;

use crate::{NoopObserver, RaceObserver, Sim, SimConfig, SimResult};

/// Stream offset of the wind RNG under the race seed.
const WIND_STREAM: u64 = 1;

/// Fluent builder for [`Sim<S, O>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — seed, `max_dt`, race, wind and current settings
/// - [`Course`] — from `Course::standard` or a [`rg_course::CourseBuilder`]
/// - the boats, as [`BoatSpec`]s
/// - `S: Skipper` — steers every autonomous boat
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                    |
/// |-------------------|----------------------------|
/// | `.polar(p)`       | `PolarModel::j111()`       |
/// | `.rules(c)`       | `RulesConfig::default()`   |
/// | `.collisions(c)`  | `CollisionConfig::default()` |
/// | `.observer(o)`    | `NoopObserver`             |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, course, boats, BotSkipper::default())
///     .observer(EventLog::default())
///     .build()?;
/// sim.run_until_over(0.05, 50_000);
/// ```
pub struct SimBuilder<S: Skipper, O: RaceObserver = NoopObserver> {
    config:     SimConfig,
    course:     Course,
    boats:      Vec<BoatSpec>,
    skipper:    S,
    observer:   O,
    polar:      Option<PolarModel>,
    rules:      RulesConfig,
    collisions: CollisionConfig,
}

impl<S: Skipper> SimBuilder<S, NoopObserver> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, course: Course, boats: Vec<BoatSpec>, skipper: S) -> Self {
        Self {
            config,
            course,
            boats,
            skipper,
            observer:   NoopObserver,
            polar:      None,
            rules:      RulesConfig::default(),
            collisions: CollisionConfig::default(),
        }
    }
}

impl<S: Skipper, O: RaceObserver> SimBuilder<S, O> {
    /// Boat performance table.
    pub fn polar(mut self, polar: PolarModel) -> Self {
        self.polar = Some(polar);
        self
    }

    pub fn rules(mut self, rules: RulesConfig) -> Self {
        self.rules = rules;
        self
    }

    pub fn collisions(mut self, collisions: CollisionConfig) -> Self {
        self.collisions = collisions;
        self
    }

    /// Replace the observer that receives events and progress callbacks.
    pub fn observer<O2: RaceObserver>(self, observer: O2) -> SimBuilder<S, O2> {
        SimBuilder {
            config:     self.config,
            course:     self.course,
            boats:      self.boats,
            skipper:    self.skipper,
            observer,
            polar:      self.polar,
            rules:      self.rules,
            collisions: self.collisions,
        }
    }

    /// Validate inputs, build every subsystem and return a ready-to-run
    /// [`Sim`] at the start of the prestart countdown.
    pub fn build(self) -> SimResult<Sim<S, O>> {
        let config = self.config;
        config.validate()?;

        let (fleet, mut rngs) = FleetBuilder::new(config.seed).boats(self.boats).build()?;
        let race = RaceStateMachine::new(config.race.clone(), &self.course, fleet.count)?;

        let mut wind_rng = SimRng::new(config.seed).child(WIND_STREAM);
        let wind = WindField::new(config.wind.clone(), &self.course, &mut wind_rng)?;

        let polar = self.polar.unwrap_or_else(PolarModel::j111);
        let physics = PhysicsEngine::new(PhysicsIntegrator::new(polar, config.current), fleet.count);

        // Drawn in id order so the streams do not depend on the helm mix.
        let memory = fleet.ids().map(|b| AiMemory::new(rngs.get_mut(b))).collect();
        let commands = fleet.ids().map(|b| HelmCommand::hold(fleet.heading(b))).collect();

        info!(
            seed = config.seed,
            boats = fleet.count,
            obstacles = self.course.obstacles.len(),
            "sim built",
        );

        Ok(Sim {
            clock:       SimClock::new(),
            planner:     RoutePlanner::new(&self.course.obstacles),
            table:       InteractionTable::new(fleet.count),
            collisions:  CollisionSystem::new(self.collisions, fleet.count),
            rules:       RightOfWayEngine::new(self.rules),
            on_boundary: vec![false; fleet.count],
            events:      Vec::new(),
            ended:       false,
            skipper:     self.skipper,
            observer:    self.observer,
            course:      self.course,
            config,
            fleet,
            rngs,
            wind,
            wind_rng,
            physics,
            race,
            memory,
            commands,
        })
    }
}
