//! The `Sim` struct and its tick loop.

use rg_ai::{AiLiveness, AiMemory, HelmContext, RoutePlanner, Skipper};
use rg_collision::CollisionSystem;
use rg_core::{BoatId, RaceEvent, SimClock, SimRng};
use rg_course::Course;
use rg_fleet::{BoatRngs, Fleet};
use rg_physics::{HelmCommand, PhysicsEngine, StepReport};
use rg_race::{RacePhase, RaceStateMachine, Standing};
use rg_rules::{InteractionTable, RaceView, RightOfWayEngine};
use rg_wind::WindField;
use tracing::{debug, info, trace};

use crate::{RaceObserver, SimConfig, SimError, SimResult};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The race simulation.
///
/// `Sim<S, O>` holds all simulation state and advances it one variable-length
/// step per [`tick`][Sim::tick]:
///
/// 1. **Clock & wind**: the race clock (gun, cutoff) and the wind field move.
/// 2. **Decide** (optionally parallel with the `parallel` feature): the
///    skipper runs for every autonomous boat against one shared snapshot and
///    may replace that boat's standing command.
/// 3. **Physics** (sequential, ascending `BoatId`): every boat steps under
///    its last command.
/// 4. **Race**: leg, zone, OCS and penalty state from the new positions.
/// 5. **Collisions**, then **rules** bookkeeping.
/// 6. **Events**: everything emitted this tick goes to the observer.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<S: Skipper, O: RaceObserver> {
    pub config: SimConfig,

    /// Step counter and simulated seconds, prestart included.
    pub clock: SimClock,

    pub course: Course,

    /// Boat state (SoA arrays).
    pub fleet: Fleet,

    /// Per-boat deterministic RNGs, separated for the split-borrow pattern.
    pub rngs: BoatRngs,

    pub wind: WindField,
    pub wind_rng: SimRng,

    pub physics: PhysicsEngine,
    pub race: RaceStateMachine,
    pub rules: RightOfWayEngine,
    pub table: InteractionTable,
    pub collisions: CollisionSystem,

    /// Obstacle routing shared by every autonomous boat.
    pub planner: RoutePlanner,

    /// Steers every autonomous boat.
    pub skipper: S,
    pub observer: O,

    /// Per-boat skipper memory, indexed by `BoatId` (unused for external
    /// boats).
    pub memory: Vec<AiMemory>,

    /// Standing helm command per boat, applied every tick until replaced.
    pub commands: Vec<HelmCommand>,

    /// Boats pressed against the boundary after the previous step.
    pub(crate) on_boundary: Vec<bool>,
    /// Events emitted during the current tick.
    pub(crate) events: Vec<RaceEvent>,
    /// `on_race_end` has fired.
    pub(crate) ended: bool,
}

impl<S: Skipper, O: RaceObserver> Sim<S, O> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Advance the simulation by `dt` seconds (clamped to `config.max_dt`).
    ///
    /// Safe to call several times per frame.  Non-positive or non-finite
    /// steps are ignored.
    pub fn tick(&mut self, dt: f64) {
        if !(dt > 0.0 && dt.is_finite()) {
            debug!(dt, "ignored step");
            return;
        }
        let dt = if dt > self.config.max_dt {
            debug!(dt, max = self.config.max_dt, "clamped dt");
            self.config.max_dt
        } else {
            dt
        };

        let tick = self.clock.current_tick;
        self.observer.on_tick_start(tick);

        // ── Clock & wind ──────────────────────────────────────────────────
        self.race.advance_clock(dt, &mut self.events);
        self.wind.advance(dt, &mut self.wind_rng);

        // ── Decide ────────────────────────────────────────────────────────
        let decisions = self.decide(dt);
        for (boat, command) in decisions {
            if let Some(command) = command {
                self.commands[boat.index()] = command;
            }
        }

        // ── Physics ───────────────────────────────────────────────────────
        let reports = self.step_boats(dt);

        // ── Race ──────────────────────────────────────────────────────────
        let time = self.race.now();
        for (boat, report) in self.fleet.ids().zip(&reports) {
            let kin = &self.fleet.kinematics[boat.index()];
            self.race.update_boat(boat, &self.course, kin, report.signed_twa, dt, &mut self.events);

            let was = std::mem::replace(&mut self.on_boundary[boat.index()], report.hit_boundary);
            let racing = self.race.phase() == RacePhase::Racing && !self.race.state(boat).is_finished();
            if report.hit_boundary && !was && racing {
                debug!(%boat, time, "boundary contact");
                self.events.push(RaceEvent::BoundaryCollision { boat, time });
            }
        }

        // ── Collisions & rules ────────────────────────────────────────────
        for boat in self.fleet.ids() {
            let forcing = self.fleet.is_autonomous(boat) && self.memory[boat.index()].liveness == AiLiveness::Force;
            self.collisions.set_forcing(boat, forcing);
        }
        let view = RaceView::capture(&self.fleet, &self.race, &self.course, self.wind.direction());
        let contacts = self.collisions.resolve(
            &mut self.fleet,
            &self.course,
            &mut self.race,
            &self.rules,
            &self.table,
            &view,
            &mut self.events,
        );
        if contacts > 0 {
            trace!(%tick, contacts, "contacts resolved");
        }
        let view = RaceView::capture(&self.fleet, &self.race, &self.course, self.wind.direction());
        self.rules.update(&mut self.table, &view);

        // ── Events ────────────────────────────────────────────────────────
        for event in self.events.drain(..) {
            self.observer.on_event(&event);
        }
        self.observer.on_tick_end(tick, self.race.now());
        if self.race.is_over() && !self.ended {
            self.ended = true;
            let standings = self.race.standings();
            info!(time = self.race.now(), %tick, "race over");
            self.observer.on_race_end(&standings);
        }

        self.clock.advance(dt);
    }

    /// Tick with `dt` until the race is over or `max_ticks` steps have run.
    /// Returns the number of steps taken.
    pub fn run_until_over(&mut self, dt: f64, max_ticks: u64) -> u64 {
        let mut ticks = 0;
        while !self.race.is_over() && ticks < max_ticks {
            self.tick(dt);
            ticks += 1;
        }
        ticks
    }

    /// Set the standing command of `boat`, normally the externally steered
    /// one.  An autonomous boat's skipper overrides it at its next decision.
    pub fn set_command(&mut self, boat: BoatId, command: HelmCommand) -> SimResult<()> {
        let slot = self.commands.get_mut(boat.index()).ok_or(SimError::UnknownBoat(boat))?;
        *slot = command;
        Ok(())
    }

    #[inline]
    pub fn race(&self) -> &RaceStateMachine {
        &self.race
    }

    /// Standings as of now; final once the race is over.
    pub fn results(&self) -> Vec<Standing> {
        self.race.standings()
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.race.is_over()
    }

    // ── Phases ────────────────────────────────────────────────────────────

    /// Run the skipper for every autonomous boat.  Returns one entry per
    /// autonomous boat in ascending id order; `None` keeps the last command.
    ///
    /// With the `parallel` Cargo feature the calls run on Rayon's thread
    /// pool.  Each call writes only its own boat's memory and RNG.
    fn decide(&mut self, dt: f64) -> Vec<(BoatId, Option<HelmCommand>)> {
        let fleet = &self.fleet;
        let view = RaceView::capture(fleet, &self.race, &self.course, self.wind.direction());
        let ctx = HelmContext::new(
            fleet,
            &self.course,
            &self.wind,
            self.physics.integrator.current,
            &self.physics.integrator.polar,
            &self.race,
            &view,
            &self.table,
            &self.rules,
            &self.collisions,
            &self.planner,
        );
        let skipper = &self.skipper;
        let autonomous: Vec<BoatId> = fleet.ids().filter(|&b| fleet.is_autonomous(b)).collect();

        #[cfg(not(feature = "parallel"))]
        {
            let rngs = &mut self.rngs;
            let memory = &mut self.memory;
            autonomous
                .iter()
                .map(|&boat| {
                    let decision = skipper.decide(boat, &ctx, &mut memory[boat.index()], rngs.get_mut(boat), dt);
                    (boat, decision)
                })
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            // Disjoint &mut refs in the same ascending id order as `autonomous`.
            let rng_refs = self.rngs.get_many_mut(&autonomous);
            let memory_refs: Vec<&mut AiMemory> = self
                .memory
                .iter_mut()
                .enumerate()
                .filter(|(i, _)| fleet.is_autonomous(BoatId(*i as u16)))
                .map(|(_, m)| m)
                .collect();

            autonomous
                .par_iter()
                .zip(rng_refs.into_par_iter())
                .zip(memory_refs.into_par_iter())
                .map(|((&boat, rng), memory)| (boat, skipper.decide(boat, &ctx, memory, rng, dt)))
                .collect()
        }
    }

    /// Refresh disturbed air, then step every boat in ascending id order.
    fn step_boats(&mut self, dt: f64) -> Vec<StepReport> {
        self.physics.refresh_disturbed_air(&self.fleet, &self.wind);
        let mut reports = Vec::with_capacity(self.fleet.count);
        for boat in self.fleet.ids() {
            let penalized = self.race.state(boat).penalty.active;
            let report = self.physics.step(
                boat,
                &mut self.fleet,
                &self.commands[boat.index()],
                penalized,
                &self.wind,
                &self.course.boundary,
                dt,
            );
            reports.push(report);
        }
        reports
    }
}
