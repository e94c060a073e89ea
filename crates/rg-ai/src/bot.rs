//! `BotSkipper` — the full decision pipeline.

use rg_core::geom::normalize_angle;
use rg_core::{BoatId, BoatRng};
use rg_physics::HelmCommand;
use rg_race::RacePhase;
use tracing::{debug, trace};

use crate::memory::{
    CLEARANCE_SECS, WIGGLE_ANGLE, WIGGLE_AFTER, WIGGLE_RANDOM_AFTER, WIGGLE_RETRY_SLOW_FOR, WIGGLE_SECS,
};
use crate::navigation::navigation_target;
use crate::start::start_command;
use crate::strategy::strategic_heading;
use crate::{
    AiMemory, AvoidanceWeights, HelmContext, MarkEscape, Skipper, StartCommand, Unstick, assess,
    choose_offset,
};

/// Wiggle away from anything this close; otherwise pick a side at random.
const WIGGLE_CLEARANCE: f64 = 100.0;
/// Turn-rate multiplier while wiggling.
const WIGGLE_TURN_BOOST: f64 = 5.0;
/// A mark contact this recent (seconds) still counts.
const MARK_CONTACT_FRESH: f64 = 0.25;
/// Pinned on a mark below this speed, knots.
const ESCAPE_SPEED: f64 = 2.0;
const ESCAPE_SECS: f64 = 2.0;

/// Speed floor while wiggling: the longer stuck, the harder the push.
fn wiggle_floor(slow_for: f64) -> f64 {
    match slow_for {
        s if s > 30.0 => 3.0,
        s if s > 20.0 => 2.0,
        s if s > 10.0 => 1.2,
        _ => 0.6,
    }
}

/// The autonomous competitor.
#[derive(Clone, Debug, Default)]
pub struct BotSkipper {
    pub weights: AvoidanceWeights,
}

impl BotSkipper {
    pub fn new(weights: AvoidanceWeights) -> Self {
        Self { weights }
    }

    /// One decision, `elapsed` seconds after the previous one.
    pub fn plan(
        &self,
        boat:    BoatId,
        ctx:     &HelmContext<'_>,
        memory:  &mut AiMemory,
        rng:     &mut BoatRng,
        elapsed: f64,
    ) -> HelmCommand {
        let kin = *ctx.fleet.kinematics(boat);
        let wind = ctx.wind.direction();

        memory.cool_down(elapsed);
        memory.risk.update(assess(boat, ctx.view, ctx.table, ctx.rules), elapsed);

        let racing = ctx.race.clock.is_racing();
        let start_leg = (racing && ctx.race.leg(boat) == Some(0)).then(|| ctx.now());
        if let Some(before) = memory.watch_liveness(kin.speed, racing, start_leg, elapsed) {
            debug!(%boat, from = ?before, to = ?memory.liveness, slow_for = memory.slow_for, "liveness");
        }

        // ── Unstick, or navigate ──────────────────────────────────────────
        if memory.slow_for > WIGGLE_AFTER && !memory.unstick.is_wiggling() {
            let side = self.wiggle_side(boat, ctx, memory.slow_for, rng);
            debug!(%boat, side, slow_for = memory.slow_for, "wiggling free");
            memory.unstick = Unstick::Wiggling { side, remaining: WIGGLE_SECS };
        }

        let mut speed_limit = 1.0;
        let unstick = memory.unstick;
        let mut heading = match unstick {
            Unstick::Wiggling { side, remaining } => {
                let heading = normalize_angle(wind + side * WIGGLE_ANGLE);
                let remaining = remaining - elapsed;
                memory.unstick = if remaining > 0.0 {
                    Unstick::Wiggling { side, remaining }
                } else if memory.slow_for > WIGGLE_RETRY_SLOW_FOR {
                    Unstick::Wiggling { side: -side, remaining: WIGGLE_SECS }
                } else {
                    memory.slow_for = 0.0;
                    Unstick::Clearance { heading, remaining: CLEARANCE_SECS }
                };
                heading
            }
            Unstick::Clearance { heading, remaining } => {
                let remaining = remaining - elapsed;
                memory.unstick =
                    if remaining > 0.0 { Unstick::Clearance { heading, remaining } } else { Unstick::Idle };
                heading
            }
            Unstick::Idle => {
                let goal = navigation_target(boat, ctx, memory);
                let waypoint = ctx.planner.steer(&mut memory.route, kin.position, goal, elapsed, rng);
                strategic_heading(boat, waypoint, ctx, memory)
            }
        };

        // ── Prestart ──────────────────────────────────────────────────────
        if ctx.race.phase() == RacePhase::Prestart {
            match start_command(boat, ctx, &memory.start) {
                StartCommand::Steer { heading: h, speed_limit: s } => {
                    heading = h;
                    speed_limit = s;
                }
                StartCommand::SailTo { target, speed_limit: s } => {
                    heading = strategic_heading(boat, target, ctx, memory);
                    speed_limit = s;
                }
            }
        }

        // ── Avoidance ─────────────────────────────────────────────────────
        if !memory.unstick.is_wiggling() {
            let offset = choose_offset(boat, heading, ctx, memory, &self.weights);
            if offset != 0.0 {
                trace!(%boat, offset, risk = ?memory.risk.level, "avoiding");
            }
            heading = normalize_angle(heading + offset);
        }

        // ── Mark escape ───────────────────────────────────────────────────
        if let Some(contact) = ctx.collisions.mark_contact(boat) {
            let fresh = ctx.now() - contact.time <= MARK_CONTACT_FRESH;
            if fresh && kin.speed < ESCAPE_SPEED {
                memory.escape = Some(MarkEscape { heading: (-contact.normal).heading(), remaining: ESCAPE_SECS });
            }
        }
        if let Some(escape) = memory.escape.as_mut() {
            escape.remaining -= elapsed;
            heading = escape.heading;
            speed_limit = 1.0;
            if escape.remaining <= 0.0 {
                memory.escape = None;
            }
        }

        let command = HelmCommand::hold(heading).with_speed_limit(speed_limit);
        if memory.unstick.is_wiggling() {
            command.with_min_speed(wiggle_floor(memory.slow_for)).with_turn_boost(WIGGLE_TURN_BOOST)
        } else {
            command
        }
    }

    /// Side of the wind (±1) to wiggle toward: away from the nearest boat or
    /// mark if one is close, at random otherwise.
    fn wiggle_side(&self, boat: BoatId, ctx: &HelmContext<'_>, slow_for: f64, rng: &mut BoatRng) -> f64 {
        if slow_for > WIGGLE_RANDOM_AFTER {
            return rng.sign();
        }
        let kin = ctx.fleet.kinematics(boat);
        let here = kin.position;
        let nearest = ctx
            .fleet
            .ids()
            .filter(|&o| o != boat)
            .map(|o| ctx.fleet.position(o))
            .chain(ctx.course.marks.iter().map(|m| m.position))
            .min_by(|a, b| a.distance_sq(here).total_cmp(&b.distance_sq(here)));
        match nearest {
            Some(p) if p.distance(here) < WIGGLE_CLEARANCE => {
                let relative = normalize_angle((p - here).heading() - kin.heading);
                if relative > 0.0 { -1.0 } else { 1.0 }
            }
            _ => rng.sign(),
        }
    }
}

impl Skipper for BotSkipper {
    fn decide(
        &self,
        boat:   BoatId,
        ctx:    &HelmContext<'_>,
        memory: &mut AiMemory,
        rng:    &mut BoatRng,
        dt:     f64,
    ) -> Option<HelmCommand> {
        let elapsed = memory.tick(dt)?;
        Some(self.plan(boat, ctx, memory, rng, elapsed))
    }
}
