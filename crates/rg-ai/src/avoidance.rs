//! Reactive collision avoidance.
//!
//! A discrete search around the desired heading: each candidate offset is
//! projected four seconds ahead at the boat's current speed and scored with
//! the terms in [`crate::cost`].  The cheapest candidate wins; ties keep the
//! earlier candidate, so an unthreatened boat always holds offset 0.

use rg_core::geom::{forward, normalize_angle};
use rg_core::units::knots_to_units_per_sec;
use rg_core::{BoatId, Vec2};
use rg_race::RacePhase;

use crate::cost::{
    BOAT_PROXIMITY_RANGE, boat_collision_cost, boat_proximity_cost, boundary_cost, deviation_cost,
    mark_cost, obstacle_cost, positioning_cost, stand_on_cost,
};
use crate::{AiLiveness, AiMemory, AvoidanceWeights, HelmContext, RiskLatch, RiskLevel};

/// Offsets from the desired heading, radians, in order of preference.
pub const CANDIDATE_OFFSETS: [f64; 15] =
    [0.0, 0.1, -0.1, 0.2, -0.2, 0.4, -0.4, 0.6, -0.6, 0.8, -0.8, 1.2, -1.2, 1.6, -1.6];
pub const LOOKAHEAD_SECS: f64 = 4.0;
/// Points checked along each projected path.
pub const PATH_SAMPLES: u32 = 5;
/// Floor on the projection speed, world units per second.
const MIN_PROJECTION_SPEED: f64 = 2.0;

/// Radius of the safety bubble around other boats.
pub fn safe_distance(liveness: AiLiveness, risk: &RiskLatch, start_leg: bool) -> f64 {
    match liveness {
        AiLiveness::Force => 20.0,
        AiLiveness::Recovery => 50.0,
        // Give-way boats keep a wide berth to make their intent obvious.
        AiLiveness::Normal if risk.giving_way() => 150.0,
        AiLiveness::Normal if start_leg => 60.0,
        AiLiveness::Normal => 80.0,
    }
}

/// Another boat, as the search sees it.
struct Traffic {
    position: Vec2,
    velocity: Vec2,
    heading: f64,
    /// We must keep clear of this boat.
    has_right_of_way: bool,
}

/// Best offset from `desired` for `boat`; one of [`CANDIDATE_OFFSETS`].
pub fn choose_offset(
    boat:    BoatId,
    desired: f64,
    ctx:     &HelmContext<'_>,
    memory:  &AiMemory,
    weights: &AvoidanceWeights,
) -> f64 {
    let kin = ctx.fleet.kinematics(boat);
    let speed = knots_to_units_per_sec(kin.speed).max(MIN_PROJECTION_SPEED);
    let start_leg = ctx.race.phase() == RacePhase::Prestart || ctx.race.leg(boat) == Some(0);
    let safe = safe_distance(memory.liveness, &memory.risk, start_leg);

    let traffic: Vec<Traffic> = ctx
        .view
        .boats
        .iter()
        .filter(|o| o.id != boat && !o.is_finished())
        .map(|o| Traffic {
            position: o.position,
            velocity: o.velocity,
            heading: o.heading,
            has_right_of_way: ctx.rules.evaluate(boat, o.id, ctx.table, ctx.view).row_boat == Some(o.id),
        })
        .collect();

    let probe = Probe {
        origin: kin.position,
        speed,
        safe,
        liveness: memory.liveness,
        risk: memory.risk,
        traffic: &traffic,
        weights,
    };

    let mut best = (f64::INFINITY, 0.0);
    for offset in CANDIDATE_OFFSETS {
        let cost = probe.cost(offset, desired, ctx);
        if cost < best.0 {
            best = (cost, offset);
        }
    }
    best.1
}

/// Everything the per-candidate scoring needs.
struct Probe<'p> {
    origin: Vec2,
    speed: f64,
    safe: f64,
    liveness: AiLiveness,
    risk: RiskLatch,
    traffic: &'p [Traffic],
    weights: &'p AvoidanceWeights,
}

impl Probe<'_> {
    fn cost(&self, offset: f64, desired: f64, ctx: &HelmContext<'_>) -> f64 {
        let w = self.weights;
        let velocity = forward(normalize_angle(desired + offset)) * self.speed;
        let future = self.origin + velocity * LOOKAHEAD_SECS;

        let mut cost = deviation_cost(offset, w);
        if self.risk.standing_on() {
            cost += stand_on_cost(offset, w);
        }

        let mut proximity = 0.0;
        let mut boat_contact = false;
        let mut static_contact = false;
        let mut violation = false;

        // ── Boats ─────────────────────────────────────────────────────────
        for other in self.traffic {
            if self.risk.giving_way() {
                let theirs = other.position + other.velocity * LOOKAHEAD_SECS;
                cost += positioning_cost(future, theirs, other.heading, w);
            }
            for i in 1..=PATH_SAMPLES {
                let t = LOOKAHEAD_SECS * f64::from(i) / f64::from(PATH_SAMPLES);
                let d2 = (self.origin + velocity * t).distance_sq(other.position + other.velocity * t);
                if d2 < self.safe * self.safe {
                    boat_contact = true;
                    cost += boat_collision_cost(d2, w);
                    if self.risk.level == RiskLevel::Imminent {
                        cost += w.imminent;
                    } else if other.has_right_of_way {
                        violation = true;
                    }
                } else if d2 < BOAT_PROXIMITY_RANGE * BOAT_PROXIMITY_RANGE
                    && self.liveness == AiLiveness::Normal
                {
                    proximity += boat_proximity_cost(d2, w);
                }
            }
        }

        // ── Fixed hazards ─────────────────────────────────────────────────
        for mark in &ctx.course.marks {
            let (c, hit) = mark_cost(mark.position, self.origin, future, self.liveness, w);
            cost += c;
            static_contact |= hit;
        }
        let (c, hit) = boundary_cost(&ctx.course.boundary, self.origin, future, w);
        proximity += c;
        static_contact |= hit;
        for obstacle in &ctx.course.obstacles {
            let (c, hit) = obstacle_cost(obstacle, self.origin, future, w);
            cost += c;
            static_contact |= hit;
        }

        if boat_contact {
            cost += w.boat_contact.pick(self.liveness);
        }
        if static_contact {
            cost += w.static_contact.pick(self.liveness);
        }
        if violation {
            cost += w.rule_violation.pick(self.liveness);
        }
        cost + proximity
    }
}
