//! Where a boat wants to go on its current leg.

use rg_core::geom::{downwind, forward};
use rg_core::{BoatId, Vec2};

use crate::{AiLiveness, AiMemory, HelmContext};

/// How far upwind of its line point a boat aims on the start leg.
const START_OVERSHOOT: f64 = 150.0;
const FORCED_START_OVERSHOOT: f64 = 300.0;
/// How far below the line a boat that is over early aims.
const RECROSS_DEPTH: f64 = 150.0;
const RECOVERY_RECROSS_DEPTH: f64 = 250.0;
/// A boat this far past a gate it has not rounded has missed it.
const MISSED_GATE_DISTANCE: f64 = 50.0;
/// ... and comes back to a point this far short of the gate.
const MISSED_GATE_RETURN: f64 = 150.0;
/// Rounding waypoint distance outside the mark.
const ROUNDING_OFFSET: f64 = 90.0;
/// Finished boats clear out past the boundary by this much.
const CLEAR_OUT_DISTANCE: f64 = 500.0;

/// Point `boat` is ultimately heading for, before route planning.
pub fn navigation_target(boat: BoatId, ctx: &HelmContext<'_>, memory: &AiMemory) -> Vec2 {
    let position = ctx.fleet.position(boat);
    let course = ctx.course;

    let Some(leg) = ctx.race.leg(boat) else {
        let b = &course.boundary;
        let out = (position - b.center).normalized();
        return b.center + out * (b.radius + CLEAR_OUT_DISTANCE);
    };

    let spec = course.gate_for_leg(leg);
    let (m1, m2) = course.gate_points(spec.gate);
    let center = m1.midpoint(m2);
    let normal = course.gate_normal(spec.gate).normalized();
    let wind = ctx.wind.direction();
    let state = ctx.race.state(boat);

    let mut target = if leg == 0 {
        let fraction = match memory.liveness {
            AiLiveness::Normal => memory.start.line_fraction,
            _ => 0.5,
        };
        let above_line = (position - m1).dot(normal) > 0.0;
        if state.ocs || above_line {
            let depth = match memory.liveness {
                AiLiveness::Normal => RECROSS_DEPTH,
                _ => RECOVERY_RECROSS_DEPTH,
            };
            center + downwind(wind) * depth
        } else {
            let overshoot = match memory.liveness {
                AiLiveness::Force => FORCED_START_OVERSHOOT,
                _ => START_OVERSHOOT,
            };
            m1.lerp(m2, fraction) + forward(wind) * overshoot
        }
    } else {
        let past = (position - m1).dot(normal) * spec.direction;
        if past > MISSED_GATE_DISTANCE {
            center - normal * (MISSED_GATE_RETURN * spec.direction)
        } else {
            center
        }
    };

    if state.rounding {
        let mark = if position.distance_sq(m1) < position.distance_sq(m2) { m1 } else { m2 };
        let outward = mark - center;
        if outward.length_sq() > 0.0 {
            target = mark + outward.normalized() * ROUNDING_OFFSET;
        }
    }
    target
}
