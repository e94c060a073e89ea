//! How to sail toward a target: straight at it when it can be fetched,
//! otherwise on the better tack (or gybe).
//!
//! Tacks are compared by a short look-ahead: five one-second steps of the
//! boat's own acceleration toward its polar target, the resulting course and
//! speed over ground projected onto the bearing, plus a bonus for the
//! pressure waiting at the end of the run.

use std::f64::consts::{FRAC_PI_2, PI};

use rg_core::geom::{forward, normalize_angle};
use rg_core::units::knots_to_units_per_sec;
use rg_core::{BoatId, Vec2};
use rg_fleet::{BoatStats, Kinematics, Tack};
use rg_physics::Current;
use rg_physics::integrator::SPEED_ALPHA;
use rg_physics::planing::MIN_TWS as PLANING_MIN_TWS;
use rg_wind::WindSample;

use crate::{AiLiveness, AiMemory, HelmContext};

/// Bearings closer to the wind than this are beats.
pub const UPWIND_LIMIT: f64 = PI / 3.5;
/// Bearings further off the wind than this are runs.
pub const DOWNWIND_LIMIT: f64 = 0.7 * PI;
pub const CLOSE_HAULED: f64 = 45.0 * PI / 180.0;
const RUNNING: f64 = 150.0 * PI / 180.0;
/// Planing conditions reward sailing higher downwind.
const PLANING_RUNNING: f64 = 140.0 * PI / 180.0;

/// Recovery and force sail straight at anything freer than this ...
const PINCH_LIMIT: f64 = 0.7;
/// ... and otherwise a little below close-hauled.
const RECOVERY_WIND_ANGLE: f64 = 0.75;

/// Knots of current worth correcting for.
const MIN_CURRENT: f64 = 0.1;
/// Floor on the water speed used for crabbing, knots.
const MIN_CRAB_SPEED: f64 = 2.0;
/// Floor on the water speed used for the layline check, knots.
const MIN_LAYLINE_SPEED: f64 = 4.0;
/// Beyond this the current cannot be held off.
const MAX_CRAB_RATIO: f64 = 0.9;

const SCORE_STEPS: u32 = 5;
/// Score per knot of extra pressure at the end of the look-ahead.
const PRESSURE_WEIGHT: f64 = 0.8;
/// Score the current tack is allowed to lose before switching.
const TACK_HYSTERESIS: f64 = 0.4;
/// Course over ground this close to the bearing means "on the layline".
const LAYLINE_TOLERANCE: f64 = 0.05;
pub const LAYLINE_COOLDOWN: f64 = 10.0;
pub const TACK_COOLDOWN: f64 = 5.0;

/// Heading on `tack` sailing `twa` off `wind`.
#[inline]
pub fn tack_heading(wind: f64, twa: f64, tack: Tack) -> f64 {
    normalize_angle(wind - tack.sign() * twa)
}

/// Heading through the water that makes good `bearing` over the ground.
pub fn crab_heading(bearing: f64, water_speed: f64, current: Current) -> f64 {
    if current.speed <= MIN_CURRENT {
        return bearing;
    }
    let cross = normalize_angle(current.direction - bearing).sin() * current.speed;
    let ratio = -cross / water_speed.max(MIN_CRAB_SPEED);
    if ratio.abs() < MAX_CRAB_RATIO { normalize_angle(bearing + ratio.asin()) } else { bearing }
}

/// Course and speed (knots) over the ground.
pub fn over_ground(heading: f64, water_speed: f64, current: Current) -> (f64, f64) {
    if current.speed <= MIN_CURRENT {
        return (heading, water_speed);
    }
    let v = forward(heading) * water_speed + forward(current.direction) * current.speed;
    (v.heading(), v.length())
}

/// Heading to steer for `target`.
pub fn strategic_heading(
    boat:   BoatId,
    target: Vec2,
    ctx:    &HelmContext<'_>,
    memory: &mut AiMemory,
) -> f64 {
    let kin = ctx.fleet.kinematics(boat);
    let local = ctx.wind.sample_at(kin.position);
    let wind = local.direction;
    let bearing = (target - kin.position).heading();

    if memory.liveness != AiLiveness::Normal {
        let twa = normalize_angle(bearing - wind);
        if twa.abs() > PINCH_LIMIT {
            return bearing;
        }
        let side = if twa > 0.0 { 1.0 } else { -1.0 };
        return normalize_angle(wind + side * RECOVERY_WIND_ANGLE);
    }

    let course = crab_heading(bearing, kin.speed, ctx.current);
    let twa = normalize_angle(course - wind).abs();

    let (optimal, fetches) = if twa < UPWIND_LIMIT {
        (CLOSE_HAULED, twa > CLOSE_HAULED)
    } else if twa > DOWNWIND_LIMIT {
        let running = if ctx.wind.speed() > PLANING_MIN_TWS { PLANING_RUNNING } else { RUNNING };
        (running, twa < running)
    } else {
        return course;
    };
    if fetches {
        return course;
    }

    let stats = ctx.fleet.stats(boat);
    let score = |tack| tack_score(tack_heading(wind, optimal, tack), bearing, kin, stats, local, ctx);
    let (starboard, port) = (score(Tack::Starboard), score(Tack::Port));

    let on = Tack::for_wind_angle(normalize_angle(kin.heading - wind));
    let preferred = match on {
        Tack::Starboard if starboard + TACK_HYSTERESIS > port => Tack::Starboard,
        Tack::Port if port + TACK_HYSTERESIS > starboard => Tack::Port,
        _ if starboard > port => Tack::Starboard,
        _ => Tack::Port,
    };

    // Laylines: once the other tack fetches, take it.
    let other = preferred.opposite();
    let other_heading = tack_heading(wind, optimal, other);
    let (other_cog, _) = over_ground(other_heading, kin.speed.max(MIN_LAYLINE_SPEED), ctx.current);
    if normalize_angle(other_cog - bearing).abs() < LAYLINE_TOLERANCE && memory.layline_cooldown <= 0.0 {
        memory.layline_cooldown = LAYLINE_COOLDOWN;
        memory.tack_cooldown = LAYLINE_COOLDOWN;
        return other_heading;
    }

    if preferred != on {
        if memory.tack_cooldown > 0.0 {
            return tack_heading(wind, optimal, on);
        }
        memory.tack_cooldown = TACK_COOLDOWN;
    }
    tack_heading(wind, optimal, preferred)
}

/// Velocity made good toward `bearing` over the next few seconds on
/// `heading`, plus the pressure bonus.
fn tack_score(
    heading: f64,
    bearing: f64,
    kin:     &Kinematics,
    stats:   &BoatStats,
    local:   WindSample,
    ctx:     &HelmContext<'_>,
) -> f64 {
    let base = ctx.wind.base_speed();
    let twa = normalize_angle(heading - local.direction).abs();
    let felt = stats.effective_wind(local.speed, base);
    let target = ctx.polar.target_speed(twa, twa > FRAC_PI_2, felt) * stats.point_of_sail_factor(twa);

    let alpha = SPEED_ALPHA
        * if target > kin.speed { stats.acceleration_factor() } else { stats.momentum_factor() };
    let mut speed = kin.speed;
    let mut total = 0.0;
    for _ in 0..SCORE_STEPS {
        speed += (target - speed) * alpha;
        total += speed;
    }
    let average = total / f64::from(SCORE_STEPS);

    let (cog, sog) = over_ground(heading, average, ctx.current);
    let vmg = normalize_angle(cog - bearing).cos() * sog;

    let run = knots_to_units_per_sec(sog) * f64::from(SCORE_STEPS);
    let ahead = kin.position + forward(cog) * run;
    let pressure = stats.effective_wind(ctx.wind.sample_at(ahead).speed, base);
    vmg + (pressure - base) * PRESSURE_WEIGHT
}
