//! The per-boat, per-tick integrator.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use rg_core::geom::{angle_diff, normalize_angle, turn_toward};
use rg_core::units::{blend_for, knots_to_units_per_sec, per_frame};
use rg_course::Boundary;
use rg_fleet::{BoatStats, Kinematics, Rig, Tack};
use rg_wind::WindField;

use crate::{Current, Dynamics, HelmCommand, PolarModel};
use crate::planing::TURN_DRAG;

/// Base turn rate, radians per second.
pub const TURN_RATE: f64 = 0.6;
/// Boom travel per second; the boom spans `[-1, 1]`.
const BOOM_RATE: f64 = 6.0;
/// Sail trim travel, radians per second.
const TRIM_RATE: f64 = 1.0;
/// Below this speed limit the sail is eased to shed power.
const LUFF_LIMIT: f64 = 0.9;
/// Seconds for a full spinnaker hoist or drop.
const SPINNAKER_TIME: f64 = 5.0;
const SPINNAKER_MIN_TWA: f64 = 0.65 * PI;
const SPINNAKER_MIN_LIMIT: f64 = 0.8;
/// Fraction of the speed gap closed per second.
pub const SPEED_ALPHA: f64 = 0.086;
/// Head-to-wind drag applies below this true wind angle.
const IRONS_TWA: f64 = 0.5;
/// Per-60-Hz-frame drag factor in irons.
const IRONS_DRAG: f64 = 0.997;
const PENALTY_FACTOR: f64 = 0.5;

/// What happened during one step, for the race state machine and the AI.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StepReport {
    /// `normalize(heading − wind direction)` after the turn.
    pub signed_twa: f64,
    pub hit_boundary: bool,
    /// The heading changed this step.
    pub turned: bool,
}

/// Advances one boat by one tick.  Stateless apart from the polar and the
/// current, so one integrator serves the whole fleet.
#[derive(Clone, Debug, Default)]
pub struct PhysicsIntegrator {
    pub polar: PolarModel,
    pub current: Current,
}

impl PhysicsIntegrator {
    pub fn new(polar: PolarModel, current: Current) -> Self {
        Self { polar, current }
    }

    /// Optimal sail angle off the centreline for a true wind angle.
    pub fn optimal_sail_angle(twa: f64) -> f64 {
        if twa > 0.75 * PI { FRAC_PI_2 } else { (twa - FRAC_PI_4).max(0.0) }
    }

    /// Advance one boat by `dt` seconds.
    ///
    /// `dynamics.bad_air` must already hold this tick's wind shadow.
    #[allow(clippy::too_many_arguments)]
    pub fn step(
        &self,
        kin:       &mut Kinematics,
        rig:       &mut Rig,
        dynamics:  &mut Dynamics,
        stats:     &BoatStats,
        command:   &HelmCommand,
        penalized: bool,
        wind:      &WindField,
        boundary:  &Boundary,
        dt:        f64,
    ) -> StepReport {
        let limit = command.speed_limit.clamp(0.0, 1.0);

        // ── 1. Steering ───────────────────────────────────────────────────
        let rate = TURN_RATE
            * stats.handling_factor()
            * dynamics.planing.turn_factor()
            * command.turn_boost.max(0.0);
        let before = kin.heading;
        kin.heading = turn_toward(kin.heading, command.heading, rate * dt);
        let turned = angle_diff(kin.heading, before).abs() > 1e-9;

        // ── 2. Wind angle and boom ────────────────────────────────────────
        let sample = wind.sample_at(kin.position);
        let signed_twa = normalize_angle(kin.heading - sample.direction);
        let twa = signed_twa.abs();

        let boom_target = Tack::for_wind_angle(signed_twa).sign();
        rig.boom_side = approach(rig.boom_side, boom_target, BOOM_RATE * dt);

        // ── 3. Trim ───────────────────────────────────────────────────────
        let optimal = Self::optimal_sail_angle(twa);
        let forced_luff = if limit < LUFF_LIMIT { 1.0 - limit } else { 0.0 };
        let trim_target = optimal + forced_luff * FRAC_PI_2;
        rig.sail_angle = approach(rig.sail_angle, trim_target, TRIM_RATE * dt);
        let efficiency = (1.0 - (rig.sail_angle - optimal).abs()).max(0.0);

        // ── 4. Spinnaker ──────────────────────────────────────────────────
        let wants_spinnaker = twa > SPINNAKER_MIN_TWA && limit > SPINNAKER_MIN_LIMIT;
        let hoist = dt / SPINNAKER_TIME;
        rig.spinnaker = if wants_spinnaker {
            (rig.spinnaker + hoist).min(1.0)
        } else {
            (rig.spinnaker - hoist).max(0.0)
        };

        // ── 5. Effective wind ─────────────────────────────────────────────
        let felt = stats.effective_wind(sample.speed, wind.base_speed());
        let tws = (felt * (1.0 - dynamics.bad_air)).max(0.0);

        // ── 6. Target speed ───────────────────────────────────────────────
        dynamics.planing.update(kin.speed, twa, tws, dt);
        let mut target = self.polar.blended_speed(twa, rig.spinnaker, tws)
            * efficiency
            * stats.point_of_sail_factor(twa)
            * dynamics.planing.speed_factor()
            * limit;
        if penalized {
            target *= PENALTY_FACTOR;
        }

        // ── 7. Speed smoothing ────────────────────────────────────────────
        let alpha = if target > kin.speed {
            SPEED_ALPHA * stats.acceleration_factor() * dynamics.planing.accel_factor()
        } else {
            SPEED_ALPHA * stats.momentum_factor()
        };
        let mut speed = kin.speed + (target - kin.speed) * blend_for(alpha, dt);

        // ── 8. Drag ───────────────────────────────────────────────────────
        if twa < IRONS_TWA {
            speed *= per_frame(IRONS_DRAG, dt);
        }
        if dynamics.planing.active && turned {
            speed *= per_frame(TURN_DRAG, dt);
        }

        // ── 9. Floor ──────────────────────────────────────────────────────
        if let Some(min) = command.min_speed {
            speed = speed.max(min);
        }

        // ── 10. Integrate ─────────────────────────────────────────────────
        kin.speed = speed.max(0.0);
        kin.velocity = kin.forward() * knots_to_units_per_sec(kin.speed) + self.current.velocity();
        kin.last_position = kin.position;
        let (position, hit_boundary) = boundary.clamp(kin.position + kin.velocity * dt);
        kin.position = position;

        dynamics.efficiency = efficiency;
        dynamics.target_speed = target;

        StepReport { signed_twa, hit_boundary, turned }
    }
}

/// Move `value` toward `target` by at most `step`.
#[inline]
fn approach(value: f64, target: f64, step: f64) -> f64 {
    if value < target { (value + step).min(target) } else { (value - step).max(target) }
}
