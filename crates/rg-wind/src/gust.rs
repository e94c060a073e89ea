//! Gusts and lulls: drifting, growing and shrinking elliptical pressure
//! features.

use std::f64::consts::{FRAC_PI_2, PI};

use rg_core::geom::{downwind, forward};
use rg_core::units::REFERENCE_FPS;
use rg_core::{SimRng, Vec2};

use crate::WindConfig;

/// Seconds over which a feature fades in at birth and out before death.
const FADE_SECS: f64 = 5.0;

/// Smallest semi-axis a feature shrinks to.
const MIN_RADIUS: f64 = 10.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GustKind {
    /// More pressure than the surrounding wind.
    Gust,
    /// Less pressure.
    Lull,
}

#[derive(Clone, Debug)]
pub struct Gust {
    pub kind: GustKind,
    pub center: Vec2,
    /// Semi-axes at full size.
    pub max_radius: (f64, f64),
    /// Current semi-axes.
    pub radius: (f64, f64),
    /// Orientation of the ellipse's first axis.
    pub rotation: f64,
    /// Signed speed change at the core, knots.
    pub speed_delta: f64,
    /// Direction deviation inside the feature, radians.
    pub direction_delta: f64,
    pub duration: f64,
    pub age: f64,
    /// Drift speed as a fraction of the wind speed (per reference frame).
    drift_factor: f64,
    /// Drift direction offset from the wind.
    drift_offset: f64,
}

impl Gust {
    /// Create a feature at `center` shaped by the current wind and `config`.
    ///
    /// With `mid_life` the age is randomized so an initial population does
    /// not all grow in lock-step.
    pub fn spawn(
        kind:        GustKind,
        center:      Vec2,
        wind_dir:    f64,
        wind_speed:  f64,
        config:      &WindConfig,
        rng:         &mut SimRng,
        mid_life:    bool,
    ) -> Gust {
        let size_bias = 0.5 + config.puffiness;
        let max_radius = (
            (300.0 + rng.unit() * 1200.0) * size_bias,
            (150.0 + rng.unit() * 600.0) * size_bias,
        );

        let strength = (rng.unit() + 0.5) * 0.5;
        let speed_delta = match kind {
            GustKind::Gust => wind_speed * (0.20 + strength * 0.30),
            GustKind::Lull => -wind_speed * (0.10 + strength * 0.30),
        };

        let min_dev = 5.0 + config.puff_shiftiness * 15.0;
        let max_dev = 10.0 + config.puff_shiftiness * 20.0;
        let deviation = (min_dev + rng.unit() * (max_dev - min_dev)).to_radians();
        let direction_delta = rng.sign() * deviation;

        let drift_factor = (0.8 + rng.unit() * 0.4) * 0.1;
        let drift_offset = (rng.unit() - 0.5) * 0.1;

        let duration = 30.0 + rng.unit() * 60.0;
        let age = if mid_life { rng.unit() * duration } else { 0.0 };

        Gust {
            kind,
            center,
            max_radius,
            radius: (MIN_RADIUS, MIN_RADIUS),
            rotation: wind_dir + direction_delta + FRAC_PI_2,
            speed_delta,
            direction_delta,
            duration,
            age,
            drift_factor,
            drift_offset,
        }
    }

    /// Age, drift and resize.  Returns `false` once the feature has expired.
    pub fn step(&mut self, dt: f64, wind_dir: f64, wind_speed: f64) -> bool {
        let drift = downwind(wind_dir + self.drift_offset)
            * (wind_speed * self.drift_factor * REFERENCE_FPS);
        self.center += drift * dt;
        self.rotation = wind_dir + self.direction_delta + FRAC_PI_2;
        self.age += dt;

        let life = (PI * self.age / self.duration).sin();
        self.radius = (
            (self.max_radius.0 * life).max(MIN_RADIUS),
            (self.max_radius.1 * life).max(MIN_RADIUS),
        );
        self.age <= self.duration
    }

    /// Ramp in over the first seconds of life and out over the last.
    pub fn life_fade(&self) -> f64 {
        (self.age / FADE_SECS).min(1.0) * ((self.duration - self.age) / FADE_SECS).min(1.0)
    }

    /// Wind vector this feature adds at `p`, or `None` outside the ellipse.
    pub fn contribution(&self, p: Vec2, base_dir: f64) -> Option<Vec2> {
        let local = (p - self.center).rotated(-self.rotation);
        let (rx, ry) = self.radius;
        let dist_sq = (local.x * local.x) / (rx * rx) + (local.y * local.y) / (ry * ry);
        if dist_sq > 1.0 {
            return None;
        }
        let intensity = ((1.0 - dist_sq.sqrt()) * self.life_fade()).max(0.0);
        if intensity <= 0.0 {
            return None;
        }
        Some(forward(base_dir + self.direction_delta) * (self.speed_delta * intensity))
    }
}
