//! Per-boat performance coefficients.
//!
//! Each coefficient is an integer in `-5..=5`; zero is a neutral boat.  The
//! scale factors below turn points into small multiplicative effects.

use std::f64::consts::PI;

/// Valid range of every coefficient.
pub const STAT_RANGE: std::ops::RangeInclusive<i8> = -5..=5;

const ACCELERATION_SCALE: f64 = 0.024;
const MOMENTUM_SCALE: f64 = 0.02;
const HANDLING_SCALE: f64 = 0.03;
const UPWIND_SCALE: f64 = 0.008;
const REACH_SCALE: f64 = 0.012;
const DOWNWIND_SCALE: f64 = 0.01;
const BOOST_SCALE: f64 = 0.05;

/// Upwind bias applies at or below this true wind angle.
const UPWIND_LIMIT: f64 = 60.0 * PI / 180.0;
/// Downwind bias applies at or above this true wind angle.
const DOWNWIND_LIMIT: f64 = 145.0 * PI / 180.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PointOfSail {
    Upwind,
    Reach,
    Downwind,
}

impl PointOfSail {
    pub fn classify(twa: f64) -> PointOfSail {
        let twa = twa.abs();
        if twa <= UPWIND_LIMIT {
            PointOfSail::Upwind
        } else if twa >= DOWNWIND_LIMIT {
            PointOfSail::Downwind
        } else {
            PointOfSail::Reach
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BoatStats {
    pub acceleration: i8,
    pub momentum: i8,
    pub handling: i8,
    pub upwind: i8,
    pub reach: i8,
    pub downwind: i8,
    /// Sensitivity to pressure differences: boats with positive boost gain
    /// more in gusts and lose more in lulls.
    pub boost: i8,
}

impl BoatStats {
    pub const NEUTRAL: BoatStats = BoatStats {
        acceleration: 0,
        momentum: 0,
        handling: 0,
        upwind: 0,
        reach: 0,
        downwind: 0,
        boost: 0,
    };

    /// Name and value of every coefficient, for validation and reporting.
    pub fn entries(&self) -> [(&'static str, i8); 7] {
        [
            ("acceleration", self.acceleration),
            ("momentum", self.momentum),
            ("handling", self.handling),
            ("upwind", self.upwind),
            ("reach", self.reach),
            ("downwind", self.downwind),
            ("boost", self.boost),
        ]
    }

    /// Blend-rate multiplier while speeding up.
    #[inline]
    pub fn acceleration_factor(&self) -> f64 {
        1.0 + self.acceleration as f64 * ACCELERATION_SCALE
    }

    /// Blend-rate multiplier while slowing down; more momentum carries speed
    /// longer.
    #[inline]
    pub fn momentum_factor(&self) -> f64 {
        1.0 - self.momentum as f64 * MOMENTUM_SCALE
    }

    #[inline]
    pub fn handling_factor(&self) -> f64 {
        1.0 + self.handling as f64 * HANDLING_SCALE
    }

    /// Target-speed multiplier for sailing at `twa`.
    pub fn point_of_sail_factor(&self, twa: f64) -> f64 {
        let bias = match PointOfSail::classify(twa) {
            PointOfSail::Upwind => self.upwind as f64 * UPWIND_SCALE,
            PointOfSail::Reach => self.reach as f64 * REACH_SCALE,
            PointOfSail::Downwind => self.downwind as f64 * DOWNWIND_SCALE,
        };
        1.0 + bias
    }

    /// Wind speed this boat effectively feels: the difference from the
    /// course-wide `base` is amplified (or damped) by `boost`.
    pub fn effective_wind(&self, local: f64, base: f64) -> f64 {
        let k = self.boost as f64 * BOOST_SCALE;
        let delta = local - base;
        if delta > 0.0 { base + delta * (1.0 + k) } else { base + delta * (1.0 - k) }
    }
}
