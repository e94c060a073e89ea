//! Wind configuration.

use crate::{WindError, WindResult};

/// Parameters of the slow base-direction oscillation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ShiftProfile {
    /// Peak shift either side of the base direction, degrees.
    pub amplitude_deg: f64,
    /// Oscillation period, seconds.
    pub period_secs: f64,
    /// Maximum rate the shift may change, degrees per second.
    pub slew_deg_per_sec: f64,
}

impl ShiftProfile {
    pub const STEADY: ShiftProfile =
        ShiftProfile { amplitude_deg: 4.0, period_secs: 90.0, slew_deg_per_sec: 0.2 };
    pub const NORMAL: ShiftProfile =
        ShiftProfile { amplitude_deg: 10.0, period_secs: 60.0, slew_deg_per_sec: 0.4 };
    pub const SHIFTY: ShiftProfile =
        ShiftProfile { amplitude_deg: 18.0, period_secs: 45.0, slew_deg_per_sec: 0.6 };

    fn lerp(a: ShiftProfile, b: ShiftProfile, t: f64) -> ShiftProfile {
        let l = |x: f64, y: f64| x + (y - x) * t;
        ShiftProfile {
            amplitude_deg: l(a.amplitude_deg, b.amplitude_deg),
            period_secs: l(a.period_secs, b.period_secs),
            slew_deg_per_sec: l(a.slew_deg_per_sec, b.slew_deg_per_sec),
        }
    }

    /// Blend STEADY → NORMAL over `[0, 0.5)` and NORMAL → SHIFTY over
    /// `[0.5, 1]`.
    pub fn for_shiftiness(s: f64) -> ShiftProfile {
        let s = s.clamp(0.0, 1.0);
        if s < 0.5 {
            Self::lerp(Self::STEADY, Self::NORMAL, s * 2.0)
        } else {
            Self::lerp(Self::NORMAL, Self::SHIFTY, (s - 0.5) * 2.0)
        }
    }
}

/// Race-day wind conditions.  All shape parameters are fractions in `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WindConfig {
    /// Direction the wind blows from, radians.
    pub base_direction: f64,
    /// Mean wind speed, knots.
    pub base_speed: f64,
    /// How much the base direction oscillates.
    pub shiftiness: f64,
    /// How much the base speed breathes.
    pub variability: f64,
    /// Density and size of gusts/lulls.
    pub puffiness: f64,
    /// Direction change inside gusts.
    pub puff_shiftiness: f64,
    /// Probability a new feature is a gust rather than a lull.
    pub gust_bias: f64,
    /// Disable to get a uniform field (tests, tuning).
    pub gusts_enabled: bool,
}

impl Default for WindConfig {
    fn default() -> Self {
        Self {
            base_direction: 0.0,
            base_speed: 10.0,
            shiftiness: 0.5,
            variability: 0.5,
            puffiness: 0.5,
            puff_shiftiness: 0.5,
            gust_bias: 0.5,
            gusts_enabled: true,
        }
    }
}

impl WindConfig {
    /// Constant wind from `direction` at `speed` knots: no shifts, no speed
    /// noise, no gusts.
    pub fn steady(direction: f64, speed: f64) -> Self {
        Self {
            base_direction: direction,
            base_speed: speed,
            shiftiness: 0.0,
            variability: 0.0,
            puffiness: 0.0,
            puff_shiftiness: 0.0,
            gust_bias: 0.5,
            gusts_enabled: false,
        }
    }

    pub fn validate(&self) -> WindResult<()> {
        if !(self.base_speed > 0.0) {
            return Err(WindError::InvalidSpeed(self.base_speed));
        }
        if !self.base_direction.is_finite() {
            return Err(WindError::InvalidDirection(self.base_direction));
        }
        for (name, v) in [
            ("shiftiness", self.shiftiness),
            ("variability", self.variability),
            ("puffiness", self.puffiness),
            ("puff_shiftiness", self.puff_shiftiness),
            ("gust_bias", self.gust_bias),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(WindError::OutOfRange { name, value: v });
            }
        }
        Ok(())
    }

    /// Number of gusts/lulls the field keeps alive.
    pub fn target_gust_count(&self) -> usize {
        if self.gusts_enabled { 5 + (self.puffiness * 20.0).floor() as usize } else { 0 }
    }

    /// `true` when the base direction never moves.
    pub(crate) fn is_static(&self) -> bool {
        self.shiftiness == 0.0 && self.variability == 0.0
    }
}
