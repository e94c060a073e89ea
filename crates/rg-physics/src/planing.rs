//! Planing hysteresis.
//!
//! A boat gets up on the plane only when sailing broad in a decent breeze
//! and holding a high speed for a while; once planing it keeps going until
//! the speed has been low (or the conditions gone) for a while.

use std::f64::consts::PI;

use tracing::trace;

const MIN_TWA: f64 = 100.0 * PI / 180.0;
const MAX_TWA: f64 = 170.0 * PI / 180.0;
/// Knots of true wind needed.
pub const MIN_TWS: f64 = 12.0;
const ENTRY_SPEED: f64 = 8.5;
const EXIT_SPEED: f64 = 7.5;
/// Seconds above the entry speed before planing starts.
const ENTRY_TIME: f64 = 1.5;
/// Seconds below the exit speed before planing stops.
const EXIT_TIME: f64 = 1.0;

pub const SPEED_MULTIPLIER: f64 = 1.2;
pub const ACCEL_BOOST: f64 = 1.5;
/// Per-60-Hz-frame speed factor while turning on the plane.
pub const TURN_DRAG: f64 = 0.990;
pub const TURN_RATE_SCALE: f64 = 0.7;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PlaningState {
    pub active: bool,
    /// Seconds the pending transition has been sustained.
    pub(crate) timer: f64,
}

impl PlaningState {
    /// Whether the wind allows planing at all.
    #[inline]
    pub fn conditions_met(twa: f64, tws: f64) -> bool {
        (MIN_TWA..=MAX_TWA).contains(&twa.abs()) && tws > MIN_TWS
    }

    /// Advance the hysteresis by `dt`.  Returns `true` when the state flips.
    pub fn update(&mut self, speed: f64, twa: f64, tws: f64, dt: f64) -> bool {
        let conditions = Self::conditions_met(twa, tws);
        let pending = if self.active {
            !conditions || speed < EXIT_SPEED
        } else {
            conditions && speed > ENTRY_SPEED
        };

        if !pending {
            self.timer = 0.0;
            return false;
        }

        self.timer += dt;
        let needed = if self.active { EXIT_TIME } else { ENTRY_TIME };
        if self.timer >= needed {
            self.active = !self.active;
            self.timer = 0.0;
            trace!(planing = self.active, speed, "planing transition");
            return true;
        }
        false
    }

    #[inline]
    pub fn speed_factor(&self) -> f64 {
        if self.active { SPEED_MULTIPLIER } else { 1.0 }
    }

    #[inline]
    pub fn accel_factor(&self) -> f64 {
        if self.active { ACCEL_BOOST } else { 1.0 }
    }

    #[inline]
    pub fn turn_factor(&self) -> f64 {
        if self.active { TURN_RATE_SCALE } else { 1.0 }
    }
}
