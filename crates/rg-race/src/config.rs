use rg_core::units::UNITS_PER_METER;

use crate::{RaceError, RaceResult};

/// Race format.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RaceConfig {
    /// Countdown before the gun, seconds.
    pub prestart_secs: f64,
    /// Legs after the start; the race finishes at the end of the last one.
    pub total_legs: u32,
    /// Length of a collision/rules penalty, seconds.
    pub penalty_secs: f64,
    /// Time allowance per metre of course for the cutoff.
    pub seconds_per_meter: f64,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self { prestart_secs: 30.0, total_legs: 4, penalty_secs: 20.0, seconds_per_meter: 0.1875 }
    }
}

impl RaceConfig {
    pub fn validate(&self) -> RaceResult<()> {
        if self.total_legs == 0 {
            return Err(RaceError::NoLegs);
        }
        if !(self.prestart_secs >= 0.0 && self.prestart_secs.is_finite()) {
            return Err(RaceError::InvalidParameter { name: "prestart_secs", value: self.prestart_secs });
        }
        for (name, value) in [("penalty_secs", self.penalty_secs), ("seconds_per_meter", self.seconds_per_meter)] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(RaceError::InvalidParameter { name, value });
            }
        }
        Ok(())
    }

    /// Elapsed race time after which unfinished boats are retired.
    pub fn cutoff_secs(&self, leg_length: f64) -> f64 {
        self.total_legs as f64 * leg_length / UNITS_PER_METER * self.seconds_per_meter
    }
}
