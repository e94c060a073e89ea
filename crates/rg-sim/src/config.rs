//! Top-level simulation settings.

use rg_physics::Current;
use rg_race::RaceConfig;
use rg_wind::WindConfig;

use crate::{SimError, SimResult};

/// Everything the sim needs besides the course, the boats and the skipper.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Race seed; every RNG stream derives from it.
    pub seed: u64,
    /// Largest step `tick` will take, seconds.  Longer frames are clamped.
    pub max_dt: f64,
    pub race: RaceConfig,
    pub wind: WindConfig,
    pub current: Current,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            max_dt: 0.1,
            race: RaceConfig::default(),
            wind: WindConfig::default(),
            current: Current::default(),
        }
    }
}

impl SimConfig {
    /// Check the settings owned here; the nested configs validate themselves
    /// when the sim is built.
    pub fn validate(&self) -> SimResult<()> {
        if !(self.max_dt > 0.0 && self.max_dt.is_finite()) {
            return Err(SimError::InvalidParameter { name: "max_dt", value: self.max_dt });
        }
        if !(self.current.speed >= 0.0 && self.current.speed.is_finite() && self.current.direction.is_finite()) {
            return Err(SimError::InvalidParameter { name: "current.speed", value: self.current.speed });
        }
        Ok(())
    }
}
