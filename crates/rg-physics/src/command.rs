//! Helm commands.

/// What the helm wants this tick.
///
/// Produced by the AI for autonomous boats, or pushed in from outside for
/// the externally steered boat.  The integrator applies the last command
/// every tick, so a command lives until replaced.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HelmCommand {
    /// Desired heading, radians.
    pub heading: f64,
    /// Fraction of the attainable speed in `[0, 1]`; below 0.9 the sail is
    /// eased to shed power.
    pub speed_limit: f64,
    /// Speed floor in knots, used when working free of an obstruction.
    pub min_speed: Option<f64>,
    /// Multiplier on the turn rate.
    pub turn_boost: f64,
}

impl HelmCommand {
    /// Sail `heading` at full power.
    pub fn hold(heading: f64) -> Self {
        Self { heading, speed_limit: 1.0, min_speed: None, turn_boost: 1.0 }
    }

    pub fn with_speed_limit(mut self, limit: f64) -> Self {
        self.speed_limit = limit.clamp(0.0, 1.0);
        self
    }

    pub fn with_min_speed(mut self, knots: f64) -> Self {
        self.min_speed = Some(knots);
        self
    }

    pub fn with_turn_boost(mut self, boost: f64) -> Self {
        self.turn_boost = boost;
        self
    }
}
