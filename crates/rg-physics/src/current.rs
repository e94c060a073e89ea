use rg_core::Vec2;
use rg_core::geom::forward;
use rg_core::units::knots_to_units_per_sec;

/// Uniform water current.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Current {
    /// Direction the water flows *toward*, radians.
    pub direction: f64,
    /// Knots.
    pub speed: f64,
}

impl Current {
    pub const NONE: Current = Current { direction: 0.0, speed: 0.0 };

    /// Drift in world units per second.
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        forward(self.direction) * knots_to_units_per_sec(self.speed)
    }
}
