//! Course marks.

use rg_core::Vec2;
use rg_core::hull::HULL_LENGTH;

/// Contact radius of a mark buoy.
pub const MARK_RADIUS: f64 = 12.0;

/// Radius of the zone around a mark: three hull lengths.
pub const ZONE_RADIUS: f64 = 3.0 * HULL_LENGTH;

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mark {
    pub position: Vec2,
    pub radius: f64,
}

impl Mark {
    pub fn new(position: Vec2) -> Self {
        Self { position, radius: MARK_RADIUS }
    }

    #[inline]
    pub fn in_zone(&self, p: Vec2) -> bool {
        self.position.distance(p) < ZONE_RADIUS
    }
}
