//! The boat hull outline shared by collision, rules and rendering.
//!
//! The outline is given in boat-local coordinates with the bow at −y, the
//! same orientation a heading of `0` has in world space, so rotating by the
//! heading places it directly.

use crate::Vec2;
use crate::geom::forward;

/// Overall hull length.  Zones, overlap tests and following distances are
/// all multiples of it.
pub const HULL_LENGTH: f64 = 55.0;

/// Distance from the hull origin forward to the bow.
pub const BOW_OFFSET: f64 = 25.0;

/// Distance from the hull origin aft to the stern.
pub const STERN_OFFSET: f64 = 30.0;

/// Boat-local hull outline, bow first, clockwise on screen.
pub const HULL_OUTLINE: [Vec2; 7] = [
    Vec2::new(0.0, -25.0),
    Vec2::new(15.0, -5.0),
    Vec2::new(15.0, 20.0),
    Vec2::new(12.0, 30.0),
    Vec2::new(-12.0, 30.0),
    Vec2::new(-15.0, 20.0),
    Vec2::new(-15.0, -5.0),
];

/// Radius of the circle that encloses the outline; used for broad phases.
pub const HULL_RADIUS: f64 = 40.0;

/// World-space hull polygon for a boat at `position` with `heading`.
pub fn hull_polygon(position: Vec2, heading: f64) -> [Vec2; 7] {
    HULL_OUTLINE.map(|v| position + v.rotated(heading))
}

#[inline]
pub fn bow(position: Vec2, heading: f64) -> Vec2 {
    position + forward(heading) * BOW_OFFSET
}

#[inline]
pub fn stern(position: Vec2, heading: f64) -> Vec2 {
    position - forward(heading) * STERN_OFFSET
}
