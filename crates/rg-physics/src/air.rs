//! Disturbed air.
//!
//! Every boat casts a wind shadow: a cone trailing downwind from the boat,
//! widening from 20 to 100 units over 450 units.  Inside the central 70% of
//! the cone the wind is reduced, most strongly close behind the boat and on
//! the cone's axis.

use rg_core::Vec2;
use rg_core::geom::downwind;

pub const SHADOW_LENGTH: f64 = 450.0;
const START_WIDTH: f64 = 20.0;
const END_WIDTH: f64 = 100.0;
/// A boat this close downwind is alongside, not behind.
const MIN_DOWNWIND: f64 = 10.0;
const CORE_FRACTION: f64 = 0.7;
pub const MAX_INTENSITY: f64 = 0.95;

/// Shadow that a boat at `source` casts onto `victim` for wind blowing from
/// `wind_direction`, in `[0, MAX_INTENSITY]`.
pub fn shadow(victim: Vec2, source: Vec2, wind_direction: f64) -> f64 {
    let flow = downwind(wind_direction);
    let rel = victim - source;

    let along = rel.dot(flow);
    if along <= MIN_DOWNWIND || along > SHADOW_LENGTH {
        return 0.0;
    }

    let width = START_WIDTH + along / SHADOW_LENGTH * (END_WIDTH - START_WIDTH);
    let core = width * CORE_FRACTION;
    let cross = rel.cross(flow).abs();
    if cross >= core {
        return 0.0;
    }

    MAX_INTENSITY * (1.0 - cross / core) * (1.0 - along / SHADOW_LENGTH)
}

/// Strongest shadow any of `sources` casts on `victim`.
pub fn disturbed_air(victim: Vec2, wind_direction: f64, sources: impl IntoIterator<Item = Vec2>) -> f64 {
    sources
        .into_iter()
        .map(|s| shadow(victim, s, wind_direction))
        .fold(0.0, f64::max)
}
