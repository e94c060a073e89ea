//! Closest point of approach between two boats on constant velocities.

use rg_core::Vec2;

/// Relative speeds² below this count as not closing at all.
const MIN_CLOSING_SQ: f64 = 1e-3;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Cpa {
    /// Seconds until closest approach; zero or negative when the boats are
    /// already separating.
    pub time: f64,
    /// Separation at closest approach, or the current separation when it
    /// lies in the past.
    pub distance: f64,
}

/// CPA of a boat at `pa` moving at `va` and one at `pb` moving at `vb`.
/// Velocities in world units per second.
pub fn closest_approach(pa: Vec2, va: Vec2, pb: Vec2, vb: Vec2) -> Cpa {
    let rel_pos = pb - pa;
    let rel_vel = vb - va;
    let v2 = rel_vel.length_sq();
    let time = if v2 > MIN_CLOSING_SQ { -rel_pos.dot(rel_vel) / v2 } else { 0.0 };
    let distance = if time > 0.0 { (rel_pos + rel_vel * time).length() } else { rel_pos.length() };
    Cpa { time, distance }
}
