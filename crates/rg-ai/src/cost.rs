//! Cost terms for the avoidance search.
//!
//! Every term is a pure function of geometry and weights so each can be
//! tested and tuned on its own.  Terms that report a hard contact also
//! return a flag; the search adds the liveness-scaled contact penalty
//! ([`Tiers`]) once per flag, not once per sample.

use rg_core::Vec2;
use rg_core::geom::{closest_point_on_segment, distance_to_segment, forward, segment_hits_polygon};
use rg_course::{Boundary, Obstacle};

use crate::AiLiveness;

/// Crossing-or-ducking judgement applies inside this range.
pub const POSITIONING_RANGE: f64 = 250.0;
/// Soft proximity cost between boats applies inside this range.
pub const BOAT_PROXIMITY_RANGE: f64 = 250.0;
/// Path passes this close to a mark: contact.
pub const MARK_CONTACT_RANGE: f64 = 50.0;
pub const MARK_PROXIMITY_RANGE: f64 = 130.0;
/// Future point this close to the boundary: contact.
pub const BOUNDARY_CONTACT_MARGIN: f64 = 80.0;
pub const BOUNDARY_SOFT_MARGIN: f64 = 120.0;
/// Soft obstacle cost applies this far past the bounding radius; obstacles
/// farther away are skipped.
pub const OBSTACLE_PROXIMITY_MARGIN: f64 = 80.0;

/// One penalty per liveness state.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tiers {
    pub normal: f64,
    pub recovery: f64,
    pub force: f64,
}

impl Tiers {
    #[inline]
    pub fn pick(&self, liveness: AiLiveness) -> f64 {
        match liveness {
            AiLiveness::Normal => self.normal,
            AiLiveness::Recovery => self.recovery,
            AiLiveness::Force => self.force,
        }
    }
}

/// Weights of the avoidance cost terms.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AvoidanceWeights {
    /// Scale of `|offset|^1.5`.
    pub deviation: f64,
    /// Per radian of offset while standing on.
    pub stand_on: f64,
    /// Ending up ahead of a stand-on boat's bow.
    pub cross_bow: f64,
    /// Reward for passing astern of a stand-on boat.
    pub duck: f64,
    /// Numerator of the inverse-square boat contact term.
    pub collision: f64,
    /// Added per contact sample while risk is imminent.
    pub imminent: f64,
    pub proximity: f64,
    pub mark_contact: f64,
    pub mark_proximity: f64,
    pub boundary: f64,
    pub obstacle_contact: f64,
    pub obstacle_proximity: f64,
    pub boat_contact: Tiers,
    pub static_contact: Tiers,
    pub rule_violation: Tiers,
}

impl Default for AvoidanceWeights {
    fn default() -> Self {
        Self {
            deviation: 10.0,
            stand_on: 2_000.0,
            cross_bow: 1_500.0,
            duck: 500.0,
            collision: 500_000.0,
            imminent: 20_000.0,
            proximity: 5_000.0,
            mark_contact: 200_000.0,
            mark_proximity: 25_000.0,
            boundary: 5_000.0,
            obstacle_contact: 500_000.0,
            obstacle_proximity: 10_000.0,
            boat_contact: Tiers { normal: 10_000.0, recovery: 2_000.0, force: 500.0 },
            static_contact: Tiers { normal: 15_000.0, recovery: 8_000.0, force: 500.0 },
            rule_violation: Tiers { normal: 20_000.0, recovery: 1_000.0, force: 0.0 },
        }
    }
}

// ── Course keeping ────────────────────────────────────────────────────────────

/// Leaving the desired heading; grows faster than linearly so small
/// corrections are cheap.
#[inline]
pub fn deviation_cost(offset: f64, w: &AvoidanceWeights) -> f64 {
    offset.abs().powf(1.5) * w.deviation
}

/// Holding course is an obligation for the stand-on boat.
#[inline]
pub fn stand_on_cost(offset: f64, w: &AvoidanceWeights) -> f64 {
    offset.abs() * w.stand_on
}

/// Where the give-way boat ends up relative to the other boat: ahead of its
/// bow is punished, astern is rewarded.  `mine` and `theirs` are the two
/// projected positions, `their_heading` the other boat's heading.
pub fn positioning_cost(mine: Vec2, theirs: Vec2, their_heading: f64, w: &AvoidanceWeights) -> f64 {
    let rel = mine - theirs;
    if rel.length_sq() >= POSITIONING_RANGE * POSITIONING_RANGE {
        return 0.0;
    }
    if rel.dot(forward(their_heading)) > 0.0 { w.cross_bow } else { -w.duck }
}

// ── Boats ─────────────────────────────────────────────────────────────────────

/// One path sample inside the safety bubble; closer is worse.
#[inline]
pub fn boat_collision_cost(dist_sq: f64, w: &AvoidanceWeights) -> f64 {
    w.collision / (dist_sq + 10.0)
}

/// One path sample near, but outside, the safety bubble.
#[inline]
pub fn boat_proximity_cost(dist_sq: f64, w: &AvoidanceWeights) -> f64 {
    w.proximity / (dist_sq + 10.0)
}

// ── Fixed hazards ─────────────────────────────────────────────────────────────

/// Mark at `mark` against the straight path `from → to`.  Proximity only
/// counts in normal liveness.  The flag reports contact.
pub fn mark_cost(
    mark:     Vec2,
    from:     Vec2,
    to:       Vec2,
    liveness: AiLiveness,
    w:        &AvoidanceWeights,
) -> (f64, bool) {
    let d2 = closest_point_on_segment(mark, from, to).distance_sq(mark);
    if d2 < MARK_CONTACT_RANGE * MARK_CONTACT_RANGE {
        (w.mark_contact / (d2 + 1.0), true)
    } else if d2 < MARK_PROXIMITY_RANGE * MARK_PROXIMITY_RANGE && liveness == AiLiveness::Normal {
        (w.mark_proximity / (d2 + 100.0), false)
    } else {
        (0.0, false)
    }
}

/// Course boundary against a boat now at `from` projected to `to`.  The
/// soft term only applies while heading outward.
pub fn boundary_cost(boundary: &Boundary, from: Vec2, to: Vec2, w: &AvoidanceWeights) -> (f64, bool) {
    let now = from.distance(boundary.center);
    let then = to.distance(boundary.center);
    let contact = then > boundary.radius - BOUNDARY_CONTACT_MARGIN;
    let soft_edge = boundary.radius - BOUNDARY_SOFT_MARGIN;
    let cost = if then > now && then > soft_edge {
        w.boundary * (then - soft_edge) / BOUNDARY_SOFT_MARGIN
    } else {
        0.0
    };
    (cost, contact)
}

/// Obstacle against the straight path `from → to`.
pub fn obstacle_cost(obstacle: &Obstacle, from: Vec2, to: Vec2, w: &AvoidanceWeights) -> (f64, bool) {
    let d = distance_to_segment(obstacle.center, from, to);
    if d >= obstacle.radius + OBSTACLE_PROXIMITY_MARGIN {
        return (0.0, false);
    }
    if segment_hits_polygon(from, to, &obstacle.outline) {
        return (w.obstacle_contact, true);
    }
    let closeness = (1.0 - (d - obstacle.radius) / OBSTACLE_PROXIMITY_MARGIN).min(1.0);
    (w.obstacle_proximity * closeness, false)
}
