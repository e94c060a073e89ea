//! Geometric definitions the rules are phrased in.

use rg_core::geom::forward;
use rg_core::hull::{bow, stern};
use rg_core::{BoatId, Vec2};
use rg_course::{Mark, ZONE_RADIUS};
use rg_fleet::Tack;

use crate::BoatView;

/// Tolerance on the abeam line, world units.
const ABEAM_EPS: f64 = 0.1;
/// Below this cross-wind separation neither boat is to leeward.
const LEEWARD_EPS: f64 = 1e-9;

/// How far `behind`'s bow is ahead of the line abeam `ahead`'s stern;
/// negative when behind it.
fn abeam_margin(behind: &BoatView, ahead: &BoatView) -> f64 {
    (bow(behind.position, behind.heading) - stern(ahead.position, ahead.heading)).dot(forward(ahead.heading))
}

/// `behind` is clear astern of `ahead`: its bow is behind the line abeam
/// from `ahead`'s stern.
///
/// Two boats sailing away from each other can each be behind the other's
/// line; the one further behind is then the one clear astern, so the
/// relation never holds both ways.
pub fn clear_astern(behind: &BoatView, ahead: &BoatView) -> bool {
    let m = abeam_margin(behind, ahead);
    if m >= -ABEAM_EPS {
        return false;
    }
    let reverse = abeam_margin(ahead, behind);
    reverse >= -ABEAM_EPS || m < reverse
}

/// Neither boat is clear astern of the other.
#[inline]
pub fn overlapped(a: &BoatView, b: &BoatView) -> bool {
    !clear_astern(a, b) && !clear_astern(b, a)
}

/// Within three hull lengths of `mark`.
#[inline]
pub fn in_zone(position: Vec2, mark: &Mark) -> bool {
    mark.position.distance(position) < ZONE_RADIUS
}

/// The leeward boat of two on the same tack as `a`.  Side is judged across
/// the wind; a dead heat goes to the lower id.
pub fn leeward_of(a: &BoatView, b: &BoatView, wind_direction: f64) -> BoatId {
    let across = Vec2::new(wind_direction.cos(), wind_direction.sin());
    let dot = (b.position - a.position).dot(across);
    if dot.abs() < LEEWARD_EPS {
        return a.id.min(b.id);
    }
    // On starboard tack the wind comes over the right-hand side, so the boat
    // further along `across` is to windward.
    match (a.tack, dot > 0.0) {
        (Tack::Starboard, true) | (Tack::Port, false) => a.id,
        _ => b.id,
    }
}
