//! The right-of-way engine: table bookkeeping and the rule cascade.

use tracing::{debug, trace};

use rg_core::hull::HULL_LENGTH;
use rg_core::{BoatId, MarkId};
use rg_course::Course;
use rg_fleet::Tack;

use crate::predicates::{clear_astern, in_zone, leeward_of, overlapped};
use crate::{
    BoatView, Constraint, InteractionTable, PairInteraction, RaceView, RowDecision, Rule, ZoneBasis,
    ZoneSnapshot, ZoneState,
};

/// Tunable distances and durations.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RulesConfig {
    /// Pairs closer than this start being tracked.
    pub proximity_radius: f64,
    /// How long after gaining right of way the new holder must still give
    /// room (rule 15), seconds.
    pub acquired_right_secs: f64,
    /// An overlap gained from clear astern closer than this binds the
    /// leeward boat to her proper course (rule 17).
    pub proper_course_distance: f64,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            proximity_radius: 600.0,
            acquired_right_secs: 2.0,
            proper_course_distance: 2.0 * HULL_LENGTH,
        }
    }
}

pub struct RightOfWayEngine {
    pub config: RulesConfig,
}

impl Default for RightOfWayEngine {
    fn default() -> Self {
        Self::new(RulesConfig::default())
    }
}

impl RightOfWayEngine {
    pub fn new(config: RulesConfig) -> Self {
        Self { config }
    }

    // ── Bookkeeping ───────────────────────────────────────────────────────

    /// Refresh overlap, zone and right-of-way history for every pair of
    /// unfinished boats.  Call once per tick, after boats have moved.
    pub fn update(&self, table: &mut InteractionTable, view: &RaceView<'_>) {
        let n = view.len().min(table.boat_count());
        for hi in BoatId::range(n) {
            for lo in BoatId::range(hi.index()) {
                let (a, b) = (view.boat(lo), view.boat(hi));
                if a.is_finished() || b.is_finished() {
                    continue;
                }
                let existed = table.get(lo, hi).is_some();
                if !existed && a.position.distance(b.position) > self.config.proximity_radius {
                    continue;
                }
                let Some(pair) = table.entry(lo, hi) else { continue };

                self.update_overlap(pair, a, b, existed, view.time);
                update_zone(pair, a, b, view);

                let row = self.decide(a, b, Some(&*pair), view).row_boat;
                if row != pair.row_owner {
                    if pair.row_owner.is_some() {
                        pair.row_changed_at = Some(view.time);
                        trace!(a = %lo, b = %hi, ?row, "right of way changed hands");
                    }
                    pair.row_owner = row;
                }
            }
        }
    }

    fn update_overlap(
        &self,
        pair:    &mut PairInteraction,
        a:       &BoatView,
        b:       &BoatView,
        existed: bool,
        now:     f64,
    ) {
        let now_overlapped = overlapped(a, b);
        if now_overlapped && !pair.overlapped {
            pair.overlapped = true;
            pair.overlap_started = now;
            // A tracked pair that was not overlapped had one boat clear astern.
            pair.overlap_from_astern =
                existed && a.position.distance(b.position) < self.config.proper_course_distance;
        } else if !now_overlapped && pair.overlapped {
            pair.overlapped = false;
            pair.overlap_started = 0.0;
            pair.overlap_from_astern = false;
        }
    }

    // ── Arbitration ───────────────────────────────────────────────────────

    /// Decide right of way between `a` and `b`.  The result does not depend
    /// on argument order.
    pub fn evaluate(
        &self,
        a:     BoatId,
        b:     BoatId,
        table: &InteractionTable,
        view:  &RaceView<'_>,
    ) -> RowDecision {
        let (lo, hi) = BoatId::ordered(a, b);
        if lo == hi {
            return RowDecision::none();
        }
        let pair = table.get(lo, hi);
        let mut decision = self.decide(view.boat(lo), view.boat(hi), pair, view);

        let section_a = matches!(
            decision.rule,
            Some(Rule::OppositeTacks | Rule::Windward | Rule::ClearAstern)
        );
        if let (true, Some(row), Some(p)) = (section_a, decision.row_boat, pair) {
            let fresh = match p.row_owner {
                Some(owner) if owner != row => true,
                Some(_) => p
                    .row_changed_at
                    .is_some_and(|t| view.time - t < self.config.acquired_right_secs),
                None => false,
            };
            if fresh {
                decision.constraints.push(Constraint::AcquiredRight);
            }
        }
        decision
    }

    /// The cascade for `a.id < b.id`.
    fn decide(
        &self,
        a:    &BoatView,
        b:    &BoatView,
        pair: Option<&PairInteraction>,
        view: &RaceView<'_>,
    ) -> RowDecision {
        if a.is_finished() || b.is_finished() {
            return RowDecision::none();
        }

        // ── Returning ─────────────────────────────────────────────────────
        match (a.is_returning(), b.is_returning()) {
            (true, false) => return RowDecision::won(b.id, Rule::Returning, returning_reason(a)),
            (false, true) => return RowDecision::won(a.id, Rule::Returning, returning_reason(b)),
            _ => {}
        }

        let opposite = a.tack != b.tack;

        // ── Tacking ───────────────────────────────────────────────────────
        match (a.tacking, b.tacking) {
            (true, false) => return RowDecision::won(b.id, Rule::Tacking, "tacking"),
            (false, true) => return RowDecision::won(a.id, Rule::Tacking, "tacking"),
            (true, true) => {
                let (row, reason) = if clear_astern(a, b) {
                    (b.id, "both tacking, clear ahead")
                } else if clear_astern(b, a) {
                    (a.id, "both tacking, clear ahead")
                } else if opposite {
                    (starboard_of(a, b), "both tacking, starboard")
                } else {
                    (leeward_of(a, b, view.wind_direction), "both tacking, leeward")
                };
                return RowDecision::won(row, Rule::Tacking, reason);
            }
            (false, false) => {}
        }

        // ── Mark-room ─────────────────────────────────────────────────────
        let beat_exemption = opposite && (on_beat(a) || on_beat(b));
        let mark_room = pair
            .and_then(|p| p.zone.snapshot())
            .filter(|_| !beat_exemption)
            .map(|s| s.entitled);

        // ── Section A ─────────────────────────────────────────────────────
        let mut decision = if opposite {
            let mut d = RowDecision::won(starboard_of(a, b), Rule::OppositeTacks, "starboard");
            if on_beat(a) && on_beat(b) {
                d.constraints.push(Constraint::NoBearAway);
            }
            d
        } else if overlapped(a, b) {
            let mut d = RowDecision::won(leeward_of(a, b, view.wind_direction), Rule::Windward, "leeward");
            if pair.is_some_and(|p| p.overlapped && p.overlap_from_astern) {
                d.constraints.push(Constraint::ProperCourse);
            }
            d
        } else if clear_astern(b, a) {
            RowDecision::won(a.id, Rule::ClearAstern, "clear ahead")
        } else {
            // Not overlapped, so `a` is clear astern.
            RowDecision::won(b.id, Rule::ClearAstern, "clear ahead")
        };
        decision.mark_room = mark_room;
        decision
    }
}

fn returning_reason(boat: &BoatView) -> &'static str {
    if boat.ocs { "returning to start" } else { "taking penalty" }
}

fn starboard_of(a: &BoatView, b: &BoatView) -> BoatId {
    if a.tack == Tack::Starboard { a.id } else { b.id }
}

fn on_beat(boat: &BoatView) -> bool {
    boat.leg.is_some_and(Course::is_beat)
}

// ── Zone snapshots ────────────────────────────────────────────────────────────

/// Mark whose zone either boat is in.  The pair's current mark wins if it
/// still qualifies.
fn active_mark(a: &BoatView, b: &BoatView, course: &Course, current: Option<MarkId>) -> Option<MarkId> {
    let engaged = |m: MarkId| {
        let mark = course.mark(m);
        in_zone(a.position, mark) || in_zone(b.position, mark)
    };
    if let Some(m) = current.filter(|&m| engaged(m)) {
        return Some(m);
    }
    [a.zone_gate, b.zone_gate]
        .into_iter()
        .flatten()
        .flat_map(|g| [g.a, g.b])
        .find(|&m| engaged(m))
}

fn update_zone(pair: &mut PairInteraction, a: &BoatView, b: &BoatView, view: &RaceView<'_>) {
    let course = view.course;
    let current = match pair.zone {
        ZoneState::Clear => None,
        ZoneState::Active(s) => Some(s.mark),
        ZoneState::Released(m) => Some(m),
    };

    pair.zone = match (pair.zone, active_mark(a, b, course, current)) {
        (_, None) => ZoneState::Clear,
        (ZoneState::Active(s), Some(m)) if s.mark == m => {
            let entitled = if s.entitled == a.id { a } else { b };
            if !in_zone(entitled.position, course.mark(m)) || entitled.tacking {
                debug!(boat = %entitled.id, mark = %m, "mark-room ends");
                ZoneState::Released(m)
            } else {
                ZoneState::Active(s)
            }
        }
        (ZoneState::Released(r), Some(m)) if r == m => ZoneState::Released(r),
        (_, Some(m)) => {
            let snapshot = take_snapshot(pair.overlapped, a, b, m, view);
            debug!(entitled = %snapshot.entitled, mark = %m, basis = ?snapshot.basis, "zone snapshot");
            ZoneState::Active(snapshot)
        }
    };
}

fn take_snapshot(
    overlapped: bool,
    a:          &BoatView,
    b:          &BoatView,
    mark:       MarkId,
    view:       &RaceView<'_>,
) -> ZoneSnapshot {
    let at = view.course.mark(mark).position;
    let closer = if b.position.distance(at) < a.position.distance(at) { b.id } else { a.id };
    let (entitled, basis) = if overlapped {
        (closer, ZoneBasis::InsideOverlap)
    } else if clear_astern(b, a) {
        (a.id, ZoneBasis::ClearAhead)
    } else if clear_astern(a, b) {
        (b.id, ZoneBasis::ClearAhead)
    } else {
        (closer, ZoneBasis::Closer)
    };
    ZoneSnapshot { mark, entitled, basis, time: view.time }
}
