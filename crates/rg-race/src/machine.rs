//! The race state machine: start, legs, roundings, finish, penalties and the
//! cutoff.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use tracing::{debug, info};

use rg_core::geom::segments_intersect;
use rg_core::units::units_to_meters;
use rg_core::{BoatId, EventSink, RaceEvent, Vec2};
use rg_course::{Course, Gate, ZONE_RADIUS};
use rg_fleet::Kinematics;

use crate::results::rank;
use crate::{FinishStatus, RaceClock, RaceConfig, RaceError, RacePhase, RaceProgress, RaceResult, RaceState, Standing};

/// How far each gate extension reaches beyond its mark.
pub const EXTENSION_LENGTH: f64 = 10_000.0;

/// Tacking starts when the wind crosses the bow within this angle of
/// head-to-wind ...
const TACK_WINDOW: f64 = FRAC_PI_2;
/// ... and ends once the boat has borne away past this angle.
const TACK_CLEAR: f64 = FRAC_PI_4;

/// Race clock plus one [`RaceState`] per boat.
///
/// The simulation calls [`advance_clock`](Self::advance_clock) once per tick
/// before physics and [`update_boat`](Self::update_boat) for each boat after
/// it moved.  Penalties are given by the collision pass through
/// [`trigger_penalty`](Self::trigger_penalty).
pub struct RaceStateMachine {
    pub config: RaceConfig,
    pub clock: RaceClock,
    pub states: Vec<RaceState>,
}

impl RaceStateMachine {
    pub fn new(config: RaceConfig, course: &Course, boat_count: usize) -> RaceResult<Self> {
        config.validate()?;
        if boat_count == 0 {
            return Err(RaceError::NoBoats);
        }
        let cutoff = config.cutoff_secs(course.leg_length);
        Ok(Self {
            clock: RaceClock::new(config.prestart_secs, cutoff),
            states: vec![RaceState::new(config.total_legs); boat_count],
            config,
        })
    }

    #[inline]
    pub fn state(&self, boat: BoatId) -> &RaceState {
        &self.states[boat.index()]
    }

    /// Race time in seconds, negative during the countdown.
    #[inline]
    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    #[inline]
    pub fn phase(&self) -> RacePhase {
        self.clock.phase
    }

    pub fn is_over(&self) -> bool {
        self.clock.phase == RacePhase::Finished
    }

    /// Gate whose mark zones matter for `boat` right now.  None at the start
    /// and on the finishing leg.
    pub fn zone_gate(&self, course: &Course, boat: BoatId) -> Option<Gate> {
        match self.states[boat.index()].progress.leg() {
            Some(leg) if leg >= 1 && leg < self.config.total_legs => course.zone_gate(leg),
            _ => None,
        }
    }

    /// Leg `boat` is sailing, `None` once finished.
    #[inline]
    pub fn leg(&self, boat: BoatId) -> Option<u32> {
        self.states[boat.index()].progress.leg()
    }

    // ── Clock ─────────────────────────────────────────────────────────────

    /// Advance the race clock, firing the start and the cutoff.  Once every
    /// boat has finished the race closes without a cutoff.
    pub fn advance_clock(&mut self, dt: f64, sink: &mut impl EventSink) {
        if self.clock.is_racing() && self.states.iter().all(RaceState::is_finished) {
            self.clock.phase = RacePhase::Finished;
            info!(time = self.clock.elapsed, "every boat finished");
            return;
        }
        match self.clock.advance(dt) {
            Some(RacePhase::Racing) => {
                let time = self.clock.now();
                info!(time, "race started");
                sink.emit(RaceEvent::RaceStarted { time });
                for (i, st) in self.states.iter().enumerate() {
                    if st.ocs {
                        let boat = BoatId(i as u16);
                        debug!(%boat, "over the line at the gun");
                        sink.emit(RaceEvent::Ocs { boat, time });
                    }
                }
            }
            Some(RacePhase::Finished) => self.apply_cutoff(sink),
            _ => {}
        }
    }

    fn apply_cutoff(&mut self, sink: &mut impl EventSink) {
        let time = self.clock.elapsed;
        let (mut dnf, mut dns) = (0, 0);
        for st in self.states.iter_mut().filter(|s| !s.is_finished()) {
            let status = st.progress.cutoff_status();
            match status {
                FinishStatus::Dns => dns += 1,
                _ => dnf += 1,
            }
            st.progress = st.progress.finish(time, status);
            st.penalty.active = false;
            st.penalty.remaining = 0.0;
        }
        info!(time, dnf, dns, "cutoff");
        sink.emit(RaceEvent::Cutoff { time, dnf, dns });
    }

    // ── Penalties ─────────────────────────────────────────────────────────

    /// Start (or restart) a penalty for `boat`.
    pub fn trigger_penalty(&mut self, boat: BoatId, sink: &mut impl EventSink) {
        let time = self.clock.now();
        let penalty_secs = self.config.penalty_secs;
        let st = &mut self.states[boat.index()];
        if st.is_finished() {
            return;
        }
        if !st.penalty.active {
            st.penalty.total += 1;
            st.penalty.active = true;
        }
        st.penalty.remaining = penalty_secs;
        debug!(%boat, time, total = st.penalty.total, "penalty");
        sink.emit(RaceEvent::Penalty { boat, time });
    }

    // ── Per-boat update ───────────────────────────────────────────────────

    /// Update `boat` after it moved from `kin.last_position` to
    /// `kin.position`.  `signed_twa` is its signed true wind angle.
    pub fn update_boat(
        &mut self,
        boat:       BoatId,
        course:     &Course,
        kin:        &Kinematics,
        signed_twa: f64,
        dt:         f64,
        sink:       &mut impl EventSink,
    ) {
        let phase = self.clock.phase;
        let now = self.clock.now();
        let total_legs = self.config.total_legs;
        let zone_gate = self.zone_gate(course, boat);
        let st = &mut self.states[boat.index()];

        let flipped = update_tacking(st, signed_twa);
        if st.is_finished() {
            return;
        }

        // ── Penalty countdown ─────────────────────────────────────────────
        if st.penalty.active {
            st.penalty.remaining -= dt;
            if st.penalty.remaining <= 0.0 {
                st.penalty.active = false;
                st.penalty.remaining = 0.0;
                debug!(%boat, "penalty served");
            }
        }

        // ── Leg statistics ────────────────────────────────────────────────
        if phase == RacePhase::Racing {
            if let Some(leg) = st.progress.leg() {
                let stats = &mut st.legs[leg as usize];
                let moved = units_to_meters(kin.position.distance(kin.last_position));
                stats.record(kin.speed, moved, dt);
                if flipped {
                    stats.maneuvers += 1;
                }
            }
        }

        // ── Zone ──────────────────────────────────────────────────────────
        let in_zone = zone_gate.is_some_and(|gate| {
            [gate.a, gate.b]
                .iter()
                .any(|&m| course.mark(m).position.distance(kin.position) < ZONE_RADIUS)
        });
        if in_zone && !st.in_zone {
            st.zone_entered_at = Some(now);
        } else if !in_zone {
            st.zone_entered_at = None;
        }
        st.in_zone = in_zone;

        // ── Crossings ─────────────────────────────────────────────────────
        let Some(leg) = st.progress.leg() else { return };
        let spec = course.gate_for_leg(leg);
        let (m1, m2) = course.gate_points(spec.gate);
        st.distance_to_mark = kin.position.distance(m1.midpoint(m2));
        let normal = course.gate_normal(spec.gate);
        let (from, to) = (kin.last_position, kin.position);
        let crossing = crossing_direction(from, to, m1, m2, normal);

        match phase {
            RacePhase::Prestart => {
                if leg == 0 {
                    match crossing {
                        Some(d) if d > 0.0 => st.ocs = true,
                        Some(_) => st.ocs = false,
                        None => {}
                    }
                }
            }
            RacePhase::Racing if leg == 0 => match crossing {
                Some(d) if d > 0.0 && !st.ocs => {
                    complete_leg(st, boat, now, total_legs, sink);
                }
                Some(d) if d < 0.0 => st.ocs = false,
                _ => {}
            },
            RacePhase::Racing => {
                let required = spec.direction;
                if leg == total_legs {
                    if crossing == Some(required) {
                        complete_leg(st, boat, now, total_legs, sink);
                    }
                    return;
                }

                match crossing {
                    Some(d) if d == required && !st.rounding => st.rounding = true,
                    Some(d) if d == -required && st.rounding => st.rounding = false,
                    _ => {}
                }

                if st.rounding {
                    let axis = (m2 - m1).normalized();
                    let left = (m1, m1 - axis * EXTENSION_LENGTH);
                    let right = (m2, m2 + axis * EXTENSION_LENGTH);
                    let back = [left, right]
                        .iter()
                        .any(|&(a, b)| crossing_direction(from, to, a, b, normal) == Some(-required));
                    if back {
                        complete_leg(st, boat, now, total_legs, sink);
                    }
                }
            }
            RacePhase::Finished => {}
        }
    }

    // ── Results ───────────────────────────────────────────────────────────

    /// Current standings: finishers by time, then boats still racing or
    /// DNF by legs completed and distance to their next mark, then DNS.
    pub fn standings(&self) -> Vec<Standing> {
        rank(&self.states)
    }
}

/// Direction of a crossing of segment `a→b` by the move `from→to`: `+1`
/// along `normal`, `−1` against it.
fn crossing_direction(from: Vec2, to: Vec2, a: Vec2, b: Vec2, normal: Vec2) -> Option<f64> {
    if !segments_intersect(from, to, a, b) {
        return None;
    }
    Some(if (to - from).dot(normal) > 0.0 { 1.0 } else { -1.0 })
}

/// Track the tacking flag.  Returns `true` if the wind changed sides
/// (a tack or a gybe).
fn update_tacking(st: &mut RaceState, signed_twa: f64) -> bool {
    let flipped = st
        .last_signed_twa
        .is_some_and(|last| last != 0.0 && signed_twa != 0.0 && last.signum() != signed_twa.signum());

    if flipped && signed_twa.abs() < TACK_WINDOW {
        st.tacking = true;
    } else if st.tacking && signed_twa.abs() > TACK_CLEAR {
        st.tacking = false;
    }
    st.last_signed_twa = Some(signed_twa);
    flipped
}

fn complete_leg(
    st:         &mut RaceState,
    boat:       BoatId,
    now:        f64,
    total_legs: u32,
    sink:       &mut impl EventSink,
) {
    let Some(leg) = st.progress.leg() else { return };
    st.legs[leg as usize].duration = Some(now - st.leg_started_at);
    st.leg_started_at = now;
    st.rounding = false;
    sink.emit(RaceEvent::LegComplete { boat, leg, time: now });

    if leg == total_legs {
        let time = now + if st.penalty.active { st.penalty.remaining } else { 0.0 };
        st.progress = st.progress.finish(time, FinishStatus::Finished);
        st.penalty.active = false;
        st.penalty.remaining = 0.0;
        info!(%boat, time, "finished");
        sink.emit(RaceEvent::Finish { boat, time });
    } else {
        st.progress = st.progress.advance();
        debug!(%boat, leg, time = now, "leg complete");
    }
}
