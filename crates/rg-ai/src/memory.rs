//! Per-boat AI memory.
//!
//! Everything a skipper remembers between decisions lives here, one
//! `AiMemory` per boat, so a single [`Skipper`][crate::Skipper] value can
//! steer the whole fleet.

use rg_core::BoatRng;

use crate::{RiskLatch, RouteMemory};

/// Seconds between decisions.
pub const DECISION_INTERVAL: f64 = 0.1;
/// First decisions are spread over this many seconds.
const DECISION_STAGGER: f64 = 0.2;

// ── Liveness ──────────────────────────────────────────────────────────────────

/// Knots below which the low-speed timer runs.
pub const SLOW_SPEED: f64 = 1.0;
/// Knots above which the low-speed timer resets.
pub const MOVING_SPEED: f64 = 2.5;

const RECOVERY_AFTER_GUN: f64 = 15.0;
const RECOVERY_SLOW_FOR: f64 = 5.0;
const FORCE_AFTER_GUN: f64 = 45.0;
const FORCE_SLOW_FOR: f64 = 10.0;

/// How hard the skipper is trying to get off the start line.
///
/// Only the start leg escalates: a boat still behind the line well after the
/// gun, or stuck slow, trades caution for progress.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AiLiveness {
    #[default]
    Normal,
    /// Tighter safety bubble, softer rule penalties.
    Recovery,
    /// Rules ignored, contact tolerated.
    Force,
}

impl AiLiveness {
    /// Liveness on the start leg `since_gun` seconds after the gun, having
    /// been slow for `slow_for` seconds.
    pub fn on_start_leg(since_gun: f64, slow_for: f64) -> AiLiveness {
        if since_gun > FORCE_AFTER_GUN || slow_for > FORCE_SLOW_FOR {
            AiLiveness::Force
        } else if since_gun > RECOVERY_AFTER_GUN || slow_for > RECOVERY_SLOW_FOR {
            AiLiveness::Recovery
        } else {
            AiLiveness::Normal
        }
    }
}

// ── Unstick ───────────────────────────────────────────────────────────────────

/// Seconds slow before a wiggle starts.
pub const WIGGLE_AFTER: f64 = 3.0;
pub const WIGGLE_SECS: f64 = 5.0;
/// Still slow after this long at the end of a wiggle: try the other side.
pub const WIGGLE_RETRY_SLOW_FOR: f64 = 5.0;
/// Past this the smart side choice has failed; pick at random.
pub const WIGGLE_RANDOM_AFTER: f64 = 8.0;
/// Wind angle of the wiggle heading, a little aft of abeam.
pub const WIGGLE_ANGLE: f64 = 1.75;
pub const CLEARANCE_SECS: f64 = 3.0;

/// Breaking free after getting stuck.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Unstick {
    #[default]
    Idle,
    /// Power out on a reach to `side` (±1) of the wind.
    Wiggling { side: f64, remaining: f64 },
    /// Got moving: hold the escape heading a little longer.
    Clearance { heading: f64, remaining: f64 },
}

impl Unstick {
    #[inline]
    pub fn is_wiggling(&self) -> bool {
        matches!(self, Unstick::Wiggling { .. })
    }
}

// ── Start plan ────────────────────────────────────────────────────────────────

/// Where on the line this boat means to start, fixed for the race.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StartPlan {
    /// Fraction of the way from the pin to the committee boat.
    pub line_fraction: f64,
    /// How far downwind of the line the boat hovers before its run in.
    pub setup_distance: f64,
}

impl StartPlan {
    pub fn random(rng: &mut BoatRng) -> Self {
        Self {
            line_fraction: 0.1 + rng.unit() * 0.8,
            setup_distance: 100.0 + rng.unit() * 200.0,
        }
    }
}

// ── Mark escape ───────────────────────────────────────────────────────────────

/// Committed escape from a mark the boat is pinned against.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarkEscape {
    pub heading: f64,
    pub remaining: f64,
}

// ── AiMemory ──────────────────────────────────────────────────────────────────

/// Everything one autonomous boat remembers between decisions.
#[derive(Clone, Debug)]
pub struct AiMemory {
    /// Seconds until the next decision.
    pub decision_in: f64,
    /// Seconds since the last decision; timers advance by this much.
    pub since_decision: f64,

    pub liveness: AiLiveness,
    /// Seconds spent below [`SLOW_SPEED`] without getting back above
    /// [`MOVING_SPEED`].
    pub slow_for: f64,
    pub unstick: Unstick,

    pub risk: RiskLatch,

    /// Blocks a score-driven change of tack.
    pub tack_cooldown: f64,
    /// Blocks another layline tack.
    pub layline_cooldown: f64,

    pub escape: Option<MarkEscape>,
    pub route: RouteMemory,
    pub start: StartPlan,
}

impl AiMemory {
    pub fn new(rng: &mut BoatRng) -> Self {
        Self {
            decision_in: rng.unit() * DECISION_STAGGER,
            since_decision: 0.0,
            liveness: AiLiveness::Normal,
            slow_for: 0.0,
            unstick: Unstick::Idle,
            risk: RiskLatch::default(),
            tack_cooldown: 0.0,
            layline_cooldown: 0.0,
            escape: None,
            route: RouteMemory::default(),
            start: StartPlan::random(rng),
        }
    }

    /// Count down the tick; `Some(elapsed)` when a decision is due, with the
    /// seconds since the previous one.
    pub fn tick(&mut self, dt: f64) -> Option<f64> {
        self.decision_in -= dt;
        self.since_decision += dt;
        if self.decision_in > 0.0 {
            return None;
        }
        self.decision_in = DECISION_INTERVAL;
        Some(std::mem::take(&mut self.since_decision))
    }

    /// Run down the cooldowns.
    pub fn cool_down(&mut self, elapsed: f64) {
        self.tack_cooldown = (self.tack_cooldown - elapsed).max(0.0);
        self.layline_cooldown = (self.layline_cooldown - elapsed).max(0.0);
    }

    /// Update the low-speed timer and liveness.  `start_leg` is `Some(since
    /// gun)` while racing on leg 0, `racing` is false before the gun.
    /// Returns the previous liveness when it changed.
    pub fn watch_liveness(
        &mut self,
        speed:     f64,
        racing:    bool,
        start_leg: Option<f64>,
        elapsed:   f64,
    ) -> Option<AiLiveness> {
        let before = self.liveness;
        if !racing {
            self.slow_for = 0.0;
            self.liveness = AiLiveness::Normal;
        } else {
            if speed < SLOW_SPEED {
                self.slow_for += elapsed;
            } else if speed > MOVING_SPEED {
                self.slow_for = 0.0;
            }
            self.liveness = match start_leg {
                Some(since_gun) => AiLiveness::on_start_leg(since_gun, self.slow_for),
                None => AiLiveness::Normal,
            };
        }
        (self.liveness != before).then_some(before)
    }
}
