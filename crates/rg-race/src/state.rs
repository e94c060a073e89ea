//! Per-boat race bookkeeping.

use crate::RaceProgress;

/// Penalty turn state.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Penalty {
    pub active: bool,
    /// Seconds left to serve.
    pub remaining: f64,
    /// Penalties incurred this race.  A penalty given while one is already
    /// being served restarts the countdown without adding to the count.
    pub total: u32,
}

/// Statistics for one leg.  Index 0 is the start leg.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LegStats {
    /// Seconds spent on the leg, once completed.
    pub duration: Option<f64>,
    pub distance_m: f64,
    /// Knots.
    pub top_speed: f64,
    /// Tacks and gybes.
    pub maneuvers: u32,
    /// Seconds accumulated on the leg so far.
    pub time: f64,
    /// ∫ speed dt, knot-seconds.
    speed_time: f64,
}

impl LegStats {
    /// Time-weighted mean speed in knots.
    pub fn avg_speed(&self) -> f64 {
        if self.time > 0.0 { self.speed_time / self.time } else { 0.0 }
    }

    pub(crate) fn record(&mut self, speed: f64, distance_m: f64, dt: f64) {
        self.time += dt;
        self.speed_time += speed * dt;
        self.distance_m += distance_m;
        self.top_speed = self.top_speed.max(speed);
    }
}

/// Everything the race tracks about one boat.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RaceState {
    pub progress: RaceProgress,
    /// Passed through the gate, not yet back across an extension.
    pub rounding: bool,
    /// Going through head-to-wind.
    pub tacking: bool,
    /// Signed true wind angle at the previous update.
    pub last_signed_twa: Option<f64>,
    pub in_zone: bool,
    /// Race time of entry into the current zone visit.
    pub zone_entered_at: Option<f64>,
    /// Over the start line early; must dip back before starting.
    pub ocs: bool,
    pub penalty: Penalty,
    /// Race time at which the current leg began.
    pub leg_started_at: f64,
    /// Distance from the boat to the centre of the gate it sails for, as of
    /// its last update.
    pub distance_to_mark: f64,
    /// One entry per leg, start leg included.
    pub legs: Vec<LegStats>,
}

impl RaceState {
    pub fn new(total_legs: u32) -> Self {
        Self {
            progress: RaceProgress::Prestart,
            rounding: false,
            tacking: false,
            last_signed_twa: None,
            in_zone: false,
            zone_entered_at: None,
            ocs: false,
            penalty: Penalty::default(),
            leg_started_at: 0.0,
            distance_to_mark: 0.0,
            legs: vec![LegStats::default(); total_legs as usize + 1],
        }
    }

    /// Legs completed, the start counting as one.
    pub fn legs_completed(&self) -> u32 {
        self.legs.iter().filter(|l| l.duration.is_some()).count() as u32
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.progress.is_finished()
    }

    /// Returning boats (OCS or serving a penalty) have no rights.
    #[inline]
    pub fn is_returning(&self) -> bool {
        self.ocs || self.penalty.active
    }

    pub fn total_distance_m(&self) -> f64 {
        self.legs.iter().map(|l| l.distance_m).sum()
    }

    pub fn top_speed(&self) -> f64 {
        self.legs.iter().map(|l| l.top_speed).fold(0.0, f64::max)
    }

    pub fn maneuvers(&self) -> u32 {
        self.legs.iter().map(|l| l.maneuvers).sum()
    }
}
