//! Collision risk: how close the nearest threat will pass, and who has to
//! do something about it.
//!
//! | Level      | Closest approach | Time to it       |
//! |------------|------------------|------------------|
//! | `Medium`   | < 70             | 0 < t < 8 s      |
//! | `High`     | < 50             | 0 < t < 4.5 s    |
//! | `Imminent` | < 35, or already within 60 | 0 < t < 2 s |
//!
//! Only boats within 600 units count.

use rg_core::BoatId;
use rg_rules::{InteractionTable, RaceView, RightOfWayEngine, closest_approach};

pub const DETECTION_RANGE: f64 = 600.0;
const MEDIUM_CPA: f64 = 70.0;
const MEDIUM_TIME: f64 = 8.0;
const HIGH_CPA: f64 = 50.0;
const HIGH_TIME: f64 = 4.5;
const IMMINENT_RANGE: f64 = 60.0;
const IMMINENT_CPA: f64 = 35.0;
const IMMINENT_TIME: f64 = 2.0;
/// Seconds a raised risk is held after the threat fades.
pub const COMMIT_SECS: f64 = 2.0;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
    Imminent,
}

impl RiskLevel {
    /// Level for a boat `distance` away now whose closest approach will be
    /// `cpa_distance` in `cpa_time` seconds.
    pub fn classify(distance: f64, cpa_distance: f64, cpa_time: f64) -> RiskLevel {
        if distance >= DETECTION_RANGE {
            return RiskLevel::Low;
        }
        let closing_within = |limit: f64| cpa_time > 0.0 && cpa_time < limit;
        if distance < IMMINENT_RANGE || (cpa_distance < IMMINENT_CPA && closing_within(IMMINENT_TIME)) {
            RiskLevel::Imminent
        } else if cpa_distance < HIGH_CPA && closing_within(HIGH_TIME) {
            RiskLevel::High
        } else if cpa_distance < MEDIUM_CPA && closing_within(MEDIUM_TIME) {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    /// Medium or High: time to manoeuvre by the book.
    #[inline]
    pub fn is_developing(self) -> bool {
        matches!(self, RiskLevel::Medium | RiskLevel::High)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RiskRole {
    #[default]
    None,
    StandOn,
    GiveWay,
}

/// The most dangerous boat nearby.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Threat {
    pub other: BoatId,
    pub level: RiskLevel,
    pub role: RiskRole,
}

/// Find the highest-risk boat around `boat`.  Ties go to the lower id.
pub fn assess(
    boat:  BoatId,
    view:  &RaceView<'_>,
    table: &InteractionTable,
    rules: &RightOfWayEngine,
) -> Option<Threat> {
    let me = view.boat(boat);
    let mut worst: Option<Threat> = None;
    for other in &view.boats {
        if other.id == boat || other.is_finished() {
            continue;
        }
        let distance = me.position.distance(other.position);
        let cpa = closest_approach(me.position, me.velocity, other.position, other.velocity);
        let level = RiskLevel::classify(distance, cpa.distance, cpa.time);
        if level == RiskLevel::Low || worst.is_some_and(|w| level <= w.level) {
            continue;
        }
        let row = rules.evaluate(boat, other.id, table, view).row_boat;
        let role = if row == Some(boat) { RiskRole::StandOn } else { RiskRole::GiveWay };
        worst = Some(Threat { other: other.id, level, role });
    }
    worst
}

/// Risk level and role with a short memory, so the skipper does not flap
/// between avoiding and not avoiding.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RiskLatch {
    pub level: RiskLevel,
    pub role: RiskRole,
    /// Seconds the current level is held even if the threat fades.
    pub commit: f64,
}

impl RiskLatch {
    pub fn update(&mut self, threat: Option<Threat>, elapsed: f64) {
        self.commit = (self.commit - elapsed).max(0.0);
        let (level, role) = threat.map_or((RiskLevel::Low, RiskRole::None), |t| (t.level, t.role));

        if self.commit > 0.0 && level == RiskLevel::Low {
            return;
        }
        self.level = level;
        self.role = role;

        let commits = match level {
            RiskLevel::Medium => role == RiskRole::GiveWay,
            RiskLevel::High | RiskLevel::Imminent => true,
            RiskLevel::Low => false,
        };
        self.commit = if commits { COMMIT_SECS } else { 0.0 };
    }

    /// Giving way to a Medium or High threat.
    #[inline]
    pub fn giving_way(&self) -> bool {
        self.role == RiskRole::GiveWay && self.level.is_developing()
    }

    /// Standing on against a Medium or High threat.
    #[inline]
    pub fn standing_on(&self) -> bool {
        self.role == RiskRole::StandOn && self.level.is_developing()
    }
}
