//! The outcome of arbitrating one pair.

use rg_core::BoatId;

/// The rule that settled right of way.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rule {
    /// Rule 21: a boat returning to start or taking a penalty keeps clear.
    Returning,
    /// Rule 13: a boat tacking keeps clear.
    Tacking,
    /// Rule 10: port keeps clear of starboard.
    OppositeTacks,
    /// Rule 11: windward keeps clear of leeward.
    Windward,
    /// Rule 12: clear astern keeps clear of clear ahead.
    ClearAstern,
}

impl Rule {
    /// Rule number in the racing rules.
    pub fn number(self) -> u8 {
        match self {
            Rule::Returning => 21,
            Rule::Tacking => 13,
            Rule::OppositeTacks => 10,
            Rule::Windward => 11,
            Rule::ClearAstern => 12,
        }
    }
}

/// Limitation on how the right-of-way boat may sail.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Constraint {
    /// Rule 15: right of way was just acquired; give the other boat room to
    /// keep clear.
    AcquiredRight,
    /// Rule 16.2: on a beat, starboard may not bear away to hinder a port
    /// boat crossing ahead.
    NoBearAway,
    /// Rule 17: an overlap gained from clear astern within two hull lengths
    /// binds the leeward boat to her proper course.
    ProperCourse,
}

impl Constraint {
    pub fn number(self) -> &'static str {
        match self {
            Constraint::AcquiredRight => "15",
            Constraint::NoBearAway => "16.2",
            Constraint::ProperCourse => "17",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RowDecision {
    /// `None` when the pair does not interact (either boat finished).
    pub row_boat: Option<BoatId>,
    pub rule: Option<Rule>,
    pub reason: &'static str,
    /// Boat entitled to mark-room, if any.
    pub mark_room: Option<BoatId>,
    pub constraints: Vec<Constraint>,
}

impl RowDecision {
    pub(crate) fn none() -> Self {
        Self { row_boat: None, rule: None, reason: "", mark_room: None, constraints: Vec::new() }
    }

    pub(crate) fn won(boat: BoatId, rule: Rule, reason: &'static str) -> Self {
        Self { row_boat: Some(boat), rule: Some(rule), reason, mark_room: None, constraints: Vec::new() }
    }

    /// `boat` must keep clear of the other boat.
    pub fn must_keep_clear(&self, boat: BoatId) -> bool {
        self.row_boat.is_some_and(|w| w != boat)
    }

    pub fn has(&self, constraint: Constraint) -> bool {
        self.constraints.contains(&constraint)
    }
}
