//! Per-pair rule bookkeeping, stored as a dense triangular matrix.

use rg_core::{BoatId, MarkId};

/// Why the entitled boat got mark-room.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ZoneBasis {
    /// Overlapped when the first of them reached the zone; inside boat.
    InsideOverlap,
    ClearAhead,
    /// Neither clear ahead nor overlapped; closer to the mark.
    Closer,
}

/// Mark-room fixed at the moment the first of the pair reached the zone.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneSnapshot {
    pub mark: MarkId,
    pub entitled: BoatId,
    pub basis: ZoneBasis,
    /// Race time the snapshot was taken.
    pub time: f64,
}

/// Zone lifecycle for one pair.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ZoneState {
    #[default]
    Clear,
    Active(ZoneSnapshot),
    /// The entitlement at `MarkId` has ended; no new one until both boats
    /// are out of that zone.
    Released(MarkId),
}

impl ZoneState {
    pub fn snapshot(&self) -> Option<&ZoneSnapshot> {
        match self {
            ZoneState::Active(s) => Some(s),
            _ => None,
        }
    }
}

/// What the rules remember about one pair of boats.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PairInteraction {
    pub overlapped: bool,
    /// Race time the current overlap began.
    pub overlap_started: f64,
    /// The current overlap began from clear astern within two hull lengths.
    pub overlap_from_astern: bool,
    pub zone: ZoneState,
    pub row_owner: Option<BoatId>,
    /// Race time `row_owner` last changed hands.
    pub row_changed_at: Option<f64>,
}

/// One optional [`PairInteraction`] per unordered pair of boats.
///
/// Entries start out absent and are created when a pair first comes close;
/// once created they persist for the race.
pub struct InteractionTable {
    boats: usize,
    cells: Vec<Option<PairInteraction>>,
}

impl InteractionTable {
    pub fn new(boats: usize) -> Self {
        let pairs = boats * boats.saturating_sub(1) / 2;
        Self { boats, cells: vec![None; pairs] }
    }

    #[inline]
    pub fn boat_count(&self) -> usize {
        self.boats
    }

    /// Cell index of the pair; `None` for a boat paired with itself.
    #[inline]
    fn slot(a: BoatId, b: BoatId) -> Option<usize> {
        let (lo, hi) = BoatId::ordered(a, b);
        if lo == hi {
            return None;
        }
        let (lo, hi) = (lo.index(), hi.index());
        Some(hi * (hi - 1) / 2 + lo)
    }

    pub fn get(&self, a: BoatId, b: BoatId) -> Option<&PairInteraction> {
        Self::slot(a, b).and_then(|i| self.cells.get(i)).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, a: BoatId, b: BoatId) -> Option<&mut PairInteraction> {
        Self::slot(a, b).and_then(|i| self.cells.get_mut(i)).and_then(Option::as_mut)
    }

    /// The pair's entry, created if absent.  `None` only for `a == b` or
    /// ids outside the table.
    pub fn entry(&mut self, a: BoatId, b: BoatId) -> Option<&mut PairInteraction> {
        Self::slot(a, b)
            .and_then(|i| self.cells.get_mut(i))
            .map(|cell| cell.get_or_insert_with(PairInteraction::default))
    }

    /// Number of pairs with an entry.
    pub fn len(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Every created entry as `(low, high, interaction)`.
    pub fn iter(&self) -> impl Iterator<Item = (BoatId, BoatId, &PairInteraction)> {
        BoatId::range(self.boats).flat_map(move |hi| {
            BoatId::range(hi.index()).filter_map(move |lo| self.get(lo, hi).map(|p| (lo, hi, p)))
        })
    }
}
