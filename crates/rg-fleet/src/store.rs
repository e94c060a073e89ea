//! Fleet storage: `Fleet` (SoA data) and `BoatRngs` (per-boat RNG).
//!
//! RNGs are kept apart from the data so the AI phase can hold
//! `&mut BoatRngs` and `&Fleet` at the same time.

use rg_core::{BoatId, BoatRng, Vec2};

use crate::{BoatStats, Helm, Kinematics, Rig};

// ── BoatRngs ──────────────────────────────────────────────────────────────────

/// Per-boat deterministic RNG state.
#[derive(Debug)]
pub struct BoatRngs {
    pub inner: Vec<BoatRng>,
}

impl BoatRngs {
    pub(crate) fn new(count: usize, race_seed: u64) -> Self {
        Self { inner: BoatId::range(count).map(|b| BoatRng::new(race_seed, b)).collect() }
    }

    #[inline]
    pub fn get_mut(&mut self, boat: BoatId) -> &mut BoatRng {
        &mut self.inner[boat.index()]
    }

    /// Disjoint `&mut` references for a set of boats.
    ///
    /// # Panics
    /// Panics if `boats` holds a duplicate id.
    pub fn get_many_mut(&mut self, boats: &[BoatId]) -> Vec<&mut BoatRng> {
        let mut seen = vec![false; self.inner.len()];
        for b in boats {
            assert!(!std::mem::replace(&mut seen[b.index()], true), "duplicate {b}");
        }
        let ptr = self.inner.as_mut_ptr();
        // SAFETY: ids are unique (checked above) and in bounds (indexing
        // `seen` would have panicked otherwise), so no two references alias.
        boats.iter().map(|b| unsafe { &mut *ptr.add(b.index()) }).collect()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── Fleet ─────────────────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for every boat.
///
/// Every `Vec` has exactly `count` elements and `BoatId` indexes them all.
/// Boats are created once at race setup and never removed.
#[derive(Debug)]
pub struct Fleet {
    pub count: usize,

    pub names: Vec<String>,
    pub helm: Vec<Helm>,
    pub kinematics: Vec<Kinematics>,
    pub rig: Vec<Rig>,
    pub stats: Vec<BoatStats>,
}

impl Fleet {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn ids(&self) -> impl Iterator<Item = BoatId> + use<> {
        BoatId::range(self.count)
    }

    #[inline]
    pub fn kinematics(&self, boat: BoatId) -> &Kinematics {
        &self.kinematics[boat.index()]
    }

    #[inline]
    pub fn position(&self, boat: BoatId) -> Vec2 {
        self.kinematics[boat.index()].position
    }

    #[inline]
    pub fn heading(&self, boat: BoatId) -> f64 {
        self.kinematics[boat.index()].heading
    }

    #[inline]
    pub fn rig(&self, boat: BoatId) -> &Rig {
        &self.rig[boat.index()]
    }

    #[inline]
    pub fn stats(&self, boat: BoatId) -> &BoatStats {
        &self.stats[boat.index()]
    }

    #[inline]
    pub fn name(&self, boat: BoatId) -> &str {
        &self.names[boat.index()]
    }

    #[inline]
    pub fn is_autonomous(&self, boat: BoatId) -> bool {
        self.helm[boat.index()] == Helm::Autonomous
    }

    /// Positions of every boat, in id order.
    pub fn positions(&self) -> Vec<Vec2> {
        self.kinematics.iter().map(|k| k.position).collect()
    }
}
