//! Fluent builder for [`Fleet`] + [`BoatRngs`].
//!
//! ```rust
//! use rg_core::Vec2;
//! use rg_fleet::{BoatSpec, FleetBuilder, Helm};
//!
//! let (fleet, rngs) = FleetBuilder::new(42)
//!     .boat(BoatSpec::new("Player", Vec2::new(0.0, 300.0), 0.0).helm(Helm::External))
//!     .boat(BoatSpec::new("Bixby", Vec2::new(60.0, 300.0), 0.0))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(fleet.count, 2);
//! assert_eq!(rngs.len(), 2);
//! ```

use rg_core::{BoatId, Vec2};

use crate::stats::STAT_RANGE;
use crate::{BoatRngs, BoatStats, Fleet, FleetError, FleetResult, Helm, Kinematics, Rig};

/// Everything needed to put one boat on the water.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoatSpec {
    pub name: String,
    pub position: Vec2,
    pub heading: f64,
    /// Initial speed, knots.
    #[cfg_attr(feature = "serde", serde(default))]
    pub speed: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stats: BoatStats,
    #[cfg_attr(feature = "serde", serde(default))]
    pub helm: Helm,
}

impl BoatSpec {
    pub fn new(name: impl Into<String>, position: Vec2, heading: f64) -> Self {
        Self {
            name: name.into(),
            position,
            heading,
            speed: 0.0,
            stats: BoatStats::NEUTRAL,
            helm: Helm::Autonomous,
        }
    }

    pub fn speed(mut self, knots: f64) -> Self {
        self.speed = knots;
        self
    }

    pub fn stats(mut self, stats: BoatStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn helm(mut self, helm: Helm) -> Self {
        self.helm = helm;
        self
    }
}

pub struct FleetBuilder {
    seed: u64,
    specs: Vec<BoatSpec>,
}

impl FleetBuilder {
    /// `seed` is the race seed every per-boat RNG is derived from.
    pub fn new(seed: u64) -> Self {
        Self { seed, specs: Vec::new() }
    }

    pub fn boat(mut self, spec: BoatSpec) -> Self {
        self.specs.push(spec);
        self
    }

    pub fn boats(mut self, specs: impl IntoIterator<Item = BoatSpec>) -> Self {
        self.specs.extend(specs);
        self
    }

    /// Validate the specs and lay them out as SoA arrays.
    pub fn build(self) -> FleetResult<(Fleet, BoatRngs)> {
        let count = self.specs.len();
        if count == 0 {
            return Err(FleetError::Empty);
        }
        if BoatId::try_from(count).is_err() {
            return Err(FleetError::TooManyBoats(count));
        }

        let mut fleet = Fleet {
            count,
            names: Vec::with_capacity(count),
            helm: Vec::with_capacity(count),
            kinematics: Vec::with_capacity(count),
            rig: Vec::with_capacity(count),
            stats: Vec::with_capacity(count),
        };

        for (i, spec) in self.specs.into_iter().enumerate() {
            let boat = BoatId(i as u16);
            for (stat, value) in spec.stats.entries() {
                if !STAT_RANGE.contains(&value) {
                    return Err(FleetError::StatOutOfRange { boat, stat, value });
                }
            }
            if !(spec.position.x.is_finite() && spec.position.y.is_finite()) {
                return Err(FleetError::InvalidPosition { boat });
            }

            let mut kin = Kinematics::at(spec.position, rg_core::normalize_angle(spec.heading));
            kin.speed = spec.speed.max(0.0);
            fleet.names.push(spec.name);
            fleet.helm.push(spec.helm);
            fleet.kinematics.push(kin);
            fleet.rig.push(Rig::default());
            fleet.stats.push(spec.stats);
        }

        let rngs = BoatRngs::new(count, self.seed);
        Ok((fleet, rngs))
    }
}
