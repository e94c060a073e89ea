//! `rg-fleet` — storage for every boat in the race.
//!
//! The fleet is a Structure-of-Arrays store indexed by [`BoatId`]: one `Vec`
//! per concern (kinematics, rig, performance coefficients, helm kind).  Race
//! progress and AI memory live in their own crates' stores, indexed the same
//! way.
//!
//! | Module      | Contents                                              |
//! |-------------|-------------------------------------------------------|
//! | [`stats`]   | `BoatStats` performance coefficients, `PointOfSail`   |
//! | [`state`]   | `Kinematics`, `Rig`, `Tack`, `Helm`                   |
//! | [`store`]   | `Fleet` (SoA), `BoatRngs`                             |
//! | [`builder`] | `FleetBuilder`, `BoatSpec`                            |
//! | [`error`]   | `FleetError`, `FleetResult`                           |
//!
//! [`BoatId`]: rg_core::BoatId

pub mod builder;
pub mod error;
pub mod state;
pub mod stats;
pub mod store;


pub use builder::{BoatSpec, FleetBuilder};
pub use error::{FleetError, FleetResult};
pub use state::{Helm, Kinematics, Rig, Tack};
pub use stats::{BoatStats, PointOfSail};
pub use store::{BoatRngs, Fleet};
