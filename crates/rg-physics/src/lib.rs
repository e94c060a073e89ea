//! `rg-physics` — how a boat moves.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                    |
//! |----------------|-------------------------------------------------------------|
//! | [`polar`]      | `PolarModel` — target speed by wind angle and wind speed    |
//! | [`planing`]    | `PlaningState` — entry/exit hysteresis and its multipliers  |
//! | [`air`]        | disturbed-air cone behind upwind boats                      |
//! | [`command`]    | `HelmCommand` — what the helm asks of the boat              |
//! | [`current`]    | `Current` — uniform water drift                             |
//! | [`integrator`] | `PhysicsIntegrator` — one boat, one tick                    |
//! | [`store`]      | `PhysicsStore` — per-boat `Dynamics`                        |
//! | [`engine`]     | `PhysicsEngine` — integrator + store, the fleet-wide pass   |
//! | [`error`]      | `PolarError`, `PolarResult<T>`                              |
//!
//! # Step order
//!
//! Each tick, for each boat: turn, sample wind, slew boom and trim, deploy or
//! drop the spinnaker, compute the effective wind, look up the target speed,
//! blend toward it, apply drag and floors, then integrate position and clamp
//! to the course boundary.  See [`PhysicsIntegrator::step`].

pub mod air;
pub mod command;
pub mod current;
pub mod engine;
pub mod error;
pub mod integrator;
pub mod planing;
pub mod polar;
pub mod store;


pub use command::HelmCommand;
pub use current::Current;
pub use engine::PhysicsEngine;
pub use error::{PolarError, PolarResult};
pub use integrator::{PhysicsIntegrator, StepReport};
pub use planing::PlaningState;
pub use polar::PolarModel;
pub use store::{Dynamics, PhysicsStore};
