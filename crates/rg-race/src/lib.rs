//! `rg-race` — who is where in the race.
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`config`]   | `RaceConfig`                                                 |
//! | [`progress`] | `RaceProgress`, `FinishStatus` and their transitions         |
//! | [`state`]    | `RaceState` (per boat), `Penalty`, `LegStats`                |
//! | [`clock`]    | `RaceClock`, `RacePhase`                                     |
//! | [`machine`]  | `RaceStateMachine` — crossings, zones, penalties, cutoff     |
//! | [`results`]  | `Standing`, result ordering                                  |
//! | [`error`]    | `RaceError`, `RaceResult<T>`                                 |
//!
//! # Course legs
//!
//! Leg 0 is the start: cross the start line upwind after the gun.  Odd legs
//! round the windward gate, even legs the leeward gate (the start line
//! marks).  A gate is rounded by passing through it in the required
//! direction and then crossing either of its extensions back the other way.
//! The last leg finishes by passing through its gate.

pub mod clock;
pub mod config;
pub mod error;
pub mod machine;
pub mod progress;
pub mod results;
pub mod state;


pub use clock::{RaceClock, RacePhase};
pub use config::RaceConfig;
pub use error::{RaceError, RaceResult};
pub use machine::RaceStateMachine;
pub use progress::{FinishStatus, RaceProgress};
pub use results::Standing;
pub use state::{LegStats, Penalty, RaceState};
