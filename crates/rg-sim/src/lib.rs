//! `rg-sim` — tick orchestrator for the regatta race simulation.
//!
//! # Tick order
//!
//! ```text
//! tick(dt):
//!   ① Clamp      — dt to (0, config.max_dt].
//!   ② Clock      — race countdown / elapsed time; gun and cutoff fire here.
//!   ③ Wind       — base oscillation and gusts advance.
//!   ④ Decide     — Skipper::decide for every autonomous boat against one
//!                  read-only snapshot (parallel with the `parallel` feature).
//!   ⑤ Physics    — disturbed air, then each boat steps in ascending BoatId.
//!   ⑥ Race       — legs, zones, OCS and penalties from the new positions.
//!   ⑦ Collisions — every contact found, separated and penalized.
//!   ⑧ Rules      — interaction-table bookkeeping for the next tick.
//!   ⑨ Events     — buffered RaceEvents forwarded to the observer.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the decision phase on Rayon's thread pool.        |
//! | `serde`    | `SimConfig` (and everything in it) (de)serializes.     |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use rg_ai::BotSkipper;
//! use rg_course::Course;
//! use rg_sim::{SimBuilder, SimConfig};
//!
//! let course = Course::standard(0.0, 4_000.0);
//! let mut sim = SimBuilder::new(SimConfig::default(), course, boats, BotSkipper::default())
//!     .build()?;
//! sim.run_until_over(1.0 / 60.0, 100_000);
//! for line in sim.results() {
//!     println!("{} {}", line.position, sim.fleet.name(line.boat));
//! }
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use config::SimConfig;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, RaceObserver};
pub use sim::Sim;
