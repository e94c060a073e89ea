//! `rg-ai` — the autonomous skipper.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`skipper`]    | `Skipper` trait, `HoldCourse`                              |
//! | [`context`]    | `HelmContext<'a>` — read-only tick snapshot for deciding   |
//! | [`memory`]     | `AiMemory`, `AiLiveness`, `Unstick`, `StartPlan`           |
//! | [`risk`]       | CPA risk levels, stand-on/give-way role, `RiskLatch`       |
//! | [`cost`]       | `AvoidanceWeights` and the named cost terms                |
//! | [`avoidance`]  | candidate-heading search                                   |
//! | [`planner`]    | `RoutePlanner` — A* over obstacle vertices                 |
//! | [`navigation`] | where the boat wants to go this leg                        |
//! | [`strategy`]   | how to get there: fetch, tack choice, laylines             |
//! | [`start`]      | prestart hover and final approach                          |
//! | [`bot`]        | `BotSkipper` — the full decision pipeline                  |
//!
//! # Decision pipeline
//!
//! Every 0.1 s per boat (staggered by a random initial offset):
//!
//! 1. refresh the risk latch and the liveness watchdog;
//! 2. unstick override (wiggle, then clearance) or navigation + strategy;
//! 3. prestart override;
//! 4. collision avoidance;
//! 5. mark-contact escape.
//!
//! Between decisions the sim keeps applying the last command.
//!
//! # Thread safety
//!
//! `Skipper::decide` reads shared state through `&HelmContext` and writes only
//! the boat's own `AiMemory` and `BoatRng`, so the sim may run it for many
//! boats in parallel.

pub mod avoidance;
pub mod bot;
pub mod context;
pub mod cost;
pub mod memory;
pub mod navigation;
pub mod planner;
pub mod risk;
pub mod skipper;
pub mod start;
pub mod strategy;

#[cfg(test)]
mod tests;

pub use avoidance::{CANDIDATE_OFFSETS, choose_offset};
pub use bot::BotSkipper;
pub use context::HelmContext;
pub use cost::{AvoidanceWeights, Tiers};
pub use memory::{AiLiveness, AiMemory, MarkEscape, StartPlan, Unstick};
pub use planner::{RouteMemory, RoutePlanner};
pub use risk::{RiskLatch, RiskLevel, RiskRole, Threat, assess};
pub use skipper::{HoldCourse, Skipper};
pub use start::StartCommand;
