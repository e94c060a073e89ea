//! `rg-core` — foundational types for the regatta race simulation.
//!
//! Every other `rg-*` crate depends on this one.  It has no `rg-*`
//! dependencies and only `rand` externally (plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                               |
//! |-----------------|--------------------------------------------------------|
//! | [`ids`]         | `BoatId`, `MarkId`, `ObstacleId`                       |
//! | [`geom`]        | `Vec2`, angle helpers, segment and polygon predicates  |
//! | [`hull`]        | hull outline, bow/stern points, world-space polygon    |
//! | [`units`]       | world-unit / knot / frame conversions                  |
//! | [`time`]        | `Tick`, `SimClock`                                     |
//! | [`rng`]         | `BoatRng` (per-boat), `SimRng` (global)                |
//! | [`event`]       | `RaceEvent`, `RaceEventKind`, `EventSink`              |
//!
//! # Conventions
//!
//! Heading 0 points to −y ("north") and grows clockwise; see
//! [`geom::forward`].  Wind directions are the direction the wind blows
//! *from*.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to public value types.      |

pub mod event;
pub mod geom;
pub mod hull;
pub mod ids;
pub mod rng;
pub mod time;
pub mod units;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use event::{DiscardEvents, EventSink, RaceEvent, RaceEventKind};
pub use geom::{Vec2, normalize_angle};
pub use ids::{BoatId, MarkId, ObstacleId};
pub use rng::{BoatRng, SimRng};
pub use time::{SimClock, Tick};
