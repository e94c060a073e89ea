//! `rg-collision` — contacts between boats, marks and obstacles.
//!
//! Runs once per tick after every boat has moved.  Each contact is found
//! with a separating-axis test, resolved in the same tick (the shapes end
//! strictly apart) and slowed by a head-on friction term.  Contacts by boats
//! racing after the gun are also reported as a [`RaceEvent`] and penalized.
//!
//! | Module     | Contents                                             |
//! |------------|------------------------------------------------------|
//! | [`sat`]    | `Contact`, polygon/polygon and polygon/circle tests  |
//! | [`system`] | `CollisionSystem`, `CollisionConfig`, `MarkContact`  |
//!
//! [`RaceEvent`]: rg_core::RaceEvent

pub mod sat;
pub mod system;

#[cfg(test)]
mod tests;

pub use sat::{Contact, polygon_circle, polygon_polygon};
pub use system::{CollisionConfig, CollisionSystem, MarkContact};
