//! `rg-wind` — the wind field.
//!
//! [`WindField::sample_at`] is pure: physics and AI planning both call it
//! freely while the field is shared immutably.  All evolution happens in
//! [`WindField::advance`], which the simulation calls once per tick before
//! any boat reads the wind.
//!
//! | Module     | Contents                                            |
//! |------------|-----------------------------------------------------|
//! | [`config`] | `WindConfig`, shift presets                         |
//! | [`noise`]  | deterministic fractal noise                         |
//! | [`gust`]   | `Gust`, `GustKind`, spawning                        |
//! | [`field`]  | `WindField`, `WindSample`                           |
//! | [`error`]  | `WindError`, `WindResult`                           |

pub mod config;
pub mod error;
pub mod field;
pub mod gust;
pub mod noise;


pub use config::{ShiftProfile, WindConfig};
pub use error::{WindError, WindResult};
pub use field::{WindField, WindSample};
pub use gust::{Gust, GustKind};
