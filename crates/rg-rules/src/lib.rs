//! `rg-rules` — who has right of way.
//!
//! The engine arbitrates every pair of boats with a fixed cascade modelled
//! on part 2 of the racing rules:
//!
//! | Order | Rule | Situation                                              |
//! |-------|------|--------------------------------------------------------|
//! | 1     | 21   | a boat returning (over early, or serving a penalty)    |
//! | 2     | 13   | a boat tacking                                         |
//! | 3     | 18   | mark-room inside the zone (alongside, not instead of)  |
//! | 4     | 10   | opposite tacks: port keeps clear                       |
//! | 5     | 11   | same tack, overlapped: windward keeps clear            |
//! | 6     | 12   | same tack, not overlapped: clear astern keeps clear    |
//!
//! Limitations on the right-of-way boat (rules 15, 16.2 and 17) are reported
//! as [`Constraint`]s on the decision.
//!
//! | Module         | Contents                                                |
//! |----------------|---------------------------------------------------------|
//! | [`view`]       | `BoatView`, `RaceView` — the per-tick snapshot rules read |
//! | [`predicates`] | `clear_astern`, `overlapped`, `in_zone`, `leeward_of`   |
//! | [`table`]      | `InteractionTable`, `PairInteraction`, `ZoneState`      |
//! | [`decision`]   | `RowDecision`, `Rule`, `Constraint`                     |
//! | [`engine`]     | `RightOfWayEngine`, `RulesConfig`                       |
//! | [`risk`]       | closest point of approach                               |
//!
//! # Single writer
//!
//! [`RightOfWayEngine::update`] is the only code that mutates the
//! [`InteractionTable`]; it runs once per tick after collisions.
//! [`RightOfWayEngine::evaluate`] is pure and may be called from the AI
//! phase concurrently.

pub mod decision;
pub mod engine;
pub mod predicates;
pub mod risk;
pub mod table;
pub mod view;


pub use decision::{Constraint, RowDecision, Rule};
pub use engine::{RightOfWayEngine, RulesConfig};
pub use risk::{Cpa, closest_approach};
pub use table::{InteractionTable, PairInteraction, ZoneBasis, ZoneSnapshot, ZoneState};
pub use view::{BoatView, RaceView};
