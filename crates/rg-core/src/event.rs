//! Discrete race events and the sink they are pushed into.
//!
//! Subsystems (race state machine, collision system) push events into any
//! [`EventSink`]; the simulation buffers them per tick and forwards them to
//! its observer.  Events are fire-and-forget: nothing reads a return value.

use crate::{BoatId, MarkId, ObstacleId};

/// Payload-free discriminant of a [`RaceEvent`], for filtering and counting.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RaceEventKind {
    RaceStarted,
    Ocs,
    LegComplete,
    Finish,
    Penalty,
    BoatCollision,
    MarkCollision,
    BoundaryCollision,
    ObstacleCollision,
    Cutoff,
}

/// A discrete race event.  `time` is race time in seconds (negative during
/// the prestart countdown).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RaceEvent {
    RaceStarted { time: f64 },
    Ocs { boat: BoatId, time: f64 },
    /// `leg` is the leg just completed (0 = the start).
    LegComplete { boat: BoatId, leg: u32, time: f64 },
    Finish { boat: BoatId, time: f64 },
    Penalty { boat: BoatId, time: f64 },
    BoatCollision { boat: BoatId, other: BoatId, time: f64 },
    MarkCollision { boat: BoatId, mark: MarkId, time: f64 },
    BoundaryCollision { boat: BoatId, time: f64 },
    ObstacleCollision { boat: BoatId, obstacle: ObstacleId, time: f64 },
    /// The elapsed-time cutoff fired; `dnf` and `dns` count the boats it
    /// retired.
    Cutoff { time: f64, dnf: usize, dns: usize },
}

impl RaceEvent {
    pub fn kind(&self) -> RaceEventKind {
        match self {
            RaceEvent::RaceStarted { .. } => RaceEventKind::RaceStarted,
            RaceEvent::Ocs { .. } => RaceEventKind::Ocs,
            RaceEvent::LegComplete { .. } => RaceEventKind::LegComplete,
            RaceEvent::Finish { .. } => RaceEventKind::Finish,
            RaceEvent::Penalty { .. } => RaceEventKind::Penalty,
            RaceEvent::BoatCollision { .. } => RaceEventKind::BoatCollision,
            RaceEvent::MarkCollision { .. } => RaceEventKind::MarkCollision,
            RaceEvent::BoundaryCollision { .. } => RaceEventKind::BoundaryCollision,
            RaceEvent::ObstacleCollision { .. } => RaceEventKind::ObstacleCollision,
            RaceEvent::Cutoff { .. } => RaceEventKind::Cutoff,
        }
    }

    /// The boat the event is about, if any.
    pub fn boat(&self) -> Option<BoatId> {
        match *self {
            RaceEvent::Ocs { boat, .. }
            | RaceEvent::LegComplete { boat, .. }
            | RaceEvent::Finish { boat, .. }
            | RaceEvent::Penalty { boat, .. }
            | RaceEvent::BoatCollision { boat, .. }
            | RaceEvent::MarkCollision { boat, .. }
            | RaceEvent::BoundaryCollision { boat, .. }
            | RaceEvent::ObstacleCollision { boat, .. } => Some(boat),
            RaceEvent::RaceStarted { .. } | RaceEvent::Cutoff { .. } => None,
        }
    }
}

/// Anything that accepts race events.
pub trait EventSink {
    fn emit(&mut self, event: RaceEvent);
}

impl EventSink for Vec<RaceEvent> {
    #[inline]
    fn emit(&mut self, event: RaceEvent) {
        self.push(event);
    }
}

/// Sink that drops everything; for callers that only want the side effects.
pub struct DiscardEvents;

impl EventSink for DiscardEvents {
    #[inline]
    fn emit(&mut self, _event: RaceEvent) {}
}
