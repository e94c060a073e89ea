//! Observer trait for race events and progress reporting.

use rg_core::{RaceEvent, Tick};
use rg_race::Standing;

/// Callbacks invoked by [`Sim::tick`][crate::Sim::tick].
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — event log
///
/// ```rust,ignore
/// struct EventLog(Vec<RaceEvent>);
///
/// impl RaceObserver for EventLog {
///     fn on_event(&mut self, event: &RaceEvent) {
///         self.0.push(event.clone());
///     }
/// }
/// ```
pub trait RaceObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once per event, in the order the subsystems emitted them, after
    /// the tick's state updates are complete.
    fn on_event(&mut self, _event: &RaceEvent) {}

    /// Called at the end of each tick.  `race_time` is negative before the gun.
    fn on_tick_end(&mut self, _tick: Tick, _race_time: f64) {}

    /// Called once, on the tick the race ends.
    fn on_race_end(&mut self, _standings: &[Standing]) {}
}

/// A [`RaceObserver`] that does nothing.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopObserver;

impl RaceObserver for NoopObserver {}
