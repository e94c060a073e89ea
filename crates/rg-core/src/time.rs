//! Simulation time.
//!
//! The race is driven by a variable `dt` supplied by the caller, so there is
//! no fixed tick duration.  `Tick` counts calls to `tick(dt)` and `SimClock`
//! accumulates the simulated seconds those calls covered.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// Number of completed simulation steps.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    #[inline]
    pub fn next(self) -> Tick {
        Tick(self.0 + 1)
    }

    /// Steps elapsed from `earlier` to `self` (saturating).
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0.saturating_sub(earlier.0)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Step counter plus accumulated simulated seconds.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    pub current_tick: Tick,
    /// Simulated seconds since the clock was created.
    pub elapsed_secs: f64,
    /// `dt` of the most recent step.
    pub last_dt: f64,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one step of `dt` seconds.
    #[inline]
    pub fn advance(&mut self, dt: f64) {
        self.current_tick = self.current_tick.next();
        self.elapsed_secs += dt;
        self.last_dt = dt;
    }

    /// Elapsed time as `(minutes, seconds)` for log lines.
    pub fn elapsed_ms(&self) -> (u64, u32) {
        let total = self.elapsed_secs.max(0.0) as u64;
        (total / 60, (total % 60) as u32)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (m, s) = self.elapsed_ms();
        write!(f, "{} ({:02}:{:02})", self.current_tick, m, s)
    }
}
