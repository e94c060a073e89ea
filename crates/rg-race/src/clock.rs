//! Race clock.

use tracing::debug;

/// Race-wide phase.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RacePhase {
    /// Counting down to the gun.
    Prestart,
    Racing,
    /// Cutoff reached or every boat finished.
    Finished,
}

#[derive(Clone, Debug)]
pub struct RaceClock {
    pub phase: RacePhase,
    /// Seconds to the gun.
    pub countdown: f64,
    /// Seconds since the gun.
    pub elapsed: f64,
    /// Elapsed time at which the race is called.
    pub cutoff: f64,
}

impl RaceClock {
    pub fn new(prestart_secs: f64, cutoff: f64) -> Self {
        Self { phase: RacePhase::Prestart, countdown: prestart_secs, elapsed: 0.0, cutoff }
    }

    /// Race time: negative before the gun.
    #[inline]
    pub fn now(&self) -> f64 {
        match self.phase {
            RacePhase::Prestart => -self.countdown,
            _ => self.elapsed,
        }
    }

    #[inline]
    pub fn is_racing(&self) -> bool {
        self.phase == RacePhase::Racing
    }

    /// Advance by `dt`.  Returns the new phase when it changes.
    pub fn advance(&mut self, dt: f64) -> Option<RacePhase> {
        match self.phase {
            RacePhase::Prestart => {
                self.countdown -= dt;
                if self.countdown <= 0.0 {
                    // Time past the gun counts toward the race.
                    self.elapsed = 0.0 - self.countdown;
                    self.countdown = 0.0;
                    self.phase = RacePhase::Racing;
                    debug!(elapsed = self.elapsed, "gun");
                    return Some(RacePhase::Racing);
                }
                None
            }
            RacePhase::Racing => {
                self.elapsed += dt;
                if self.elapsed >= self.cutoff {
                    self.phase = RacePhase::Finished;
                    return Some(RacePhase::Finished);
                }
                None
            }
            RacePhase::Finished => None,
        }
    }
}
