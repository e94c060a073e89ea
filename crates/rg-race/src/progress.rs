//! Per-boat race progression.

/// How a boat's race ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FinishStatus {
    Finished,
    /// Started but did not finish before the cutoff.
    Dnf,
    /// Never started before the cutoff.
    Dns,
}

/// Where a boat is in the race.
///
/// ```text
/// Prestart ──start──▶ Leg(1) ──▶ … ──▶ Leg(N) ──finish──▶ Finished
///     │                  │                 │
///     └───────cutoff─────┴───────cutoff────┴──▶ Finished { Dns | Dnf }
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RaceProgress {
    /// Leg 0: not yet started.
    #[default]
    Prestart,
    Leg(u32),
    Finished { time: f64, status: FinishStatus },
}

impl RaceProgress {
    /// Current leg number; `None` once finished.
    #[inline]
    pub fn leg(self) -> Option<u32> {
        match self {
            RaceProgress::Prestart => Some(0),
            RaceProgress::Leg(n) => Some(n),
            RaceProgress::Finished { .. } => None,
        }
    }

    #[inline]
    pub fn is_finished(self) -> bool {
        matches!(self, RaceProgress::Finished { .. })
    }

    #[inline]
    pub fn status(self) -> Option<FinishStatus> {
        match self {
            RaceProgress::Finished { status, .. } => Some(status),
            _ => None,
        }
    }

    /// The progress after completing the current leg.  Completing the last
    /// leg is a finish, which needs a time: see [`finish`](Self::finish).
    #[inline]
    pub fn advance(self) -> RaceProgress {
        match self {
            RaceProgress::Prestart => RaceProgress::Leg(1),
            RaceProgress::Leg(n) => RaceProgress::Leg(n + 1),
            done => done,
        }
    }

    /// Finish with `status`.  A boat that already finished keeps its result.
    #[inline]
    pub fn finish(self, time: f64, status: FinishStatus) -> RaceProgress {
        match self {
            RaceProgress::Finished { .. } => self,
            _ => RaceProgress::Finished { time, status },
        }
    }

    /// The status a boat still racing at the cutoff gets.
    #[inline]
    pub fn cutoff_status(self) -> FinishStatus {
        match self {
            RaceProgress::Prestart => FinishStatus::Dns,
            _ => FinishStatus::Dnf,
        }
    }
}
