//! Event logging and the JSON results document.

use serde::Serialize;
use tracing::{debug, info, warn};

use rg_core::{BoatId, RaceEvent, Tick};
use rg_race::Standing;
use rg_sim::RaceObserver;

/// Log a progress line every N ticks.
const PROGRESS_INTERVAL: u64 = 2_000;

// ── Observer ──────────────────────────────────────────────────────────────────

/// Logs every event under the boats' names and keeps the full log for the
/// report.
pub struct EventLog {
    names:         Vec<String>,
    pub events:    Vec<RaceEvent>,
    pub ticks:     u64,
    pub race_time: f64,
}

impl EventLog {
    pub fn new(names: Vec<String>) -> Self {
        Self { names, events: Vec::new(), ticks: 0, race_time: 0.0 }
    }

    pub fn name(&self, boat: BoatId) -> &str {
        self.names.get(boat.index()).map_or("?", String::as_str)
    }
}

impl RaceObserver for EventLog {
    fn on_event(&mut self, event: &RaceEvent) {
        match *event {
            RaceEvent::RaceStarted { time } => info!(time, "gun"),
            RaceEvent::Ocs { boat, time } => warn!(boat = self.name(boat), time, "over early"),
            RaceEvent::LegComplete { boat, leg, time } => {
                info!(boat = self.name(boat), leg, time = format_args!("{time:.1}"), "leg complete");
            }
            RaceEvent::Finish { boat, time } => {
                info!(boat = self.name(boat), time = format_args!("{time:.1}"), "finished");
            }
            RaceEvent::Penalty { boat, time } => info!(boat = self.name(boat), time, "penalty"),
            RaceEvent::BoatCollision { boat, other, time } => {
                debug!(boat = self.name(boat), other = self.name(other), time, "boat contact");
            }
            RaceEvent::MarkCollision { boat, mark, time } => {
                debug!(boat = self.name(boat), %mark, time, "mark contact");
            }
            RaceEvent::BoundaryCollision { boat, time } => debug!(boat = self.name(boat), time, "boundary"),
            RaceEvent::ObstacleCollision { boat, obstacle, time } => {
                debug!(boat = self.name(boat), %obstacle, time, "aground");
            }
            RaceEvent::Cutoff { time, dnf, dns } => info!(time, dnf, dns, "cutoff"),
        }
        self.events.push(event.clone());
    }

    fn on_tick_end(&mut self, tick: Tick, race_time: f64) {
        self.ticks = tick.0 + 1;
        self.race_time = race_time;
        if tick.0 % PROGRESS_INTERVAL == 0 {
            debug!(tick = tick.0, race_time = format_args!("{race_time:.1}"), "progress");
        }
    }

    fn on_race_end(&mut self, standings: &[Standing]) {
        for s in standings {
            info!(
                position = s.position,
                boat = self.name(s.boat),
                status = ?s.status,
                time = ?s.time,
                legs = s.legs_completed,
                penalties = s.penalties,
                "result",
            );
        }
    }
}

// ── Report ────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ResultRow<'a> {
    pub name: &'a str,
    #[serde(flatten)]
    pub standing: &'a Standing,
}

/// Everything written to the results file.
#[derive(Serialize)]
pub struct RaceReport<'a> {
    pub seed:      u64,
    pub finished:  bool,
    pub ticks:     u64,
    pub race_time: f64,
    pub results:   Vec<ResultRow<'a>>,
    pub events:    &'a [RaceEvent],
}

impl<'a> RaceReport<'a> {
    pub fn new(seed: u64, finished: bool, log: &'a EventLog, standings: &'a [Standing]) -> Self {
        Self {
            seed,
            finished,
            ticks:     log.ticks,
            race_time: log.race_time,
            results:   standings.iter().map(|s| ResultRow { name: log.name(s.boat), standing: s }).collect(),
            events:    &log.events,
        }
    }
}
