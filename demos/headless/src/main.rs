//! `headless` — one fleet race with no display, results written as JSON.
//!
//! Up to ten AI skippers line up below the start line of a standard
//! windward/leeward course, sail the prestart, and race until every boat
//! finishes or the cutoff retires the rest.  Settings come from an optional
//! TOML file (see `config.rs`); without one the defaults run a ten-boat race
//! on a 4000-unit course.
//!
//! Run with:
//!   cargo run -p headless --release -- [race.toml]
//!
//! `RUST_LOG=headless=debug` also logs contacts and progress.

mod config;
mod report;
mod roster;

#[cfg(test)]
mod tests;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use rg_ai::BotSkipper;
use rg_sim::SimBuilder;

use config::RunConfig;
use report::{EventLog, RaceReport};

const DEFAULT_FILTER: &str = "headless=info,rg_sim=info";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)))
        .with_writer(std::io::stderr)
        .init();

    // ── Setup ─────────────────────────────────────────────────────────────
    let path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = RunConfig::load(path.as_deref())?;
    config.validate()?;

    let course = config.course()?;
    let boats = roster::line_up(&course, config.sim.wind.base_direction, config.boats);
    let names = boats.iter().map(|b| b.name.clone()).collect();

    let mut sim = SimBuilder::new(config.sim.clone(), course, boats, BotSkipper::default())
        .observer(EventLog::new(names))
        .build()?;

    // ── Race ──────────────────────────────────────────────────────────────
    let started = Instant::now();
    let ticks = sim.run_until_over(config.dt, config.max_ticks);
    let finished = sim.is_over();
    if !finished {
        warn!(ticks, max_ticks = config.max_ticks, "tick limit reached before the race ended");
    }
    info!(
        ticks,
        race_time = format_args!("{:.1}", sim.race().now()),
        wall_ms = started.elapsed().as_millis() as u64,
        "done",
    );

    // ── Results ───────────────────────────────────────────────────────────
    let standings = sim.results();
    let report = RaceReport::new(config.sim.seed, finished, &sim.observer, &standings);
    let json = serde_json::to_string_pretty(&report)?;
    match &config.output {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "results written");
        }
        None => println!("{json}"),
    }
    Ok(())
}
