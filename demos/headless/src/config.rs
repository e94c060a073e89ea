//! Run settings, loaded from an optional TOML file.
//!
//! ```toml
//! boats      = 8
//! leg_length = 3000.0
//! output     = "results.json"
//!
//! [sim]
//! seed = 7
//!
//! [sim.wind]
//! base_direction = 0.3
//! base_speed     = 14.0
//!
//! [[islands]]
//! x      = 150.0
//! y      = -1500.0
//! radius = 180.0
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

use rg_core::Vec2;
use rg_course::{Course, CourseBuilder, Obstacle};
use rg_sim::SimConfig;

use crate::roster::ROSTER;

const DEFAULT_LEG_LENGTH: f64 = 4_000.0;
const DEFAULT_DT:         f64 = 0.05;
const DEFAULT_MAX_TICKS:  u64 = 50_000;
const DEFAULT_SIDES:      usize = 9;

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub sim: SimConfig,
    /// Start line to windward gate, world units.
    pub leg_length: f64,
    /// Fleet size, taken from the front of the roster.
    pub boats: usize,
    /// Step length handed to every tick, seconds.
    pub dt: f64,
    pub max_ticks: u64,
    pub islands: Vec<IslandConfig>,
    /// Results file; stdout when absent.
    pub output: Option<PathBuf>,
}

/// Regular polygon island in world coordinates.
#[derive(Clone, Debug, Deserialize)]
pub struct IslandConfig {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    #[serde(default = "default_sides")]
    pub sides: usize,
}

fn default_sides() -> usize {
    DEFAULT_SIDES
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            sim:        SimConfig::default(),
            leg_length: DEFAULT_LEG_LENGTH,
            boats:      ROSTER.len(),
            dt:         DEFAULT_DT,
            max_ticks:  DEFAULT_MAX_TICKS,
            islands:    Vec::new(),
            output:     None,
        }
    }
}

impl RunConfig {
    /// Defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<RunConfig> {
        let Some(path) = path else {
            return Ok(RunConfig::default());
        };
        let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let config = toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            (1..=ROSTER.len()).contains(&self.boats),
            "boats must be between 1 and {}, got {}",
            ROSTER.len(),
            self.boats,
        );
        ensure!(self.dt > 0.0 && self.dt.is_finite(), "dt must be positive, got {}", self.dt);
        ensure!(self.max_ticks > 0, "max_ticks must be positive");
        Ok(())
    }

    /// Standard windward/leeward layout for the configured wind, plus the
    /// islands.
    pub fn course(&self) -> Result<Course> {
        let standard = Course::standard(self.sim.wind.base_direction, self.leg_length);
        let (pin, committee) = standard.gate_points(standard.start_line);
        let (left, right) = standard.gate_points(standard.windward_gate);

        let builder = self.islands.iter().fold(
            CourseBuilder::new(standard.boundary).start_line(pin, committee).windward_gate(left, right),
            |builder, island| {
                builder.obstacle(Obstacle::regular(Vec2::new(island.x, island.y), island.radius, island.sides))
            },
        );
        Ok(builder.build()?)
    }
}
