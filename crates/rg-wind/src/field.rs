//! The wind field.

use std::f64::consts::TAU;

use tracing::trace;

use rg_core::geom::{downwind, forward, normalize_angle};
use rg_core::{SimRng, Vec2};
use rg_course::{Boundary, Course};

use crate::noise::fractal_noise;
use crate::{Gust, GustKind, ShiftProfile, WindConfig, WindResult};

/// Extra radius beyond the boundary within which features are spawned.
const SPAWN_MARGIN: f64 = 500.0;

/// Obstacle wakes stretch this many obstacle radii downwind.
const WAKE_LENGTH_RADII: f64 = 5.0;

/// Distance downwind over which the wake width doubles.
const WAKE_SPREAD: f64 = 500.0;

/// Speed removed at the core of a wake.
const WAKE_DEPTH: f64 = 0.7;

/// Floor on the breathing base speed, knots.
const MIN_BASE_SPEED: f64 = 2.0;

/// Local wind at a point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WindSample {
    /// Direction the wind blows from, radians in `(−π, π]`.
    pub direction: f64,
    /// Knots.
    pub speed: f64,
}

/// An obstacle as the wind sees it.
#[derive(Copy, Clone, Debug)]
struct WakeSource {
    center: Vec2,
    radius: f64,
}

pub struct WindField {
    config: WindConfig,
    profile: ShiftProfile,
    boundary: Boundary,
    wakes: Vec<WakeSource>,

    time: f64,
    oscillator: f64,
    /// Current offset from the base direction, radians.
    shift: f64,
    direction: f64,
    speed: f64,

    gusts: Vec<Gust>,
}

impl WindField {
    /// Validate `config` and build a field over `course`, seeding an initial
    /// gust population at random stages of life.
    pub fn new(config: WindConfig, course: &Course, rng: &mut SimRng) -> WindResult<Self> {
        config.validate()?;
        let mut field = WindField {
            profile: ShiftProfile::for_shiftiness(config.shiftiness),
            boundary: course.boundary,
            wakes: course
                .obstacles
                .iter()
                .map(|o| WakeSource { center: o.center, radius: o.radius })
                .collect(),
            time: 0.0,
            oscillator: 0.0,
            shift: 0.0,
            direction: normalize_angle(config.base_direction),
            speed: config.base_speed,
            gusts: Vec::new(),
            config,
        };
        while field.gusts.len() < field.config.target_gust_count() {
            field.spawn(rng, true);
        }
        Ok(field)
    }

    #[inline]
    pub fn config(&self) -> &WindConfig {
        &self.config
    }

    /// Current course-wide wind direction (from), radians.
    #[inline]
    pub fn direction(&self) -> f64 {
        self.direction
    }

    /// Current course-wide wind speed, knots.
    #[inline]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// The configured mean speed the breathing oscillates around.
    #[inline]
    pub fn base_speed(&self) -> f64 {
        self.config.base_speed
    }

    #[inline]
    pub fn gusts(&self) -> &[Gust] {
        &self.gusts
    }

    /// Advance the base oscillation and the gust population by `dt` seconds.
    pub fn advance(&mut self, dt: f64, rng: &mut SimRng) {
        self.time += dt;
        if !self.config.is_static() {
            self.advance_base(dt);
        }

        while self.gusts.len() < self.config.target_gust_count() {
            self.spawn(rng, false);
        }
        let (dir, speed) = (self.direction, self.speed);
        self.gusts.retain_mut(|g| g.step(dt, dir, speed));
    }

    fn advance_base(&mut self, dt: f64) {
        let p = self.profile;
        self.oscillator += dt * TAU / p.period_secs;

        let noise = fractal_noise(self.time * 0.05) * 1.5;
        let target = p.amplitude_deg * (self.oscillator + noise).sin();
        let current = self.shift.to_degrees();
        let diff = target - current;
        let max_step = p.slew_deg_per_sec * dt;
        let next = if diff.abs() < max_step { target } else { current + max_step.copysign(diff) };

        self.shift = next.to_radians();
        self.direction = normalize_angle(self.config.base_direction + self.shift);

        let band = 0.05 + self.config.variability * 0.25;
        let breath = fractal_noise(self.time * 0.2 + 50.0);
        self.speed = (self.config.base_speed * (1.0 + breath * band)).max(MIN_BASE_SPEED);
    }

    fn spawn(&mut self, rng: &mut SimRng, mid_life: bool) {
        let reach = self.boundary.radius + SPAWN_MARGIN;
        let angle = rng.unit() * TAU;
        let dist = rng.unit().sqrt() * reach;
        let at = self.boundary.center + forward(angle) * dist;
        let kind = if rng.gen_bool(self.config.gust_bias) { GustKind::Gust } else { GustKind::Lull };

        let gust = Gust::spawn(kind, at, self.direction, self.speed, &self.config, rng, mid_life);
        trace!(?kind, x = at.x, y = at.y, duration = gust.duration, "spawned wind feature");
        self.gusts.push(gust);
    }

    /// Wind at `p`.  Pure: no state is touched.
    pub fn sample_at(&self, p: Vec2) -> WindSample {
        let mut v = forward(self.direction) * self.speed;
        for g in &self.gusts {
            if let Some(add) = g.contribution(p, self.direction) {
                v += add;
            }
        }

        let factor = self.wake_factor(p);
        WindSample {
            direction: normalize_angle(v.heading()),
            speed: v.length() * factor,
        }
    }

    /// Multiplicative speed factor from the strongest obstacle wake at `p`.
    pub fn wake_factor(&self, p: Vec2) -> f64 {
        let flow = downwind(self.direction);
        let mut factor: f64 = 1.0;
        for w in &self.wakes {
            let d = p - w.center;
            let along = d.dot(flow);
            if along <= 0.0 {
                continue;
            }
            let cross = d.cross(flow).abs();
            let width = w.radius * (1.0 + along / WAKE_SPREAD);
            let length = w.radius * WAKE_LENGTH_RADII;
            if cross < width && along < length {
                let shadow = (1.0 - cross / width) * (1.0 - along / length) * WAKE_DEPTH;
                factor = factor.min(1.0 - shadow);
            }
        }
        factor
    }
}
