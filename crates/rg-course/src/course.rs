//! The course: marks, gates, boundary and obstacles, plus a builder.
//!
//! # Gate orientation
//!
//! A gate is an ordered mark pair `a → b`.  Its normal is
//! `n = (g.y, −g.x)` with `g = b − a`; a boat moving along `+n` crosses the
//! gate in direction `+1`.  Both gates are laid out so `+n` points upwind.
//!
//! # Legs
//!
//! | Leg          | Gate                 | Required direction |
//! |--------------|----------------------|--------------------|
//! | 0 (start)    | start line (0–1)     | +1 (upwind)        |
//! | odd          | windward gate (2–3)  | +1                 |
//! | even, ≥ 2    | leeward gate (0–1)   | −1 (downwind)      |

use rg_core::geom::forward;
use rg_core::{MarkId, ObstacleId, Vec2};

use crate::{CourseError, CourseResult, Mark, Obstacle};

/// Width of the start line on the standard course.
pub const STANDARD_LINE_WIDTH: f64 = 550.0;

/// Minimum boundary radius on the standard course.
pub const STANDARD_MIN_BOUNDARY: f64 = 3500.0;

// ── Gate ──────────────────────────────────────────────────────────────────────

/// Ordered pair of marks forming a line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gate {
    pub a: MarkId,
    pub b: MarkId,
}

/// The gate a leg must pass and the direction it must be crossed in.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GateSpec {
    pub gate: Gate,
    /// `+1.0` or `−1.0`.
    pub direction: f64,
}

// ── Boundary ──────────────────────────────────────────────────────────────────

/// Circular playable area.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Boundary {
    pub center: Vec2,
    pub radius: f64,
}

impl Boundary {
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        self.center.distance_sq(p) <= self.radius * self.radius
    }

    /// Project `p` back onto the circle if it lies outside.  The flag is
    /// `true` when a correction was made.
    pub fn clamp(&self, p: Vec2) -> (Vec2, bool) {
        let d = p - self.center;
        let dist = d.length();
        if dist <= self.radius {
            (p, false)
        } else {
            (self.center + d * (self.radius / dist), true)
        }
    }
}

// ── Course ────────────────────────────────────────────────────────────────────

/// Immutable course geometry for one race.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Course {
    pub marks: Vec<Mark>,
    pub start_line: Gate,
    pub windward_gate: Gate,
    pub boundary: Boundary,
    pub obstacles: Vec<Obstacle>,
    /// Distance from the start line to the windward gate.
    pub leg_length: f64,
}

impl Course {
    /// The standard windward/leeward layout for a wind blowing from
    /// `wind_direction`, with the windward gate `leg_length` upwind of the
    /// start line.
    pub fn standard(wind_direction: f64, leg_length: f64) -> Course {
        let up = forward(wind_direction);
        let right = Vec2::new(-up.y, up.x);
        let half = right * (STANDARD_LINE_WIDTH * 0.5);
        let windward = up * leg_length;

        Course {
            marks: vec![
                Mark::new(-half),
                Mark::new(half),
                Mark::new(windward - half),
                Mark::new(windward + half),
            ],
            start_line: Gate { a: MarkId(0), b: MarkId(1) },
            windward_gate: Gate { a: MarkId(2), b: MarkId(3) },
            boundary: Boundary {
                center: windward * 0.5,
                radius: STANDARD_MIN_BOUNDARY.max(leg_length + 500.0),
            },
            obstacles: Vec::new(),
            leg_length,
        }
    }

    /// Same course with `obstacles` added.
    pub fn with_obstacles(mut self, obstacles: Vec<Obstacle>) -> Course {
        self.obstacles = obstacles;
        self
    }

    #[inline]
    pub fn mark(&self, id: MarkId) -> &Mark {
        &self.marks[id.index()]
    }

    #[inline]
    pub fn obstacle(&self, id: ObstacleId) -> &Obstacle {
        &self.obstacles[id.index()]
    }

    pub fn obstacle_ids(&self) -> impl Iterator<Item = ObstacleId> + use<> {
        ObstacleId::range(self.obstacles.len())
    }

    /// End points of `gate`.
    #[inline]
    pub fn gate_points(&self, gate: Gate) -> (Vec2, Vec2) {
        (self.mark(gate.a).position, self.mark(gate.b).position)
    }

    #[inline]
    pub fn gate_center(&self, gate: Gate) -> Vec2 {
        let (a, b) = self.gate_points(gate);
        a.midpoint(b)
    }

    /// Unnormalized gate normal `(g.y, −g.x)`.
    #[inline]
    pub fn gate_normal(&self, gate: Gate) -> Vec2 {
        let (a, b) = self.gate_points(gate);
        (b - a).perp()
    }

    /// Unit vector pointing from the start line toward the windward gate.
    pub fn upwind(&self) -> Vec2 {
        self.gate_normal(self.start_line).normalized()
    }

    /// Gate and required crossing direction for `leg`.
    pub fn gate_for_leg(&self, leg: u32) -> GateSpec {
        if leg == 0 {
            GateSpec { gate: self.start_line, direction: 1.0 }
        } else if leg % 2 == 1 {
            GateSpec { gate: self.windward_gate, direction: 1.0 }
        } else {
            GateSpec { gate: self.start_line, direction: -1.0 }
        }
    }

    /// Marks whose zones matter on `leg`; `None` on the start leg.
    pub fn zone_gate(&self, leg: u32) -> Option<Gate> {
        match leg {
            0 => None,
            l if l % 2 == 1 => Some(self.windward_gate),
            _ => Some(self.start_line),
        }
    }

    /// Legs that sail toward the windward gate are beats.
    #[inline]
    pub fn is_beat(leg: u32) -> bool {
        leg == 0 || leg % 2 == 1
    }
}

// ── CourseBuilder ─────────────────────────────────────────────────────────────

/// Assemble a custom [`Course`] and validate it.
///
/// ```rust,ignore
/// let course = CourseBuilder::new(Boundary { center, radius: 4_000.0 })
///     .start_line(pin, committee)
///     .windward_gate(left, right)
///     .obstacle(Obstacle::regular(island, 200.0, 9))
///     .build()?;
/// ```
pub struct CourseBuilder {
    boundary: Boundary,
    start: Option<(Vec2, Vec2)>,
    windward: Option<(Vec2, Vec2)>,
    obstacles: Vec<Obstacle>,
}

impl CourseBuilder {
    pub fn new(boundary: Boundary) -> Self {
        Self { boundary, start: None, windward: None, obstacles: Vec::new() }
    }

    /// Start line `a → b`, ordered so the gate normal points upwind.
    pub fn start_line(mut self, a: Vec2, b: Vec2) -> Self {
        self.start = Some((a, b));
        self
    }

    /// Windward gate `a → b`, same orientation as the start line.
    pub fn windward_gate(mut self, a: Vec2, b: Vec2) -> Self {
        self.windward = Some((a, b));
        self
    }

    pub fn obstacle(mut self, obstacle: Obstacle) -> Self {
        self.obstacles.push(obstacle);
        self
    }

    pub fn build(self) -> CourseResult<Course> {
        if !(self.boundary.radius > 0.0) {
            return Err(CourseError::InvalidBoundary(self.boundary.radius));
        }
        let (s0, s1) = self.start.ok_or(CourseError::MissingGate("start line"))?;
        let (w0, w1) = self.windward.ok_or(CourseError::MissingGate("windward gate"))?;

        for (what, a, b) in [("start line", s0, s1), ("windward gate", w0, w1)] {
            let separation = a.distance(b);
            if separation < 2.0 * crate::MARK_RADIUS {
                return Err(CourseError::DegenerateGate { what, separation });
            }
        }
        for (index, o) in self.obstacles.iter().enumerate() {
            if o.outline.len() < 3 {
                return Err(CourseError::DegenerateObstacle { index, vertices: o.outline.len() });
            }
        }

        let leg_length = s0.midpoint(s1).distance(w0.midpoint(w1));
        if !(leg_length > 0.0) {
            return Err(CourseError::InvalidLegLength(leg_length));
        }

        Ok(Course {
            marks: vec![Mark::new(s0), Mark::new(s1), Mark::new(w0), Mark::new(w1)],
            start_line: Gate { a: MarkId(0), b: MarkId(1) },
            windward_gate: Gate { a: MarkId(2), b: MarkId(3) },
            boundary: self.boundary,
            obstacles: self.obstacles,
            leg_length,
        })
    }
}
