//! Planar geometry in world units.
//!
//! The world is a flat plane with `y` growing downward (screen convention).
//! Headings are measured clockwise from −y, so a heading of `0` points
//! "north" and `π/2` points along +x.  [`forward`] is the only place that
//! convention is encoded; everything else goes through it.

use std::f64::consts::{PI, TAU};
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

// ── Vec2 ──────────────────────────────────────────────────────────────────────

/// A 2-D vector / point in world units.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn dot(self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// z-component of the 3-D cross product.
    #[inline]
    pub fn cross(self, other: Vec2) -> f64 {
        self.x * other.y - self.y * other.x
    }

    #[inline]
    pub fn length_sq(self) -> f64 {
        self.dot(self)
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.length_sq().sqrt()
    }

    #[inline]
    pub fn distance(self, other: Vec2) -> f64 {
        (other - self).length()
    }

    #[inline]
    pub fn distance_sq(self, other: Vec2) -> f64 {
        (other - self).length_sq()
    }

    /// Unit vector in the same direction, or `ZERO` for a (near) zero vector.
    pub fn normalized(self) -> Vec2 {
        let len = self.length();
        if len < 1e-12 { Vec2::ZERO } else { self * (1.0 / len) }
    }

    /// Rotate counter-clockwise in the maths sense (clockwise on screen).
    #[inline]
    pub fn rotated(self, angle: f64) -> Vec2 {
        let (s, c) = angle.sin_cos();
        Vec2::new(self.x * c - self.y * s, self.x * s + self.y * c)
    }

    /// Left-hand perpendicular `(y, −x)`.
    #[inline]
    pub fn perp(self) -> Vec2 {
        Vec2::new(self.y, -self.x)
    }

    /// Heading (in the crate's convention) of this vector.
    #[inline]
    pub fn heading(self) -> f64 {
        self.x.atan2(-self.y)
    }

    #[inline]
    pub fn midpoint(self, other: Vec2) -> Vec2 {
        Vec2::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }

    #[inline]
    pub fn lerp(self, other: Vec2, t: f64) -> Vec2 {
        self + (other - self) * t
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    #[inline]
    fn sub_assign(&mut self, rhs: Vec2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    #[inline]
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

// ── Angles ────────────────────────────────────────────────────────────────────

/// Unit vector pointing along `heading`.
#[inline]
pub fn forward(heading: f64) -> Vec2 {
    Vec2::new(heading.sin(), -heading.cos())
}

/// Unit vector of the air *flow* for a wind blowing from `from_direction`.
#[inline]
pub fn downwind(from_direction: f64) -> Vec2 {
    -forward(from_direction)
}

/// Wrap an angle into `(−π, π]`.
pub fn normalize_angle(angle: f64) -> f64 {
    let mut a = angle % TAU;
    if a <= -PI {
        a += TAU;
    } else if a > PI {
        a -= TAU;
    }
    a
}

/// Signed shortest rotation taking `from` to `to`.
#[inline]
pub fn angle_diff(to: f64, from: f64) -> f64 {
    normalize_angle(to - from)
}

/// Rotate `current` toward `target` by at most `max_step` radians.
pub fn turn_toward(current: f64, target: f64, max_step: f64) -> f64 {
    let diff = angle_diff(target, current);
    if diff.abs() <= max_step {
        normalize_angle(target)
    } else {
        normalize_angle(current + max_step.copysign(diff))
    }
}

#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

// ── Segments ──────────────────────────────────────────────────────────────────

/// Proper intersection of segments `p1→p2` and `p3→p4`, endpoints included.
///
/// Parallel segments never intersect.
pub fn segments_intersect(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2) -> bool {
    let d = (p4.y - p3.y) * (p2.x - p1.x) - (p4.x - p3.x) * (p2.y - p1.y);
    if d == 0.0 {
        return false;
    }
    let ua = ((p4.x - p3.x) * (p1.y - p3.y) - (p4.y - p3.y) * (p1.x - p3.x)) / d;
    let ub = ((p2.x - p1.x) * (p1.y - p3.y) - (p2.y - p1.y) * (p1.x - p3.x)) / d;
    (0.0..=1.0).contains(&ua) && (0.0..=1.0).contains(&ub)
}

/// Closest point to `p` on segment `a→b`.
pub fn closest_point_on_segment(p: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq == 0.0 {
        return a;
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

#[inline]
pub fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f64 {
    p.distance(closest_point_on_segment(p, a, b))
}

// ── Polygons ──────────────────────────────────────────────────────────────────

/// Even-odd ray cast.  Works for concave outlines.
pub fn point_in_polygon(p: Vec2, poly: &[Vec2]) -> bool {
    let mut inside = false;
    let n = poly.len();
    let mut j = n.wrapping_sub(1);
    for i in 0..n {
        let (vi, vj) = (poly[i], poly[j]);
        if (vi.y > p.y) != (vj.y > p.y)
            && p.x < (vj.x - vi.x) * (p.y - vi.y) / (vj.y - vi.y) + vi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// `true` if segment `a→b` crosses any edge of `poly` or lies inside it.
pub fn segment_hits_polygon(a: Vec2, b: Vec2, poly: &[Vec2]) -> bool {
    let n = poly.len();
    for i in 0..n {
        if segments_intersect(a, b, poly[i], poly[(i + 1) % n]) {
            return true;
        }
    }
    point_in_polygon(a.midpoint(b), poly)
}

/// Convex hull (Andrew's monotone chain), counter-clockwise in maths
/// orientation, without repeated endpoints.
pub fn convex_hull(points: &[Vec2]) -> Vec<Vec2> {
    let mut pts: Vec<Vec2> = points.to_vec();
    pts.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    pts.dedup();
    if pts.len() < 3 {
        return pts;
    }

    let turn = |o: Vec2, a: Vec2, b: Vec2| (a - o).cross(b - o);
    let mut hull: Vec<Vec2> = Vec::with_capacity(pts.len() * 2);
    for &p in pts.iter().chain(pts.iter().rev().skip(1)) {
        while hull.len() >= 2 && turn(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0 {
            hull.pop();
        }
        hull.push(p);
    }
    hull.pop();
    hull
}
