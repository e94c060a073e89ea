//! Static obstacles (islands).
//!
//! Obstacles arrive as arbitrary outlines from the course generator.  The
//! separating-axis test needs convex shapes, so each obstacle also carries
//! the convex hull of its outline; the outline itself is kept for routing
//! and line-of-sight checks, which handle concave shapes.

use rg_core::Vec2;
use rg_core::geom::convex_hull;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Obstacle {
    pub center: Vec2,
    /// Distance from `center` to the farthest outline vertex.
    pub radius: f64,
    pub outline: Vec<Vec2>,
    pub hull: Vec<Vec2>,
}

impl Obstacle {
    pub fn new(center: Vec2, outline: Vec<Vec2>) -> Self {
        let radius = outline
            .iter()
            .map(|v| v.distance(center))
            .fold(0.0, f64::max);
        let hull = convex_hull(&outline);
        Self { center, radius, outline, hull }
    }

    /// Regular `sides`-gon of circumradius `radius`; handy for tests and
    /// simple generated courses.
    pub fn regular(center: Vec2, radius: f64, sides: usize) -> Self {
        let sides = sides.max(3);
        let outline = (0..sides)
            .map(|i| {
                let a = i as f64 / sides as f64 * std::f64::consts::TAU;
                center + Vec2::new(a.cos(), a.sin()) * radius
            })
            .collect();
        Self::new(center, outline)
    }

    /// Copy with every vertex pushed radially outward by `margin`.
    pub fn inflated(&self, margin: f64) -> Obstacle {
        let outline = self
            .outline
            .iter()
            .map(|&v| {
                let d = v - self.center;
                let len = d.length();
                if len < 1e-9 { v } else { self.center + d * ((len + margin) / len) }
            })
            .collect();
        Obstacle::new(self.center, outline)
    }
}
