//! Separating-axis tests for convex shapes.
//!
//! Both tests return the minimum translation: `depth` along `normal`, with
//! `normal` pointing from the first shape toward the second.  Moving the
//! second shape by `normal * depth` (or the first by the opposite) leaves
//! the two just touching.

use rg_core::Vec2;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Contact {
    pub depth: f64,
    /// Unit vector from the first shape toward the second.
    pub normal: Vec2,
}

/// Unit normals of every edge of `poly`.
fn edge_normals(poly: &[Vec2]) -> impl Iterator<Item = Vec2> + '_ {
    poly.iter().zip(poly.iter().cycle().skip(1)).filter_map(|(&p, &q)| {
        let edge = q - p;
        let len = edge.length();
        (len > 1e-12).then(|| Vec2::new(-edge.y, edge.x) * (1.0 / len))
    })
}

fn project(axis: Vec2, poly: &[Vec2]) -> (f64, f64) {
    poly.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
        let d = p.dot(axis);
        (lo.min(d), hi.max(d))
    })
}

/// Overlap of `[a_lo, a_hi]` and `[b_lo, b_hi]` on `axis` as a signed push
/// for the second interval, or `None` if they are apart.
fn axis_push(axis: Vec2, (a_lo, a_hi): (f64, f64), (b_lo, b_hi): (f64, f64)) -> Option<Contact> {
    if a_hi < b_lo || b_hi < a_lo {
        return None;
    }
    let forward = a_hi - b_lo;
    let backward = b_hi - a_lo;
    Some(if forward <= backward {
        Contact { depth: forward, normal: axis }
    } else {
        Contact { depth: backward, normal: -axis }
    })
}

fn shallowest(best: Option<Contact>, candidate: Contact) -> Option<Contact> {
    match best {
        Some(b) if b.depth <= candidate.depth => Some(b),
        _ => Some(candidate),
    }
}

/// Two convex polygons.
pub fn polygon_polygon(a: &[Vec2], b: &[Vec2]) -> Option<Contact> {
    if a.len() < 3 || b.len() < 3 {
        return None;
    }
    let mut best = None;
    for axis in edge_normals(a).chain(edge_normals(b)) {
        let c = axis_push(axis, project(axis, a), project(axis, b))?;
        best = shallowest(best, c);
    }
    best
}

/// A convex polygon and a circle.
pub fn polygon_circle(poly: &[Vec2], center: Vec2, radius: f64) -> Option<Contact> {
    if poly.len() < 3 {
        return None;
    }
    let nearest = poly
        .iter()
        .copied()
        .min_by(|p, q| p.distance_sq(center).total_cmp(&q.distance_sq(center)))?;
    let to_center = center - nearest;
    let vertex_axis = (to_center.length() > 1e-9).then(|| to_center.normalized());

    let mut best = None;
    for axis in edge_normals(poly).chain(vertex_axis) {
        let c = center.dot(axis);
        let contact = axis_push(axis, project(axis, poly), (c - radius, c + radius))?;
        best = shallowest(best, contact);
    }
    best
}
