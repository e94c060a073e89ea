//! Route planning around obstacles.
//!
//! A* over a visibility graph: the nodes are the start, the target and the
//! vertices of every obstacle grown by a safety margin; two nodes are joined
//! when the straight line between them clears every grown obstacle.
//! Obstacles are grown once, when the planner is built for a course.
//!
//! Boats follow the resulting waypoints, dropping each one once within 60
//! units, and replan every 2–3 s or whenever the final target moves.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use rg_core::geom::{distance_to_segment, segment_hits_polygon};
use rg_core::{BoatRng, Vec2};
use rg_course::Obstacle;

/// Clearance kept from obstacle outlines.
pub const PLANNING_MARGIN: f64 = 100.0;
/// Graph nodes sit this much further out than the blocking outline, so that
/// lines between neighbouring nodes do not graze it.
const NODE_CLEARANCE: f64 = 5.0;
pub const WAYPOINT_RADIUS: f64 = 60.0;
/// A target moving further than this forces a replan.
pub const RETARGET_DISTANCE: f64 = 50.0;
const REPLAN_MIN_SECS: f64 = 2.0;
const REPLAN_MAX_SECS: f64 = 3.0;
/// Node expansions before giving up and heading straight for the target.
const MAX_EXPANSIONS: usize = 2_000;

/// A boat's current route.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RouteMemory {
    /// Remaining waypoints, the last being the target.
    pub waypoints: Vec<Vec2>,
    /// Seconds until the next scheduled replan.
    pub replan_in: f64,
    /// Target the waypoints lead to.
    pub goal: Option<Vec2>,
}

/// Shared, per-course obstacle geometry for routing.
#[derive(Clone, Debug, Default)]
pub struct RoutePlanner {
    /// Outlines lines must not cross.
    blocking: Vec<Obstacle>,
    /// Candidate waypoints.
    nodes: Vec<Vec2>,
}

/// Total order over `f64` path costs for the open set.
#[derive(Copy, Clone, PartialEq)]
struct Priority(f64);

impl Eq for Priority {}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Priority {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl RoutePlanner {
    pub fn new(obstacles: &[Obstacle]) -> Self {
        let blocking = obstacles.iter().map(|o| o.inflated(PLANNING_MARGIN)).collect();
        let nodes = obstacles
            .iter()
            .flat_map(|o| o.inflated(PLANNING_MARGIN + NODE_CLEARANCE).outline)
            .collect();
        Self { blocking, nodes }
    }

    /// No obstacles: every route is a straight line.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.blocking.is_empty()
    }

    /// Does the straight line `a → b` clear every grown obstacle?
    pub fn line_is_clear(&self, a: Vec2, b: Vec2) -> bool {
        self.blocking.iter().all(|o| {
            distance_to_segment(o.center, a, b) > o.radius || !segment_hits_polygon(a, b, &o.outline)
        })
    }

    /// Waypoints from `start` to `target`, excluding `start` and ending with
    /// `target`.  Falls back to the straight line when no route exists.
    pub fn find_path(&self, start: Vec2, target: Vec2) -> Vec<Vec2> {
        if self.line_is_clear(start, target) {
            return vec![target];
        }

        // Node 0 is the start, node 1 the target, then the obstacle nodes.
        let point = |i: usize| match i {
            0 => start,
            1 => target,
            _ => self.nodes[i - 2],
        };
        let n = self.nodes.len() + 2;
        let h = |i: usize| point(i).distance(target);

        let mut g = vec![f64::INFINITY; n];
        let mut parent = vec![usize::MAX; n];
        let mut closed = vec![false; n];
        g[0] = 0.0;

        // Secondary key on the node index keeps the expansion order stable.
        let mut open: BinaryHeap<Reverse<(Priority, usize)>> = BinaryHeap::new();
        open.push(Reverse((Priority(h(0)), 0)));

        let mut expansions = 0;
        while let Some(Reverse((_, node))) = open.pop() {
            if node == 1 {
                return reconstruct(&parent, point);
            }
            if closed[node] {
                continue;
            }
            closed[node] = true;
            expansions += 1;
            if expansions > MAX_EXPANSIONS {
                break;
            }

            let from = point(node);
            for next in 1..n {
                if closed[next] {
                    continue;
                }
                let to = point(next);
                let tentative = g[node] + from.distance(to);
                if tentative >= g[next] || !self.line_is_clear(from, to) {
                    continue;
                }
                g[next] = tentative;
                parent[next] = node;
                open.push(Reverse((Priority(tentative + h(next)), next)));
            }
        }

        vec![target]
    }

    /// Next point to steer for on the way to `target`, replanning when due.
    pub fn steer(
        &self,
        route:    &mut RouteMemory,
        position: Vec2,
        target:   Vec2,
        elapsed:  f64,
        rng:      &mut BoatRng,
    ) -> Vec2 {
        if self.is_empty() {
            return target;
        }

        route.replan_in -= elapsed;
        let retargeted = route.goal.is_none_or(|g| g.distance(target) > RETARGET_DISTANCE);
        if route.replan_in <= 0.0 || retargeted {
            route.goal = Some(target);
            route.waypoints = self.find_path(position, target);
            route.replan_in = rng.gen_range(REPLAN_MIN_SECS..REPLAN_MAX_SECS);
        }

        if route.waypoints.first().is_some_and(|w| w.distance(position) < WAYPOINT_RADIUS) {
            route.waypoints.remove(0);
        }
        route.waypoints.first().copied().unwrap_or(target)
    }
}

fn reconstruct(parent: &[usize], point: impl Fn(usize) -> Vec2) -> Vec<Vec2> {
    let mut path = Vec::new();
    let mut cur = 1;
    while cur != 0 {
        path.push(point(cur));
        cur = parent[cur];
    }
    path.reverse();
    path
}
