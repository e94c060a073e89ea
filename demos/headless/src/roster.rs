//! The AI fleet and its starting positions.

use rg_core::Vec2;
use rg_course::Course;
use rg_fleet::{BoatSpec, BoatStats};

const fn stats(acceleration: i8, momentum: i8, handling: i8, upwind: i8, reach: i8, downwind: i8, boost: i8) -> BoatStats {
    BoatStats { acceleration, momentum, handling, upwind, reach, downwind, boost }
}

/// Name and performance coefficients of every boat the demo can field.
pub const ROSTER: [(&str, BoatStats); 10] = [
    ("Cheer",    stats( 2,  1,  2,  1,  0, -1,  0)),
    ("Bixby",    stats( 0,  2, -1,  3,  0, -1,  1)),
    ("Skim",     stats( 3, -2,  2,  0,  2,  1, -1)),
    ("Wobble",   stats(-1,  0, -2,  0,  1,  3,  2)),
    ("Pinch",    stats( 0,  0,  1,  4, -2, -1,  0)),
    ("Bruce",    stats(-2,  4, -1,  1,  2,  1, -1)),
    ("Strut",    stats( 1,  1,  0, -1,  3,  0,  0)),
    ("Gasket",   stats( 2, -1,  3, -1,  0,  1,  1)),
    ("Chomp",    stats( 0,  3, -2,  0,  0,  2,  3)),
    ("Whiskers", stats( 1,  0,  1,  1,  1,  1, -2)),
];

/// Distance below the start line of the front row, world units.
const FRONT_ROW: f64 = 200.0;
/// Extra depth of the second row.
const ROW_GAP: f64 = 80.0;
/// Width of the starting area along the line.
const SPREAD: f64 = 500.0;

/// The first `count` roster boats, staggered in two rows below the start
/// line on a beam reach.
pub fn line_up(course: &Course, wind_direction: f64, count: usize) -> Vec<BoatSpec> {
    let (pin, committee) = course.gate_points(course.start_line);
    let center = pin.midpoint(committee);
    let along = (committee - pin).normalized();
    let down = -course.upwind();
    let heading = wind_direction + std::f64::consts::FRAC_PI_2;

    ROSTER
        .iter()
        .take(count)
        .enumerate()
        .map(|(i, &(name, stats))| {
            let t = (i as f64 + 0.5) / count as f64 - 0.5;
            let depth = FRONT_ROW + if i % 2 == 1 { ROW_GAP } else { 0.0 };
            let position: Vec2 = center + along * (t * SPREAD) + down * depth;
            BoatSpec::new(name, position, heading).stats(stats)
        })
        .collect()
}
