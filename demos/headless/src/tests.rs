//! Unit tests for the headless demo.

use rg_course::Course;

use crate::roster::{self, ROSTER};

#[cfg(test)]
mod roster_tests {
    use super::*;

    fn depth_below_line(course: &Course, p: rg_core::Vec2) -> f64 {
        let center = course.gate_center(course.start_line);
        -(p - center).dot(course.upwind())
    }

    #[test]
    fn full_roster_starts_inside_the_boundary() {
        let course = Course::standard(0.0, 4_000.0);
        let boats = roster::line_up(&course, 0.0, ROSTER.len());
        assert_eq!(boats.len(), ROSTER.len());
        for b in &boats {
            assert!(course.boundary.contains(b.position), "{} at {:?}", b.name, b.position);
        }
    }

    #[test]
    fn rows_sit_just_below_the_start_line() {
        for wind in [0.0, 1.0, -2.5] {
            let course = Course::standard(wind, 4_000.0);
            for b in roster::line_up(&course, wind, 6) {
                let depth = depth_below_line(&course, b.position);
                assert!(depth > 150.0 && depth < 330.0, "{} is {depth} below the line", b.name);
            }
        }
    }

    #[test]
    fn count_is_capped_by_the_roster() {
        let course = Course::standard(0.0, 4_000.0);
        assert_eq!(roster::line_up(&course, 0.0, 3).len(), 3);
        assert_eq!(roster::line_up(&course, 0.0, 25).len(), ROSTER.len());
    }
}
