//! Unit tests for rg-course.

use rg_core::Vec2;

use crate::{Boundary, Course, CourseBuilder, CourseError, Obstacle};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

#[cfg(test)]
mod standard_tests {
    use super::*;

    #[test]
    fn north_wind_puts_windward_gate_north() {
        let course = Course::standard(0.0, 4000.0);
        let windward = course.gate_center(course.windward_gate);
        assert!(close(windward.x, 0.0));
        assert!(close(windward.y, -4000.0));
        assert!(close(course.mark(course.start_line.a).position.x, -275.0));
        assert!(close(course.mark(course.start_line.b).position.x, 275.0));
    }

    #[test]
    fn boundary_covers_both_gates() {
        let course = Course::standard(0.8, 4000.0);
        assert!(close(course.boundary.radius, 4500.0));
        for m in &course.marks {
            assert!(course.boundary.contains(m.position));
        }
        let short = Course::standard(0.0, 1000.0);
        assert!(close(short.boundary.radius, 3500.0));
    }

    #[test]
    fn gate_normals_point_upwind() {
        let course = Course::standard(1.2, 3000.0);
        let up = course.upwind();
        let n_start = course.gate_normal(course.start_line).normalized();
        let n_wind = course.gate_normal(course.windward_gate).normalized();
        assert!(up.dot(n_start) > 0.999);
        assert!(up.dot(n_wind) > 0.999);
        assert!(close(up.heading(), 1.2));
    }

    #[test]
    fn legs_alternate_gates_and_directions() {
        let course = Course::standard(0.0, 4000.0);
        assert_eq!(course.gate_for_leg(0).gate, course.start_line);
        assert_eq!(course.gate_for_leg(0).direction, 1.0);
        assert_eq!(course.gate_for_leg(1).gate, course.windward_gate);
        assert_eq!(course.gate_for_leg(2).gate, course.start_line);
        assert_eq!(course.gate_for_leg(2).direction, -1.0);
        assert_eq!(course.gate_for_leg(3).direction, 1.0);
        assert_eq!(course.zone_gate(0), None);
        assert_eq!(course.zone_gate(4), Some(course.start_line));
        assert!(Course::is_beat(3) && !Course::is_beat(2));
    }
}

#[cfg(test)]
mod boundary_tests {
    use super::*;

    #[test]
    fn clamp_projects_onto_circle() {
        let b = Boundary { center: Vec2::ZERO, radius: 100.0 };
        let (p, hit) = b.clamp(Vec2::new(200.0, 0.0));
        assert!(hit);
        assert!(close(p.x, 100.0));
        let (q, hit) = b.clamp(Vec2::new(10.0, 10.0));
        assert!(!hit);
        assert_eq!(q, Vec2::new(10.0, 10.0));
    }
}

#[cfg(test)]
mod builder_tests {
    use super::*;

    fn boundary() -> Boundary {
        Boundary { center: Vec2::new(0.0, -1000.0), radius: 3000.0 }
    }

    #[test]
    fn builds_custom_course() {
        let course = CourseBuilder::new(boundary())
            .start_line(Vec2::new(-200.0, 0.0), Vec2::new(200.0, 0.0))
            .windward_gate(Vec2::new(-100.0, -2000.0), Vec2::new(100.0, -2000.0))
            .obstacle(Obstacle::regular(Vec2::new(800.0, -1000.0), 150.0, 7))
            .build()
            .unwrap();
        assert_eq!(course.marks.len(), 4);
        assert!(close(course.leg_length, 2000.0));
        assert_eq!(course.obstacles.len(), 1);
    }

    #[test]
    fn missing_gate_is_rejected() {
        let err = CourseBuilder::new(boundary())
            .start_line(Vec2::new(-200.0, 0.0), Vec2::new(200.0, 0.0))
            .build()
            .unwrap_err();
        assert!(matches!(err, CourseError::MissingGate("windward gate")));
    }

    #[test]
    fn coincident_marks_are_rejected() {
        let err = CourseBuilder::new(boundary())
            .start_line(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0))
            .windward_gate(Vec2::new(-100.0, -2000.0), Vec2::new(100.0, -2000.0))
            .build()
            .unwrap_err();
        assert!(matches!(err, CourseError::DegenerateGate { what: "start line", .. }));
    }

    #[test]
    fn non_positive_boundary_is_rejected() {
        let err = CourseBuilder::new(Boundary { center: Vec2::ZERO, radius: 0.0 })
            .build()
            .unwrap_err();
        assert!(matches!(err, CourseError::InvalidBoundary(_)));
    }
}

#[cfg(test)]
mod obstacle_tests {
    use super::*;

    #[test]
    fn regular_polygon_radius_and_hull() {
        let o = Obstacle::regular(Vec2::new(10.0, 10.0), 50.0, 8);
        assert!(close(o.radius, 50.0));
        assert_eq!(o.hull.len(), 8);
    }

    #[test]
    fn inflation_pushes_vertices_out() {
        let o = Obstacle::regular(Vec2::ZERO, 50.0, 6).inflated(100.0);
        assert!(close(o.radius, 150.0));
        for v in &o.outline {
            assert!(close(v.length(), 150.0));
        }
    }
}
