//! Unit tests for rg-core primitives.

#[cfg(test)]
mod ids {
    use crate::{BoatId, MarkId};

    #[test]
    fn index_and_try_from() {
        let id = BoatId(7);
        assert_eq!(id.index(), 7);
        assert_eq!(BoatId::try_from(7usize).unwrap(), id);
        assert!(BoatId::try_from(70_000usize).is_err());
    }

    #[test]
    fn ordered_pair_puts_lower_first() {
        assert_eq!(BoatId::ordered(BoatId(4), BoatId(1)), (BoatId(1), BoatId(4)));
        assert_eq!(BoatId::ordered(BoatId(1), BoatId(4)), (BoatId(1), BoatId(4)));
    }

    #[test]
    fn range_is_ascending() {
        let ids: Vec<MarkId> = MarkId::range(3).collect();
        assert_eq!(ids, vec![MarkId(0), MarkId(1), MarkId(2)]);
    }

    #[test]
    fn display_and_default() {
        assert_eq!(BoatId(3).to_string(), "boat#3");
        assert_eq!(BoatId::default(), BoatId::INVALID);
    }
}

#[cfg(test)]
mod geom {
    use std::f64::consts::{FRAC_PI_2, PI};

    use crate::geom::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn heading_zero_points_north() {
        let f = forward(0.0);
        assert!(close(f.x, 0.0) && close(f.y, -1.0));
        let e = forward(FRAC_PI_2);
        assert!(close(e.x, 1.0) && close(e.y, 0.0));
        assert!(close(e.heading(), FRAC_PI_2));
    }

    #[test]
    fn downwind_is_opposite_of_source() {
        // Wind from the north flows toward +y.
        let d = downwind(0.0);
        assert!(close(d.y, 1.0));
    }

    #[test]
    fn normalize_wraps_into_half_open_range() {
        assert!(close(normalize_angle(2.5 * PI), 0.5 * PI));
        assert!(close(normalize_angle(-PI), PI));
        assert!(close(normalize_angle(-3.5 * PI), 0.5 * PI));
        assert!(close(normalize_angle(0.25), 0.25));
    }

    #[test]
    fn turn_toward_is_rate_limited_and_takes_short_way() {
        let h = turn_toward(3.0, -3.0, 0.1);
        // Short way from 3.0 to -3.0 is through π, i.e. increasing.
        assert!(close(h, 3.1));
        assert!(close(turn_toward(0.0, 0.05, 0.1), 0.05));
    }

    #[test]
    fn crossing_segments_intersect() {
        let a = Vec2::new(-1.0, 0.0);
        let b = Vec2::new(1.0, 0.0);
        assert!(segments_intersect(a, b, Vec2::new(0.0, -1.0), Vec2::new(0.0, 1.0)));
        assert!(!segments_intersect(a, b, Vec2::new(2.0, -1.0), Vec2::new(2.0, 1.0)));
        assert!(!segments_intersect(a, b, Vec2::new(-1.0, 1.0), Vec2::new(1.0, 1.0)));
    }

    #[test]
    fn segment_distance_clamps_to_endpoints() {
        let d = distance_to_segment(Vec2::new(5.0, 3.0), Vec2::ZERO, Vec2::new(2.0, 0.0));
        assert!(close(d, (9.0f64 + 9.0).sqrt()));
    }

    #[test]
    fn polygon_membership_and_hits() {
        let square = [
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        ];
        assert!(point_in_polygon(Vec2::new(5.0, 5.0), &square));
        assert!(!point_in_polygon(Vec2::new(15.0, 5.0), &square));
        assert!(segment_hits_polygon(Vec2::new(-5.0, 5.0), Vec2::new(15.0, 5.0), &square));
        assert!(segment_hits_polygon(Vec2::new(2.0, 2.0), Vec2::new(3.0, 3.0), &square));
        assert!(!segment_hits_polygon(Vec2::new(-5.0, -5.0), Vec2::new(15.0, -5.0), &square));
    }

    #[test]
    fn convex_hull_drops_interior_points() {
        let pts = [
            Vec2::new(0.0, 0.0),
            Vec2::new(4.0, 0.0),
            Vec2::new(2.0, 1.0),
            Vec2::new(4.0, 4.0),
            Vec2::new(0.0, 4.0),
            Vec2::new(2.0, 2.0),
        ];
        let hull = convex_hull(&pts);
        assert_eq!(hull.len(), 4);
        assert!(!hull.contains(&Vec2::new(2.0, 2.0)));
    }
}

#[cfg(test)]
mod hull {
    use std::f64::consts::PI;

    use crate::Vec2;
    use crate::hull::*;

    #[test]
    fn polygon_follows_heading() {
        let poly = hull_polygon(Vec2::new(100.0, 100.0), PI);
        // Bow vertex points south when heading π.
        assert!((poly[0].x - 100.0).abs() < 1e-9);
        assert!((poly[0].y - 125.0).abs() < 1e-9);
    }

    #[test]
    fn bow_and_stern_span_hull_length() {
        let p = Vec2::new(0.0, 0.0);
        let len = bow(p, 0.7).distance(stern(p, 0.7));
        assert!((len - HULL_LENGTH).abs() < 1e-9);
    }
}

#[cfg(test)]
mod rng {
    use crate::{BoatId, BoatRng, SimRng};

    #[test]
    fn same_seed_same_sequence() {
        let mut a = BoatRng::new(42, BoatId(3));
        let mut b = BoatRng::new(42, BoatId(3));
        for _ in 0..16 {
            assert_eq!(a.unit().to_bits(), b.unit().to_bits());
        }
    }

    #[test]
    fn boats_get_distinct_streams() {
        let mut a = BoatRng::new(42, BoatId(0));
        let mut b = BoatRng::new(42, BoatId(1));
        let sa: Vec<u64> = (0..4).map(|_| a.unit().to_bits()).collect();
        let sb: Vec<u64> = (0..4).map(|_| b.unit().to_bits()).collect();
        assert_ne!(sa, sb);
    }

    #[test]
    fn child_streams_are_reproducible() {
        let mut root_a = SimRng::new(9);
        let mut root_b = SimRng::new(9);
        let mut ca = root_a.child(1);
        let mut cb = root_b.child(1);
        assert_eq!(ca.unit().to_bits(), cb.unit().to_bits());
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, Tick};

    #[test]
    fn clock_accumulates_dt() {
        let mut clock = SimClock::new();
        clock.advance(0.5);
        clock.advance(0.25);
        assert_eq!(clock.current_tick, Tick(2));
        assert!((clock.elapsed_secs - 0.75).abs() < 1e-12);
        assert!((clock.last_dt - 0.25).abs() < 1e-12);
    }

    #[test]
    fn display_shows_minutes_and_seconds() {
        let mut clock = SimClock::new();
        clock.advance(125.0);
        assert_eq!(clock.to_string(), "T1 (02:05)");
    }
}

#[cfg(test)]
mod events {
    use crate::{BoatId, EventSink, RaceEvent, RaceEventKind};

    #[test]
    fn vec_sink_collects_in_order() {
        let mut sink: Vec<RaceEvent> = Vec::new();
        sink.emit(RaceEvent::Penalty { boat: BoatId(1), time: 3.0 });
        sink.emit(RaceEvent::RaceStarted { time: 0.0 });
        assert_eq!(sink[0].kind(), RaceEventKind::Penalty);
        assert_eq!(sink[0].boat(), Some(BoatId(1)));
        assert_eq!(sink[1].boat(), None);
    }
}
