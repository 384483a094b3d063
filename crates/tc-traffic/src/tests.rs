//! Unit tests for tc-traffic.

use tc_core::DepartureTime;
use tc_spatial::{CandidateRoute, Leg, Step};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Monday 2 March 2026.
fn monday(hour: u32, minute: u32) -> DepartureTime {
    DepartureTime::from_ymd_hm(2026, 3, 2, hour, minute).unwrap()
}

/// Friday 6 March 2026.
fn friday(hour: u32, minute: u32) -> DepartureTime {
    DepartureTime::from_ymd_hm(2026, 3, 6, hour, minute).unwrap()
}

/// Saturday 7 March 2026.
fn saturday(hour: u32, minute: u32) -> DepartureTime {
    DepartureTime::from_ymd_hm(2026, 3, 7, hour, minute).unwrap()
}

/// Free-flow seconds to cover `distance_m` at `speed_kmh`.
fn secs_at(distance_m: f64, speed_kmh: f64) -> f64 {
    distance_m / (speed_kmh / 3.6)
}

/// `n` equal steps of `step_m` metres at `speed_kmh`.
fn route_of(n: usize, step_m: f64, speed_kmh: f64) -> CandidateRoute {
    let steps = (0..n)
        .map(|i| Step {
            distance_m:    step_m,
            duration_secs: secs_at(step_m, speed_kmh),
            geometry:      vec![],
            name:          Some(format!("Road {i}")),
            road_ref:      None,
        })
        .collect();
    CandidateRoute {
        geometry:      vec![],
        legs:          vec![Leg { steps }],
        distance_m:    n as f64 * step_m,
        duration_secs: n as f64 * secs_at(step_m, speed_kmh),
    }
}

// ── Road classes ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod road {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};
    use tc_core::WeatherTier;

    use crate::RoadType;

    #[test]
    fn thresholds() {
        assert_eq!(RoadType::classify(120.0), RoadType::Highway);
        assert_eq!(RoadType::classify(80.0), RoadType::Highway);
        assert_eq!(RoadType::classify(79.999), RoadType::Main);
        assert_eq!(RoadType::classify(50.0), RoadType::Main);
        assert_eq!(RoadType::classify(49.999), RoadType::Local);
        assert_eq!(RoadType::classify(30.0), RoadType::Local);
        assert_eq!(RoadType::classify(29.999), RoadType::Narrow);
        assert_eq!(RoadType::classify(0.0), RoadType::Narrow);
    }

    #[test]
    fn classification_is_monotonic() {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut speeds: Vec<f64> = (0..2_000).map(|_| rng.gen_range(0.0..160.0)).collect();
        speeds.sort_by(|a, b| b.total_cmp(a));
        let classes: Vec<RoadType> = speeds.iter().map(|&s| RoadType::classify(s)).collect();
        assert!(classes.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn highways_degrade_least_in_weather() {
        for tier in [WeatherTier::Drizzle, WeatherTier::Rain, WeatherTier::Storm] {
            let h = RoadType::Highway.weather_multiplier(tier);
            let n = RoadType::Narrow.weather_multiplier(tier);
            assert!(h > n, "{tier}");
        }
        assert_eq!(RoadType::Local.weather_multiplier(WeatherTier::Storm), 0.50);
        assert_eq!(RoadType::Main.weather_multiplier(WeatherTier::Clear), 1.0);
    }
}

// ── Curves ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod curve {
    use super::{friday, monday, saturday};
    use crate::{time_factor, transition_multiplier};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn interpolates_between_hours() {
        assert!(close(time_factor(monday(7, 0)), 0.85));
        assert!(close(time_factor(monday(7, 30)), 0.925));
        assert!(close(time_factor(monday(14, 0)), 0.10));
        assert!(time_factor(monday(7, 50)) < time_factor(monday(8, 10)));
    }

    #[test]
    fn hour_23_wraps_within_table() {
        assert!(close(time_factor(monday(23, 30)), 0.03));
        assert!(close(time_factor(saturday(23, 30)), 0.10));
    }

    #[test]
    fn weekend_table() {
        assert!(close(time_factor(saturday(12, 0)), 0.60));
        assert!(close(time_factor(saturday(8, 0)), 0.30));
    }

    #[test]
    fn friday_bonus_is_capped() {
        assert!(close(time_factor(friday(15, 0)), 0.45));
        assert!(close(time_factor(friday(17, 0)), 1.0));
        assert!(close(time_factor(friday(20, 0)), 0.20));
    }

    #[test]
    fn morning_ramp() {
        assert!(close(transition_multiplier(monday(6, 29)), 1.0));
        assert!(close(transition_multiplier(monday(6, 45)), 1.15));
        assert!(close(transition_multiplier(monday(7, 30)), 1.45));
        assert!(close(transition_multiplier(monday(8, 30)), 1.45));
        assert!(close(transition_multiplier(monday(8, 45)), 1.225));
        assert!(close(transition_multiplier(monday(9, 0)), 1.0));
    }

    #[test]
    fn evening_ramp() {
        assert!(close(transition_multiplier(monday(16, 0)), 1.0 + 0.4 / 3.0));
        assert!(close(transition_multiplier(monday(17, 0)), 1.40));
        assert!(close(transition_multiplier(monday(18, 15)), 1.20));
        assert!(close(transition_multiplier(monday(18, 30)), 1.0));
    }

    #[test]
    fn flat_off_peak_and_weekends() {
        assert!(close(transition_multiplier(monday(12, 0)), 1.0));
        assert!(close(transition_multiplier(saturday(8, 0)), 1.0));
        assert!(close(transition_multiplier(saturday(17, 0)), 1.0));
    }
}

// ── Segment model ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod segment {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};
    use tc_core::{SeverityColor, Weather};

    use super::{monday, secs_at};
    use crate::segment::{SECONDS_PER_METER, color_for_ratio};
    use crate::{Incident, RoadType, predict_segment};

    #[test]
    fn degenerate_inputs() {
        for (d, t) in [(400.0, 0.0), (400.0, -5.0), (0.0, 30.0)] {
            let m = predict_segment(d, t, None, monday(8, 0), 0);
            assert_eq!(m.predicted_speed_kmh, 0.1);
            assert_eq!(m.base_speed_kmh, 0.0);
            assert_eq!(m.road_type, RoadType::Narrow);
            assert_eq!(m.delay_secs, 0.0);
            assert_eq!(m.color, SeverityColor::Neutral);
            assert!(m.incident.is_none());
        }
    }

    #[test]
    fn speed_never_below_floor() {
        let mut rng = SmallRng::seed_from_u64(7);
        let storm = Weather::from_code(96);
        for _ in 0..5_000 {
            let distance = rng.gen_range(1.0..20_000.0);
            let duration = rng.gen_range(0.5..3_000.0);
            let offset = rng.gen_range(0..60);
            let hour = rng.gen_range(0..24);
            let weather = if rng.gen_bool(0.5) { Some(&storm) } else { None };
            let m = predict_segment(distance, duration, weather, monday(hour, 0), offset);
            assert!(
                m.predicted_speed_kmh >= m.road_type.floor_speed_kmh(),
                "{m:?} for {distance} m in {duration} s"
            );
            assert!(m.delay_secs >= 0.0);
        }
    }

    #[test]
    fn off_peak_main_road() {
        // 60 km/h main road at 14:00: factor 0.10, reduction 0.94.
        let m = predict_segment(400.0, secs_at(400.0, 60.0), None, monday(14, 0), 0);
        assert_eq!(m.road_type, RoadType::Main);
        assert!((m.base_speed_kmh - 60.0).abs() < 1e-9);
        assert!((m.predicted_speed_kmh - 56.4).abs() < 1e-9);
        let calibrated = 400.0 * SECONDS_PER_METER;
        assert!((m.duration_secs - calibrated / 0.94).abs() < 1e-9);
        assert!((m.delay_secs - (m.duration_secs - calibrated)).abs() < 1e-9);
        assert_eq!(m.color, SeverityColor::Clear);
    }

    #[test]
    fn rush_hour_colors() {
        // Local road at 08:00: reduction clamps to 0.05, floor takes over.
        let heavy = predict_segment(400.0, secs_at(400.0, 40.0), None, monday(8, 0), 0);
        assert_eq!(heavy.predicted_speed_kmh, 5.0);
        assert_eq!(heavy.color, SeverityColor::Heavy);

        // Main road at 09:00: factor 0.70, no transition → ratio 0.58.
        let moderate = predict_segment(400.0, secs_at(400.0, 60.0), None, monday(9, 0), 0);
        assert_eq!(moderate.color, SeverityColor::Moderate);

        let clear = predict_segment(400.0, secs_at(400.0, 40.0), None, monday(3, 0), 0);
        assert_eq!(clear.color, SeverityColor::Clear);
    }

    #[test]
    fn offset_shifts_the_clock() {
        let at_0630_plus_90 = predict_segment(400.0, secs_at(400.0, 60.0), None, monday(6, 30), 90);
        let at_0800 = predict_segment(400.0, secs_at(400.0, 60.0), None, monday(8, 0), 0);
        assert_eq!(at_0630_plus_90.predicted_speed_kmh, at_0800.predicted_speed_kmh);
    }

    #[test]
    fn weather_slows_segments() {
        let dry = predict_segment(400.0, secs_at(400.0, 60.0), None, monday(14, 0), 0);
        let storm = Weather::from_code(96);
        let wet = predict_segment(400.0, secs_at(400.0, 60.0), Some(&storm), monday(14, 0), 0);
        assert!((wet.predicted_speed_kmh - dry.predicted_speed_kmh * 0.6).abs() < 1e-9);
        assert!(wet.delay_secs > dry.delay_secs);
    }

    #[test]
    fn ratio_buckets() {
        assert_eq!(color_for_ratio(0.49), SeverityColor::Heavy);
        assert_eq!(color_for_ratio(0.5), SeverityColor::Moderate);
        assert_eq!(color_for_ratio(0.79), SeverityColor::Moderate);
        assert_eq!(color_for_ratio(0.8), SeverityColor::Clear);
        assert_eq!(color_for_ratio(1.3), SeverityColor::Clear);
    }

    #[test]
    fn incidents_are_reproducible() {
        for i in 0..500 {
            let d = 501.0 + i as f64 * 3.7;
            for offset in [0, 15, 30] {
                let a = predict_segment(d, secs_at(d, 60.0), None, monday(14, 0), offset);
                let b = predict_segment(d, secs_at(d, 60.0), None, monday(14, 0), offset);
                assert_eq!(a, b);
            }
        }
    }

    #[test]
    fn short_steps_never_roll() {
        for offset in 0..200 {
            let m = predict_segment(500.0, secs_at(500.0, 60.0), None, monday(14, 0), offset);
            assert!(m.incident.is_none());
        }
    }

    #[test]
    fn bottleneck_rate_and_effect() {
        let n = 10_000;
        let mut hits = 0;
        for i in 0..n {
            let d = 501.0 + i as f64 * 0.37;
            let m = predict_segment(d, secs_at(d, 60.0), None, monday(14, 0), 0);
            if let Some(incident) = m.incident {
                assert_eq!(incident, Incident::Bottleneck);
                assert_eq!(m.incident_label(), Some("Bottleneck Delay"));
                assert!((m.predicted_speed_kmh - 60.0 * 0.94 * 0.6).abs() < 1e-6);
                hits += 1;
            }
        }
        let rate = hits as f64 / n as f64;
        assert!((0.03..0.07).contains(&rate), "rate {rate}");
    }

    #[test]
    fn accidents_need_congested_highways() {
        let mut peak_hits = 0;
        for i in 0..10_000 {
            let d = 501.0 + i as f64 * 0.37;
            let quiet = predict_segment(d, secs_at(d, 100.0), None, monday(11, 0), 0);
            assert!(quiet.incident.is_none());

            let busy = predict_segment(d, secs_at(d, 100.0), None, monday(8, 0), 0);
            if let Some(incident) = busy.incident {
                assert_eq!(incident, Incident::Accident);
                peak_hits += 1;
            }
        }
        assert!(peak_hits > 0);
    }

    #[test]
    fn local_roads_have_no_incidents() {
        for i in 0..2_000 {
            let d = 501.0 + i as f64 * 1.3;
            let m = predict_segment(d, secs_at(d, 40.0), None, monday(8, 0), 0);
            assert!(m.incident.is_none());
        }
    }
}

// ── Scoring ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod score {
    use tc_core::{Weather, WeatherTier};
    use tc_spatial::CandidateRoute;

    use super::{monday, route_of};
    use crate::segment::calibrated_duration_secs;
    use crate::{predict_segment, score_route, weather_penalty_secs};

    #[test]
    fn penalties() {
        assert_eq!(weather_penalty_secs(WeatherTier::Clear), 0.0);
        assert_eq!(weather_penalty_secs(WeatherTier::Drizzle), 40.0);
        assert_eq!(weather_penalty_secs(WeatherTier::Rain), 120.0);
        assert_eq!(weather_penalty_secs(WeatherTier::Storm), 300.0);
    }

    #[test]
    fn storm_adds_exactly_its_penalty() {
        let r = route_of(15, 440.0, 60.0);
        let clear = score_route(&r, None, monday(14, 0), 0);
        let storm = score_route(&r, Some(&Weather::from_code(96)), monday(14, 0), 0);
        assert!((storm - clear - 300.0).abs() < 1e-6);
    }

    #[test]
    fn rush_hour_scores_worse() {
        for r in [route_of(15, 440.0, 60.0), route_of(6, 1_100.0, 90.0), route_of(20, 330.0, 35.0)] {
            let eight = score_route(&r, None, monday(8, 0), 0);
            let eleven = score_route(&r, None, monday(11, 0), 0);
            assert!(eight >= eleven, "{eight} < {eleven}");
        }
    }

    #[test]
    fn off_peak_score_is_close_to_calibration() {
        let r = route_of(15, 440.0, 60.0);
        let s = score_route(&r, None, monday(14, 0), 0);
        let base = calibrated_duration_secs(6_600.0);
        assert!((base - 420.0).abs() < 1e-9);
        assert!(s > base && s < base + 30.0, "{s}");
    }

    #[test]
    fn stepless_route_scores_as_one_step() {
        let r = CandidateRoute {
            geometry:      vec![],
            legs:          vec![],
            distance_m:    400.0,
            duration_secs: 24.0,
        };
        let delay = predict_segment(400.0, 24.0, None, monday(14, 0), 0).delay_secs;
        let s = score_route(&r, None, monday(14, 0), 0);
        assert!((s - (delay + calibrated_duration_secs(400.0))).abs() < 1e-9);
    }

    #[test]
    fn deterministic() {
        let r = route_of(6, 1_100.0, 60.0);
        let a = score_route(&r, None, monday(17, 20), 15);
        let b = score_route(&r, None, monday(17, 20), 15);
        assert_eq!(a, b);
    }
}
