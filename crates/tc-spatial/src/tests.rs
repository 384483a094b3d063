//! Unit tests for tc-spatial.

#[cfg(test)]
mod fixtures {
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tc_core::GeoPoint;

    use crate::provider::{RouteProvider, RouteRequest};
    use crate::{CandidateRoute, Leg, SpatialError, SpatialResult, Step};

    pub const ORIGIN: GeoPoint = GeoPoint { lat: 0.0, lon: 0.0 };
    pub const DESTINATION: GeoPoint = GeoPoint { lat: 0.0, lon: 0.06 };

    /// Evenly interpolated polyline through `corners`, `per_leg` points per
    /// straight section.
    pub fn polyline(corners: &[GeoPoint], per_leg: usize) -> Vec<GeoPoint> {
        let mut out = vec![corners[0]];
        for pair in corners.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            for i in 1..=per_leg {
                let t = i as f64 / per_leg as f64;
                out.push(GeoPoint::new(a.lat + (b.lat - a.lat) * t, a.lon + (b.lon - a.lon) * t));
            }
        }
        out
    }

    /// A one-step route along `geometry` at 10 m/s unless `duration` is
    /// given.
    pub fn route(geometry: Vec<GeoPoint>, duration: Option<f64>) -> CandidateRoute {
        let distance_m: f64 = geometry.windows(2).map(|w| w[0].distance_m(w[1])).sum();
        let duration_secs = duration.unwrap_or(distance_m / 10.0);
        CandidateRoute {
            legs: vec![Leg {
                steps: vec![Step {
                    distance_m,
                    duration_secs,
                    geometry: geometry.clone(),
                    name: Some("Main Road".into()),
                    road_ref: None,
                }],
            }],
            geometry,
            distance_m,
            duration_secs,
        }
    }

    /// The straight fastest route O → D.
    pub fn straight() -> CandidateRoute {
        route(polyline(&[ORIGIN, DESTINATION], 30), Some(600.0))
    }

    /// The straight route nudged ~33 m north; same corridor.
    pub fn shifted_duplicate() -> CandidateRoute {
        let geometry = straight()
            .geometry
            .into_iter()
            .map(|p| GeoPoint::new(p.lat + 0.0003, p.lon))
            .collect();
        route(geometry, Some(700.0))
    }

    /// A detour O → via → D.
    pub fn detour(via: GeoPoint) -> CandidateRoute {
        route(polyline(&[ORIGIN, via, DESTINATION], 10), None)
    }

    /// Provider that replays a script for primary requests and answers
    /// waypoint probes through `probe`.
    pub struct ScriptedProvider {
        primary:           Mutex<VecDeque<SpatialResult<Vec<CandidateRoute>>>>,
        probe:             fn(GeoPoint) -> SpatialResult<Vec<CandidateRoute>>,
        pub primary_calls: AtomicUsize,
        pub probe_calls:   AtomicUsize,
    }

    impl ScriptedProvider {
        pub fn new(
            script: Vec<SpatialResult<Vec<CandidateRoute>>>,
            probe:  fn(GeoPoint) -> SpatialResult<Vec<CandidateRoute>>,
        ) -> Self {
            Self {
                primary: Mutex::new(script.into()),
                probe,
                primary_calls: AtomicUsize::new(0),
                probe_calls: AtomicUsize::new(0),
            }
        }

        pub fn primary_calls(&self) -> usize {
            self.primary_calls.load(Ordering::SeqCst)
        }

        pub fn probe_calls(&self) -> usize {
            self.probe_calls.load(Ordering::SeqCst)
        }
    }

    impl RouteProvider for ScriptedProvider {
        async fn routes(&self, request: &RouteRequest) -> SpatialResult<Vec<CandidateRoute>> {
            match request.via {
                Some(via) => {
                    self.probe_calls.fetch_add(1, Ordering::SeqCst);
                    (self.probe)(via)
                }
                None => {
                    self.primary_calls.fetch_add(1, Ordering::SeqCst);
                    let next = self.primary.lock().unwrap().pop_front();
                    next.unwrap_or_else(|| Err(SpatialError::Provider("script exhausted".into())))
                }
            }
        }
    }

    pub fn detour_probe(via: GeoPoint) -> SpatialResult<Vec<CandidateRoute>> {
        Ok(vec![detour(via)])
    }

    pub fn failing_probe(_: GeoPoint) -> SpatialResult<Vec<CandidateRoute>> {
        Err(SpatialError::Status { code: 500 })
    }
}

#[cfg(test)]
mod route {
    use tc_core::GeoPoint;

    use super::fixtures::{ORIGIN, DESTINATION, route};
    use crate::{CandidateRoute, Step};

    fn step(name: Option<&str>, road_ref: Option<&str>) -> Step {
        Step {
            distance_m:    100.0,
            duration_secs: 10.0,
            geometry:      vec![],
            name:          name.map(Into::into),
            road_ref:      road_ref.map(Into::into),
        }
    }

    #[test]
    fn road_name_falls_back_to_ref() {
        assert_eq!(step(Some("Fife Street"), Some("A7")).road_name(), Some("Fife Street"));
        assert_eq!(step(Some(""), Some("A7")).road_name(), Some("A7"));
        assert_eq!(step(Some("Unnamed Road"), Some("A7")).road_name(), Some("A7"));
        assert_eq!(step(None, Some("A7")).road_name(), Some("A7"));
        assert_eq!(step(Some("Unnamed Road"), None).road_name(), None);
        assert_eq!(step(None, Some(" ")).road_name(), None);
    }

    #[test]
    fn stepless_route_models_as_one_step() {
        let r = CandidateRoute {
            geometry:      vec![ORIGIN, DESTINATION],
            legs:          vec![],
            distance_m:    6_600.0,
            duration_secs: 480.0,
        };
        let steps = r.steps_or_whole();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].distance_m, 6_600.0);
        assert_eq!(steps[0].duration_secs, 480.0);
        assert!(steps[0].name.is_none());
    }

    #[test]
    fn road_names_in_travel_order() {
        let r = route(vec![ORIGIN, GeoPoint::new(0.0, 0.01)], None);
        assert_eq!(r.road_names(), vec!["Main Road"]);
        assert_eq!(r.steps_or_whole().len(), 1);
    }
}

#[cfg(test)]
mod osrm {
    use tc_core::GeoPoint;

    use crate::osrm::{OsrmRouteResponse, decode_response};
    use crate::{OsrmClient, RouteRequest, SpatialError};

    const FIXTURE: &str = r#"{
        "code": "Ok",
        "waypoints": [],
        "routes": [{
            "distance": 1200.5,
            "duration": 140.2,
            "weight_name": "routability",
            "geometry": { "type": "LineString",
                          "coordinates": [[28.58, -20.17], [28.585, -20.165], [28.59, -20.16]] },
            "legs": [{
                "steps": [
                    { "distance": 800.0, "duration": 90.0, "name": "", "ref": "A7",
                      "geometry": { "coordinates": [[28.58, -20.17], [28.585, -20.165]] } },
                    { "distance": 400.5, "duration": 50.2, "name": "Fife Street",
                      "geometry": { "coordinates": [[28.585, -20.165], [28.59, -20.16]] } }
                ]
            }]
        }]
    }"#;

    fn decode(json: &str) -> crate::SpatialResult<Vec<crate::CandidateRoute>> {
        let body: OsrmRouteResponse = serde_json::from_str(json)?;
        decode_response(body)
    }

    #[test]
    fn decodes_routes_and_steps() {
        let routes = decode(FIXTURE).unwrap();
        assert_eq!(routes.len(), 1);
        let r = &routes[0];
        assert_eq!(r.distance_m, 1200.5);
        assert_eq!(r.geometry[0], GeoPoint::new(-20.17, 28.58));
        assert_eq!(r.steps().count(), 2);
        assert_eq!(r.road_names(), vec!["A7", "Fife Street"]);
    }

    #[test]
    fn no_route_is_empty() {
        let routes = decode(r#"{"code":"NoRoute","message":"Impossible route between points"}"#).unwrap();
        assert!(routes.is_empty());
    }

    #[test]
    fn other_codes_are_errors() {
        let err = decode(r#"{"code":"InvalidQuery","message":"bad coordinates"}"#).unwrap_err();
        assert!(matches!(err, SpatialError::Provider(ref m) if m == "bad coordinates"));
        assert!(!err.is_retryable());
    }

    #[test]
    fn malformed_payload_is_decode_error() {
        assert!(matches!(decode("{\"routes\": 3}"), Err(SpatialError::Decode(_))));
    }

    #[test]
    fn request_url() {
        let client = OsrmClient::new(reqwest::Client::new(), "http://localhost:5000/");
        let o = GeoPoint::new(-20.17, 28.58);
        let d = GeoPoint::new(-20.15, 28.59);

        assert_eq!(
            client.url_for(&RouteRequest::with_alternatives(o, d)),
            "http://localhost:5000/route/v1/driving/28.580000,-20.170000;28.590000,-20.150000\
             ?overview=full&geometries=geojson&steps=true&alternatives=true",
        );

        let via = GeoPoint::new(-20.16, 28.60);
        let url = client.url_for(&RouteRequest::through(o, d, via));
        assert!(url.contains("28.580000,-20.170000;28.600000,-20.160000;28.590000,-20.150000"));
        assert!(url.ends_with("alternatives=false"));
    }
}

#[cfg(test)]
mod retry {
    use std::time::Duration;

    use crate::{RetryPolicy, SpatialError};

    #[test]
    fn exponential_delays() {
        let p = RetryPolicy::default();
        assert_eq!(p.delay_after(1), Duration::from_secs(1));
        assert_eq!(p.delay_after(2), Duration::from_secs(2));
        assert_eq!(p.delay_after(3), Duration::from_secs(4));
    }

    #[test]
    fn retryable_classification() {
        assert!(SpatialError::Status { code: 503 }.is_retryable());
        assert!(SpatialError::Status { code: 500 }.is_retryable());
        assert!(!SpatialError::Status { code: 404 }.is_retryable());
        assert!(!SpatialError::Status { code: 429 }.is_retryable());
        assert!(!SpatialError::Provider("x".into()).is_retryable());
    }

    #[tokio::test]
    async fn none_tries_once() {
        let mut calls = 0;
        let result: crate::SpatialResult<()> = RetryPolicy::none()
            .run("op", || {
                calls += 1;
                async { Err(SpatialError::Status { code: 503 }) }
            })
            .await;
        assert!(result.is_err());
        assert_eq!(calls, 1);
    }
}

#[cfg(test)]
mod similarity {
    use tc_core::GeoPoint;

    use super::fixtures::{DESTINATION, ORIGIN, detour, route, shifted_duplicate, straight};
    use crate::similarity::{MAX_SAMPLES, initial_heading, same_corridor, sample_points, similarity};
    use crate::CandidateRoute;

    #[test]
    fn samples_are_capped_and_keep_endpoints() {
        let g: Vec<GeoPoint> = (0..100).map(|i| GeoPoint::new(0.0, i as f64 * 0.001)).collect();
        let s = sample_points(&g);
        assert_eq!(s.len(), MAX_SAMPLES);
        assert_eq!(s[0], g[0]);
        assert_eq!(s[MAX_SAMPLES - 1], g[99]);

        let short = &g[..5];
        assert_eq!(sample_points(short), short.to_vec());
    }

    #[test]
    fn identical_and_shifted_routes_coincide() {
        let a = straight();
        assert!((similarity(&a, &a) - 1.0).abs() < 1e-12);
        assert!(similarity(&a, &shifted_duplicate()) > 0.99);
        assert!(same_corridor(&a, &shifted_duplicate()));
    }

    #[test]
    fn detours_are_distinct() {
        let a = straight();
        let north = detour(GeoPoint::new(0.015, 0.03));
        let south = detour(GeoPoint::new(-0.015, 0.03));
        assert!(similarity(&a, &north) < 0.4);
        assert!(!same_corridor(&a, &north));
        assert!(!same_corridor(&north, &south));
    }

    #[test]
    fn empty_geometry_matches_nothing() {
        let empty = CandidateRoute { geometry: vec![], legs: vec![], distance_m: 0.0, duration_secs: 0.0 };
        assert_eq!(similarity(&empty, &straight()), 0.0);
        assert_eq!(initial_heading(&empty), None);
    }

    /// Twenty points heading east along the equator, 0.003° apart.
    fn eastbound() -> CandidateRoute {
        route((0..20).map(|i| GeoPoint::new(0.0, i as f64 * 0.003)).collect(), Some(600.0))
    }

    #[test]
    fn partial_overlap_on_the_same_heading_is_one_corridor() {
        // Shares the first half of `eastbound`, then runs parallel 0.01° north.
        let geometry = (0..20)
            .map(|i| GeoPoint::new(if i < 10 { 0.0 } else { 0.01 }, i as f64 * 0.003))
            .collect();
        let fork = route(geometry, Some(650.0));

        let sim = similarity(&eastbound(), &fork);
        assert!((sim - 0.5).abs() < 1e-12, "got {sim}");
        assert!((initial_heading(&eastbound()).unwrap() - initial_heading(&fork).unwrap()).abs() < 1e-9);
        assert!(same_corridor(&eastbound(), &fork));
        assert!(same_corridor(&fork, &eastbound()));
    }

    #[test]
    fn partial_overlap_leaving_on_another_heading_is_distinct() {
        // Leaves north-east, then rejoins `eastbound` for its second half.
        let geometry = (0..20)
            .map(|i| {
                let lon = i as f64 * 0.003;
                GeoPoint::new(if i < 10 { i as f64 * 0.002 } else { 0.0 }, lon)
            })
            .collect();
        let rejoin = route(geometry, Some(650.0));

        let sim = similarity(&eastbound(), &rejoin);
        assert!((sim - 0.55).abs() < 1e-12, "got {sim}");
        let diff = (initial_heading(&eastbound()).unwrap() - initial_heading(&rejoin).unwrap()).abs();
        assert!(diff > 15.0, "headings differ by {diff}");
        assert!(!same_corridor(&eastbound(), &rejoin));
    }

    #[test]
    fn eastbound_heading() {
        let h = initial_heading(&straight()).unwrap();
        assert!((h - 90.0).abs() < 1e-6, "got {h}");
        assert_eq!(ORIGIN.bearing_deg(DESTINATION).round(), 90.0);
    }
}

#[cfg(test)]
mod discover {
    use std::time::Duration;

    use super::fixtures::*;
    use crate::discover::{TARGET_ROUTES, probe_waypoints};
    use crate::similarity::same_corridor;
    use crate::{AlternativeDiscoverer, RetryPolicy, SpatialError};

    fn fast_retry() -> RetryPolicy {
        RetryPolicy { max_attempts: 3, base_delay: Duration::ZERO }
    }

    #[test]
    fn eight_probes_around_midpoint() {
        let w = probe_waypoints(ORIGIN, DESTINATION);
        assert_eq!(w.len(), 8);
        // span 0.06° → offset 0.015°
        assert!((w[0].lat - 0.015).abs() < 1e-12);
        assert!((w[0].lon - 0.03).abs() < 1e-12);
        assert!((w[2].lon - 0.045).abs() < 1e-12);

        let near = tc_core::GeoPoint::new(0.0, 0.001);
        let w = probe_waypoints(ORIGIN, near);
        assert!((w[0].lat - 0.01).abs() < 1e-12, "short trips use the 0.01° floor");
    }

    #[tokio::test]
    async fn dedupes_then_probes_to_three() {
        let provider = ScriptedProvider::new(
            vec![Ok(vec![shifted_duplicate(), straight()])],
            detour_probe,
        );
        let discoverer = AlternativeDiscoverer::new(provider).with_retry(fast_retry());
        let routes = discoverer.discover(ORIGIN, DESTINATION).await.unwrap();

        assert_eq!(routes.len(), TARGET_ROUTES);
        assert_eq!(routes[0], straight());
        for (i, a) in routes.iter().enumerate() {
            for b in &routes[i + 1..] {
                assert!(!same_corridor(a, b));
            }
        }
        assert!(routes.windows(2).all(|w| w[0].duration_secs <= w[1].duration_secs));
        assert_eq!(discoverer.provider().primary_calls(), 1);
    }

    #[tokio::test]
    async fn failed_probes_keep_primary() {
        let provider = ScriptedProvider::new(vec![Ok(vec![straight()])], failing_probe);
        let discoverer = AlternativeDiscoverer::new(provider).with_retry(fast_retry());
        let routes = discoverer.discover(ORIGIN, DESTINATION).await.unwrap();

        assert_eq!(routes, vec![straight()]);
        assert_eq!(discoverer.provider().probe_calls(), 8);
    }

    #[tokio::test]
    async fn no_route_skips_probing() {
        let provider = ScriptedProvider::new(vec![Ok(vec![])], detour_probe);
        let discoverer = AlternativeDiscoverer::new(provider).with_retry(fast_retry());
        let routes = discoverer.discover(ORIGIN, DESTINATION).await.unwrap();

        assert!(routes.is_empty());
        assert_eq!(discoverer.provider().probe_calls(), 0);
    }

    #[tokio::test]
    async fn server_errors_are_retried() {
        let provider = ScriptedProvider::new(
            vec![
                Err(SpatialError::Status { code: 503 }),
                Err(SpatialError::Status { code: 502 }),
                Ok(vec![straight()]),
            ],
            failing_probe,
        );
        let discoverer = AlternativeDiscoverer::new(provider).with_retry(fast_retry());
        let routes = discoverer.discover(ORIGIN, DESTINATION).await.unwrap();

        assert_eq!(routes.len(), 1);
        assert_eq!(discoverer.provider().primary_calls(), 3);
    }

    #[tokio::test]
    async fn client_errors_are_not_retried() {
        let provider = ScriptedProvider::new(
            vec![Err(SpatialError::Status { code: 404 }), Ok(vec![straight()])],
            detour_probe,
        );
        let discoverer = AlternativeDiscoverer::new(provider).with_retry(fast_retry());
        let result = discoverer.discover(ORIGIN, DESTINATION).await;

        assert!(matches!(result, Err(SpatialError::Status { code: 404 })));
        assert_eq!(discoverer.provider().primary_calls(), 1);
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let provider = ScriptedProvider::new(
            vec![
                Err(SpatialError::Status { code: 500 }),
                Err(SpatialError::Status { code: 500 }),
                Err(SpatialError::Status { code: 500 }),
                Ok(vec![straight()]),
            ],
            detour_probe,
        );
        let discoverer = AlternativeDiscoverer::new(provider).with_retry(fast_retry());
        let result = discoverer.discover(ORIGIN, DESTINATION).await;

        assert!(result.is_err());
        assert_eq!(discoverer.provider().primary_calls(), 3);
        assert_eq!(discoverer.provider().probe_calls(), 0);
    }
}
