//! Static catalog of well-known origin → destination corridors.
//!
//! A corridor names the handful of ways locals actually drive between two
//! places.  Each [`CorridorRoute`] is recognised by road-name fragments
//! (`"cecil"` matches "Cecil Avenue" and "Cecil Ave"), and its name keys the
//! learned weight table.

use serde::{Deserialize, Serialize};

use tc_core::DepartureTime;

/// One known way through a corridor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CorridorRoute {
    /// Display name and weight-table key, e.g. "via Cecil Ave".
    pub name: String,
    /// Lower-case road-name fragments that identify this route.
    pub via_roads: Vec<String>,
    pub typical_minutes: u32,
    #[serde(default)]
    pub description: String,
}

/// Inclusive window of fractional hours, e.g. 16.0–18.5.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PeakWindow {
    pub start_hour: f64,
    pub end_hour:   f64,
}

impl PeakWindow {
    pub const fn new(start_hour: f64, end_hour: f64) -> Self {
        Self { start_hour, end_hour }
    }

    #[inline]
    pub fn contains(&self, fractional_hour: f64) -> bool {
        fractional_hour >= self.start_hour && fractional_hour <= self.end_hour
    }
}

/// A named origin → destination pair with its known routes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Corridor {
    pub origin:            String,
    pub destination:       String,
    pub routes:            Vec<CorridorRoute>,
    pub peak_windows:      Vec<PeakWindow>,
    /// Typical slowdown inside a peak window, e.g. 1.4 = 40 % longer.
    pub peak_delay_factor: f64,
}

impl Corridor {
    /// `true` when `t` falls inside any of the corridor's peak windows.
    pub fn is_in_peak_hours(&self, t: DepartureTime) -> bool {
        let f = t.fractional_hour();
        self.peak_windows.iter().any(|w| w.contains(f))
    }

    /// Minutes locals expect for the known route `route_name` when leaving
    /// at `t`: its typical time, stretched by the peak delay factor inside a
    /// peak window.
    pub fn expected_minutes(&self, route_name: &str, t: DepartureTime) -> Option<f64> {
        let route = self.routes.iter().find(|r| r.name == route_name)?;
        let typical = f64::from(route.typical_minutes);
        Some(if self.is_in_peak_hours(t) { typical * self.peak_delay_factor } else { typical })
    }

    /// Whether the given place names describe this corridor, travelled in
    /// either direction.
    fn matches(&self, origin: &str, destination: &str) -> bool {
        let forward = overlaps(origin, &self.origin) && overlaps(destination, &self.destination);
        let reverse = overlaps(origin, &self.destination) && overlaps(destination, &self.origin);
        forward || reverse
    }

    /// The known route whose fragments best cover `road_names`.
    pub fn match_route(&self, road_names: &[&str]) -> Option<&CorridorRoute> {
        match_route_to_corridor_route(road_names, &self.routes)
    }
}

/// Case-insensitive containment in either direction.  `query` is already
/// lower-cased.
fn overlaps(query: &str, known: &str) -> bool {
    let known = known.to_lowercase();
    query.contains(&known) || known.contains(query)
}

/// Pick the route with the most fragments present somewhere in
/// `road_names`.  Ties go to the earlier route; zero matches is `None`.
pub fn match_route_to_corridor_route<'a>(
    road_names: &[&str],
    routes:     &'a [CorridorRoute],
) -> Option<&'a CorridorRoute> {
    let lowered: Vec<String> = road_names.iter().map(|n| n.to_lowercase()).collect();

    let mut best: Option<(&CorridorRoute, usize)> = None;
    for route in routes {
        let hits = route
            .via_roads
            .iter()
            .filter(|via| {
                let via = via.to_lowercase();
                lowered.iter().any(|name| name.contains(&via))
            })
            .count();
        if hits > best.map_or(0, |(_, n)| n) {
            best = Some((route, hits));
        }
    }
    best.map(|(route, _)| route)
}

// ── Catalog ───────────────────────────────────────────────────────────────────

/// The corridors the engine knows about.  Read-only once built.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CorridorCatalog {
    corridors: Vec<Corridor>,
}

impl CorridorCatalog {
    pub fn new(corridors: Vec<Corridor>) -> Self {
        Self { corridors }
    }

    /// The catalog compiled into the engine: the Bulawayo corridor from
    /// NUST to City Hall.
    pub fn builtin() -> Self {
        fn route(name: &str, via: &[&str], minutes: u32, description: &str) -> CorridorRoute {
            CorridorRoute {
                name:            name.to_owned(),
                via_roads:       via.iter().map(|v| (*v).to_owned()).collect(),
                typical_minutes: minutes,
                description:     description.to_owned(),
            }
        }

        Self::new(vec![Corridor {
            origin:      "NUST University".into(),
            destination: "Bulawayo City Hall".into(),
            routes: vec![
                route("via Cecil Ave", &["cecil", "fife"], 7, "Cecil Avenue direct through the suburbs"),
                route("via Gwanda Rd", &["gwanda", "fort"], 8, "Gwanda Road into the CBD from the south"),
                route(
                    "via Central Avenues",
                    &["3rd ave", "2nd ave", "lobengula"],
                    9,
                    "Through the central avenues grid",
                ),
            ],
            peak_windows:      vec![PeakWindow::new(7.0, 9.0), PeakWindow::new(16.0, 18.5)],
            peak_delay_factor: 1.4,
        }])
    }

    pub fn corridors(&self) -> &[Corridor] {
        &self.corridors
    }

    pub fn len(&self) -> usize {
        self.corridors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.corridors.is_empty()
    }

    /// The first corridor matching the two place names, in either
    /// direction.  Blank names never match.
    pub fn find_corridor(&self, origin_name: &str, destination_name: &str) -> Option<&Corridor> {
        let origin = origin_name.trim().to_lowercase();
        let destination = destination_name.trim().to_lowercase();
        if origin.is_empty() || destination.is_empty() {
            return None;
        }
        self.corridors.iter().find(|c| c.matches(&origin, &destination))
    }
}
