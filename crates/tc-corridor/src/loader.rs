//! CSV corridor loader.
//!
//! # CSV format
//!
//! One row per corridor route.  Rows sharing `origin` and `destination`
//! form one corridor; its peak windows and delay factor are taken from the
//! first of those rows.
//!
//! ```csv
//! origin,destination,route_name,via_roads,typical_minutes,peak_windows,peak_delay_factor
//! NUST University,Bulawayo City Hall,via Cecil Ave,cecil|fife,7,7-9|16-18.5,1.4
//! NUST University,Bulawayo City Hall,via Gwanda Rd,gwanda|fort,8,7-9|16-18.5,1.4
//! ```
//!
//! `via_roads` and `peak_windows` are `|`-separated; a window is
//! `start-end` in fractional hours.  Corridors keep the order in which they
//! first appear.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::catalog::{Corridor, CorridorCatalog, CorridorRoute, PeakWindow};
use crate::{CorridorError, CorridorResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct CorridorRecord {
    origin:            String,
    destination:       String,
    route_name:        String,
    via_roads:         String,
    typical_minutes:   u32,
    peak_windows:      String,
    peak_delay_factor: f64,
    #[serde(default)]
    description:       String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a corridor catalog from a CSV file.
pub fn load_corridors_csv(path: &Path) -> CorridorResult<CorridorCatalog> {
    let file = std::fs::File::open(path)?;
    let catalog = load_corridors_reader(file)?;
    log::info!("loaded {} corridor(s) from {}", catalog.len(), path.display());
    Ok(catalog)
}

/// Like [`load_corridors_csv`] but accepts any `Read` source.
pub fn load_corridors_reader<R: Read>(reader: R) -> CorridorResult<CorridorCatalog> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut corridors: Vec<Corridor> = Vec::new();

    for result in csv_reader.deserialize::<CorridorRecord>() {
        let row = result.map_err(|e| CorridorError::Parse(e.to_string()))?;

        let route = CorridorRoute {
            name:            row.route_name.trim().to_owned(),
            via_roads:       split_list(&row.via_roads).map(str::to_lowercase).collect(),
            typical_minutes: row.typical_minutes,
            description:     row.description,
        };
        if route.name.is_empty() {
            return Err(CorridorError::Parse("empty route_name".into()));
        }

        let origin = row.origin.trim();
        let destination = row.destination.trim();
        match corridors
            .iter_mut()
            .find(|c| c.origin == origin && c.destination == destination)
        {
            Some(c) => c.routes.push(route),
            None => corridors.push(Corridor {
                origin:            origin.to_owned(),
                destination:       destination.to_owned(),
                routes:            vec![route],
                peak_windows:      parse_windows(&row.peak_windows)?,
                peak_delay_factor: row.peak_delay_factor,
            }),
        }
    }

    Ok(CorridorCatalog::new(corridors))
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn split_list(s: &str) -> impl Iterator<Item = &str> {
    s.split('|').map(str::trim).filter(|p| !p.is_empty())
}

fn parse_windows(s: &str) -> CorridorResult<Vec<PeakWindow>> {
    split_list(s)
        .map(|w| {
            let bad = || CorridorError::Parse(format!("invalid peak window {w:?}: expected \"start-end\" hours"));
            let (start, end) = w.split_once('-').ok_or_else(bad)?;
            let start: f64 = start.trim().parse().map_err(|_| bad())?;
            let end: f64 = end.trim().parse().map_err(|_| bad())?;
            if !(0.0..=24.0).contains(&start) || !(0.0..=24.0).contains(&end) || start > end {
                return Err(bad());
            }
            Ok(PeakWindow::new(start, end))
        })
        .collect()
}
