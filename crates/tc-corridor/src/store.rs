//! Learned corridor-route weights and where they are kept.
//!
//! # Pluggability
//!
//! The learner never touches storage directly; it goes through
//! [`WeightStore`].  Tests use [`InMemoryWeightStore`], the planner uses
//! [`JsonFileWeightStore`], and deployments with a database can enable the
//! `sqlite` feature for `SqliteWeightStore`.
//!
//! Every store holds the whole table in memory.  `persist` writes the whole
//! table back; there is no partial update.
//!
//! # Blob format
//!
//! ```json
//! { "via Cecil Ave": { "multiplier": 1.08, "dataPoints": 3 } }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::CorridorResult;

/// Learned correction for one corridor route.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CorridorWeight {
    /// Multiplicative correction applied to the route's score.
    pub multiplier: f64,
    /// Observations folded into `multiplier`.
    #[serde(rename = "dataPoints")]
    pub data_points: u32,
}

impl Default for CorridorWeight {
    fn default() -> Self {
        Self { multiplier: 1.0, data_points: 0 }
    }
}

/// Corridor-route name → weight, ordered by name.
pub type WeightTable = BTreeMap<String, CorridorWeight>;

/// Storage for the weight table.
///
/// # Thread safety
///
/// The learner shares one store between concurrent requests behind a lock,
/// so implementations must be `Send + Sync`.
pub trait WeightStore: Send + Sync {
    fn get(&self, name: &str) -> Option<CorridorWeight>;

    fn set(&mut self, name: &str, weight: CorridorWeight);

    /// A copy of the whole table.
    fn snapshot(&self) -> WeightTable;

    /// Write the whole table to durable storage.  A no-op for in-memory
    /// stores.
    fn persist(&self) -> CorridorResult<()>;
}

/// Parse a persisted blob.  Blank input is an empty table.
pub fn decode_table(blob: &str) -> CorridorResult<WeightTable> {
    if blob.trim().is_empty() {
        return Ok(WeightTable::new());
    }
    Ok(serde_json::from_str(blob)?)
}

pub fn encode_table(table: &WeightTable) -> CorridorResult<String> {
    Ok(serde_json::to_string_pretty(table)?)
}

// ── InMemoryWeightStore ───────────────────────────────────────────────────────

/// A store that forgets everything when dropped.
#[derive(Clone, Debug, Default)]
pub struct InMemoryWeightStore {
    table: WeightTable,
}

impl InMemoryWeightStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(table: WeightTable) -> Self {
        Self { table }
    }
}

impl WeightStore for InMemoryWeightStore {
    fn get(&self, name: &str) -> Option<CorridorWeight> {
        self.table.get(name).copied()
    }

    fn set(&mut self, name: &str, weight: CorridorWeight) {
        self.table.insert(name.to_owned(), weight);
    }

    fn snapshot(&self) -> WeightTable {
        self.table.clone()
    }

    fn persist(&self) -> CorridorResult<()> {
        Ok(())
    }
}

// ── JsonFileWeightStore ───────────────────────────────────────────────────────

/// The weight table as one JSON file.
#[derive(Debug)]
pub struct JsonFileWeightStore {
    path:  PathBuf,
    table: WeightTable,
}

impl JsonFileWeightStore {
    /// Open the table at `path`.  A missing file is an empty table; a file
    /// that exists but does not parse is an error.
    pub fn open(path: impl Into<PathBuf>) -> CorridorResult<Self> {
        let path = path.into();
        let table = match std::fs::read_to_string(&path) {
            Ok(blob) => decode_table(&blob)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => WeightTable::new(),
            Err(e) => return Err(e.into()),
        };
        log::info!("loaded {} corridor weight(s) from {}", table.len(), path.display());
        Ok(Self { path, table })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl WeightStore for JsonFileWeightStore {
    fn get(&self, name: &str) -> Option<CorridorWeight> {
        self.table.get(name).copied()
    }

    fn set(&mut self, name: &str, weight: CorridorWeight) {
        self.table.insert(name.to_owned(), weight);
    }

    fn snapshot(&self) -> WeightTable {
        self.table.clone()
    }

    fn persist(&self) -> CorridorResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        // Write beside the target, then rename over it.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, encode_table(&self.table)?)?;
        std::fs::rename(&tmp, &self.path)?;
        log::debug!("persisted {} corridor weight(s) to {}", self.table.len(), self.path.display());
        Ok(())
    }
}
