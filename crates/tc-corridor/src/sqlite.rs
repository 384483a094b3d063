//! SQLite weight store (feature `sqlite`).
//!
//! Keeps the same JSON blob as the file store in a single row of a
//! key-value table:
//!
//! ```sql
//! CREATE TABLE kv (key TEXT PRIMARY KEY, value TEXT NOT NULL);
//! ```

use std::path::Path;

use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension};

use crate::CorridorResult;
use crate::store::{CorridorWeight, WeightStore, WeightTable, decode_table, encode_table};

const WEIGHTS_KEY: &str = "corridor_weights";

/// Weight table stored in an SQLite database.
pub struct SqliteWeightStore {
    // `Connection` is not `Sync`.
    conn:  Mutex<Connection>,
    table: WeightTable,
}

impl SqliteWeightStore {
    /// Open (or create) the database at `path` and load the table.
    pub fn open(path: &Path) -> CorridorResult<Self> {
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> CorridorResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> CorridorResult<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                 key   TEXT PRIMARY KEY,
                 value TEXT NOT NULL
             );",
        )?;
        let blob: Option<String> = conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [WEIGHTS_KEY], |r| r.get(0))
            .optional()?;
        let table = match blob {
            Some(blob) => decode_table(&blob)?,
            None => WeightTable::new(),
        };
        log::info!("loaded {} corridor weight(s) from SQLite", table.len());
        Ok(Self { conn: Mutex::new(conn), table })
    }
}

impl WeightStore for SqliteWeightStore {
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
        let blob = encode_table(&self.table)?;
        self.conn.lock().execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            rusqlite::params![WEIGHTS_KEY, blob],
        )?;
        Ok(())
    }
}
