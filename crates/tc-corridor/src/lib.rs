//! `tc-corridor` — known corridors and learned per-route corrections.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`catalog`] | `Corridor`, `CorridorRoute`, `PeakWindow`, `CorridorCatalog` |
//! | [`loader`]  | CSV corridor loader                                       |
//! | [`store`]   | `WeightStore` trait, in-memory and JSON-file stores       |
//! | `sqlite`    | `SqliteWeightStore` (feature `sqlite`)                    |
//! | [`learner`] | `WeightLearner`: score adjustment and EMA training        |
//! | [`error`]   | `CorridorError`, `CorridorResult<T>`                      |
//!
//! # Feature flags
//!
//! | Feature  | Enables                                        |
//! |----------|------------------------------------------------|
//! | `sqlite` | `SqliteWeightStore` (`rusqlite`, bundled)      |

pub mod catalog;
pub mod error;
pub mod learner;
pub mod loader;
pub mod store;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use catalog::{Corridor, CorridorCatalog, CorridorRoute, PeakWindow, match_route_to_corridor_route};
pub use error::{CorridorError, CorridorResult};
pub use learner::{Adjustment, WeightLearner};
pub use loader::{load_corridors_csv, load_corridors_reader};
pub use store::{CorridorWeight, InMemoryWeightStore, JsonFileWeightStore, WeightStore, WeightTable};

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWeightStore;
