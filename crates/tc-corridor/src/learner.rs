//! Score adjustment from learned weights, and online training.
//!
//! # Training rule
//!
//! ```text
//! error_ratio = actual / max(predicted, 1)
//! multiplier  = 0.8 × multiplier + 0.2 × error_ratio
//! data_points += 1
//! ```
//!
//! A route that keeps taking longer than predicted drifts above 1.0 and is
//! ranked lower; one that keeps beating the prediction drifts below.
//!
//! # Locking
//!
//! The store sits behind a `parking_lot::RwLock`.  Ranking takes one
//! [`snapshot`](WeightLearner::snapshot) up front; training holds the write
//! lock for the update and the persist.

use parking_lot::RwLock;

use crate::store::{CorridorWeight, WeightStore, WeightTable};

/// Weight of a new observation in the moving average.
pub const SMOOTHING: f64 = 0.2;
const BASE_CONFIDENCE_PCT: u32 = 50;
const CONFIDENCE_PER_POINT_PCT: u32 = 5;
const MAX_CONFIDENCE_PCT: u32 = 95;

/// Roads known to be chronically slow, with the score multiplier they carry
/// on any route that uses them.
pub const BOTTLENECK_PENALTIES: &[(&str, f64)] = &[
    ("Masiyephambili Drive", 1.15),
    ("Leopold Takawira Avenue", 1.05),
];

/// Result of [`WeightLearner::apply_weight_adjustment`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Adjustment {
    pub score: f64,
    /// 50–95.
    pub confidence_pct: u8,
}

/// Apply `table` to a raw score.  See [`WeightLearner::apply_weight_adjustment`].
pub fn adjust_score(
    table:          &WeightTable,
    road_names:     &[&str],
    raw_score:      f64,
    corridor_route: Option<&str>,
) -> Adjustment {
    let weight = corridor_route.and_then(|name| table.get(name).copied());
    adjust(weight, road_names, raw_score)
}

fn adjust(weight: Option<CorridorWeight>, road_names: &[&str], raw_score: f64) -> Adjustment {
    let mut score = raw_score;
    let mut confidence = BASE_CONFIDENCE_PCT;

    if let Some(weight) = weight {
        score *= weight.multiplier;
        confidence = BASE_CONFIDENCE_PCT
            .saturating_add(weight.data_points.saturating_mul(CONFIDENCE_PER_POINT_PCT))
            .min(MAX_CONFIDENCE_PCT);
    }

    for &(road, penalty) in BOTTLENECK_PENALTIES {
        if road_names.contains(&road) {
            score *= penalty;
        }
    }

    Adjustment { score, confidence_pct: confidence as u8 }
}

/// Owns the weight store and applies and trains corridor weights.
pub struct WeightLearner<S: WeightStore> {
    store: RwLock<S>,
}

impl<S: WeightStore> WeightLearner<S> {
    pub fn new(store: S) -> Self {
        Self { store: RwLock::new(store) }
    }

    /// Atomic copy of the current table.
    pub fn snapshot(&self) -> WeightTable {
        self.store.read().snapshot()
    }

    pub fn weight(&self, corridor_route: &str) -> Option<CorridorWeight> {
        self.store.read().get(corridor_route)
    }

    /// Multiply `raw_score` by the learned weight of `corridor_route`, if
    /// any, and by the penalty of every known bottleneck in `road_names`.
    /// Confidence is 50 % without a weight, else `50 + 5 × data points`
    /// capped at 95 %.
    pub fn apply_weight_adjustment(
        &self,
        road_names:     &[&str],
        raw_score:      f64,
        corridor_route: Option<&str>,
    ) -> Adjustment {
        let weight = corridor_route.and_then(|name| self.store.read().get(name));
        adjust(weight, road_names, raw_score)
    }

    /// Fold one observed trip into the weight of `corridor_route` and
    /// persist the table.  Returns the updated weight; `None` when the name
    /// is blank, `actual_minutes` is not a finite positive number, or
    /// `predicted_minutes` is negative or not finite.  Predictions under one
    /// minute are floored at one.
    ///
    /// A failed persist is logged and otherwise ignored: the in-memory table
    /// stays authoritative for this process.
    pub fn train(
        &self,
        corridor_route:    &str,
        predicted_minutes: f64,
        actual_minutes:    f64,
    ) -> Option<CorridorWeight> {
        let name = corridor_route.trim();
        if name.is_empty() {
            return None;
        }
        if !(predicted_minutes.is_finite() && predicted_minutes >= 0.0)
            || !(actual_minutes.is_finite() && actual_minutes > 0.0)
        {
            log::warn!(
                "ignoring feedback for {name:?}: predicted {predicted_minutes} min, actual {actual_minutes} min"
            );
            return None;
        }

        let error_ratio = actual_minutes / predicted_minutes.max(1.0);

        let mut store = self.store.write();
        let current = store.get(name).unwrap_or_default();
        let updated = CorridorWeight {
            multiplier:  current.multiplier * (1.0 - SMOOTHING) + error_ratio * SMOOTHING,
            data_points: current.data_points.saturating_add(1),
        };
        store.set(name, updated);
        log::info!(
            "trained {name:?}: ratio {error_ratio:.3}, multiplier {:.3} → {:.3} ({} points)",
            current.multiplier,
            updated.multiplier,
            updated.data_points,
        );

        if let Err(e) = store.persist() {
            log::warn!("could not persist corridor weights: {e}");
        }
        Some(updated)
    }

    /// Consume the learner and return its store.
    pub fn into_store(self) -> S {
        self.store.into_inner()
    }
}
