//! `tc-rank` — turns candidate routes into the ranked, annotated answer.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                 |
//! |----------------|----------------------------------------------------------|
//! | [`ranked`]     | `RankedRoute`, `PredictionBucket`, `UiLabel`, formatting |
//! | [`conditions`] | per-road `RoadCondition` summaries                       |
//! | [`pipeline`]   | `RankingPipeline`: score, adjust, sort, bucket, label    |
//! | [`narrative`]  | seeded forecast paragraph, `detect_trend`                |
//!
//! Everything here is synchronous and pure given its inputs: the departure
//! instant, the weather and a snapshot of the learned weights are passed in.

pub mod conditions;
pub mod narrative;
pub mod pipeline;
pub mod ranked;


pub use conditions::{RoadCondition, road_conditions};
pub use narrative::{Trend, detect_trend, narrate};
pub use pipeline::{MAX_OFFSET_MINUTES, RankingOptions, RankingOutcome, RankingPipeline, RankingQuery, predict_at};
pub use ranked::{ColoredSegment, PredictionBucket, RankedRoute, UiLabel, format_duration};
