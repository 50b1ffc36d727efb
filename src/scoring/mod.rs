pub mod clean;
pub mod config;
pub mod engine;
pub mod normalize;
pub mod validation;

pub use clean::clean_metric_value;
pub use config::{FilterBounds, TierWeights};
pub use engine::{score_players, ScoreOutcome, ScoredRecord, ScoredTable, ScoringRequest};
pub use normalize::min_max_scale;
pub use validation::{validate_scoring, weight_warnings};
