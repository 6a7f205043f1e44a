pub mod bands;
pub mod config;
pub mod engine;
pub mod validation;

pub use bands::{threshold_excess, Band};
pub use config::{ComfortThresholds, ScoringConfig};
pub use engine::{score_conditions, ConditionContribution, LikelihoodScores, ScoreResult};
pub use validation::validate_scoring;
