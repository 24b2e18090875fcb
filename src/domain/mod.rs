//! Domain layer - Core analytics logic and models.
//!
//! This module contains the pure computations of the wagering analytics
//! engine. No I/O and no process-wide state (hexagonal architecture inner
//! ring): every component takes its inputs explicitly and returns
//! serializable results.

pub mod bias;
pub mod error;
pub mod monte_carlo;
pub mod poisson;
pub mod rationality;
pub mod risk_metrics;
pub mod session;
pub mod stats;
pub mod value_bet;
pub mod wager;

// Re-export core types for convenience
pub use bias::{BiasDetector, BiasFinding, BiasKind, BiasReport, BiasThresholds, detect_biases};
pub use error::AnalyticsError;
pub use monte_carlo::{GameModel, GameType, SimulationParams, SimulationSummary, simulate};
pub use poisson::{FairOdds, MarketProbabilities, ScorelineDistribution, predict_scorelines};
pub use rationality::RationalityScore;
pub use risk_metrics::{CategoryComparison, RiskMetrics, STD_DEV_FLOOR, compare_categories};
pub use session::{SessionAggregate, sessions_by_day};
pub use value_bet::{
    AlertKind, ValueAlert, ValueBetScanner, ValueBetThresholds, scan_value_bets,
};
pub use wager::{CategoryId, MatchId, MatchOdds, WagerOutcome, WagerRecord};
