//! Use Cases Layer - Application Analytics Workflows
//!
//! Orchestrates domain logic with port interfaces. Each use case is a
//! self-contained analysis the presentation layer can call.
//!
//! Use cases:
//! - `BehaviourAnalyzer`: Bias report and rationality score over a window
//! - `ValueScanner`: Value-bet alerts on upcoming fixtures
//! - `RiskComparison`: Cross-game ROI and risk-adjusted ranking
//! - `SimulationRunner`: Parallel Monte Carlo projection

pub mod behaviour_analyzer;
pub mod risk_comparison;
pub mod simulation_runner;
pub mod value_scanner;

pub use behaviour_analyzer::{BehaviourAnalyzer, BehaviourAssessment};
pub use risk_comparison::RiskComparison;
pub use simulation_runner::SimulationRunner;
pub use value_scanner::ValueScanner;
