//! Configuration Module - TOML-based Engine Configuration
//!
//! Loads and validates configuration from `config.toml`.
//! Analysis windows, simulation limits and heuristic thresholds are
//! externalized here; the domain layer only carries their defaults.

pub mod loader;

use serde::Deserialize;

use crate::domain::bias::BiasThresholds;
use crate::domain::monte_carlo::DEFAULT_MAX_SIMULATIONS;
use crate::domain::poisson::DEFAULT_MAX_GOALS;
use crate::domain::value_bet::ValueBetThresholds;

/// Top-level engine configuration.
///
/// Loaded from `config.toml` at startup. All fields are validated
/// before any analysis runs.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
  /// Engine identity and logging.
  pub engine: EngineConfig,
  /// History windows for each analysis.
  #[serde(default)]
  pub analysis: AnalysisConfig,
  /// Bias detector thresholds.
  #[serde(default)]
  pub bias: BiasThresholds,
  /// Value-bet price bands.
  #[serde(default)]
  pub value_bets: ValueBetThresholds,
  /// Monte Carlo limits.
  #[serde(default)]
  pub simulation: SimulationConfig,
  /// Scoreline model settings.
  #[serde(default)]
  pub poisson: PoissonConfig,
  /// Persistence configuration.
  pub persistence: PersistenceConfig,
}

/// Engine identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
  /// Human-readable instance name.
  pub name: String,
  /// Log level (trace, debug, info, warn, error).
  #[serde(default = "default_log_level")]
  pub log_level: String,
  /// Emit JSON log lines instead of the human-readable format.
  #[serde(default)]
  pub json_logs: bool,
}

/// Look-back and look-ahead windows, in days.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
  /// History scanned by the bias detector.
  #[serde(default = "default_lookback_days")]
  pub lookback_days: u32,
  /// History used by the cross-game comparison.
  #[serde(default = "default_comparison_days")]
  pub comparison_days: u32,
  /// Upcoming fixtures scanned for value bets.
  #[serde(default = "default_horizon_days")]
  pub horizon_days: u32,
}

impl Default for AnalysisConfig {
  fn default() -> Self {
    Self {
      lookback_days: default_lookback_days(),
      comparison_days: default_comparison_days(),
      horizon_days: default_horizon_days(),
    }
  }
}

/// Monte Carlo run limits.
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
  /// Hard cap on trajectories per run.
  #[serde(default = "default_max_simulations")]
  pub max_simulations: usize,
  /// Trajectories used when the caller does not ask for a count.
  #[serde(default = "default_simulations")]
  pub default_simulations: usize,
  /// Blocking worker tasks a run is split across.
  #[serde(default = "default_workers")]
  pub workers: usize,
}

impl Default for SimulationConfig {
  fn default() -> Self {
    Self {
      max_simulations: default_max_simulations(),
      default_simulations: default_simulations(),
      workers: default_workers(),
    }
  }
}

/// Scoreline model configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PoissonConfig {
  /// Goals per side covered by the grid.
  #[serde(default = "default_max_goals")]
  pub max_goals: usize,
}

impl Default for PoissonConfig {
  fn default() -> Self {
    Self {
      max_goals: default_max_goals(),
    }
  }
}

/// Persistence configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PersistenceConfig {
  /// Directory holding `wagers.jsonl` and `matches.jsonl`.
  #[serde(default = "default_data_dir")]
  pub data_dir: String,
}

// Default value functions for serde

fn default_log_level() -> String {
  "info".to_string()
}

fn default_lookback_days() -> u32 {
  30
}

fn default_comparison_days() -> u32 {
  90
}

fn default_horizon_days() -> u32 {
  7
}

fn default_max_simulations() -> usize {
  DEFAULT_MAX_SIMULATIONS
}

fn default_simulations() -> usize {
  1_000
}

fn default_workers() -> usize {
  4
}

fn default_max_goals() -> usize {
  DEFAULT_MAX_GOALS
}

fn default_data_dir() -> String {
  "data".to_string()
}
