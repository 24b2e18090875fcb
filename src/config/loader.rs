//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating all parameters,
//! and providing clear error messages for misconfiguration.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::AppConfig;
use crate::domain::poisson::MAX_GOALS_LIMIT;

/// Load and validate configuration from a TOML file.
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
  let path = Path::new(path);

  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  let config = parse_config(&content)?;

  info!(
    name = %config.engine.name,
    lookback_days = config.analysis.lookback_days,
    max_simulations = config.simulation.max_simulations,
    data_dir = %config.persistence.data_dir,
    "Configuration loaded successfully"
  );

  Ok(config)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<AppConfig> {
  let config: AppConfig =
    toml::from_str(content).with_context(|| "Failed to parse config.toml")?;

  validate_config(&config)?;
  Ok(config)
}

/// Validate all configuration parameters.
///
/// Checks for:
/// - Non-empty analysis windows
/// - Sane simulation bounds
/// - Consistent heuristic thresholds
fn validate_config(config: &AppConfig) -> Result<()> {
  anyhow::ensure!(
    !config.engine.name.is_empty(),
    "engine.name must not be empty"
  );

  // Analysis windows
  let analysis = &config.analysis;
  anyhow::ensure!(
    analysis.lookback_days > 0,
    "analysis.lookback_days must be positive"
  );
  anyhow::ensure!(
    analysis.comparison_days > 0,
    "analysis.comparison_days must be positive"
  );
  anyhow::ensure!(
    analysis.horizon_days > 0,
    "analysis.horizon_days must be positive"
  );

  // Simulation bounds
  let sim = &config.simulation;
  anyhow::ensure!(
    sim.max_simulations > 0,
    "simulation.max_simulations must be positive"
  );
  anyhow::ensure!(
    sim.default_simulations > 0 && sim.default_simulations <= sim.max_simulations,
    "simulation.default_simulations must be in (0, {}], got {}",
    sim.max_simulations,
    sim.default_simulations
  );
  anyhow::ensure!(sim.workers > 0, "simulation.workers must be positive");

  anyhow::ensure!(
    config.poisson.max_goals > 0 && config.poisson.max_goals <= MAX_GOALS_LIMIT,
    "poisson.max_goals must be in (0, {MAX_GOALS_LIMIT}], got {}",
    config.poisson.max_goals
  );

  // Bias thresholds
  let bias = &config.bias;
  anyhow::ensure!(bias.streak_length > 0, "bias.streak_length must be positive");
  anyhow::ensure!(
    bias.streak_stake_multiple > 0.0 && bias.chase_stake_multiple > 0.0,
    "bias stake multiples must be positive"
  );
  anyhow::ensure!(
    bias.anchoring_ratio > 0.0 && bias.anchoring_ratio < 1.0,
    "bias.anchoring_ratio must be in (0, 1), got {}",
    bias.anchoring_ratio
  );
  anyhow::ensure!(
    bias.sunk_cost_severity <= 100,
    "bias.sunk_cost_severity must be at most 100"
  );

  // Value-bet bands
  let vb = &config.value_bets;
  anyhow::ensure!(
    vb.home_min_odds >= 1.0 && vb.away_min_odds >= 1.0,
    "value_bets odds thresholds must be at least 1.0"
  );
  anyhow::ensure!(
    vb.draw_low <= vb.draw_high,
    "value_bets.draw_low ({}) must not exceed draw_high ({})",
    vb.draw_low,
    vb.draw_high
  );

  Ok(())
}
