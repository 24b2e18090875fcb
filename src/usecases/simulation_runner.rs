//! Simulation Runner - Parallel Monte Carlo Projection
//!
//! Validates a simulation request against the configured bounds and fans
//! the trajectories out over blocking worker tasks. Each worker handles a
//! contiguous index range; per-trajectory seeding makes the merged result
//! identical to a single-threaded run with the same base seed.

use anyhow::{Context, Result};
use tracing::{debug, info, instrument};

use crate::config::SimulationConfig;
use crate::domain::monte_carlo::{SimulationParams, SimulationSummary, simulate_range};

/// Runs Monte Carlo simulations on the blocking thread pool.
pub struct SimulationRunner {
  /// Hard cap on trajectories per run.
  max_simulations: usize,
  /// Number of worker tasks a run is split across.
  workers: usize,
}

impl SimulationRunner {
  /// Create a new runner from config.
  pub fn new(config: &SimulationConfig) -> Self {
    Self {
      max_simulations: config.max_simulations,
      workers: config.workers.max(1),
    }
  }

  pub fn max_simulations(&self) -> usize {
    self.max_simulations
  }

  /// Run every trajectory of `params` and summarise the final balances.
  #[instrument(skip(self), fields(game = %params.game, simulations = params.simulations))]
  pub async fn run(&self, params: SimulationParams) -> Result<SimulationSummary> {
    params.validate(self.max_simulations)?;
    let seed = params.resolve_seed();

    let chunk = params.simulations.div_ceil(self.workers);
    let mut handles = Vec::with_capacity(self.workers);

    for start in (0..params.simulations).step_by(chunk) {
      let end = (start + chunk).min(params.simulations);
      let worker_params = params.clone();
      debug!(start, end, "Spawning simulation worker");
      handles.push(tokio::task::spawn_blocking(move || {
        simulate_range(&worker_params, seed, start..end)
      }));
    }

    // Awaiting in spawn order keeps balances in trajectory order
    let mut balances = Vec::with_capacity(params.simulations);
    for handle in handles {
      balances.extend(handle.await.context("Simulation worker panicked")?);
    }

    let summary = SimulationSummary::from_balances(balances, params.total_wagered());

    info!(
      seed,
      total_wagered = summary.total_wagered,
      mean = summary.mean,
      median = summary.median,
      percent_positive = summary.percent_positive,
      "Monte Carlo simulation complete"
    );
    Ok(summary)
  }
}
