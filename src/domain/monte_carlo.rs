//! Monte Carlo projection of long-run wagering outcomes.
//!
//! Each game type is reduced to two independent Bernoulli payouts per
//! weekly draw: a frequent small win and a rare large win. The
//! probabilities and multipliers below are simplified approximations of
//! public payout tables, good enough to show the shape of the long-run
//! distribution. They are not the operators' real tables: the "large win"
//! is a capped top tier rather than a jackpot, sized so the per-draw payout
//! variance stays small enough for the means of two 5 000-trajectory runs
//! over a ten-year horizon to agree within a few percent.
//!
//! Every trajectory owns an RNG seeded from `base_seed + index`, so a run
//! is reproducible and gives the same balances however the trajectories
//! are partitioned across workers.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::{AnalyticsError, ensure_positive};
use super::stats;

/// Draws per simulated year.
pub const WEEKS_PER_YEAR: u32 = 52;

/// Default upper bound on trajectories per run.
pub const DEFAULT_MAX_SIMULATIONS: usize = 10_000;

/// Longest horizon a run may project.
pub const MAX_YEARS: u32 = 100;

/// Games the simulator knows how to model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameType {
    Loto,
    EuroMillions,
    Keno,
    ScratchCard,
}

impl GameType {
    pub const ALL: [Self; 4] = [Self::Loto, Self::EuroMillions, Self::Keno, Self::ScratchCard];

    /// Payout model for this game.
    pub fn model(self) -> GameModel {
        match self {
            // ~1 in 9.7 small prize; top tier 1 in 1000
            Self::Loto => GameModel {
                small_win_prob: 0.103,
                small_win_multiplier: 2.2,
                large_win_prob: 0.001,
                large_win_multiplier: 200.0,
            },
            // ~1 in 13 small prize; top tier 1 in 1250
            Self::EuroMillions => GameModel {
                small_win_prob: 1.0 / 13.0,
                small_win_multiplier: 2.5,
                large_win_prob: 0.0008,
                large_win_multiplier: 250.0,
            },
            Self::Keno => GameModel {
                small_win_prob: 0.25,
                small_win_multiplier: 1.6,
                large_win_prob: 0.002,
                large_win_multiplier: 100.0,
            },
            Self::ScratchCard => GameModel {
                small_win_prob: 0.30,
                small_win_multiplier: 1.5,
                large_win_prob: 0.01,
                large_win_multiplier: 20.0,
            },
        }
    }
}

impl std::fmt::Display for GameType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loto => write!(f, "loto"),
            Self::EuroMillions => write!(f, "euro_millions"),
            Self::Keno => write!(f, "keno"),
            Self::ScratchCard => write!(f, "scratch_card"),
        }
    }
}

impl std::str::FromStr for GameType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "loto" | "lotto" => Ok(Self::Loto),
            "euro_millions" | "euromillions" => Ok(Self::EuroMillions),
            "keno" => Ok(Self::Keno),
            "scratch_card" | "scratch" => Ok(Self::ScratchCard),
            other => Err(format!("unknown game type: {other}")),
        }
    }
}

/// Two-event payout model; multipliers are gross, per unit staked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameModel {
    pub small_win_prob: f64,
    pub small_win_multiplier: f64,
    pub large_win_prob: f64,
    pub large_win_multiplier: f64,
}

impl GameModel {
    /// Expected amount paid back per unit staked.
    pub fn expected_return(&self) -> f64 {
        stats::expected_value(&[
            (self.small_win_prob, self.small_win_multiplier),
            (self.large_win_prob, self.large_win_multiplier),
        ])
    }

    /// Variance of the amount paid back per unit staked in one draw.
    pub fn payout_variance(&self) -> f64 {
        let bernoulli = |p: f64, m: f64| p * (1.0 - p) * m * m;
        bernoulli(self.small_win_prob, self.small_win_multiplier)
            + bernoulli(self.large_win_prob, self.large_win_multiplier)
    }
}

/// Inputs for one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    /// Amount staked every week.
    pub weekly_stake: f64,
    pub years: u32,
    pub game: GameType,
    /// Number of independent trajectories.
    pub simulations: usize,
    /// Base seed; a random one is drawn when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl SimulationParams {
    pub fn new(weekly_stake: f64, years: u32, game: GameType, simulations: usize) -> Self {
        Self {
            weekly_stake,
            years,
            game,
            simulations,
            seed: None,
        }
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Weekly draws per trajectory.
    pub fn periods(&self) -> u32 {
        self.years.saturating_mul(WEEKS_PER_YEAR)
    }

    /// `stake * periods`; independent of the random draws.
    pub fn total_wagered(&self) -> f64 {
        self.weekly_stake * f64::from(self.periods())
    }

    /// Rejects non-positive stake or duration, horizons beyond [`MAX_YEARS`]
    /// and unbounded run sizes.
    pub fn validate(&self, max_simulations: usize) -> Result<(), AnalyticsError> {
        ensure_positive("weekly_stake", self.weekly_stake)?;
        if self.years == 0 {
            return Err(AnalyticsError::NonPositive {
                name: "years",
                value: 0.0,
            });
        }
        if self.years > MAX_YEARS {
            return Err(AnalyticsError::InvalidInput(format!(
                "years must be at most {MAX_YEARS}, got {}",
                self.years
            )));
        }
        if self.simulations == 0 {
            return Err(AnalyticsError::InvalidInput(
                "at least one simulation is required".into(),
            ));
        }
        if self.simulations > max_simulations {
            return Err(AnalyticsError::TooManySimulations {
                requested: self.simulations,
                max: max_simulations,
            });
        }
        Ok(())
    }

    /// Base seed for this run, drawing one if none was fixed.
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

/// Distribution of final balances over a batch of trajectories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub final_balances: Vec<f64>,
    pub total_wagered: f64,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    /// Share of trajectories ending above zero, in percent.
    pub percent_positive: f64,
}

impl SimulationSummary {
    pub fn from_balances(final_balances: Vec<f64>, total_wagered: f64) -> Self {
        let n = final_balances.len();
        let positive = final_balances.iter().filter(|b| **b > 0.0).count();
        let (min, max) = if n == 0 {
            (0.0, 0.0)
        } else {
            final_balances
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), b| (lo.min(*b), hi.max(*b)))
        };

        Self {
            mean: stats::mean(&final_balances),
            median: stats::median(&final_balances),
            min,
            max,
            percent_positive: if n == 0 {
                0.0
            } else {
                positive as f64 / n as f64 * 100.0
            },
            total_wagered,
            final_balances,
        }
    }
}

/// Seed of trajectory `index` within a run.
pub fn trajectory_seed(base_seed: u64, index: usize) -> u64 {
    base_seed.wrapping_add(index as u64)
}

/// Final balance of a single trajectory.
pub fn simulate_trajectory(model: &GameModel, weekly_stake: f64, periods: u32, seed: u64) -> f64 {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut balance = 0.0;

    for _ in 0..periods {
        balance -= weekly_stake;
        if rng.gen_bool(model.small_win_prob) {
            balance += weekly_stake * model.small_win_multiplier;
        }
        if rng.gen_bool(model.large_win_prob) {
            balance += weekly_stake * model.large_win_multiplier;
        }
    }
    balance
}

/// Final balances of trajectories `range` of a run seeded with `base_seed`.
pub fn simulate_range(
    params: &SimulationParams,
    base_seed: u64,
    range: std::ops::Range<usize>,
) -> Vec<f64> {
    let model = params.game.model();
    let periods = params.periods();
    range
        .map(|i| simulate_trajectory(&model, params.weekly_stake, periods, trajectory_seed(base_seed, i)))
        .collect()
}

/// Runs every trajectory on the calling thread.
pub fn simulate(
    params: &SimulationParams,
    max_simulations: usize,
) -> Result<SimulationSummary, AnalyticsError> {
    params.validate(max_simulations)?;
    let seed = params.resolve_seed();

    debug!(
        game = %params.game,
        simulations = params.simulations,
        periods = params.periods(),
        seed,
        "Running Monte Carlo simulation"
    );

    let balances = simulate_range(params, seed, 0..params.simulations);
    Ok(SimulationSummary::from_balances(balances, params.total_wagered()))
}
