//! Wager Lens - Entry Point
//!
//! Command-line front end over the analytics engine. Every command prints
//! its structured result as JSON on stdout; logs go to stderr.
//!
//! Wiring sequence:
//! 1. Parse CLI arguments
//! 2. Load config.toml + validate
//! 3. Init tracing (plain or JSON structured logging)
//! 4. Open the JSONL wager store (WagerStore port)
//! 5. Dispatch the command to its use case or domain function

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use wager_lens::adapters::persistence::JsonlWagerStore;
use wager_lens::config::{self, AppConfig};
use wager_lens::domain::monte_carlo::{GameType, SimulationParams};
use wager_lens::domain::poisson::predict_scorelines;
use wager_lens::domain::wager::{MatchOdds, WagerOutcome, WagerRecord};
use wager_lens::usecases::{BehaviourAnalyzer, RiskComparison, SimulationRunner, ValueScanner};

#[derive(Debug, Parser)]
#[command(name = "wager-lens", version, about = "Gambling analytics and risk engine")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, short, env = "WAGER_LENS_CONFIG", default_value = "config.toml")]
    config: String,

    /// Override the data directory from the configuration.
    #[arg(long, env = "WAGER_LENS_DATA_DIR")]
    data_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Detect behavioural biases and score rationality over recent wagers.
    Biases {
        /// Look-back window in days.
        #[arg(long)]
        days: Option<u32>,
    },
    /// Flag upcoming fixtures whose odds match a value-bet heuristic.
    ValueBets {
        /// Look-ahead window in days.
        #[arg(long)]
        days: Option<u32>,
    },
    /// Compare ROI and risk-adjusted performance across game categories.
    Compare {
        /// Comparison window in days.
        #[arg(long)]
        days: Option<u32>,
    },
    /// Project long-run outcomes of a weekly stake with Monte Carlo.
    Simulate {
        /// Amount staked every week.
        #[arg(long)]
        stake: f64,
        /// Duration in years (at most 100).
        #[arg(long)]
        years: u32,
        /// Game type (loto, euro_millions, keno, scratch_card).
        #[arg(long)]
        game: GameType,
        /// Number of trajectories.
        #[arg(long)]
        runs: Option<usize>,
        /// Base seed for a reproducible run.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Scoreline grid and fair 1X2 odds from two expected-goals rates.
    Predict {
        /// Expected goals of the home side.
        #[arg(long)]
        home_xg: f64,
        /// Expected goals of the away side.
        #[arg(long)]
        away_xg: f64,
        /// Goals per side covered by the grid.
        #[arg(long)]
        max_goals: Option<usize>,
    },
    /// Record a wager in the data directory.
    AddWager {
        #[arg(long)]
        category: String,
        #[arg(long)]
        stake: Decimal,
        #[arg(long)]
        odds: Decimal,
        /// won, lost or pending.
        #[arg(long)]
        outcome: WagerOutcome,
        /// Team or counterpart the bet was placed on.
        #[arg(long)]
        counterpart: Option<String>,
        /// Placement time (RFC 3339); defaults to now.
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },
    /// Record an upcoming fixture with its 1X2 odds.
    AddMatch {
        #[arg(long)]
        home: String,
        #[arg(long)]
        away: String,
        /// Kick-off time (RFC 3339).
        #[arg(long)]
        kickoff: DateTime<Utc>,
        #[arg(long)]
        league: String,
        #[arg(long)]
        home_odds: Option<f64>,
        #[arg(long)]
        draw_odds: Option<f64>,
        #[arg(long)]
        away_odds: Option<f64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Parse arguments ──────────────────────────────────
    let cli = Cli::parse();

    // ── 2. Load configuration from config.toml ──────────────
    let mut config = config::loader::load_config(&cli.config)
        .context("Failed to load configuration")?;
    if let Some(dir) = cli.data_dir {
        config.persistence.data_dir = dir;
    }

    // ── 3. Initialize structured logging on stderr ──────────
    init_tracing(&config);

    info!(
        name = %config.engine.name,
        version = env!("CARGO_PKG_VERSION"),
        data_dir = %config.persistence.data_dir,
        "Starting Wager Lens"
    );

    // ── 4. Open the wager store ─────────────────────────────
    let store = Arc::new(
        JsonlWagerStore::new(&config.persistence.data_dir)
            .await
            .context("Failed to open wager store")?,
    );

    // ── 5. Dispatch ─────────────────────────────────────────
    run_command(cli.command, &config, store).await
}

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.engine.log_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.engine.json_logs {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run_command(
    command: Command,
    config: &AppConfig,
    store: Arc<JsonlWagerStore>,
) -> Result<()> {
    let now = Utc::now();

    match command {
        Command::Biases { days } => {
            let mut analyzer = BehaviourAnalyzer::new(store, &config.analysis, config.bias.clone());
            if let Some(days) = days {
                analyzer = analyzer.with_lookback_days(days);
            }
            print_json(&analyzer.assess(now).await?)
        }
        Command::ValueBets { days } => {
            let mut scanner = ValueScanner::new(store, &config.analysis, config.value_bets.clone());
            if let Some(days) = days {
                scanner = scanner.with_horizon_days(days);
            }
            print_json(&scanner.scan(now).await?)
        }
        Command::Compare { days } => {
            let mut comparison = RiskComparison::new(store, &config.analysis);
            if let Some(days) = days {
                comparison = comparison.with_window_days(days);
            }
            let result = comparison.compare(now).await?;
            print_json(&result)
        }
        Command::Simulate {
            stake,
            years,
            game,
            runs,
            seed,
        } => {
            let runs = runs.unwrap_or(config.simulation.default_simulations);
            let mut params = SimulationParams::new(stake, years, game, runs);
            if let Some(seed) = seed {
                params = params.with_seed(seed);
            }
            let summary = SimulationRunner::new(&config.simulation).run(params).await?;
            print_json(&summary)
        }
        Command::Predict {
            home_xg,
            away_xg,
            max_goals,
        } => {
            let k = max_goals.unwrap_or(config.poisson.max_goals);
            let distribution = predict_scorelines(home_xg, away_xg, k)?;
            print_json(&distribution)
        }
        Command::AddWager {
            category,
            stake,
            odds,
            outcome,
            counterpart,
            at,
        } => {
            anyhow::ensure!(stake > Decimal::ZERO, "stake must be positive");
            anyhow::ensure!(odds >= Decimal::ONE, "odds must be at least 1.0");
            let mut wager = WagerRecord::new(at.unwrap_or(now), category, stake, odds, outcome);
            if let Some(counterpart) = counterpart {
                wager = wager.with_counterpart(counterpart);
            }
            store.append_wager(&wager).await?;
            print_json(&wager)
        }
        Command::AddMatch {
            home,
            away,
            kickoff,
            league,
            home_odds,
            draw_odds,
            away_odds,
        } => {
            let fixture = MatchOdds::new(home, away, kickoff, league)
                .with_odds(home_odds, draw_odds, away_odds);
            store.append_match(&fixture).await?;
            print_json(&fixture)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize result")?;
    println!("{json}");
    Ok(())
}
