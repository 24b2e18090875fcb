//! Core betting domain types.
//!
//! Defines the read-only facts the analytics engine consumes: settled or
//! pending wagers and the published 1X2 odds of upcoming matches.
//!
//! Exposes two API surfaces, as elsewhere in the domain:
//! - Money amounts (`Decimal`) on wager records, so sums stay exact
//! - `f64` accessors and odds for the statistical components

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lightweight game category label (e.g. "football", "loto").
pub type CategoryId = String;

/// Lightweight match identifier used at the ports boundary.
pub type MatchId = String;

/// Settlement state of a wager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WagerOutcome {
    Won,
    Lost,
    /// Not yet settled; contributes nothing to net gain.
    Pending,
}

impl std::fmt::Display for WagerOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Won => write!(f, "won"),
            Self::Lost => write!(f, "lost"),
            Self::Pending => write!(f, "pending"),
        }
    }
}

impl std::str::FromStr for WagerOutcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "won" | "win" => Ok(Self::Won),
            "lost" | "loss" => Ok(Self::Lost),
            "pending" => Ok(Self::Pending),
            other => Err(format!("unknown wager outcome: {other}")),
        }
    }
}

/// A single recorded bet.
///
/// Records are created by the external store when a real-world bet is
/// logged and are never mutated by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WagerRecord {
    /// Store-assigned identifier.
    pub id: Uuid,
    /// When the bet was placed.
    pub placed_at: DateTime<Utc>,
    /// Game category the bet belongs to.
    pub category: CategoryId,
    /// Amount staked (positive).
    pub stake: Decimal,
    /// Decimal odds offered (>= 1).
    pub odds: Decimal,
    /// Settlement state.
    pub outcome: WagerOutcome,
    /// Team or counterpart the bet was placed on, if any.
    #[serde(default)]
    pub counterpart: Option<String>,
}

impl WagerRecord {
    /// Creates a record with a fresh identifier and no counterpart.
    pub fn new(
        placed_at: DateTime<Utc>,
        category: impl Into<CategoryId>,
        stake: Decimal,
        odds: Decimal,
        outcome: WagerOutcome,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            placed_at,
            category: category.into(),
            stake,
            odds,
            outcome,
            counterpart: None,
        }
    }

    /// Attaches the counterpart used by the anchoring check.
    #[must_use]
    pub fn with_counterpart(mut self, counterpart: impl Into<String>) -> Self {
        self.counterpart = Some(counterpart.into());
        self
    }

    /// Net gain: `stake*(odds-1)` if won, `-stake` if lost, zero if pending.
    pub fn net_gain(&self) -> Decimal {
        match self.outcome {
            WagerOutcome::Won => self.stake * (self.odds - Decimal::ONE),
            WagerOutcome::Lost => -self.stake,
            WagerOutcome::Pending => Decimal::ZERO,
        }
    }

    /// Gross amount paid back: `stake*odds` if won, zero otherwise.
    pub fn gross_return(&self) -> Decimal {
        match self.outcome {
            WagerOutcome::Won => self.stake * self.odds,
            WagerOutcome::Lost | WagerOutcome::Pending => Decimal::ZERO,
        }
    }

    /// Stake as `f64` for the statistical components.
    pub fn stake_f64(&self) -> f64 {
        self.stake.to_f64().unwrap_or(0.0)
    }

    pub fn is_won(&self) -> bool {
        self.outcome == WagerOutcome::Won
    }

    pub fn is_lost(&self) -> bool {
        self.outcome == WagerOutcome::Lost
    }

    pub fn is_settled(&self) -> bool {
        self.outcome != WagerOutcome::Pending
    }
}

/// Published 1X2 odds for an upcoming match.
///
/// Any of the three prices may be missing; heuristics that need a
/// missing price simply skip the match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchOdds {
    /// Store-assigned match identifier.
    pub match_id: MatchId,
    /// Home side.
    pub home: String,
    /// Away side.
    pub away: String,
    /// Scheduled kick-off.
    pub kickoff: DateTime<Utc>,
    /// League or competition label.
    pub league: String,
    /// Decimal odds for a home win.
    #[serde(default)]
    pub home_odds: Option<f64>,
    /// Decimal odds for a draw.
    #[serde(default)]
    pub draw_odds: Option<f64>,
    /// Decimal odds for an away win.
    #[serde(default)]
    pub away_odds: Option<f64>,
}

impl MatchOdds {
    /// Creates a match with no prices; the id is derived from the sides
    /// and the kick-off date.
    pub fn new(
        home: impl Into<String>,
        away: impl Into<String>,
        kickoff: DateTime<Utc>,
        league: impl Into<String>,
    ) -> Self {
        let home = home.into();
        let away = away.into();
        Self {
            match_id: format!("{home}-{away}-{}", kickoff.format("%Y%m%d")),
            home,
            away,
            kickoff,
            league: league.into(),
            home_odds: None,
            draw_odds: None,
            away_odds: None,
        }
    }

    /// Sets the three 1X2 prices.
    #[must_use]
    pub fn with_odds(mut self, home: Option<f64>, draw: Option<f64>, away: Option<f64>) -> Self {
        self.home_odds = home;
        self.draw_odds = draw;
        self.away_odds = away;
        self
    }

    /// "Home vs Away" label for alerts and logs.
    pub fn label(&self) -> String {
        format!("{} vs {}", self.home, self.away)
    }
}
