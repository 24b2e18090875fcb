//! Cross-game risk and ROI comparison.
//!
//! Each game category is scored independently from its session history:
//! ROI, per-session profit spread, a Sharpe-style risk-adjusted score and
//! win rate. Categories can then be ranked side by side.
//!
//! Degenerate inputs never produce NaN: ROI and win rate fall back to zero
//! when their denominator is zero, and the standard deviation is floored
//! at [`STD_DEV_FLOOR`] before it divides the expectation.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use super::session::SessionAggregate;
use super::stats;
use super::wager::CategoryId;

/// Lower bound applied to the standard deviation in the risk-adjusted score.
pub const STD_DEV_FLOOR: f64 = 0.001;

/// Risk and return figures for one game category.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RiskMetrics {
    pub total_stakes: Decimal,
    pub total_returns: Decimal,
    /// `total_returns - total_stakes`.
    pub profit: Decimal,
    /// `profit / total_stakes * 100`, zero when nothing was staked.
    pub roi_pct: f64,
    /// Population variance of per-session profit.
    pub variance: f64,
    pub std_dev: f64,
    /// Mean per-session profit.
    pub expectation: f64,
    /// `expectation / max(std_dev, STD_DEV_FLOOR)`.
    pub risk_adjusted_score: f64,
    /// Won wagers over all wagers, in percent.
    pub win_rate_pct: f64,
    /// Number of sessions.
    pub sample_size: usize,
    /// Best session profit, zero if no session made money.
    pub max_session_gain: Decimal,
    /// Worst session profit, zero if no session lost money.
    pub max_session_loss: Decimal,
}

impl RiskMetrics {
    /// Scores one category. Zero sessions yields all-zero metrics.
    pub fn from_sessions(sessions: &[SessionAggregate]) -> Self {
        if sessions.is_empty() {
            return Self::default();
        }

        let total_stakes: Decimal = sessions.iter().map(|s| s.stakes).sum();
        let total_returns: Decimal = sessions.iter().map(|s| s.returns).sum();
        let profit = total_returns - total_stakes;

        let roi_pct = if total_stakes.is_zero() {
            0.0
        } else {
            (profit / total_stakes * Decimal::ONE_HUNDRED)
                .to_f64()
                .unwrap_or(0.0)
        };

        let profits: Vec<f64> = sessions.iter().map(SessionAggregate::profit_f64).collect();
        let expectation = stats::mean(&profits);
        let variance = stats::variance(&profits);
        let std_dev = variance.sqrt();
        let risk_adjusted_score = expectation / std_dev.max(STD_DEV_FLOOR);

        let wagers: u64 = sessions.iter().map(|s| u64::from(s.wager_count)).sum();
        let won: u64 = sessions.iter().map(|s| u64::from(s.won_count)).sum();
        let win_rate_pct = if wagers == 0 {
            0.0
        } else {
            won as f64 / wagers as f64 * 100.0
        };

        let session_profits = sessions.iter().map(SessionAggregate::profit);
        let max_session_gain = session_profits.clone().max().unwrap_or_default().max(Decimal::ZERO);
        let max_session_loss = session_profits.min().unwrap_or_default().min(Decimal::ZERO);

        Self {
            total_stakes,
            total_returns,
            profit,
            roi_pct,
            variance,
            std_dev,
            expectation,
            risk_adjusted_score,
            win_rate_pct,
            sample_size: sessions.len(),
            max_session_gain,
            max_session_loss,
        }
    }
}

/// Side-by-side metrics for several categories.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryComparison {
    categories: BTreeMap<CategoryId, RiskMetrics>,
}

impl CategoryComparison {
    pub fn get(&self, category: &str) -> Option<&RiskMetrics> {
        self.categories.get(category)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CategoryId, &RiskMetrics)> {
        self.categories.iter()
    }

    /// Categories by risk-adjusted score, best first. Ties keep name order.
    pub fn ranked(&self) -> Vec<(&CategoryId, &RiskMetrics)> {
        let mut ranked: Vec<_> = self.categories.iter().collect();
        ranked.sort_by(|a, b| b.1.risk_adjusted_score.total_cmp(&a.1.risk_adjusted_score));
        ranked
    }

    /// Category with the highest risk-adjusted score.
    pub fn best(&self) -> Option<(&CategoryId, &RiskMetrics)> {
        self.ranked().into_iter().next()
    }
}

/// Scores every category independently.
pub fn compare_categories(
    sessions: &BTreeMap<CategoryId, Vec<SessionAggregate>>,
) -> CategoryComparison {
    CategoryComparison {
        categories: sessions
            .iter()
            .map(|(category, s)| (category.clone(), RiskMetrics::from_sessions(s)))
            .collect(),
    }
}
