//! Per-session aggregates consumed by the risk comparator.
//!
//! A session is one calendar day (UTC) of play in one game category.
//! Stores that already keep session totals can hand them over directly;
//! stores that only keep raw wagers derive them with [`sessions_by_day`].

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

use super::wager::{CategoryId, WagerRecord};

/// Totals for one play session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionAggregate {
    /// Amount staked during the session.
    pub stakes: Decimal,
    /// Gross amount paid back (stake included).
    pub returns: Decimal,
    pub wager_count: u32,
    pub won_count: u32,
}

impl SessionAggregate {
    pub fn new(stakes: Decimal, returns: Decimal, wager_count: u32, won_count: u32) -> Self {
        Self {
            stakes,
            returns,
            wager_count,
            won_count,
        }
    }

    /// `returns - stakes`.
    pub fn profit(&self) -> Decimal {
        self.returns - self.stakes
    }

    pub fn profit_f64(&self) -> f64 {
        self.profit().to_f64().unwrap_or(0.0)
    }

    /// Folds one settled wager into the session.
    pub fn record(&mut self, wager: &WagerRecord) {
        self.stakes += wager.stake;
        self.returns += wager.gross_return();
        self.wager_count += 1;
        if wager.is_won() {
            self.won_count += 1;
        }
    }
}

/// Groups settled wagers into daily sessions per category.
///
/// Pending wagers are left out: their return is not known yet. Sessions
/// within a category are ordered by day.
pub fn sessions_by_day(wagers: &[WagerRecord]) -> BTreeMap<CategoryId, Vec<SessionAggregate>> {
    let mut days: BTreeMap<CategoryId, BTreeMap<NaiveDate, SessionAggregate>> = BTreeMap::new();

    for wager in wagers.iter().filter(|w| w.is_settled()) {
        days.entry(wager.category.clone())
            .or_default()
            .entry(wager.placed_at.date_naive())
            .or_default()
            .record(wager);
    }

    days.into_iter()
        .map(|(category, by_day)| (category, by_day.into_values().collect()))
        .collect()
}
