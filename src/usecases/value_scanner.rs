//! Value Scanner - Alerts on Upcoming Fixtures
//!
//! Pulls the fixtures kicking off within the configured horizon and runs
//! the value-bet heuristics over their published odds.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use tracing::{info, instrument};

use crate::config::AnalysisConfig;
use crate::domain::value_bet::{ValueAlert, ValueBetScanner, ValueBetThresholds};
use crate::ports::wager_store::WagerStore;

/// Scans upcoming fixtures for value-bet alerts.
pub struct ValueScanner<S: WagerStore> {
  /// Fixture port.
  store: Arc<S>,
  /// Configured heuristics.
  scanner: ValueBetScanner,
  /// Look-ahead window.
  horizon: Duration,
}

impl<S: WagerStore> ValueScanner<S> {
  /// Create a new scanner from config.
  pub fn new(store: Arc<S>, analysis: &AnalysisConfig, thresholds: ValueBetThresholds) -> Self {
    Self {
      store,
      scanner: ValueBetScanner::new(thresholds),
      horizon: Duration::days(i64::from(analysis.horizon_days)),
    }
  }

  /// Override the look-ahead window.
  #[must_use]
  pub fn with_horizon_days(mut self, days: u32) -> Self {
    self.horizon = Duration::days(i64::from(days));
    self
  }

  /// Alerts for fixtures in `[now, now + horizon)`, best first.
  #[instrument(skip(self))]
  pub async fn scan(&self, now: DateTime<Utc>) -> Result<Vec<ValueAlert>> {
    let matches = self
      .store
      .load_upcoming_matches(now, now + self.horizon)
      .await
      .context("Failed to load upcoming matches")?;

    let alerts = self.scanner.scan(&matches);

    info!(
      matches = matches.len(),
      alerts = alerts.len(),
      top_score = alerts.first().map(|a| a.score),
      "Value-bet scan complete"
    );
    Ok(alerts)
  }
}
