//! Risk Comparison - Cross-Game ROI and Risk-Adjusted Ranking
//!
//! Loads per-category session aggregates for the comparison window and
//! scores each category independently.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use tracing::{info, instrument, warn};

use crate::config::AnalysisConfig;
use crate::domain::risk_metrics::{CategoryComparison, compare_categories};
use crate::ports::wager_store::WagerStore;

/// Compares game categories over a rolling window.
pub struct RiskComparison<S: WagerStore> {
  /// Session aggregate port.
  store: Arc<S>,
  /// Comparison window.
  window: Duration,
}

impl<S: WagerStore> RiskComparison<S> {
  /// Create a new comparison from config.
  pub fn new(store: Arc<S>, analysis: &AnalysisConfig) -> Self {
    Self {
      store,
      window: Duration::days(i64::from(analysis.comparison_days)),
    }
  }

  /// Override the comparison window.
  #[must_use]
  pub fn with_window_days(mut self, days: u32) -> Self {
    self.window = Duration::days(i64::from(days));
    self
  }

  /// Metrics per category for `[now - window, now)`.
  #[instrument(skip(self))]
  pub async fn compare(&self, now: DateTime<Utc>) -> Result<CategoryComparison> {
    let sessions = self
      .store
      .load_sessions(now - self.window, now)
      .await
      .context("Failed to load session aggregates")?;

    if sessions.is_empty() {
      warn!("No sessions in comparison window");
    }

    let comparison = compare_categories(&sessions);

    info!(
      categories = comparison.len(),
      best = comparison.best().map(|(c, _)| c.as_str()),
      "Cross-game comparison complete"
    );
    Ok(comparison)
  }
}
