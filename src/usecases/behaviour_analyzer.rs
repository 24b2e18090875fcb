//! Behaviour Analyzer - Bias Report and Rationality Score
//!
//! Loads the caller's recent wager history from the store, runs the bias
//! detector over it and condenses the findings into a rationality score.
//!
//! Flow:
//! 1. Load wagers for `[now - lookback, now)`
//! 2. Restore chronological order if the store did not guarantee it
//! 3. Detect the six biases
//! 4. Aggregate severities into a 0-100 score

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::config::AnalysisConfig;
use crate::domain::bias::{BiasDetector, BiasKind, BiasReport, BiasThresholds};
use crate::domain::rationality::RationalityScore;
use crate::domain::wager::WagerRecord;
use crate::ports::wager_store::WagerStore;

/// Result of one behavioural assessment.
#[derive(Debug, Clone, Serialize)]
pub struct BehaviourAssessment {
  pub window_start: DateTime<Utc>,
  pub window_end: DateTime<Utc>,
  pub wager_count: usize,
  pub score: RationalityScore,
  pub detected: Vec<BiasKind>,
  pub findings: BiasReport,
}

/// Runs bias detection over a rolling look-back window.
pub struct BehaviourAnalyzer<S: WagerStore> {
  /// Wager history port.
  store: Arc<S>,
  /// Configured detector.
  detector: BiasDetector,
  /// Look-back window.
  lookback: Duration,
}

impl<S: WagerStore> BehaviourAnalyzer<S> {
  /// Create a new analyzer from config.
  pub fn new(store: Arc<S>, analysis: &AnalysisConfig, thresholds: BiasThresholds) -> Self {
    Self {
      store,
      detector: BiasDetector::new(thresholds),
      lookback: Duration::days(i64::from(analysis.lookback_days)),
    }
  }

  /// Override the look-back window (e.g. from a CLI flag).
  #[must_use]
  pub fn with_lookback_days(mut self, days: u32) -> Self {
    self.lookback = Duration::days(i64::from(days));
    self
  }

  /// Assess the window ending at `now`.
  #[instrument(skip(self))]
  pub async fn assess(&self, now: DateTime<Utc>) -> Result<BehaviourAssessment> {
    let from = now - self.lookback;
    let wagers = self
      .store
      .load_wagers(from, now)
      .await
      .context("Failed to load wager history")?;

    let assessment = self.assess_history(from, now, wagers);

    info!(
      wagers = assessment.wager_count,
      score = assessment.score.value(),
      detected = ?assessment.detected,
      "Behaviour assessment complete"
    );
    Ok(assessment)
  }

  /// Assess an already-loaded history.
  pub fn assess_history(
    &self,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    mut wagers: Vec<WagerRecord>,
  ) -> BehaviourAssessment {
    if !wagers.is_sorted_by_key(|w| w.placed_at) {
      debug!("Wager history out of order, sorting by placement time");
      wagers.sort_by_key(|w| w.placed_at);
    }

    let findings = self.detector.detect(&wagers);
    BehaviourAssessment {
      window_start,
      window_end,
      wager_count: wagers.len(),
      score: RationalityScore::from_report(&findings),
      detected: findings.detected(),
      findings,
    }
  }
}
