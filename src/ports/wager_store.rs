//! Wager Store Port - Read Access to Betting History
//!
//! Defines the interface the analytics usecases need from whatever
//! persists wagers and fixtures. The engine never writes through this
//! port: records are facts owned by the store.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::session::SessionAggregate;
use crate::domain::wager::{CategoryId, MatchOdds, WagerRecord};

/// Trait for wager/match history providers.
///
/// Windows are half-open: `from <= t < to`.
#[async_trait]
pub trait WagerStore: Send + Sync + 'static {
  /// Wagers placed in the window, oldest first.
  async fn load_wagers(
    &self,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
  ) -> anyhow::Result<Vec<WagerRecord>>;

  /// Per-category session aggregates for the window.
  async fn load_sessions(
    &self,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
  ) -> anyhow::Result<BTreeMap<CategoryId, Vec<SessionAggregate>>>;

  /// Fixtures kicking off in the window, with their published odds.
  async fn load_upcoming_matches(
    &self,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
  ) -> anyhow::Result<Vec<MatchOdds>>;

  /// Check if the backing storage is reachable.
  async fn is_healthy(&self) -> bool;
}
