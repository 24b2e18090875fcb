//! Behavioural bias detection over a chronological wager history.
//!
//! Six rule-of-thumb detectors run over a single pass of the window the
//! caller selected. They are advisory heuristics, not calibrated models:
//! the default thresholds below are kept stable so reports stay comparable
//! over time, and changing them is a product decision.
//!
//! Confirmation bias is always reported as not detected. Ground-truth
//! stake/outcome records carry no signal about how a bettor *remembers*
//! wins and losses, so it cannot be inferred without a new input such as a
//! self-reported win rate.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::stats;
use super::wager::{WagerOutcome, WagerRecord};

/// The six behavioural biases the detector reports on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiasKind {
    GamblerFallacy,
    ChasingLosses,
    HotHand,
    SunkCost,
    Anchoring,
    ConfirmationBias,
}

impl BiasKind {
    /// Every kind, in report order.
    pub const ALL: [Self; 6] = [
        Self::GamblerFallacy,
        Self::ChasingLosses,
        Self::HotHand,
        Self::SunkCost,
        Self::Anchoring,
        Self::ConfirmationBias,
    ];

    /// Stable snake_case key, identical to the serialized form.
    pub fn key(self) -> &'static str {
        match self {
            Self::GamblerFallacy => "gambler_fallacy",
            Self::ChasingLosses => "chasing_losses",
            Self::HotHand => "hot_hand",
            Self::SunkCost => "sunk_cost",
            Self::Anchoring => "anchoring",
            Self::ConfirmationBias => "confirmation_bias",
        }
    }
}

impl std::fmt::Display for BiasKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Outcome of one detector.
///
/// Invariant: `detected == (occurrences > 0)` and `severity <= 100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BiasFinding {
    pub detected: bool,
    pub occurrences: u32,
    pub severity: u8,
}

impl BiasFinding {
    /// A clean finding: nothing detected.
    pub const NONE: Self = Self {
        detected: false,
        occurrences: 0,
        severity: 0,
    };

    /// Finding whose severity grows linearly per occurrence, capped at 100.
    pub fn per_occurrence(occurrences: u32, points_each: u32) -> Self {
        Self::with_severity(occurrences, occurrences.saturating_mul(points_each))
    }

    /// Finding with an explicit severity; zero occurrences always yields
    /// [`BiasFinding::NONE`].
    pub fn with_severity(occurrences: u32, severity: u32) -> Self {
        if occurrences == 0 {
            return Self::NONE;
        }
        Self {
            detected: true,
            occurrences,
            severity: severity.min(100) as u8,
        }
    }
}

/// Tunable thresholds for the detectors.
///
/// `Default` carries the reference values every report is calibrated on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiasThresholds {
    /// Consecutive losses/wins that form a streak.
    pub streak_length: u32,
    /// Stake multiple of the mean that counts as a raise after a streak.
    pub streak_stake_multiple: f64,
    /// Severity points per gambler's-fallacy or hot-hand occurrence.
    pub streak_points: u32,
    /// Stake multiple of the mean that counts as chasing after a loss.
    pub chase_stake_multiple: f64,
    /// Severity points per chasing occurrence.
    pub chase_points: u32,
    /// Share of wagers on one counterpart above which anchoring is flagged.
    pub anchoring_ratio: f64,
    /// Minimum sample size before sunk cost can be flagged.
    pub sunk_cost_min_wagers: usize,
    /// Fixed severity of a sunk-cost finding.
    pub sunk_cost_severity: u8,
}

impl Default for BiasThresholds {
    fn default() -> Self {
        Self {
            streak_length: 3,
            streak_stake_multiple: 1.5,
            streak_points: 20,
            chase_stake_multiple: 2.0,
            chase_points: 15,
            anchoring_ratio: 0.3,
            sunk_cost_min_wagers: 30,
            sunk_cost_severity: 80,
        }
    }
}

/// Findings for all six bias kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BiasReport {
    findings: BTreeMap<BiasKind, BiasFinding>,
}

impl BiasReport {
    /// A report with every kind present and nothing detected.
    pub fn clean() -> Self {
        Self {
            findings: BiasKind::ALL.iter().map(|k| (*k, BiasFinding::NONE)).collect(),
        }
    }

    /// Replaces the finding for one kind.
    pub fn set(&mut self, kind: BiasKind, finding: BiasFinding) {
        self.findings.insert(kind, finding);
    }

    /// Finding for `kind` (clean if absent).
    pub fn get(&self, kind: BiasKind) -> BiasFinding {
        self.findings.get(&kind).copied().unwrap_or(BiasFinding::NONE)
    }

    /// Iterates findings in kind order.
    pub fn iter(&self) -> impl Iterator<Item = (BiasKind, BiasFinding)> + '_ {
        self.findings.iter().map(|(k, f)| (*k, *f))
    }

    /// Kinds flagged as detected.
    pub fn detected(&self) -> Vec<BiasKind> {
        self.iter().filter(|(_, f)| f.detected).map(|(k, _)| k).collect()
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }
}

impl Default for BiasReport {
    fn default() -> Self {
        Self::clean()
    }
}

/// Runs all six detectors with the reference thresholds.
pub fn detect_biases(wagers: &[WagerRecord]) -> BiasReport {
    BiasDetector::default().detect(wagers)
}

/// Bias detector parameterised by [`BiasThresholds`].
#[derive(Debug, Clone, Default)]
pub struct BiasDetector {
    thresholds: BiasThresholds,
}

impl BiasDetector {
    pub fn new(thresholds: BiasThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &BiasThresholds {
        &self.thresholds
    }

    /// Scans `wagers` (oldest first) and returns one finding per kind.
    ///
    /// An empty window yields [`BiasReport::clean`].
    pub fn detect(&self, wagers: &[WagerRecord]) -> BiasReport {
        let mut report = BiasReport::clean();
        if wagers.is_empty() {
            return report;
        }

        let stakes: Vec<f64> = wagers.iter().map(WagerRecord::stake_f64).collect();
        let mean_stake = stats::mean(&stakes);

        let streaks = self.streak_raises(wagers, mean_stake);
        let t = &self.thresholds;

        report.set(
            BiasKind::GamblerFallacy,
            BiasFinding::per_occurrence(streaks.after_losses, t.streak_points),
        );
        report.set(
            BiasKind::HotHand,
            BiasFinding::per_occurrence(streaks.after_wins, t.streak_points),
        );
        report.set(
            BiasKind::ChasingLosses,
            BiasFinding::per_occurrence(self.chases(wagers, mean_stake), t.chase_points),
        );
        report.set(BiasKind::Anchoring, self.anchoring(wagers));
        report.set(BiasKind::SunkCost, self.sunk_cost(wagers));
        report.set(BiasKind::ConfirmationBias, BiasFinding::NONE);

        trace!(
            wagers = wagers.len(),
            mean_stake,
            detected = ?report.detected(),
            "Bias scan complete"
        );
        report
    }

    /// Counts raises that immediately follow a losing or winning streak.
    ///
    /// A pending wager breaks both streaks: its result is unknown.
    fn streak_raises(&self, wagers: &[WagerRecord], mean_stake: f64) -> StreakRaises {
        let t = &self.thresholds;
        let raise_above = mean_stake * t.streak_stake_multiple;

        let mut raises = StreakRaises::default();
        let mut losses = 0u32;
        let mut wins = 0u32;

        for wager in wagers {
            let stake = wager.stake_f64();
            if losses >= t.streak_length && stake > raise_above {
                raises.after_losses += 1;
            }
            if wins >= t.streak_length && stake > raise_above {
                raises.after_wins += 1;
            }

            match wager.outcome {
                WagerOutcome::Lost => {
                    losses += 1;
                    wins = 0;
                }
                WagerOutcome::Won => {
                    wins += 1;
                    losses = 0;
                }
                WagerOutcome::Pending => {
                    losses = 0;
                    wins = 0;
                }
            }
        }
        raises
    }

    /// Adjacent pairs where a loss is followed by an outsized stake.
    fn chases(&self, wagers: &[WagerRecord], mean_stake: f64) -> u32 {
        let chase_above = mean_stake * self.thresholds.chase_stake_multiple;
        wagers
            .windows(2)
            .filter(|pair| pair[0].is_lost() && pair[1].stake_f64() > chase_above)
            .count() as u32
    }

    /// Concentration on the single most frequent counterpart.
    ///
    /// The ratio is taken over the whole window, including wagers that
    /// carry no counterpart.
    fn anchoring(&self, wagers: &[WagerRecord]) -> BiasFinding {
        let mut counts: HashMap<&str, u32> = HashMap::new();
        for counterpart in wagers.iter().filter_map(|w| w.counterpart.as_deref()) {
            *counts.entry(counterpart).or_default() += 1;
        }

        let max_count = counts.values().copied().max().unwrap_or(0);
        let ratio = f64::from(max_count) / wagers.len() as f64;

        if ratio > self.thresholds.anchoring_ratio {
            BiasFinding::with_severity(max_count, (ratio * 100.0).round() as u32)
        } else {
            BiasFinding::NONE
        }
    }

    /// Persisting with a losing record over a large enough sample.
    fn sunk_cost(&self, wagers: &[WagerRecord]) -> BiasFinding {
        let t = &self.thresholds;
        let total: Decimal = wagers.iter().map(WagerRecord::net_gain).sum();

        if total < Decimal::ZERO && wagers.len() >= t.sunk_cost_min_wagers {
            BiasFinding::with_severity(1, u32::from(t.sunk_cost_severity))
        } else {
            BiasFinding::NONE
        }
    }
}

#[derive(Debug, Default)]
struct StreakRaises {
    after_losses: u32,
    after_wins: u32,
}
