//! Rationality score: one number summarising a bias report.

use serde::{Deserialize, Serialize};

use super::bias::BiasReport;

/// Behavioural rationality on a 0–100 scale (100 = no bias detected).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RationalityScore(u8);

impl RationalityScore {
    pub const PERFECT: Self = Self(100);

    /// `100 - round(mean severity)`, floored at zero. A report with no
    /// findings scores [`RationalityScore::PERFECT`].
    pub fn from_report(report: &BiasReport) -> Self {
        Self::from_severities(report.iter().map(|(_, f)| f.severity))
    }

    /// Same aggregation over raw severities.
    pub fn from_severities(severities: impl IntoIterator<Item = u8>) -> Self {
        let (sum, count) = severities
            .into_iter()
            .fold((0u32, 0u32), |(s, c), sev| (s + u32::from(sev.min(100)), c + 1));
        if count == 0 {
            return Self::PERFECT;
        }
        let mean = (f64::from(sum) / f64::from(count)).round();
        Self((100.0 - mean).max(0.0) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for RationalityScore {
    fn default() -> Self {
        Self::PERFECT
    }
}

impl std::fmt::Display for RationalityScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/100", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bias::{BiasFinding, BiasKind};

    #[test]
    fn test_clean_report_is_perfect() {
        assert_eq!(RationalityScore::from_report(&BiasReport::clean()).value(), 100);
    }

    #[test]
    fn test_no_findings_is_perfect() {
        assert_eq!(RationalityScore::from_severities([]), RationalityScore::PERFECT);
    }

    #[test]
    fn test_single_gambler_finding() {
        let mut report = BiasReport::clean();
        report.set(BiasKind::GamblerFallacy, BiasFinding::per_occurrence(1, 20));
        // 100 - round(20 / 6) = 100 - 3
        assert_eq!(RationalityScore::from_report(&report).value(), 97);
    }

    #[test]
    fn test_rounds_half_away_from_zero() {
        // mean 2.5 rounds to 3
        assert_eq!(RationalityScore::from_severities([5, 0]).value(), 97);
    }

    #[test]
    fn test_all_max_severity_is_zero() {
        assert_eq!(RationalityScore::from_severities([100; 6]).value(), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(RationalityScore::PERFECT.to_string(), "100/100");
    }
}
