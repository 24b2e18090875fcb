//! Value-bet alert scanner for upcoming 1X2 markets.
//!
//! Three independent price heuristics flag matches worth a second look.
//! They are not edge estimates: an alert only says the published price
//! sits in a band that is often mispriced.

use serde::{Deserialize, Serialize};

use super::wager::{MatchId, MatchOdds};

/// Heuristic that produced an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    /// Long home price.
    HomeValue,
    /// Long away price.
    AwayValue,
    /// Draw priced inside the tight band.
    LikelyDraw,
}

impl AlertKind {
    /// Label shown to end users.
    pub fn label(self) -> &'static str {
        match self {
            Self::HomeValue => "value bet domicile",
            Self::AwayValue => "value bet extérieur",
            Self::LikelyDraw => "nul probable",
        }
    }
}

impl std::fmt::Display for AlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One flagged match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueAlert {
    pub match_id: MatchId,
    /// "Home vs Away".
    pub fixture: String,
    pub kind: AlertKind,
    pub reason: String,
    /// Higher ranks first.
    pub score: f64,
}

/// Price bands for the three heuristics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValueBetThresholds {
    /// Home odds strictly above this raise a home alert.
    pub home_min_odds: f64,
    /// Away odds strictly above this raise an away alert.
    pub away_min_odds: f64,
    /// Inclusive lower bound of the draw band.
    pub draw_low: f64,
    /// Inclusive upper bound of the draw band.
    pub draw_high: f64,
    /// Draw score is `draw_pivot - draw_odds`.
    pub draw_pivot: f64,
}

impl Default for ValueBetThresholds {
    fn default() -> Self {
        Self {
            home_min_odds: 3.0,
            away_min_odds: 3.5,
            draw_low: 3.0,
            draw_high: 3.3,
            draw_pivot: 3.5,
        }
    }
}

/// Scans with the reference thresholds.
pub fn scan_value_bets(matches: &[MatchOdds]) -> Vec<ValueAlert> {
    ValueBetScanner::default().scan(matches)
}

#[derive(Debug, Clone, Default)]
pub struct ValueBetScanner {
    thresholds: ValueBetThresholds,
}

impl ValueBetScanner {
    pub fn new(thresholds: ValueBetThresholds) -> Self {
        Self { thresholds }
    }

    /// Returns every alert, best score first. Ties keep input order.
    pub fn scan(&self, matches: &[MatchOdds]) -> Vec<ValueAlert> {
        let t = &self.thresholds;
        let mut alerts = Vec::new();

        for m in matches {
            if let Some(home) = price(m.home_odds).filter(|o| *o > t.home_min_odds) {
                alerts.push(alert(
                    m,
                    AlertKind::HomeValue,
                    format!("{} at home priced {home:.2} (above {:.2})", m.home, t.home_min_odds),
                    home,
                ));
            }
            if let Some(away) = price(m.away_odds).filter(|o| *o > t.away_min_odds) {
                alerts.push(alert(
                    m,
                    AlertKind::AwayValue,
                    format!("{} away priced {away:.2} (above {:.2})", m.away, t.away_min_odds),
                    away,
                ));
            }
            if let Some(draw) = price(m.draw_odds).filter(|o| (t.draw_low..=t.draw_high).contains(o)) {
                alerts.push(alert(
                    m,
                    AlertKind::LikelyDraw,
                    format!(
                        "draw priced {draw:.2} inside [{:.2}, {:.2}]",
                        t.draw_low, t.draw_high
                    ),
                    t.draw_pivot - draw,
                ));
            }
        }

        // sort_by is stable: equal scores keep input order
        alerts.sort_by(|a, b| b.score.total_cmp(&a.score));
        alerts
    }
}

/// Unusable prices (NaN, infinite) are treated as missing.
fn price(odds: Option<f64>) -> Option<f64> {
    odds.filter(|o| o.is_finite())
}

fn alert(m: &MatchOdds, kind: AlertKind, reason: String, score: f64) -> ValueAlert {
    ValueAlert {
        match_id: m.match_id.clone(),
        fixture: m.label(),
        kind,
        reason,
        score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn fixture(home: &str, away: &str, odds: (Option<f64>, Option<f64>, Option<f64>)) -> MatchOdds {
        let kickoff = Utc.with_ymd_and_hms(2026, 5, 2, 19, 0, 0).unwrap();
        MatchOdds::new(home, away, kickoff, "Ligue 1").with_odds(odds.0, odds.1, odds.2)
    }

    #[test]
    fn test_home_value_and_draw() {
        let alerts = scan_value_bets(&[fixture("Lens", "Brest", (Some(3.5), Some(3.1), Some(2.0)))]);
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].kind, AlertKind::HomeValue);
        assert_eq!(alerts[0].kind.label(), "value bet domicile");
        assert!((alerts[0].score - 3.5).abs() < 1e-12);
        assert_eq!(alerts[1].kind, AlertKind::LikelyDraw);
        assert!((alerts[1].score - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_away_threshold_is_strict() {
        let at = scan_value_bets(&[fixture("A", "B", (None, None, Some(3.5)))]);
        assert!(at.is_empty());
        let above = scan_value_bets(&[fixture("A", "B", (None, None, Some(3.6)))]);
        assert_eq!(above[0].kind, AlertKind::AwayValue);
        assert_eq!(above[0].kind.to_string(), "value bet extérieur");
    }

    #[test]
    fn test_draw_band_is_inclusive() {
        let low = scan_value_bets(&[fixture("A", "B", (None, Some(3.0), None))]);
        let high = scan_value_bets(&[fixture("A", "B", (None, Some(3.3), None))]);
        let out = scan_value_bets(&[fixture("A", "B", (None, Some(3.31), None))]);
        assert_eq!(low.len(), 1);
        assert_eq!(high.len(), 1);
        assert!(out.is_empty());
    }

    #[test]
    fn test_missing_odds_are_skipped() {
        assert!(scan_value_bets(&[fixture("A", "B", (None, None, None))]).is_empty());
        assert!(scan_value_bets(&[fixture("A", "B", (Some(f64::NAN), None, None))]).is_empty());
    }

    #[test]
    fn test_sorted_descending_with_stable_ties() {
        let alerts = scan_value_bets(&[
            fixture("First", "X", (Some(4.0), None, None)),
            fixture("Second", "Y", (Some(5.0), None, Some(4.0))),
        ]);
        let fixtures: Vec<&str> = alerts.iter().map(|a| a.fixture.as_str()).collect();
        assert_eq!(fixtures, ["Second vs Y", "First vs X", "Second vs Y"]);
        assert_eq!(alerts[1].kind, AlertKind::HomeValue);
        assert_eq!(alerts[2].kind, AlertKind::AwayValue);
    }

    #[test]
    fn test_empty_input() {
        assert!(scan_value_bets(&[]).is_empty());
    }
}
