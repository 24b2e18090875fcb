//! Independent-Poisson scoreline model for 1X2 markets.
//!
//! Each side's goal count is modelled as an independent Poisson variable
//! with its own expected-goals rate. The joint distribution is evaluated on
//! a bounded `[0, K] x [0, K]` grid; mass beyond `K` goals is treated as
//! negligible (K = 6 keeps it under 1e-3 for rates up to about 1.3 goals;
//! callers modelling higher-scoring fixtures should widen the grid). A grid
//! that leaves more than [`MASS_TOLERANCE`] out emits a `debug!` event with
//! the captured mass.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::{AnalyticsError, ensure_positive};

/// Default grid bound.
pub const DEFAULT_MAX_GOALS: usize = 6;

/// Largest grid bound accepted.
pub const MAX_GOALS_LIMIT: usize = 30;

/// Probability mass the grid may leave out before truncation is logged.
pub const MASS_TOLERANCE: f64 = 1e-3;

/// Probability mass of `k` goals at rate `lambda`: `lambda^k e^-lambda / k!`.
pub fn poisson_pmf(k: usize, lambda: f64) -> f64 {
    poisson_pmfs(lambda, k)[k]
}

/// Masses for `0..=max_goals`, built by the recurrence
/// `p(k) = p(k-1) * lambda / k` so no factorial is ever materialised.
pub fn poisson_pmfs(lambda: f64, max_goals: usize) -> Vec<f64> {
    let mut pmfs = Vec::with_capacity(max_goals + 1);
    let mut p = (-lambda).exp();
    pmfs.push(p);
    for k in 1..=max_goals {
        p *= lambda / k as f64;
        pmfs.push(p);
    }
    pmfs
}

/// Home / draw / away probabilities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketProbabilities {
    pub home_win: f64,
    pub draw: f64,
    pub away_win: f64,
}

impl MarketProbabilities {
    pub fn total(&self) -> f64 {
        self.home_win + self.draw + self.away_win
    }
}

/// Fair decimal odds `1/p`; `None` when the probability is zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FairOdds {
    pub home_win: Option<f64>,
    pub draw: Option<f64>,
    pub away_win: Option<f64>,
}

impl FairOdds {
    fn from_probabilities(p: &MarketProbabilities) -> Self {
        Self {
            home_win: fair_price(p.home_win),
            draw: fair_price(p.draw),
            away_win: fair_price(p.away_win),
        }
    }
}

fn fair_price(probability: f64) -> Option<f64> {
    (probability > 0.0).then(|| 1.0 / probability)
}

/// Joint scoreline probabilities and the derived 1X2 market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorelineDistribution {
    pub lambda_home: f64,
    pub lambda_away: f64,
    pub max_goals: usize,
    /// `grid[home][away]`.
    pub grid: Vec<Vec<f64>>,
    pub market: MarketProbabilities,
    pub fair_odds: FairOdds,
}

impl ScorelineDistribution {
    /// Joint probability of an exact score; zero outside the grid.
    pub fn probability(&self, home: usize, away: usize) -> f64 {
        self.grid
            .get(home)
            .and_then(|row| row.get(away))
            .copied()
            .unwrap_or(0.0)
    }

    /// Mass covered by the truncated grid.
    pub fn captured_mass(&self) -> f64 {
        self.grid.iter().flatten().sum()
    }

    /// Most probable exact score as `(home, away, probability)`.
    pub fn most_likely_score(&self) -> (usize, usize, f64) {
        let mut best = (0, 0, 0.0);
        for (h, row) in self.grid.iter().enumerate() {
            for (a, p) in row.iter().enumerate() {
                if *p > best.2 {
                    best = (h, a, *p);
                }
            }
        }
        best
    }

    /// Probability that total goals exceed `line` (e.g. 2.5).
    pub fn total_goals_over(&self, line: f64) -> f64 {
        self.cells().filter(|(h, a, _)| (h + a) as f64 > line).map(|(_, _, p)| p).sum()
    }

    /// Probability that both sides score at least once.
    pub fn both_teams_score(&self) -> f64 {
        self.cells().filter(|(h, a, _)| *h > 0 && *a > 0).map(|(_, _, p)| p).sum()
    }

    fn cells(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.grid
            .iter()
            .enumerate()
            .flat_map(|(h, row)| row.iter().enumerate().map(move |(a, p)| (h, a, *p)))
    }
}

/// Builds the scoreline grid for two expected-goals rates.
///
/// Both rates must be strictly positive and `max_goals` at most
/// [`MAX_GOALS_LIMIT`].
pub fn predict_scorelines(
    lambda_home: f64,
    lambda_away: f64,
    max_goals: usize,
) -> Result<ScorelineDistribution, AnalyticsError> {
    ensure_positive("lambda_home", lambda_home)?;
    ensure_positive("lambda_away", lambda_away)?;
    if max_goals > MAX_GOALS_LIMIT {
        return Err(AnalyticsError::InvalidInput(format!(
            "max_goals must be at most {MAX_GOALS_LIMIT}, got {max_goals}"
        )));
    }

    let home = poisson_pmfs(lambda_home, max_goals);
    let away = poisson_pmfs(lambda_away, max_goals);

    let grid: Vec<Vec<f64>> = home
        .iter()
        .map(|ph| away.iter().map(|pa| ph * pa).collect())
        .collect();

    // Mirrored cells are accumulated in lockstep so equal rates give
    // bit-identical home and away totals.
    let mut home_win = 0.0;
    let mut away_win = 0.0;
    let mut draw = 0.0;
    for i in 0..=max_goals {
        draw += grid[i][i];
        for j in 0..i {
            home_win += grid[i][j];
            away_win += grid[j][i];
        }
    }

    let market = MarketProbabilities {
        home_win,
        draw,
        away_win,
    };

    let captured_mass = market.total();
    if captured_mass < 1.0 - MASS_TOLERANCE {
        debug!(
            lambda_home,
            lambda_away,
            max_goals,
            captured_mass,
            "Scoreline grid truncates probability mass"
        );
    }

    Ok(ScorelineDistribution {
        lambda_home,
        lambda_away,
        max_goals,
        grid,
        fair_odds: FairOdds::from_probabilities(&market),
        market,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_pmf_matches_closed_form() {
        // P(2; 1.5) = 1.5^2 e^-1.5 / 2
        let expected = 1.5f64.powi(2) * (-1.5f64).exp() / 2.0;
        assert!((poisson_pmf(2, 1.5) - expected).abs() < 1e-15);
        assert!((poisson_pmf(0, 0.7) - (-0.7f64).exp()).abs() < 1e-15);
    }

    #[test]
    fn test_market_sums_to_one() {
        let d = predict_scorelines(1.3, 1.0, DEFAULT_MAX_GOALS).unwrap();
        assert!((d.market.total() - 1.0).abs() < 1e-3);
        assert!((d.market.total() - d.captured_mass()).abs() < 1e-12);
        assert!(d.market.home_win > d.market.away_win);
    }

    #[test]
    fn test_equal_rates_are_symmetric() {
        let d = predict_scorelines(1.5, 1.5, DEFAULT_MAX_GOALS).unwrap();
        assert_eq!(d.market.home_win, d.market.away_win);
        assert_eq!(d.fair_odds.home_win, d.fair_odds.away_win);
        let remaining = d.captured_mass() - d.market.home_win - d.market.away_win;
        assert!((d.market.draw - remaining).abs() < 1e-12);
    }

    #[test]
    fn test_fair_odds_are_reciprocals() {
        let d = predict_scorelines(1.2, 0.9, 8).unwrap();
        let odds = d.fair_odds.draw.unwrap();
        assert!((odds * d.market.draw - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_probability_has_no_fair_price() {
        assert_eq!(fair_price(0.0), None);
        // With K = 0 only the 0-0 cell exists: no win for either side
        let d = predict_scorelines(1.0, 1.0, 0).unwrap();
        assert_eq!(d.fair_odds.home_win, None);
        assert_eq!(d.fair_odds.away_win, None);
        assert!(d.fair_odds.draw.is_some());
    }

    #[test]
    fn test_grid_shape_and_lookup() {
        let d = predict_scorelines(1.4, 1.0, 6).unwrap();
        assert_eq!(d.grid.len(), 7);
        assert!(d.grid.iter().all(|row| row.len() == 7));
        assert_eq!(d.probability(7, 0), 0.0);
        let expected = poisson_pmf(2, 1.4) * poisson_pmf(1, 1.0);
        assert!((d.probability(2, 1) - expected).abs() < 1e-15);
    }

    #[test]
    fn test_derived_markets() {
        let d = predict_scorelines(1.3, 1.0, 10).unwrap();
        // Away masses for 0 and 1 goals tie at rate 1.0; the first cell wins
        let (h, a, _) = d.most_likely_score();
        assert_eq!((h, a), (1, 0));
        let over = d.total_goals_over(2.5);
        let under: f64 = (0..=2)
            .flat_map(|h| (0..=2 - h).map(move |a| (h, a)))
            .map(|(h, a)| d.probability(h, a))
            .sum();
        assert!((over + under - d.captured_mass()).abs() < 1e-12);
        let btts = d.both_teams_score();
        let expected = (1.0 - (-1.3f64).exp()) * (1.0 - (-1.0f64).exp());
        assert!((btts - expected).abs() < 1e-4);
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn logs_of(lambda_home: f64, lambda_away: f64, max_goals: usize) -> String {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            predict_scorelines(lambda_home, lambda_away, max_goals).unwrap();
        });
        let bytes = logs.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_truncated_grid_is_logged() {
        let d = predict_scorelines(2.5, 2.0, DEFAULT_MAX_GOALS).unwrap();
        assert!(d.captured_mass() < 1.0 - MASS_TOLERANCE);

        let output = logs_of(2.5, 2.0, DEFAULT_MAX_GOALS);
        assert!(output.contains("Scoreline grid truncates probability mass"));
        assert!(output.contains("captured_mass"));
    }

    #[test]
    fn test_full_grid_is_not_logged() {
        let output = logs_of(1.2, 0.9, DEFAULT_MAX_GOALS);
        assert!(!output.contains("truncates"));
    }

    #[test]
    fn test_rejects_invalid_parameters() {
        assert!(predict_scorelines(0.0, 1.0, 6).is_err());
        assert!(predict_scorelines(1.0, -0.5, 6).is_err());
        assert!(predict_scorelines(f64::NAN, 1.0, 6).is_err());
        assert!(predict_scorelines(1.0, 1.0, MAX_GOALS_LIMIT + 1).is_err());
    }
}
