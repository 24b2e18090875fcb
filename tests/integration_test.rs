//! Integration Tests - Use Cases Against a Mocked Wager Store
//!
//! Tests the interaction between usecases, the `WagerStore` port and the
//! domain components. Uses mockall for trait mocking and tokio::test for
//! async tests.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use mockall::mock;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use wager_lens::config::{AnalysisConfig, SimulationConfig};
use wager_lens::domain::bias::{BiasFinding, BiasKind, BiasThresholds};
use wager_lens::domain::monte_carlo::{GameType, SimulationParams};
use wager_lens::domain::session::SessionAggregate;
use wager_lens::domain::value_bet::{AlertKind, ValueBetThresholds};
use wager_lens::domain::wager::{MatchOdds, WagerOutcome, WagerRecord};
use wager_lens::ports::wager_store::WagerStore;
use wager_lens::usecases::{BehaviourAnalyzer, RiskComparison, SimulationRunner, ValueScanner};

// ---- Mock Definitions ----

mock! {
    pub Store {}

    #[async_trait::async_trait]
    impl WagerStore for Store {
        async fn load_wagers(
            &self,
            from: DateTime<Utc>,
            to: DateTime<Utc>,
        ) -> anyhow::Result<Vec<WagerRecord>>;

        async fn load_sessions(
            &self,
            from: DateTime<Utc>,
            to: DateTime<Utc>,
        ) -> anyhow::Result<BTreeMap<String, Vec<SessionAggregate>>>;

        async fn load_upcoming_matches(
            &self,
            from: DateTime<Utc>,
            to: DateTime<Utc>,
        ) -> anyhow::Result<Vec<MatchOdds>>;

        async fn is_healthy(&self) -> bool;
    }
}

// ---- Fixtures ----

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap()
}

fn wager(hours_ago: i64, stake: Decimal, outcome: WagerOutcome) -> WagerRecord {
    WagerRecord::new(now() - Duration::hours(hours_ago), "football", stake, dec!(2.1), outcome)
}

fn analysis() -> AnalysisConfig {
    AnalysisConfig {
        lookback_days: 30,
        comparison_days: 90,
        horizon_days: 7,
    }
}

// ---- Behaviour Analyzer ----

#[tokio::test]
async fn test_gambler_fallacy_scenario() {
    let mut store = MockStore::new();
    store
        .expect_load_wagers()
        .withf(|from, to| *to == now() && *to - *from == Duration::days(30))
        .times(1)
        .returning(|_, _| {
            let mut history: Vec<WagerRecord> = (0..5)
                .map(|i| wager(10 - i, dec!(10), WagerOutcome::Lost))
                .collect();
            history.push(wager(1, dec!(30), WagerOutcome::Won));
            Ok(history)
        });

    let analyzer = BehaviourAnalyzer::new(Arc::new(store), &analysis(), BiasThresholds::default());
    let assessment = analyzer.assess(now()).await.unwrap();

    assert_eq!(assessment.wager_count, 6);
    let gf = assessment.findings.get(BiasKind::GamblerFallacy);
    assert_eq!(gf.occurrences, 1);
    assert_eq!(gf.severity, 20);
    // 30 also exceeds twice the mean stake right after a loss
    assert_eq!(assessment.findings.get(BiasKind::ChasingLosses).severity, 15);
    assert_eq!(assessment.score.value(), 94);
    assert!(assessment.detected.contains(&BiasKind::GamblerFallacy));
}

#[tokio::test]
async fn test_empty_history_scores_perfect() {
    let mut store = MockStore::new();
    store.expect_load_wagers().returning(|_, _| Ok(Vec::new()));

    let analyzer = BehaviourAnalyzer::new(Arc::new(store), &analysis(), BiasThresholds::default());
    let assessment = analyzer.assess(now()).await.unwrap();

    assert_eq!(assessment.wager_count, 0);
    assert_eq!(assessment.score.value(), 100);
    assert!(assessment.detected.is_empty());
    for (_, finding) in assessment.findings.iter() {
        assert_eq!(finding, BiasFinding::NONE);
    }
}

#[tokio::test]
async fn test_out_of_order_history_is_sorted() {
    let mut store = MockStore::new();
    store.expect_load_wagers().returning(|_, _| {
        // Newest first: the raise must still be seen after the streak
        let mut history = vec![wager(1, dec!(30), WagerOutcome::Pending)];
        history.extend((0..5).map(|i| wager(2 + i, dec!(10), WagerOutcome::Lost)));
        Ok(history)
    });

    let analyzer = BehaviourAnalyzer::new(Arc::new(store), &analysis(), BiasThresholds::default());
    let assessment = analyzer.assess(now()).await.unwrap();
    assert_eq!(assessment.findings.get(BiasKind::GamblerFallacy).occurrences, 1);
}

#[tokio::test]
async fn test_lookback_override() {
    let mut store = MockStore::new();
    store
        .expect_load_wagers()
        .withf(|from, to| *to - *from == Duration::days(7))
        .returning(|_, _| Ok(Vec::new()));

    let analyzer = BehaviourAnalyzer::new(Arc::new(store), &analysis(), BiasThresholds::default())
        .with_lookback_days(7);
    assert!(analyzer.assess(now()).await.is_ok());
}

#[tokio::test]
async fn test_store_failure_propagates() {
    let mut store = MockStore::new();
    store
        .expect_load_wagers()
        .returning(|_, _| Err(anyhow::anyhow!("database offline")));

    let analyzer = BehaviourAnalyzer::new(Arc::new(store), &analysis(), BiasThresholds::default());
    let err = analyzer.assess(now()).await.unwrap_err();
    assert!(format!("{err:#}").contains("database offline"));
}

// ---- Value Scanner ----

#[tokio::test]
async fn test_value_scanner_orders_alerts() {
    let mut store = MockStore::new();
    store
        .expect_load_upcoming_matches()
        .withf(|from, to| *from == now() && *to - *from == Duration::days(7))
        .returning(|from, _| {
            Ok(vec![
                MatchOdds::new("Rennes", "Nice", from + Duration::days(2), "Ligue 1")
                    .with_odds(Some(3.5), Some(3.1), Some(2.0)),
                MatchOdds::new("Metz", "Lille", from + Duration::days(3), "Ligue 1")
                    .with_odds(Some(1.9), None, None),
            ])
        });

    let scanner = ValueScanner::new(Arc::new(store), &analysis(), ValueBetThresholds::default());
    let alerts = scanner.scan(now()).await.unwrap();

    assert_eq!(alerts.len(), 2);
    assert_eq!(alerts[0].kind, AlertKind::HomeValue);
    assert_eq!(alerts[0].kind.label(), "value bet domicile");
    assert!((alerts[0].score - 3.5).abs() < 1e-12);
    assert_eq!(alerts[1].kind.label(), "nul probable");
    assert!((alerts[1].score - 0.4).abs() < 1e-9);
    assert_eq!(alerts[1].fixture, "Rennes vs Nice");
}

#[tokio::test]
async fn test_value_scanner_no_fixtures() {
    let mut store = MockStore::new();
    store.expect_load_upcoming_matches().returning(|_, _| Ok(Vec::new()));

    let scanner = ValueScanner::new(Arc::new(store), &analysis(), ValueBetThresholds::default());
    assert!(scanner.scan(now()).await.unwrap().is_empty());
}

// ---- Risk Comparison ----

#[tokio::test]
async fn test_risk_comparison_scores_each_category() {
    let mut store = MockStore::new();
    store
        .expect_load_sessions()
        .withf(|from, to| *to - *from == Duration::days(90))
        .returning(|_, _| {
            let mut sessions = BTreeMap::new();
            sessions.insert(
                "football".to_string(),
                vec![
                    SessionAggregate::new(dec!(50), dec!(80), 2, 1),
                    SessionAggregate::new(dec!(50), dec!(40), 2, 1),
                ],
            );
            sessions.insert(
                "free_play".to_string(),
                vec![SessionAggregate::new(Decimal::ZERO, Decimal::ZERO, 0, 0)],
            );
            Ok(sessions)
        });

    let comparison = RiskComparison::new(Arc::new(store), &analysis());
    let result = comparison.compare(now()).await.unwrap();

    let football = result.get("football").unwrap();
    assert!((football.roi_pct - 20.0).abs() < 1e-9);
    assert!((football.win_rate_pct - 50.0).abs() < 1e-9);
    assert!((football.risk_adjusted_score - 0.5).abs() < 1e-9);

    let free = result.get("free_play").unwrap();
    assert_eq!(free.roi_pct, 0.0);
    assert_eq!(free.risk_adjusted_score, 0.0);

    assert_eq!(result.best().map(|(c, _)| c.as_str()), Some("football"));
}

// ---- Simulation Runner ----

fn simulation_config() -> SimulationConfig {
    SimulationConfig {
        max_simulations: 10_000,
        default_simulations: 1_000,
        workers: 4,
    }
}

#[tokio::test]
async fn test_simulation_means_converge() {
    let runner = SimulationRunner::new(&simulation_config());
    let seed_pairs = [(1, 1_000_000), (77, 5_000_000), (2026, 9_999_999)];

    for game in GameType::ALL {
        // Ten years of a weekly 10 stake
        let total_wagered = 5_200.0;
        let expected = -total_wagered * (1.0 - game.model().expected_return());

        for (seed_a, seed_b) in seed_pairs {
            let a = runner
                .run(SimulationParams::new(10.0, 10, game, 5_000).with_seed(seed_a))
                .await
                .unwrap();
            let b = runner
                .run(SimulationParams::new(10.0, 10, game, 5_000).with_seed(seed_b))
                .await
                .unwrap();

            assert_eq!(a.final_balances.len(), 5_000);
            assert!((a.total_wagered - total_wagered).abs() < 1e-9);
            assert_eq!(a.total_wagered, b.total_wagered);

            let drift = (a.mean - b.mean).abs() / a.mean.abs();
            assert!(
                drift < 0.05,
                "{game}: means {} and {} differ by {:.1}%",
                a.mean,
                b.mean,
                drift * 100.0
            );
            assert!(
                (a.mean - expected).abs() / expected.abs() < 0.05,
                "{game}: mean {} far from expected {expected}",
                a.mean
            );
            assert!(a.min <= a.median && a.median <= a.max);
        }
    }
}

#[tokio::test]
async fn test_simulation_rejects_oversized_horizon() {
    let runner = SimulationRunner::new(&simulation_config());
    let result = runner
        .run(SimulationParams::new(10.0, 100_000_000, GameType::Loto, 10_000))
        .await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_simulation_rejects_invalid_stake() {
    let runner = SimulationRunner::new(&simulation_config());
    let result = runner
        .run(SimulationParams::new(-5.0, 1, GameType::Loto, 10))
        .await;
    assert!(result.is_err());
}
