/// Integration tests for the water-balance projector
///
/// These tests exercise the public projector API end to end with the
/// reference dashboard scenarios and the properties every projection must
/// satisfy regardless of input.
///
/// Run with: cargo test --test projection_scenarios

use aquasmart_service::alert::supply::classify_alert;
use aquasmart_service::analysis::balance::{compute_level, compute_recent_trend, level_series};
use aquasmart_service::analysis::projection::{
    project_days_remaining, ProjectionConfig, WaterBalanceProjector,
};
use aquasmart_service::ingest::synthetic::{observations, SimulationConfig, SyntheticGenerator};
use aquasmart_service::model::{AlertLevel, DailyObservation, DaysRemaining, InvalidInputError};
use chrono::{Duration, NaiveDate};

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
}

fn build(inflow: &[f64], consumption: &[f64]) -> Vec<DailyObservation> {
    inflow
        .iter()
        .zip(consumption)
        .enumerate()
        .map(|(i, (&inf, &con))| DailyObservation::new(start() + Duration::days(i as i64), inf, con))
        .collect()
}

/// Sixty days of the seeded synthetic model: a realistic, irregular input.
fn synthetic_history(seed: u64) -> Vec<DailyObservation> {
    let generator = SyntheticGenerator::new(SimulationConfig { seed, ..Default::default() }).unwrap();
    observations(&generator.history(start()).unwrap())
}

// ---------------------------------------------------------------------------
// 1. Reference scenarios
// ---------------------------------------------------------------------------

#[test]
fn test_scenario_drained_reservoir_warns() {
    let obs = build(&[0.0; 7], &[1000.0; 7]);

    let level = compute_level(&obs, 5000.0, 0.0).unwrap();
    assert_eq!(level, 0.0, "reservoir should hit the floor before day 5");

    let trend = compute_recent_trend(&obs, 7).unwrap();
    assert_eq!(trend.mean_inflow_m3, 0.0);
    assert_eq!(trend.mean_consumption_m3, 1000.0);
    assert_eq!(trend.net_balance_m3(), -1000.0);

    let days = project_days_remaining(level, trend.mean_inflow_m3, trend.mean_consumption_m3);
    assert_eq!(days, DaysRemaining::Finite(0.0));
    assert_eq!(classify_alert(days, 30.0), Ok(AlertLevel::Warning));
}

#[test]
fn test_scenario_surplus_is_unlimited_and_ok() {
    let obs = build(&[2000.0; 5], &[1000.0; 5]);

    let level = compute_level(&obs, 0.0, 0.0).unwrap();
    assert_eq!(level, 5000.0);

    let trend = compute_recent_trend(&obs, 7).unwrap();
    assert_eq!(trend.net_balance_m3(), 1000.0);

    let days = project_days_remaining(level, trend.mean_inflow_m3, trend.mean_consumption_m3);
    assert_eq!(days, DaysRemaining::Unlimited);
    assert_eq!(classify_alert(days, 30.0), Ok(AlertLevel::Ok));
}

#[test]
fn test_scenario_empty_sequence_is_invalid_input() {
    assert_eq!(compute_level(&[], 5000.0, 0.0), Err(InvalidInputError::EmptyObservations));
}

#[test]
fn test_scenario_out_of_order_dates_are_invalid_input() {
    let mut obs = build(&[100.0; 4], &[50.0; 4]);
    obs.swap(1, 2);

    let result = compute_level(&obs, 0.0, 0.0);
    assert!(
        matches!(result, Err(InvalidInputError::DatesNotAscending { index: 2, .. })),
        "got {:?}",
        result
    );
}

#[test]
fn test_projector_matches_step_by_step_scenario() {
    let config = ProjectionConfig { initial_offset_m3: 5000.0, ..Default::default() };
    let projector = WaterBalanceProjector::new(config).unwrap();
    let projection = projector.project(&build(&[0.0; 7], &[1000.0; 7])).unwrap();

    assert_eq!(projection.state.current_level_m3, 0.0);
    assert_eq!(projection.result.daily_net_balance_m3, -1000.0);
    assert_eq!(projection.result.days_remaining, DaysRemaining::Finite(0.0));
    assert_eq!(projection.result.alert_level, AlertLevel::Warning);
}

// ---------------------------------------------------------------------------
// 2. Properties
// ---------------------------------------------------------------------------

#[test]
fn test_level_never_below_floor() {
    for seed in 0..20 {
        let obs = synthetic_history(seed);
        for floor in [0.0, 1_000.0, 250_000.0] {
            let levels = level_series(&obs, 500_000.0, floor).unwrap();
            assert!(
                levels.iter().all(|&l| l >= floor),
                "seed {} floor {}: level dipped below floor",
                seed,
                floor
            );
        }
    }
}

#[test]
fn test_level_monotone_in_initial_offset() {
    let obs = synthetic_history(3);
    let offsets = [0.0, 10_000.0, 100_000.0, 500_000.0, 1_000_000.0, 2_000_000.0];

    let levels: Vec<f64> = offsets
        .iter()
        .map(|&offset| compute_level(&obs, offset, 0.0).unwrap())
        .collect();

    for pair in levels.windows(2) {
        assert!(pair[0] <= pair[1], "levels not monotone: {:?}", levels);
    }
}

#[test]
fn test_inflow_at_least_consumption_is_unlimited() {
    let obs = build(&[500.0, 800.0, 1200.0, 90.0, 4000.0], &[500.0, 100.0, 1199.0, 0.0, 3999.5]);
    let level = compute_level(&obs, 0.0, 0.0).unwrap();
    let trend = compute_recent_trend(&obs, 3).unwrap();

    assert_eq!(
        project_days_remaining(level, trend.mean_inflow_m3, trend.mean_consumption_m3),
        DaysRemaining::Unlimited
    );
}

#[test]
fn test_alert_monotone_as_days_decrease() {
    let mut seen_warning = false;
    for tenth_days in (0..=1000).rev() {
        let days = DaysRemaining::Finite(tenth_days as f64 / 10.0);
        let level = classify_alert(days, 30.0).unwrap();
        if seen_warning {
            assert_eq!(level, AlertLevel::Warning, "alert went back to OK at {:?}", days);
        }
        seen_warning |= level == AlertLevel::Warning;
    }
    assert!(seen_warning);
}

#[test]
fn test_operations_are_idempotent() {
    let obs = synthetic_history(42);
    let projector = WaterBalanceProjector::new(ProjectionConfig::default()).unwrap();

    assert_eq!(compute_level(&obs, 500_000.0, 0.0), compute_level(&obs, 500_000.0, 0.0));
    assert_eq!(compute_recent_trend(&obs, 7), compute_recent_trend(&obs, 7));
    assert_eq!(projector.project(&obs), projector.project(&obs));
}

#[test]
fn test_projector_shared_across_threads() {
    let projector = std::sync::Arc::new(WaterBalanceProjector::new(ProjectionConfig::default()).unwrap());
    let expected: Vec<_> = (0..4).map(|seed| projector.project(&synthetic_history(seed)).unwrap()).collect();

    let handles: Vec<_> = (0..4)
        .map(|seed| {
            let projector = projector.clone();
            std::thread::spawn(move || projector.project(&synthetic_history(seed)).unwrap())
        })
        .collect();

    for (seed, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), expected[seed]);
    }
}
