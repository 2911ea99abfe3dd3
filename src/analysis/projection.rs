/// Days-of-supply projection and the projector that ties the balance,
/// trend and alert steps together.
///
/// The projection is a first-order linear extrapolation: it assumes every
/// future day has the trailing-window average net balance. It is not a
/// simulation and ignores the forecast.

use crate::alert::supply::classify_alert;
use crate::analysis::balance::{compute_level, compute_recent_trend, DEFAULT_FLOOR_M3};
use crate::model::{
    BalanceProjection, DailyObservation, DaysRemaining, InvalidInputError, ProjectionResult,
    ReservoirState,
};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Projector parameters, usually read from the `[projection]` table of
/// `aquasmart.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Reservoir base capacity added before the first observation.
    pub initial_offset_m3: f64,
    /// Level the reservoir can never be reported below. Must be non-negative.
    pub floor_m3: f64,
    /// Trailing window for the inflow/consumption means.
    pub window_days: usize,
    /// Alert when fewer than this many days remain.
    pub threshold_days: f64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            initial_offset_m3: 500_000.0,
            floor_m3: DEFAULT_FLOOR_M3,
            window_days: 7,
            threshold_days: 30.0,
        }
    }
}

impl ProjectionConfig {
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        if self.window_days == 0 {
            return Err(InvalidInputError::NonPositiveWindow(self.window_days));
        }
        if !(self.threshold_days.is_finite() && self.threshold_days > 0.0) {
            return Err(InvalidInputError::NonPositiveThreshold(self.threshold_days));
        }
        if !self.initial_offset_m3.is_finite() {
            return Err(InvalidInputError::InvalidParameter {
                name: "initial_offset_m3",
                value: self.initial_offset_m3,
            });
        }
        if !(self.floor_m3.is_finite() && self.floor_m3 >= 0.0) {
            return Err(InvalidInputError::InvalidParameter {
                name: "floor_m3",
                value: self.floor_m3,
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

/// Days until the level reaches zero if the mean net balance holds.
///
/// Returns `Unlimited` when inflow keeps pace with consumption, and
/// `Finite(0.0)` when the reservoir is already empty and still draining.
///
/// A NaN net balance has no depletion date and is reported as `Unlimited`.
/// A level at or below zero (or NaN) under a deficit is `Finite(0.0)`, so the
/// result is never negative.
pub fn project_days_remaining(current_level: f64, mean_inflow: f64, mean_consumption: f64) -> DaysRemaining {
    let net_balance = mean_inflow - mean_consumption;

    if net_balance.is_nan() || net_balance >= 0.0 {
        return DaysRemaining::Unlimited;
    }
    if !(current_level > 0.0) {
        return DaysRemaining::Finite(0.0);
    }

    DaysRemaining::Finite(current_level / net_balance.abs())
}

/// Stateless projector over a validated `ProjectionConfig`.
///
/// Holds nothing but configuration, so a single instance can be shared
/// across threads and called with independent observation sequences.
#[derive(Debug, Clone)]
pub struct WaterBalanceProjector {
    config: ProjectionConfig,
}

impl WaterBalanceProjector {
    pub fn new(config: ProjectionConfig) -> Result<Self, InvalidInputError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Runs level, trend, depletion and alert steps over one sequence.
    pub fn project(&self, observations: &[DailyObservation]) -> Result<BalanceProjection, InvalidInputError> {
        let level = compute_level(observations, self.config.initial_offset_m3, self.config.floor_m3)?;
        let trend = compute_recent_trend(observations, self.config.window_days)?;

        let days_remaining =
            project_days_remaining(level, trend.mean_inflow_m3, trend.mean_consumption_m3);
        let alert_level = classify_alert(days_remaining, self.config.threshold_days)?;

        log::debug!(
            target: "projection",
            "level={:.0} m3 net={:.1} m3/day days={:?} alert={}",
            level,
            trend.net_balance_m3(),
            days_remaining,
            alert_level
        );

        Ok(BalanceProjection {
            state: ReservoirState { current_level_m3: level },
            trend,
            result: ProjectionResult {
                daily_net_balance_m3: trend.net_balance_m3(),
                days_remaining,
                alert_level,
            },
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
