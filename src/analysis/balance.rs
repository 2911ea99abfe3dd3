/// Water balance over an observation sequence.
///
/// The reservoir level is the running sum of daily net balance
/// (inflow − consumption) on top of an initial capacity offset, clipped at
/// a floor on every step. A deficit that would push the level below the
/// floor is dropped, not carried into later days.

use crate::model::{DailyObservation, InvalidInputError, RecentTrend};

/// Level floor used when the caller has no reason to pick another.
pub const DEFAULT_FLOOR_M3: f64 = 0.0;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Checks the invariants every balance computation relies on: non-empty,
/// strictly ascending dates, finite non-negative volumes.
pub fn validate_observations(observations: &[DailyObservation]) -> Result<(), InvalidInputError> {
    if observations.is_empty() {
        return Err(InvalidInputError::EmptyObservations);
    }

    for (index, obs) in observations.iter().enumerate() {
        check_volume(obs, "inflow_m3", obs.inflow_m3)?;
        check_volume(obs, "consumption_m3", obs.consumption_m3)?;

        if index > 0 {
            let previous = observations[index - 1].date;
            if obs.date <= previous {
                return Err(InvalidInputError::DatesNotAscending {
                    index,
                    previous,
                    current: obs.date,
                });
            }
        }
    }

    Ok(())
}

fn check_volume(obs: &DailyObservation, field: &'static str, value: f64) -> Result<(), InvalidInputError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(InvalidInputError::InvalidVolume { date: obs.date, field, value })
    }
}

// ---------------------------------------------------------------------------
// Level
// ---------------------------------------------------------------------------

fn validate_floor(floor: f64) -> Result<(), InvalidInputError> {
    if floor.is_finite() && floor >= 0.0 {
        Ok(())
    } else {
        Err(InvalidInputError::InvalidParameter { name: "floor_m3", value: floor })
    }
}

fn step(level: f64, obs: &DailyObservation, floor: f64) -> f64 {
    (level + obs.net_m3()).max(floor)
}

/// Final reservoir level after applying every observation in order.
///
/// # Errors
/// `InvalidInputError` if the sequence is empty, out of order, or carries a
/// negative/non-finite volume, or if `floor` is negative or non-finite.
pub fn compute_level(
    observations: &[DailyObservation],
    initial_offset: f64,
    floor: f64,
) -> Result<f64, InvalidInputError> {
    validate_floor(floor)?;
    validate_observations(observations)?;
    Ok(observations
        .iter()
        .fold(initial_offset, |level, obs| step(level, obs, floor)))
}

/// Level at the end of each observed day, same clipping as `compute_level`.
/// The last element equals `compute_level` for the same inputs.
pub fn level_series(
    observations: &[DailyObservation],
    initial_offset: f64,
    floor: f64,
) -> Result<Vec<f64>, InvalidInputError> {
    validate_floor(floor)?;
    validate_observations(observations)?;
    Ok(observations
        .iter()
        .scan(initial_offset, |level, obs| {
            *level = step(*level, obs, floor);
            Some(*level)
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Trend
// ---------------------------------------------------------------------------

/// Arithmetic means of inflow and consumption over the last `window_days`
/// observations, or over all of them if fewer exist.
pub fn compute_recent_trend(
    observations: &[DailyObservation],
    window_days: usize,
) -> Result<RecentTrend, InvalidInputError> {
    if window_days == 0 {
        return Err(InvalidInputError::NonPositiveWindow(window_days));
    }
    validate_observations(observations)?;

    let start = observations.len().saturating_sub(window_days);
    let window = &observations[start..];
    let n = window.len() as f64;

    let total_inflow: f64 = window.iter().map(|o| o.inflow_m3).sum();
    let total_consumption: f64 = window.iter().map(|o| o.consumption_m3).sum();

    Ok(RecentTrend {
        mean_inflow_m3: total_inflow / n,
        mean_consumption_m3: total_consumption / n,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
