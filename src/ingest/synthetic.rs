/// Deterministic synthetic history for sites without a live consumption feed.
///
/// Daily rainfall is drawn from a gamma distribution, converted to reservoir
/// inflow with a fixed runoff factor, and paired with normally distributed
/// consumption. Every series is drawn from a `ChaCha8Rng` seeded from the
/// configured `u64`, so identical configs produce identical output on every
/// platform.
///
/// This is a demo model, not a calibrated hydrological one.

use crate::model::{DailyObservation, InvalidInputError};
use chrono::{Duration, NaiveDate};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Gamma, Normal};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Parameters of the synthetic model (`[simulation]` in aquasmart.toml).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub seed: u64,
    pub history_days: usize,

    // Rainfall ~ Gamma(shape, scale), mm/day
    pub rain_gamma_shape: f64,
    pub rain_gamma_scale_mm: f64,
    /// Reservoir inflow per mm of rain.
    pub runoff_m3_per_mm: f64,

    // Bulk consumption ~ Normal(mean, sd), m3/day
    pub consumption_mean_m3: f64,
    pub consumption_std_dev_m3: f64,

    // Residential consumption ~ Normal(mean, sd), litres per person per day
    pub residential_days: usize,
    pub residential_mean_litres: f64,
    pub residential_std_dev_litres: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            history_days: 60,
            rain_gamma_shape: 2.0,
            rain_gamma_scale_mm: 4.0,
            runoff_m3_per_mm: 80.0,
            consumption_mean_m3: 15_000.0,
            consumption_std_dev_m3: 1_000.0,
            residential_days: 30,
            residential_mean_litres: 200.0,
            residential_std_dev_litres: 20.0,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        if self.history_days == 0 {
            return Err(InvalidInputError::NonPositiveWindow(self.history_days));
        }
        if self.residential_days == 0 {
            return Err(InvalidInputError::NonPositiveWindow(self.residential_days));
        }

        let positive = [
            ("rain_gamma_shape", self.rain_gamma_shape),
            ("rain_gamma_scale_mm", self.rain_gamma_scale_mm),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(InvalidInputError::InvalidParameter { name, value });
            }
        }

        let non_negative = [
            ("runoff_m3_per_mm", self.runoff_m3_per_mm),
            ("consumption_mean_m3", self.consumption_mean_m3),
            ("consumption_std_dev_m3", self.consumption_std_dev_m3),
            ("residential_mean_litres", self.residential_mean_litres),
            ("residential_std_dev_litres", self.residential_std_dev_litres),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(InvalidInputError::InvalidParameter { name, value });
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One simulated day: the rainfall that drove the inflow, plus the
/// observation handed to the projector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticDay {
    pub precipitation_mm: f64,
    pub observation: DailyObservation,
}

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

/// Seeded generator over a validated `SimulationConfig`.
#[derive(Debug, Clone)]
pub struct SyntheticGenerator {
    config: SimulationConfig,
}

impl SyntheticGenerator {
    pub fn new(config: SimulationConfig) -> Result<Self, InvalidInputError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// `history_days` consecutive days ending on `end_date` (inclusive).
    ///
    /// All rainfall values are drawn before any consumption value. Negative
    /// consumption draws are clamped to zero.
    pub fn history(&self, end_date: NaiveDate) -> Result<Vec<SyntheticDay>, InvalidInputError> {
        let cfg = &self.config;
        let mut rng = ChaCha8Rng::seed_from_u64(cfg.seed);

        let rain = Gamma::new(cfg.rain_gamma_shape, cfg.rain_gamma_scale_mm).map_err(|_| {
            InvalidInputError::InvalidParameter {
                name: "rain_gamma_shape",
                value: cfg.rain_gamma_shape,
            }
        })?;
        let consumption = normal(cfg.consumption_mean_m3, cfg.consumption_std_dev_m3, "consumption_std_dev_m3")?;

        let rainfall: Vec<f64> = (0..cfg.history_days).map(|_| rain.sample(&mut rng)).collect();
        let consumed: Vec<f64> = (0..cfg.history_days)
            .map(|_| consumption.sample(&mut rng).max(0.0))
            .collect();

        let first = end_date - Duration::days(cfg.history_days as i64 - 1);

        Ok(rainfall
            .into_iter()
            .zip(consumed)
            .enumerate()
            .map(|(i, (precipitation_mm, consumption_m3))| SyntheticDay {
                precipitation_mm,
                observation: DailyObservation::new(
                    first + Duration::days(i as i64),
                    precipitation_mm * cfg.runoff_m3_per_mm,
                    consumption_m3,
                ),
            })
            .collect())
    }

    /// Daily residential consumption in litres per person, drawn from its
    /// own freshly seeded stream.
    pub fn residential_consumption(&self) -> Result<Vec<f64>, InvalidInputError> {
        let cfg = &self.config;
        let mut rng = ChaCha8Rng::seed_from_u64(cfg.seed);
        let dist = normal(cfg.residential_mean_litres, cfg.residential_std_dev_litres, "residential_std_dev_litres")?;

        Ok((0..cfg.residential_days)
            .map(|_| dist.sample(&mut rng).max(0.0))
            .collect())
    }
}

fn normal(mean: f64, std_dev: f64, name: &'static str) -> Result<Normal<f64>, InvalidInputError> {
    Normal::new(mean, std_dev).map_err(|_| InvalidInputError::InvalidParameter { name, value: std_dev })
}

/// Strips simulated days down to the observations the projector consumes.
pub fn observations(days: &[SyntheticDay]) -> Vec<DailyObservation> {
    days.iter().map(|d| d.observation.clone()).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
