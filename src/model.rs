/// Core data types for the AquaSmart water-supply service.
///
/// This module defines the shared domain model imported by all other modules.
/// It contains no logic beyond small accessors, no I/O, and no external
/// dependencies besides chrono/serde: only types and errors.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Observation types
// ---------------------------------------------------------------------------

/// One day of reservoir inflow and consumption, in cubic metres.
///
/// Sequences of observations are expected in strictly ascending date order,
/// one entry per day. The projector validates this on every call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyObservation {
    pub date: NaiveDate,
    pub inflow_m3: f64,
    pub consumption_m3: f64,
}

impl DailyObservation {
    pub fn new(date: NaiveDate, inflow_m3: f64, consumption_m3: f64) -> Self {
        Self { date, inflow_m3, consumption_m3 }
    }

    /// Inflow minus consumption for this day. Negative on a deficit day.
    pub fn net_m3(&self) -> f64 {
        self.inflow_m3 - self.consumption_m3
    }
}

// ---------------------------------------------------------------------------
// Projection types
// ---------------------------------------------------------------------------

/// Reservoir level derived from an observation sequence. Never below the
/// floor it was computed with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReservoirState {
    pub current_level_m3: f64,
}

/// Trailing-window averages of inflow and consumption.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RecentTrend {
    pub mean_inflow_m3: f64,
    pub mean_consumption_m3: f64,
}

impl RecentTrend {
    pub fn net_balance_m3(&self) -> f64 {
        self.mean_inflow_m3 - self.mean_consumption_m3
    }
}

/// Days of supply left under the recent trend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "days", rename_all = "snake_case")]
pub enum DaysRemaining {
    Finite(f64),
    /// Net balance is zero or positive: no depletion date exists.
    Unlimited,
}

impl DaysRemaining {
    pub fn as_finite(&self) -> Option<f64> {
        match self {
            DaysRemaining::Finite(days) => Some(*days),
            DaysRemaining::Unlimited => None,
        }
    }

    pub fn is_unlimited(&self) -> bool {
        matches!(self, DaysRemaining::Unlimited)
    }
}

/// Supply alert category, in ascending order of severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertLevel {
    Ok,
    Warning,
}

impl std::fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertLevel::Ok => write!(f, "OK"),
            AlertLevel::Warning => write!(f, "WARNING"),
        }
    }
}

/// Outcome of one projection: trend balance, depletion estimate, and alert.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub daily_net_balance_m3: f64,
    pub days_remaining: DaysRemaining,
    pub alert_level: AlertLevel,
}

/// Everything a single projector run produces, grouped for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalanceProjection {
    pub state: ReservoirState,
    pub trend: RecentTrend,
    pub result: ProjectionResult,
}

// ---------------------------------------------------------------------------
// Forecast / reservoir collaborator types
// ---------------------------------------------------------------------------

/// One day of the precipitation forecast. Open-Meteo reports `null` for
/// days it has no model output for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub precipitation_mm: Option<f64>,
}

/// Current metrics for a single named reservoir. Values are kept as the
/// operator publishes them ("45,2 %", "3,4 mm"), with the stored volume
/// also parsed to a number where possible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservoirSnapshot {
    pub name: String,
    pub stored_volume: String,
    pub stored_volume_percent: Option<f64>,
    pub rainfall_today: String,
    pub historical_monthly_mean: String,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Caller errors raised by the projector and the synthetic generator.
#[derive(Debug, Clone, PartialEq)]
pub enum InvalidInputError {
    /// No observations were supplied.
    EmptyObservations,
    /// `current` (at `index`) does not come strictly after `previous`.
    DatesNotAscending {
        index: usize,
        previous: NaiveDate,
        current: NaiveDate,
    },
    /// A volume was negative, NaN or infinite.
    InvalidVolume {
        date: NaiveDate,
        field: &'static str,
        value: f64,
    },
    /// Trailing window must cover at least one day.
    NonPositiveWindow(usize),
    /// Alert threshold must be a positive number of days.
    NonPositiveThreshold(f64),
    /// Any other numeric configuration parameter out of range.
    InvalidParameter { name: &'static str, value: f64 },
}

impl std::fmt::Display for InvalidInputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidInputError::EmptyObservations => {
                write!(f, "Invalid input: observation sequence is empty")
            }
            InvalidInputError::DatesNotAscending { index, previous, current } => write!(
                f,
                "Invalid input: observation {} dated {} does not follow {}",
                index, current, previous
            ),
            InvalidInputError::InvalidVolume { date, field, value } => write!(
                f,
                "Invalid input: {} on {} must be a non-negative number, got {}",
                field, date, value
            ),
            InvalidInputError::NonPositiveWindow(days) => {
                write!(f, "Invalid input: window must be positive, got {} days", days)
            }
            InvalidInputError::NonPositiveThreshold(days) => {
                write!(f, "Invalid input: alert threshold must be positive, got {} days", days)
            }
            InvalidInputError::InvalidParameter { name, value } => {
                write!(f, "Invalid input: parameter {} out of range: {}", name, value)
            }
        }
    }
}

impl std::error::Error for InvalidInputError {}

/// Errors that can arise when fetching or parsing forecast/reservoir data.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    /// Non-2xx HTTP response.
    HttpError(u16),
    /// Connection, timeout or TLS failure before a response arrived.
    Transport(String),
    /// The response body could not be deserialized.
    ParseError(String),
    /// The named entity (reservoir) was not present in the response.
    EntityNotFound(String),
    /// The response was well formed but carried no usable values.
    NoDataAvailable(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::HttpError(code) => write!(f, "HTTP error: {}", code),
            FetchError::Transport(msg) => write!(f, "Transport error: {}", msg),
            FetchError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            FetchError::EntityNotFound(name) => write!(f, "Entity not found: {}", name),
            FetchError::NoDataAvailable(msg) => write!(f, "No data available: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => FetchError::HttpError(status.as_u16()),
            None if err.is_decode() => FetchError::ParseError(err.to_string()),
            None => FetchError::Transport(err.to_string()),
        }
    }
}
