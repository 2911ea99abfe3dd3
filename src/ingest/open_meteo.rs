/// Open-Meteo daily forecast API client.
///
/// Handles URL construction, JSON response parsing and the blocking fetch
/// for the daily precipitation forecast:
///   https://api.open-meteo.com/v1/forecast
///
/// Response shape (see `fixtures.rs`):
///   daily.time[]              — "YYYY-MM-DD" in the requested timezone
///   daily.precipitation_sum[] — mm, `null` where the model has no value
/// The two arrays are parallel.

use crate::model::{FetchError, ForecastDay};
use crate::sites::Site;
use chrono::NaiveDate;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Serde structures
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct ForecastResponse {
    daily: DailyBlock,
}

#[derive(Deserialize)]
struct DailyBlock {
    time: Vec<String>,
    precipitation_sum: Vec<Option<f64>>,
}

// ---------------------------------------------------------------------------
// URL construction
// ---------------------------------------------------------------------------

/// Builds a daily precipitation forecast URL for a coordinate pair. The
/// timezone is URL-encoded (`America/Sao_Paulo` → `America%2FSao_Paulo`).
pub fn build_forecast_url(base_url: &str, latitude: f64, longitude: f64, timezone: &str) -> String {
    format!(
        "{}?latitude={}&longitude={}&daily=precipitation_sum&timezone={}",
        base_url,
        latitude,
        longitude,
        urlencoding::encode(timezone)
    )
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

/// Parses an Open-Meteo daily forecast body into one `ForecastDay` per day.
///
/// # Errors
/// - `FetchError::ParseError` — malformed JSON, unparseable date, or
///   `time`/`precipitation_sum` arrays of different length.
/// - `FetchError::NoDataAvailable` — the `daily` block is empty.
pub fn parse_forecast_response(json: &str) -> Result<Vec<ForecastDay>, FetchError> {
    let response: ForecastResponse = serde_json::from_str(json)
        .map_err(|e| FetchError::ParseError(format!("JSON deserialization failed: {}", e)))?;

    let daily = response.daily;

    if daily.time.len() != daily.precipitation_sum.len() {
        return Err(FetchError::ParseError(format!(
            "daily.time has {} entries but daily.precipitation_sum has {}",
            daily.time.len(),
            daily.precipitation_sum.len()
        )));
    }

    if daily.time.is_empty() {
        return Err(FetchError::NoDataAvailable("forecast contained no days".to_string()));
    }

    daily
        .time
        .iter()
        .zip(daily.precipitation_sum)
        .map(|(date, precipitation_mm)| {
            let date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .map_err(|e| FetchError::ParseError(format!("bad forecast date '{}': {}", date, e)))?;
            Ok(ForecastDay { date, precipitation_mm })
        })
        .collect()
}

/// Forecast precipitation for the day after the first forecast day
/// ("tomorrow" on the dashboard). `None` if the forecast is shorter or the
/// value is null.
pub fn tomorrow_precipitation(forecast: &[ForecastDay]) -> Option<f64> {
    forecast.get(1).and_then(|d| d.precipitation_mm)
}

// ---------------------------------------------------------------------------
// API client
// ---------------------------------------------------------------------------

/// Fetches and parses the daily forecast for a site.
pub fn fetch_forecast(
    client: &reqwest::blocking::Client,
    base_url: &str,
    site: &Site,
) -> Result<Vec<ForecastDay>, FetchError> {
    let url = build_forecast_url(base_url, site.latitude, site.longitude, site.timezone);
    log::debug!(target: "open-meteo", "Fetching: {}", url);

    let response = client.get(&url).header("Accept", "application/json").send()?;

    if !response.status().is_success() {
        return Err(FetchError::HttpError(response.status().as_u16()));
    }

    let body = response.text()?;
    parse_forecast_response(&body)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
