/// SABESP reservoir API client.
///
/// The public endpoint returns every reservoir system the operator manages
/// as a JSON array; the service only ever needs one of them, picked by name
/// (e.g. "Cantareira"). Values arrive as display strings in Brazilian
/// notation: "45,2 %", "3,4 mm".

use crate::model::{FetchError, ReservoirSnapshot};
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Serde structures
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct ReservoirEntry {
    name: String,
    data: ReservoirData,
}

#[derive(Deserialize)]
struct ReservoirData {
    volume_armazenado: String,
    pluviometria_do_dia: String,
    media_historica_do_mes: String,
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

/// Parses a "45,2 %" style value into 45.2. Dots are thousands separators
/// only when a decimal comma is present, so "45.2 %" is also 45.2.
/// Returns `None` for anything without a leading number.
pub fn parse_percent(raw: &str) -> Option<f64> {
    let trimmed = raw.trim().trim_end_matches('%').trim();
    let numeric = if trimmed.contains(',') {
        trimmed.replace('.', "").replace(',', ".")
    } else {
        trimmed.to_string()
    };
    numeric.parse().ok()
}

/// Finds `name` in a SABESP response body and returns its metrics.
///
/// # Errors
/// - `FetchError::ParseError` — malformed JSON or an entry missing fields.
/// - `FetchError::NoDataAvailable` — the array is empty.
/// - `FetchError::EntityNotFound` — no entry with that exact name.
pub fn parse_reservoir_response(json: &str, name: &str) -> Result<ReservoirSnapshot, FetchError> {
    let entries: Vec<ReservoirEntry> = serde_json::from_str(json)
        .map_err(|e| FetchError::ParseError(format!("JSON deserialization failed: {}", e)))?;

    if entries.is_empty() {
        return Err(FetchError::NoDataAvailable("reservoir list is empty".to_string()));
    }

    let entry = entries
        .into_iter()
        .find(|e| e.name == name)
        .ok_or_else(|| FetchError::EntityNotFound(name.to_string()))?;

    Ok(ReservoirSnapshot {
        stored_volume_percent: parse_percent(&entry.data.volume_armazenado),
        name: entry.name,
        stored_volume: entry.data.volume_armazenado,
        rainfall_today: entry.data.pluviometria_do_dia,
        historical_monthly_mean: entry.data.media_historica_do_mes,
    })
}

// ---------------------------------------------------------------------------
// API client
// ---------------------------------------------------------------------------

/// Fetches the reservoir list and extracts the named reservoir.
pub fn fetch_reservoir(
    client: &reqwest::blocking::Client,
    url: &str,
    name: &str,
) -> Result<ReservoirSnapshot, FetchError> {
    log::debug!(target: "sabesp", "Fetching: {} ({})", url, name);

    let response = client.get(url).header("Accept", "application/json").send()?;

    if !response.status().is_success() {
        return Err(FetchError::HttpError(response.status().as_u16()));
    }

    let body = response.text()?;
    parse_reservoir_response(&body, name)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
