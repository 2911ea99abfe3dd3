/// Test fixtures: representative JSON payloads from the forecast and
/// reservoir APIs.
///
/// These fixtures are structurally complete but truncated to the minimum
/// needed to exercise the parsers.
///
/// Open-Meteo daily forecast shape:
///   latitude, longitude, timezone, daily_units{}
///   daily.time[]              — dates as "YYYY-MM-DD" strings
///   daily.precipitation_sum[] — mm, or null when no model output
///
/// SABESP reservoir list shape:
///   [ { name, data: { volume_armazenado, pluviometria_do_dia,
///                     pluviometria_acumulada_no_mes, media_historica_do_mes } } ]
///
/// Note: SABESP values are display strings with a decimal comma.

/// Seven-day forecast for São Paulo. The last day has no model output.
#[cfg(test)]
pub(crate) fn fixture_open_meteo_json() -> &'static str {
    r#"{
      "latitude": -23.5,
      "longitude": -46.625,
      "generationtime_ms": 0.05,
      "utc_offset_seconds": -10800,
      "timezone": "America/Sao_Paulo",
      "timezone_abbreviation": "-03",
      "elevation": 765.0,
      "daily_units": { "time": "iso8601", "precipitation_sum": "mm" },
      "daily": {
        "time": ["2025-01-10", "2025-01-11", "2025-01-12", "2025-01-13",
                 "2025-01-14", "2025-01-15", "2025-01-16"],
        "precipitation_sum": [0.0, 12.4, 3.1, 0.0, 27.9, 8.2, null]
      }
    }"#
}

/// Error body Open-Meteo returns for an invalid request.
#[cfg(test)]
pub(crate) fn fixture_open_meteo_error_json() -> &'static str {
    r#"{ "error": true, "reason": "Latitude must be in range of -90 to 90°. Given: -123.0." }"#
}

/// Three reservoir systems, Cantareira first.
#[cfg(test)]
pub(crate) fn fixture_sabesp_json() -> &'static str {
    r#"[
      {
        "name": "Cantareira",
        "data": {
          "volume_armazenado": "45,2 %",
          "pluviometria_do_dia": "3,4 mm",
          "pluviometria_acumulada_no_mes": "120,1 mm",
          "media_historica_do_mes": "263,8 mm"
        }
      },
      {
        "name": "Alto Tietê",
        "data": {
          "volume_armazenado": "61,0 %",
          "pluviometria_do_dia": "0,0 mm",
          "pluviometria_acumulada_no_mes": "98,7 mm",
          "media_historica_do_mes": "240,2 mm"
        }
      },
      {
        "name": "Guarapiranga",
        "data": {
          "volume_armazenado": "78,9 %",
          "pluviometria_do_dia": "1,2 mm",
          "pluviometria_acumulada_no_mes": "110,4 mm",
          "media_historica_do_mes": "221,5 mm"
        }
      }
    ]"#
}
