/// HTTP endpoint for the dashboard
///
/// Provides a simple JSON API so a presentation layer (or anyone with curl)
/// can read the same data the CLI prints.
///
/// Endpoints:
/// - GET  /health                - Service health check
/// - GET  /sites                 - Registered sites
/// - GET  /dashboard/{slug}      - Refresh and return a site's dashboard
/// - POST /project/{slug}        - Project a caller-supplied observation list

use crate::dashboard::Dashboard;
use crate::logging::DataSource;
use crate::model::DailyObservation;
use crate::sites::{find_site, SITE_REGISTRY};
use serde::Serialize;
use std::io::Read;

// ---------------------------------------------------------------------------
// Response Types
// ---------------------------------------------------------------------------

/// Site listing entry for JSON response
#[derive(Debug, Serialize)]
pub struct SiteSummary {
    pub slug: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub reservoir: Option<String>,
}

pub fn site_summaries() -> Vec<SiteSummary> {
    SITE_REGISTRY
        .iter()
        .map(|s| SiteSummary {
            slug: s.slug.to_string(),
            name: s.name.to_string(),
            latitude: s.latitude,
            longitude: s.longitude,
            reservoir: s.reservoir.map(String::from),
        })
        .collect()
}

type JsonResponse = tiny_http::Response<std::io::Cursor<Vec<u8>>>;

// ---------------------------------------------------------------------------
// HTTP Server
// ---------------------------------------------------------------------------

/// Start HTTP endpoint server on the specified port. Requests are handled
/// one at a time on the calling thread.
pub fn start_endpoint_server(
    port: u16,
    mut dashboard: Dashboard,
    client: reqwest::blocking::Client,
) -> Result<(), String> {
    let server = tiny_http::Server::http(format!("0.0.0.0:{}", port))
        .map_err(|e| format!("Failed to start HTTP server: {}", e))?;

    log::info!(target: DataSource::Endpoint.target(), "HTTP endpoint listening on http://0.0.0.0:{}", port);

    for mut request in server.incoming_requests() {
        let method = request.method().clone();
        let url = request.url().to_string();

        let response = match (&method, request_path(&url)) {
            (tiny_http::Method::Get, "/health") => handle_health(),
            (tiny_http::Method::Get, "/sites") => handle_sites(),
            (tiny_http::Method::Get, path) if path.starts_with("/dashboard/") => {
                let slug = path.trim_start_matches("/dashboard/");
                handle_dashboard(&mut dashboard, &client, slug)
            }
            (tiny_http::Method::Post, path) if path.starts_with("/project/") => {
                let slug = path.trim_start_matches("/project/").to_string();
                let mut body = String::new();
                match request.as_reader().read_to_string(&mut body) {
                    Ok(_) => handle_project(&mut dashboard, &slug, &body),
                    Err(e) => create_response(400, serde_json::json!({ "error": e.to_string() })),
                }
            }
            _ => not_found(),
        };

        log::debug!(target: DataSource::Endpoint.target(), "{} {} -> {}", method, url, response.status_code().0);

        if let Err(e) = request.respond(response) {
            log::warn!(target: DataSource::Endpoint.target(), "Failed to send response: {}", e);
        }
    }

    Ok(())
}

/// Request path with any query string removed.
fn request_path(url: &str) -> &str {
    url.split_once('?').map_or(url, |(path, _)| path)
}

/// Handle /health endpoint
fn handle_health() -> JsonResponse {
    create_response(
        200,
        serde_json::json!({
            "status": "ok",
            "service": "aquasmart_service",
            "version": env!("CARGO_PKG_VERSION")
        }),
    )
}

/// Handle /sites endpoint
fn handle_sites() -> JsonResponse {
    create_response(200, serde_json::json!(site_summaries()))
}

/// Handle /dashboard/{slug} endpoint
fn handle_dashboard(dashboard: &mut Dashboard, client: &reqwest::blocking::Client, slug: &str) -> JsonResponse {
    match find_site(slug) {
        Some(site) => {
            let snapshot = dashboard.refresh(client, site);
            to_json_response(200, &snapshot)
        }
        None => unknown_site(slug),
    }
}

/// Handle POST /project/{slug}: body is a JSON array of observations
fn handle_project(dashboard: &mut Dashboard, slug: &str, body: &str) -> JsonResponse {
    let Some(site) = find_site(slug) else {
        return unknown_site(slug);
    };

    let observations: Vec<DailyObservation> = match serde_json::from_str(body) {
        Ok(obs) => obs,
        Err(e) => {
            return create_response(400, serde_json::json!({ "error": format!("Invalid body: {}", e) }));
        }
    };

    match dashboard.project_observations(site, &observations) {
        Ok(projection) => to_json_response(200, &projection),
        Err(e) => create_response(
            422,
            serde_json::json!({
                "error": e.to_string(),
                "site": slug
            }),
        ),
    }
}

fn unknown_site(slug: &str) -> JsonResponse {
    create_response(
        404,
        serde_json::json!({
            "error": format!("Site {} not found in site registry", slug),
            "site": slug
        }),
    )
}

fn not_found() -> JsonResponse {
    create_response(
        404,
        serde_json::json!({
            "error": "Not found",
            "available_endpoints": ["/health", "/sites", "/dashboard/{slug}", "POST /project/{slug}"]
        }),
    )
}

fn to_json_response<T: Serialize>(status_code: u16, value: &T) -> JsonResponse {
    match serde_json::to_value(value) {
        Ok(json) => create_response(status_code, json),
        Err(e) => create_response(500, serde_json::json!({ "error": e.to_string() })),
    }
}

/// Create HTTP response with JSON body
fn create_response(status_code: u16, json: serde_json::Value) -> JsonResponse {
    let body = serde_json::to_string_pretty(&json).unwrap_or_else(|_| json.to_string());
    let mut response = tiny_http::Response::from_data(body.into_bytes())
        .with_status_code(tiny_http::StatusCode::from(status_code));

    if let Ok(header) = tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]) {
        response = response.with_header(header);
    }
    response
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
