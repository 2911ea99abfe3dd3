/// aquasmart_service: rain forecast and water supply dashboard service.
///
/// # Module structure
///
/// ```text
/// aquasmart_service
/// ├── model       — shared data types (DailyObservation, ProjectionResult, InvalidInputError, …)
/// ├── config      — service configuration loader (aquasmart.toml)
/// ├── sites       — dashboard site registry (coordinates, reservoir names)
/// ├── logging     — `log` backend with source-tagged entries + failure classification
/// ├── dashboard   — collaborator fan-out, projection fallback, snapshot assembly
/// ├── endpoint    — JSON HTTP API over the dashboard
/// ├── ingest
/// │   ├── open_meteo — daily precipitation forecast: URL construction + JSON parsing
/// │   ├── sabesp     — operator reservoir listing, lookup by name
/// │   ├── synthetic  — seeded consumption/inflow history generator
/// │   └── fixtures (test only) — representative API response payloads
/// ├── analysis
/// │   ├── balance    — clipped level accumulation and trailing-window trend
/// │   └── projection — days-of-supply projection, WaterBalanceProjector
/// └── alert
///     └── supply     — alert classification and banner text
/// ```

/// Public modules
pub mod alert;
pub mod analysis;
pub mod config;
pub mod dashboard;
pub mod endpoint;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod sites;
