/// Service configuration loader - parses aquasmart.toml
///
/// Keeps projection parameters, the synthetic model, data source URLs and
/// logging options out of the code so they can be tuned without
/// recompiling the service. Every table is optional; missing keys fall back
/// to the reference dashboard values.

use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

pub use crate::analysis::projection::ProjectionConfig;
pub use crate::ingest::synthetic::SimulationConfig;

/// Config file read when neither `--config` nor `AQUASMART_CONFIG` is set.
pub const DEFAULT_CONFIG_PATH: &str = "aquasmart.toml";

/// Environment variable naming an alternate config file.
pub const CONFIG_PATH_ENV: &str = "AQUASMART_CONFIG";

/// Root configuration structure for TOML parsing
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub projection: ProjectionConfig,
    pub simulation: SimulationConfig,
    pub sources: SourcesConfig,
    pub logging: LoggingConfig,
}

/// Upstream API locations
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub forecast_url: String,
    pub reservoir_url: String,
    pub request_timeout_secs: u64,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            forecast_url: "https://api.open-meteo.com/v1/forecast".to_string(),
            reservoir_url: "https://sabesp-api.herokuapp.com/v2".to_string(),
            request_timeout_secs: 10,
        }
    }
}

/// Logger options, see `logging::init_logger`
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,  // "error", "warn", "info", "debug", "trace"
    pub file: Option<String>,
    pub console_timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            console_timestamps: false,
        }
    }
}

/// Parses configuration from a TOML string and validates the projection
/// and simulation tables.
pub fn parse_config(contents: &str) -> Result<AppConfig, Box<dyn Error>> {
    let config: AppConfig = toml::from_str(contents)?;
    config.projection.validate()?;
    config.simulation.validate()?;
    Ok(config)
}

/// Loads configuration from an explicit path.
pub fn load_config_from(path: &Path) -> Result<AppConfig, Box<dyn Error>> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    parse_config(&contents)
        .map_err(|e| format!("Failed to parse {}: {}", path.display(), e).into())
}

/// Resolves which config file to use: explicit argument, then
/// `AQUASMART_CONFIG` (a `.env` file is honoured), then the default path.
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    dotenv::dotenv().ok();
    std::env::var(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Loads configuration for the service.
///
/// An explicitly requested file must exist. When only the default path is
/// in play and it is missing, the built-in defaults are used.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig, Box<dyn Error>> {
    let path = resolve_config_path(explicit);

    if explicit.is_none() && !path.exists() && path == Path::new(DEFAULT_CONFIG_PATH) {
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}
