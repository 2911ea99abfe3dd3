/// Dashboard assembly: runs the collaborators for a site, feeds the
/// projector, and applies the fallback policy.
///
/// Fallback policy:
/// - A failed forecast or reservoir fetch is a non-fatal warning on the
///   snapshot; the rest of the dashboard still renders.
/// - A projection error falls back to the last good projection for the
///   site (flagged `projection_cached`), or to no projection at all.
///
/// The projector itself never sees network errors.

use crate::alert::supply::SupplyAlert;
use crate::analysis::balance::level_series;
use crate::analysis::projection::WaterBalanceProjector;
use crate::config::AppConfig;
use crate::ingest::synthetic::{self, SyntheticDay, SyntheticGenerator};
use crate::ingest::{open_meteo, sabesp};
use crate::logging::{log_fetch_failure, DataSource};
use crate::model::{BalanceProjection, FetchError, ForecastDay, InvalidInputError, ReservoirSnapshot};
use crate::sites::Site;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::mpsc;
use threadpool::ThreadPool;

// ---------------------------------------------------------------------------
// Response Types
// ---------------------------------------------------------------------------

/// One day of the history chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub date: NaiveDate,
    pub precipitation_mm: f64,
    pub inflow_m3: f64,
    pub consumption_m3: f64,
    pub level_m3: f64,
}

/// Everything one dashboard page shows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub site_slug: String,
    pub site_name: String,
    pub generated_at: DateTime<Utc>,

    /// Forecast precipitation, empty if the forecast fetch failed
    pub forecast: Vec<ForecastDay>,
    pub tomorrow_precipitation_mm: Option<f64>,

    /// Operator reservoir metrics, for sites that have a feed
    pub reservoir: Option<ReservoirSnapshot>,

    /// Simulated history and its clipped level series
    pub history: Vec<HistoryPoint>,
    pub residential_consumption_litres: Vec<f64>,

    pub projection: Option<BalanceProjection>,
    pub projection_cached: bool,
    pub alert: Option<SupplyAlert>,

    /// Non-fatal problems to show above the dashboard
    pub warnings: Vec<String>,
}

/// Raw results of the live collaborators for one refresh.
#[derive(Debug)]
pub struct SourceData {
    pub forecast: Result<Vec<ForecastDay>, FetchError>,
    /// `None` when the site has no reservoir feed (or it was skipped).
    pub reservoir: Option<Result<ReservoirSnapshot, FetchError>>,
}

impl SourceData {
    /// Placeholder used when live sources are disabled.
    pub fn offline() -> Self {
        Self {
            forecast: Err(FetchError::NoDataAvailable("live sources disabled".to_string())),
            reservoir: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Data Fetching
// ---------------------------------------------------------------------------

enum Fetched {
    Forecast(Result<Vec<ForecastDay>, FetchError>),
    Reservoir(Result<ReservoirSnapshot, FetchError>),
}

/// Fetches the forecast and (if the site has one) the reservoir feed in
/// parallel.
pub fn fetch_sources(client: &reqwest::blocking::Client, config: &AppConfig, site: &'static Site) -> SourceData {
    let pool = ThreadPool::new(2);
    let (tx, rx) = mpsc::channel();

    {
        let tx = tx.clone();
        let client = client.clone();
        let url = config.sources.forecast_url.clone();
        pool.execute(move || {
            let result = open_meteo::fetch_forecast(&client, &url, site);
            let _ = tx.send(Fetched::Forecast(result));
        });
    }

    if let Some(name) = site.reservoir {
        let tx = tx.clone();
        let client = client.clone();
        let url = config.sources.reservoir_url.clone();
        pool.execute(move || {
            let result = sabesp::fetch_reservoir(&client, &url, name);
            let _ = tx.send(Fetched::Reservoir(result));
        });
    }
    drop(tx);

    let mut sources = SourceData {
        forecast: Err(FetchError::NoDataAvailable("forecast worker did not report".to_string())),
        reservoir: None,
    };

    for fetched in rx {
        match fetched {
            Fetched::Forecast(result) => sources.forecast = result,
            Fetched::Reservoir(result) => sources.reservoir = Some(result),
        }
    }

    sources
}

/// Blocking HTTP client with the configured timeout.
pub fn build_client(config: &AppConfig) -> Result<reqwest::blocking::Client, reqwest::Error> {
    reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(config.sources.request_timeout_secs))
        .user_agent(concat!("aquasmart_service/", env!("CARGO_PKG_VERSION")))
        .build()
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// Long-lived dashboard state: configuration plus the last good projection
/// per site.
pub struct Dashboard {
    config: AppConfig,
    projector: WaterBalanceProjector,
    generator: SyntheticGenerator,
    last_projection: HashMap<String, BalanceProjection>,
}

impl Dashboard {
    pub fn new(config: AppConfig) -> Result<Self, InvalidInputError> {
        let projector = WaterBalanceProjector::new(config.projection.clone())?;
        let generator = SyntheticGenerator::new(config.simulation.clone())?;

        Ok(Self {
            config,
            projector,
            generator,
            last_projection: HashMap::new(),
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Live refresh: fetch collaborators, then assemble for today.
    pub fn refresh(&mut self, client: &reqwest::blocking::Client, site: &'static Site) -> DashboardSnapshot {
        let sources = fetch_sources(client, &self.config, site);
        self.assemble(site, sources, Utc::now().date_naive())
    }

    /// Builds the snapshot from already-fetched sources. The synthetic
    /// history ends on `today`.
    pub fn assemble(&mut self, site: &Site, sources: SourceData, today: NaiveDate) -> DashboardSnapshot {
        let mut warnings = Vec::new();

        let forecast = match sources.forecast {
            Ok(days) => days,
            Err(e) => {
                log_fetch_failure(DataSource::OpenMeteo, site.slug, "forecast", &e);
                warnings.push(format!("Could not load the precipitation forecast: {}", e));
                Vec::new()
            }
        };

        let reservoir = match sources.reservoir {
            Some(Ok(snapshot)) => Some(snapshot),
            Some(Err(e)) => {
                let name = site.reservoir.unwrap_or(site.slug);
                log_fetch_failure(DataSource::Sabesp, name, "reservoir", &e);
                warnings.push(format!("Could not load reservoir data for {}: {}", name, e));
                None
            }
            None => None,
        };

        let days = match self.generator.history(today) {
            Ok(days) => days,
            Err(e) => {
                log::error!(target: DataSource::Synthetic.target(), "history generation failed: {}", e);
                warnings.push(format!("Could not simulate consumption history: {}", e));
                Vec::new()
            }
        };

        let residential_consumption_litres = self.generator.residential_consumption().unwrap_or_else(|e| {
            warnings.push(format!("Could not simulate residential consumption: {}", e));
            Vec::new()
        });

        let history = self.history_points(&days);
        let (projection, projection_cached) = self.project_with_fallback(site, &days, &mut warnings);

        let threshold = self.config.projection.threshold_days;
        let alert = projection.map(|p| SupplyAlert::from_projection(&p.result, threshold));

        DashboardSnapshot {
            site_slug: site.slug.to_string(),
            site_name: site.name.to_string(),
            generated_at: Utc::now(),
            tomorrow_precipitation_mm: open_meteo::tomorrow_precipitation(&forecast),
            forecast,
            reservoir,
            history,
            residential_consumption_litres,
            projection,
            projection_cached,
            alert,
            warnings,
        }
    }

    fn history_points(&self, days: &[SyntheticDay]) -> Vec<HistoryPoint> {
        let observations = synthetic::observations(days);
        let levels = level_series(
            &observations,
            self.config.projection.initial_offset_m3,
            self.config.projection.floor_m3,
        )
        .unwrap_or_default();

        days.iter()
            .zip(levels)
            .map(|(day, level_m3)| HistoryPoint {
                date: day.observation.date,
                precipitation_mm: day.precipitation_mm,
                inflow_m3: day.observation.inflow_m3,
                consumption_m3: day.observation.consumption_m3,
                level_m3,
            })
            .collect()
    }

    fn project_with_fallback(
        &mut self,
        site: &Site,
        days: &[SyntheticDay],
        warnings: &mut Vec<String>,
    ) -> (Option<BalanceProjection>, bool) {
        match self.projector.project(&synthetic::observations(days)) {
            Ok(projection) => {
                self.last_projection.insert(site.slug.to_string(), projection);
                (Some(projection), false)
            }
            Err(e) => {
                log::warn!(target: DataSource::Projection.target(), "[{}] projection failed: {}", site.slug, e);
                match self.last_projection.get(site.slug) {
                    Some(cached) => {
                        warnings.push(format!("Showing the previous projection: {}", e));
                        (Some(*cached), true)
                    }
                    None => {
                        warnings.push(format!("Supply projection unavailable: {}", e));
                        (None, false)
                    }
                }
            }
        }
    }

    /// Projects an externally supplied observation sequence for a site.
    /// A good projection replaces the site's cached one; errors go straight
    /// back to the caller with no fallback.
    pub fn project_observations(
        &mut self,
        site: &Site,
        observations: &[crate::model::DailyObservation],
    ) -> Result<BalanceProjection, InvalidInputError> {
        let projection = self.projector.project(observations)?;
        self.last_projection.insert(site.slug.to_string(), projection);
        Ok(projection)
    }

    /// Last good projection for a site, if any.
    pub fn cached_projection(&self, slug: &str) -> Option<&BalanceProjection> {
        self.last_projection.get(slug)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
