/// Integration tests for dashboard assembly without network access
///
/// Live collaborators are replaced with `SourceData` values so the
/// fallback policy can be exercised deterministically.
///
/// Run with: cargo test --test dashboard_offline

use aquasmart_service::config::{parse_config, AppConfig};
use aquasmart_service::dashboard::{Dashboard, SourceData};
use aquasmart_service::model::{FetchError, ForecastDay};
use aquasmart_service::sites::{find_site, SITE_REGISTRY};
use chrono::NaiveDate;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()
}

#[test]
fn test_every_site_renders_offline() {
    let mut dashboard = Dashboard::new(AppConfig::default()).unwrap();

    for site in SITE_REGISTRY {
        let snapshot = dashboard.assemble(site, SourceData::offline(), today());
        assert_eq!(snapshot.site_slug, site.slug);
        assert!(snapshot.projection.is_some(), "{} should project offline", site.slug);
        assert!(snapshot.alert.is_some());
        assert!(dashboard.cached_projection(site.slug).is_some());
    }
}

#[test]
fn test_same_config_gives_same_dashboard() {
    let site = find_site("janauba").unwrap();
    let mut a = Dashboard::new(AppConfig::default()).unwrap();
    let mut b = Dashboard::new(AppConfig::default()).unwrap();

    let left = a.assemble(site, SourceData::offline(), today());
    let right = b.assemble(site, SourceData::offline(), today());

    assert_eq!(left.history, right.history);
    assert_eq!(left.projection, right.projection);
    assert_eq!(left.residential_consumption_litres, right.residential_consumption_litres);
}

#[test]
fn test_forecast_failure_keeps_rest_of_dashboard() {
    let site = find_site("sao-paulo").unwrap();
    let mut dashboard = Dashboard::new(AppConfig::default()).unwrap();
    let sources = SourceData {
        forecast: Err(FetchError::Transport("connection refused".to_string())),
        reservoir: Some(Err(FetchError::EntityNotFound("Cantareira".to_string()))),
    };

    let snapshot = dashboard.assemble(site, sources, today());
    assert_eq!(snapshot.warnings.len(), 2, "{:?}", snapshot.warnings);
    assert!(snapshot.forecast.is_empty());
    assert!(snapshot.tomorrow_precipitation_mm.is_none());
    assert!(snapshot.reservoir.is_none());
    assert_eq!(snapshot.history.len(), 60);
    assert!(snapshot.projection.is_some());
}

#[test]
fn test_generous_surplus_config_is_ok() {
    // Heavy runoff and light consumption: inflow outpaces demand every day.
    let config = parse_config(
        r#"
        [simulation]
        runoff_m3_per_mm = 5000.0
        rain_gamma_shape = 50.0
        consumption_mean_m3 = 1000.0
        consumption_std_dev_m3 = 0.0
        "#,
    )
    .unwrap();
    let mut dashboard = Dashboard::new(config).unwrap();
    let site = find_site("janauba").unwrap();

    let forecast = vec![ForecastDay { date: today(), precipitation_mm: Some(1.0) }];
    let sources = SourceData { forecast: Ok(forecast), reservoir: None };
    let snapshot = dashboard.assemble(site, sources, today());

    let projection = snapshot.projection.unwrap();
    assert!(projection.result.days_remaining.is_unlimited());
    assert_eq!(snapshot.alert.unwrap().suggestion, None);
    assert_eq!(snapshot.tomorrow_precipitation_mm, None);
}

#[test]
fn test_snapshot_serializes_to_json() {
    let site = find_site("janauba").unwrap();
    let mut dashboard = Dashboard::new(AppConfig::default()).unwrap();
    let snapshot = dashboard.assemble(site, SourceData::offline(), today());

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["site_slug"], "janauba");
    assert_eq!(json["history"].as_array().unwrap().len(), 60);
    assert!(json["projection"]["result"]["alert_level"].is_string());
}
