//! AquaSmart - Water Supply Dashboard Service
//!
//! Builds the dashboard for one site:
//! 1. Fetches the daily precipitation forecast (Open-Meteo)
//! 2. Fetches operator reservoir metrics where the site has a feed (SABESP)
//! 3. Simulates consumption history from a seeded model
//! 4. Projects days of supply remaining and classifies the alert
//!
//! Usage:
//!   cargo run --release                         # Report for the default site
//!   cargo run --release -- --site sao-paulo     # Report for another site
//!   cargo run --release -- --offline --json     # Simulated data only, as JSON
//!   cargo run --release -- --endpoint 8080      # Serve the HTTP API on port 8080
//!
//! Environment:
//!   AQUASMART_CONFIG - alternate path to aquasmart.toml

use aquasmart_service::config;
use aquasmart_service::dashboard::{self, Dashboard, DashboardSnapshot, SourceData};
use aquasmart_service::endpoint;
use aquasmart_service::logging;
use aquasmart_service::model::AlertLevel;
use aquasmart_service::sites::{all_site_slugs, find_site, DEFAULT_SITE};
use chrono::Utc;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "aquasmart", version, about = "Rain forecast and water supply dashboard", long_about = None)]
struct Cli {
    /// Site to report on
    #[arg(short, long, default_value = DEFAULT_SITE)]
    site: String,

    /// Path to aquasmart.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Skip live APIs and use simulated data only
    #[arg(long)]
    offline: bool,

    /// Print the dashboard as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Serve the HTTP API on this port instead of printing a report
    #[arg(long, value_name = "PORT")]
    endpoint: Option<u16>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let app_config = match config::load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("❌ Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let level = match cli.verbose {
        0 => logging::parse_level(&app_config.logging.level),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    if let Err(e) = logging::init_logger(
        level,
        app_config.logging.file.as_deref(),
        app_config.logging.console_timestamps,
    ) {
        eprintln!("❌ Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    let client = match dashboard::build_client(&app_config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("❌ Failed to build HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    let mut dash = match Dashboard::new(app_config) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("❌ Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(port) = cli.endpoint {
        println!("🚀 Starting HTTP endpoint server on port {}...", port);
        if let Err(e) = endpoint::start_endpoint_server(port, dash, client) {
            eprintln!("❌ Endpoint server error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    let Some(site) = find_site(&cli.site) else {
        eprintln!("Unknown site: {}", cli.site);
        eprintln!("Available sites: {}", all_site_slugs().join(", "));
        std::process::exit(1);
    };

    let snapshot = if cli.offline {
        dash.assemble(site, SourceData::offline(), Utc::now().date_naive())
    } else {
        dash.refresh(&client, site)
    };

    if cli.json {
        match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("❌ Failed to serialize dashboard: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        print_report(&snapshot, dash.config().projection.threshold_days);
    }
}

fn print_report(snapshot: &DashboardSnapshot, threshold_days: f64) {
    println!("💧 AquaSmart - {}", snapshot.site_name);
    println!("============================\n");

    for warning in &snapshot.warnings {
        println!("⚠  {}", warning);
    }
    if !snapshot.warnings.is_empty() {
        println!();
    }

    println!("🌦️  Precipitation forecast");
    match snapshot.tomorrow_precipitation_mm {
        Some(mm) => println!("   Tomorrow: {:.1} mm", mm),
        None => println!("   Tomorrow: n/a"),
    }
    for day in &snapshot.forecast {
        match day.precipitation_mm {
            Some(mm) => println!("   {}  {:>6.1} mm", day.date, mm),
            None => println!("   {}  {:>6} mm", day.date, "-"),
        }
    }
    println!();

    if let Some(reservoir) = &snapshot.reservoir {
        println!("📊 Reservoir - {}", reservoir.name);
        println!("   Stored volume:        {}", reservoir.stored_volume);
        println!("   Rainfall today:       {}", reservoir.rainfall_today);
        println!("   Monthly historical:   {}", reservoir.historical_monthly_mean);
        println!();
    }

    if let Some(projection) = &snapshot.projection {
        let cached = if snapshot.projection_cached { " (cached)" } else { "" };
        println!("🏞️  Simulated reservoir{}", cached);
        println!("   Current level:        {:.0} m³", projection.state.current_level_m3);
        println!("   Mean inflow:          {:.0} m³/day", projection.trend.mean_inflow_m3);
        println!("   Mean consumption:     {:.0} m³/day", projection.trend.mean_consumption_m3);
        println!("   Net balance:          {:+.0} m³/day", projection.result.daily_net_balance_m3);
        match projection.result.days_remaining.as_finite() {
            Some(days) => println!("   Days remaining:       {:.1}", days),
            None => println!("   Days remaining:       unlimited"),
        }
        println!();
    }

    if !snapshot.residential_consumption_litres.is_empty() {
        let litres = &snapshot.residential_consumption_litres;
        let mean = litres.iter().sum::<f64>() / litres.len() as f64;
        println!("🏠 Residential consumption: {:.0} L/person/day over {} days\n", mean, litres.len());
    }

    println!("🔔 Supply alert");
    match &snapshot.alert {
        Some(alert) => {
            let icon = match alert.level {
                AlertLevel::Warning => "🚨",
                AlertLevel::Ok => "✅",
            };
            println!("   {} {}", icon, alert.headline);
            if let Some(suggestion) = &alert.suggestion {
                println!("   Suggestion: {}", suggestion);
            }
        }
        None => println!(
            "   Projection unavailable; cannot assess the next {} days.",
            threshold_days
        ),
    }
}
