/// Structured logging for the AquaSmart service
///
/// Implements the `log` facade with source-tagged, timestamped entries.
/// The source is the log target (`open-meteo`, `sabesp`, `synthetic`,
/// `projection`, `endpoint`, `system`). Supports console output and
/// optional append-to-file logging.

use chrono::Utc;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::Mutex;

use crate::model::FetchError;

// ---------------------------------------------------------------------------
// Data Source Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    OpenMeteo,
    Sabesp,
    Synthetic,
    Projection,
    Endpoint,
    System,
}

impl DataSource {
    /// Log target string used with the `log` macros.
    pub fn target(&self) -> &'static str {
        match self {
            DataSource::OpenMeteo => "open-meteo",
            DataSource::Sabesp => "sabesp",
            DataSource::Synthetic => "synthetic",
            DataSource::Projection => "projection",
            DataSource::Endpoint => "endpoint",
            DataSource::System => "system",
        }
    }

    fn from_target(target: &str) -> Option<Self> {
        match target {
            "open-meteo" => Some(DataSource::OpenMeteo),
            "sabesp" => Some(DataSource::Sabesp),
            "synthetic" => Some(DataSource::Synthetic),
            "projection" => Some(DataSource::Projection),
            "endpoint" => Some(DataSource::Endpoint),
            "system" => Some(DataSource::System),
            _ => None,
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::OpenMeteo => write!(f, "METEO"),
            DataSource::Sabesp => write!(f, "SABESP"),
            DataSource::Synthetic => write!(f, "SIM"),
            DataSource::Projection => write!(f, "PROJ"),
            DataSource::Endpoint => write!(f, "HTTP"),
            DataSource::System => write!(f, "SYS"),
        }
    }
}

// ---------------------------------------------------------------------------
// Failure Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureType {
    /// Expected failure - the entity is simply not published right now
    Expected,
    /// Unexpected failure - indicates service degradation or an API change
    Unexpected,
    /// Unknown - cannot determine if this is expected or not
    Unknown,
}

impl fmt::Display for FailureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureType::Expected => write!(f, "EXPECTED"),
            FailureType::Unexpected => write!(f, "UNEXPECTED"),
            FailureType::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Classify a collaborator failure by error kind
pub fn classify_fetch_failure(err: &FetchError) -> FailureType {
    match err {
        FetchError::HttpError(code) if *code >= 500 => FailureType::Unexpected,
        FetchError::HttpError(_) => FailureType::Unknown,
        FetchError::Transport(_) => FailureType::Unexpected,
        // Schema drift on the provider side
        FetchError::ParseError(_) => FailureType::Unexpected,
        FetchError::EntityNotFound(_) => FailureType::Unknown,
        FetchError::NoDataAvailable(_) => FailureType::Expected,
    }
}

/// Log a data source failure with automatic classification
pub fn log_fetch_failure(source: DataSource, entity: &str, operation: &str, err: &FetchError) {
    let failure_type = classify_fetch_failure(err);
    let target = source.target();

    match failure_type {
        FailureType::Expected => {
            log::debug!(target: target, "[{}] {} failed [{}]: {}", entity, operation, failure_type, err)
        }
        FailureType::Unexpected => {
            log::error!(target: target, "[{}] {} failed [{}]: {}", entity, operation, failure_type, err)
        }
        FailureType::Unknown => {
            log::warn!(target: target, "[{}] {} failed [{}]: {}", entity, operation, failure_type, err)
        }
    }
}

// ---------------------------------------------------------------------------
// Logger
// ---------------------------------------------------------------------------

pub struct Logger {
    /// Minimum log level to display
    min_level: LevelFilter,
    /// Optional file for appending every entry
    log_file: Option<Mutex<std::fs::File>>,
    /// Whether to include timestamps in console output
    console_timestamps: bool,
}

impl Logger {
    pub fn new(min_level: LevelFilter, log_file: Option<&str>, console_timestamps: bool) -> std::io::Result<Self> {
        let log_file = match log_file {
            Some(path) => Some(Mutex::new(
                OpenOptions::new().create(true).append(true).open(path)?,
            )),
            None => None,
        };

        Ok(Logger { min_level, log_file, console_timestamps })
    }

    fn source_label(target: &str) -> String {
        DataSource::from_target(target)
            .map(|s| s.to_string())
            .unwrap_or_else(|| target.to_string())
    }

    /// Full entry as written to the log file.
    pub fn format_entry(record: &Record) -> String {
        format!(
            "{} {} {}: {}",
            Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
            record.level(),
            Self::source_label(record.target()),
            record.args()
        )
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.min_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let entry = Self::format_entry(record);
        let source = Self::source_label(record.target());

        if self.console_timestamps {
            match record.level() {
                Level::Error | Level::Warn => eprintln!("{}", entry),
                _ => println!("{}", entry),
            }
        } else {
            match record.level() {
                Level::Error => eprintln!("   ✗ {}: {}", source, record.args()),
                Level::Warn => eprintln!("   ⚠ {}: {}", source, record.args()),
                Level::Info => println!("   {}", record.args()),
                Level::Debug | Level::Trace => println!("   [{}] {}", record.level(), record.args()),
            }
        }

        if let Some(file) = &self.log_file {
            if let Ok(mut file) = file.lock() {
                if let Err(e) = writeln!(file, "{}", entry) {
                    eprintln!("Failed to write to log file: {}", e);
                }
            }
        }
    }

    fn flush(&self) {
        if let Some(file) = &self.log_file {
            if let Ok(mut file) = file.lock() {
                let _ = file.flush();
            }
        }
    }
}

/// Parses a config level name; unknown names fall back to `Info`.
pub fn parse_level(name: &str) -> LevelFilter {
    name.parse().unwrap_or(LevelFilter::Info)
}

/// Install the global logger. Fails if the log file cannot be opened or a
/// logger is already installed.
pub fn init_logger(
    min_level: LevelFilter,
    log_file: Option<&str>,
    console_timestamps: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let logger = Logger::new(min_level, log_file, console_timestamps)?;
    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(min_level);
    Ok(())
}
