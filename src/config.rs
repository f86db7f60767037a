//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server
//! starts.
//!
//! ## Required Variables
//!
//! - `OPERATOR_CHAT_ID` - recipient of reports and operational alerts
//!
//! ## Optional Variables
//!
//! - `DATABASE_URL` - SQLite database (default: `sqlite://quizlink.db`,
//!   file created if missing)
//! - `LISTEN` - bind address (default: `0.0.0.0:5000`)
//! - `BASE_URL` - public base for short URLs (default: `http://localhost:5000`)
//! - `CATALOG_PATH` - combination table CSV (default: `catalog.csv`)
//! - `IMAGES_DIR` - per-question images directory (default: unset)
//! - `REPORT_INTERVAL_MIN` - report cadence in minutes (default: 10)
//! - `REPORT_DIR` - report CSV output directory (default: `reports`)
//! - `EVENT_QUEUE_CAPACITY` - inbound event buffer size (default: 10000, min: 100)
//! - `CHANNEL_TIMEOUT_SECS` - outbound delivery timeout (default: 5)
//! - `SESSION_IDLE_SECS` - idle session eviction horizon, 0 disables (default: 0)
//! - `DB_MAX_CONNECTIONS` - sqlx pool size (default: 10)
//! - `RUST_LOG` - log level (default: `info`)
//! - `LOG_FORMAT` - log format: `text` or `json` (default: `text`)

use anyhow::{Context, Result};
use std::env;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    /// Public prefix short URLs are built from.
    pub base_url: String,
    pub log_level: String,
    pub log_format: String,
    pub catalog_path: String,
    /// Directory with per-question images (`q1.png` ... `q6.png`).
    pub images_dir: Option<String>,
    /// Recipient of periodic reports and operational alerts.
    pub operator_chat_id: String,
    pub report_interval_min: u64,
    pub report_dir: String,
    pub event_queue_capacity: usize,
    /// Timeout for one outbound messaging-channel delivery.
    pub channel_timeout_secs: u64,
    /// Idle session eviction horizon. `0` disables eviction.
    pub session_idle_secs: u64,
    /// Maximum number of connections in the pool (`DB_MAX_CONNECTIONS`).
    pub db_max_connections: u32,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `OPERATOR_CHAT_ID` is missing.
    pub fn from_env() -> Result<Self> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://quizlink.db".to_string());
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:5000".to_string());
        let base_url =
            env::var("BASE_URL").unwrap_or_else(|_| "http://localhost:5000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
        let catalog_path = env::var("CATALOG_PATH").unwrap_or_else(|_| "catalog.csv".to_string());
        let images_dir = env::var("IMAGES_DIR").ok().filter(|v| !v.is_empty());

        let operator_chat_id =
            env::var("OPERATOR_CHAT_ID").context("OPERATOR_CHAT_ID must be set")?;

        let report_interval_min = env::var("REPORT_INTERVAL_MIN")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        let report_dir = env::var("REPORT_DIR").unwrap_or_else(|_| "reports".to_string());

        let event_queue_capacity = env::var("EVENT_QUEUE_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10_000);

        let channel_timeout_secs = env::var("CHANNEL_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        let session_idle_secs = env::var("SESSION_IDLE_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);

        let db_max_connections = env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        Ok(Self {
            database_url,
            listen_addr,
            base_url,
            log_level,
            log_format,
            catalog_path,
            images_dir,
            operator_chat_id,
            report_interval_min,
            report_dir,
            event_queue_capacity,
            channel_timeout_secs,
            session_idle_secs,
            db_max_connections,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `DATABASE_URL` is not a SQLite URL
    /// - `BASE_URL` is not a valid http(s) URL
    /// - `LISTEN` is not in `host:port` form
    /// - `EVENT_QUEUE_CAPACITY` is out of bounds
    /// - `REPORT_INTERVAL_MIN` or `CHANNEL_TIMEOUT_SECS` is zero
    pub fn validate(&self) -> Result<()> {
        if !self.database_url.starts_with("sqlite:") {
            anyhow::bail!(
                "DATABASE_URL must start with 'sqlite:', got '{}'",
                self.database_url
            );
        }

        let base = url::Url::parse(&self.base_url)
            .with_context(|| format!("BASE_URL is not a valid URL: '{}'", self.base_url))?;
        if base.scheme() != "http" && base.scheme() != "https" {
            anyhow::bail!("BASE_URL must be http or https, got '{}'", self.base_url);
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if self.event_queue_capacity < 100 {
            anyhow::bail!(
                "EVENT_QUEUE_CAPACITY must be at least 100, got {}",
                self.event_queue_capacity
            );
        }

        if self.event_queue_capacity > 1_000_000 {
            anyhow::bail!(
                "EVENT_QUEUE_CAPACITY is too large (max: 1000000), got {}",
                self.event_queue_capacity
            );
        }

        if self.report_interval_min == 0 {
            anyhow::bail!("REPORT_INTERVAL_MIN must be greater than 0");
        }

        if self.channel_timeout_secs == 0 || self.channel_timeout_secs > 300 {
            anyhow::bail!(
                "CHANNEL_TIMEOUT_SECS must be between 1 and 300, got {}",
                self.channel_timeout_secs
            );
        }

        if self.operator_chat_id.is_empty() {
            anyhow::bail!("OPERATOR_CHAT_ID must not be empty");
        }

        if self.db_max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }

        Ok(())
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Base URL: {}", self.base_url);
        tracing::info!("  Database: {}", self.database_url);
        tracing::info!("  Catalog: {}", self.catalog_path);
        tracing::info!("  Report interval: {} min", self.report_interval_min);
        tracing::info!("  Event queue capacity: {}", self.event_queue_capacity);

        if self.session_idle_secs > 0 {
            tracing::info!("  Session idle eviction: {} s", self.session_idle_secs);
        } else {
            tracing::info!("  Session idle eviction: disabled");
        }
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
