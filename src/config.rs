//! Configuration module
//!
//! TOML-backed application configuration with sane defaults, read from
//! `~/.config/booking-service/config.toml` unless the embedding
//! application points elsewhere.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseSettings,
    pub booking: BookingSettings,
    pub logging: LoggingSettings,
}

/// Database section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// SQLite file path; ignored when `url` is set explicitly
    pub path: String,
    /// Full connection URL override
    pub url: Option<String>,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: "./booking.db".to_string(),
            url: None,
        }
    }
}

impl DatabaseSettings {
    pub fn connection_url(&self) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None => format!("sqlite://{}?mode=rwc", self.path),
        }
    }
}

/// Booking engine section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BookingSettings {
    /// How long an operation waits for a contended room lock (ms)
    pub lock_timeout_ms: u64,
    /// No-show sweeper interval (seconds)
    pub no_show_sweep_interval_secs: u64,
}

impl Default for BookingSettings {
    fn default() -> Self {
        Self {
            lock_timeout_ms: 5_000,
            no_show_sweep_interval_secs: 3_600,
        }
    }
}

/// Logging section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default tracing filter, overridable via RUST_LOG
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }
}

/// Default config file location: ~/.config/booking-service/config.toml
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("booking-service")
        .join("config.toml")
}

/// Initialize tracing with the configured level, honoring RUST_LOG when
/// set.
pub fn init_tracing(logging: &LoggingSettings) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&logging.level)),
        )
        .init();
}

// ── Tests ──────────────────────────────────────────────────────
