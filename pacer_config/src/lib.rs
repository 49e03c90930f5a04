#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schema for paced runs.
//!
//! - `Config` and its sections are deserialized from TOML and validated.
//! - Every key is optional; missing keys fall back to the CLI defaults.
//! - Durations are written as human strings (`"500ms"`, `"1m30s"`) or as
//!   integer milliseconds.
use serde::Deserialize;
use serde::de::Deserializer;
use std::path::Path;
use std::time::Duration;

pub mod duration;

pub use duration::{DurationError, parse_duration};

/// Default target rate in calls per second.
pub const DEFAULT_RATE: f64 = 1000.0;
/// Default run length when no iteration count is given.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(500);
/// Longest run the validator accepts.
pub const MAX_DURATION: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Pacing {
    /// Target calls per second. Must be finite and > 0.
    pub rate: f64,
    /// Run length for duration-based runs.
    #[serde(deserialize_with = "de_duration")]
    pub duration: Duration,
    /// When > 0, run exactly this many iterations and ignore `duration`.
    pub exactly: u64,
    /// Use the leaky-bucket baseline pacer instead of the simple one.
    #[serde(alias = "uber")]
    pub baseline: bool,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            rate: DEFAULT_RATE,
            duration: DEFAULT_DURATION,
            exactly: 0,
            baseline: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    #[default]
    Never,
    Daily,
    Hourly,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy for `file` (default: never)
    pub rotation: Rotation,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub pacing: Pacing,
    pub logging: Logging,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DurationToml {
    Text(String),
    Millis(u64),
}

fn de_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    match DurationToml::deserialize(deserializer)? {
        DurationToml::Text(s) => parse_duration(&s).map_err(serde::de::Error::custom),
        DurationToml::Millis(ms) => Ok(Duration::from_millis(ms)),
    }
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

/// Read and parse a TOML config file. Validation is left to the caller.
pub fn load_file(path: &Path) -> eyre::Result<Config> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("read config {:?}: {}", path, e))?;
    load_toml(&text).map_err(|e| eyre::eyre!("parse config {:?}: {}", path, e))
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        self.pacing.validate()?;

        if let Some(level) = self.logging.level.as_deref()
            && !matches!(
                level.to_ascii_lowercase().as_str(),
                "error" | "warn" | "info" | "debug" | "trace"
            )
        {
            eyre::bail!("logging.level must be one of error|warn|info|debug|trace, got {level:?}");
        }
        if let Some(file) = self.logging.file.as_deref()
            && file.trim().is_empty()
        {
            eyre::bail!("logging.file must not be empty when set");
        }

        Ok(())
    }
}

impl Pacing {
    pub fn validate(&self) -> eyre::Result<()> {
        if !self.rate.is_finite() {
            eyre::bail!("pacing.rate must be finite");
        }
        if self.rate <= 0.0 {
            eyre::bail!("pacing.rate must be > 0");
        }
        if self.exactly == 0 && self.duration > MAX_DURATION {
            eyre::bail!("pacing.duration is unreasonably large (>24h)");
        }
        Ok(())
    }
}
