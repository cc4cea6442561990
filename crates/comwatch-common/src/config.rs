//! Configuration structures for the comwatch daemon.
//!
//! Supports TOML deserialization with defaults matching the original
//! deployment: 10 s heartbeat timeout, 500 ms blink half-period, alarm on
//! channel 13, serial link at 9600 baud watching for `'T'`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Top-level daemon configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Heartbeat monitor timing and alarm channel.
    pub monitor: MonitorConfig,

    /// Serial link parameters.
    pub link: LinkConfig,

    /// Supervisor loop parameters.
    pub supervisor: SupervisorConfig,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            monitor: MonitorConfig::default(),
            link: LinkConfig::default(),
            supervisor: SupervisorConfig::default(),
        }
    }
}

/// Heartbeat monitor configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Silence duration after which the link is considered lost.
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,

    /// Alarm blink half-period while the link is lost.
    #[serde(with = "humantime_serde")]
    pub blink_interval: Duration,

    /// Output channel driven as the alarm indicator.
    pub channel: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            blink_interval: Duration::from_millis(500),
            channel: 13,
        }
    }
}

impl MonitorConfig {
    /// Timeout as millisecond ticks, saturating at the counter range.
    #[must_use]
    pub fn timeout_ticks(&self) -> u32 {
        duration_to_ticks(self.timeout)
    }

    /// Blink half-period as millisecond ticks, saturating at the counter range.
    #[must_use]
    pub fn blink_interval_ticks(&self) -> u32 {
        duration_to_ticks(self.blink_interval)
    }
}

/// Serial link configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Serial device node (e.g., "/dev/ttyUSB0").
    /// Must be explicitly configured - absent means the device comes from the
    /// command line, or simulated mode is in use.
    pub device: Option<PathBuf>,

    /// Serial line rate.
    pub baud: u32,

    /// Byte whose arrival counts as a heartbeat, matched case-insensitively.
    pub heartbeat_char: char,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            device: None, // Must be explicitly configured
            baud: 9600,
            heartbeat_char: 'T',
        }
    }
}

impl LinkConfig {
    /// The heartbeat character as a raw byte.
    ///
    /// Only meaningful for ASCII characters; [`WatchConfig::validate`]
    /// rejects anything else.
    #[must_use]
    pub fn heartbeat_byte(&self) -> u8 {
        self.heartbeat_char as u8
    }
}

/// Supervisor loop configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SupervisorConfig {
    /// Sleep between polls of the heartbeat source.
    #[serde(with = "humantime_serde")]
    pub poll_period: Duration,

    /// Polls between periodic status log lines (0 disables them).
    pub status_every: u64,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            poll_period: Duration::from_millis(10),
            status_every: 1_000,
        }
    }
}

fn duration_to_ticks(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}

impl WatchConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::Parse)
    }

    /// Serialize configuration to TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Check the semantic constraints serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a duration is zero or does not
    /// fit the 32-bit millisecond counter, or when the heartbeat character
    /// is not ASCII.
    pub fn validate(&self) -> Result<(), ConfigError> {
        const MAX_TICKS: u128 = u32::MAX as u128;

        if self.monitor.timeout.is_zero() {
            return Err(ConfigError::Invalid(
                "monitor.timeout must be nonzero".into(),
            ));
        }
        if self.monitor.timeout.as_millis() > MAX_TICKS {
            return Err(ConfigError::Invalid(format!(
                "monitor.timeout {} exceeds the {}ms counter range",
                humantime::format_duration(self.monitor.timeout),
                u32::MAX
            )));
        }
        if self.monitor.blink_interval.is_zero() {
            return Err(ConfigError::Invalid(
                "monitor.blink_interval must be nonzero".into(),
            ));
        }
        if self.monitor.blink_interval.as_millis() > MAX_TICKS {
            return Err(ConfigError::Invalid(format!(
                "monitor.blink_interval {} exceeds the {}ms counter range",
                humantime::format_duration(self.monitor.blink_interval),
                u32::MAX
            )));
        }
        if self.supervisor.poll_period.is_zero() {
            return Err(ConfigError::Invalid(
                "supervisor.poll_period must be nonzero".into(),
            ));
        }
        if self.supervisor.poll_period.as_millis() > MAX_TICKS {
            return Err(ConfigError::Invalid(format!(
                "supervisor.poll_period {} exceeds the {}ms counter range",
                humantime::format_duration(self.supervisor.poll_period),
                u32::MAX
            )));
        }
        if !self.link.heartbeat_char.is_ascii() {
            return Err(ConfigError::Invalid(format!(
                "link.heartbeat_char must be ASCII, got {:?}",
                self.link.heartbeat_char
            )));
        }
        Ok(())
    }
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File I/O error.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error.
    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("failed to serialize TOML: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Semantically invalid configuration value.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Serde helper module for `Duration` using humantime format.
mod humantime_serde {
    use serde::{self, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let s = humantime::format_duration(*duration).to_string();
        serializer.serialize_str(&s)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        humantime::parse_duration(&s).map_err(serde::de::Error::custom)
    }
}
