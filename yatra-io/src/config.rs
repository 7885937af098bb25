//! Configuration for the rover controller.
//!
//! Loaded from a TOML file; every section has tested defaults so a bare
//! config is always valid.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::connection::ConnectionSpec;
use crate::error::Result;

/// Top-level rover configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RoverConfig {
    pub hardware: HardwareConfig,
    pub scan: ScanConfig,
    pub motion: MotionConfig,
    pub map: disha_map::MapConfig,
    pub logging: LoggingConfig,
}

/// Hardware session configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HardwareConfig {
    /// Session name to connect to. Unset means the default session.
    pub session: Option<String>,

    /// Budget for one hardware round trip, in milliseconds. Expiry is
    /// fatal and reported; commands are never retried.
    pub response_timeout_ms: u64,
}

impl Default for HardwareConfig {
    fn default() -> Self {
        Self {
            session: None,
            response_timeout_ms: 2000,
        }
    }
}

impl HardwareConfig {
    /// Connection spec implied by this config.
    pub fn connection(&self) -> ConnectionSpec {
        match &self.session {
            Some(name) => ConnectionSpec::Named(name.clone()),
            None => ConnectionSpec::Unset,
        }
    }

    /// Round-trip budget as a duration, passed to every blocking driver
    /// call.
    pub fn response_timeout(&self) -> Duration {
        Duration::from_millis(self.response_timeout_ms)
    }
}

/// Default sweep bounds.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Default sweep start angle in degrees.
    pub start_deg: i32,
    /// Default sweep end angle in degrees.
    pub end_deg: i32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            start_deg: 0,
            end_deg: 180,
        }
    }
}

/// Default move parameters.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Default move distance in cm.
    pub distance: f64,
    /// Default move speed.
    pub speed: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            distance: 300.0,
            speed: 90.0,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl RoverConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: RoverConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RoverConfig::default();
        assert_eq!(config.scan.start_deg, 0);
        assert_eq!(config.scan.end_deg, 180);
        assert_eq!(config.motion.distance, 300.0);
        assert_eq!(config.motion.speed, 90.0);
        assert_eq!(config.hardware.response_timeout_ms, 2000);
        assert_eq!(
            config.hardware.response_timeout(),
            Duration::from_millis(2000)
        );
        assert_eq!(config.map.breadcrumb_radius, 16.25);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_connection_spec_from_config() {
        let mut config = HardwareConfig::default();
        assert_eq!(config.connection(), ConnectionSpec::Unset);

        config.session = Some("bench".to_string());
        assert_eq!(
            config.connection(),
            ConnectionSpec::Named("bench".to_string())
        );
    }

    #[test]
    fn test_toml_round_trip() {
        let config = RoverConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();

        assert!(text.contains("[hardware]"));
        assert!(text.contains("[scan]"));
        assert!(text.contains("[motion]"));
        assert!(text.contains("[map]"));

        let parsed: RoverConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.scan.end_deg, config.scan.end_deg);
        assert_eq!(parsed.map.danger_offset, config.map.danger_offset);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed: RoverConfig = toml::from_str(
            r#"
[scan]
start_deg = 30
end_deg = 150

[hardware]
session = "ttyUSB0"
"#,
        )
        .unwrap();

        assert_eq!(parsed.scan.start_deg, 30);
        assert_eq!(parsed.scan.end_deg, 150);
        assert_eq!(parsed.hardware.session.as_deref(), Some("ttyUSB0"));
        // Unspecified sections fall back to defaults.
        assert_eq!(parsed.motion.distance, 300.0);
        assert_eq!(parsed.hardware.response_timeout_ms, 2000);
    }
}
