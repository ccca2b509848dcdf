//! Salon settings, loaded from TOML.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::clock::ClockTime;
use crate::error::{Result, SalonError};
use crate::slots::{WorkingHours, DEFAULT_PROBE_STEP_MINUTES};

pub const DEFAULT_BREAK_MINUTES: u32 = 10;

/// Salon-wide settings. Every field has a default, so an empty table is valid.
///
/// ```toml
/// name = "Elite Salon"
/// work_start = "09:00"
/// work_end = "21:00"
/// probe_step_minutes = 15
/// default_break_minutes = 10
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalonConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_work_start")]
    pub work_start: ClockTime,
    #[serde(default = "default_work_end")]
    pub work_end: ClockTime,
    #[serde(default = "default_probe_step")]
    pub probe_step_minutes: u32,
    /// Break used for masters added without an explicit one.
    #[serde(default = "default_break")]
    pub default_break_minutes: u32,
}

impl Default for SalonConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            work_start: default_work_start(),
            work_end: default_work_end(),
            probe_step_minutes: default_probe_step(),
            default_break_minutes: default_break(),
        }
    }
}

impl SalonConfig {
    /// Parse and validate settings from a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: SalonConfig =
            toml::from_str(s).map_err(|e| SalonError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| SalonError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        self.working_hours().map(|_| ())
    }

    pub fn working_hours(&self) -> Result<WorkingHours> {
        WorkingHours::new(self.work_start, self.work_end, self.probe_step_minutes)
    }
}

fn default_name() -> String {
    "Salon".to_string()
}

fn default_work_start() -> ClockTime {
    WorkingHours::default().start
}

fn default_work_end() -> ClockTime {
    WorkingHours::default().end
}

fn default_probe_step() -> u32 {
    DEFAULT_PROBE_STEP_MINUTES
}

fn default_break() -> u32 {
    DEFAULT_BREAK_MINUTES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = SalonConfig::from_toml_str("").unwrap();
        assert_eq!(config, SalonConfig::default());
        assert_eq!(config.work_start.to_string(), "09:00");
        assert_eq!(config.work_end.to_string(), "21:00");
        assert_eq!(config.probe_step_minutes, 15);
        assert_eq!(config.default_break_minutes, 10);
    }

    #[test]
    fn overrides_are_applied() {
        let config = SalonConfig::from_toml_str(
            r#"
            name = "Elite"
            work_start = "10:00"
            work_end = "18:30"
            probe_step_minutes = 5
            default_break_minutes = 0
            "#,
        )
        .unwrap();
        assert_eq!(config.name, "Elite");
        assert_eq!(config.work_end, ClockTime::from_hm(18, 30).unwrap());
        assert_eq!(config.probe_step_minutes, 5);
        assert_eq!(config.default_break_minutes, 0);
    }

    #[test]
    fn inverted_working_day_is_rejected() {
        let err = SalonConfig::from_toml_str("work_start = \"21:00\"\nwork_end = \"09:00\"")
            .unwrap_err();
        assert!(matches!(err, SalonError::Config(_)));
    }

    #[test]
    fn malformed_time_is_rejected() {
        let err = SalonConfig::from_toml_str("work_start = \"9am\"").unwrap_err();
        assert!(matches!(err, SalonError::Config(_)));
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let err = SalonConfig::load("/nonexistent/settings.toml").unwrap_err();
        assert!(matches!(err, SalonError::Config(ref msg) if msg.contains("settings.toml")));
    }

    #[test]
    fn zero_probe_step_is_rejected() {
        assert!(SalonConfig::from_toml_str("probe_step_minutes = 0").is_err());
    }
}
