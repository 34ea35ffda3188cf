//! Configuration management for Billwatch
//!
//! This module handles loading, validation, and management of the application
//! configuration from YAML files.

use crate::bill::BillField;
use crate::error::{BillwatchError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_sensors() -> Vec<String> {
    BillField::ALL.iter().map(|f| f.key().to_string()).collect()
}

fn default_poll_interval() -> u64 {
    30
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Consumer account identity at the utility provider
    pub account: AccountConfig,

    /// Billing portal endpoint configuration
    #[serde(default)]
    pub portal: PortalConfig,

    /// Requested sensor field names (defaults to all six)
    #[serde(default = "default_sensors")]
    pub sensors: Vec<String>,

    /// Minimum gap between portal fetches, in minutes
    #[serde(default = "default_poll_interval")]
    pub poll_interval_minutes: u64,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Consumer account identity; immutable after startup
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AccountConfig {
    /// Consumer number as printed on the bill
    pub consumer_number: String,

    /// Business unit number of the billing office
    pub business_unit: String,

    /// Consumer type code (residential, commercial, ...)
    pub consumer_type: String,
}

/// Billing portal endpoint parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalConfig {
    /// Base URL of the portal, including trailing slash
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (DEBUG, INFO, WARNING, ERROR, CRITICAL)
    pub level: String,

    /// Optional path to a log file; console-only when unset
    pub file: Option<String>,

    /// Whether to log to console
    pub console_output: bool,

    /// Whether to use JSON format
    pub json_format: bool,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            base_url: "https://wss.mahadiscom.in/wss/".to_string(),
            timeout_seconds: 10,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "INFO".to_string(),
            file: None,
            console_output: true,
            json_format: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            account: AccountConfig::default(),
            portal: PortalConfig::default(),
            sensors: default_sensors(),
            poll_interval_minutes: default_poll_interval(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from the default locations
    pub fn load() -> Result<Self> {
        let default_paths = [
            "billwatch_config.yaml",
            "/data/billwatch_config.yaml",
            "/etc/billwatch/config.yaml",
        ];

        for path in &default_paths {
            if Path::new(path).exists() {
                return Self::from_file(path);
            }
        }

        Err(BillwatchError::config(
            "no configuration file found in default locations",
        ))
    }

    /// Save configuration to a YAML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate the configuration; fatal at startup, before any network call
    pub fn validate(&self) -> Result<()> {
        if self.account.consumer_number.trim().is_empty() {
            return Err(BillwatchError::validation(
                "account.consumer_number",
                "Consumer number cannot be empty",
            ));
        }

        if self.account.business_unit.trim().is_empty() {
            return Err(BillwatchError::validation(
                "account.business_unit",
                "Business unit number cannot be empty",
            ));
        }

        if self.account.consumer_type.trim().is_empty() {
            return Err(BillwatchError::validation(
                "account.consumer_type",
                "Consumer type cannot be empty",
            ));
        }

        if self.portal.base_url.trim().is_empty() {
            return Err(BillwatchError::validation(
                "portal.base_url",
                "Base URL cannot be empty",
            ));
        }

        if self.portal.timeout_seconds == 0 {
            return Err(BillwatchError::validation(
                "portal.timeout_seconds",
                "Must be greater than 0",
            ));
        }

        if self.poll_interval_minutes == 0 {
            return Err(BillwatchError::validation(
                "poll_interval_minutes",
                "Must be greater than 0",
            ));
        }

        if self.sensors.is_empty() {
            return Err(BillwatchError::validation(
                "sensors",
                "At least one sensor field must be requested",
            ));
        }

        for name in &self.sensors {
            if BillField::from_key(name).is_none() {
                return Err(BillwatchError::Validation {
                    field: "sensors".to_string(),
                    message: format!("unrecognized field name: {name}"),
                });
            }
        }

        Ok(())
    }

    /// The requested fields, resolved and in configuration order.
    /// Only meaningful after `validate()` has passed.
    pub fn requested_fields(&self) -> Vec<BillField> {
        self.sensors
            .iter()
            .filter_map(|name| BillField::from_key(name))
            .collect()
    }
}
