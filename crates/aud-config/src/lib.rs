//! # aud-config
//!
//! Layered configuration loading for Auditrail using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`AUDITRAIL_*` prefix, `__` as separator)
//! 2. Project-level `.auditrail/config.toml`
//! 3. User-level `~/.config/auditrail/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `AUDITRAIL_REPORT__UNSECTIONED_LABEL` -> `report.unsectioned_label`,
//! `AUDITRAIL_SCHEDULE__MESSAGES__REQUIRED` -> `schedule.messages.required`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use aud_config::AuditConfig;
//!
//! let config = AuditConfig::load_with_dotenv().expect("config");
//! println!("unsectioned label: {}", config.report.unsectioned_label);
//! ```

mod error;
mod general;
mod report;
mod schedule;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use report::ReportConfig;
pub use schedule::{ScheduleConfig, ScheduleMessages};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuditConfig {
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl AuditConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`load_with_dotenv`](Self::load_with_dotenv)
    /// if you need `.env` file loading.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment())
    }

    /// Load configuration with `.env` file support.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate a config from an arbitrary figment.
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can add providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".auditrail/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("AUDITRAIL_").split("__"))
    }

    /// Reject values the engine cannot render.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let labels = [
            ("report.unsectioned_label", &self.report.unsectioned_label),
            (
                "report.unassigned_department_label",
                &self.report.unassigned_department_label,
            ),
        ];
        for (field, value) in labels {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: "must not be blank".to_string(),
                });
            }
        }

        let out_of_order = &self.schedule.messages.out_of_order;
        if !out_of_order.contains("{field}") {
            return Err(ConfigError::InvalidValue {
                field: "schedule.messages.out_of_order".to_string(),
                reason: "must contain the {field} placeholder".to_string(),
            });
        }

        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("auditrail").join("config.toml"))
    }
}
