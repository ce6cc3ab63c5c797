//! Runtime settings read from the environment (and `.env` via `dotenv`).

use crate::error::PlannerError;
use chrono::NaiveDate;
use std::env;
use std::path::PathBuf;

const DATE_FORMAT: &str = "%Y-%m-%d";
const VALID_LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Upper bound for `num_days` on incoming requests
    pub max_days: u32,
    /// Date of Day 1 for calendar export, today when unset
    pub start_date: Option<NaiveDate>,
    /// Where to write the `.ics` file, no export when unset
    pub calendar_path: Option<PathBuf>,
    pub telemetry: TelemetryConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryConfig {
    pub service_name: String,
    pub log_level: String,
    /// OTLP collector; stdout exporters are used when unset
    pub otlp_endpoint: Option<String>,
}

fn default_max_days() -> u32 {
    30
}

fn default_service_name() -> String {
    "trip-planner".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_days: default_max_days(),
            start_date: None,
            calendar_path: None,
            telemetry: TelemetryConfig {
                service_name: default_service_name(),
                log_level: default_log_level(),
                otlp_endpoint: None,
            },
        }
    }
}

impl PlannerConfig {
    pub fn from_env() -> Result<Self, PlannerError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PlannerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let max_days = match get("PLANNER_MAX_DAYS") {
            Some(raw) => raw.trim().parse::<u32>().map_err(|e| {
                PlannerError::Config(format!("PLANNER_MAX_DAYS '{raw}' is not a number: {e}"))
            })?,
            None => default_max_days(),
        };

        let start_date = get("PLANNER_START_DATE")
            .map(|raw| {
                NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).map_err(|e| {
                    PlannerError::Config(format!(
                        "PLANNER_START_DATE '{raw}' must be YYYY-MM-DD: {e}"
                    ))
                })
            })
            .transpose()?;

        let config = Self {
            max_days,
            start_date,
            calendar_path: get("PLANNER_CALENDAR_PATH").map(PathBuf::from),
            telemetry: TelemetryConfig {
                service_name: get("OTEL_SERVICE_NAME").unwrap_or_else(default_service_name),
                log_level: get("PLANNER_LOG_LEVEL")
                    .map(|level| level.trim().to_lowercase())
                    .unwrap_or_else(default_log_level),
                otlp_endpoint: get("OTEL_EXPORTER_OTLP_ENDPOINT"),
            },
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), PlannerError> {
        if self.max_days == 0 {
            return Err(PlannerError::Config(
                "PLANNER_MAX_DAYS must be at least 1".to_string(),
            ));
        }
        if !VALID_LOG_LEVELS.contains(&self.telemetry.log_level.as_str()) {
            return Err(PlannerError::Config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.telemetry.log_level,
                VALID_LOG_LEVELS.join(", ")
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = PlannerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, PlannerConfig::default());
        assert_eq!(config.max_days, 30);
        assert_eq!(config.telemetry.service_name, "trip-planner");
    }

    #[test]
    fn test_values_are_read() {
        let config = PlannerConfig::from_lookup(lookup(&[
            ("PLANNER_MAX_DAYS", "14"),
            ("PLANNER_START_DATE", "2024-06-01"),
            ("PLANNER_CALENDAR_PATH", "/tmp/trip.ics"),
            ("PLANNER_LOG_LEVEL", "DEBUG"),
            ("OTEL_SERVICE_NAME", "planner-test"),
        ]))
        .unwrap();
        assert_eq!(config.max_days, 14);
        assert_eq!(config.start_date, NaiveDate::from_ymd_opt(2024, 6, 1));
        assert_eq!(config.calendar_path, Some(PathBuf::from("/tmp/trip.ics")));
        assert_eq!(config.telemetry.log_level, "debug");
        assert_eq!(config.telemetry.service_name, "planner-test");
    }

    #[test]
    fn test_empty_values_count_as_unset() {
        let config = PlannerConfig::from_lookup(lookup(&[("PLANNER_CALENDAR_PATH", "  ")])).unwrap();
        assert!(config.calendar_path.is_none());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = PlannerConfig::from_lookup(lookup(&[("PLANNER_MAX_DAYS", "many")])).unwrap_err();
        assert!(err.to_string().contains("PLANNER_MAX_DAYS"));

        let err = PlannerConfig::from_lookup(lookup(&[("PLANNER_MAX_DAYS", "0")])).unwrap_err();
        assert!(err.to_string().contains("at least 1"));

        let err =
            PlannerConfig::from_lookup(lookup(&[("PLANNER_START_DATE", "01/06/2024")])).unwrap_err();
        assert!(err.to_string().contains("YYYY-MM-DD"));

        let err = PlannerConfig::from_lookup(lookup(&[("PLANNER_LOG_LEVEL", "loud")])).unwrap_err();
        assert!(err.to_string().contains("Invalid log level"));
    }
}
