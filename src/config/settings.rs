//! User settings for fintrack
//!
//! Manages display preferences and the knobs used by the dashboard and
//! insight calculations.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::paths::FintrackPaths;
use crate::error::FintrackError;

/// User settings for fintrack
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when formatting amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Month-over-month change (in percent) that triggers a spending insight
    #[serde(default = "default_insight_threshold")]
    pub insight_threshold_percent: f64,

    /// Number of months shown in dashboard charts
    #[serde(default = "default_chart_months")]
    pub chart_months: usize,

    /// Number of selectable months in budget views (current month and earlier)
    #[serde(default = "default_month_window")]
    pub month_window: usize,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_insight_threshold() -> f64 {
    10.0
}

fn default_chart_months() -> usize {
    6
}

fn default_month_window() -> usize {
    7
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            insight_threshold_percent: default_insight_threshold(),
            chart_months: default_chart_months(),
            month_window: default_month_window(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &FintrackPaths) -> Result<Self, FintrackError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                FintrackError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                FintrackError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Reject values that would fail later at display time
    pub fn validate(&self) -> Result<(), FintrackError> {
        let bad_format = self.date_format.is_empty()
            || StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error));
        if bad_format {
            return Err(FintrackError::Config(format!(
                "Invalid date_format '{}' (expected a strftime pattern such as %Y-%m-%d)",
                self.date_format
            )));
        }
        Ok(())
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FintrackPaths) -> Result<(), FintrackError> {
        self.validate()?;
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            FintrackError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| FintrackError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.insight_threshold_percent, 10.0);
        assert_eq!(settings.chart_months, 6);
        assert_eq!(settings.month_window, 7);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.currency_symbol = "€".to_string();
        settings.chart_months = 12;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "€");
        assert_eq!(loaded.chart_months, 12);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"currency_symbol": "£"}"#).unwrap();
        assert_eq!(settings.currency_symbol, "£");
        assert_eq!(settings.month_window, 7);
        assert_eq!(settings.schema_version, 1);
    }

    #[test]
    fn test_invalid_date_format_rejected_on_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        std::fs::write(paths.settings_file(), r#"{"date_format": "%Q"}"#).unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, FintrackError::Config(_)));
        assert!(err.to_string().contains("%Q"));
    }

    #[test]
    fn test_validate_date_formats() {
        let mut settings = Settings::default();
        assert!(settings.validate().is_ok());

        settings.date_format = "%d/%m/%Y".to_string();
        assert!(settings.validate().is_ok());

        settings.date_format = "%Y-%".to_string();
        assert!(settings.validate().is_err());

        settings.date_format = String::new();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_load_does_not_write() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FintrackPaths::with_base_dir(temp_dir.path().to_path_buf());

        let _ = Settings::load_or_create(&paths).unwrap();
        assert!(!paths.settings_file().exists());
    }
}
