//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain and application types
//! where appropriate.

mod output;
mod storage;

pub use output::{FileOutputConfig, FileOutputFormat};
pub use storage::FileStorageConfig;

use recall_application::Preferences;
use recall_domain::validate_threshold;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigValidationError {
    #[error("preferences.fuzzy_threshold must be strictly between 0 and 1, got {0}")]
    InvalidThreshold(f64),

    #[error("preferences.remote_timeout_secs cannot be 0")]
    InvalidTimeout,

    #[error("preferences.bank_url must be an http(s) URL, got '{0}'")]
    InvalidBankUrl(String),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Resolution and reconciliation preferences
    pub preferences: Preferences,
    /// Where the local bank lives
    pub storage: FileStorageConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the configuration, returning every problem found.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();
        let prefs = &self.preferences;

        if validate_threshold(prefs.fuzzy_threshold).is_err() {
            issues.push(ConfigValidationError::InvalidThreshold(
                prefs.fuzzy_threshold,
            ));
        }
        if prefs.remote_timeout_secs == 0 {
            issues.push(ConfigValidationError::InvalidTimeout);
        }
        if let Some(url) = prefs.bank_url()
            && !(url.starts_with("http://") || url.starts_with("https://"))
        {
            issues.push(ConfigValidationError::InvalidBankUrl(url.to_string()));
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recall_domain::OutputFormat;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[preferences]
auto_apply = false
fuzzy_threshold = 0.75
bank_url = "https://bank.example/answers.json"
harvest_precedence = false

[storage]
bank_path = "/tmp/bank.json"

[output]
format = "summary"
color = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(!config.preferences.auto_apply);
        assert_eq!(config.preferences.fuzzy_threshold, 0.75);
        assert_eq!(
            config.preferences.bank_url(),
            Some("https://bank.example/answers.json")
        );
        assert!(!config.preferences.harvest_precedence);
        assert_eq!(
            config.storage.bank_path.as_deref(),
            Some(std::path::Path::new("/tmp/bank.json"))
        );
        assert_eq!(config.output.format, Some(OutputFormat::Summary));
        assert!(!config.output.color);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[preferences]
inter_click_delay_ms = 120
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.preferences.inter_click_delay_ms, 120);
        // Defaults should apply
        assert!(config.preferences.auto_apply);
        assert_eq!(config.preferences.fuzzy_threshold, 0.9);
        assert!(config.storage.bank_path.is_none());
        assert!(config.output.color);
    }

    #[test]
    fn test_validate_reports_every_issue() {
        let toml_str = r#"
[preferences]
fuzzy_threshold = 1.0
remote_timeout_secs = 0
bank_url = "ftp://bank"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.validate(),
            vec![
                ConfigValidationError::InvalidThreshold(1.0),
                ConfigValidationError::InvalidTimeout,
                ConfigValidationError::InvalidBankUrl("ftp://bank".to_string()),
            ]
        );
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(FileConfig::default().validate().is_empty());
    }
}
