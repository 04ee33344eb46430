//! User preferences: resolution and reconciliation control.
//!
//! [`Preferences`] is read once at the start of a pass and treated as
//! immutable until the pass completes. The configuration surface edits it
//! between passes through [`ConfigAccessorPort`].

use crate::ports::config_accessor::{ConfigAccessError, ConfigAccessorPort, ConfigValue};
use recall_domain::config::{ValueKind, known_keys, lookup_key};
use recall_domain::{BankPrecedence, validate_threshold};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// User preferences for resolution passes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Apply resolved answers to the page controls
    pub auto_apply: bool,
    /// Minimum Jaccard score accepted by the fuzzy tier, in (0, 1)
    pub fuzzy_threshold: f64,
    /// URL of the shared JSON answer bank
    pub bank_url: Option<String>,
    /// Harvested answers override local/remote ones on collision
    pub harvest_precedence: bool,
    /// Settling interval between sequential multi-select toggles
    pub inter_click_delay_ms: u64,
    /// Timeout for the remote bank fetch
    pub remote_timeout_secs: u64,
    /// Wait before scanning the page
    pub readiness_delay_ms: u64,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            auto_apply: true,
            fuzzy_threshold: 0.9,
            bank_url: None,
            harvest_precedence: true,
            inter_click_delay_ms: 50,
            remote_timeout_secs: 15,
            readiness_delay_ms: 300,
        }
    }
}

impl Preferences {
    // ==================== Builder Methods ====================

    pub fn with_auto_apply(mut self, enabled: bool) -> Self {
        self.auto_apply = enabled;
        self
    }

    pub fn with_fuzzy_threshold(mut self, threshold: f64) -> Self {
        self.fuzzy_threshold = threshold;
        self
    }

    pub fn with_bank_url(mut self, url: impl Into<String>) -> Self {
        self.bank_url = Some(url.into());
        self
    }

    pub fn with_harvest_precedence(mut self, enabled: bool) -> Self {
        self.harvest_precedence = enabled;
        self
    }

    pub fn with_inter_click_delay_ms(mut self, ms: u64) -> Self {
        self.inter_click_delay_ms = ms;
        self
    }

    pub fn with_readiness_delay_ms(mut self, ms: u64) -> Self {
        self.readiness_delay_ms = ms;
        self
    }

    // ==================== Derived Values ====================

    pub fn settle_interval(&self) -> Duration {
        Duration::from_millis(self.inter_click_delay_ms)
    }

    pub fn remote_timeout(&self) -> Duration {
        Duration::from_secs(self.remote_timeout_secs)
    }

    pub fn readiness_delay(&self) -> Duration {
        Duration::from_millis(self.readiness_delay_ms)
    }

    pub fn precedence(&self) -> BankPrecedence {
        BankPrecedence::from_flag(self.harvest_precedence)
    }

    /// Bank URL, treating an empty or blank string as unset
    pub fn bank_url(&self) -> Option<&str> {
        self.bank_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

impl ConfigAccessorPort for Preferences {
    fn config_get(&self, key: &str) -> Result<ConfigValue, ConfigAccessError> {
        let value = match key {
            "auto_apply" => ConfigValue::Boolean(self.auto_apply),
            "fuzzy_threshold" => ConfigValue::Float(self.fuzzy_threshold),
            "bank_url" => ConfigValue::String(self.bank_url().unwrap_or_default().to_string()),
            "harvest_precedence" => ConfigValue::Boolean(self.harvest_precedence),
            "inter_click_delay_ms" => ConfigValue::Integer(self.inter_click_delay_ms),
            "remote_timeout_secs" => ConfigValue::Integer(self.remote_timeout_secs),
            "readiness_delay_ms" => ConfigValue::Integer(self.readiness_delay_ms),
            _ => {
                return Err(ConfigAccessError::UnknownKey {
                    key: key.to_string(),
                });
            }
        };
        Ok(value)
    }

    fn config_set(&mut self, key: &str, value: ConfigValue) -> Result<(), ConfigAccessError> {
        let info = lookup_key(key).ok_or_else(|| ConfigAccessError::UnknownKey {
            key: key.to_string(),
        })?;
        let invalid = |message: String| ConfigAccessError::InvalidValue {
            key: key.to_string(),
            message,
        };

        match (info.kind, value) {
            (ValueKind::Boolean, ConfigValue::Boolean(b)) => match key {
                "auto_apply" => self.auto_apply = b,
                _ => self.harvest_precedence = b,
            },
            (ValueKind::Float, ConfigValue::Float(f)) => {
                self.fuzzy_threshold = validate_threshold(f).map_err(|e| invalid(e.to_string()))?;
            }
            (ValueKind::Integer, ConfigValue::Integer(n)) => match key {
                "inter_click_delay_ms" => self.inter_click_delay_ms = n,
                "remote_timeout_secs" => self.remote_timeout_secs = n,
                _ => self.readiness_delay_ms = n,
            },
            (ValueKind::Text, ConfigValue::String(s)) => {
                let trimmed = s.trim();
                self.bank_url = (!trimmed.is_empty()).then(|| trimmed.to_string());
            }
            (kind, other) => {
                return Err(invalid(format!("expected {:?}, got {}", kind, other)));
            }
        }
        Ok(())
    }

    fn config_keys(&self) -> Vec<String> {
        known_keys().iter().map(|k| k.key.to_string()).collect()
    }
}
