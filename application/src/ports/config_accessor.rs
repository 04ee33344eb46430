//! Runtime configuration access port.
//!
//! Provides a uniform interface for reading and writing preference keys.
//! Used by the `config get|set|list` commands.

use recall_domain::config::ValueKind;

/// A dynamically-typed configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    String(String),
    Float(f64),
    Integer(u64),
    Boolean(bool),
}

impl ConfigValue {
    /// Parse command-line text into a value of the given kind.
    pub fn parse_as(kind: ValueKind, text: &str) -> Result<Self, String> {
        let text = text.trim();
        match kind {
            ValueKind::Boolean => match text.to_ascii_lowercase().as_str() {
                "true" | "on" | "yes" | "1" => Ok(ConfigValue::Boolean(true)),
                "false" | "off" | "no" | "0" => Ok(ConfigValue::Boolean(false)),
                _ => Err(format!("'{}' is not a boolean", text)),
            },
            ValueKind::Float => text
                .parse::<f64>()
                .map(ConfigValue::Float)
                .map_err(|_| format!("'{}' is not a number", text)),
            ValueKind::Integer => text
                .parse::<u64>()
                .map(ConfigValue::Integer)
                .map_err(|_| format!("'{}' is not a non-negative integer", text)),
            ValueKind::Text => Ok(ConfigValue::String(text.to_string())),
        }
    }
}

impl std::fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigValue::String(s) => write!(f, "{}", s),
            ConfigValue::Float(x) => write!(f, "{}", x),
            ConfigValue::Integer(n) => write!(f, "{}", n),
            ConfigValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

/// Errors from config access operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigAccessError {
    /// The key is not recognized.
    UnknownKey { key: String },
    /// The provided value is invalid for this key.
    InvalidValue { key: String, message: String },
}

impl std::fmt::Display for ConfigAccessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigAccessError::UnknownKey { key } => write!(f, "unknown config key: {}", key),
            ConfigAccessError::InvalidValue { key, message } => {
                write!(f, "invalid value for '{}': {}", key, message)
            }
        }
    }
}

impl std::error::Error for ConfigAccessError {}

/// Port for runtime config access.
pub trait ConfigAccessorPort: Send + Sync {
    /// Get the current value of a config key.
    fn config_get(&self, key: &str) -> Result<ConfigValue, ConfigAccessError>;

    /// Set a config key to a new value.
    ///
    /// Errors if the key is unknown or the value is invalid; the previous
    /// value is kept in that case.
    fn config_set(&mut self, key: &str, value: ConfigValue) -> Result<(), ConfigAccessError>;

    /// List all known config key names.
    fn config_keys(&self) -> Vec<String>;
}
