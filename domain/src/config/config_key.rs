//! Preference key registry for runtime config access.
//!
//! Defines metadata for every user preference: name, description and the
//! kind of value it takes. Used by the configuration surface
//! (`quiz-recall config get|set|list`).

/// Kind of value a preference key accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Boolean,
    /// Floating point, with bounds enforced by the setter
    Float,
    /// Non-negative integer
    Integer,
    /// Free-form text; an empty string clears the value
    Text,
}

/// Metadata for a single preference key.
#[derive(Debug, Clone)]
pub struct ConfigKeyInfo {
    /// Key name as used in `[preferences]` and on the command line
    pub key: &'static str,
    pub description: &'static str,
    pub kind: ValueKind,
}

/// All known preference keys.
pub fn known_keys() -> &'static [ConfigKeyInfo] {
    &KNOWN_KEYS
}

/// Look up a preference key by name.
pub fn lookup_key(key: &str) -> Option<&'static ConfigKeyInfo> {
    KNOWN_KEYS.iter().find(|k| k.key == key)
}

static KNOWN_KEYS: [ConfigKeyInfo; 7] = [
    ConfigKeyInfo {
        key: "auto_apply",
        description: "Apply resolved answers to the page controls",
        kind: ValueKind::Boolean,
    },
    ConfigKeyInfo {
        key: "fuzzy_threshold",
        description: "Minimum Jaccard score for a fuzzy match, strictly between 0 and 1",
        kind: ValueKind::Float,
    },
    ConfigKeyInfo {
        key: "bank_url",
        description: "URL of a shared JSON answer bank (empty to disable)",
        kind: ValueKind::Text,
    },
    ConfigKeyInfo {
        key: "harvest_precedence",
        description: "Harvested answers override local and remote ones",
        kind: ValueKind::Boolean,
    },
    ConfigKeyInfo {
        key: "inter_click_delay_ms",
        description: "Settling interval between multi-select toggles",
        kind: ValueKind::Integer,
    },
    ConfigKeyInfo {
        key: "remote_timeout_secs",
        description: "Timeout for fetching the remote answer bank",
        kind: ValueKind::Integer,
    },
    ConfigKeyInfo {
        key: "readiness_delay_ms",
        description: "Wait before scanning the page",
        kind: ValueKind::Integer,
    },
];
