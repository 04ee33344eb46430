//! Report format value object

use serde::{Deserialize, Serialize};

/// How a pass report should be rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Counters plus one line per detail entry (default)
    #[default]
    Full,
    /// Counters only
    Summary,
    /// JSON output
    Json,
}
