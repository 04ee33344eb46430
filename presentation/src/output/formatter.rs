//! Output formatter trait

use recall_application::RunPassOutput;

/// Trait for formatting pass results
pub trait OutputFormatter {
    /// Counters plus one line per detail entry
    fn format(&self, output: &RunPassOutput) -> String;

    /// Format as JSON
    fn format_json(&self, output: &RunPassOutput) -> String;

    /// Counters only (concise output)
    fn format_summary(&self, output: &RunPassOutput) -> String;
}
