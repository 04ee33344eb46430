//! Presentation-level configuration
//!
//! Settles how reports are shown from the file config and the command line.

use recall_domain::OutputFormat;

/// Output configuration for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
    /// Show a progress bar while a pass runs
    pub show_progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Full,
            color: true,
            show_progress: true,
        }
    }
}

impl OutputConfig {
    /// A CLI format beats the file format; `--quiet` disables progress.
    pub fn resolve(
        file_format: Option<OutputFormat>,
        cli_format: Option<OutputFormat>,
        color: bool,
        show_progress: bool,
        quiet: bool,
    ) -> Self {
        let format = cli_format.or(file_format).unwrap_or_default();
        Self {
            format,
            color,
            show_progress: show_progress && !quiet && format != OutputFormat::Json,
        }
    }

    /// Apply the color setting process-wide
    pub fn apply_color(&self) {
        if !self.color {
            colored::control::set_override(false);
        }
    }
}
