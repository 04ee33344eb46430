//! Console output formatter for pass results

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use recall_application::{ConfigValue, ImportSummary, LearnOutput, RunPassOutput};
use recall_domain::{DetailEntry, DetailKind, OutputFormat, QuestionBlock, truncate};
use serde_json::json;

/// Longest stem shown on one detail line
const STEM_WIDTH: usize = 40;

/// Formats pass results for console display
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Render in the requested format
    pub fn render(&self, output: &RunPassOutput, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => self.format(output),
            OutputFormat::Summary => self.format_summary(output),
            OutputFormat::Json => self.format_json(output),
        }
    }

    /// One detail line: `[kind] stem: message`
    pub fn detail_line(entry: &DetailEntry) -> String {
        let tag = match entry.kind {
            DetailKind::Hit => "hit".green().bold(),
            DetailKind::Miss => "miss".yellow().bold(),
            DetailKind::Inconsistent => "diff".red().bold(),
            DetailKind::ApplicationFailure => "fail".red().bold(),
        };
        format!(
            "[{}] {}: {}",
            tag,
            truncate(&entry.stem, STEM_WIDTH),
            entry.message.dimmed()
        )
    }

    fn counters(output: &RunPassOutput) -> String {
        let report = &output.report;
        let mut line = format!(
            "{} {}  {} {}  {} {}",
            "Hit:".green().bold(),
            report.hit,
            "Miss:".yellow().bold(),
            report.miss,
            "Inconsistent:".red().bold(),
            report.inconsistent
        );
        let failures = report.application_failures();
        if failures > 0 {
            line.push_str(&format!(
                "  {} {}",
                "Not applied:".red().bold(),
                failures
            ));
        }
        line
    }

    fn banks(output: &RunPassOutput) -> String {
        let banks = &output.banks;
        format!(
            "{} local {}, remote {}, harvested {} -> {} merged",
            "Banks:".cyan().bold(),
            banks.local,
            banks
                .remote
                .map(|n| n.to_string())
                .unwrap_or_else(|| "-".to_string()),
            banks.harvested,
            banks.merged
        )
    }

    fn header(title: &str) -> String {
        format!("{}\n", format!("=== {} ===", title).cyan().bold())
    }

    /// Normalized stems of discovered blocks, one per line
    pub fn format_stems(blocks: &[QuestionBlock]) -> String {
        let mut output = String::new();
        for block in blocks {
            let stem = if block.is_processable() {
                block.normalized_stem.as_str().normal()
            } else {
                "(empty)".dimmed()
            };
            output.push_str(&format!(
                "{:>3} {:<6} {}\n",
                block.index,
                block.declared_type.as_str(),
                stem
            ));
        }
        output
    }

    pub fn format_learned(output: &LearnOutput) -> String {
        format!(
            "{} {} answers ({} replaced, {} skipped)",
            "Learned".green().bold(),
            output.learned,
            output.replaced,
            output.skipped
        )
    }

    pub fn format_import(summary: &ImportSummary) -> String {
        let mut output = format!("{} {} entries", "Imported".green().bold(), summary.stored);
        if !summary.rejected.is_empty() {
            output.push_str(&format!(
                "\n{} {} entries could not be decoded:",
                "Skipped".yellow().bold(),
                summary.rejected.len()
            ));
            for key in &summary.rejected {
                output.push_str(&format!("\n  * {}", key));
            }
        }
        output
    }

    /// `key = value` lines for the config surface
    pub fn format_config(entries: &[(String, ConfigValue)]) -> String {
        let width = entries.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
        entries
            .iter()
            .map(|(key, value)| {
                let padded = format!("{:<width$}", key, width = width);
                format!("{} = {}", padded.bold(), value)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, output: &RunPassOutput) -> String {
        let mut text = Self::header("Pass Results");
        text.push_str(&Self::banks(output));
        text.push_str("\n\n");

        for entry in &output.report.details {
            text.push_str(&Self::detail_line(entry));
            text.push('\n');
        }
        if !output.report.details.is_empty() {
            text.push('\n');
        }

        text.push_str(&Self::counters(output));
        text.push('\n');
        text
    }

    fn format_json(&self, output: &RunPassOutput) -> String {
        let report = &output.report;
        let value = json!({
            "hit": report.hit,
            "miss": report.miss,
            "inconsistent": report.inconsistent,
            "application_failures": report.application_failures(),
            "discovered": output.discovered,
            "banks": {
                "local": output.banks.local,
                "remote": output.banks.remote,
                "harvested": output.banks.harvested,
                "merged": output.banks.merged,
            },
            "details": report.details,
        });
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_summary(&self, output: &RunPassOutput) -> String {
        format!("{}\n", Self::counters(output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recall_application::BankSizes;
    use recall_domain::PassReport;

    fn output() -> RunPassOutput {
        let mut report = PassReport::new();
        report.hit = 2;
        report.miss = 1;
        report.details.push(DetailEntry {
            kind: DetailKind::Miss,
            stem: "一道没有收录的题目".to_string(),
            message: "not found in any answer bank (single)".to_string(),
        });
        RunPassOutput {
            report,
            banks: BankSizes {
                local: 3,
                remote: None,
                harvested: 1,
                merged: 4,
            },
            discovered: 3,
        }
    }

    #[test]
    fn test_json_shape() {
        let json = ConsoleFormatter.format_json(&output());
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["hit"], 2);
        assert_eq!(value["miss"], 1);
        assert_eq!(value["banks"]["remote"], serde_json::Value::Null);
        assert_eq!(value["details"][0]["kind"], "miss");
    }

    #[test]
    fn test_full_lists_details() {
        colored::control::set_override(false);
        let text = ConsoleFormatter.render(&output(), OutputFormat::Full);
        assert!(text.contains("[miss] 一道没有收录的题目: not found"));
        assert!(text.contains("Hit: 2"));
        assert!(!text.contains("Not applied"));
    }

    #[test]
    fn test_summary_is_one_line() {
        colored::control::set_override(false);
        let text = ConsoleFormatter.render(&output(), OutputFormat::Summary);
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn test_format_import_lists_rejects() {
        colored::control::set_override(false);
        let text = ConsoleFormatter::format_import(&ImportSummary {
            stored: 2,
            rejected: vec!["坏题".to_string()],
        });
        assert!(text.starts_with("Imported 2 entries"));
        assert!(text.contains("* 坏题"));
    }
}
