//! Progress reporting for resolution passes

use crate::output::console::ConsoleFormatter;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use recall_application::PassNotifier;
use recall_domain::{DetailEntry, DetailKind, PassReport, truncate};
use std::sync::Mutex;

/// Reports progress during a pass with a progress bar
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn pass_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn kind_mark(kind: DetailKind) -> colored::ColoredString {
        match kind {
            DetailKind::Hit => "v".green(),
            DetailKind::Miss => "?".yellow(),
            DetailKind::Inconsistent | DetailKind::ApplicationFailure => "x".red(),
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl PassNotifier for ProgressReporter {
    fn on_pass_start(&self, total_questions: usize) {
        let pb = ProgressBar::new(total_questions as u64);
        pb.set_style(Self::pass_style());
        pb.set_prefix("Resolving");
        pb.set_message("Starting...");

        if let Ok(mut slot) = self.bar.lock() {
            *slot = Some(pb);
        }
    }

    fn on_detail(&self, entry: &DetailEntry) {
        if let Ok(slot) = self.bar.lock()
            && let Some(pb) = slot.as_ref()
        {
            pb.set_message(format!(
                "{} {}",
                Self::kind_mark(entry.kind),
                truncate(&entry.stem, 24)
            ));
            pb.inc(1);
        }
    }

    fn on_pass_complete(&self, report: &PassReport) {
        if let Ok(mut slot) = self.bar.lock()
            && let Some(pb) = slot.take()
        {
            pb.finish_with_message(format!(
                "{} ({} hit, {} miss, {} inconsistent)",
                "done".green(),
                report.hit,
                report.miss,
                report.inconsistent
            ));
        }
    }

    fn on_learned(&self, stem: &str, answer: &str) {
        if let Ok(slot) = self.bar.lock()
            && let Some(pb) = slot.as_ref()
        {
            pb.println(format!("  {} {} -> {}", "+".green(), truncate(stem, 40), answer));
            return;
        }
        eprintln!("  {} {} -> {}", "+".green(), truncate(stem, 40), answer);
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl PassNotifier for SimpleProgress {
    fn on_pass_start(&self, total_questions: usize) {
        eprintln!(
            "{} {} ({} questions)",
            "->".cyan(),
            "Resolving".bold(),
            total_questions
        );
    }

    fn on_detail(&self, entry: &DetailEntry) {
        eprintln!("  {}", ConsoleFormatter::detail_line(entry));
    }

    fn on_pass_complete(&self, _report: &PassReport) {
        eprintln!();
    }

    fn on_learned(&self, stem: &str, answer: &str) {
        eprintln!("  {} {} -> {}", "+".green(), truncate(stem, 40), answer);
    }
}
