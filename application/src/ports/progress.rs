//! Pass notification port
//!
//! The status reporting surface: a pure sink for per-question detail entries
//! and the final counters. Nothing flows back into the engine.

use recall_domain::{DetailEntry, PassReport};

/// Callbacks for progress during a resolution pass
///
/// Implementations live in the presentation and infrastructure layers
/// (console progress, JSONL log).
pub trait PassNotifier: Send + Sync {
    /// Called once questions have been discovered
    fn on_pass_start(&self, total_questions: usize);

    /// Called for every tallied question
    fn on_detail(&self, entry: &DetailEntry);

    /// Called when the pass completes
    fn on_pass_complete(&self, report: &PassReport);

    /// Called for each learned answer in learning mode
    fn on_learned(&self, _stem: &str, _answer: &str) {}
}

/// No-op notifier for when progress reporting is not needed
pub struct NoProgress;

impl PassNotifier for NoProgress {
    fn on_pass_start(&self, _total_questions: usize) {}
    fn on_detail(&self, _entry: &DetailEntry) {}
    fn on_pass_complete(&self, _report: &PassReport) {}
}

/// Fans every callback out to several notifiers
pub struct CompositeNotifier<'a> {
    inner: Vec<&'a dyn PassNotifier>,
}

impl<'a> CompositeNotifier<'a> {
    pub fn new(inner: Vec<&'a dyn PassNotifier>) -> Self {
        Self { inner }
    }
}

impl PassNotifier for CompositeNotifier<'_> {
    fn on_pass_start(&self, total_questions: usize) {
        for n in &self.inner {
            n.on_pass_start(total_questions);
        }
    }

    fn on_detail(&self, entry: &DetailEntry) {
        for n in &self.inner {
            n.on_detail(entry);
        }
    }

    fn on_pass_complete(&self, report: &PassReport) {
        for n in &self.inner {
            n.on_pass_complete(report);
        }
    }

    fn on_learned(&self, stem: &str, answer: &str) {
        for n in &self.inner {
            n.on_learned(stem, answer);
        }
    }
}
