//! JSONL file writer for pass events.
//!
//! Each event is serialized as a single JSON line with a `type` field and
//! `timestamp`, appended to the file via a buffered writer.

use recall_application::PassNotifier;
use recall_domain::{DetailEntry, PassReport};
use serde_json::{Value, json};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// JSONL pass logger that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Appends to an existing file so
/// consecutive passes share one log. Flushes on `Drop`.
pub struct JsonlPassLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlPassLogger {
    /// Open the log at the given path.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create pass log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open pass log file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn log(&self, event_type: &str, payload: Value) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let mut record = match payload {
            Value::Object(map) => map,
            other => {
                let mut map = serde_json::Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };
        record.insert("type".to_string(), Value::String(event_type.to_string()));
        record.insert("timestamp".to_string(), Value::String(timestamp));

        let Ok(line) = serde_json::to_string(&Value::Object(record)) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl PassNotifier for JsonlPassLogger {
    fn on_pass_start(&self, total_questions: usize) {
        self.log("pass_start", json!({ "questions": total_questions }));
    }

    fn on_detail(&self, entry: &DetailEntry) {
        self.log(
            "detail",
            json!({
                "kind": entry.kind.as_str(),
                "stem": entry.stem,
                "message": entry.message,
            }),
        );
    }

    fn on_pass_complete(&self, report: &PassReport) {
        self.log(
            "pass_complete",
            json!({
                "hit": report.hit,
                "miss": report.miss,
                "inconsistent": report.inconsistent,
                "application_failures": report.application_failures(),
            }),
        );
    }

    fn on_learned(&self, stem: &str, answer: &str) {
        self.log("learned", json!({ "stem": stem, "answer": answer }));
    }
}

impl Drop for JsonlPassLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}
