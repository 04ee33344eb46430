//! Logging infrastructure: structured pass logging.
//!
//! Provides [`JsonlPassLogger`], a JSONL file writer that implements
//! the [`PassNotifier`](recall_application::PassNotifier) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlPassLogger;
