//! Infrastructure layer for quiz-recall
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod harvest;
pub mod logging;
pub mod page;
pub mod remote;
pub mod storage;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, ConfigWriteError, FileConfig, FileOutputConfig,
    FileOutputFormat, FileStorageConfig, save_preferences,
};
pub use harvest::{HarvestCapture, HarvestError};
pub use logging::JsonlPassLogger;
pub use page::{HtmlQuizPage, PageInteraction};
pub use remote::HttpRemoteBank;
pub use storage::JsonFileBankStore;
