//! Configuration file loading for quiz-recall
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./quiz-recall.toml` or `./.quiz-recall.toml`
//! 3. XDG config: `$XDG_CONFIG_HOME/quiz-recall/config.toml`
//! 4. Fallback: `~/.config/quiz-recall/config.toml`
//! 5. Default values

mod file_config;
mod loader;
mod writer;

pub use file_config::{
    ConfigValidationError, FileConfig, FileOutputConfig, FileOutputFormat, FileStorageConfig,
};
pub use loader::ConfigLoader;
pub use writer::{ConfigWriteError, save_preferences};
