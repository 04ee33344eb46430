//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for pass reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Counters plus one line per question
    Full,
    /// Counters only
    Summary,
    /// JSON output
    Json,
}

impl From<OutputFormat> for recall_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => recall_domain::OutputFormat::Full,
            OutputFormat::Summary => recall_domain::OutputFormat::Summary,
            OutputFormat::Json => recall_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for quiz-recall
#[derive(Parser, Debug)]
#[command(name = "quiz-recall")]
#[command(author, version, about = "Answer quiz pages from local, shared and harvested answer banks")]
#[command(long_about = r#"
quiz-recall resolves the questions of a quiz page against answer banks and
selects the matching options.

Answers come from three sources, merged per question stem:
1. Local bank        Your own answers (learned or imported)
2. Remote bank       A shared JSON bank fetched from `bank_url`
3. Harvested answers Captured answer-endpoint responses (--harvest)

Configuration files are loaded from (in priority order):
1. --config <path>          Explicit config file
2. ./quiz-recall.toml       Project-level config
3. ~/.config/quiz-recall/config.toml   Global config

Example:
  quiz-recall run quiz.html
  quiz-recall run quiz.html --harvest capture.jsonl --no-remote
  quiz-recall learn reviewed.html
  quiz-recall config set fuzzy_threshold 0.8
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Append pass events as JSON lines to this file
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Local bank file (overrides `storage.bank_path`)
    #[arg(long, value_name = "PATH", global = true)]
    pub bank: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve every question of a saved page and apply the answers
    Run(RunArgs),

    /// Print the normalized stem of every question on a page
    Stems {
        /// Saved quiz page
        page: PathBuf,
    },

    /// Record the selections shown on a page into the local bank
    Learn {
        /// Saved quiz page (typically a reviewed attempt)
        page: PathBuf,
    },

    /// Replace the local bank with a JSON document
    Import {
        /// JSON object of `stem -> {type, answer}`
        file: PathBuf,
    },

    /// Write the local bank as JSON
    Export {
        /// Output file (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Read or change preferences
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(clap::Args, Debug)]
pub struct RunArgs {
    /// Saved quiz page
    pub page: PathBuf,

    /// Captured answer-endpoint responses (JSON or JSON lines); repeatable
    #[arg(long, value_name = "PATH")]
    pub harvest: Vec<PathBuf>,

    /// Do not fetch the remote bank
    #[arg(long)]
    pub no_remote: bool,

    /// Resolve and report only; leave the page controls untouched
    #[arg(long)]
    pub no_apply: bool,

    /// Override the fuzzy match threshold for this run
    #[arg(long, value_name = "SCORE")]
    pub threshold: Option<f64>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print one preference
    Get { key: String },
    /// Change one preference and save it to the global config file
    Set { key: String, value: String },
    /// Print every preference
    List,
}
