//! CLI entrypoint for quiz-recall
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser};
use recall_application::{
    BankTransferUseCase, CompositeNotifier, ConfigAccessorPort, ConfigValue,
    LearnAnswersUseCase, LocalBankStore, NoProgress, PassNotifier, Preferences, QuizPage,
    RunPassInput, RunPassUseCase,
};
use recall_domain::{AnswerBank, config::lookup_key, validate_threshold};
use recall_infrastructure::{
    ConfigLoader, FileConfig, HarvestCapture, HtmlQuizPage, HttpRemoteBank,
    JsonFileBankStore, JsonlPassLogger, save_preferences,
};
use recall_presentation::{
    Cli, Command, ConfigCommand, ConsoleFormatter, OutputConfig, ProgressReporter, RunArgs,
    SimpleProgress,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let config = load_config(&cli)?;

    let Some(command) = &cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    info!("Starting quiz-recall");

    match command {
        Command::Run(args) => run_pass(&cli, &config, args).await,
        Command::Stems { page } => {
            let page = HtmlQuizPage::load(page).await?;
            let blocks = page.discover().await?;
            print!("{}", ConsoleFormatter::format_stems(&blocks));
            Ok(())
        }
        Command::Learn { page } => {
            let page = Arc::new(HtmlQuizPage::load(page).await?);
            let store = open_store(&cli, &config)?;
            let logger = open_log(&cli);
            let progress = SimpleProgress;
            let mut notifiers: Vec<&dyn PassNotifier> = Vec::new();
            if !cli.quiet {
                notifiers.push(&progress);
            }
            if let Some(logger) = &logger {
                notifiers.push(logger);
            }

            let output = LearnAnswersUseCase::new(page, store)
                .execute_with_progress(&CompositeNotifier::new(notifiers))
                .await?;
            println!("{}", ConsoleFormatter::format_learned(&output));
            Ok(())
        }
        Command::Import { file } => {
            let json = std::fs::read_to_string(file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let summary = BankTransferUseCase::new(open_store(&cli, &config)?).import_json(&json)?;
            println!("{}", ConsoleFormatter::format_import(&summary));
            Ok(())
        }
        Command::Export { output } => {
            let json = BankTransferUseCase::new(open_store(&cli, &config)?).export_json()?;
            match output {
                Some(path) => std::fs::write(path, json + "\n")
                    .with_context(|| format!("Failed to write {}", path.display()))?,
                None => println!("{}", json),
            }
            Ok(())
        }
        Command::Config(sub) => config_command(&cli, &config, sub),
    }
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?
    };

    for issue in config.validate() {
        warn!("{}", issue);
    }
    Ok(config)
}

fn open_store(cli: &Cli, config: &FileConfig) -> Result<Arc<dyn LocalBankStore>> {
    let path = cli
        .bank
        .clone()
        .or_else(|| config.storage.resolved_bank_path())
        .context("No location for the local bank; pass --bank <PATH>")?;
    info!("Local bank: {}", path.display());
    Ok(Arc::new(JsonFileBankStore::new(path)))
}

fn open_log(cli: &Cli) -> Option<JsonlPassLogger> {
    let path = cli.log_file.as_ref()?;
    let logger = JsonlPassLogger::new(path);
    if logger.is_none() {
        warn!("Pass log disabled: cannot write {}", path.display());
    }
    logger
}

fn read_harvest(paths: &[PathBuf]) -> Result<AnswerBank> {
    let mut capture = HarvestCapture::new();
    for path in paths {
        capture
            .read_file(path)
            .with_context(|| format!("Failed to read capture {}", path.display()))?;
    }
    if !paths.is_empty() {
        info!(
            "Harvested {} answers from {} responses",
            capture.bank().len(),
            capture.responses()
        );
    }
    Ok(capture.into_bank())
}

async fn run_pass(cli: &Cli, config: &FileConfig, args: &RunArgs) -> Result<()> {
    let mut preferences = config.preferences.clone();
    if args.no_apply {
        preferences = preferences.with_auto_apply(false);
    }
    if let Some(threshold) = args.threshold {
        preferences = preferences.with_fuzzy_threshold(validate_threshold(threshold)?);
    }

    let output_config = OutputConfig::resolve(
        config.output.format,
        args.output.map(Into::into),
        config.output.color,
        config.output.show_progress,
        cli.quiet,
    );
    output_config.apply_color();

    let page = Arc::new(HtmlQuizPage::load(&args.page).await?);
    let harvested = read_harvest(&args.harvest)?;

    let mut use_case = RunPassUseCase::new(page, open_store(cli, config)?);
    if !args.no_remote && preferences.bank_url().is_some() {
        use_case = use_case.with_remote(Arc::new(HttpRemoteBank::new(
            preferences.remote_timeout(),
        )?));
    }

    let mut input = RunPassInput::new(preferences).with_harvested(harvested);
    if args.no_remote {
        input = input.without_remote();
    }

    // === Progress wiring ===
    let logger = open_log(cli);
    let bar = ProgressReporter::new();
    let mut notifiers: Vec<&dyn PassNotifier> = Vec::new();
    if output_config.show_progress {
        notifiers.push(&bar);
    }
    if let Some(logger) = &logger {
        notifiers.push(logger);
    }

    let output = if notifiers.is_empty() {
        use_case.execute_with_progress(input, &NoProgress).await?
    } else {
        use_case
            .execute_with_progress(input, &CompositeNotifier::new(notifiers))
            .await?
    };

    print!(
        "{}",
        ConsoleFormatter::new().render(&output, output_config.format)
    );
    Ok(())
}

/// File that `config set` edits: the explicit `--config` file, else the
/// global one
fn config_target(cli: &Cli) -> Result<PathBuf> {
    cli.config
        .clone()
        .or_else(ConfigLoader::global_config_path)
        .context("No config directory on this platform; pass --config <PATH>")
}

fn config_command(cli: &Cli, config: &FileConfig, command: &ConfigCommand) -> Result<()> {
    let preferences = &config.preferences;
    match command {
        ConfigCommand::Get { key } => {
            println!("{}", preferences.config_get(key)?);
        }
        ConfigCommand::List => {
            let entries: Vec<(String, ConfigValue)> = preferences
                .config_keys()
                .into_iter()
                .filter_map(|key| preferences.config_get(&key).ok().map(|v| (key, v)))
                .collect();
            println!("{}", ConsoleFormatter::format_config(&entries));
        }
        ConfigCommand::Set { key, value } => {
            let info = lookup_key(key)
                .with_context(|| format!("Unknown preference '{}'", key))?;
            let parsed = ConfigValue::parse_as(info.kind, value)
                .map_err(|e| anyhow::anyhow!("{}: {}", key, e))?;

            let target = config_target(cli)?;
            let mut stored = stored_preferences(&target)?;
            stored.config_set(key, parsed)?;
            save_preferences(&target, &stored)?;
            println!("{} = {} ({})", key, stored.config_get(key)?, target.display());
        }
    }
    Ok(())
}

fn stored_preferences(path: &Path) -> Result<Preferences> {
    if !path.exists() {
        return Ok(Preferences::default());
    }
    let config = ConfigLoader::load_file(path)
        .map_err(|e| anyhow::anyhow!("Invalid configuration in {}: {}", path.display(), e))?;
    Ok(config.preferences)
}
