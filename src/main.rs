// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info, warn};
use once_cell::sync::OnceCell;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::app_controller::Controller;
use crate::file_utils::FileManager;

mod app_config;
mod app_controller;
mod errors;
mod file_utils;
mod language_utils;
mod pipeline;
mod providers;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Translate a text file line by line (default command)
    #[command(alias = "translate")]
    Translate(TranslateArgs),

    /// Generate shell completions for lintra
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct TranslateArgs {
    /// Input text file to translate
    #[arg(value_name = "INPUT_FILE")]
    input_file: PathBuf,

    /// Output directory (defaults to the input file's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Source language code (e.g., 'en', 'es', 'fr'); auto-detected if omitted
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g., 'en', 'es', 'fr')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Maximum number of concurrent remote calls
    #[arg(long)]
    max_concurrency: Option<usize>,

    /// Attempt budget per line, including the first attempt
    #[arg(long)]
    max_retries: Option<u32>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Run without interactive prompts (requires --target-language)
    #[arg(short = 'y', long)]
    non_interactive: bool,
}

/// lintra - Line Translator
///
/// Translates a text file line by line through a remote translation service,
/// preserving input order and recovering from transient per-call failures.
#[derive(Parser, Debug)]
#[command(name = "lintra")]
#[command(version = "1.0.0")]
#[command(about = "Line-by-line file translation tool")]
#[command(long_about = "lintra translates a text file line by line through a remote translation
service, with a bounded worker pool, a global call-rate cap, and per-line
retries. Output order always matches input order; lines that fail all
retries are visibly marked instead of dropped.

EXAMPLES:
    lintra notes.txt                          # Detect source, pick target interactively
    lintra -t fr notes.txt                    # Translate to French
    lintra -s en -t de -y notes.txt           # Fully non-interactive run
    lintra --max-concurrency 3 notes.txt      # Gentler on the remote service
    lintra -o out/ notes.txt                  # Write Translated_To_XX.txt under out/
    lintra completions bash > lintra.bash     # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different file with --config-path. If the config file doesn't exist, a
    default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input text file to translate
    #[arg(value_name = "INPUT_FILE")]
    input_file: Option<PathBuf>,

    /// Output directory (defaults to the input file's directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Source language code (e.g., 'en', 'es', 'fr'); auto-detected if omitted
    #[arg(short, long)]
    source_language: Option<String>,

    /// Target language code (e.g., 'en', 'es', 'fr')
    #[arg(short, long)]
    target_language: Option<String>,

    /// Maximum number of concurrent remote calls
    #[arg(long)]
    max_concurrency: Option<usize>,

    /// Attempt budget per line, including the first attempt
    #[arg(long)]
    max_retries: Option<u32>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Run without interactive prompts (requires --target-language)
    #[arg(short = 'y', long)]
    non_interactive: bool,
}

/// File the logger mirrors every record into, once configuration is loaded
static LOG_FILE: OnceCell<PathBuf> = OnceCell::new();

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );

            // Mirror into the persistent run log when configured
            if let Some(path) = LOG_FILE.get() {
                let _ = FileManager::append_to_log_file(
                    path,
                    &format!("{} - {}", record.level(), record.args()),
                );
            }
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "lintra", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Translate(args)) => run_translate(args).await,
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let input_file = cli
                .input_file
                .ok_or_else(|| anyhow!("INPUT_FILE is required when no subcommand is specified"))?;

            let translate_args = TranslateArgs {
                input_file,
                output_dir: cli.output_dir,
                source_language: cli.source_language,
                target_language: cli.target_language,
                max_concurrency: cli.max_concurrency,
                max_retries: cli.max_retries,
                config_path: cli.config_path,
                log_level: cli.log_level,
                non_interactive: cli.non_interactive,
            };
            run_translate(translate_args).await
        }
    }
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter(&config_log_level));
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let config = if Path::new(config_path).exists() {
        // Load existing configuration
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        let mut config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;

        // Override config with CLI options if provided
        if let Some(source_lang) = &options.source_language {
            config.source_language = Some(source_lang.clone());
        }
        if let Some(target_lang) = &options.target_language {
            config.target_language = Some(target_lang.clone());
        }
        if let Some(max_concurrency) = options.max_concurrency {
            config.pipeline.max_concurrency = max_concurrency;
        }
        if let Some(max_retries) = options.max_retries {
            config.pipeline.max_retries = max_retries;
        }
        if let Some(log_level) = &options.log_level {
            config.log_level = log_level.clone().into();
        }

        config
    } else {
        // Create default configuration if not exists
        warn!("Config file not found at '{}', creating default config.", config_path);

        let mut config = Config::default();

        config.source_language = options.source_language.clone();
        config.target_language = options.target_language.clone();
        if let Some(max_concurrency) = options.max_concurrency {
            config.pipeline.max_concurrency = max_concurrency;
        }
        if let Some(max_retries) = options.max_retries {
            config.pipeline.max_retries = max_retries;
        }
        if let Some(log_level) = &options.log_level {
            config.log_level = log_level.clone().into();
        }

        // Save default config
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    // Wire the persistent run log into the logger
    if let Some(log_file) = &config.log_file {
        let _ = LOG_FILE.set(PathBuf::from(log_file));
    }

    if !options.input_file.is_file() {
        return Err(anyhow!("Input file does not exist: {:?}", options.input_file));
    }

    let output_dir = options
        .output_dir
        .clone()
        .unwrap_or_else(|| {
            options
                .input_file
                .parent()
                .unwrap_or(Path::new("."))
                .to_path_buf()
        });

    let controller = Controller::with_config(config.clone())?;
    let lines = FileManager::read_lines(&options.input_file)?;

    let source_language = resolve_source_language(&controller, &config, &lines, options.non_interactive)?;
    let mut target_language = resolve_target_language(&config, options.non_interactive)?;

    // Restart by looping, never by re-entering: each iteration gets a
    // fresh pipeline run against the same input
    loop {
        controller
            .run_file(&options.input_file, &output_dir, &source_language, &target_language)
            .await?;

        if options.non_interactive {
            break;
        }
        if !confirm("Would you like to restart the translation process with a new target language? (y/n): ")? {
            info!("Translation process finished.");
            break;
        }
        target_language = choose_language("Select the target language:")?;
    }

    Ok(())
}

/// Settle the source language: explicit configuration wins, then detection
/// with interactive confirmation, then manual selection
fn resolve_source_language(
    controller: &Controller,
    config: &Config,
    lines: &[String],
    non_interactive: bool,
) -> Result<String> {
    if let Some(source) = &config.source_language {
        return language_utils::validate_language_code(source);
    }

    match controller.detect_source_language(lines) {
        Some(detected) => {
            let name = language_utils::get_language_name(&detected)
                .unwrap_or_else(|_| detected.clone());
            info!("Detected input language: {} ({})", name, detected);

            if non_interactive {
                return Ok(detected);
            }

            if confirm("Is the detected language correct? (y/n): ")? {
                Ok(detected)
            } else {
                prompt_language_code("Please enter the correct source language code (e.g., 'en' for English): ")
            }
        }
        None => {
            if non_interactive {
                return Err(anyhow!(
                    "Could not detect the input language; pass --source-language"
                ));
            }
            println!("Could not detect the language. Please select the input language manually.");
            choose_language("Select the input language:")
        }
    }
}

/// Settle the target language: explicit configuration wins, otherwise the
/// interactive menu
fn resolve_target_language(config: &Config, non_interactive: bool) -> Result<String> {
    if let Some(target) = &config.target_language {
        return language_utils::validate_language_code(target);
    }
    if non_interactive {
        return Err(anyhow!("--target-language is required with --non-interactive"));
    }
    choose_language("Select the target language:")
}

/// Present the numbered language menu and read a selection
fn choose_language(prompt: &str) -> Result<String> {
    println!("{}", prompt);
    for (index, (name, code)) in language_utils::SUPPORTED_LANGUAGES.iter().enumerate() {
        println!("{}. {} ({})", index + 1, name, code);
    }

    loop {
        let choice = prompt_line("Enter the number corresponding to your desired language: ")?;
        if let Ok(number) = choice.trim().parse::<usize>() {
            if number >= 1 && number <= language_utils::SUPPORTED_LANGUAGES.len() {
                let (_, code) = language_utils::SUPPORTED_LANGUAGES[number - 1];
                return Ok(code.to_string());
            }
        }
        println!("Invalid choice. Please try again.");
    }
}

/// Prompt until the user enters a valid language code
fn prompt_language_code(prompt: &str) -> Result<String> {
    loop {
        let entered = prompt_line(prompt)?;
        match language_utils::validate_language_code(&entered) {
            Ok(code) => return Ok(code),
            Err(e) => println!("{}. Please try again.", e),
        }
    }
}

/// Ask a yes/no question; only an explicit 'y' counts as yes
fn confirm(prompt: &str) -> Result<bool> {
    let answer = prompt_line(prompt)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}

/// Print a prompt and read one line from stdin
fn prompt_line(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    std::io::stdout().flush()?;

    let mut buffer = String::new();
    std::io::stdin()
        .read_line(&mut buffer)
        .context("Failed to read from stdin")?;
    Ok(buffer.trim().to_string())
}
