// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use log::{warn, LevelFilter, Level, Log, Metadata, Record, SetLoggerError};
use std::fs::File;
use std::io::BufReader;
use std::io::Write;
use std::path::{Path, PathBuf};
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use crate::app_config::{Config, EscapingPolicy, GenerationMode};
use app_controller::Controller;

mod app_config;
mod app_controller;
mod card_generator;
mod deck_writer;
mod document_loader;
mod errors;

/// CLI Wrapper for GenerationMode to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliGenerationMode {
    Poem,
    Sequence,
}

impl From<CliGenerationMode> for GenerationMode {
    fn from(cli_mode: CliGenerationMode) -> Self {
        match cli_mode {
            CliGenerationMode::Poem => GenerationMode::Poem,
            CliGenerationMode::Sequence => GenerationMode::Sequence,
        }
    }
}

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
    /// Generate a flashcard deck from text input (default command)
    #[command(alias = "gen")]
    Generate(GenerateArgs),

    /// Generate shell completions for ankigen
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Input text file to process (reads standard input when omitted)
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Card generation mode
    #[arg(short, long, value_enum)]
    mode: Option<CliGenerationMode>,

    /// Number of context lines shown per poem card
    #[arg(short, long)]
    qlines: Option<usize>,

    /// Number of lines per answer (reserved, currently unused)
    #[arg(short, long)]
    alines: Option<usize>,

    /// Output deck file path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// HTML-escape poem lines instead of passing markup through verbatim
    #[arg(long)]
    strict_escape: bool,

    /// Skip the UTF-8 byte-order mark at the start of the output file
    #[arg(long)]
    no_bom: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// ankigen - Anki flashcard deck generator
///
/// Turns line-oriented plain text (a poem or an enumerated sequence) into
/// a two-column CSV deck ready for import into Anki.
#[derive(Parser, Debug)]
#[command(name = "ankigen")]
#[command(version = "1.0.0")]
#[command(about = "Anki flashcard deck generator")]
#[command(long_about = "ankigen turns line-oriented plain text into an Anki-importable CSV deck.

Poem input: line 1 is the title, line 2 the author, the rest the poem.
Blank lines mark stanza breaks and render as inline breaks on card fronts.
Sequence input: line 1 is the title, the rest the sequence elements.

EXAMPLES:
    cat poem.txt | ankigen                      # Poem deck from stdin
    ankigen -q 3 poem.txt                       # Three context lines per card
    ankigen -m sequence planets.txt             # Relational sequence deck
    ankigen -o deck.csv --no-bom poem.txt       # Custom output, no BOM
    ankigen --strict-escape poem.txt            # HTML-escape poem lines
    ankigen completions bash > ankigen.bash     # Generate bash completions

CONFIGURATION:
    Settings are stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a
    default one will be created automatically. Command line flags override
    values from the config file.

IMPORT:
    In Anki: File -> Import -> pick the deck file -> fields separated by
    comma -> allow HTML in fields -> map field 1 to Front, field 2 to Back.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input text file to process (reads standard input when omitted)
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// Card generation mode
    #[arg(short, long, value_enum)]
    mode: Option<CliGenerationMode>,

    /// Number of context lines shown per poem card
    #[arg(short, long)]
    qlines: Option<usize>,

    /// Number of lines per answer (reserved, currently unused)
    #[arg(short, long)]
    alines: Option<usize>,

    /// Output deck file path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// HTML-escape poem lines instead of passing markup through verbatim
    #[arg(long)]
    strict_escape: bool,

    /// Skip the UTF-8 byte-order mark at the start of the output file
    #[arg(long)]
    no_bom: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

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

    // @returns: ANSI color code for log level
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
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} [{}] {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "ankigen", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Generate(args)) => run_generate(args),
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let generate_args = GenerateArgs {
                input_path: cli.input_path,
                mode: cli.mode,
                qlines: cli.qlines,
                alines: cli.alines,
                output: cli.output,
                strict_escape: cli.strict_escape,
                no_bom: cli.no_bom,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_generate(generate_args)
        }
    }
}

fn run_generate(options: GenerateArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter(&config_log_level));
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
        // Load existing configuration
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        // Create default configuration if not exists
        warn!("Config file not found at '{}', creating default config.", config_path);

        let config = Config::default();

        // Save default config
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Override config with CLI options if provided
    if let Some(mode) = options.mode {
        config.mode = mode.into();
    }

    if let Some(qlines) = options.qlines {
        config.poem.question_lines = qlines;
    }

    if let Some(alines) = options.alines {
        config.poem.answer_lines = alines;
    }

    if let Some(output) = options.output {
        config.output.path = output;
    }

    if options.strict_escape {
        config.escaping = EscapingPolicy::Strict;
    }

    if options.no_bom {
        config.output.write_bom = false;
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    // Create controller (validates the configuration)
    let controller = Controller::with_config(config)?;

    // Run the pipeline against the input file or standard input
    match &options.input_path {
        Some(path) => {
            let file = File::open(path)
                .context(format!("Failed to open input file: {}", path.display()))?;
            controller.run(BufReader::new(file))
        }
        None => controller.run(std::io::stdin().lock()),
    }
}
