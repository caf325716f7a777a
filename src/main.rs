//! openapi-diff: structural OpenAPI diff with breaking-change classification

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use openapi_diff::{
    checker::Level,
    cli,
    config::{AppConfig, DiffConfigBuilder, Validatable},
    pipeline::exit_codes,
    reports::ReportFormat,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "openapi-diff")]
#[command(version)]
#[command(about = "Structural OpenAPI diff with breaking-change classification", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  Documents differ (--fail-on-diff)
    2  A change at or above the --fail-on level remains
    3  Error occurred

EXAMPLES:
    # Structural diff, summary when piped
    openapi-diff diff v1.yaml v2.yaml

    # Gate a merge on breaking changes
    openapi-diff changelog v1.yaml v2.yaml --fail-on breaking -o lines

    # Acknowledge known breaking changes
    openapi-diff changelog v1.yaml v2.yaml --ignore breaking-changes.ignore")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "OPENAPI_DIFF_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments shared by `diff` and `changelog`
#[derive(Args)]
struct CompareArgs {
    /// Path to the base document
    base: PathBuf,

    /// Path to the revised document
    revision: PathBuf,

    /// Prefix carried by base paths but not by revision paths
    #[arg(long)]
    prefix: Option<String>,

    /// Only report paths matching this regular expression
    #[arg(long)]
    filter: Option<String>,

    /// Output format (auto: text on a terminal, summary otherwise)
    #[arg(short, long, default_value = "auto")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

/// Arguments for the `diff` subcommand
#[derive(Parser)]
struct DiffArgs {
    #[command(flatten)]
    compare: CompareArgs,

    /// Exit with code 1 if the documents differ
    #[arg(long)]
    fail_on_diff: bool,
}

/// Arguments for the `changelog` subcommand
#[derive(Parser)]
struct ChangelogArgs {
    #[command(flatten)]
    compare: CompareArgs,

    /// Leave changes below this level out of the report
    #[arg(long, value_enum)]
    level: Option<Level>,

    /// Exit with code 2 if a change at or above this level remains
    #[arg(long, value_enum)]
    fail_on: Option<Level>,

    /// File listing acknowledged changes
    #[arg(long)]
    ignore: Option<PathBuf>,

    /// Render each change over several lines
    #[arg(long)]
    multiline: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the structural differences between two documents
    Diff(DiffArgs),

    /// List classified changes between two documents
    Changelog(ChangelogArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .openapi-diff.yaml in the current directory
    Init,
}

impl CompareArgs {
    fn overrides(&self, cli: &Cli) -> openapi_diff::config::AppConfigBuilder {
        AppConfig::builder()
            .prefix(self.prefix.clone())
            .filter(self.filter.clone())
            .output_format(self.output)
            .output_file(self.output_file.clone())
            .no_color(cli.no_color)
            .quiet(cli.quiet)
    }
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    match run(&cli) {
        Ok(code) => {
            if code != exit_codes::SUCCESS {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_codes::ERROR);
        }
    }
}

fn run(cli: &Cli) -> Result<i32> {
    match &cli.command {
        Commands::Diff(args) => {
            let overrides = args
                .compare
                .overrides(cli)
                .fail_on_diff(args.fail_on_diff)
                .build();
            let config = compare_config(cli, &args.compare, &overrides)?;
            cli::run_diff(config)
        }

        Commands::Changelog(args) => {
            let overrides = args
                .compare
                .overrides(cli)
                .min_level(args.level.unwrap_or_default())
                .fail_on(args.fail_on)
                .ignore_file(args.ignore.clone())
                .multiline(args.multiline)
                .build();
            let config = compare_config(cli, &args.compare, &overrides)?;
            cli::run_changelog(config)
        }

        Commands::Completions { shell } => {
            generate(*shell, &mut Cli::command(), "openapi-diff", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }

        Commands::ConfigSchema { output } => {
            cli::run_config_schema(output.as_deref())?;
            Ok(exit_codes::SUCCESS)
        }

        Commands::Config { action } => {
            match action {
                ConfigAction::Show => cli::run_config_show(cli.config.as_deref())?,
                ConfigAction::Path => cli::run_config_path(cli.config.as_deref()),
                ConfigAction::Init => {
                    let cwd = std::env::current_dir()?;
                    cli::run_config_init(&cwd)?;
                }
            }
            Ok(exit_codes::SUCCESS)
        }
    }
}

/// Layer CLI flags over the config file and validate the result.
fn compare_config(
    cli: &Cli,
    args: &CompareArgs,
    overrides: &AppConfig,
) -> Result<openapi_diff::config::DiffConfig> {
    let (app, loaded_from) = AppConfig::from_file_with_overrides(cli.config.as_deref(), overrides);
    if let Some(path) = loaded_from {
        tracing::debug!("Using config file {}", path.display());
    }

    let config = DiffConfigBuilder::from_app_config(&app)
        .base_path(args.base.clone())
        .revision_path(args.revision.clone())
        .build()?;

    let errors = config.validate();
    if !errors.is_empty() {
        let details: Vec<String> = errors.iter().map(ToString::to_string).collect();
        anyhow::bail!("invalid configuration:\n  {}", details.join("\n  "));
    }
    Ok(config)
}
