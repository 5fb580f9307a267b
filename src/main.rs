//! schema-delta: schema-driven structural diff for audit trails
//!
//! Compares two versions of a schema-described data graph and prints a
//! compact change record.

use anyhow::Result;
use clap::{Parser, Subcommand};
use schema_delta::{
    cli::{self, exit_codes},
    config::{BehaviorConfig, DiffConfig, DiffPaths, OutputConfig, ValidateConfig},
    model::generate_json_schema,
    reports::ReportFormat,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "schema-delta")]
#[command(version)]
#[command(about = "Schema-driven structural diff for audit trails", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  No changes detected (or --fail-on-change not set)
    1  Changes detected with --fail-on-change
    2  Error occurred

EXAMPLES:
    # Diff two versions of a data graph
    schema-delta diff vehicles.schema.yaml old.json new.json

    # CI check: fail when anything changed
    schema-delta diff vehicles.schema.yaml old.json new.json --fail-on-change -o summary

    # Store an audit record
    schema-delta diff vehicles.schema.yaml old.json new.json --envelope -O audit.json

    # Check a schema file without diffing
    schema-delta validate vehicles.schema.yaml")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `diff` subcommand
#[derive(Parser)]
struct DiffArgs {
    /// Schema-definition file (YAML or JSON)
    schema: PathBuf,

    /// Path to the old version of the data graph
    old: PathBuf,

    /// Path to the new version of the data graph
    new: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "json")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Root type to diff as (defaults to the schema file's `root`)
    #[arg(long)]
    root: Option<String>,

    /// Emit compact instead of pretty JSON
    #[arg(long)]
    compact: bool,

    /// Wrap the JSON record in an audit envelope with summary counts
    #[arg(long)]
    envelope: bool,

    /// Exit with code 1 if any changes are detected
    #[arg(long)]
    fail_on_change: bool,

    /// Maximum element-nesting depth before the diff aborts
    #[arg(long, env = "SCHEMA_DELTA_MAX_DEPTH")]
    max_depth: Option<usize>,
}

/// Arguments for the `validate` subcommand
#[derive(Parser)]
struct ValidateArgs {
    /// Schema-definition file to resolve
    schema: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Diff two versions of a data graph under a schema
    Diff(DiffArgs),

    /// Resolve a schema file and report what it declares
    Validate(ValidateArgs),

    /// Print the JSON Schema for the schema-definition file format
    JsonSchema,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Dispatch to command handlers
    let exit_code = match cli.command {
        Commands::Diff(args) => {
            let config = DiffConfig {
                paths: DiffPaths {
                    schema: args.schema,
                    old: args.old,
                    new: args.new,
                },
                output: OutputConfig {
                    format: args.output,
                    file: args.output_file,
                    compact: args.compact,
                    envelope: args.envelope,
                },
                behavior: BehaviorConfig {
                    fail_on_change: args.fail_on_change,
                    quiet: cli.quiet,
                },
                root: args.root,
                max_depth: args.max_depth,
            };
            cli::run_diff(&config)
        }

        Commands::Validate(args) => {
            let config = ValidateConfig {
                schema: args.schema,
                quiet: cli.quiet,
            };
            cli::run_validate(&config)
        }

        Commands::JsonSchema => {
            println!("{}", generate_json_schema());
            Ok(exit_codes::SUCCESS)
        }
    };

    match exit_code {
        Ok(code) if code != exit_codes::SUCCESS => std::process::exit(code),
        Ok(_) => Ok(()),
        Err(err) => {
            // anyhow's alternate formatting prints the full source chain
            let err = anyhow::Error::new(err);
            tracing::error!("{err:#}");
            std::process::exit(exit_codes::ERROR);
        }
    }
}
