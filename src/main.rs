//! Call-Site Stats CLI
//!
//! Collects statistics of how each function in a Go codebase is called
//! and prints them as JSON lines or an aligned text table.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use callsite_stats::commands::{
    display_schema, display_version, execute_collect, execute_render, validate_args,
    CollectArgs, OutputFormat, RenderArgs,
};

/// Call-Site Stats - how functions are called across a Go codebase
#[derive(Parser, Debug)]
#[command(name = "callsite-stats")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze Go packages and print call-site statistics
    Collect {
        /// Package patterns (e.g. ./... or ./pkg/...)
        #[arg(required = true)]
        patterns: Vec<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Jsonl)]
        format: OutputFormat,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Include _test.go files
        #[arg(long)]
        tests: bool,

        /// TOML settings file
        #[arg(long, env = "CALLSITE_STATS_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Render a saved JSON lines file as a text table
    Render {
        /// Path to records written by `collect`
        file: PathBuf,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// TOML settings file
        #[arg(long, env = "CALLSITE_STATS_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging (stderr; stdout carries the data)
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Collect {
            patterns,
            format,
            output,
            tests,
            config,
        } => {
            let args = CollectArgs {
                patterns,
                format,
                output,
                include_tests: tests,
                config,
            };

            // Validate args first
            validate_args(&args)?;

            execute_collect(args)?;
        }

        Commands::Render {
            file,
            output,
            config,
        } => {
            execute_render(RenderArgs {
                input: file,
                output,
                config,
            })?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
