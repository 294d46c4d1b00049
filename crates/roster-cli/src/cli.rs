//! CLI argument definitions for `roster`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "roster",
    version,
    about = "Validate scheduling datasets and manage business rules",
    long_about = "Validate clients, workers and tasks CSV datasets together.\n\n\
                  Also manages a persisted list of business rules (co-run groups,\n\
                  slot restrictions, load limits, phase windows, pattern matches\n\
                  and precedence overrides) with JSON import and export."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Settings file to use instead of the platform default.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Rule store directory (overrides the settings file).
    #[arg(long = "rules-dir", value_name = "DIR", global = true)]
    pub rules_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate the clients, workers and tasks CSV files in a folder.
    Validate(ValidateArgs),

    /// Print the required columns of each dataset.
    Schema,

    /// Manage the persisted business rules.
    #[command(subcommand)]
    Rules(RulesCommand),
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Folder containing clients*.csv, workers*.csv and tasks*.csv.
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Report format (default from settings, else table).
    #[arg(long = "format", value_enum)]
    pub format: Option<OutputFormatArg>,
}

#[derive(Subcommand)]
pub enum RulesCommand {
    /// List stored rules.
    List,

    /// Add a rule given as JSON, e.g. '{"type":"coRun","tasks":["T1","T2"]}'.
    Add {
        #[arg(value_name = "JSON")]
        json: String,
    },

    /// Replace the rule at INDEX.
    Update {
        #[arg(value_name = "INDEX")]
        index: usize,
        #[arg(value_name = "JSON")]
        json: String,
    },

    /// Delete the rule at INDEX.
    Delete {
        #[arg(value_name = "INDEX")]
        index: usize,
    },

    /// Delete every rule.
    Clear,

    /// Append rules from an export file or a JSON array. All or nothing.
    Import {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Write the rules and export metadata as JSON.
    Export {
        /// Output file (default: stdout).
        #[arg(long = "output", short = 'o', value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
