use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod error;

use config::Config;
use error::{print_error_and_exit, CliError};

#[derive(Parser)]
#[command(name = "seqwalk")]
#[command(about = "SeqWalk - DNA random-walk plots from FASTA files")]
#[command(version)]
#[command(long_about = "
SeqWalk turns a nucleotide sequence into a 2D walk: every symbol moves a cursor
one step in the direction assigned to it, and the visited points are plotted.
Large files are read in chunks and the plot is refreshed after each one.

Examples:
  seqwalk plot genome.fa -o walk.svg --json walk.json
  seqwalk plot genome.fa -o walk.png --offset 1000 --mode markers
  zcat reads.fa.gz | seqwalk plot - -o walk.svg --g NE:#ff7f0e
  seqwalk session --yes < script.txt
  seqwalk config --example > seqwalk.toml
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Walk a sequence file and export the plot
    Plot {
        /// Input FASTA file, or '-' for standard input
        input: PathBuf,

        /// Output file (SVG/PNG, by extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the run summary and the sampled path as JSON
        #[arg(long, value_name = "PATH")]
        json: Option<PathBuf>,

        #[command(flatten)]
        overrides: PlotOverrides,
    },

    /// Interactive session reading commands from standard input
    Session {
        /// Answer yes when asked to repeat an unchanged run
        #[arg(long)]
        yes: bool,
    },

    /// Configuration helpers
    Config {
        /// Print an example seqwalk.toml
        #[arg(long)]
        example: bool,

        /// Write the example configuration to a file instead
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

/// Command line overrides on top of seqwalk.toml
#[derive(Args, Debug, Clone, Default)]
pub struct PlotOverrides {
    /// Plot mode: lines, markers or lines+markers
    #[arg(long)]
    pub mode: Option<String>,

    /// Record every Nth step
    #[arg(long)]
    pub offset: Option<u64>,

    /// Marker size and line width
    #[arg(long)]
    pub size: Option<u32>,

    /// Read size per chunk in MB
    #[arg(long)]
    pub chunk_size_mb: Option<u64>,

    /// Draw markers without per-symbol colors
    #[arg(long)]
    pub no_color: bool,

    /// Rule for A as DIR[:#rrggbb]
    #[arg(long = "a", value_name = "RULE")]
    pub rule_a: Option<String>,

    /// Rule for T as DIR[:#rrggbb]
    #[arg(long = "t", value_name = "RULE")]
    pub rule_t: Option<String>,

    /// Rule for G as DIR[:#rrggbb]
    #[arg(long = "g", value_name = "RULE")]
    pub rule_g: Option<String>,

    /// Rule for C as DIR[:#rrggbb]
    #[arg(long = "c", value_name = "RULE")]
    pub rule_c: Option<String>,

    /// Rule for every other symbol as DIR[:#rrggbb]
    #[arg(long = "x", value_name = "RULE")]
    pub rule_x: Option<String>,

    /// Plot title
    #[arg(long)]
    pub title: Option<String>,

    /// Width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Height in pixels
    #[arg(long)]
    pub height: Option<u32>,
}

fn setup_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref()).map_err(|e| CliError::config(format!("{:#}", e)))?;

    match cli.command {
        Commands::Plot {
            input,
            output,
            json,
            overrides,
        } => {
            commands::plot::execute(&config, input, output, json, &overrides, cli.quiet)?;
        }

        Commands::Session { yes } => {
            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            commands::session::execute(&config, stdin.lock(), &mut stdout, yes, cli.quiet)?;
        }

        Commands::Config { example, output } => {
            commands::config::execute(&config, example, output)?;
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    if let Err(err) = run(cli) {
        match err.downcast_ref::<CliError>() {
            Some(cli_err) => print_error_and_exit(cli_err),
            None => {
                eprintln!("Error: {:#}", err);
                std::process::exit(1);
            }
        }
    }
}
