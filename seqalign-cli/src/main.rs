use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use seqalign_core::AlignmentMode;
use std::io::Write;
use std::path::PathBuf;

mod commands;
mod config;
mod error;

use commands::ScoringArgs;
use config::{Config, OutputFormat};
use error::{print_error_and_exit, CliError};

#[derive(Parser)]
#[command(name = "seqalign")]
#[command(about = "seqalign - linear-gap pairwise alignment in local, global and glocal modes")]
#[command(version)]
#[command(long_about = "
seqalign aligns short sequences with linear gap scores and reports the
coordinates, score and match/error counts of the best alignment that
passes the error rate filter.

Examples:
  seqalign align --mode local --query ACGT --target TTACGTTT
  seqalign scan --mode glocal --pattern AGATCGGAAGAGC --reads reads.fq.gz
  seqalign config --example > seqalign.toml
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Number of threads to use
    #[arg(short, long, global = true)]
    pub threads: Option<usize>,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Align a query sequence against a target sequence
    Align {
        /// Alignment mode (local, global, glocal)
        #[arg(short, long, default_value = "local")]
        mode: AlignmentMode,

        /// Query sequence
        #[arg(long, required = true)]
        query: String,

        /// Target sequence
        #[arg(long, required = true)]
        target: String,

        #[command(flatten)]
        scoring: ScoringArgs,

        /// Output format (defaults to the configured one)
        #[arg(long)]
        format: Option<OutputFormat>,
    },

    /// Align one pattern against every record of a FASTA/FASTQ file
    Scan {
        /// Alignment mode (local, global, glocal)
        #[arg(short, long, default_value = "glocal")]
        mode: AlignmentMode,

        /// Pattern sequence, e.g. an adapter or primer
        #[arg(short, long, required = true)]
        pattern: String,

        /// Reads file (FASTA/FASTQ, optionally gzipped)
        #[arg(short, long, required = true)]
        reads: PathBuf,

        /// Use each read as query and the pattern as target
        #[arg(long)]
        reverse: bool,

        #[command(flatten)]
        scoring: ScoringArgs,

        /// Output format (defaults to the configured one)
        #[arg(long)]
        format: Option<OutputFormat>,

        /// Also report records without an accepted alignment
        #[arg(long)]
        all: bool,
    },

    /// Configuration management
    Config {
        /// Generate example configuration
        #[arg(long)]
        example: bool,

        /// Write the configuration to this path instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
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
    let config = Config::load(cli.config.as_deref())?;

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .map_err(|e| CliError::config(format!("Failed to set thread count: {}", e)))?;
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Align {
            mode,
            query,
            target,
            scoring,
            format,
        } => {
            commands::align::execute(&config, &mut out, mode, &query, &target, &scoring, format)?;
        }

        Commands::Scan {
            mode,
            pattern,
            reads,
            reverse,
            scoring,
            format,
            all,
        } => {
            commands::scan::execute(
                &config, &mut out, mode, &pattern, &reads, reverse, &scoring, format, all,
            )?;
        }

        Commands::Config { example, output } => {
            let config = if example { Config::default() } else { config };
            match output {
                Some(path) => {
                    config.save_to_file(&path)?;
                    log::info!("Configuration written to: {}", path.display());
                }
                None if example => write!(out, "{}", Config::example_toml()?)?,
                None => write!(
                    out,
                    "{}",
                    toml::to_string_pretty(&config).context("Failed to serialize configuration")?
                )?,
            }
        }
    }

    out.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    if let Err(err) = run(cli) {
        match err.downcast::<CliError>() {
            Ok(cli_err) => print_error_and_exit(&cli_err),
            Err(other) => return Err(other),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_scan_with_negative_scores() {
        let cli = Cli::try_parse_from([
            "seqalign", "scan", "--mode", "GLOCAL", "--pattern", "ACGT", "--reads", "r.fq",
            "--mismatch", "-3", "--gap", "-4", "--error-rate", "10", "-t", "2",
        ])
        .unwrap();

        assert_eq!(cli.threads, Some(2));
        match cli.command {
            Commands::Scan { mode, scoring, .. } => {
                assert_eq!(mode, AlignmentMode::Glocal);
                assert_eq!(scoring.mismatch_score, Some(-3));
                assert_eq!(scoring.gap_score, Some(-4));
                assert_eq!(scoring.error_rate_percent, Some(10));
            }
            _ => panic!("expected scan"),
        }
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        assert!(Cli::try_parse_from([
            "seqalign", "align", "--mode", "banded", "--query", "A", "--target", "A",
        ])
        .is_err());
    }
}
