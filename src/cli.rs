//! CLI argument parsing for bytefreq

use crate::preset::Preset;
use crate::scoring::ScoringMode;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for scores and model reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "bytefreq")]
#[command(version)]
#[command(about = "Score content against a trained byte-frequency model", long_about = None)]
pub struct Cli {
    /// Enable debug tracing output on stderr
    #[arg(long, global = true)]
    pub debug: bool,

    /// Configuration file (default: ./bytefreq.toml if present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Train a model from files, directories or stdin (-) and save it
    Train(TrainArgs),
    /// Score content against a model or preset
    Score(ScoreArgs),
    /// Show statistics for a saved model
    Inspect(InspectArgs),
}

#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Model file to write
    #[arg(short, long, value_name = "PATH")]
    pub model: Option<PathBuf>,

    /// Restore the existing model first and keep training it
    #[arg(short, long)]
    pub append: bool,

    /// Description stored in the model metadata
    #[arg(long, value_name = "TEXT")]
    pub description: Option<String>,

    /// Write the headerless 256-counter layout
    #[arg(long)]
    pub legacy: bool,

    /// Maximum directory recursion depth
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Include dot-files and dot-directories
    #[arg(long)]
    pub hidden: bool,

    /// Corpus inputs (files, directories, or - for stdin)
    #[arg(required = true, value_name = "INPUT")]
    pub inputs: Vec<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Model file to score against
    #[arg(short, long, value_name = "PATH", conflicts_with = "preset")]
    pub model: Option<PathBuf>,

    /// Built-in reference model
    #[arg(short, long, value_enum)]
    pub preset: Option<Preset>,

    /// Scoring mode
    #[arg(long, value_enum)]
    pub mode: Option<ScoringMode>,

    /// Verdict threshold in [0, 1]
    #[arg(short, long, value_name = "SCORE")]
    pub threshold: Option<f64>,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Score this literal text instead of inputs
    #[arg(long, value_name = "TEXT", conflicts_with = "inputs")]
    pub text: Option<String>,

    /// Inputs to score, each separately (files, directories, or - for stdin)
    #[arg(value_name = "INPUT")]
    pub inputs: Vec<PathBuf>,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Model file to inspect
    #[arg(short, long, value_name = "PATH")]
    pub model: Option<PathBuf>,

    /// Number of most frequent bytes to list
    #[arg(long, value_name = "N", default_value = "10")]
    pub top: usize,

    /// Output format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,
}
