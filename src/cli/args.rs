use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one operation by id
    Run(RunArgs),

    /// List every operation id, grouped by family
    List(ListArgs),

    /// Guess whether text is an encoding or a classical cipher
    Detect(InputArgs),

    /// Break a Caesar shift by chi-squared scoring
    Crack(InputArgs),

    /// Print the effective settings
    Config(ConfigArgs),
}

/// Arguments for running an operation
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Operation id, e.g. "Decimal to Binary" or "Base64"
    pub operation: String,

    /// Input text (reads --file or stdin if not provided)
    pub text: Option<String>,

    /// Read input from this file
    #[arg(short = 'f', long, conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// Auxiliary parameter: numeric base, key, divisor or shift
    #[arg(short = 'b', long)]
    pub base: Option<String>,

    /// Direction ("Encode", "Decode") or source unit
    #[arg(short = 'm', long)]
    pub mode: Option<String>,

    /// Target unit
    #[arg(long)]
    pub mode2: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for listing operations
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for commands that analyze a text
#[derive(Args, Debug)]
pub struct InputArgs {
    /// Input file (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for printing settings
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Output as JSON instead of TOML
    #[arg(long)]
    pub json: bool,
}
