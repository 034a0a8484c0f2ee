use clap::Args;

/// Global arguments that apply to all subcommands
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Only log errors
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log operation routing to stderr
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Settings file applied on top of the built-in settings
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<String>,

    /// Maximum input size in bytes (0 = unlimited)
    #[arg(long, global = true, default_value = "104857600")]
    pub max_size: usize,

    /// Process files exceeding --max-size limit
    #[arg(long, global = true)]
    pub force: bool,
}
