mod args;
mod config;
mod global;
mod handlers;

use args::Commands;
use clap::Parser;
use global::GlobalArgs;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "alterm")]
#[command(version)]
#[command(about = "Convert, encode, hash and analyze text and numbers", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

fn init_logging(global: &GlobalArgs) {
    let filter = if global.quiet {
        EnvFilter::new("error")
    } else if global.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("ALTERM_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // A subscriber may already be installed when embedded in a test harness.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(&cli.global);

    let settings = config::load_settings(&cli.global)?;

    match cli.command {
        Commands::Run(args) => handlers::run::handle(args, &cli.global, &settings),
        Commands::List(args) => handlers::list::handle(args, &cli.global, &settings),
        Commands::Detect(args) => handlers::detect::handle(args, &cli.global, &settings),
        Commands::Crack(args) => handlers::crack::handle(args, &cli.global, &settings),
        Commands::Config(args) => handlers::config::handle(args, &cli.global, &settings),
    }
}
