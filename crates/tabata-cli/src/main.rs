use clap::{Parser, Subcommand};
use tabata_core::Config;

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "tabata-cli", version, about = "Tabata interval timer CLI")]
struct Cli {
    /// Log filter, e.g. "debug" or "tabata_core=trace" (RUST_LOG takes precedence)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a session in this terminal
    Run(commands::run::RunArgs),
    /// Show the phases a session goes through
    Plan(commands::plan::PlanArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    // A broken settings file fails `run` and `plan`; `config` can still repair it.
    let settings = Config::load();
    let level = match (&cli.log_level, &settings) {
        (Some(level), _) => level.as_str(),
        (None, Ok(config)) => config.logging.level.as_str(),
        (None, Err(_)) => "warn",
    };
    logging::init(level);

    let result = match cli.command {
        Commands::Run(args) => settings
            .map_err(Into::into)
            .and_then(|config| commands::run::run(args, &config)),
        Commands::Plan(args) => settings
            .map_err(Into::into)
            .and_then(|config| commands::plan::run(args, &config)),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
