use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::LevelFilter;

mod error;
mod key;
mod output;
mod utils;

use error::Result;
use key::KeyCommands;

#[derive(Parser)]
#[command(name = "shirushi")]
#[command(about = "Inspect PEM private keys and sign with them", long_about = None)]
struct Cli {
    /// Print debug logs (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Private key operations
    Key {
        #[command(subcommand)]
        command: KeyCommands,
    },
}

fn init_logger(verbose: bool) {
    let mut builder = pretty_env_logger::formatted_builder();
    match std::env::var("RUST_LOG") {
        Ok(filters) if !verbose => {
            builder.parse_filters(&filters);
        }
        _ => {
            builder.filter_level(if verbose {
                LevelFilter::Debug
            } else {
                LevelFilter::Warn
            });
        }
    }
    let _ = builder.try_init();
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Key { command } => match command {
            KeyCommands::Inspect { config } => key::inspect::execute(config),
            KeyCommands::Sign { config } => key::sign::execute(config),
        },
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
