pub(crate) mod inspect;
pub(crate) mod sign;

use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum KeyCommands {
    /// Show what kind of private key a PEM file holds
    Inspect {
        #[command(flatten)]
        config: inspect::Config,
    },
    /// Sign the SHA-256 digest of a file with a PEM private key
    Sign {
        #[command(flatten)]
        config: sign::Config,
    },
}
