use clap::Args;
use log::debug;
use sha2::{Digest, Sha256};
use shirushi::decoder::Decoder;
use shirushi_signer::SignerInfo;

use crate::error::Result;
use crate::output::SignatureFormat;
use crate::utils::{first_pem, read_input};

#[derive(Args)]
pub(crate) struct Config {
    /// Path to the PEM private key
    #[arg(short, long)]
    pub(crate) key: String,

    /// File to sign. If not specified, reads from stdin
    pub(crate) file: Option<String>,

    /// Signature encoding (base64, hex)
    #[arg(short, long, default_value = "base64")]
    pub(crate) format: SignatureFormat,
}

pub(crate) fn execute(config: Config) -> Result<()> {
    let key_input = read_input(Some(&config.key))?;
    let pem = first_pem(&key_input)?;
    let info: SignerInfo = pem.decode()?;
    debug!("signing with {} key", info.family());

    let message = read_input(config.file.as_deref())?;
    let digest = Sha256::digest(&message);
    debug!("SHA-256 digest: {}", hex::encode(digest));

    let signature = info.signer().sign(&digest)?;
    println!("Algorithm: {}", info.algorithm());
    println!("Signature: {}", config.format.encode(&signature));
    Ok(())
}
