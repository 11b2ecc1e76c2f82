use clap::Args;
use log::debug;
use serde::Serialize;
use shirushi::decoder::Decoder;
use shirushi_pkcs::{PrivateKey, PrivateKeyExt};
use shirushi_signer::{KeyFamily, SignerInfo};

use crate::error::Result;
use crate::output::OutputFormat;
use crate::utils::{first_pem, read_input};

#[derive(Args)]
pub(crate) struct Config {
    /// Path to the PEM file. If not specified, reads from stdin
    pub(crate) file: Option<String>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub(crate) output: OutputFormat,
}

#[derive(Debug, Serialize)]
struct KeyReport {
    label: String,
    encoding: &'static str,
    algorithm: String,
    key_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    curve: Option<&'static str>,
    signature_algorithm: String,
    signature_algorithm_oid: Option<&'static str>,
}

impl KeyReport {
    fn new(label: String, key: &PrivateKey, info: &SignerInfo) -> Self {
        let curve = match info.family() {
            KeyFamily::Rsa => None,
            KeyFamily::Ec(curve) => Some(curve.name()),
        };
        Self {
            label,
            encoding: key.format_name(),
            algorithm: key.algorithm().to_string(),
            key_size: key.key_size(),
            curve,
            signature_algorithm: info.algorithm().to_string(),
            signature_algorithm_oid: info.algorithm().oid(),
        }
    }

    fn to_text(&self) -> String {
        let mut lines = vec![
            format!("Label: {}", self.label),
            format!("Encoding: {}", self.encoding),
            format!("Key Algorithm: {}", self.algorithm),
            format!("Key Size: {} bits", self.key_size),
        ];
        if let Some(curve) = self.curve {
            lines.push(format!("Curve: {curve}"));
        }
        lines.push(match self.signature_algorithm_oid {
            Some(oid) => format!("Signature Algorithm: {} ({oid})", self.signature_algorithm),
            None => format!("Signature Algorithm: {}", self.signature_algorithm),
        });
        lines.join("\n")
    }
}

pub(crate) fn execute(config: Config) -> Result<()> {
    let input = read_input(config.file.as_deref())?;
    let pem = first_pem(&input)?;

    let key: PrivateKey = pem.decode()?;
    debug!("decoded {} {} key", key.format_name(), key.algorithm());
    let info: SignerInfo = key.decode()?;
    debug!("signature algorithm: {}", info.algorithm());

    let report = KeyReport::new(pem.label().to_string(), &key, &info);
    match config.output {
        OutputFormat::Text => println!("{}", report.to_text()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}
