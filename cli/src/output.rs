#[derive(Clone, Copy, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text format
    Text,
    /// JSON format
    Json,
}

#[derive(Clone, Copy, clap::ValueEnum)]
pub(crate) enum SignatureFormat {
    Base64,
    Hex,
}

impl SignatureFormat {
    pub(crate) fn encode(&self, signature: &[u8]) -> String {
        use base64::Engine;
        match self {
            SignatureFormat::Base64 => base64::engine::general_purpose::STANDARD.encode(signature),
            SignatureFormat::Hex => hex::encode(signature),
        }
    }
}
