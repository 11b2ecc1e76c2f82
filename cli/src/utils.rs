use std::fs;
use std::io::{self, Read};

use log::{debug, warn};
use shirushi_pem::Pem;

use crate::error::Result;

/// Read input from a file or stdin
///
/// If `file` is `Some`, reads from the specified file path.
/// If `file` is `None`, reads from stdin.
pub(crate) fn read_input(file: Option<&str>) -> Result<Vec<u8>> {
    match file {
        Some(path) => {
            debug!("reading {path}");
            Ok(fs::read(path)?)
        }
        None => {
            debug!("reading stdin");
            let mut buffer = Vec::new();
            io::stdin().read_to_end(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// Parse the first PEM block of `input`, warning about any blocks after it.
pub(crate) fn first_pem(input: &[u8]) -> Result<Pem> {
    let text = String::from_utf8_lossy(input);
    let pem: Pem = text.parse()?;
    debug!("PEM label: {}", pem.label());
    if let Ok(blocks) = shirushi_pem::parse_many(&text) {
        if blocks.len() > 1 {
            warn!("ignoring {} PEM block(s) after the first one", blocks.len() - 1);
        }
    }
    Ok(pem)
}
