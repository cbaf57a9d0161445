use std::{
    fmt,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use cryowurst::{decode_all, read_messages, Decoded, DecoderConfig};
use tracing::{debug, info, warn};

use crate::output;

/// Input file and row a message was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub path: PathBuf,
    pub line: u64,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path.display(), self.line)
    }
}

/// Read all hex messages from `inputs`, in file then row order.
pub fn read_inputs(inputs: &[PathBuf]) -> Result<Vec<(Source, String)>> {
    if inputs.is_empty() {
        bail!("no inputs provided");
    }
    let mut messages = Vec::default();
    for input in inputs {
        let file = File::open(input).with_context(|| format!("opening input {input:?}"))?;
        let before = messages.len();
        for zult in read_messages(BufReader::new(file)) {
            let msg = zult.with_context(|| format!("reading {input:?}"))?;
            let source = Source {
                path: input.clone(),
                line: msg.line,
            };
            messages.push((source, msg.message));
        }
        debug!("read {} messages from {input:?}", messages.len() - before);
    }
    Ok(messages)
}

pub struct DecodedInputs {
    pub decoded: Decoded,
    /// Where each of `decoded.failures` came from, in the same order
    pub failed: Vec<Source>,
}

pub fn decode_inputs(inputs: &[PathBuf], config: &DecoderConfig) -> Result<DecodedInputs> {
    let messages = read_inputs(inputs)?;
    let decoded = decode_all(messages.iter().map(|(_, m)| m), config)
        .context("decoding messages")?;
    let mut failed = Vec::with_capacity(decoded.failures.len());
    for failure in &decoded.failures {
        let source = messages[failure.index].0.clone();
        warn!("{source}: message failed to decode: {}", failure.error);
        failed.push(source);
    }
    Ok(DecodedInputs { decoded, failed })
}

pub fn decode(inputs: &[PathBuf], output: &Path, config: &DecoderConfig) -> Result<()> {
    let DecodedInputs { decoded, .. } = decode_inputs(inputs, config)?;

    let writer = csv::Writer::from_path(output)
        .with_context(|| format!("failed to create output {output:?}"))?;
    output::write_records(writer, &decoded.records)?;

    info!(
        "wrote {} records to {output:?}; {} failed, {} skipped",
        decoded.records.len(),
        decoded.failures.len(),
        decoded.skipped
    );
    Ok(())
}
